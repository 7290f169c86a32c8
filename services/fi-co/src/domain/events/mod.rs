//! 领域事件

mod costing_events;

pub use costing_events::*;
