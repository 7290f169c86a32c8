//! Application layer

pub mod commands;
pub mod handler;
pub mod queries;

pub use commands::*;
pub use handler::{CostingSettings, RequestContext, ServiceHandler};
pub use queries::*;
