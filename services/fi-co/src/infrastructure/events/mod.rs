//! Event publishing

mod event_publisher;

pub use event_publisher::*;
