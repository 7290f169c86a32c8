//! Commands module

pub mod mass_update_commands;
pub mod revaluation_commands;

pub use mass_update_commands::*;
pub use revaluation_commands::*;
