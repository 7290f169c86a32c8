//! 枚举模块

mod adjustment_kind;
mod costing_method;
mod revaluation_status;

pub use adjustment_kind::AdjustmentKind;
pub use costing_method::CostingMethod;
pub use revaluation_status::{CostSyncStatus, RevaluationStatus};
