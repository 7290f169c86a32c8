//! 实体模块

mod cost_revaluation;
mod product_cost;
mod tenant_profile;

pub(crate) use cost_revaluation::RevaluationState;
pub use cost_revaluation::{CostRevaluation, MAX_REASON_LEN, ReviewDecision, validate_reason};
pub use product_cost::ProductCost;
pub use tenant_profile::TenantProfile;
