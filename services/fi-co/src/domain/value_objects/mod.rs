//! 值对象

mod cost_components;
mod ids;

pub use cost_components::CostComponents;
pub use ids::{ProductId, RevaluationId};
