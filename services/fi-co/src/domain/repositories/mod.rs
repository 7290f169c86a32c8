//! 仓储接口

mod product_cost_store;
mod revaluation_repository;
mod tenant_directory;

pub use product_cost_store::ProductCostStore;
pub use revaluation_repository::RevaluationRepository;
pub use tenant_directory::TenantDirectory;
