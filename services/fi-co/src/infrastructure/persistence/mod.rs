//! Persistence implementations

mod converters;
mod memory;
mod postgres;
mod rows;

pub use memory::{
    InMemoryAuditLogRepository, InMemoryProductCostStore, InMemoryRevaluationRepository,
    InMemoryTenantDirectory,
};
pub use postgres::{
    PostgresAuditLogRepository, PostgresProductCostStore, PostgresRevaluationRepository,
    PostgresTenantDirectory,
};
