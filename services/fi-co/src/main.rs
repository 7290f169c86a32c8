//! fi-co Service - Standard Costing & Revaluation

use std::sync::Arc;

use cuba_adapter_postgres::{Migration, MigrationManager};
use cuba_auth_core::RoleCapabilityTable;
use cuba_bootstrap::Infrastructure;
use tracing::info;

use fi_co::api;
use fi_co::application::{CostingSettings, ServiceHandler};
use fi_co::infrastructure::events::LoggingEventPublisher;
use fi_co::infrastructure::persistence::{
    PostgresAuditLogRepository, PostgresProductCostStore, PostgresRevaluationRepository,
    PostgresTenantDirectory,
};

fn migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "costing_init",
        include_str!("../migrations/0001_costing_init.sql"),
    )]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    cuba_bootstrap::run("config", |infra: Infrastructure| async move {
        info!("Initializing fi-co Service...");

        let config = infra.config().clone();
        let pool = infra.postgres_pool();

        if config.database.run_migrations {
            let result = MigrationManager::new(pool.clone())
                .with_table_name("_fi_co_migrations")
                .migrate(&migrations())
                .await?;
            info!(applied = result.applied_count(), "Migrations finished");
        }

        let handler = Arc::new(ServiceHandler::new(
            Arc::new(PostgresRevaluationRepository::new(pool.clone())),
            Arc::new(PostgresProductCostStore::new(pool.clone())),
            Arc::new(PostgresTenantDirectory::new(pool.clone())),
            Arc::new(PostgresAuditLogRepository::new(pool)),
            Arc::new(LoggingEventPublisher),
            Arc::new(RoleCapabilityTable::from_config(&config.costing.roles)),
            CostingSettings::from_config(&config.costing),
        ));
        info!("Service handler initialized");

        Ok(api::router(handler, infra.token_service()))
    })
    .await
}
