//! PostgreSQL repository implementation

use async_trait::async_trait;
use cuba_adapter_postgres::TransactionManager;
use cuba_common::{PagedResult, Pagination, TenantId};
use cuba_domain_core::{AggregateRoot, Entity};
use cuba_errors::{AppError, AppResult};
use cuba_ports::{AuditLogEntry, AuditLogFilter, AuditLogRepository};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{CostRevaluation, ProductCost, ReviewDecision, TenantProfile};
use crate::domain::enums::{CostSyncStatus, RevaluationStatus};
use crate::domain::mass_update::MassUpdateFilter;
use crate::domain::repositories::{ProductCostStore, RevaluationRepository, TenantDirectory};
use crate::domain::value_objects::{CostComponents, ProductId, RevaluationId};

use super::converters::{
    audit_entry_from_row, product_cost_from_row, revaluation_from_row, tenant_from_row,
};
use super::rows::{AuditLogRow, ProductCostRow, RevaluationRow, TenantRow};

const REVALUATION_COLUMNS: &str = r#"
    id, tenant_id, product_id,
    proposed_material, proposed_labor, proposed_overhead,
    previous_material, previous_labor, previous_overhead,
    reason, status, cost_sync,
    created_by, created_at, approved_by, approved_at,
    rejected_by, rejected_at, rejection_reason,
    updated_at, updated_by
"#;

const PRODUCT_COST_COLUMNS: &str = r#"
    tenant_id, product_id, category, costing_method,
    material_cost, labor_cost, overhead_cost,
    effective_date, version, updated_at
"#;

// ============================================================================
// RevaluationRepository 实现
// ============================================================================

pub struct PostgresRevaluationRepository {
    pool: PgPool,
}

impl PostgresRevaluationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevaluationRepository for PostgresRevaluationRepository {
    async fn insert(&self, revaluation: &CostRevaluation) -> AppResult<()> {
        let proposed = revaluation.proposed();
        let previous = revaluation.previous();
        let audit = revaluation.audit_info();

        sqlx::query(
            r#"
            INSERT INTO cost_revaluations (
                id, tenant_id, product_id,
                proposed_material, proposed_labor, proposed_overhead,
                previous_material, previous_labor, previous_overhead,
                reason, status, cost_sync, created_by, created_at,
                updated_at, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(revaluation.id().0)
        .bind(revaluation.tenant_id().0)
        .bind(revaluation.product_id().0)
        .bind(proposed.material)
        .bind(proposed.labor)
        .bind(proposed.overhead)
        .bind(previous.material)
        .bind(previous.labor)
        .bind(previous.overhead)
        .bind(revaluation.reason())
        .bind(revaluation.status().as_str())
        .bind(revaluation.cost_sync().as_str())
        .bind(revaluation.created_by().0)
        .bind(revaluation.created_at())
        .bind(audit.updated_at)
        .bind(audit.updated_by.as_ref().map(|u| u.0))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert revaluation: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<CostRevaluation>> {
        let sql = format!(
            "SELECT {} FROM cost_revaluations WHERE id = $1 AND tenant_id = $2",
            REVALUATION_COLUMNS
        );
        let row = sqlx::query_as::<_, RevaluationRow>(&sql)
            .bind(id.0)
            .bind(tenant_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load revaluation: {}", e)))?;

        row.map(revaluation_from_row).transpose()
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        status: Option<RevaluationStatus>,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<CostRevaluation>> {
        let status = status.map(|s| s.as_str());

        let total: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM cost_revaluations WHERE tenant_id = $1 AND ($2::text IS NULL OR status = $2)",
        )
        .bind(tenant_id.0)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count revaluations: {}", e)))?;

        let sql = format!(
            r#"
            SELECT {} FROM cost_revaluations
            WHERE tenant_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
            REVALUATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, RevaluationRow>(&sql)
            .bind(tenant_id.0)
            .bind(status)
            .bind(pagination.limit() as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list revaluations: {}", e)))?;

        let items = rows
            .into_iter()
            .map(revaluation_from_row)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PagedResult::new(items, total.0 as u64, pagination))
    }

    async fn transition(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
        decision: &ReviewDecision,
    ) -> AppResult<Option<CostRevaluation>> {
        // 条件与赋值在同一条语句中完成
        let (assignments, user_id, at, reason) = match decision {
            ReviewDecision::Approve { approver, at } => (
                "status = 'APPROVED', cost_sync = 'PENDING', approved_by = $3, approved_at = $4",
                approver.0,
                *at,
                None,
            ),
            ReviewDecision::Reject {
                reviewer,
                at,
                reason,
            } => (
                "status = 'REJECTED', rejected_by = $3, rejected_at = $4, rejection_reason = $5",
                reviewer.0,
                *at,
                Some(reason.trim().to_string()),
            ),
        };

        let sql = format!(
            r#"
            UPDATE cost_revaluations
            SET {}, updated_by = $3, updated_at = $4
            WHERE id = $1 AND tenant_id = $2 AND status = 'PENDING'
            RETURNING {}
            "#,
            assignments, REVALUATION_COLUMNS
        );

        let mut query = sqlx::query_as::<_, RevaluationRow>(&sql)
            .bind(id.0)
            .bind(tenant_id.0)
            .bind(user_id)
            .bind(at);
        if let Some(reason) = reason {
            query = query.bind(reason);
        }

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to transition revaluation: {}", e)))?;

        row.map(revaluation_from_row).transpose()
    }

    async fn set_cost_sync(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
        status: CostSyncStatus,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE cost_revaluations SET cost_sync = $3
            WHERE id = $1 AND tenant_id = $2 AND status = 'APPROVED'
            "#,
        )
        .bind(id.0)
        .bind(tenant_id.0)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update cost sync: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::invalid_state(format!(
                "Revaluation {} is not approved",
                id
            )));
        }
        Ok(())
    }
}

// ============================================================================
// ProductCostStore 实现
// ============================================================================

pub struct PostgresProductCostStore {
    pool: PgPool,
}

impl PostgresProductCostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCostStore for PostgresProductCostStore {
    async fn read_product(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<ProductCost>> {
        let sql = format!(
            "SELECT {} FROM product_costs WHERE product_id = $1 AND tenant_id = $2",
            PRODUCT_COST_COLUMNS
        );
        let row = sqlx::query_as::<_, ProductCostRow>(&sql)
            .bind(product_id.0)
            .bind(tenant_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load product cost: {}", e)))?;

        row.map(product_cost_from_row).transpose()
    }

    async fn find_matching(
        &self,
        tenant_id: &TenantId,
        filter: &MassUpdateFilter,
        limit: usize,
    ) -> AppResult<Vec<ProductCost>> {
        // 指定日期区间时 effective_date 为 NULL 的行比较结果为 NULL，不会命中
        let sql = format!(
            r#"
            SELECT {} FROM product_costs
            WHERE tenant_id = $1
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR costing_method = $3)
              AND ($4::date IS NULL OR effective_date >= $4)
              AND ($5::date IS NULL OR effective_date <= $5)
              AND ($6::uuid[] IS NULL OR product_id = ANY($6))
            ORDER BY product_id
            LIMIT $7
            "#,
            PRODUCT_COST_COLUMNS
        );
        let product_ids: Option<Vec<Uuid>> = filter
            .product_ids
            .as_ref()
            .map(|ids| ids.iter().map(|id| id.0).collect());

        let rows = sqlx::query_as::<_, ProductCostRow>(&sql)
            .bind(tenant_id.0)
            .bind(filter.category.as_deref())
            .bind(filter.costing_method.map(|m| m.as_str()))
            .bind(filter.effective_from)
            .bind(filter.effective_to)
            .bind(product_ids)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query product costs: {}", e)))?;

        rows.into_iter().map(product_cost_from_row).collect()
    }

    async fn apply_cost_update(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        components: &CostComponents,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE product_costs
            SET material_cost = $3, labor_cost = $4, overhead_cost = $5,
                version = version + 1, updated_at = NOW()
            WHERE product_id = $1 AND tenant_id = $2
            "#,
        )
        .bind(product_id.0)
        .bind(tenant_id.0)
        .bind(components.material)
        .bind(components.labor)
        .bind(components.overhead)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply cost update: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Product {} not found",
                product_id
            )));
        }
        Ok(())
    }

    async fn update_standard_cost(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        components: &CostComponents,
        expected_version: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE product_costs
            SET material_cost = $3, labor_cost = $4, overhead_cost = $5,
                version = version + 1, updated_at = NOW()
            WHERE product_id = $1 AND tenant_id = $2 AND version = $6
            "#,
        )
        .bind(product_id.0)
        .bind(tenant_id.0)
        .bind(components.material)
        .bind(components.labor)
        .bind(components.overhead)
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update standard cost: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}

// ============================================================================
// TenantDirectory 实现
// ============================================================================

pub struct PostgresTenantDirectory {
    pool: PgPool,
}

impl PostgresTenantDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantDirectory for PostgresTenantDirectory {
    async fn resolve(&self, slug: &str) -> AppResult<Option<TenantProfile>> {
        let row = sqlx::query_as::<_, TenantRow>(
            "SELECT id, slug, home_country, base_currency FROM tenants WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to resolve tenant: {}", e)))?;

        row.map(tenant_from_row).transpose()
    }
}

// ============================================================================
// AuditLogRepository 实现
// ============================================================================

pub struct PostgresAuditLogRepository {
    tx_manager: TransactionManager,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            tx_manager: TransactionManager::new(pool),
        }
    }
}

const INSERT_AUDIT_LOG: &str = r#"
    INSERT INTO audit_logs (
        id, tenant_id, user_id, action, resource_type, resource_id,
        reason, old_value, new_value, created_at
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
"#;

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn log(&self, entry: AuditLogEntry) -> AppResult<()> {
        sqlx::query(INSERT_AUDIT_LOG)
            .bind(entry.id)
            .bind(entry.tenant_id.0)
            .bind(entry.user_id.0)
            .bind(&entry.action)
            .bind(&entry.resource_type)
            .bind(&entry.resource_id)
            .bind(&entry.reason)
            .bind(&entry.old_value)
            .bind(&entry.new_value)
            .bind(entry.timestamp)
            .execute(self.tx_manager.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to write audit log: {}", e)))?;
        Ok(())
    }

    async fn log_batch(&self, entries: Vec<AuditLogEntry>) -> AppResult<u64> {
        let mut tx = self.tx_manager.begin().await?;
        let mut written = 0;

        for entry in &entries {
            sqlx::query(INSERT_AUDIT_LOG)
                .bind(entry.id)
                .bind(entry.tenant_id.0)
                .bind(entry.user_id.0)
                .bind(&entry.action)
                .bind(&entry.resource_type)
                .bind(&entry.resource_id)
                .bind(&entry.reason)
                .bind(&entry.old_value)
                .bind(&entry.new_value)
                .bind(entry.timestamp)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to write audit log: {}", e)))?;
            written += 1;
        }

        TransactionManager::commit(tx).await?;
        Ok(written)
    }

    async fn query(
        &self,
        tenant_id: &TenantId,
        filter: &AuditLogFilter,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<AuditLogEntry>> {
        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM audit_logs
            WHERE tenant_id = $1
              AND ($2::text IS NULL OR action = $2)
              AND ($3::text IS NULL OR resource_type = $3)
              AND ($4::text IS NULL OR resource_id = $4)
            "#,
        )
        .bind(tenant_id.0)
        .bind(&filter.action)
        .bind(&filter.resource_type)
        .bind(&filter.resource_id)
        .fetch_one(self.tx_manager.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to count audit logs: {}", e)))?;

        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, tenant_id, user_id, action, resource_type, resource_id,
                   reason, old_value, new_value, created_at
            FROM audit_logs
            WHERE tenant_id = $1
              AND ($2::text IS NULL OR action = $2)
              AND ($3::text IS NULL OR resource_type = $3)
              AND ($4::text IS NULL OR resource_id = $4)
            ORDER BY created_at DESC, id DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(tenant_id.0)
        .bind(&filter.action)
        .bind(&filter.resource_type)
        .bind(&filter.resource_id)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.tx_manager.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to query audit logs: {}", e)))?;

        let items = rows.into_iter().map(audit_entry_from_row).collect();
        Ok(PagedResult::new(items, total.0 as u64, pagination))
    }
}
