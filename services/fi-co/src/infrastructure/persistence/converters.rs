//! 数据库行到领域对象的转换

use cuba_common::{TenantId, UserId};
use cuba_domain_core::{CountryCode, Currency};
use cuba_errors::{AppError, AppResult};
use cuba_ports::AuditLogEntry;

use crate::domain::entities::{CostRevaluation, ProductCost, RevaluationState, TenantProfile};
use crate::domain::enums::{CostSyncStatus, CostingMethod, RevaluationStatus};
use crate::domain::value_objects::{CostComponents, ProductId, RevaluationId};

use super::rows::{AuditLogRow, ProductCostRow, RevaluationRow, TenantRow};

/// 列值无法解析时视为数据损坏
fn corrupt(column: &str, e: AppError) -> AppError {
    AppError::internal(format!("Corrupt {} column: {}", column, e))
}

pub fn revaluation_from_row(row: RevaluationRow) -> AppResult<CostRevaluation> {
    let status = row.status.parse::<RevaluationStatus>().map_err(|e| corrupt("status", e))?;
    let cost_sync = row.cost_sync.parse::<CostSyncStatus>().map_err(|e| corrupt("cost_sync", e))?;

    Ok(CostRevaluation::restore(RevaluationState {
        id: RevaluationId::from_uuid(row.id),
        tenant_id: TenantId::from_uuid(row.tenant_id),
        product_id: ProductId::from_uuid(row.product_id),
        proposed: CostComponents::new(
            row.proposed_material,
            row.proposed_labor,
            row.proposed_overhead,
        ),
        previous: CostComponents::new(
            row.previous_material,
            row.previous_labor,
            row.previous_overhead,
        ),
        reason: row.reason,
        status,
        cost_sync,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        approved_by: row.approved_by.map(UserId::from_uuid),
        approved_at: row.approved_at,
        rejected_by: row.rejected_by.map(UserId::from_uuid),
        rejected_at: row.rejected_at,
        rejection_reason: row.rejection_reason,
        updated_at: row.updated_at,
        updated_by: row.updated_by.map(UserId::from_uuid),
    }))
}

pub fn product_cost_from_row(row: ProductCostRow) -> AppResult<ProductCost> {
    let costing_method = row
        .costing_method
        .parse::<CostingMethod>()
        .map_err(|e| corrupt("costing_method", e))?;

    Ok(ProductCost {
        product_id: ProductId::from_uuid(row.product_id),
        tenant_id: TenantId::from_uuid(row.tenant_id),
        category: row.category,
        costing_method,
        standard_cost: CostComponents::new(row.material_cost, row.labor_cost, row.overhead_cost),
        effective_date: row.effective_date,
        version: row.version,
        updated_at: row.updated_at,
    })
}

pub fn tenant_from_row(row: TenantRow) -> AppResult<TenantProfile> {
    Ok(TenantProfile {
        id: TenantId::from_uuid(row.id),
        slug: row.slug,
        home_country: CountryCode::new(&row.home_country)
            .map_err(|e| corrupt("home_country", e))?,
        base_currency: Currency::new(&row.base_currency)
            .map_err(|e| corrupt("base_currency", e))?,
    })
}

pub fn audit_entry_from_row(row: AuditLogRow) -> AuditLogEntry {
    AuditLogEntry {
        id: row.id,
        timestamp: row.created_at,
        tenant_id: TenantId::from_uuid(row.tenant_id),
        user_id: UserId::from_uuid(row.user_id),
        action: row.action,
        resource_type: row.resource_type,
        resource_id: row.resource_id,
        reason: row.reason,
        old_value: row.old_value,
        new_value: row.new_value,
    }
}
