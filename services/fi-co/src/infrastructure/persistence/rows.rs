//! 数据库行映射结构

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// 成本重估数据库行
#[derive(Debug, FromRow)]
pub struct RevaluationRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub product_id: Uuid,
    pub proposed_material: Decimal,
    pub proposed_labor: Decimal,
    pub proposed_overhead: Decimal,
    pub previous_material: Decimal,
    pub previous_labor: Decimal,
    pub previous_overhead: Decimal,
    pub reason: String,
    pub status: String,
    pub cost_sync: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 产品成本数据库行
#[derive(Debug, FromRow)]
pub struct ProductCostRow {
    pub tenant_id: Uuid,
    pub product_id: Uuid,
    pub category: Option<String>,
    pub costing_method: String,
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub overhead_cost: Decimal,
    pub effective_date: Option<NaiveDate>,
    pub version: i64,
    pub updated_at: DateTime<Utc>,
}

/// 租户数据库行
#[derive(Debug, FromRow)]
pub struct TenantRow {
    pub id: Uuid,
    pub slug: String,
    pub home_country: String,
    pub base_currency: String,
}

/// 审计日志数据库行
#[derive(Debug, FromRow)]
pub struct AuditLogRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub reason: Option<String>,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
