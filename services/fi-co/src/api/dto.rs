//! 请求与响应结构

use chrono::{DateTime, NaiveDate, Utc};
use cuba_common::PagedResult;
use cuba_domain_core::Entity;
use cuba_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::CostRevaluation;
use crate::domain::enums::{AdjustmentKind, CostingMethod};
use crate::domain::mass_update::{Adjustment, MassUpdateFilter};
use crate::domain::value_objects::{CostComponents, ProductId};

// ========== 请求 ==========

#[derive(Debug, Deserialize)]
pub struct CreateRevaluationRequest {
    pub product_id: Uuid,
    pub proposed: CostComponents,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct RejectRevaluationRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListRevaluationsParams {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MassUpdateFilterDto {
    pub category: Option<String>,
    pub costing_method: Option<String>,
    pub effective_from: Option<NaiveDate>,
    pub effective_to: Option<NaiveDate>,
    pub product_ids: Option<Vec<Uuid>>,
}

impl MassUpdateFilterDto {
    pub fn into_domain(self) -> AppResult<MassUpdateFilter> {
        let costing_method = self
            .costing_method
            .as_deref()
            .map(str::parse::<CostingMethod>)
            .transpose()?;

        Ok(MassUpdateFilter {
            category: self.category,
            costing_method,
            effective_from: self.effective_from,
            effective_to: self.effective_to,
            product_ids: self
                .product_ids
                .map(|ids| ids.into_iter().map(ProductId::from_uuid).collect()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdjustmentDto {
    pub kind: Option<String>,
    pub material: Option<Decimal>,
    pub labor: Option<Decimal>,
    pub overhead: Option<Decimal>,
    #[serde(default)]
    pub reason: String,
}

impl AdjustmentDto {
    pub fn into_domain(self) -> AppResult<Adjustment> {
        let kind = self
            .kind
            .as_deref()
            .ok_or_else(|| AppError::validation("Adjustment kind is required"))?
            .parse::<AdjustmentKind>()?;

        Ok(Adjustment {
            kind,
            material: self.material,
            labor: self.labor,
            overhead: self.overhead,
            reason: self.reason,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct MassUpdateRequest {
    #[serde(default)]
    pub filter: MassUpdateFilterDto,
    pub adjustment: AdjustmentDto,
}

// ========== 响应 ==========

#[derive(Debug, Serialize)]
pub struct RevaluationResponse {
    pub id: String,
    pub product_id: String,
    pub proposed: CostComponents,
    pub previous: CostComponents,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<CostComponents>,
    pub reason: String,
    pub status: String,
    pub cost_sync: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<String>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl From<&CostRevaluation> for RevaluationResponse {
    fn from(r: &CostRevaluation) -> Self {
        Self {
            id: r.id().to_string(),
            product_id: r.product_id().to_string(),
            proposed: *r.proposed(),
            previous: *r.previous(),
            delta: r.delta().ok(),
            reason: r.reason().to_string(),
            status: r.status().to_string(),
            cost_sync: r.cost_sync().to_string(),
            created_by: r.created_by().to_string(),
            created_at: r.created_at(),
            approved_by: r.approved_by().map(ToString::to_string),
            approved_at: r.approved_at(),
            rejected_by: r.rejected_by().map(ToString::to_string),
            rejected_at: r.rejected_at(),
            rejection_reason: r.rejection_reason().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RevaluationListResponse {
    pub items: Vec<RevaluationResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl From<PagedResult<CostRevaluation>> for RevaluationListResponse {
    fn from(result: PagedResult<CostRevaluation>) -> Self {
        let total_pages = result.total_pages();
        Self {
            items: result.items.iter().map(RevaluationResponse::from).collect(),
            total: result.total,
            page: result.page,
            page_size: result.page_size,
            total_pages,
        }
    }
}
