//! 成本核算领域事件

use chrono::{DateTime, Utc};
use cuba_common::{TenantId, UserId};
use cuba_domain_core::{Currency, Money};
use cuba_errors::{AppError, AppResult};
use cuba_ports::EventEnvelope;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::enums::AdjustmentKind;
use crate::domain::value_objects::{CostComponents, ProductId, RevaluationId};

/// 成本核算事件主题
pub const COSTING_EVENTS_TOPIC: &str = "fi-co.costing";
/// 会计子系统消费的过账意图主题
pub const POSTING_INTENTS_TOPIC: &str = "fi-co.posting-intents";

const REVALUATION_AGGREGATE: &str = "CostRevaluation";
const PRODUCT_COST_AGGREGATE: &str = "ProductCost";

/// 重估已创建
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevaluationCreated {
    pub revaluation_id: RevaluationId,
    pub product_id: ProductId,
    pub proposed: CostComponents,
    pub previous: CostComponents,
    pub reason: String,
    pub created_by: UserId,
}

/// 重估已审批
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevaluationApproved {
    pub revaluation_id: RevaluationId,
    pub product_id: ProductId,
    pub approved: CostComponents,
    pub approved_by: UserId,
    pub approved_at: DateTime<Utc>,
}

/// 重估已拒绝
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevaluationRejected {
    pub revaluation_id: RevaluationId,
    pub product_id: ProductId,
    pub rejected_by: UserId,
    pub reason: String,
}

/// 过账行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingLine {
    pub component: String,
    pub amount: Decimal,
}

/// 重估过账意图
///
/// 本服务不做复式记账，只给出差额和科目，由会计子系统生成凭证
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevaluationPostingIntent {
    pub revaluation_id: RevaluationId,
    pub product_id: ProductId,
    pub reason_code: String,
    pub gl_account: String,
    pub lines: Vec<PostingLine>,
    /// 各行合计，币种为租户本位币
    pub total: Money,
}

impl RevaluationPostingIntent {
    pub fn new(
        revaluation_id: RevaluationId,
        product_id: ProductId,
        delta: &CostComponents,
        reason_code: impl Into<String>,
        gl_account: impl Into<String>,
        currency: Currency,
    ) -> AppResult<Self> {
        let total = delta.total()?;
        let lines = delta
            .named()
            .into_iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(component, amount)| PostingLine {
                component: component.to_string(),
                amount,
            })
            .collect();

        Ok(Self {
            revaluation_id,
            product_id,
            reason_code: reason_code.into(),
            gl_account: gl_account.into(),
            lines,
            total: Money::new(total, currency),
        })
    }
}

/// 标准成本已批量更新
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardCostsMassUpdated {
    pub adjustment_kind: AdjustmentKind,
    pub reason: String,
    pub updated_count: u64,
    pub product_ids: Vec<ProductId>,
    pub updated_by: UserId,
}

/// 成本核算领域事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CostingEvent {
    RevaluationCreated(RevaluationCreated),
    RevaluationApproved(RevaluationApproved),
    RevaluationRejected(RevaluationRejected),
    RevaluationPostingIntent(RevaluationPostingIntent),
    StandardCostsMassUpdated(StandardCostsMassUpdated),
}

impl CostingEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CostingEvent::RevaluationCreated(_) => "costing.revaluation.created",
            CostingEvent::RevaluationApproved(_) => "costing.revaluation.approved",
            CostingEvent::RevaluationRejected(_) => "costing.revaluation.rejected",
            CostingEvent::RevaluationPostingIntent(_) => "costing.revaluation.posting_intent",
            CostingEvent::StandardCostsMassUpdated(_) => "costing.standard_costs.mass_updated",
        }
    }

    pub fn topic(&self) -> &'static str {
        match self {
            CostingEvent::RevaluationPostingIntent(_) => POSTING_INTENTS_TOPIC,
            _ => COSTING_EVENTS_TOPIC,
        }
    }

    fn aggregate(&self) -> (&'static str, String) {
        match self {
            CostingEvent::RevaluationCreated(e) => (REVALUATION_AGGREGATE, e.revaluation_id.to_string()),
            CostingEvent::RevaluationApproved(e) => (REVALUATION_AGGREGATE, e.revaluation_id.to_string()),
            CostingEvent::RevaluationRejected(e) => (REVALUATION_AGGREGATE, e.revaluation_id.to_string()),
            CostingEvent::RevaluationPostingIntent(e) => {
                (REVALUATION_AGGREGATE, e.revaluation_id.to_string())
            }
            // 批量事件没有单一聚合
            CostingEvent::StandardCostsMassUpdated(_) => (PRODUCT_COST_AGGREGATE, "*".to_string()),
        }
    }

    fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            CostingEvent::RevaluationCreated(e) => serde_json::to_value(e),
            CostingEvent::RevaluationApproved(e) => serde_json::to_value(e),
            CostingEvent::RevaluationRejected(e) => serde_json::to_value(e),
            CostingEvent::RevaluationPostingIntent(e) => serde_json::to_value(e),
            CostingEvent::StandardCostsMassUpdated(e) => serde_json::to_value(e),
        }
    }

    /// 转换为发布用的信封
    pub fn to_envelope(&self, tenant_id: &TenantId) -> AppResult<EventEnvelope> {
        let payload = self
            .payload()
            .map_err(|e| AppError::internal(format!("Failed to serialize event: {}", e)))?;
        let (aggregate_type, aggregate_id) = self.aggregate();

        Ok(EventEnvelope::new(
            tenant_id.clone(),
            self.event_type(),
            aggregate_type,
            aggregate_id,
            Utc::now(),
            payload,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_posting_intent_skips_unchanged_components() {
        let delta = CostComponents::new(dec!(10.00), dec!(0), dec!(-2.50));
        let intent = RevaluationPostingIntent::new(
            RevaluationId::new(),
            ProductId::new(),
            &delta,
            "REVALUATION",
            "1410",
            Currency::usd(),
        )
        .unwrap();

        assert_eq!(intent.lines.len(), 2);
        assert_eq!(intent.lines[1].component, "overhead");
        assert_eq!(intent.total.amount, dec!(7.50));
        assert_eq!(intent.total.currency, Currency::usd());
    }

    #[test]
    fn test_envelope_routing() {
        let tenant = TenantId::new();
        let event = CostingEvent::RevaluationRejected(RevaluationRejected {
            revaluation_id: RevaluationId::new(),
            product_id: ProductId::new(),
            rejected_by: UserId::new(),
            reason: "Duplicate request".to_string(),
        });

        let envelope = event.to_envelope(&tenant).unwrap();
        assert_eq!(envelope.tenant_id, tenant);
        assert_eq!(envelope.event_type, "costing.revaluation.rejected");
        assert_eq!(envelope.aggregate_type, "CostRevaluation");
        assert_eq!(envelope.payload["reason"], "Duplicate request");
        assert_eq!(event.topic(), COSTING_EVENTS_TOPIC);
    }
}
