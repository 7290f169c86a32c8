//! 成本重估命令

use cuba_errors::AppResult;

use crate::domain::entities::validate_reason;
use crate::domain::value_objects::{CostComponents, ProductId, RevaluationId};

/// 创建重估命令
#[derive(Debug, Clone)]
pub struct CreateRevaluationCommand {
    pub product_id: ProductId,
    /// 目标标准成本
    pub proposed: CostComponents,
    pub reason: String,
}

impl CreateRevaluationCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_reason(&self.reason)?;
        self.proposed.ensure_storable()
    }
}

/// 审批重估命令
#[derive(Debug, Clone)]
pub struct ApproveRevaluationCommand {
    pub revaluation_id: RevaluationId,
}

/// 拒绝重估命令
#[derive(Debug, Clone)]
pub struct RejectRevaluationCommand {
    pub revaluation_id: RevaluationId,
    pub reason: String,
}

impl RejectRevaluationCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_reason(&self.reason)
    }
}

/// 重试成本同步命令
#[derive(Debug, Clone)]
pub struct RetryCostSyncCommand {
    pub revaluation_id: RevaluationId,
}
