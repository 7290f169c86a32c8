//! 成本重估聚合根

use chrono::{DateTime, Utc};
use cuba_common::{AuditInfo, TenantId, UserId};
use cuba_domain_core::{AggregateRoot, Entity};
use cuba_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::domain::enums::{CostSyncStatus, RevaluationStatus};
use crate::domain::value_objects::{CostComponents, ProductId, RevaluationId};

/// 原因最大长度
pub const MAX_REASON_LEN: usize = 500;

/// 校验业务原因：必填，且不超过 MAX_REASON_LEN 个字符
pub fn validate_reason(reason: &str) -> AppResult<()> {
    if reason.trim().is_empty() {
        return Err(AppError::validation("Reason is required"));
    }
    if reason.chars().count() > MAX_REASON_LEN {
        return Err(AppError::validation(format!(
            "Reason must not exceed {} characters",
            MAX_REASON_LEN
        )));
    }
    Ok(())
}

/// 审批决定
#[derive(Debug, Clone)]
pub enum ReviewDecision {
    Approve {
        approver: UserId,
        at: DateTime<Utc>,
    },
    Reject {
        reviewer: UserId,
        at: DateTime<Utc>,
        reason: String,
    },
}

impl ReviewDecision {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            ReviewDecision::Approve { at, .. } | ReviewDecision::Reject { at, .. } => *at,
        }
    }

    pub fn target_status(&self) -> RevaluationStatus {
        match self {
            ReviewDecision::Approve { .. } => RevaluationStatus::Approved,
            ReviewDecision::Reject { .. } => RevaluationStatus::Rejected,
        }
    }
}

/// 成本重估聚合根
///
/// 对一个产品标准成本的变更提议。`proposed` 是目标成本，`previous` 是创建时的成本快照。
/// 记录永不删除，审批或拒绝后不可再变更状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRevaluation {
    id: RevaluationId,
    tenant_id: TenantId,
    product_id: ProductId,
    proposed: CostComponents,
    previous: CostComponents,
    reason: String,
    status: RevaluationStatus,
    cost_sync: CostSyncStatus,
    created_by: UserId,
    created_at: DateTime<Utc>,
    approved_by: Option<UserId>,
    approved_at: Option<DateTime<Utc>>,
    rejected_by: Option<UserId>,
    rejected_at: Option<DateTime<Utc>>,
    rejection_reason: Option<String>,
    audit_info: AuditInfo,
}

impl CostRevaluation {
    /// 创建新的重估（PENDING）
    pub fn new(
        tenant_id: TenantId,
        product_id: ProductId,
        proposed: CostComponents,
        previous: CostComponents,
        reason: impl Into<String>,
        created_by: UserId,
    ) -> AppResult<Self> {
        let reason = reason.into();
        validate_reason(&reason)?;
        proposed.ensure_storable()?;

        let audit_info = AuditInfo::new(Some(created_by.clone()));
        Ok(Self {
            id: RevaluationId::new(),
            tenant_id,
            product_id,
            proposed,
            previous,
            reason: reason.trim().to_string(),
            status: RevaluationStatus::Pending,
            cost_sync: CostSyncStatus::NotRequired,
            created_by,
            created_at: audit_info.created_at,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            audit_info,
        })
    }

    // ========== Getters ==========

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn proposed(&self) -> &CostComponents {
        &self.proposed
    }

    pub fn previous(&self) -> &CostComponents {
        &self.previous
    }

    /// 目标成本相对于创建时快照的差额
    pub fn delta(&self) -> AppResult<CostComponents> {
        self.proposed.delta_from(&self.previous)
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn status(&self) -> RevaluationStatus {
        self.status
    }

    pub fn cost_sync(&self) -> CostSyncStatus {
        self.cost_sync
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn approved_by(&self) -> Option<&UserId> {
        self.approved_by.as_ref()
    }

    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    pub fn rejected_by(&self) -> Option<&UserId> {
        self.rejected_by.as_ref()
    }

    pub fn rejected_at(&self) -> Option<DateTime<Utc>> {
        self.rejected_at
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    // ========== 状态转换 ==========

    /// 审批时间不得早于创建时间，在发起条件更新之前检查
    pub fn check_review_time(&self, decision: &ReviewDecision) -> AppResult<()> {
        if decision.at() < self.created_at {
            return Err(AppError::validation(
                "Review time must not precede creation time",
            ));
        }
        Ok(())
    }

    /// 应用审批决定
    ///
    /// 仅 PENDING 可以转换。审批同时把成本同步标记为 PENDING，直到后续写入完成。
    /// 存储层在原子的条件更新中调用
    pub fn apply_decision(&mut self, decision: &ReviewDecision) -> AppResult<()> {
        if self.status != RevaluationStatus::Pending {
            return Err(AppError::invalid_state(format!(
                "Revaluation {} is {} and can no longer be reviewed",
                self.id, self.status
            )));
        }

        match decision {
            ReviewDecision::Approve { approver, at } => {
                self.status = RevaluationStatus::Approved;
                self.cost_sync = CostSyncStatus::Pending;
                self.approved_by = Some(approver.clone());
                self.approved_at = Some(*at);
                self.audit_info.touch(Some(approver.clone()), *at);
            }
            ReviewDecision::Reject {
                reviewer,
                at,
                reason,
            } => {
                validate_reason(reason)?;
                self.status = RevaluationStatus::Rejected;
                self.rejected_by = Some(reviewer.clone());
                self.rejected_at = Some(*at);
                self.rejection_reason = Some(reason.trim().to_string());
                self.audit_info.touch(Some(reviewer.clone()), *at);
            }
        }

        Ok(())
    }

    /// 记录产品成本同步结果，仅对已审批的重估有效
    pub fn set_cost_sync(&mut self, status: CostSyncStatus) -> AppResult<()> {
        if self.status != RevaluationStatus::Approved && status != CostSyncStatus::NotRequired {
            return Err(AppError::invalid_state(format!(
                "Revaluation {} is {}; cost sync applies to approved revaluations only",
                self.id, self.status
            )));
        }
        self.cost_sync = status;
        Ok(())
    }

    /// 是否可以重试成本同步：已审批且同步未确认完成
    pub fn needs_cost_sync_retry(&self) -> bool {
        self.status == RevaluationStatus::Approved
            && matches!(self.cost_sync, CostSyncStatus::Pending | CostSyncStatus::Failed)
    }

    // ========== 持久化恢复 ==========

    /// 从存储恢复
    pub(crate) fn restore(state: RevaluationState) -> Self {
        let audit_info = AuditInfo {
            created_at: state.created_at,
            created_by: Some(state.created_by.clone()),
            updated_at: state.updated_at,
            updated_by: state.updated_by,
        };

        Self {
            id: state.id,
            tenant_id: state.tenant_id,
            product_id: state.product_id,
            proposed: state.proposed,
            previous: state.previous,
            reason: state.reason,
            status: state.status,
            cost_sync: state.cost_sync,
            created_by: state.created_by,
            created_at: state.created_at,
            approved_by: state.approved_by,
            approved_at: state.approved_at,
            rejected_by: state.rejected_by,
            rejected_at: state.rejected_at,
            rejection_reason: state.rejection_reason,
            audit_info,
        }
    }
}

/// 存储层恢复聚合根时使用的完整状态
#[derive(Debug, Clone)]
pub(crate) struct RevaluationState {
    pub id: RevaluationId,
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub proposed: CostComponents,
    pub previous: CostComponents,
    pub reason: String,
    pub status: RevaluationStatus,
    pub cost_sync: CostSyncStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<UserId>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
}

impl Entity for CostRevaluation {
    type Id = RevaluationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for CostRevaluation {
    fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
