//! 成本重估仓储接口

use async_trait::async_trait;
use cuba_common::{PagedResult, Pagination, TenantId};
use cuba_errors::AppResult;

use crate::domain::entities::{CostRevaluation, ReviewDecision};
use crate::domain::enums::{CostSyncStatus, RevaluationStatus};
use crate::domain::value_objects::RevaluationId;

/// 成本重估仓储接口
///
/// 所有查询都带租户条件，其他租户的记录表现为不存在
#[async_trait]
pub trait RevaluationRepository: Send + Sync {
    /// 保存新建的重估
    async fn insert(&self, revaluation: &CostRevaluation) -> AppResult<()>;

    async fn find_by_id(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<CostRevaluation>>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        status: Option<RevaluationStatus>,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<CostRevaluation>>;

    /// 原子条件转换：仅当记录仍为 PENDING 时应用决定
    ///
    /// 返回转换后的记录；记录不存在或已不是 PENDING 时返回 None。
    /// 并发调用中至多一个返回 Some
    async fn transition(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
        decision: &ReviewDecision,
    ) -> AppResult<Option<CostRevaluation>>;

    /// 更新已审批重估的成本同步标记
    async fn set_cost_sync(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
        status: CostSyncStatus,
    ) -> AppResult<()>;
}
