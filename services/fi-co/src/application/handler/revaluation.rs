//! 成本重估工作流

use chrono::Utc;
use cuba_auth_core::{APPROVE_COST_REVALUATIONS, MANAGE_STANDARD_COSTS, VIEW_COST_VARIANCES};
use cuba_common::PagedResult;
use cuba_domain_core::Entity;
use cuba_errors::{AppError, AppResult};
use cuba_ports::AuditLogEntry;
use tracing::{error, info, warn};

use crate::application::commands::*;
use crate::application::queries::*;
use crate::domain::entities::{CostRevaluation, ReviewDecision, TenantProfile};
use crate::domain::enums::CostSyncStatus;
use crate::domain::events::{
    CostingEvent, RevaluationApproved, RevaluationCreated, RevaluationPostingIntent,
    RevaluationRejected,
};
use crate::domain::localization::tables::REVALUATION;
use crate::domain::value_objects::RevaluationId;
use crate::metrics;

use super::{RequestContext, ServiceHandler};

const RESOURCE_TYPE: &str = "CostRevaluation";

impl ServiceHandler {
    /// 创建重估（PENDING），并记录产品当前成本快照
    pub async fn create_revaluation(
        &self,
        ctx: &RequestContext,
        cmd: CreateRevaluationCommand,
    ) -> AppResult<CostRevaluation> {
        let tenant = self.authorize(ctx, MANAGE_STANDARD_COSTS).await?;
        info!(
            "Creating revaluation for product: {} for tenant: {}",
            cmd.product_id, tenant.id
        );

        cmd.validate()?;

        let product = self
            .products
            .read_product(&cmd.product_id, &tenant.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", cmd.product_id)))?;

        let revaluation = CostRevaluation::new(
            tenant.id.clone(),
            cmd.product_id,
            cmd.proposed.round(self.settings.cost_scale),
            product.standard_cost,
            cmd.reason,
            ctx.caller.user_id.clone(),
        )?;

        self.revaluations.insert(&revaluation).await?;

        self.record_audit(
            AuditLogEntry::new(
                tenant.id.clone(),
                ctx.caller.user_id.clone(),
                "CREATE",
                RESOURCE_TYPE,
                revaluation.id().to_string(),
            )
            .with_reason(revaluation.reason())
            .with_changes(
                serde_json::to_value(revaluation.previous()).ok(),
                serde_json::to_value(revaluation.proposed()).ok(),
            ),
        )
        .await;

        self.publish(
            &tenant,
            CostingEvent::RevaluationCreated(RevaluationCreated {
                revaluation_id: revaluation.id().clone(),
                product_id: revaluation.product_id().clone(),
                proposed: *revaluation.proposed(),
                previous: *revaluation.previous(),
                reason: revaluation.reason().to_string(),
                created_by: revaluation.created_by().clone(),
            }),
        )
        .await;

        metrics::record_revaluation("created");
        info!(revaluation_id = %revaluation.id(), "Revaluation created");
        Ok(revaluation)
    }

    /// 审批重估
    ///
    /// 状态转换与成本同步标记 PENDING 在同一次条件更新中提交，之后同步执行后续写入
    /// （产品成本、过账意图）。只有后续写入全部成功才标记 SYNCED；否则记录保持
    /// APPROVED 且可重试，并返回 DependencyFailure
    pub async fn approve_revaluation(
        &self,
        ctx: &RequestContext,
        cmd: ApproveRevaluationCommand,
    ) -> AppResult<CostRevaluation> {
        let tenant = self.authorize(ctx, APPROVE_COST_REVALUATIONS).await?;
        info!(
            "Approving revaluation: {} for tenant: {}",
            cmd.revaluation_id, tenant.id
        );

        let decision = ReviewDecision::Approve {
            approver: ctx.caller.user_id.clone(),
            at: Utc::now(),
        };
        let approved = self.review(&tenant, &cmd.revaluation_id, &decision).await?;

        self.record_audit(
            AuditLogEntry::new(
                tenant.id.clone(),
                ctx.caller.user_id.clone(),
                "APPROVE",
                RESOURCE_TYPE,
                approved.id().to_string(),
            )
            .with_reason(approved.reason())
            .with_changes(
                serde_json::to_value(approved.previous()).ok(),
                serde_json::to_value(approved.proposed()).ok(),
            ),
        )
        .await;

        if let (Some(approved_by), Some(approved_at)) = (approved.approved_by(), approved.approved_at()) {
            self.publish(
                &tenant,
                CostingEvent::RevaluationApproved(RevaluationApproved {
                    revaluation_id: approved.id().clone(),
                    product_id: approved.product_id().clone(),
                    approved: *approved.proposed(),
                    approved_by: approved_by.clone(),
                    approved_at,
                }),
            )
            .await;
        }

        metrics::record_revaluation("approved");
        self.sync_product_cost(&tenant, approved).await
    }

    /// 拒绝重估，原因必填
    pub async fn reject_revaluation(
        &self,
        ctx: &RequestContext,
        cmd: RejectRevaluationCommand,
    ) -> AppResult<CostRevaluation> {
        let tenant = self.authorize(ctx, APPROVE_COST_REVALUATIONS).await?;
        info!(
            "Rejecting revaluation: {} for tenant: {}",
            cmd.revaluation_id, tenant.id
        );

        cmd.validate()?;

        let decision = ReviewDecision::Reject {
            reviewer: ctx.caller.user_id.clone(),
            at: Utc::now(),
            reason: cmd.reason.trim().to_string(),
        };
        let rejected = self.review(&tenant, &cmd.revaluation_id, &decision).await?;

        self.record_audit(
            AuditLogEntry::new(
                tenant.id.clone(),
                ctx.caller.user_id.clone(),
                "REJECT",
                RESOURCE_TYPE,
                rejected.id().to_string(),
            )
            .with_reason(rejected.rejection_reason().unwrap_or_default()),
        )
        .await;

        self.publish(
            &tenant,
            CostingEvent::RevaluationRejected(RevaluationRejected {
                revaluation_id: rejected.id().clone(),
                product_id: rejected.product_id().clone(),
                rejected_by: ctx.caller.user_id.clone(),
                reason: rejected.rejection_reason().unwrap_or_default().to_string(),
            }),
        )
        .await;

        metrics::record_revaluation("rejected");
        Ok(rejected)
    }

    /// 重新执行审批后的产品成本同步，仅对 APPROVED 且同步未完成（PENDING / FAILED）的记录有效
    pub async fn retry_cost_sync(
        &self,
        ctx: &RequestContext,
        cmd: RetryCostSyncCommand,
    ) -> AppResult<CostRevaluation> {
        let tenant = self.authorize(ctx, APPROVE_COST_REVALUATIONS).await?;
        info!(
            "Retrying cost sync for revaluation: {} for tenant: {}",
            cmd.revaluation_id, tenant.id
        );

        let revaluation = self.load(&tenant, &cmd.revaluation_id).await?;
        if !revaluation.needs_cost_sync_retry() {
            return Err(AppError::invalid_state(format!(
                "Revaluation {} is {} with cost sync {}; nothing to retry",
                cmd.revaluation_id,
                revaluation.status(),
                revaluation.cost_sync()
            )));
        }

        self.sync_product_cost(&tenant, revaluation).await
    }

    pub async fn get_revaluation(
        &self,
        ctx: &RequestContext,
        query: GetRevaluationQuery,
    ) -> AppResult<CostRevaluation> {
        let tenant = self.authorize(ctx, VIEW_COST_VARIANCES).await?;
        self.load(&tenant, &query.revaluation_id).await
    }

    pub async fn list_revaluations(
        &self,
        ctx: &RequestContext,
        query: ListRevaluationsQuery,
    ) -> AppResult<PagedResult<CostRevaluation>> {
        let tenant = self.authorize(ctx, VIEW_COST_VARIANCES).await?;
        self.revaluations
            .list(&tenant.id, query.status, &query.pagination)
            .await
    }

    // ========== 内部 ==========

    async fn load(&self, tenant: &TenantProfile, id: &RevaluationId) -> AppResult<CostRevaluation> {
        self.revaluations
            .find_by_id(id, &tenant.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Revaluation {} not found", id)))
    }

    /// 原子条件转换；失败时区分不存在与状态不符
    ///
    /// 审批时间在条件更新之前校验，各存储实现的条件更新只比较状态
    async fn review(
        &self,
        tenant: &TenantProfile,
        id: &RevaluationId,
        decision: &ReviewDecision,
    ) -> AppResult<CostRevaluation> {
        self.load(tenant, id).await?.check_review_time(decision)?;

        if let Some(updated) = self.revaluations.transition(id, &tenant.id, decision).await? {
            info!(
                revaluation_id = %id,
                status = %updated.status(),
                "Revaluation reviewed"
            );
            return Ok(updated);
        }

        let current = self.load(tenant, id).await?;
        warn!(
            revaluation_id = %id,
            status = %current.status(),
            target = %decision.target_status(),
            "Revaluation transition refused"
        );
        Err(AppError::invalid_state(format!(
            "Revaluation {} is {} and can no longer be reviewed",
            id,
            current.status()
        )))
    }

    /// 审批后的后续写入：产品标准成本与过账意图，完成后标记 SYNCED
    ///
    /// 任一步失败（包括 SYNCED 标记本身）时尽力标记 FAILED；标记失败时记录停留在
    /// PENDING，两种状态都允许 retry-sync
    async fn sync_product_cost(
        &self,
        tenant: &TenantProfile,
        mut revaluation: CostRevaluation,
    ) -> AppResult<CostRevaluation> {
        let id = revaluation.id().clone();

        let outcome = async {
            self.apply_follow_up(tenant, &revaluation).await?;
            self.revaluations
                .set_cost_sync(&id, &tenant.id, CostSyncStatus::Synced)
                .await
        }
        .await;

        match outcome {
            Ok(()) => {
                revaluation.set_cost_sync(CostSyncStatus::Synced)?;
                metrics::record_revaluation("synced");
                info!(revaluation_id = %id, "Product standard cost synced");
                Ok(revaluation)
            }
            Err(e) => {
                error!(
                    revaluation_id = %id,
                    error = %e,
                    "Product cost follow-up failed after approval"
                );
                if let Err(mark_err) = self
                    .revaluations
                    .set_cost_sync(&id, &tenant.id, CostSyncStatus::Failed)
                    .await
                {
                    error!(revaluation_id = %id, error = %mark_err, "Failed to mark cost sync failure");
                }
                metrics::record_revaluation("sync_failed");
                Err(AppError::dependency_failure(format!(
                    "Revaluation {} is approved but the product cost update did not complete; retry the cost sync",
                    id
                )))
            }
        }
    }

    async fn apply_follow_up(
        &self,
        tenant: &TenantProfile,
        revaluation: &CostRevaluation,
    ) -> AppResult<()> {
        self.products
            .apply_cost_update(revaluation.product_id(), &tenant.id, revaluation.proposed())
            .await?;

        let localization = self.localization(tenant);
        let gl_account = localization
            .get_variance_gl_account_mapping()
            .get(REVALUATION)
            .ok_or_else(|| {
                AppError::internal(format!(
                    "No GL account for {} in jurisdiction {}",
                    REVALUATION,
                    localization.jurisdiction()
                ))
            })?;

        let intent = CostingEvent::RevaluationPostingIntent(RevaluationPostingIntent::new(
            revaluation.id().clone(),
            revaluation.product_id().clone(),
            &revaluation.delta()?,
            REVALUATION,
            gl_account,
            tenant.base_currency.clone(),
        )?);
        let envelope = intent.to_envelope(&tenant.id)?;
        self.events.publish(intent.topic(), envelope).await
    }
}
