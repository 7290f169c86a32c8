//! 批量标准成本调整

use std::time::Instant;

use cuba_auth_core::MANAGE_STANDARD_COSTS;
use cuba_errors::{AppError, AppResult};
use cuba_ports::AuditLogEntry;
use tracing::{info, warn};

use crate::application::commands::ApplyMassUpdateCommand;
use crate::domain::events::{CostingEvent, StandardCostsMassUpdated};
use crate::domain::mass_update::MassUpdateResult;
use crate::metrics;

use super::{RequestContext, ServiceHandler};

/// 版本不符时的逐条错误
pub const CONCURRENT_MODIFICATION: &str = "concurrent modification";

impl ServiceHandler {
    /// 对过滤命中的产品统一调整标准成本
    ///
    /// 每条记录独立提交三个分量；单条失败记入结果，不中断整批。
    /// 截止时间到达后不再发出写入，返回已累计的部分结果
    pub async fn apply_mass_update(
        &self,
        ctx: &RequestContext,
        cmd: ApplyMassUpdateCommand,
    ) -> AppResult<MassUpdateResult> {
        let tenant = self.authorize(ctx, MANAGE_STANDARD_COSTS).await?;
        info!(
            "Applying {} mass update for tenant: {}",
            cmd.adjustment.kind, tenant.id
        );

        cmd.validate()?;

        let started = Instant::now();
        let timeout = cmd
            .timeout
            .map(|t| t.min(self.settings.mass_update_timeout))
            .unwrap_or(self.settings.mass_update_timeout);
        let deadline = started + timeout;

        let max = self.settings.max_mass_update_records;
        let records = self
            .products
            .find_matching(&tenant.id, &cmd.filter, max.saturating_add(1))
            .await?;
        if records.len() > max {
            return Err(AppError::validation(format!(
                "Filter matches more than {} products; narrow the filter",
                max
            )));
        }

        let adjustment = &cmd.adjustment;
        let mut result = MassUpdateResult::new();
        let mut audit_entries = Vec::new();

        for record in records {
            if Instant::now() >= deadline {
                warn!(
                    tenant_id = %tenant.id,
                    updated = result.updated_count,
                    "Mass update deadline reached; stopping further writes"
                );
                result.interrupt();
                break;
            }

            let product_id = record.product_id.clone();
            let next = match adjustment.apply(&record.standard_cost, self.settings.cost_scale) {
                Ok(next) => next,
                Err(message) => {
                    warn!(product_id = %product_id, %message, "Mass update record skipped");
                    result.record_failure(product_id, message);
                    continue;
                }
            };

            match self
                .products
                .update_standard_cost(&product_id, &tenant.id, &next, record.version)
                .await
            {
                Ok(true) => {
                    audit_entries.push(
                        AuditLogEntry::new(
                            tenant.id.clone(),
                            ctx.caller.user_id.clone(),
                            "MASS_UPDATE",
                            "ProductCost",
                            product_id.to_string(),
                        )
                        .with_reason(adjustment.reason.trim())
                        .with_changes(
                            serde_json::to_value(record.standard_cost).ok(),
                            serde_json::to_value(next).ok(),
                        ),
                    );
                    result.record_success(product_id);
                }
                Ok(false) => {
                    warn!(product_id = %product_id, "Mass update record changed concurrently");
                    result.record_failure(product_id, CONCURRENT_MODIFICATION);
                }
                Err(e) => {
                    warn!(product_id = %product_id, error = %e, "Mass update record write failed");
                    result.record_failure(product_id, format!("update failed: {}", e.public_detail()));
                }
            }
        }

        if !audit_entries.is_empty() {
            if let Err(e) = self.audit.log_batch(audit_entries).await {
                warn!(error = %e, "Failed to write mass update audit log");
            }
        }

        if result.updated_count > 0 {
            self.publish(
                &tenant,
                CostingEvent::StandardCostsMassUpdated(StandardCostsMassUpdated {
                    adjustment_kind: adjustment.kind,
                    reason: adjustment.reason.trim().to_string(),
                    updated_count: result.updated_count,
                    product_ids: result.updated_products.clone(),
                    updated_by: ctx.caller.user_id.clone(),
                }),
            )
            .await;
        }

        metrics::record_mass_update_records("updated", result.updated_count);
        metrics::record_mass_update_records("failed", result.errors.len() as u64);
        metrics::record_mass_update_duration(started.elapsed().as_secs_f64());

        info!(
            tenant_id = %tenant.id,
            updated = result.updated_count,
            failed = result.errors.len(),
            completed = result.completed,
            "Mass update finished"
        );
        Ok(result)
    }
}
