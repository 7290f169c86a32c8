//! Business logic handler
//!
//! 每个操作先检查能力，再由 slug 解析租户并核对调用方所属租户，之后才进入业务逻辑

mod mass_update;
mod revaluation;
mod variance;

use std::sync::Arc;
use std::time::Duration;

use cuba_auth_core::{Caller, CapabilityGate};
use cuba_config::CostingConfig;
use cuba_errors::{AppError, AppResult};
use cuba_ports::{AuditLogEntry, AuditLogRepository, EventPublisher};
use tracing::warn;

use crate::domain::entities::TenantProfile;
use crate::domain::events::CostingEvent;
use crate::domain::localization::{LocalizationManager, VarianceCatalogCache};
use crate::domain::repositories::{ProductCostStore, RevaluationRepository, TenantDirectory};

/// 成本核算参数
#[derive(Debug, Clone)]
pub struct CostingSettings {
    pub cost_scale: u32,
    pub mass_update_timeout: Duration,
    pub max_mass_update_records: usize,
}

impl CostingSettings {
    pub fn from_config(config: &CostingConfig) -> Self {
        Self {
            cost_scale: config.cost_scale,
            mass_update_timeout: Duration::from_millis(config.mass_update_timeout_ms),
            max_mass_update_records: config.max_mass_update_records,
        }
    }
}

impl Default for CostingSettings {
    fn default() -> Self {
        Self::from_config(&CostingConfig::default())
    }
}

/// 一次请求的调用上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub caller: Caller,
    pub tenant_slug: String,
}

impl RequestContext {
    pub fn new(caller: Caller, tenant_slug: impl Into<String>) -> Self {
        Self {
            caller,
            tenant_slug: tenant_slug.into(),
        }
    }
}

pub struct ServiceHandler {
    revaluations: Arc<dyn RevaluationRepository>,
    products: Arc<dyn ProductCostStore>,
    tenants: Arc<dyn TenantDirectory>,
    audit: Arc<dyn AuditLogRepository>,
    events: Arc<dyn EventPublisher>,
    gate: Arc<dyn CapabilityGate>,
    catalogs: Arc<VarianceCatalogCache>,
    settings: CostingSettings,
}

impl ServiceHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        revaluations: Arc<dyn RevaluationRepository>,
        products: Arc<dyn ProductCostStore>,
        tenants: Arc<dyn TenantDirectory>,
        audit: Arc<dyn AuditLogRepository>,
        events: Arc<dyn EventPublisher>,
        gate: Arc<dyn CapabilityGate>,
        settings: CostingSettings,
    ) -> Self {
        Self {
            revaluations,
            products,
            tenants,
            audit,
            events,
            gate,
            catalogs: Arc::new(VarianceCatalogCache::new()),
            settings,
        }
    }

    pub fn settings(&self) -> &CostingSettings {
        &self.settings
    }

    /// 检查能力并解析租户
    ///
    /// slug 不存在为 NotFound；slug 指向的租户与令牌租户不一致为 Forbidden
    async fn authorize(&self, ctx: &RequestContext, capability: &str) -> AppResult<TenantProfile> {
        ctx.caller.require(self.gate.as_ref(), capability)?;

        let tenant = self
            .tenants
            .resolve(&ctx.tenant_slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {} not found", ctx.tenant_slug)))?;

        if tenant.id != ctx.caller.tenant_id {
            return Err(AppError::forbidden(format!(
                "Caller does not belong to tenant {}",
                ctx.tenant_slug
            )));
        }

        Ok(tenant)
    }

    /// 租户辖区的本地化结果，目录按 (国家, 本位币) 共享
    fn localization(&self, tenant: &TenantProfile) -> LocalizationManager {
        self.catalogs
            .manager(&tenant.home_country, &tenant.base_currency)
    }

    /// 写审计日志，失败只记录告警
    async fn record_audit(&self, entry: AuditLogEntry) {
        let action = entry.action.clone();
        if let Err(e) = self.audit.log(entry).await {
            warn!(error = %e, action = %action, "Failed to write audit log");
        }
    }

    /// 发布领域事件，失败只记录告警
    async fn publish(&self, tenant: &TenantProfile, event: CostingEvent) {
        let event_type = event.event_type();
        let result = match event.to_envelope(&tenant.id) {
            Ok(envelope) => self.events.publish(event.topic(), envelope).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(error = %e, event_type, "Failed to publish costing event");
        }
    }
}
