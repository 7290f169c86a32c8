#![allow(dead_code)]

//! 集成测试共用夹具

use std::sync::Arc;

use cuba_auth_core::{Caller, RoleCapabilityTable};
use cuba_common::{TenantId, UserId};
use cuba_domain_core::{CountryCode, Currency};
use fi_co::application::{CostingSettings, RequestContext, ServiceHandler};
use fi_co::domain::entities::{ProductCost, TenantProfile};
use fi_co::domain::enums::CostingMethod;
use fi_co::domain::repositories::{ProductCostStore, RevaluationRepository};
use fi_co::domain::value_objects::{CostComponents, ProductId};
use fi_co::infrastructure::events::InMemoryEventBus;
use fi_co::infrastructure::persistence::{
    InMemoryAuditLogRepository, InMemoryProductCostStore, InMemoryRevaluationRepository,
    InMemoryTenantDirectory,
};
use rust_decimal::Decimal;

pub const ADMIN: &str = "costing_admin";
pub const ACCOUNTANT: &str = "cost_accountant";
pub const CONTROLLER: &str = "controller";
pub const VIEWER: &str = "viewer";

pub fn costs(material: Decimal, labor: Decimal, overhead: Decimal) -> CostComponents {
    CostComponents::new(material, labor, overhead)
}

pub fn tenant_profile(slug: &str, country: &str, currency: &str) -> TenantProfile {
    TenantProfile {
        id: TenantId::new(),
        slug: slug.to_string(),
        home_country: CountryCode::new(country).unwrap(),
        base_currency: Currency::new(currency).unwrap(),
    }
}

pub fn caller(tenant: &TenantProfile, roles: &[&str]) -> Caller {
    Caller {
        user_id: UserId::new(),
        tenant_id: tenant.id.clone(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        permissions: Vec::new(),
    }
}

pub struct Fixture {
    pub handler: Arc<ServiceHandler>,
    pub revaluations: Arc<InMemoryRevaluationRepository>,
    pub products: Arc<InMemoryProductCostStore>,
    pub tenants: Arc<InMemoryTenantDirectory>,
    pub audit: Arc<InMemoryAuditLogRepository>,
    pub events: InMemoryEventBus,
    /// 默认租户：acme-us（US / USD）
    pub tenant: TenantProfile,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(|repo| repo, |store| store, CostingSettings::default())
    }

    pub fn with_settings(settings: CostingSettings) -> Self {
        Self::build(|repo| repo, |store| store, settings)
    }

    /// 用包装过的产品成本存储构建，用于注入失败或并发写入
    pub fn with_store<F>(wrap: F) -> Self
    where
        F: FnOnce(Arc<InMemoryProductCostStore>) -> Arc<dyn ProductCostStore>,
    {
        Self::build(|repo| repo, wrap, CostingSettings::default())
    }

    /// 同时包装重估仓储与产品成本存储
    pub fn with_repositories<R, F>(wrap_revaluations: R, wrap_store: F) -> Self
    where
        R: FnOnce(Arc<InMemoryRevaluationRepository>) -> Arc<dyn RevaluationRepository>,
        F: FnOnce(Arc<InMemoryProductCostStore>) -> Arc<dyn ProductCostStore>,
    {
        Self::build(wrap_revaluations, wrap_store, CostingSettings::default())
    }

    fn build<R, F>(wrap_revaluations: R, wrap_store: F, settings: CostingSettings) -> Self
    where
        R: FnOnce(Arc<InMemoryRevaluationRepository>) -> Arc<dyn RevaluationRepository>,
        F: FnOnce(Arc<InMemoryProductCostStore>) -> Arc<dyn ProductCostStore>,
    {
        let revaluations = Arc::new(InMemoryRevaluationRepository::new());
        let products = Arc::new(InMemoryProductCostStore::new());
        let tenants = Arc::new(InMemoryTenantDirectory::new());
        let audit = Arc::new(InMemoryAuditLogRepository::new());
        let events = InMemoryEventBus::new();

        let tenant = tenant_profile("acme-us", "US", "USD");
        tenants.register(tenant.clone());

        let handler = Arc::new(ServiceHandler::new(
            wrap_revaluations(revaluations.clone()),
            wrap_store(products.clone()),
            tenants.clone(),
            audit.clone(),
            Arc::new(events.clone()),
            Arc::new(RoleCapabilityTable::default()),
            settings,
        ));

        Self {
            handler,
            revaluations,
            products,
            tenants,
            audit,
            events,
            tenant,
        }
    }

    pub fn register_tenant(&self, slug: &str, country: &str, currency: &str) -> TenantProfile {
        let tenant = tenant_profile(slug, country, currency);
        self.tenants.register(tenant.clone());
        tenant
    }

    /// 默认租户下的调用上下文
    pub fn ctx(&self, roles: &[&str]) -> RequestContext {
        self.ctx_for(&self.tenant, roles)
    }

    pub fn ctx_for(&self, tenant: &TenantProfile, roles: &[&str]) -> RequestContext {
        RequestContext::new(caller(tenant, roles), tenant.slug.clone())
    }

    pub fn seed_product(&self, standard_cost: CostComponents) -> ProductId {
        self.seed(ProductCost::new(
            self.tenant.id.clone(),
            ProductId::new(),
            CostingMethod::Standard,
            standard_cost,
        ))
    }

    pub fn seed(&self, cost: ProductCost) -> ProductId {
        let id = cost.product_id.clone();
        self.products.upsert(cost);
        id
    }

    pub fn standard_cost(&self, product_id: &ProductId) -> CostComponents {
        self.products
            .get(&self.tenant.id, product_id)
            .map(|c| c.standard_cost)
            .unwrap()
    }
}
