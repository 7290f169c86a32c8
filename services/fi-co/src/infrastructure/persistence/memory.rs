//! 内存仓储实现
//!
//! 用于测试和本地运行，与 PostgreSQL 实现保持相同的租户隔离与条件更新语义

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use cuba_common::{PagedResult, Pagination, TenantId};
use cuba_domain_core::{AggregateRoot, Entity};
use cuba_errors::{AppError, AppResult};
use cuba_ports::{AuditLogEntry, AuditLogFilter, AuditLogRepository};

use crate::domain::entities::{CostRevaluation, ProductCost, ReviewDecision, TenantProfile};
use crate::domain::enums::{CostSyncStatus, RevaluationStatus};
use crate::domain::mass_update::MassUpdateFilter;
use crate::domain::repositories::{ProductCostStore, RevaluationRepository, TenantDirectory};
use crate::domain::value_objects::{CostComponents, ProductId, RevaluationId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn paginate<T: Clone>(items: &[T], pagination: &Pagination) -> PagedResult<T> {
    let page = items
        .iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .cloned()
        .collect();
    PagedResult::new(page, items.len() as u64, pagination)
}

// ============================================================================
// RevaluationRepository
// ============================================================================

#[derive(Default)]
pub struct InMemoryRevaluationRepository {
    records: Mutex<HashMap<RevaluationId, CostRevaluation>>,
}

impl InMemoryRevaluationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevaluationRepository for InMemoryRevaluationRepository {
    async fn insert(&self, revaluation: &CostRevaluation) -> AppResult<()> {
        let mut records = lock(&self.records);
        if records.contains_key(revaluation.id()) {
            return Err(AppError::conflict(format!(
                "Revaluation {} already exists",
                revaluation.id()
            )));
        }
        records.insert(revaluation.id().clone(), revaluation.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<CostRevaluation>> {
        Ok(lock(&self.records)
            .get(id)
            .filter(|r| r.tenant_id() == tenant_id)
            .cloned())
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        status: Option<RevaluationStatus>,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<CostRevaluation>> {
        let mut items: Vec<CostRevaluation> = lock(&self.records)
            .values()
            .filter(|r| r.tenant_id() == tenant_id)
            .filter(|r| status.is_none_or(|s| r.status() == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().0.cmp(&a.id().0))
        });
        Ok(paginate(&items, pagination))
    }

    async fn transition(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
        decision: &ReviewDecision,
    ) -> AppResult<Option<CostRevaluation>> {
        // 检查与写入在同一把锁内完成
        let mut records = lock(&self.records);
        let Some(record) = records.get_mut(id).filter(|r| r.tenant_id() == tenant_id) else {
            return Ok(None);
        };
        if record.status() != RevaluationStatus::Pending {
            return Ok(None);
        }

        let mut updated = record.clone();
        updated.apply_decision(decision)?;
        *record = updated.clone();
        Ok(Some(updated))
    }

    async fn set_cost_sync(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
        status: CostSyncStatus,
    ) -> AppResult<()> {
        let mut records = lock(&self.records);
        let record = records
            .get_mut(id)
            .filter(|r| r.tenant_id() == tenant_id)
            .ok_or_else(|| AppError::not_found(format!("Revaluation {} not found", id)))?;
        record.set_cost_sync(status)
    }
}

// ============================================================================
// ProductCostStore
// ============================================================================

#[derive(Default)]
pub struct InMemoryProductCostStore {
    records: Mutex<HashMap<(TenantId, ProductId), ProductCost>>,
}

impl InMemoryProductCostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入或替换一条成本记录
    pub fn upsert(&self, cost: ProductCost) {
        lock(&self.records).insert((cost.tenant_id.clone(), cost.product_id.clone()), cost);
    }

    pub fn get(&self, tenant_id: &TenantId, product_id: &ProductId) -> Option<ProductCost> {
        lock(&self.records)
            .get(&(tenant_id.clone(), product_id.clone()))
            .cloned()
    }

    /// 模拟外部并发写入：仅递增版本
    pub fn bump_version(&self, tenant_id: &TenantId, product_id: &ProductId) {
        if let Some(cost) = lock(&self.records).get_mut(&(tenant_id.clone(), product_id.clone())) {
            cost.version += 1;
        }
    }
}

fn write_cost(cost: &mut ProductCost, components: &CostComponents) {
    cost.standard_cost = *components;
    cost.version += 1;
    cost.updated_at = Utc::now();
}

#[async_trait]
impl ProductCostStore for InMemoryProductCostStore {
    async fn read_product(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<ProductCost>> {
        Ok(self.get(tenant_id, product_id))
    }

    async fn find_matching(
        &self,
        tenant_id: &TenantId,
        filter: &MassUpdateFilter,
        limit: usize,
    ) -> AppResult<Vec<ProductCost>> {
        let mut matched: Vec<ProductCost> = lock(&self.records)
            .values()
            .filter(|c| &c.tenant_id == tenant_id && filter.matches(c))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        matched.truncate(limit);
        Ok(matched)
    }

    async fn apply_cost_update(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        components: &CostComponents,
    ) -> AppResult<()> {
        let mut records = lock(&self.records);
        let cost = records
            .get_mut(&(tenant_id.clone(), product_id.clone()))
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", product_id)))?;
        write_cost(cost, components);
        Ok(())
    }

    async fn update_standard_cost(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        components: &CostComponents,
        expected_version: i64,
    ) -> AppResult<bool> {
        let mut records = lock(&self.records);
        match records.get_mut(&(tenant_id.clone(), product_id.clone())) {
            Some(cost) if cost.version == expected_version => {
                write_cost(cost, components);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ============================================================================
// TenantDirectory
// ============================================================================

#[derive(Default)]
pub struct InMemoryTenantDirectory {
    tenants: Mutex<HashMap<String, TenantProfile>>,
}

impl InMemoryTenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, tenant: TenantProfile) {
        lock(&self.tenants).insert(tenant.slug.clone(), tenant);
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantDirectory {
    async fn resolve(&self, slug: &str) -> AppResult<Option<TenantProfile>> {
        Ok(lock(&self.tenants).get(slug).cloned())
    }
}

// ============================================================================
// AuditLogRepository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAuditLogRepository {
    entries: Mutex<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditLogEntry> {
        lock(&self.entries).clone()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn log(&self, entry: AuditLogEntry) -> AppResult<()> {
        lock(&self.entries).push(entry);
        Ok(())
    }

    async fn log_batch(&self, entries: Vec<AuditLogEntry>) -> AppResult<u64> {
        let count = entries.len() as u64;
        lock(&self.entries).extend(entries);
        Ok(count)
    }

    async fn query(
        &self,
        tenant_id: &TenantId,
        filter: &AuditLogFilter,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<AuditLogEntry>> {
        let mut items: Vec<AuditLogEntry> = lock(&self.entries)
            .iter()
            .filter(|e| &e.tenant_id == tenant_id && filter.matches(e))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(paginate(&items, pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::CostingMethod;
    use cuba_common::UserId;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_revaluation_scoped_by_tenant() {
        let repo = InMemoryRevaluationRepository::new();
        let tenant = TenantId::new();
        let rev = CostRevaluation::new(
            tenant.clone(),
            ProductId::new(),
            CostComponents::new(dec!(1), dec!(1), dec!(1)),
            CostComponents::zero(),
            "Initial standard",
            UserId::new(),
        )
        .unwrap();
        repo.insert(&rev).await.unwrap();

        assert!(repo.find_by_id(rev.id(), &tenant).await.unwrap().is_some());
        assert!(repo.find_by_id(rev.id(), &TenantId::new()).await.unwrap().is_none());

        let decision = ReviewDecision::Approve {
            approver: UserId::new(),
            at: Utc::now(),
        };
        assert!(repo.transition(rev.id(), &TenantId::new(), &decision).await.unwrap().is_none());
        assert!(repo.transition(rev.id(), &tenant, &decision).await.unwrap().is_some());
        assert!(repo.transition(rev.id(), &tenant, &decision).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transition_compares_status_only() {
        let repo = InMemoryRevaluationRepository::new();
        let tenant = TenantId::new();
        let rev = CostRevaluation::new(
            tenant.clone(),
            ProductId::new(),
            CostComponents::new(dec!(2), dec!(0), dec!(0)),
            CostComponents::zero(),
            "Initial standard",
            UserId::new(),
        )
        .unwrap();
        repo.insert(&rev).await.unwrap();

        // 时间校验在调用方完成，条件更新与 SQL 实现一样只看状态
        let early = ReviewDecision::Approve {
            approver: UserId::new(),
            at: rev.created_at() - chrono::Duration::seconds(5),
        };
        let approved = repo.transition(rev.id(), &tenant, &early).await.unwrap().unwrap();
        assert_eq!(approved.status(), RevaluationStatus::Approved);
        assert_eq!(approved.cost_sync(), CostSyncStatus::Pending);
    }

    #[tokio::test]
    async fn test_versioned_write() {
        let store = InMemoryProductCostStore::new();
        let tenant = TenantId::new();
        let product = ProductId::new();
        store.upsert(ProductCost::new(
            tenant.clone(),
            product.clone(),
            CostingMethod::Standard,
            CostComponents::zero(),
        ));

        let next = CostComponents::new(dec!(5), dec!(0), dec!(0));
        assert!(!store.update_standard_cost(&product, &tenant, &next, 7).await.unwrap());
        assert!(store.update_standard_cost(&product, &tenant, &next, 1).await.unwrap());
        assert_eq!(store.get(&tenant, &product).unwrap().version, 2);
    }
}
