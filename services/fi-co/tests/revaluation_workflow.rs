//! 成本重估工作流测试

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use cuba_common::{PagedResult, Pagination, TenantId};
use cuba_domain_core::Entity;
use cuba_errors::{AppError, AppResult};
use fi_co::application::commands::*;
use fi_co::application::queries::*;
use fi_co::domain::entities::{CostRevaluation, ProductCost, ReviewDecision};
use fi_co::domain::enums::{CostSyncStatus, RevaluationStatus};
use fi_co::domain::events::POSTING_INTENTS_TOPIC;
use fi_co::domain::mass_update::MassUpdateFilter;
use fi_co::domain::repositories::{ProductCostStore, RevaluationRepository};
use fi_co::domain::value_objects::{CostComponents, ProductId, RevaluationId};
use fi_co::infrastructure::persistence::{InMemoryProductCostStore, InMemoryRevaluationRepository};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::*;

fn create_cmd(product_id: &ProductId, proposed: CostComponents) -> CreateRevaluationCommand {
    CreateRevaluationCommand {
        product_id: product_id.clone(),
        proposed,
        reason: "Supplier price increase".to_string(),
    }
}

/// 成本写入可按开关失败的存储
struct FlakyCostStore {
    inner: Arc<InMemoryProductCostStore>,
    fail_writes: AtomicBool,
}

#[async_trait]
impl ProductCostStore for FlakyCostStore {
    async fn read_product(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<ProductCost>> {
        self.inner.read_product(product_id, tenant_id).await
    }

    async fn find_matching(
        &self,
        tenant_id: &TenantId,
        filter: &MassUpdateFilter,
        limit: usize,
    ) -> AppResult<Vec<ProductCost>> {
        self.inner.find_matching(tenant_id, filter, limit).await
    }

    async fn apply_cost_update(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        components: &CostComponents,
    ) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset by peer"));
        }
        self.inner
            .apply_cost_update(product_id, tenant_id, components)
            .await
    }

    async fn update_standard_cost(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        components: &CostComponents,
        expected_version: i64,
    ) -> AppResult<bool> {
        self.inner
            .update_standard_cost(product_id, tenant_id, components, expected_version)
            .await
    }
}

/// 成本同步标记写入可按开关失败的仓储
struct FlakyRevaluationRepository {
    inner: Arc<InMemoryRevaluationRepository>,
    fail_sync_marks: AtomicBool,
}

#[async_trait]
impl RevaluationRepository for FlakyRevaluationRepository {
    async fn insert(&self, revaluation: &CostRevaluation) -> AppResult<()> {
        self.inner.insert(revaluation).await
    }

    async fn find_by_id(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<CostRevaluation>> {
        self.inner.find_by_id(id, tenant_id).await
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        status: Option<RevaluationStatus>,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<CostRevaluation>> {
        self.inner.list(tenant_id, status, pagination).await
    }

    async fn transition(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
        decision: &ReviewDecision,
    ) -> AppResult<Option<CostRevaluation>> {
        self.inner.transition(id, tenant_id, decision).await
    }

    async fn set_cost_sync(
        &self,
        id: &RevaluationId,
        tenant_id: &TenantId,
        status: CostSyncStatus,
    ) -> AppResult<()> {
        if self.fail_sync_marks.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset by peer"));
        }
        self.inner.set_cost_sync(id, tenant_id, status).await
    }
}

/// 产品成本写入与同步标记写入都可注入失败的夹具
fn flaky_fixture(
    fail_cost_writes: bool,
) -> (Fixture, Arc<FlakyRevaluationRepository>, Arc<FlakyCostStore>) {
    let repo_slot = Arc::new(std::sync::OnceLock::<Arc<FlakyRevaluationRepository>>::new());
    let store_slot = Arc::new(std::sync::OnceLock::<Arc<FlakyCostStore>>::new());
    let (repo_in, store_in) = (repo_slot.clone(), store_slot.clone());

    let fx = Fixture::with_repositories(
        move |inner| {
            let repo = Arc::new(FlakyRevaluationRepository {
                inner,
                fail_sync_marks: AtomicBool::new(true),
            });
            let _ = repo_in.set(repo.clone());
            repo as Arc<dyn RevaluationRepository>
        },
        move |inner| {
            let store = Arc::new(FlakyCostStore {
                inner,
                fail_writes: AtomicBool::new(fail_cost_writes),
            });
            let _ = store_in.set(store.clone());
            store as Arc<dyn ProductCostStore>
        },
    );
    let repo = repo_slot.get().unwrap().clone();
    let store = store_slot.get().unwrap().clone();
    (fx, repo, store)
}

#[tokio::test]
async fn test_create_snapshots_current_cost() {
    let fx = Fixture::new();
    let product = fx.seed_product(costs(dec!(10.00), dec!(4.00), dec!(2.00)));

    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            create_cmd(&product, costs(dec!(12.00), dec!(4.00), dec!(2.50))),
        )
        .await
        .unwrap();

    assert_eq!(rev.status(), RevaluationStatus::Pending);
    assert_eq!(rev.cost_sync(), CostSyncStatus::NotRequired);
    assert_eq!(rev.previous(), &costs(dec!(10.00), dec!(4.00), dec!(2.00)));
    assert_eq!(rev.delta().unwrap(), costs(dec!(2.00), dec!(0.00), dec!(0.50)));

    // 创建不改动产品成本
    assert_eq!(fx.standard_cost(&product).material, dec!(10.00));

    let audit = fx.audit.entries();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, "CREATE");
    assert_eq!(audit[0].reason.as_deref(), Some("Supplier price increase"));
    assert_eq!(
        fx.events
            .events_of_type("costing.revaluation.created")
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let fx = Fixture::new();
    let product = fx.seed_product(costs(dec!(10), dec!(0), dec!(0)));
    let ctx = fx.ctx(&[ACCOUNTANT]);

    let mut blank = create_cmd(&product, costs(dec!(11), dec!(0), dec!(0)));
    blank.reason = "   ".to_string();
    let err = fx.handler.create_revaluation(&ctx, blank).await.unwrap_err();
    assert_eq!(err.kind(), "VALIDATION_ERROR");

    let mut long = create_cmd(&product, costs(dec!(11), dec!(0), dec!(0)));
    long.reason = "x".repeat(501);
    let err = fx.handler.create_revaluation(&ctx, long).await.unwrap_err();
    assert_eq!(err.kind(), "VALIDATION_ERROR");

    let negative = create_cmd(&product, costs(dec!(-1), dec!(0), dec!(0)));
    let err = fx.handler.create_revaluation(&ctx, negative).await.unwrap_err();
    assert_eq!(err.kind(), "VALIDATION_ERROR");

    let unknown = create_cmd(&ProductId::new(), costs(dec!(1), dec!(0), dec!(0)));
    let err = fx.handler.create_revaluation(&ctx, unknown).await.unwrap_err();
    assert_eq!(err.kind(), "NOT_FOUND");

    assert!(fx.audit.entries().is_empty());
}

#[tokio::test]
async fn test_oversized_proposal_is_rejected_before_approval() {
    let fx = Fixture::new();
    let product = fx.seed_product(CostComponents::zero());
    let ctx = fx.ctx(&[ADMIN]);

    let half = Decimal::MAX / dec!(2);
    let err = fx
        .handler
        .create_revaluation(&ctx, create_cmd(&product, costs(half, half, half)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "VALIDATION_ERROR");

    let at_limit = costs(dec!(0), CostComponents::LIMIT, dec!(0));
    let err = fx
        .handler
        .create_revaluation(&ctx, create_cmd(&product, at_limit))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "VALIDATION_ERROR");
    assert!(fx.audit.entries().is_empty());

    let largest = dec!(9999999999999.99);
    let rev = fx
        .handler
        .create_revaluation(&ctx, create_cmd(&product, costs(largest, largest, largest)))
        .await
        .unwrap();
    let approved = fx
        .handler
        .approve_revaluation(
            &ctx,
            ApproveRevaluationCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(approved.cost_sync(), CostSyncStatus::Synced);
    assert_eq!(fx.standard_cost(&product).overhead, largest);
}

#[tokio::test]
async fn test_approve_updates_product_cost_and_emits_posting_intent() {
    let fx = Fixture::new();
    let product = fx.seed_product(costs(dec!(10.00), dec!(4.00), dec!(2.00)));
    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            create_cmd(&product, costs(dec!(12.00), dec!(4.00), dec!(1.50))),
        )
        .await
        .unwrap();

    let approved = fx
        .handler
        .approve_revaluation(
            &fx.ctx(&[CONTROLLER]),
            ApproveRevaluationCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap();

    assert_eq!(approved.status(), RevaluationStatus::Approved);
    assert_eq!(approved.cost_sync(), CostSyncStatus::Synced);
    assert!(approved.approved_by().is_some());
    assert!(approved.approved_at().is_some_and(|at| at >= approved.created_at()));

    assert_eq!(fx.standard_cost(&product), costs(dec!(12.00), dec!(4.00), dec!(1.50)));
    assert_eq!(fx.products.get(&fx.tenant.id, &product).unwrap().version, 2);

    let published = fx.events.get_events().await;
    let intent = published
        .iter()
        .find(|e| e.topic == POSTING_INTENTS_TOPIC)
        .expect("posting intent published");
    assert_eq!(intent.envelope.payload["gl_account"], "1410");
    assert_eq!(intent.envelope.payload["total"]["currency"], "USD");
    assert_eq!(
        intent.envelope.payload["total"]["amount"]
            .as_str()
            .and_then(|v| v.parse::<Decimal>().ok()),
        Some(dec!(1.50))
    );
    assert_eq!(
        intent.envelope.payload["revaluation_id"],
        serde_json::json!(rev.id())
    );
    // 人工为零的分量不生成过账行
    assert_eq!(intent.envelope.payload["lines"].as_array().unwrap().len(), 2);

    let actions: Vec<String> = fx.audit.entries().into_iter().map(|e| e.action).collect();
    assert_eq!(actions, vec!["CREATE", "APPROVE"]);
}

#[tokio::test]
async fn test_reject_requires_reason_and_is_terminal() {
    let fx = Fixture::new();
    let product = fx.seed_product(costs(dec!(10), dec!(1), dec!(1)));
    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            create_cmd(&product, costs(dec!(9), dec!(1), dec!(1))),
        )
        .await
        .unwrap();
    let ctx = fx.ctx(&[CONTROLLER]);

    let err = fx
        .handler
        .reject_revaluation(
            &ctx,
            RejectRevaluationCommand {
                revaluation_id: rev.id().clone(),
                reason: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "VALIDATION_ERROR");

    let rejected = fx
        .handler
        .reject_revaluation(
            &ctx,
            RejectRevaluationCommand {
                revaluation_id: rev.id().clone(),
                reason: "  Quote not yet confirmed  ".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(rejected.status(), RevaluationStatus::Rejected);
    assert_eq!(rejected.rejection_reason(), Some("Quote not yet confirmed"));

    let err = fx
        .handler
        .approve_revaluation(
            &ctx,
            ApproveRevaluationCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "INVALID_STATE");

    // 被拒绝的重估不影响产品成本
    assert_eq!(fx.standard_cost(&product).material, dec!(10));
}

#[tokio::test]
async fn test_second_approval_is_refused() {
    let fx = Fixture::new();
    let product = fx.seed_product(costs(dec!(5), dec!(5), dec!(5)));
    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ADMIN]),
            create_cmd(&product, costs(dec!(6), dec!(5), dec!(5))),
        )
        .await
        .unwrap();
    let cmd = ApproveRevaluationCommand {
        revaluation_id: rev.id().clone(),
    };

    fx.handler
        .approve_revaluation(&fx.ctx(&[ADMIN]), cmd.clone())
        .await
        .unwrap();
    let err = fx
        .handler
        .approve_revaluation(&fx.ctx(&[ADMIN]), cmd)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "INVALID_STATE");
    assert_eq!(fx.products.get(&fx.tenant.id, &product).unwrap().version, 2);
}

#[tokio::test]
async fn test_unknown_revaluation_is_not_found() {
    let fx = Fixture::new();
    let err = fx
        .handler
        .approve_revaluation(
            &fx.ctx(&[CONTROLLER]),
            ApproveRevaluationCommand {
                revaluation_id: RevaluationId::new(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "NOT_FOUND");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reviews_have_single_winner() {
    let fx = Fixture::new();
    let product = fx.seed_product(costs(dec!(20), dec!(2), dec!(2)));
    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            create_cmd(&product, costs(dec!(25), dec!(2), dec!(2))),
        )
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for i in 0..16 {
        let handler = fx.handler.clone();
        let ctx = fx.ctx(&[CONTROLLER]);
        let id = rev.id().clone();
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                handler
                    .approve_revaluation(&ctx, ApproveRevaluationCommand { revaluation_id: id })
                    .await
            } else {
                handler
                    .reject_revaluation(
                        &ctx,
                        RejectRevaluationCommand {
                            revaluation_id: id,
                            reason: "Superseded".to_string(),
                        },
                    )
                    .await
            }
        }));
    }

    let mut winners = Vec::new();
    for outcome in futures::future::join_all(tasks).await {
        match outcome.unwrap() {
            Ok(r) => winners.push(r.status()),
            Err(e) => assert_eq!(e.kind(), "INVALID_STATE"),
        }
    }
    assert_eq!(winners.len(), 1);

    let stored = fx
        .handler
        .get_revaluation(
            &fx.ctx(&[VIEWER]),
            GetRevaluationQuery {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(stored.status(), winners[0]);

    let expected_material = if winners[0] == RevaluationStatus::Approved {
        dec!(25)
    } else {
        dec!(20)
    };
    assert_eq!(fx.standard_cost(&product).material, expected_material);
}

#[tokio::test]
async fn test_failed_follow_up_keeps_approval_and_can_be_retried() {
    let flaky = Arc::new(std::sync::OnceLock::<Arc<FlakyCostStore>>::new());
    let slot = flaky.clone();
    let fx = Fixture::with_store(move |inner| {
        let store = Arc::new(FlakyCostStore {
            inner,
            fail_writes: AtomicBool::new(true),
        });
        let _ = slot.set(store.clone());
        store as Arc<dyn ProductCostStore>
    });
    let store = flaky.get().unwrap().clone();

    let product = fx.seed_product(costs(dec!(10), dec!(2), dec!(1)));
    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            create_cmd(&product, costs(dec!(11), dec!(2), dec!(1))),
        )
        .await
        .unwrap();
    let ctx = fx.ctx(&[CONTROLLER]);

    let err = fx
        .handler
        .approve_revaluation(
            &ctx,
            ApproveRevaluationCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "DEPENDENCY_FAILURE");

    let stored = fx
        .handler
        .get_revaluation(
            &ctx,
            GetRevaluationQuery {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(stored.status(), RevaluationStatus::Approved);
    assert_eq!(stored.cost_sync(), CostSyncStatus::Failed);
    assert_eq!(fx.standard_cost(&product).material, dec!(10));
    assert!(fx
        .events
        .events_of_type("costing.revaluation.posting_intent")
        .await
        .is_empty());

    store.fail_writes.store(false, Ordering::SeqCst);
    let retry = RetryCostSyncCommand {
        revaluation_id: rev.id().clone(),
    };
    let synced = fx
        .handler
        .retry_cost_sync(&ctx, retry.clone())
        .await
        .unwrap();
    assert_eq!(synced.cost_sync(), CostSyncStatus::Synced);
    assert_eq!(fx.standard_cost(&product).material, dec!(11));
    assert_eq!(
        fx.events
            .events_of_type("costing.revaluation.posting_intent")
            .await
            .len(),
        1
    );

    let err = fx.handler.retry_cost_sync(&ctx, retry).await.unwrap_err();
    assert_eq!(err.kind(), "INVALID_STATE");
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let fx = Fixture::new();
    let ctx = fx.ctx(&[ADMIN]);
    let mut ids = Vec::new();
    for _ in 0..3 {
        let product = fx.seed_product(costs(dec!(1), dec!(1), dec!(1)));
        let rev = fx
            .handler
            .create_revaluation(&ctx, create_cmd(&product, costs(dec!(2), dec!(1), dec!(1))))
            .await
            .unwrap();
        ids.push(rev.id().clone());
    }
    fx.handler
        .approve_revaluation(
            &ctx,
            ApproveRevaluationCommand {
                revaluation_id: ids[0].clone(),
            },
        )
        .await
        .unwrap();

    let pending = fx
        .handler
        .list_revaluations(
            &ctx,
            ListRevaluationsQuery {
                status: Some(RevaluationStatus::Pending),
                pagination: Pagination::default(),
            },
        )
        .await
        .unwrap();
    assert_eq!(pending.total, 2);
    assert!(pending.items.iter().all(|r| r.status() == RevaluationStatus::Pending));

    let first_page = fx
        .handler
        .list_revaluations(
            &ctx,
            ListRevaluationsQuery {
                status: None,
                pagination: Pagination::new(1, 2),
            },
        )
        .await
        .unwrap();
    assert_eq!(first_page.total, 3);
    assert_eq!(first_page.items.len(), 2);
    assert_eq!(first_page.total_pages(), 2);
}

#[tokio::test]
async fn test_capabilities_are_enforced() {
    let fx = Fixture::new();
    let product = fx.seed_product(costs(dec!(3), dec!(3), dec!(3)));

    let err = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[VIEWER]),
            create_cmd(&product, costs(dec!(4), dec!(3), dec!(3))),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "FORBIDDEN");

    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            create_cmd(&product, costs(dec!(4), dec!(3), dec!(3))),
        )
        .await
        .unwrap();

    // 维护成本的角色不能自行审批
    let err = fx
        .handler
        .approve_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            ApproveRevaluationCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "FORBIDDEN");

    let err = fx
        .handler
        .list_revaluations(&fx.ctx(&[]), ListRevaluationsQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "FORBIDDEN");
}

#[tokio::test]
async fn test_unrecorded_follow_up_failure_stays_retryable() {
    let (fx, repo, store) = flaky_fixture(true);
    let product = fx.seed_product(costs(dec!(10), dec!(2), dec!(1)));
    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            create_cmd(&product, costs(dec!(11), dec!(2), dec!(1))),
        )
        .await
        .unwrap();
    let ctx = fx.ctx(&[CONTROLLER]);

    // 成本写入失败，FAILED 标记也写不进去
    let err = fx
        .handler
        .approve_revaluation(
            &ctx,
            ApproveRevaluationCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "DEPENDENCY_FAILURE");

    let stored = fx.revaluations.find_by_id(rev.id(), &fx.tenant.id).await.unwrap().unwrap();
    assert_eq!(stored.status(), RevaluationStatus::Approved);
    assert_eq!(stored.cost_sync(), CostSyncStatus::Pending);
    assert!(stored.needs_cost_sync_retry());
    assert_eq!(fx.standard_cost(&product).material, dec!(10));

    store.fail_writes.store(false, Ordering::SeqCst);
    repo.fail_sync_marks.store(false, Ordering::SeqCst);
    let synced = fx
        .handler
        .retry_cost_sync(
            &ctx,
            RetryCostSyncCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(synced.cost_sync(), CostSyncStatus::Synced);
    assert_eq!(fx.standard_cost(&product).material, dec!(11));
}

#[tokio::test]
async fn test_lost_synced_marker_is_retried_idempotently() {
    let (fx, repo, _store) = flaky_fixture(false);
    let product = fx.seed_product(costs(dec!(10), dec!(2), dec!(1)));
    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ACCOUNTANT]),
            create_cmd(&product, costs(dec!(11), dec!(2), dec!(1))),
        )
        .await
        .unwrap();
    let ctx = fx.ctx(&[CONTROLLER]);

    // 成本已写入，SYNCED 标记丢失
    let err = fx
        .handler
        .approve_revaluation(
            &ctx,
            ApproveRevaluationCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "DEPENDENCY_FAILURE");
    assert_eq!(fx.standard_cost(&product).material, dec!(11));

    let stored = fx.revaluations.find_by_id(rev.id(), &fx.tenant.id).await.unwrap().unwrap();
    assert_eq!(stored.cost_sync(), CostSyncStatus::Pending);

    repo.fail_sync_marks.store(false, Ordering::SeqCst);
    let synced = fx
        .handler
        .retry_cost_sync(
            &ctx,
            RetryCostSyncCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(synced.cost_sync(), CostSyncStatus::Synced);
    assert_eq!(fx.standard_cost(&product).material, dec!(11));

    let intents = fx
        .events
        .events_of_type("costing.revaluation.posting_intent")
        .await;
    assert_eq!(intents.len(), 2);
    assert!(intents
        .iter()
        .all(|e| e.payload["revaluation_id"] == intents[0].payload["revaluation_id"]));
}
