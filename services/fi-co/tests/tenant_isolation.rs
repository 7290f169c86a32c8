//! 租户隔离测试

mod common;

use cuba_domain_core::Entity;
use fi_co::application::RequestContext;
use fi_co::application::commands::*;
use fi_co::application::queries::*;
use fi_co::domain::entities::ProductCost;
use fi_co::domain::enums::{AdjustmentKind, CostingMethod};
use fi_co::domain::mass_update::{Adjustment, MassUpdateFilter};
use fi_co::domain::value_objects::ProductId;
use rust_decimal_macros::dec;

use common::*;

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let fx = Fixture::new();
    let ctx = RequestContext::new(caller(&fx.tenant, &[ADMIN]), "no-such-tenant");

    let err = fx
        .handler
        .list_revaluations(&ctx, ListRevaluationsQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "NOT_FOUND");
}

#[tokio::test]
async fn test_caller_cannot_address_another_tenant_slug() {
    let fx = Fixture::new();
    let other = fx.register_tenant("globex-de", "DE", "EUR");
    let ctx = RequestContext::new(caller(&fx.tenant, &[ADMIN]), other.slug.clone());

    let err = fx
        .handler
        .get_variance_reason_codes(&ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "FORBIDDEN");
}

#[tokio::test]
async fn test_capability_is_checked_before_tenant() {
    let fx = Fixture::new();
    let ctx = RequestContext::new(caller(&fx.tenant, &[VIEWER]), "no-such-tenant");

    let err = fx
        .handler
        .approve_revaluation(
            &ctx,
            ApproveRevaluationCommand {
                revaluation_id: Default::default(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "FORBIDDEN");
}

#[tokio::test]
async fn test_revaluations_are_invisible_across_tenants() {
    let fx = Fixture::new();
    let other = fx.register_tenant("globex-de", "DE", "EUR");
    let product = fx.seed_product(costs(dec!(8), dec!(2), dec!(1)));

    let rev = fx
        .handler
        .create_revaluation(
            &fx.ctx(&[ADMIN]),
            CreateRevaluationCommand {
                product_id: product.clone(),
                proposed: costs(dec!(9), dec!(2), dec!(1)),
                reason: "Annual review".to_string(),
            },
        )
        .await
        .unwrap();

    let foreign = fx.ctx_for(&other, &[ADMIN]);
    let err = fx
        .handler
        .get_revaluation(
            &foreign,
            GetRevaluationQuery {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "NOT_FOUND");

    let err = fx
        .handler
        .approve_revaluation(
            &foreign,
            ApproveRevaluationCommand {
                revaluation_id: rev.id().clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "NOT_FOUND");

    let listed = fx
        .handler
        .list_revaluations(&foreign, ListRevaluationsQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.total, 0);

    // 其他租户无法通过产品 ID 引用本租户的产品
    let err = fx
        .handler
        .create_revaluation(
            &foreign,
            CreateRevaluationCommand {
                product_id: product.clone(),
                proposed: costs(dec!(1), dec!(1), dec!(1)),
                reason: "Probe".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "NOT_FOUND");
    assert_eq!(fx.standard_cost(&product).material, dec!(8));
}

#[tokio::test]
async fn test_mass_update_is_scoped_to_tenant() {
    let fx = Fixture::new();
    let other = fx.register_tenant("globex-de", "DE", "EUR");

    let ours = fx.seed_product(costs(dec!(10), dec!(0), dec!(0)));
    let theirs = fx.seed(ProductCost::new(
        other.id.clone(),
        ProductId::new(),
        CostingMethod::Standard,
        costs(dec!(10), dec!(0), dec!(0)),
    ));

    let result = fx
        .handler
        .apply_mass_update(
            &fx.ctx_for(&other, &[ACCOUNTANT]),
            ApplyMassUpdateCommand {
                filter: MassUpdateFilter {
                    product_ids: Some(vec![ours.clone(), theirs.clone()]),
                    ..Default::default()
                },
                adjustment: Adjustment {
                    kind: AdjustmentKind::Amount,
                    material: Some(dec!(1)),
                    labor: None,
                    overhead: None,
                    reason: "Tariff".to_string(),
                },
                timeout: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(result.updated_count, 1);
    assert_eq!(fx.standard_cost(&ours).material, dec!(10));
    assert_eq!(
        fx.products
            .get(&other.id, &theirs)
            .unwrap()
            .standard_cost
            .material,
        dec!(11)
    );
}
