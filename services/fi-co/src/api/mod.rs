//! HTTP 接口层
//!
//! 所有路由位于 `/api/v1/tenants/{slug}/costing` 之下，并经过 JWT 认证中间件

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use cuba_auth_core::TokenService;

use crate::application::ServiceHandler;

pub use middleware::{AuthCaller, auth_middleware};

/// 构建成本核算路由
pub fn router(handler: Arc<ServiceHandler>, token_service: Arc<TokenService>) -> Router {
    Router::new()
        .route(
            "/api/v1/tenants/{slug}/costing/revaluations",
            post(handlers::create_revaluation).get(handlers::list_revaluations),
        )
        .route(
            "/api/v1/tenants/{slug}/costing/revaluations/{id}",
            get(handlers::get_revaluation),
        )
        .route(
            "/api/v1/tenants/{slug}/costing/revaluations/{id}/approve",
            post(handlers::approve_revaluation),
        )
        .route(
            "/api/v1/tenants/{slug}/costing/revaluations/{id}/reject",
            post(handlers::reject_revaluation),
        )
        .route(
            "/api/v1/tenants/{slug}/costing/revaluations/{id}/retry-sync",
            post(handlers::retry_cost_sync),
        )
        .route(
            "/api/v1/tenants/{slug}/costing/standard-costs/mass-update",
            post(handlers::apply_mass_update),
        )
        .route(
            "/api/v1/tenants/{slug}/costing/variance-reason-codes",
            get(handlers::get_variance_reason_codes),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            token_service,
            auth_middleware,
        ))
        .with_state(handler)
}
