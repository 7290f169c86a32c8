//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点，与业务路由挂在同一个 HTTP 服务上

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use cuba_adapter_postgres::check_connection;
use cuba_telemetry::HealthStatus;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

/// 健康检查器
#[derive(Clone, Default)]
pub struct HealthChecker {
    postgres: Option<PgPool>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_postgres(mut self, pool: PgPool) -> Self {
        self.postgres = Some(pool);
        self
    }

    /// 存活检查，不检查依赖
    pub async fn liveness(&self) -> HealthStatus {
        HealthStatus::new()
    }

    /// 就绪检查
    pub async fn readiness(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        if let Some(pool) = &self.postgres {
            match check_connection(pool).await {
                Ok(()) => status.add_check("postgres", true, None),
                // 细节只写日志
                Err(e) => {
                    tracing::warn!(error = %e, "Readiness check failed");
                    status.add_check("postgres", false, Some("unreachable".to_string()));
                }
            }
        }

        status
    }
}

#[derive(Clone)]
struct HealthState {
    checker: HealthChecker,
    metrics: Option<PrometheusHandle>,
}

/// 健康检查与指标路由
pub fn health_routes(checker: HealthChecker, metrics: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(HealthState { checker, metrics })
}

async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.checker.liveness().await))
}

async fn ready_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let status = state.checker.readiness().await;
    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn metrics_handler(State(state): State<HealthState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [("content-type", "text/plain; version=0.0.4")],
            String::new(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_without_dependencies() {
        let app = health_routes(HealthChecker::new(), None);

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["healthy"], true);

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
