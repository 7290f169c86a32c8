//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use cuba_config::AppConfig;
use cuba_errors::AppResult;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::health::{HealthChecker, health_routes};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, init_runtime_metrics};
use crate::shutdown::shutdown_signal;

/// 运行 HTTP 服务
///
/// 所有服务的统一入口点：
/// 1. 加载配置
/// 2. 初始化日志与 Prometheus recorder
/// 3. 创建基础设施资源（数据库连接带重试、TokenService）
/// 4. 调用服务提供的闭包构建业务路由
/// 5. 合并 /health、/ready、/metrics 并启动服务器，处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     cuba_bootstrap::run("config", |infra| async move {
///         Ok(my_service::router(infra.postgres_pool()))
///     })
///     .await
/// }
/// ```
pub async fn run<F, Fut>(config_dir: &str, router_builder: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;

    init_runtime(&config);
    info!("Starting {} service", config.app_name);

    let metrics = init_runtime_metrics(&config);

    let infra = Infrastructure::from_config(config.clone()).await?;
    let checker = HealthChecker::new().with_postgres(infra.postgres_pool());

    let app = router_builder(infra)
        .await?
        .merge(health_routes(checker, metrics))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server.bind_address().parse()?;
    info!(%addr, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");
    Ok(())
}
