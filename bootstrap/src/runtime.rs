//! 服务运行时

use cuba_config::AppConfig;
use cuba_telemetry::{init_metrics, init_tracing, init_tracing_json};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

/// 初始化服务运行时（日志）
pub fn init_runtime(config: &AppConfig) {
    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
}

/// 安装 Prometheus recorder；关闭或安装失败时返回 None
pub fn init_runtime_metrics(config: &AppConfig) -> Option<PrometheusHandle> {
    if !config.telemetry.metrics_enabled {
        return None;
    }

    match init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
            None
        }
    }
}
