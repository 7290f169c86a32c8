//! 基础设施资源管理
//!
//! 统一管理服务共享的基础设施资源

use std::sync::Arc;

use cuba_adapter_postgres::{PostgresConfig, create_pool_with_retry};
use cuba_auth_core::TokenService;
use cuba_common::RetryConfig;
use cuba_config::AppConfig;
use cuba_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
    token_service: Arc<TokenService>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（数据库连接带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let postgres_pool = create_pool_with_retry(&pg_config, &RetryConfig::default()).await?;

        let token_service = Arc::new(token_service_from_config(&config));
        info!("Infrastructure initialized");

        Ok(Self {
            config,
            postgres_pool,
            token_service,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }
}

/// 按 JWT 配置创建 TokenService
pub fn token_service_from_config(config: &AppConfig) -> TokenService {
    TokenService::new(
        config.jwt.secret.expose_secret(),
        config.jwt.expires_in as i64,
        config.jwt.issuer.clone(),
        config.jwt.audience.clone(),
    )
}
