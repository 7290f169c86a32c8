//! cuba-config - 配置加载库
//!
//! 加载顺序：`default.toml` -> `{APP_ENV}.toml` -> `APP_` 前缀的环境变量（`__` 表示嵌套，可来自 `.env`）

use std::collections::HashMap;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// 启动时执行内置迁移
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

fn default_true() -> bool {
    true
}

/// JWT 配置
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_issuer() -> String {
    "cuba-iam".to_string()
}

fn default_audience() -> String {
    "cuba-erp".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否开放 /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics_enabled: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 成本小数位上限，与成本列 NUMERIC(19, 6) 的小数位一致
pub const MAX_COST_SCALE: u32 = 6;

/// 标准成本配置
#[derive(Debug, Clone, Deserialize)]
pub struct CostingConfig {
    /// 成本金额保留的小数位
    #[serde(default = "default_cost_scale")]
    pub cost_scale: u32,
    /// 批量更新的最长执行时间
    #[serde(default = "default_mass_update_timeout_ms")]
    pub mass_update_timeout_ms: u64,
    /// 单次批量更新允许匹配的最大记录数
    #[serde(default = "default_max_mass_update_records")]
    pub max_mass_update_records: usize,
    /// 角色 -> 能力列表；为空时使用内置角色表
    #[serde(default)]
    pub roles: HashMap<String, Vec<String>>,
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            cost_scale: default_cost_scale(),
            mass_update_timeout_ms: default_mass_update_timeout_ms(),
            max_mass_update_records: default_max_mass_update_records(),
            roles: HashMap::new(),
        }
    }
}

fn default_cost_scale() -> u32 {
    4
}

fn default_mass_update_timeout_ms() -> u64 {
    30_000
}

fn default_max_mass_update_records() -> usize {
    10_000
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub costing: CostingConfig,
}

fn default_app_env() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        // 本地开发时从 .env 补充环境变量
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let figment = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("APP_").split("__"));

        Self::from_figment(figment)
    }

    /// 从任意 figment 提取并校验配置
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.costing.cost_scale > MAX_COST_SCALE {
            return Err(ConfigError::Invalid(format!(
                "costing.cost_scale must be at most {}, got {}",
                MAX_COST_SCALE, self.costing.cost_scale
            )));
        }
        if self.costing.max_mass_update_records == 0 {
            return Err(ConfigError::Invalid(
                "costing.max_mass_update_records must be positive".to_string(),
            ));
        }
        if self.costing.mass_update_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "costing.mass_update_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
