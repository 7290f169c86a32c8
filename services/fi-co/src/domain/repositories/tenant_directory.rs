//! 租户解析接口

use async_trait::async_trait;
use cuba_errors::AppResult;

use crate::domain::entities::TenantProfile;

/// 根据 slug 解析租户
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn resolve(&self, slug: &str) -> AppResult<Option<TenantProfile>>;
}
