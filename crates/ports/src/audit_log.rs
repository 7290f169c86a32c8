//! 审计日志 trait 定义

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cuba_common::{PagedResult, Pagination, TenantId, UserId};
use cuba_errors::AppResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 审计日志条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    /// 操作类型
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    /// 业务原因（重估原因、批量更新原因等）
    pub reason: Option<String>,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
}

impl AuditLogEntry {
    /// 创建新的审计日志条目
    pub fn new(
        tenant_id: TenantId,
        user_id: UserId,
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            tenant_id,
            user_id,
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            reason: None,
            old_value: None,
            new_value: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// 设置变更值
    pub fn with_changes(
        mut self,
        old_value: Option<serde_json::Value>,
        new_value: Option<serde_json::Value>,
    ) -> Self {
        self.old_value = old_value;
        self.new_value = new_value;
        self
    }
}

/// 审计日志过滤器
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
}

impl AuditLogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn by_resource(
        mut self,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        self.resource_type = Some(resource_type.into());
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.action.as_ref().is_none_or(|a| a == &entry.action)
            && self
                .resource_type
                .as_ref()
                .is_none_or(|t| t == &entry.resource_type)
            && self
                .resource_id
                .as_ref()
                .is_none_or(|id| id == &entry.resource_id)
    }
}

/// 审计日志 Repository trait
///
/// 只追加；查询总是限定在一个租户内
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// 记录单条审计日志
    async fn log(&self, entry: AuditLogEntry) -> AppResult<()>;

    /// 批量记录审计日志
    async fn log_batch(&self, entries: Vec<AuditLogEntry>) -> AppResult<u64>;

    /// 查询审计日志（按时间倒序）
    async fn query(
        &self,
        tenant_id: &TenantId,
        filter: &AuditLogFilter,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<AuditLogEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        let entry = AuditLogEntry::new(
            TenantId::new(),
            UserId::new(),
            "REVALUATION_APPROVED",
            "CostRevaluation",
            "rv-1",
        )
        .with_reason("supplier price increase");

        assert!(AuditLogFilter::new().matches(&entry));
        assert!(
            AuditLogFilter::new()
                .by_action("REVALUATION_APPROVED")
                .by_resource("CostRevaluation", "rv-1")
                .matches(&entry)
        );
        assert!(!AuditLogFilter::new().by_action("REVALUATION_REJECTED").matches(&entry));
    }
}
