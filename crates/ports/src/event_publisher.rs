//! Event Publisher trait 定义

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cuba_common::TenantId;
use cuba_errors::AppResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 事件信封
///
/// 服务内的领域事件在发布前统一转换为信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub event_type: String,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    pub fn new(
        tenant_id: TenantId,
        event_type: impl Into<String>,
        aggregate_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        occurred_at: DateTime<Utc>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            tenant_id,
            event_type: event_type.into(),
            aggregate_type: aggregate_type.into(),
            aggregate_id: aggregate_id.into(),
            occurred_at,
            payload,
        }
    }
}

/// 事件发布者 trait
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// 发布事件
    async fn publish(&self, topic: &str, event: EventEnvelope) -> AppResult<()>;

    /// 批量发布事件
    async fn publish_batch(&self, topic: &str, events: Vec<EventEnvelope>) -> AppResult<()> {
        for event in events {
            self.publish(topic, event).await?;
        }
        Ok(())
    }
}
