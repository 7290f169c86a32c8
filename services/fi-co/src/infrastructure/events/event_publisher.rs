//! 事件发布器实现

use std::sync::Arc;

use async_trait::async_trait;
use cuba_errors::AppResult;
use cuba_ports::{EventEnvelope, EventPublisher};
use tokio::sync::RwLock;

/// 已发布的事件及其主题
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub topic: String,
    pub envelope: EventEnvelope,
}

/// 内存事件总线实现
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    events: Arc<RwLock<Vec<PublishedEvent>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取所有发布的事件（用于测试）
    pub async fn get_events(&self) -> Vec<PublishedEvent> {
        self.events.read().await.clone()
    }

    /// 按事件类型过滤
    pub async fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.envelope.event_type == event_type)
            .map(|e| e.envelope.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, topic: &str, event: EventEnvelope) -> AppResult<()> {
        tracing::debug!(
            topic,
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            "Domain event published"
        );
        self.events.write().await.push(PublishedEvent {
            topic: topic.to_string(),
            envelope: event,
        });
        Ok(())
    }
}

/// NoOp 事件发布器
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _topic: &str, _event: EventEnvelope) -> AppResult<()> {
        Ok(())
    }
}

/// 日志事件发布器
pub struct LoggingEventPublisher;

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, topic: &str, event: EventEnvelope) -> AppResult<()> {
        tracing::info!(
            topic,
            event_type = %event.event_type,
            tenant_id = %event.tenant_id,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            payload = %event.payload,
            "Domain event: {}",
            event.event_type
        );
        Ok(())
    }
}
