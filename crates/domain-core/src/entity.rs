//! 实体基础 trait

use cuba_common::{AuditInfo, TenantId};

/// 实体 trait
pub trait Entity {
    type Id;

    fn id(&self) -> &Self::Id;
}

/// 聚合根 trait
///
/// 聚合根总是归属于一个租户
pub trait AggregateRoot: Entity {
    fn tenant_id(&self) -> &TenantId;
    fn audit_info(&self) -> &AuditInfo;
    fn audit_info_mut(&mut self) -> &mut AuditInfo;
}
