//! domain-core - 跨 context 的领域核心类型
//!
//! 包含极少数需要跨 bounded context 共享的值对象

mod entity;
mod money;

pub use entity::*;
pub use money::*;

// Re-export common types
pub use cuba_common::{AuditInfo, TenantId, UserId};
