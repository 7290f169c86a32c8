//! ports - 抽象 trait 层
//!
//! 定义跨服务共享的基础设施接口：审计日志与领域事件发布

mod audit_log;
mod event_publisher;

pub use audit_log::*;
pub use event_publisher::*;
