//! cuba-bootstrap - 统一服务启动骨架
//!
//! 所有服务复用的启动逻辑：配置 -> 日志 -> 基础设施 -> HTTP 服务 -> 优雅关闭

mod health;
mod infrastructure;
mod runtime;
mod shutdown;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use runtime::*;
pub use shutdown::*;
pub use starter::*;
