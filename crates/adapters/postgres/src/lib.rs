//! cuba-adapter-postgres - PostgreSQL 适配器
//!
//! 连接池、事务管理与内置 SQL 迁移

mod connection;
mod migration;
mod transaction;

pub use connection::*;
pub use migration::*;
pub use transaction::*;
