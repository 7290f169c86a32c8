//! fi-co - 标准成本与成本重估服务

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod metrics;
