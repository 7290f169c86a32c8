//! 本地化：差异原因代码与总账科目映射

mod cache;
mod catalog;
mod jurisdiction;
mod manager;
pub mod tables;

pub use cache::VarianceCatalogCache;
pub use catalog::{VarianceCatalog, VarianceReasonCode};
pub use jurisdiction::Jurisdiction;
pub use manager::LocalizationManager;
