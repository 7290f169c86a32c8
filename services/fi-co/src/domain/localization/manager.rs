//! 本地化管理器

use std::collections::BTreeMap;
use std::sync::Arc;

use cuba_domain_core::{CountryCode, Currency};

use super::{Jurisdiction, VarianceCatalog, VarianceReasonCode};

/// 按租户的 (所在国, 本位币) 提供差异原因代码与科目映射
///
/// 工作流和过账逻辑只消费这里给出的结果，不自己判断国家或币种
#[derive(Debug, Clone)]
pub struct LocalizationManager {
    catalog: Arc<VarianceCatalog>,
}

impl LocalizationManager {
    pub fn new(home_country: &CountryCode, base_currency: &Currency) -> Self {
        Self {
            catalog: Arc::new(VarianceCatalog::build(home_country, base_currency)),
        }
    }

    pub fn from_catalog(catalog: Arc<VarianceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.catalog.jurisdiction
    }

    pub fn get_variance_reason_codes(&self) -> &[VarianceReasonCode] {
        &self.catalog.codes
    }

    pub fn get_variance_gl_account_mapping(&self) -> &BTreeMap<String, String> {
        &self.catalog.gl_mapping
    }

    pub fn catalog(&self) -> Arc<VarianceCatalog> {
        self.catalog.clone()
    }
}
