//! 差异原因目录

use std::collections::BTreeMap;

use cuba_domain_core::{CountryCode, Currency};
use serde::{Deserialize, Serialize};

use super::Jurisdiction;
use super::tables::{self, COMMON_CODES, FX_TRANSLATION};

/// 差异原因代码
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceReasonCode {
    pub code: String,
    pub description: String,
    pub gl_account: String,
}

/// 一个 (国家, 本位币) 组合下的完整目录
///
/// 只由辖区组合决定，与具体租户无关；构建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceCatalog {
    pub jurisdiction: Jurisdiction,
    pub country: CountryCode,
    pub currency: Currency,
    pub codes: Vec<VarianceReasonCode>,
    pub gl_mapping: BTreeMap<String, String>,
}

impl VarianceCatalog {
    pub fn build(country: &CountryCode, currency: &Currency) -> Self {
        let jurisdiction = Jurisdiction::from_country(country);

        let mut names: Vec<&'static str> = COMMON_CODES.to_vec();
        names.extend_from_slice(tables::extra_codes(jurisdiction));
        if jurisdiction.requires_translation(currency) {
            names.push(FX_TRANSLATION);
        }

        let codes: Vec<VarianceReasonCode> = names
            .into_iter()
            .map(|code| VarianceReasonCode {
                code: code.to_string(),
                description: tables::description(code).to_string(),
                gl_account: tables::gl_account(jurisdiction, code).to_string(),
            })
            .collect();

        let gl_mapping = codes
            .iter()
            .map(|c| (c.code.clone(), c.gl_account.clone()))
            .collect();

        Self {
            jurisdiction,
            country: country.clone(),
            currency: currency.clone(),
            codes,
            gl_mapping,
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.gl_mapping.contains_key(code)
    }

    pub fn gl_account(&self, code: &str) -> Option<&str> {
        self.gl_mapping.get(code).map(String::as_str)
    }

    /// 是否使用兜底科目表
    pub fn uses_default_mapping(&self) -> bool {
        self.jurisdiction == Jurisdiction::Default
    }
}
