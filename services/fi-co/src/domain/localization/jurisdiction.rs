//! 辖区标签

use std::fmt;

use cuba_domain_core::{CountryCode, Currency};
use serde::{Deserialize, Serialize};

/// 会计辖区
///
/// 由租户所在国解析，未单独建表的国家归入 `Default`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Jurisdiction {
    Us,
    Ca,
    Gb,
    De,
    Fr,
    Cn,
    Jp,
    In,
    Default,
}

impl Jurisdiction {
    pub fn from_country(country: &CountryCode) -> Self {
        match country.code() {
            "US" => Jurisdiction::Us,
            "CA" => Jurisdiction::Ca,
            "GB" => Jurisdiction::Gb,
            "DE" => Jurisdiction::De,
            "FR" => Jurisdiction::Fr,
            "CN" => Jurisdiction::Cn,
            "JP" => Jurisdiction::Jp,
            "IN" => Jurisdiction::In,
            _ => Jurisdiction::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Us => "US",
            Jurisdiction::Ca => "CA",
            Jurisdiction::Gb => "GB",
            Jurisdiction::De => "DE",
            Jurisdiction::Fr => "FR",
            Jurisdiction::Cn => "CN",
            Jurisdiction::Jp => "JP",
            Jurisdiction::In => "IN",
            Jurisdiction::Default => "DEFAULT",
        }
    }

    /// 辖区法定记账货币，`Default` 没有
    pub fn local_currency(&self) -> Option<&'static str> {
        match self {
            Jurisdiction::Us => Some("USD"),
            Jurisdiction::Ca => Some("CAD"),
            Jurisdiction::Gb => Some("GBP"),
            Jurisdiction::De | Jurisdiction::Fr => Some("EUR"),
            Jurisdiction::Cn => Some("CNY"),
            Jurisdiction::Jp => Some("JPY"),
            Jurisdiction::In => Some("INR"),
            Jurisdiction::Default => None,
        }
    }

    /// 本位币与法定货币不同，需要折算差异
    pub fn requires_translation(&self, base_currency: &Currency) -> bool {
        self.local_currency()
            .is_some_and(|local| local != base_currency.code())
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
