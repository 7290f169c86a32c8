//! 租户档案

use cuba_common::TenantId;
use cuba_domain_core::{CountryCode, Currency};
use serde::{Deserialize, Serialize};

/// 租户解析结果
///
/// slug 是外部可见的标识，`id` 只能通过解析得到
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantProfile {
    pub id: TenantId,
    pub slug: String,
    pub home_country: CountryCode,
    pub base_currency: Currency,
}
