//! 产品标准成本（外部产品成本存储中的一行）

use chrono::{DateTime, NaiveDate, Utc};
use cuba_common::TenantId;
use serde::{Deserialize, Serialize};

use crate::domain::enums::CostingMethod;
use crate::domain::value_objects::{CostComponents, ProductId};

/// 产品成本记录
///
/// 产品本身归属外部主数据，这里只持有成本相关字段。
/// `version` 在每次写入时递增，批量更新以此做乐观并发控制
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCost {
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub category: Option<String>,
    pub costing_method: CostingMethod,
    pub standard_cost: CostComponents,
    pub effective_date: Option<NaiveDate>,
    pub version: i64,
    pub updated_at: DateTime<Utc>,
}

impl ProductCost {
    pub fn new(
        tenant_id: TenantId,
        product_id: ProductId,
        costing_method: CostingMethod,
        standard_cost: CostComponents,
    ) -> Self {
        Self {
            product_id,
            tenant_id,
            category: None,
            costing_method,
            standard_cost,
            effective_date: None,
            version: 1,
            updated_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }
}
