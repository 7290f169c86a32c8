//! 产品成本存储接口

use async_trait::async_trait;
use cuba_common::TenantId;
use cuba_errors::AppResult;

use crate::domain::entities::ProductCost;
use crate::domain::mass_update::MassUpdateFilter;
use crate::domain::value_objects::{CostComponents, ProductId};

/// 产品成本存储
///
/// 产品归外部主数据所有，这里只读写标准成本。每次写入三个分量一起提交
#[async_trait]
pub trait ProductCostStore: Send + Sync {
    async fn read_product(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<ProductCost>>;

    /// 按过滤条件查找，最多返回 `limit` 条，按产品 ID 排序
    async fn find_matching(
        &self,
        tenant_id: &TenantId,
        filter: &MassUpdateFilter,
        limit: usize,
    ) -> AppResult<Vec<ProductCost>>;

    /// 无条件写入审批后的标准成本
    async fn apply_cost_update(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        components: &CostComponents,
    ) -> AppResult<()>;

    /// 版本匹配时写入标准成本
    ///
    /// 版本不符或记录已不存在时返回 false
    async fn update_standard_cost(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        components: &CostComponents,
        expected_version: i64,
    ) -> AppResult<bool>;
}
