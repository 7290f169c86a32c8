//! 差异原因代码

use std::sync::Arc;

use cuba_auth_core::VIEW_COST_VARIANCES;
use cuba_errors::AppResult;
use tracing::debug;

use crate::domain::localization::VarianceCatalog;

use super::{RequestContext, ServiceHandler};

impl ServiceHandler {
    /// 按租户所在辖区返回差异原因代码与科目映射
    pub async fn get_variance_reason_codes(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Arc<VarianceCatalog>> {
        let tenant = self.authorize(ctx, VIEW_COST_VARIANCES).await?;

        let localization = self.localization(&tenant);
        debug!(
            tenant_id = %tenant.id,
            jurisdiction = %localization.jurisdiction(),
            codes = localization.get_variance_reason_codes().len(),
            "Resolved variance catalog"
        );
        Ok(localization.catalog())
    }
}
