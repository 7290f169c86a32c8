//! 批量更新命令

use std::time::Duration;

use cuba_errors::AppResult;

use crate::domain::mass_update::{Adjustment, MassUpdateFilter};

/// 批量调整标准成本命令
#[derive(Debug, Clone)]
pub struct ApplyMassUpdateCommand {
    pub filter: MassUpdateFilter,
    pub adjustment: Adjustment,
    /// 调用方给出的执行时限，超过配置上限时按上限处理
    pub timeout: Option<Duration>,
}

impl ApplyMassUpdateCommand {
    pub fn validate(&self) -> AppResult<()> {
        self.filter.validate()?;
        self.adjustment.validate()
    }
}
