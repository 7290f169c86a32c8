//! 批量调整方式

use std::fmt;
use std::str::FromStr;

use cuba_errors::AppError;
use serde::{Deserialize, Serialize};

/// 批量调整方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentKind {
    /// 按百分比：new = current * (1 + delta / 100)
    Percentage,
    /// 按金额：new = current + delta
    Amount,
}

impl AdjustmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::Percentage => "PERCENTAGE",
            AdjustmentKind::Amount => "AMOUNT",
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustmentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PERCENTAGE" => Ok(AdjustmentKind::Percentage),
            "AMOUNT" => Ok(AdjustmentKind::Amount),
            other => Err(AppError::validation(format!(
                "Unknown adjustment kind: {}",
                other
            ))),
        }
    }
}
