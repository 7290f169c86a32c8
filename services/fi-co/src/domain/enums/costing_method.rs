//! 成本核算方法枚举

use std::fmt;
use std::str::FromStr;

use cuba_errors::AppError;
use serde::{Deserialize, Serialize};

/// 产品的成本核算方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostingMethod {
    /// 标准成本
    #[default]
    Standard,
    /// 先进先出
    Fifo,
    /// 后进先出
    Lifo,
    /// 加权平均
    WeightedAverage,
    /// 个别计价
    SpecificIdentification,
}

impl CostingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostingMethod::Standard => "STANDARD",
            CostingMethod::Fifo => "FIFO",
            CostingMethod::Lifo => "LIFO",
            CostingMethod::WeightedAverage => "WEIGHTED_AVERAGE",
            CostingMethod::SpecificIdentification => "SPECIFIC_IDENTIFICATION",
        }
    }
}

impl fmt::Display for CostingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostingMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STANDARD" => Ok(CostingMethod::Standard),
            "FIFO" => Ok(CostingMethod::Fifo),
            "LIFO" => Ok(CostingMethod::Lifo),
            "WEIGHTED_AVERAGE" => Ok(CostingMethod::WeightedAverage),
            "SPECIFIC_IDENTIFICATION" => Ok(CostingMethod::SpecificIdentification),
            other => Err(AppError::validation(format!(
                "Unknown costing method: {}",
                other
            ))),
        }
    }
}
