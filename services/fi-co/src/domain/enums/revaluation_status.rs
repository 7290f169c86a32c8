//! 重估状态

use std::fmt;
use std::str::FromStr;

use cuba_errors::AppError;
use serde::{Deserialize, Serialize};

/// 成本重估状态
///
/// PENDING -> APPROVED | REJECTED，后两者为终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevaluationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RevaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevaluationStatus::Pending => "PENDING",
            RevaluationStatus::Approved => "APPROVED",
            RevaluationStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RevaluationStatus::Pending)
    }
}

impl fmt::Display for RevaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevaluationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(RevaluationStatus::Pending),
            "APPROVED" => Ok(RevaluationStatus::Approved),
            "REJECTED" => Ok(RevaluationStatus::Rejected),
            other => Err(AppError::validation(format!(
                "Unknown revaluation status: {}",
                other
            ))),
        }
    }
}

/// 审批后产品标准成本的同步状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostSyncStatus {
    /// 未审批或已拒绝，无需同步
    #[default]
    NotRequired,
    /// 已审批，后续写入尚未确认完成
    Pending,
    Synced,
    /// 后续写入失败，需要 retry-sync
    Failed,
}

impl CostSyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostSyncStatus::NotRequired => "NOT_REQUIRED",
            CostSyncStatus::Pending => "PENDING",
            CostSyncStatus::Synced => "SYNCED",
            CostSyncStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for CostSyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostSyncStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NOT_REQUIRED" => Ok(CostSyncStatus::NotRequired),
            "PENDING" => Ok(CostSyncStatus::Pending),
            "SYNCED" => Ok(CostSyncStatus::Synced),
            "FAILED" => Ok(CostSyncStatus::Failed),
            other => Err(AppError::validation(format!(
                "Unknown cost sync status: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("approved".parse::<RevaluationStatus>().unwrap(), RevaluationStatus::Approved);
        assert!("CANCELLED".parse::<RevaluationStatus>().is_err());
        assert!(RevaluationStatus::Rejected.is_terminal());
        assert!(!RevaluationStatus::Pending.is_terminal());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CostSyncStatus::NotRequired).unwrap();
        assert_eq!(json, "\"NOT_REQUIRED\"");
        assert_eq!("pending".parse::<CostSyncStatus>().unwrap(), CostSyncStatus::Pending);
    }
}
