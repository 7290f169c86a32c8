//! Costing queries

use cuba_common::Pagination;

use crate::domain::enums::RevaluationStatus;
use crate::domain::value_objects::RevaluationId;

/// 获取重估查询
#[derive(Debug, Clone)]
pub struct GetRevaluationQuery {
    pub revaluation_id: RevaluationId,
}

/// 列表重估查询
#[derive(Debug, Clone, Default)]
pub struct ListRevaluationsQuery {
    pub status: Option<RevaluationStatus>,
    pub pagination: Pagination,
}
