//! HTTP 处理函数
//!
//! 解析路径、头和请求体，转换为命令或查询后交给 ServiceHandler

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use cuba_common::Pagination;
use cuba_errors::{AppError, AppResult};

use crate::application::commands::*;
use crate::application::queries::*;
use crate::application::{RequestContext, ServiceHandler};
use crate::domain::enums::RevaluationStatus;
use crate::domain::mass_update::MassUpdateResult;
use crate::domain::value_objects::{ProductId, RevaluationId};

use super::dto::*;
use super::middleware::AuthCaller;

/// 批量更新的请求级超时（毫秒）
pub const REQUEST_TIMEOUT_HEADER: &str = "x-request-timeout-ms";

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| AppError::validation(format!("Invalid request body: {}", e.body_text())))
}

fn revaluation_id(raw: &str) -> AppResult<RevaluationId> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid revaluation id: {}", raw)))
}

fn request_timeout(headers: &HeaderMap) -> AppResult<Option<Duration>> {
    let Some(value) = headers.get(REQUEST_TIMEOUT_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|ms| Some(Duration::from_millis(ms)))
        .ok_or_else(|| AppError::validation(format!("Invalid {} header", REQUEST_TIMEOUT_HEADER)))
}

pub async fn create_revaluation(
    State(handler): State<Arc<ServiceHandler>>,
    AuthCaller(caller): AuthCaller,
    Path(slug): Path<String>,
    payload: Result<Json<CreateRevaluationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let req = body(payload)?;
    let ctx = RequestContext::new(caller, slug);
    let cmd = CreateRevaluationCommand {
        product_id: ProductId::from_uuid(req.product_id),
        proposed: req.proposed,
        reason: req.reason,
    };

    let revaluation = handler.create_revaluation(&ctx, cmd).await?;
    Ok((StatusCode::CREATED, Json(RevaluationResponse::from(&revaluation))))
}

pub async fn list_revaluations(
    State(handler): State<Arc<ServiceHandler>>,
    AuthCaller(caller): AuthCaller,
    Path(slug): Path<String>,
    params: Result<Query<ListRevaluationsParams>, QueryRejection>,
) -> AppResult<Json<RevaluationListResponse>> {
    let Query(params) =
        params.map_err(|e| AppError::validation(format!("Invalid query: {}", e.body_text())))?;
    let ctx = RequestContext::new(caller, slug);

    let status = params
        .status
        .as_deref()
        .map(str::parse::<RevaluationStatus>)
        .transpose()?;
    let query = ListRevaluationsQuery {
        status,
        pagination: Pagination::new(params.page.unwrap_or(1), params.page_size.unwrap_or(20)),
    };

    let result = handler.list_revaluations(&ctx, query).await?;
    Ok(Json(result.into()))
}

pub async fn get_revaluation(
    State(handler): State<Arc<ServiceHandler>>,
    AuthCaller(caller): AuthCaller,
    Path((slug, id)): Path<(String, String)>,
) -> AppResult<Json<RevaluationResponse>> {
    let ctx = RequestContext::new(caller, slug);
    let query = GetRevaluationQuery {
        revaluation_id: revaluation_id(&id)?,
    };

    let revaluation = handler.get_revaluation(&ctx, query).await?;
    Ok(Json(RevaluationResponse::from(&revaluation)))
}

pub async fn approve_revaluation(
    State(handler): State<Arc<ServiceHandler>>,
    AuthCaller(caller): AuthCaller,
    Path((slug, id)): Path<(String, String)>,
) -> AppResult<Json<RevaluationResponse>> {
    let ctx = RequestContext::new(caller, slug);
    let cmd = ApproveRevaluationCommand {
        revaluation_id: revaluation_id(&id)?,
    };

    let revaluation = handler.approve_revaluation(&ctx, cmd).await?;
    Ok(Json(RevaluationResponse::from(&revaluation)))
}

pub async fn reject_revaluation(
    State(handler): State<Arc<ServiceHandler>>,
    AuthCaller(caller): AuthCaller,
    Path((slug, id)): Path<(String, String)>,
    payload: Result<Json<RejectRevaluationRequest>, JsonRejection>,
) -> AppResult<Json<RevaluationResponse>> {
    let req = body(payload)?;
    let ctx = RequestContext::new(caller, slug);
    let cmd = RejectRevaluationCommand {
        revaluation_id: revaluation_id(&id)?,
        reason: req.reason,
    };

    let revaluation = handler.reject_revaluation(&ctx, cmd).await?;
    Ok(Json(RevaluationResponse::from(&revaluation)))
}

pub async fn retry_cost_sync(
    State(handler): State<Arc<ServiceHandler>>,
    AuthCaller(caller): AuthCaller,
    Path((slug, id)): Path<(String, String)>,
) -> AppResult<Json<RevaluationResponse>> {
    let ctx = RequestContext::new(caller, slug);
    let cmd = RetryCostSyncCommand {
        revaluation_id: revaluation_id(&id)?,
    };

    let revaluation = handler.retry_cost_sync(&ctx, cmd).await?;
    Ok(Json(RevaluationResponse::from(&revaluation)))
}

pub async fn apply_mass_update(
    State(handler): State<Arc<ServiceHandler>>,
    AuthCaller(caller): AuthCaller,
    Path(slug): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<MassUpdateRequest>, JsonRejection>,
) -> AppResult<Json<MassUpdateResult>> {
    let req = body(payload)?;
    let ctx = RequestContext::new(caller, slug);
    let cmd = ApplyMassUpdateCommand {
        filter: req.filter.into_domain()?,
        adjustment: req.adjustment.into_domain()?,
        timeout: request_timeout(&headers)?,
    };

    let result = handler.apply_mass_update(&ctx, cmd).await?;
    Ok(Json(result))
}

pub async fn get_variance_reason_codes(
    State(handler): State<Arc<ServiceHandler>>,
    AuthCaller(caller): AuthCaller,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let ctx = RequestContext::new(caller, slug);
    let catalog = handler.get_variance_reason_codes(&ctx).await?;
    Ok(Json(catalog.as_ref().clone()))
}
