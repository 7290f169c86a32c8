//! cuba-errors - 统一错误处理
//!
//! 基于 RFC 7807 Problem Details 规范。每个错误都有稳定的 kind 和可读的 detail，
//! 存储层和内部错误的细节只写日志，不返回给调用方。

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 对外暴露的通用错误描述
const GENERIC_INTERNAL_DETAIL: &str = "An internal error occurred";

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 没有有效的调用方身份
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// 有身份但缺少能力
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 实体不存在，或不属于调用方租户（两者对调用方不可区分）
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// 状态机不允许从当前状态进行该转换
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 外部依赖（产品成本存储、总账接收方）不可达
    #[error("Dependency failure: {0}")]
    DependencyFailure(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn dependency_failure(msg: impl Into<String>) -> Self {
        Self::DependencyFailure(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 稳定的错误类别标识
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::DependencyFailure(_) => "DEPENDENCY_FAILURE",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) | Self::Internal(_) => "INTERNAL",
        }
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::InvalidState(_) => 409,
            Self::DependencyFailure(_) => 502,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// 可以返回给调用方的描述
    pub fn public_detail(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => GENERIC_INTERNAL_DETAIL.to_string(),
            Self::Unauthenticated(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::InvalidState(msg)
            | Self::DependencyFailure(msg)
            | Self::Conflict(msg) => msg.clone(),
        }
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            r#type: self.problem_type(),
            title: self.problem_title().to_string(),
            status: self.status_code(),
            kind: self.kind().to_string(),
            detail: self.public_detail(),
            instance: None,
        }
    }

    fn problem_type(&self) -> String {
        let slug = self.kind().to_lowercase().replace('_', "-");
        format!("https://api.cuba-erp.com/problems/{}", slug)
    }

    fn problem_title(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "Unauthenticated",
            Self::Forbidden(_) => "Forbidden",
            Self::NotFound(_) => "Resource Not Found",
            Self::Validation(_) => "Validation Error",
            Self::InvalidState(_) => "Invalid State",
            Self::DependencyFailure(_) => "Dependency Failure",
            Self::Conflict(_) => "Conflict",
            Self::Database(_) | Self::Internal(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let problem = self.to_problem_details();
        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(problem),
        )
            .into_response()
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    /// 稳定的错误类别
    pub kind: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
