//! 认证中间件与调用方提取器

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use cuba_auth_core::{Caller, Claims, TokenService};
use cuba_errors::AppError;
use tracing::{debug, warn};

/// JWT 认证中间件
///
/// 验证 Bearer 访问令牌并将 claims 注入请求扩展；缺失或无效时返回 UNAUTHENTICATED
pub async fn auth_middleware(
    State(token_service): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!("Missing or invalid authorization header");
            AppError::unauthenticated("Missing bearer token")
        })?;

    let claims = token_service.validate_access_token(token).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        e
    })?;
    debug!(user_id = %claims.sub, tenant_id = %claims.tenant_id, "Token validated");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// 已认证调用方提取器，需在 auth_middleware 之后使用
pub struct AuthCaller(pub Caller);

impl<S> FromRequestParts<S> for AuthCaller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .ok_or_else(|| AppError::unauthenticated("Missing caller identity"))?;
        Caller::from_claims(claims).map(AuthCaller)
    }
}
