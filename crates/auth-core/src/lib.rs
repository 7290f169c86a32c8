//! cuba-auth-core - 认证核心库
//!
//! JWT Claims、令牌校验，以及基于角色的能力检查（Authorization Gate）

use std::collections::{HashMap, HashSet};

use chrono::{Duration, Utc};
use cuba_common::{TenantId, UserId};
use cuba_errors::{AppError, AppResult};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 审批成本重估
pub const APPROVE_COST_REVALUATIONS: &str = "APPROVE_COST_REVALUATIONS";
/// 维护标准成本（创建重估、批量更新）
pub const MANAGE_STANDARD_COSTS: &str = "MANAGE_STANDARD_COSTS";
/// 查看成本差异
pub const VIEW_COST_VARIANCES: &str = "VIEW_COST_VARIANCES";

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Tenant ID
    pub tenant_id: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: String,
    /// Token type (access or refresh)
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: &UserId,
        tenant_id: &TenantId,
        permissions: Vec<String>,
        roles: Vec<String>,
        expires_in_secs: i64,
        token_type: &str,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.0.to_string(),
            tenant_id: tenant_id.0.to_string(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            token_type: token_type.to_string(),
            permissions,
            roles,
        }
    }

    pub fn user_id(&self) -> AppResult<UserId> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from_uuid)
            .map_err(|_| AppError::unauthenticated("Invalid user ID in token"))
    }

    pub fn tenant_id(&self) -> AppResult<TenantId> {
        Uuid::parse_str(&self.tenant_id)
            .map(TenantId::from_uuid)
            .map_err(|_| AppError::unauthenticated("Invalid tenant ID in token"))
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_access_token(&self) -> bool {
        self.token_type == "access"
    }
}

/// Token 服务
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: i64,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(secret: &str, access_token_expires_in: i64, issuer: String, audience: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in,
            issuer,
            audience,
        }
    }

    /// 生成访问令牌
    pub fn generate_access_token(
        &self,
        user_id: &UserId,
        tenant_id: &TenantId,
        permissions: Vec<String>,
        roles: Vec<String>,
    ) -> AppResult<String> {
        let claims = Claims::new(
            user_id,
            tenant_id,
            permissions,
            roles,
            self.access_token_expires_in,
            "access",
            &self.issuer,
            &self.audience,
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
    }

    /// 验证令牌
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::unauthenticated(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        if claims.jti.is_empty() {
            return Err(AppError::unauthenticated("Token ID (jti) missing"));
        }

        Ok(claims)
    }

    /// 验证访问令牌（确保是 access token）
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_access_token() {
            return Err(AppError::unauthenticated("Not an access token"));
        }

        Ok(claims)
    }
}

/// 角色能力检查
pub trait CapabilityGate: Send + Sync {
    fn check_capability(&self, role: &str, capability: &str) -> bool;
}

/// 基于配置的角色能力表
#[derive(Debug, Clone)]
pub struct RoleCapabilityTable {
    roles: HashMap<String, HashSet<String>>,
}

impl RoleCapabilityTable {
    pub fn new(roles: HashMap<String, Vec<String>>) -> Self {
        Self {
            roles: roles
                .into_iter()
                .map(|(role, caps)| (role, caps.into_iter().collect()))
                .collect(),
        }
    }

    /// 配置为空时使用内置角色表
    pub fn from_config(roles: &HashMap<String, Vec<String>>) -> Self {
        if roles.is_empty() {
            Self::default()
        } else {
            Self::new(roles.clone())
        }
    }
}

impl Default for RoleCapabilityTable {
    fn default() -> Self {
        let table = [
            (
                "costing_admin",
                vec![
                    APPROVE_COST_REVALUATIONS,
                    MANAGE_STANDARD_COSTS,
                    VIEW_COST_VARIANCES,
                ],
            ),
            (
                "cost_accountant",
                vec![MANAGE_STANDARD_COSTS, VIEW_COST_VARIANCES],
            ),
            (
                "controller",
                vec![APPROVE_COST_REVALUATIONS, VIEW_COST_VARIANCES],
            ),
            ("viewer", vec![VIEW_COST_VARIANCES]),
        ];

        Self::new(
            table
                .into_iter()
                .map(|(role, caps)| {
                    (
                        role.to_string(),
                        caps.into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl CapabilityGate for RoleCapabilityTable {
    fn check_capability(&self, role: &str, capability: &str) -> bool {
        self.roles
            .get(role)
            .is_some_and(|caps| caps.contains(capability))
    }
}

/// 已认证的调用方
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl Caller {
    pub fn from_claims(claims: &Claims) -> AppResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            tenant_id: claims.tenant_id()?,
            roles: claims.roles.clone(),
            permissions: claims.permissions.clone(),
        })
    }

    /// 任一角色通过检查，或令牌直接授予该能力
    pub fn is_allowed(&self, gate: &dyn CapabilityGate, capability: &str) -> bool {
        self.permissions.iter().any(|p| p == capability)
            || self
                .roles
                .iter()
                .any(|role| gate.check_capability(role, capability))
    }

    pub fn require(&self, gate: &dyn CapabilityGate, capability: &str) -> AppResult<()> {
        if self.is_allowed(gate, capability) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Missing capability: {}",
                capability
            )))
        }
    }
}

/// 能力检查宏
#[macro_export]
macro_rules! require_capability {
    ($caller:expr, $gate:expr, $capability:expr) => {
        $caller.require($gate, $capability)?
    };
}
