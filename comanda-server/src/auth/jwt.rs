//! JWT 令牌服务
//!
//! 处理 JWT 令牌的生成、验证和解析。
//! 员工令牌与顾客令牌使用不同的受众（audience），互不通用。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 身份类别：员工或顾客
pub const KIND_STAFF: &str = "staff";
pub const KIND_CUSTOMER: &str = "customer";

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 员工令牌受众
    pub staff_audience: String,
    /// 顾客令牌受众
    pub customer_audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(key) => String::from_utf8(key).unwrap_or_else(|_| {
                tracing::error!("JWT secret contains invalid UTF-8 characters");
                generate_secure_jwt_secret()
                    .map(|key| {
                        String::from_utf8(key).unwrap_or_else(|_| {
                            "emergency-fallback-key-must-be-replaced".to_string()
                        })
                    })
                    .unwrap_or_else(|_| "emergency-fallback-key-must-be-replaced".to_string())
            }),
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using emergency key", e);
                    "emergency-fallback-key-must-be-replaced-in-production".to_string()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("🚨 FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "comanda-server".to_string()),
            staff_audience: std::env::var("JWT_STAFF_AUDIENCE")
                .unwrap_or_else(|_| "comanda-staff".to_string()),
            customer_audience: std::env::var("JWT_CUSTOMER_AUDIENCE")
                .unwrap_or_else(|_| "comanda-customers".to_string()),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    /// 员工为用户名，顾客为邮箱
    pub username: String,
    /// 展示名
    pub display_name: String,
    /// 身份类别: staff / customer
    pub kind: String,
    /// 角色名称（顾客固定为 customer）
    pub role: String,
    /// 权限列表 (逗号分隔，顾客为空)
    pub permissions: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("密钥生成失败: {0}")]
    KeyGenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成安全的 JWT 密钥
pub fn generate_secure_jwt_secret() -> Result<Vec<u8>, JwtError> {
    let rng = SystemRandom::new();
    let mut key = vec![0u8; 32]; // 256-bit key

    rng.fill(&mut key).map_err(|_| {
        JwtError::KeyGenerationFailed("Failed to generate secure random key".to_string())
    })?;

    Ok(key)
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut key = String::new();

    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            // 随机数生成失败时退回固定开发密钥
            return "ComandaServerDevelopmentSecureKey2025!".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.chars().nth(idx).unwrap());
    }

    key
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<Vec<u8>, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret.into_bytes())
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "⚠️  JWT_SECRET not set! Generating secure temporary key for development."
                );
                let printable_key = generate_secure_printable_jwt_secret();
                Ok(printable_key.into_bytes())
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 随机密钥创建服务，测试用
    pub fn new_with_secure_key() -> Result<Self, JwtError> {
        let secret = generate_secure_printable_jwt_secret();
        let config = JwtConfig {
            secret,
            ..Default::default()
        };
        Ok(Self::with_config(config))
    }

    /// 为员工生成令牌
    pub fn generate_staff_token(
        &self,
        user_id: &str,
        username: &str,
        display_name: &str,
        role: &str,
        permissions: &[String],
    ) -> Result<String, JwtError> {
        self.generate(
            user_id,
            username,
            display_name,
            KIND_STAFF,
            role,
            permissions,
            self.config.staff_audience.clone(),
        )
    }

    /// 为顾客生成令牌，顾客没有权限列表
    pub fn generate_customer_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
    ) -> Result<String, JwtError> {
        self.generate(
            user_id,
            email,
            name,
            KIND_CUSTOMER,
            "customer",
            &[],
            self.config.customer_audience.clone(),
        )
    }

    fn generate(
        &self,
        user_id: &str,
        username: &str,
        display_name: &str,
        kind: &str,
        role: &str,
        permissions: &[String],
        audience: String,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            kind: kind.to_string(),
            role: role.to_string(),
            permissions: permissions.join(","),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: audience,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌，两类受众都接受，身份类别由 kind 区分
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[
            &self.config.staff_audience,
            &self.config.customer_audience,
        ]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求处理函数
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户 ID
    pub id: String,
    /// 员工为用户名，顾客为邮箱
    pub username: String,
    /// 展示名
    pub display_name: String,
    /// 身份类别: staff / customer
    pub kind: String,
    /// 角色名称
    pub role: String,
    /// 权限列表
    pub permissions: Vec<String>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        let permissions = if claims.permissions.is_empty() {
            vec![]
        } else {
            claims
                .permissions
                .split(',')
                .map(|s| s.to_string())
                .collect()
        };

        Self {
            id: claims.sub,
            username: claims.username,
            display_name: claims.display_name,
            kind: claims.kind,
            role: claims.role,
            permissions,
        }
    }
}

impl CurrentUser {
    pub fn is_staff(&self) -> bool {
        self.kind == KIND_STAFF
    }

    pub fn is_customer(&self) -> bool {
        self.kind == KIND_CUSTOMER
    }

    /// 是否管理员
    ///
    /// 管理员角色 (`role == "admin"`) 拥有所有权限
    pub fn is_admin(&self) -> bool {
        self.is_staff() && self.role == "admin"
    }

    /// 检查是否拥有指定权限
    ///
    /// 支持通配符匹配：
    /// - `"orders:*"` 匹配 `"orders:read"`, `"orders:manage"` 等
    /// - `"all"` 表示拥有所有权限
    ///
    /// 顾客令牌没有权限列表，一律不通过
    pub fn has_permission(&self, permission: &str) -> bool {
        if !self.is_staff() {
            return false;
        }

        if self.is_admin() {
            return true;
        }

        if self.permissions.contains(&"all".to_string()) {
            return true;
        }

        self.permissions.iter().any(|p| {
            if p == permission {
                return true;
            }
            // 通配符模式，如 "orders:*" 匹配 "orders:read"
            if let Some(prefix) = p.strip_suffix(":*") {
                permission.starts_with(&format!("{}:", prefix))
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_token_roundtrip() {
        let service = JwtService::new_with_secure_key().unwrap();
        let permissions = vec!["orders:read".to_string(), "orders:manage".to_string()];

        let token = service
            .generate_staff_token("staff_user:1", "chef.arjun", "Arjun", "chef", &permissions)
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "staff_user:1");
        assert_eq!(claims.kind, KIND_STAFF);
        assert_eq!(claims.role, "chef");
        assert_eq!(claims.permissions, "orders:read,orders:manage");
        assert_eq!(claims.aud, service.config.staff_audience);
    }

    #[test]
    fn test_customer_token_has_no_permissions() {
        let service = JwtService::new_with_secure_key().unwrap();
        let token = service
            .generate_customer_token("customer:9", "meera@example.com", "Meera")
            .unwrap();
        let user: CurrentUser = service.validate_token(&token).unwrap().into();

        assert!(user.is_customer());
        assert!(!user.has_permission("orders:read"));
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn test_tokens_rejected_across_services() {
        let service_a = JwtService::new_with_secure_key().unwrap();
        let service_b = JwtService::new_with_secure_key().unwrap();
        let token = service_a
            .generate_staff_token("staff_user:1", "admin", "Admin", "admin", &[])
            .unwrap();
        assert!(service_b.validate_token(&token).is_err());
    }

    #[test]
    fn test_wildcard_permission_match() {
        let user = CurrentUser {
            id: "1".to_string(),
            username: "asha".to_string(),
            display_name: "Asha".to_string(),
            kind: KIND_STAFF.to_string(),
            role: "waiter".to_string(),
            permissions: vec!["orders:*".to_string()],
        };

        assert!(user.has_permission("orders:read"));
        assert!(user.has_permission("orders:manage"));
        assert!(!user.has_permission("inventory:read"));
    }

    #[test]
    fn test_admin_has_all_permissions() {
        let admin = CurrentUser {
            id: "1".to_string(),
            username: "admin".to_string(),
            display_name: "Admin".to_string(),
            kind: KIND_STAFF.to_string(),
            role: "admin".to_string(),
            permissions: vec![],
        };

        assert!(admin.has_permission("orders:read"));
        assert!(admin.has_permission("feedback:read"));
        assert!(admin.is_admin());
    }
}
