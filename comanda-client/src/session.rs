//! 顾客登录会话 - 令牌与用户缓存
//!
//! 顾客令牌对客户端不透明，只偷看 `exp` 声明（不验签）。
//! 过期的会话直接当未登录处理，由调用方引导重新登录。

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use shared::intent::keys;
use shared::{LoginResponse, UserInfo};

use crate::store::{LocalStore, StoreError};

/// 从 JWT token 中解析过期时间 (Unix seconds)
pub fn parse_jwt_exp(token: &str) -> Option<u64> {
    // JWT 格式: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    // 解码 payload (base64url)
    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload_str = String::from_utf8(payload_bytes).ok()?;

    // 解析 JSON 提取 exp 字段
    let payload: serde_json::Value = serde_json::from_str(&payload_str).ok()?;
    payload.get("exp")?.as_u64()
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// 会话存取挂在 [`LocalStore`] 上，用 `customerToken` / `customerUser` 两个键
impl LocalStore {
    /// 登录成功后缓存令牌与用户
    pub fn save_login(&mut self, login: &LoginResponse) -> Result<(), StoreError> {
        self.set(keys::CUSTOMER_TOKEN, &login.token)?;
        self.set(keys::CUSTOMER_USER, &login.user)?;
        tracing::info!(username = %login.user.username, "Customer session cached");
        Ok(())
    }

    /// 缓存的顾客令牌；过期的当不存在。没有 `exp` 声明的令牌不设限。
    pub fn customer_token(&self) -> Option<String> {
        let token: String = self.get(keys::CUSTOMER_TOKEN).ok().flatten()?;
        if let Some(expires_at) = parse_jwt_exp(&token) {
            if now_secs() >= expires_at {
                return None;
            }
        }
        Some(token)
    }

    /// 缓存的顾客资料
    pub fn customer_user(&self) -> Option<UserInfo> {
        self.get(keys::CUSTOMER_USER).ok().flatten()
    }

    /// 是否有未过期的登录态
    pub fn is_logged_in(&self) -> bool {
        self.customer_token().is_some()
    }

    /// 退出登录
    pub fn clear_login(&mut self) -> Result<(), StoreError> {
        self.remove(keys::CUSTOMER_TOKEN)?;
        self.remove(keys::CUSTOMER_USER)?;
        Ok(())
    }
}
