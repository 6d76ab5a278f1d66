//! 认证与授权
//!
//! JWT 令牌 + 角色权限。员工与顾客是两套独立身份空间，
//! 令牌受众不同，顾客令牌不带任何员工权限。

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, KIND_CUSTOMER, KIND_STAFF};
pub use middleware::{require_admin, require_auth, require_permission};
