//! 认证模块
//!
//! JWT 令牌服务、认证中间件和管理员授权守卫。

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtService};
pub use middleware::{authorize_admin, require_admin_profile, require_auth};
