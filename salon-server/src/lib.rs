//! Salones - 宴会厅预订后台服务
//!
//! Back-office HTTP API for managing event-hall bookings: rooms and their
//! seating layouts, clients, add-on services, reservations with
//! database-enforced overlap rejection, a dashboard aggregator, budget
//! (quote) PDF export and admin user management.
//!
//! # Module structure
//!
//! ```text
//! salon-server/src/
//! ├── core/       # 配置、状态、HTTP 服务器
//! ├── auth/       # JWT 认证、管理员授权
//! ├── api/        # HTTP 路由和处理器
//! ├── db/         # SQLite 连接池、迁移、仓储层
//! ├── quotes/     # 预算金额计算和 PDF 渲染
//! ├── services/   # 报价文档的 blob 存储
//! └── utils/      # 错误、日志、校验、时间工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod quotes;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

/// Prepare the process environment: .env file and logging.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}

pub fn print_banner() {
    println!(
        r#"
   _____       __
  / ___/____ _/ /___  ____  ___  _____
  \__ \/ __ `/ / __ \/ __ \/ _ \/ ___/
 ___/ / /_/ / / /_/ / / / /  __(__  )
/____/\__,_/_/\____/_/ /_/\___/____/
        "#
    );
}
