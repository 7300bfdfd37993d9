use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{self, DbService};
use crate::services::QuoteStorage;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | jwt_service | JWT 认证服务 |
/// | quotes | 报价文档存储 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub quotes: QuoteStorage,
}

impl ServerState {
    /// 手动构造 (测试场景会传入内存数据库连接池)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let quotes = QuoteStorage::new(config.work_dir.clone());
        Self {
            config,
            pool,
            jwt_service,
            quotes,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 确保工作目录结构存在
    /// 2. 打开数据库并应用迁移
    /// 3. 首次启动时播种默认管理员
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        db::ensure_default_admin(
            &db_service.pool,
            &config.default_admin_email,
            &config.default_admin_password,
        )
        .await?;

        Ok(Self::new(config.clone(), db_service.pool))
    }
}
