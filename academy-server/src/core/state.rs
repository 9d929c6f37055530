use crate::core::Config;
use crate::db::DbService;
use crate::services::{
    AuthorService, CourseService, ModuleService, PurchasedCourseService, StudentService,
};
use shared::error::AppError;

/// 服务器状态 - 持有所有服务的单例引用
///
/// Built once at startup and cloned into every handler by axum. Every field
/// is a cheap handle around the same connection pool.
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池 |
/// | authors / courses / modules / students / purchases | 领域服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub authors: AuthorService,
    pub courses: CourseService,
    pub modules: ModuleService,
    pub students: StudentService,
    pub purchases: PurchasedCourseService,
}

impl ServerState {
    /// Open the database and construct every service
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    pub fn with_db(config: Config, db: DbService) -> Self {
        let pool = db.pool.clone();
        Self {
            authors: AuthorService::new(pool.clone()),
            courses: CourseService::new(pool.clone()),
            modules: ModuleService::new(pool.clone()),
            students: StudentService::new(pool.clone()),
            purchases: PurchasedCourseService::new(pool),
            config,
            db,
        }
    }
}
