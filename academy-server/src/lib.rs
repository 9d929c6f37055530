//! Course Academy Server - 课程学院 REST 后端
//!
//! # 架构概述
//!
//! 每个请求都经过同样的三层：
//!
//! - **HTTP API** (`api`): 路由、请求校验、状态码
//! - **领域服务** (`services`): 外键解析、唯一性检查、事务边界
//! - **数据库** (`db`): SQLite 连接池、迁移、每个实体一个 repository
//!
//! # 模块结构
//!
//! ```text
//! academy-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 领域服务
//! ├── db/            # 数据库层
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志初始化
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Initialize logging from the loaded configuration (JSON output in production)
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );
}
