/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖（启动时先加载 `.env`）：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | sqlite:course_academy.db | SQLite 连接串 |
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | (未设置) | 日志目录，未设置时输出到 stdout |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/academy.db HTTP_PORT=9000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (`sqlite::memory:` for a throwaway database)
    pub database_url: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// Pool size for file databases
    pub db_max_connections: u32,
    /// Default log level when RUST_LOG is unset
    pub log_level: String,
    /// Daily-rolling log files go here when set
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:course_academy.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30_000),
        }
    }

    /// Configuration for tests: in-memory database, ephemeral port
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            db_max_connections: 1,
            log_level: "debug".into(),
            log_dir: None,
            environment: "test".into(),
            request_timeout_ms: 30_000,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
