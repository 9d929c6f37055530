use academy_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env 和配置
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    // 2. 日志
    setup_environment(&config);
    tracing::info!("Course Academy starting (env: {})", config.environment);

    // 3. 启动 HTTP 服务器 (数据库在 run 中初始化)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
