//! Libris - 图书目录管理服务
//!
//! 启动顺序：配置 -> 日志 -> 数据库 -> 适配器 -> 服务 -> HTTP

use std::sync::Arc;

use libris::application::AdminBootstrap;
use libris::config::{load_config, print_config, AppConfig};
use libris::infrastructure::adapters::{Argon2PasswordHasher, JwtTokenService};
use libris::infrastructure::http::{AppState, HttpServer, ServerConfig};
use libris::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteAccountRepository,
    SqliteAuthorRepository, SqliteBookRepository, SqlitePersonRepository,
    SqlitePublisherRepository,
};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},libris={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Libris - library catalogue service");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let account_repo = Arc::new(SqliteAccountRepository::new(pool.clone()));
    let person_repo = Arc::new(SqlitePersonRepository::new(pool.clone()));
    let author_repo = Arc::new(SqliteAuthorRepository::new(pool.clone()));
    let publisher_repo = Arc::new(SqlitePublisherRepository::new(pool.clone()));
    let book_repo = Arc::new(SqliteBookRepository::new(pool));

    // 创建凭据适配器
    let hasher = Arc::new(Argon2PasswordHasher::new(
        config.auth.password_secret.clone(),
    )?);
    let tokens = Arc::new(JwtTokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_secs,
    ));

    let state = AppState::new(
        account_repo,
        person_repo,
        author_repo,
        publisher_repo,
        book_repo,
        hasher,
        tokens,
    );

    // 确保管理员账号存在
    if let Some((username, password)) = config.auth.admin_credentials() {
        match state.accounts.ensure_admin(username, password).await? {
            AdminBootstrap::Created(account) => {
                tracing::info!(account_id = account.id, username = %account.username, "Bootstrap admin created")
            }
            AdminBootstrap::Restored(account) => {
                tracing::info!(account_id = account.id, username = %account.username, "Bootstrap admin restored")
            }
            AdminBootstrap::Existing => {
                tracing::info!(username = %username, "Bootstrap admin already exists")
            }
        }
    }

    let server = HttpServer::new(ServerConfig::from(&config.server), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
