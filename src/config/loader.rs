//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// JWT 签名密钥最短长度（字节）
const MIN_JWT_SECRET_LEN: usize = 16;

/// Token 有效期上限：30 天
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 3600;

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `LIBRIS_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `LIBRIS_SERVER__PORT=8080`
/// - `LIBRIS_DATABASE__PATH=/data/libris.db`
/// - `LIBRIS_AUTH__JWT_SECRET=...`
/// - `LIBRIS_AUTH__ADMIN_USERNAME=admin`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.path", "data/libris.db")?
        .set_default("database.max_connections", 5)?
        .set_default("auth.token_ttl_secs", 86400)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: LIBRIS_AUTH__TOKEN_TTL_SECS=3600
    builder = builder.add_source(
        Environment::with_prefix("LIBRIS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max_connections must be at least 1".to_string(),
        ));
    }

    if config.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
        return Err(ConfigError::ValidationError(format!(
            "auth.jwt_secret must be at least {} bytes",
            MIN_JWT_SECRET_LEN
        )));
    }

    if config.auth.token_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "auth.token_ttl_secs cannot be 0".to_string(),
        ));
    }
    if config.auth.token_ttl_secs > MAX_TOKEN_TTL_SECS {
        return Err(ConfigError::ValidationError(format!(
            "auth.token_ttl_secs must be at most {}",
            MAX_TOKEN_TTL_SECS
        )));
    }

    if config.auth.admin_username.is_some() != config.auth.admin_password.is_some() {
        return Err(ConfigError::ValidationError(
            "auth.admin_username and auth.admin_password must be set together".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出任何密钥
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Token TTL: {}s", config.auth.token_ttl_secs);
    tracing::info!(
        "Password Secret: {}",
        if config.auth.password_secret.is_empty() {
            "<none>"
        } else {
            "<set>"
        }
    );
    if let Some(username) = &config.auth.admin_username {
        tracing::info!("Bootstrap Admin: {}", username);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("Log JSON: {}", config.log.json);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "0123456789abcdef".to_string();
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_error_for_default_config() {
        // 默认配置没有 jwt_secret
        assert!(validate_config(&AppConfig::default()).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = valid_config();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_connections() {
        let mut config = valid_config();
        config.database.max_connections = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_short_secret() {
        let mut config = valid_config();
        config.auth.jwt_secret = "short".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_bounds_token_ttl() {
        let mut config = valid_config();
        config.auth.token_ttl_secs = MAX_TOKEN_TTL_SECS;
        assert!(validate_config(&config).is_ok());

        config.auth.token_ttl_secs = MAX_TOKEN_TTL_SECS + 1;
        assert!(validate_config(&config).is_err());

        config.auth.token_ttl_secs = u64::MAX;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_half_admin() {
        let mut config = valid_config();
        config.auth.admin_username = Some("admin".to_string());
        assert!(validate_config(&config).is_err());

        config.auth.admin_password = Some("Paswd123".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("libris.toml");
        fs::write(
            &path,
            r#"
            [server]
            port = 9090

            [auth]
            jwt_secret = "file-secret-0123456789"
            token_ttl_secs = 600
            "#,
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.token_ttl_secs, 600);
        assert_eq!(config.database.path, "data/libris.db");
    }

    #[test]
    fn test_missing_required_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            load_config_from_path(Some(&path)),
            Err(ConfigError::LoadError(_))
        ));
    }
}
