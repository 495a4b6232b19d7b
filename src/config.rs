/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, AUTH_PREFIX, LOGOUT_REDIRECT)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // mount point of the auth router, e.g. "/auth"
    pub auth_prefix: String,
    // where the default logout handler sends the browser
    pub logout_redirect: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let auth_prefix = parse_prefix(
            &std::env::var("AUTH_PREFIX").unwrap_or_else(|_| "/auth".to_string()),
        )?;

        let logout_redirect = std::env::var("LOGOUT_REDIRECT").unwrap_or_else(|_| "/".to_string());
        if logout_redirect.trim().is_empty() {
            return Err(ConfigError::Invalid("LOGOUT_REDIRECT"));
        }

        Ok(Self {
            addr,
            app_env,
            auth_prefix,
            logout_redirect,
        })
    }
}

fn parse_prefix(raw: &str) -> Result<String, ConfigError> {
    let prefix = raw.trim();
    if !prefix.starts_with('/') {
        return Err(ConfigError::Invalid("AUTH_PREFIX"));
    }
    Ok(prefix.to_string())
}
