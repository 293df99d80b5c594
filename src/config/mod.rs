use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub table_prefix: String,
    /// Hex-encoded SHA-256 digest of the admin bearer token.
    pub admin_token_sha256: String,
    pub fail_closed: bool,
    pub auto_install: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            table_prefix: env::var("TABLE_PREFIX").unwrap_or_else(|_| "tb_".to_string()),
            admin_token_sha256: env::var("ADMIN_TOKEN_SHA256")?.trim().to_ascii_lowercase(),
            fail_closed: parse_flag(env::var("FILTER_FAIL_CLOSED").ok()),
            auto_install: parse_flag(env::var("AUTO_INSTALL").ok()),
        })
    }
}

/// Interpret an optional environment flag; anything but a truthy word is false.
fn parse_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
