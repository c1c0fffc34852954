use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://portfolio.db";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub max_pool_size: u32,
    /// HMAC key for the session and flash cookies. `None` means a random
    /// key is generated at startup.
    pub session_secret: Option<String>,
    pub session_expiration_hours: i64,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_host: var("SERVER_HOST", "0.0.0.0"),
            server_port: var("SERVER_PORT", "8080")
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            max_pool_size: var("MAX_POOL_SIZE", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("MAX_POOL_SIZE"))?,
            session_secret: lookup("SESSION_SECRET").filter(|s| !s.is_empty()),
            session_expiration_hours: var("SESSION_EXPIRATION_HOURS", "24")
                .parse()
                .ok()
                .filter(|hours: &i64| *hours > 0)
                .ok_or(ConfigError::InvalidNumber("SESSION_EXPIRATION_HOURS"))?,
            cookie_secure: parse_bool(&var("COOKIE_SECURE", "false"))
                .ok_or(ConfigError::InvalidBool("COOKIE_SECURE"))?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("{0} must be a positive number")]
    InvalidNumber(&'static str),
    #[error("{0} must be a boolean")]
    InvalidBool(&'static str),
}
