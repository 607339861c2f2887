use std::net::{Ipv4Addr, SocketAddr};

/// `DATABASE_URL` value that selects the process-local store
pub const IN_MEMORY_STORE: &str = "memory";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: Ipv4Addr,
    pub port: u16,
    pub allow_email_update: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not in the correct format: {value:?}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    /// Read settings from the process environment. Call `dotenvy::dotenv()` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://roster.db?mode=rwc".to_string());

        let host: Ipv4Addr = parse_or(&lookup, "HOST", Ipv4Addr::LOCALHOST, |v| v.parse().ok())?;
        let port: u16 = parse_or(&lookup, "PORT", 8080, |v| v.parse().ok())?;
        let allow_email_update = parse_or(&lookup, "ALLOW_EMAIL_UPDATE", false, parse_flag)?;

        Ok(Config {
            database_url,
            host,
            port,
            allow_email_update,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.database_url == IN_MEMORY_STORE
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => parse(value.trim()).ok_or(ConfigError::Invalid { name, value }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
