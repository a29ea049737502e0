use std::env;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

pub mod cors;

pub use cors::create_cors_layer;

const DEFAULT_DATABASE_PATH: &str = "database/agenda.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Comma separated list; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origins: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Config: Invalid PORT '{}': {}, using {}", raw, e, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => defaults.port,
        };

        Self {
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").ok(),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("database/agenda.db"));
        assert_eq!(config.port, 5000);
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");

        let bad = Config {
            host: "not-an-ip".to_string(),
            ..Config::default()
        };
        assert!(bad.socket_addr().is_err());
    }
}
