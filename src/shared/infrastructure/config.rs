use crate::shared::errors::AppError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_QUEUE_NAME: &str = "book_info_queue";

/// Application settings, read once from the environment at startup.
///
/// `.env` files are honoured through `dotenvy`. Only `DATABASE_URL` is
/// mandatory; every other setting has a development default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub queue_name: String,
    pub server_host: String,
    pub server_port: u16,
    pub storage_root: PathBuf,
    pub storage_public_base_url: String,
    pub worker_poll_interval: Duration,
    pub scraper_requests_per_second: f64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| {
            AppError::ConfigError("DATABASE_URL environment variable not found".to_string())
        })?;

        let redis_url = env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty());

        Ok(Self {
            database_url,
            redis_url,
            queue_name: env_or("BOOK_QUEUE_NAME", DEFAULT_QUEUE_NAME),
            server_host: env_or("SERVER_HOST", "0.0.0.0"),
            server_port: parse_env("SERVER_PORT", 8012)?,
            storage_root: PathBuf::from(env_or("STORAGE_ROOT", "./media_storage")),
            storage_public_base_url: env_or(
                "STORAGE_PUBLIC_BASE_URL",
                "http://localhost:8012/media",
            )
            .trim_end_matches('/')
            .to_string(),
            worker_poll_interval: Duration::from_secs(parse_env("WORKER_POLL_INTERVAL_SECS", 5)?),
            scraper_requests_per_second: parse_env("SCRAPER_REQUESTS_PER_SECOND", 1.0)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::ConfigError(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_to_default() {
        let value: u16 = parse_env("LMS_TEST_UNSET_PORT_VARIABLE", 8012).unwrap();
        assert_eq!(value, 8012);
    }

    #[test]
    fn parse_env_rejects_garbage() {
        env::set_var("LMS_TEST_BAD_PORT_VARIABLE", "not-a-port");
        let result: Result<u16, _> = parse_env("LMS_TEST_BAD_PORT_VARIABLE", 8012);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
        env::remove_var("LMS_TEST_BAD_PORT_VARIABLE");
    }
}
