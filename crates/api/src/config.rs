//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `SEMESTER_START_DATE`: First day of the semester, `YYYY-MM-DD` (required)
//! - `SEMESTER_END_DATE`: Last day of the semester, `YYYY-MM-DD` (required)

use std::env;

use chrono::NaiveDate;
use eyre::{Result, WrapErr};
use timetable_core::SemesterCalendar;
use tracing::Level;

/// Configuration for the timetable API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub semester_start: NaiveDate,
    pub semester_end: NaiveDate,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` or a semester date is missing, when
    /// `API_PORT` is not a port number, or when a semester date is not
    /// `YYYY-MM-DD`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre::eyre!("DATABASE_URL environment variable must be set"))?;

        let log_level = parse_log_level(&lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()));

        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        let semester_start = parse_date(&lookup, "SEMESTER_START_DATE")?;
        let semester_end = parse_date(&lookup, "SEMESTER_END_DATE")?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            semester_start,
            semester_end,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn semester_calendar(&self) -> Result<SemesterCalendar> {
        SemesterCalendar::new(self.semester_start, self.semester_end)
            .wrap_err("Invalid semester configuration")
    }
}

fn parse_log_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn parse_date<F>(lookup: &F, key: &str) -> Result<NaiveDate>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or_else(|| eyre::eyre!("{} environment variable must be set", key))?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .wrap_err_with(|| format!("Invalid {} value: {}", key, raw))
}
