use chapel_core::live_stream::{BroadcastWindow, DEFAULT_PLAYBACK_BASE};
use chrono::Weekday;

use crate::auth::jwt::JwtConfig;

/// Which repository implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local store preloaded with sample content.
    Memory,
}

impl DataBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Weekly broadcast window and playback endpoint for the live stream.
#[derive(Debug, Clone)]
pub struct LiveStreamConfig {
    pub window: BroadcastWindow,
    /// HLS base URL; the manifest is `{playback_base}/{stream_id}.m3u8`.
    pub playback_base: String,
}

impl Default for LiveStreamConfig {
    fn default() -> Self {
        Self {
            window: BroadcastWindow::default(),
            playback_base: DEFAULT_PLAYBACK_BASE.to_string(),
        }
    }
}

impl LiveStreamConfig {
    /// Load the broadcast window from environment variables.
    ///
    /// | Env Var                          | Default                  |
    /// |----------------------------------|--------------------------|
    /// | `LIVE_STREAM_WEEKDAY`            | `sun`                    |
    /// | `LIVE_STREAM_START_HOUR`         | `9`                      |
    /// | `LIVE_STREAM_END_HOUR`           | `12`                     |
    /// | `LIVE_STREAM_UTC_OFFSET_MINUTES` | `0`                      |
    /// | `LIVE_STREAM_PLAYBACK_BASE`      | `https://stream.mux.com` |
    pub fn from_env() -> Self {
        let weekday: Weekday = std::env::var("LIVE_STREAM_WEEKDAY")
            .unwrap_or_else(|_| "sun".into())
            .parse()
            .expect("LIVE_STREAM_WEEKDAY must be a weekday name");

        let start_hour: u32 = std::env::var("LIVE_STREAM_START_HOUR")
            .unwrap_or_else(|_| "9".into())
            .parse()
            .expect("LIVE_STREAM_START_HOUR must be a valid u32");

        let end_hour: u32 = std::env::var("LIVE_STREAM_END_HOUR")
            .unwrap_or_else(|_| "12".into())
            .parse()
            .expect("LIVE_STREAM_END_HOUR must be a valid u32");

        let offset_minutes: i32 = std::env::var("LIVE_STREAM_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("LIVE_STREAM_UTC_OFFSET_MINUTES must be a valid i32");

        let window = BroadcastWindow::new(weekday, start_hour, end_hour, offset_minutes)
            .unwrap_or_else(|e| panic!("Invalid live stream window: {e}"));

        let playback_base = std::env::var("LIVE_STREAM_PLAYBACK_BASE")
            .unwrap_or_else(|_| DEFAULT_PLAYBACK_BASE.into());

        Self {
            window,
            playback_base,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the token secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub data_backend: DataBackend,
    /// Bearer-token verification settings.
    pub jwt: JwtConfig,
    pub live_stream: LiveStreamConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATA_BACKEND`         | `postgres`                 |
    ///
    /// See [`JwtConfig::from_env`] and [`LiveStreamConfig::from_env`] for the
    /// remaining variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend_raw = std::env::var("DATA_BACKEND").unwrap_or_else(|_| "postgres".into());
        let data_backend = DataBackend::parse(&backend_raw)
            .unwrap_or_else(|| panic!("DATA_BACKEND must be 'postgres' or 'memory', got '{backend_raw}'"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_backend,
            jwt: JwtConfig::from_env(),
            live_stream: LiveStreamConfig::from_env(),
        }
    }
}
