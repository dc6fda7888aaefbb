use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Every backend is optional: with nothing set the service runs in
/// offline demo mode (in-memory store, single local account, AI
/// features disabled). Presence of a variable selects the backend once,
/// at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres DSN; absent selects the in-memory store.
    pub database_url: Option<String>,
    /// Base URL of the auth provider; absent selects single-user mode.
    pub auth_url: Option<String>,
    pub auth_anon_key: Option<String>,
    /// Gemini key; absent disables polish and sync.
    pub gemini_api_key: Option<String>,
    /// Username the anonymous home route resolves before falling back
    /// to the demo bundle.
    pub default_username: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            auth_url: optional_env("AUTH_URL"),
            auth_anon_key: optional_env("AUTH_ANON_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            default_username: std::env::var("DEFAULT_USERNAME")
                .unwrap_or_else(|_| "next-folio".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
