use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_ID: &str = "default_user";

/// Client configuration loaded from environment variables.
/// Every variable has a default, so a bare environment talks to a local backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub user_id: String,
    pub download_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_base_url(&api_url)
            .with_context(|| format!("API_URL '{api_url}' must be an http(s) URL"))?;

        Ok(Config {
            api_url,
            user_id: lookup("USER_ID")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            download_dir: lookup("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Trims whitespace and trailing slashes so paths can be appended verbatim.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        anyhow::bail!("unsupported scheme in '{trimmed}'");
    }
    Ok(trimmed.to_string())
}
