use std::fmt;
use std::time::Duration;

use url::Url;

use crate::errors::{NewsError, NewsResult};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credential for the news endpoint, forwarded verbatim on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub base_url: Url,
    pub timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> NewsResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> NewsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("NEWS_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| NewsError::MissingEnvVar("NEWS_API_KEY".to_string()))?;

        let base_url = parse_base_url(
            &lookup("NEWS_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )?;

        let timeout_secs = match lookup("NEWS_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    NewsError::Config(format!(
                        "NEWS_API_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    ))
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: ApiKey::new(api_key),
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse the endpoint root. A trailing slash is added so that relative
/// joins keep any path prefix.
pub fn parse_base_url(raw: &str) -> NewsResult<Url> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&normalized)
        .map_err(|e| NewsError::Config(format!("Invalid NEWS_API_BASE_URL '{}': {}", raw, e)))
}
