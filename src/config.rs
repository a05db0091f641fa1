//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs. The
//! resulting [`Config`] is passed explicitly to every component that needs it.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default Strava REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://www.strava.com/api/v3";
/// Default Strava OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// When to exchange the refresh token for a new access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Refresh on every run, regardless of the stored expiry.
    #[default]
    Always,
    /// Refresh only once the stored access token has expired.
    WhenExpired,
}

impl FromStr for RefreshPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "when-expired" | "when_expired" => Ok(Self::WhenExpired),
            other => Err(ConfigError::Invalid("STRAVA_REFRESH_POLICY", other.to_string())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid("LOG_FORMAT", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Strava OAuth application ---
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Refresh token used when no token file exists yet
    pub bootstrap_refresh_token: Option<String>,

    // --- Endpoints ---
    pub api_base_url: String,
    pub token_url: String,

    // --- Behavior ---
    /// Path of the persisted credential JSON
    pub token_file: PathBuf,
    /// Bound on each individual HTTP request
    pub request_timeout: Duration,
    pub refresh_policy: RefreshPolicy,
    /// `per_page` sent with the activity list request
    pub activities_per_page: u32,

    // --- Output ---
    /// Where the rendered dashboard goes; stdout when unset
    pub dashboard_output: Option<PathBuf>,
    /// Directory of background images for the frame; none when unset
    pub background_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            bootstrap_refresh_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            token_file: PathBuf::from(crate::db::DEFAULT_TOKEN_FILE),
            request_timeout: Duration::from_secs(5),
            refresh_policy: RefreshPolicy::Always,
            activities_per_page: 200,
            dashboard_output: None,
            background_dir: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let request_timeout = match get("STRAVA_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: f64 = raw
                    .parse()
                    .map_err(|_| ConfigError::Invalid("STRAVA_TIMEOUT_SECS", raw.clone()))?;
                if secs <= 0.0 {
                    return Err(ConfigError::Invalid("STRAVA_TIMEOUT_SECS", raw));
                }
                Duration::try_from_secs_f64(secs)
                    .map_err(|_| ConfigError::Invalid("STRAVA_TIMEOUT_SECS", raw.clone()))?
            }
            None => Duration::from_secs(5),
        };

        let activities_per_page = match get("STRAVA_ACTIVITIES_PER_PAGE") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid("STRAVA_ACTIVITIES_PER_PAGE", raw)),
            },
            None => 200,
        };

        Ok(Self {
            strava_client_id: get("STRAVA_CLIENT_ID")
                .ok_or(ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: get("STRAVA_CLIENT_SECRET")
                .ok_or(ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            bootstrap_refresh_token: get("STRAVA_REFRESH_TOKEN"),
            api_base_url: get("STRAVA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            token_url: get("STRAVA_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            token_file: get("STRAVA_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(crate::db::DEFAULT_TOKEN_FILE)),
            request_timeout,
            refresh_policy: get("STRAVA_REFRESH_POLICY")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
            activities_per_page,
            dashboard_output: get("DASHBOARD_OUTPUT").map(PathBuf::from),
            background_dir: get("DASHBOARD_BACKGROUND_DIR").map(PathBuf::from),
            log_format: get("LOG_FORMAT")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
