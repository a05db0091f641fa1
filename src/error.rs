// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types and their process exit codes.

use crate::config::ConfigError;
use std::fmt;

/// What went wrong underneath an auth or API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection failure or timeout
    Network,
    /// Non-2xx HTTP status
    Status(u16),
    /// Body did not match the expected shape
    Parse,
}

impl FailureKind {
    /// Classify a reqwest error raised while sending or reading a response.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::Parse => f.write_str("parse"),
        }
    }
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Token refresh failed ({kind}): {message}")]
    Auth { kind: FailureKind, message: String },

    #[error("Strava API error in {stage} ({kind}): {message}")]
    Api {
        stage: &'static str,
        kind: FailureKind,
        message: String,
    },

    #[error("Credential not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Malformed token file: {0}")]
    Parse(String),

    #[error("Dashboard output failed: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const STRAVA_RATE_LIMIT: &'static str = "Strava rate limit exceeded";
    pub const STRAVA_TOKEN_ERROR: &'static str = "Strava token rejected";

    /// The failure kind behind an auth or API error, if any.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Auth { kind, .. } | Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True when Strava rejected the credentials, at the token endpoint
    /// or on any data call.
    pub fn is_strava_token_error(&self) -> bool {
        match self {
            Self::Auth {
                kind: FailureKind::Status(_),
                ..
            } => true,
            Self::Api {
                kind: FailureKind::Status(401),
                ..
            } => true,
            _ => false,
        }
    }

    /// Process exit status for this error.
    ///
    /// | category | code |
    /// |---|---|
    /// | network / timeout | 1 |
    /// | API HTTP status | 2 |
    /// | auth rejected | 3 |
    /// | malformed response | 4 |
    /// | no credential | 5 |
    /// | config | 6 |
    /// | storage | 7 |
    /// | render/display | 8 |
    pub fn exit_code(&self) -> u8 {
        if self.is_strava_token_error() {
            return 3;
        }
        match self {
            Self::Auth { kind, .. } | Self::Api { kind, .. } => match kind {
                FailureKind::Network => 1,
                FailureKind::Status(_) => 2,
                FailureKind::Parse => 4,
            },
            Self::Parse(_) => 4,
            Self::NotFound(_) => 5,
            Self::Config(_) => 6,
            Self::Storage(_) => 7,
            Self::Internal(_) => 8,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
