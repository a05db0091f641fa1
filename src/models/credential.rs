// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OAuth credential persisted between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Strava OAuth tokens as returned by the token endpoint.
///
/// Any other fields in the token response (`token_type`, `expires_in`, ...)
/// are kept in `extra` so the persisted file round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Access token expiry (Unix epoch seconds)
    pub expires_at: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Credential {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
            extra: serde_json::Map::new(),
        }
    }

    /// Expiry as a UTC timestamp.
    pub fn expires_at_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.expires_at, 0).unwrap_or_default()
    }

    /// True once `now` has reached the expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_token_response_keeps_extra_fields() {
        let json = r#"{
            "token_type": "Bearer",
            "access_token": "a9b723",
            "expires_at": 1568775134,
            "expires_in": 20566,
            "refresh_token": "b5c569"
        }"#;

        let credential: Credential = serde_json::from_str(json).unwrap();

        assert_eq!(credential.access_token, "a9b723");
        assert_eq!(credential.refresh_token, "b5c569");
        assert_eq!(credential.expires_at, 1568775134);
        assert_eq!(credential.extra["token_type"], "Bearer");
        assert_eq!(credential.extra["expires_in"], 20566);

        let out = serde_json::to_value(&credential).unwrap();
        assert_eq!(out["token_type"], "Bearer");
        assert_eq!(out["expires_at"], 1568775134);
    }

    #[test]
    fn test_missing_refresh_token_is_rejected() {
        let json = r#"{"access_token": "a", "expires_at": 1}"#;
        assert!(serde_json::from_str::<Credential>(json).is_err());
    }

    #[test]
    fn test_is_expired_boundary() {
        let credential = Credential::new("a", "r", 1_700_000_000);
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        assert!(!credential.is_expired(at - chrono::Duration::seconds(1)));
        assert!(credential.is_expired(at));
        assert!(credential.is_expired(at + chrono::Duration::seconds(1)));
    }
}
