// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Refresh-token exchange at the OAuth token endpoint
//! - Athlete profile and stats lookups
//! - Activity listing after a start timestamp
//!
//! Every call is a single attempt bounded by the configured timeout.

use crate::config::Config;
use crate::error::{AppError, FailureKind, Result};
use crate::models::{ActivityRecord, Athlete, AthleteStats, Credential};
use serde::de::DeserializeOwned;

/// Which call failed; used to build [`AppError::Auth`] or [`AppError::Api`].
#[derive(Debug, Clone, Copy)]
enum Stage {
    Token,
    Api(&'static str),
}

impl Stage {
    fn error(self, kind: FailureKind, message: String) -> AppError {
        match self {
            Stage::Token => AppError::Auth { kind, message },
            Stage::Api(stage) => AppError::Api {
                stage,
                kind,
                message,
            },
        }
    }
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a client from the application config.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
        })
    }

    /// Exchange a refresh token for a new credential.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Credential> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| {
                Stage::Token.error(
                    FailureKind::from_reqwest(&e),
                    format!("Token refresh request failed: {}", e),
                )
            })?;

        self.check_response_json(Stage::Token, response).await
    }

    /// Get authenticated athlete profile.
    pub async fn get_athlete(&self, access_token: &str) -> Result<Athlete> {
        let url = format!("{}/athlete", self.base_url);
        self.get_json(Stage::Api("athlete"), &url, access_token, &[])
            .await
    }

    /// Get the athlete's aggregate ride/run/swim totals.
    pub async fn get_athlete_stats(
        &self,
        athlete_id: u64,
        access_token: &str,
    ) -> Result<AthleteStats> {
        let url = format!("{}/athletes/{}/stats", self.base_url, athlete_id);
        self.get_json(Stage::Api("stats"), &url, access_token, &[])
            .await
    }

    /// List activities that started after `after` (single page).
    pub async fn list_activities(
        &self,
        access_token: &str,
        after: i64, // Unix timestamp
        per_page: u32,
    ) -> Result<Vec<ActivityRecord>> {
        let url = format!("{}/athlete/activities", self.base_url);
        let activities: Vec<ActivityRecord> = self
            .get_json(
                Stage::Api("activities"),
                &url,
                access_token,
                &[("after", after.to_string()), ("per_page", per_page.to_string())],
            )
            .await?;

        if activities.len() as u64 >= u64::from(per_page) {
            tracing::warn!(
                count = activities.len(),
                per_page,
                "Activity page is full, later activities may be missing"
            );
        }

        Ok(activities)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        stage: Stage,
        url: &str,
        access_token: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(url, "Strava GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| stage.error(FailureKind::from_reqwest(&e), e.to_string()))?;

        self.check_response_json(stage, response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        stage: Stage,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let kind = FailureKind::Status(status.as_u16());

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
                return Err(stage.error(kind, AppError::STRAVA_RATE_LIMIT.to_string()));
            }

            if status.as_u16() == 401 {
                return Err(stage.error(
                    kind,
                    format!("{}: {}", AppError::STRAVA_TOKEN_ERROR, body),
                ));
            }

            return Err(stage.error(kind, format!("HTTP {}: {}", status, body)));
        }

        // Body read failures are network errors; only decoding is a parse error.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| stage.error(FailureKind::from_reqwest(&e), e.to_string()))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| stage.error(FailureKind::Parse, format!("JSON parse error: {}", e)))
    }
}
