// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token lifecycle: load the stored credential, refresh it with
//! Strava, and persist the replacement.

use crate::config::{Config, RefreshPolicy};
use crate::db::TokenStore;
use crate::error::{AppError, Result};
use crate::models::Credential;
use crate::services::strava::StravaClient;
use chrono::{DateTime, Utc};

/// Exchanges refresh tokens and keeps the [`TokenStore`] current.
pub struct TokenRefresher<S> {
    client: StravaClient,
    store: S,
    /// Used when the store has no credential yet (first run).
    bootstrap_refresh_token: Option<String>,
}

impl<S: TokenStore> TokenRefresher<S> {
    pub fn new(client: StravaClient, store: S, config: &Config) -> Self {
        Self {
            client,
            store,
            bootstrap_refresh_token: config.bootstrap_refresh_token.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Exchange `refresh_token` for a new credential and persist it.
    ///
    /// The store is only written when the exchange succeeds.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential> {
        tracing::info!("Refreshing Strava access token");

        let credential = self.client.refresh_token(refresh_token).await.map_err(|e| {
            tracing::error!(error = %e, "Token refresh failed");
            e
        })?;

        self.store.save(&credential)?;

        tracing::info!(
            expires_at = %credential.expires_at_utc(),
            "Token refreshed and saved"
        );
        Ok(credential)
    }

    /// Return a credential usable for API calls at `now`.
    pub async fn ensure_fresh(
        &self,
        policy: RefreshPolicy,
        now: DateTime<Utc>,
    ) -> Result<Credential> {
        let (stored, refresh_token) = match self.store.load() {
            Ok(credential) => {
                let token = credential.refresh_token.clone();
                (Some(credential), token)
            }
            Err(AppError::NotFound(msg)) => match &self.bootstrap_refresh_token {
                Some(token) => {
                    tracing::info!("No stored credential, using configured refresh token");
                    (None, token.clone())
                }
                None => {
                    return Err(AppError::NotFound(format!(
                        "{} and STRAVA_REFRESH_TOKEN is not set",
                        msg
                    )))
                }
            },
            Err(e) => return Err(e),
        };

        if policy == RefreshPolicy::WhenExpired {
            if let Some(credential) = stored {
                if !credential.is_expired(now) {
                    tracing::info!(
                        expires_at = %credential.expires_at_utc(),
                        "Stored access token still valid, skipping refresh"
                    );
                    return Ok(credential);
                }
            }
        }

        self.refresh(&refresh_token).await
    }
}
