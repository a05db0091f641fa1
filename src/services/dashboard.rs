// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard refresh workflow.
//!
//! Runs once per invocation, strictly in order:
//! 1. Refresh (or reuse) the access token
//! 2. Fetch athlete profile
//! 3. Fetch athlete stats
//! 4. Fetch this month's activities
//! 5. Compute metrics
//! 6. Render and display
//!
//! The first failure aborts the run; nothing is displayed in that case.

use crate::config::{Config, RefreshPolicy};
use crate::db::TokenStore;
use crate::error::Result;
use crate::render::{DashboardData, DashboardRenderer, DisplayDriver};
use crate::services::metrics;
use crate::services::strava::StravaClient;
use crate::services::token::TokenRefresher;
use crate::time_utils::first_of_month;
use chrono::{DateTime, Local, Utc};

/// One-shot fetch-and-compute pipeline.
pub struct DashboardPipeline<S> {
    client: StravaClient,
    tokens: TokenRefresher<S>,
    refresh_policy: RefreshPolicy,
    activities_per_page: u32,
}

impl<S: TokenStore> DashboardPipeline<S> {
    pub fn new(config: &Config, store: S) -> Result<Self> {
        let client = StravaClient::new(config)?;
        Ok(Self {
            tokens: TokenRefresher::new(client.clone(), store, config),
            client,
            refresh_policy: config.refresh_policy,
            activities_per_page: config.activities_per_page,
        })
    }

    pub fn store(&self) -> &S {
        self.tokens.store()
    }

    /// Fetch everything and compute the dashboard numbers as of `now`.
    pub async fn collect(&self, now: DateTime<Local>) -> Result<DashboardData> {
        let credential = self
            .tokens
            .ensure_fresh(self.refresh_policy, now.with_timezone(&Utc))
            .await?;
        let access_token = credential.access_token.as_str();

        let athlete = self.client.get_athlete(access_token).await?;
        tracing::info!(
            athlete_id = athlete.id,
            name = %athlete.display_name(),
            "Retrieving data for athlete"
        );

        let stats = self
            .client
            .get_athlete_stats(athlete.id, access_token)
            .await?;
        tracing::debug!(
            ytd_ride_meters = stats.ytd_ride_distance_meters(),
            biggest_ride_meters = stats.biggest_ride_distance_meters(),
            "Athlete stats"
        );

        let after = first_of_month(&now);
        tracing::info!(after = %after, "Retrieving activities");
        let activities = self
            .client
            .list_activities(access_token, after.timestamp(), self.activities_per_page)
            .await?;
        tracing::info!(count = activities.len(), "Activities retrieved");

        let metrics = metrics::compute(&stats, &activities, now.date_naive());

        Ok(DashboardData {
            athlete_name: athlete.display_name(),
            metrics,
            generated_at: now,
        })
    }

    /// Full run: collect, render, display.
    pub async fn run<R, D>(
        &self,
        renderer: &R,
        display: &D,
        now: DateTime<Local>,
    ) -> Result<DashboardData>
    where
        R: DashboardRenderer + ?Sized,
        D: DisplayDriver + ?Sized,
    {
        let data = self.collect(now).await?;
        let frame = renderer.render(&data)?;
        display.show(&frame)?;
        tracing::info!("Dashboard updated");
        Ok(data)
    }
}
