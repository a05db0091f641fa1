// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod dashboard;
pub mod metrics;
pub mod strava;
pub mod token;

pub use dashboard::DashboardPipeline;
pub use strava::StravaClient;
pub use token::TokenRefresher;
