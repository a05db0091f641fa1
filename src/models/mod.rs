// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod athlete;
pub mod credential;
pub mod stats;

pub use activity::ActivityRecord;
pub use athlete::Athlete;
pub use credential::Credential;
pub use stats::{AthleteStats, DerivedMetrics};
