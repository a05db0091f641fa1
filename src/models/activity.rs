// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity list entries.

use serde::{Deserialize, Serialize};

/// Sport type counted as a ride. Matched exactly and case-sensitively.
pub const RIDE_SPORT_TYPE: &str = "Ride";

/// Summary activity returned by `GET /athlete/activities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Activity name/title
    pub name: String,
    /// Sport type (Ride, Run, VirtualRide, etc.)
    pub sport_type: String,
    /// Start date/time (ISO 8601)
    pub start_date: String,
    /// Distance in meters
    pub distance: f64,
}

impl ActivityRecord {
    pub fn is_ride(&self) -> bool {
        self.sport_type == RIDE_SPORT_TYPE
    }
}
