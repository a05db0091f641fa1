// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard metrics derived from fetched Strava data. No I/O.

use crate::models::{ActivityRecord, AthleteStats, DerivedMetrics};
use crate::time_utils::{days_elapsed_in_year, days_in_year};
use chrono::{Datelike, NaiveDate};

const METERS_PER_KM: f64 = 1000.0;

/// Total distance (meters) of activities whose sport type is exactly `Ride`.
///
/// `VirtualRide`, `EBikeRide` etc. are not counted.
pub fn rides_total(activities: &[ActivityRecord]) -> f64 {
    activities
        .iter()
        .filter(|a| a.is_ride())
        .map(|a| a.distance)
        .sum()
}

/// Year-to-date ride distance in km, as reported by the stats endpoint.
pub fn year_to_date_km(stats: &AthleteStats) -> f64 {
    stats.ytd_ride_distance_meters() / METERS_PER_KM
}

/// Ride distance in km over the given activities.
pub fn month_to_date_km(activities: &[ActivityRecord]) -> f64 {
    rides_total(activities) / METERS_PER_KM
}

/// Project the year-to-date daily rate over the whole year, in km.
///
/// Returns 0.0 on January 1 (`days_elapsed_in_year == 0`).
pub fn extrapolate_year_km(ytd_meters: f64, days_elapsed_in_year: u32, days_in_year: u32) -> f64 {
    if days_elapsed_in_year == 0 {
        tracing::warn!("No full day elapsed this year, extrapolation falls back to 0");
        return 0.0;
    }
    (ytd_meters / f64::from(days_elapsed_in_year)) * f64::from(days_in_year) / METERS_PER_KM
}

/// Compute all dashboard metrics for `today`.
pub fn compute(
    stats: &AthleteStats,
    activities: &[ActivityRecord],
    today: NaiveDate,
) -> DerivedMetrics {
    let ytd_meters = stats.ytd_ride_distance_meters();
    let elapsed = days_elapsed_in_year(today);
    let year_days = days_in_year(today.year());

    let metrics = DerivedMetrics {
        ride_km_year: year_to_date_km(stats),
        ride_km_month: month_to_date_km(activities),
        ride_km_year_extrapolated: extrapolate_year_km(ytd_meters, elapsed, year_days),
    };

    tracing::info!(
        ride_km_year = %format!("{:.2}", metrics.ride_km_year),
        ride_km_month = %format!("{:.2}", metrics.ride_km_month),
        ride_km_year_extrapolated = %format!("{:.2}", metrics.ride_km_year_extrapolated),
        days_elapsed = elapsed,
        "Metrics computed"
    );

    metrics
}
