//! Athlete stats snapshot and the metrics derived for the dashboard.

use serde::{Deserialize, Serialize};

/// Rolled-up totals for one sport and period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTotal {
    #[serde(default)]
    pub count: u32,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
}

/// Stats snapshot from `GET /athletes/{id}/stats`.
///
/// Only the fields the dashboard needs are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteStats {
    /// Longest single ride (meters)
    #[serde(default)]
    pub biggest_ride_distance: Option<f64>,
    /// Year-to-date ride totals
    pub ytd_ride_totals: ActivityTotal,
}

impl AthleteStats {
    pub fn ytd_ride_distance_meters(&self) -> f64 {
        self.ytd_ride_totals.distance
    }

    pub fn biggest_ride_distance_meters(&self) -> f64 {
        self.biggest_ride_distance.unwrap_or(0.0)
    }
}

/// The three numbers shown on the dashboard, all in kilometers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub ride_km_year: f64,
    pub ride_km_month: f64,
    pub ride_km_year_extrapolated: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stats_snapshot() {
        let json = r#"{
            "biggest_ride_distance": 175454.0,
            "biggest_climb_elevation_gain": 1882.6,
            "recent_ride_totals": {"count": 3, "distance": 150000.5},
            "ytd_ride_totals": {"count": 42, "distance": 2345678.9, "moving_time": 360000},
            "all_ride_totals": {"count": 900, "distance": 30000000.0}
        }"#;

        let stats: AthleteStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.ytd_ride_totals.count, 42);
        assert_eq!(stats.ytd_ride_distance_meters(), 2345678.9);
        assert_eq!(stats.biggest_ride_distance_meters(), 175454.0);
    }

    #[test]
    fn test_null_biggest_ride() {
        let json = r#"{"biggest_ride_distance": null, "ytd_ride_totals": {"count": 0, "distance": 0}}"#;
        let stats: AthleteStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.biggest_ride_distance_meters(), 0.0);
        assert_eq!(stats.ytd_ride_distance_meters(), 0.0);
    }

    #[test]
    fn test_missing_ytd_totals_is_rejected() {
        let json = r#"{"biggest_ride_distance": 10.0}"#;
        assert!(serde_json::from_str::<AthleteStats>(json).is_err());
    }
}
