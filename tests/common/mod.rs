// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde_json::json;
use std::sync::Mutex;
use strava_dashboard::config::Config;
use strava_dashboard::render::{DashboardFrame, DisplayDriver};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ATHLETE_ID: u64 = 134815;

/// Config pointing both the API and the token endpoint at the mock server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        strava_client_id: "test_client_id".to_string(),
        strava_client_secret: "test_secret".to_string(),
        api_base_url: server.uri(),
        token_url: format!("{}/oauth/token", server.uri()),
        ..Config::default()
    }
}

/// Token endpoint response body.
#[allow(dead_code)]
pub fn token_body(access: &str, refresh: &str, expires_at: i64) -> serde_json::Value {
    json!({
        "token_type": "Bearer",
        "access_token": access,
        "expires_at": expires_at,
        "expires_in": 21600,
        "refresh_token": refresh
    })
}

#[allow(dead_code)]
pub fn athlete_body() -> serde_json::Value {
    json!({
        "id": ATHLETE_ID,
        "username": "marianne_t",
        "resource_state": 3,
        "firstname": "Marianne",
        "lastname": "Teutenberg",
        "city": "San Francisco"
    })
}

#[allow(dead_code)]
pub fn stats_body(ytd_meters: f64) -> serde_json::Value {
    json!({
        "biggest_ride_distance": 175454.0,
        "recent_ride_totals": {"count": 2, "distance": 65000.0},
        "ytd_ride_totals": {"count": 40, "distance": ytd_meters, "moving_time": 300000},
        "all_ride_totals": {"count": 700, "distance": 25000000.0}
    })
}

#[allow(dead_code)]
pub fn activity_json(name: &str, sport: &str, distance: f64) -> serde_json::Value {
    json!({
        "id": 1234567890u64,
        "name": name,
        "sport_type": sport,
        "type": sport,
        "start_date": "2026-04-03T06:30:00Z",
        "distance": distance,
        "moving_time": 3600
    })
}

/// Mount a successful refresh returning `access`.
#[allow(dead_code)]
pub async fn mount_token(server: &MockServer, access: &str, refresh: &str, expires_at: i64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(
            access, refresh, expires_at,
        )))
        .mount(server)
        .await;
}

/// Mount athlete and stats endpoints for `access`.
#[allow(dead_code)]
pub async fn mount_profile(server: &MockServer, access: &str, ytd_meters: f64) {
    let bearer = format!("Bearer {}", access);
    Mock::given(method("GET"))
        .and(path("/athlete"))
        .and(header("Authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(athlete_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/athletes/{}/stats", ATHLETE_ID)))
        .and(header("Authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body(ytd_meters)))
        .mount(server)
        .await;
}

/// Display driver that keeps every frame it is shown.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Mutex<Vec<DashboardFrame>>,
}

impl DisplayDriver for RecordingDisplay {
    fn show(&self, frame: &DashboardFrame) -> anyhow::Result<()> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}
