// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava ride dashboard for a small e-ink display.
//!
//! Refreshes the Strava OAuth token, pulls the athlete's ride stats and this
//! month's activities, and derives year-to-date, month-to-date and projected
//! full-year kilometers for rendering.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod time_utils;
