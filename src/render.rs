// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard output.
//!
//! Drawing onto a bitmap and driving the e-ink panel live outside this crate.
//! [`DashboardRenderer`] turns the metrics into a [`DashboardFrame`] (text
//! items with positions and colors for a 600x448 panel), and a
//! [`DisplayDriver`] pushes that frame somewhere.

use crate::models::DerivedMetrics;
use crate::time_utils::format_last_update;
use anyhow::Context;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Panel size of the original e-ink target.
pub const DISPLAY_WIDTH: u32 = 600;
pub const DISPLAY_HEIGHT: u32 = 448;

/// Everything the renderer is given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub athlete_name: String,
    pub metrics: DerivedMetrics,
    pub generated_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Black,
    Blue,
    Red,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

/// One piece of text placed on the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextItem {
    pub text: String,
    pub x: u32,
    pub y: u32,
    pub color: TextColor,
    pub size: TextSize,
}

/// A composed dashboard ready for a display driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFrame {
    pub width: u32,
    pub height: u32,
    /// Image to draw the items over; blank panel when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
    pub items: Vec<TextItem>,
}

impl DashboardFrame {
    /// Items top to bottom, one per line.
    pub fn to_plain_text(&self) -> String {
        let mut items: Vec<&TextItem> = self.items.iter().collect();
        items.sort_by_key(|item| (item.y, item.x));
        items
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Turns dashboard data into a frame.
pub trait DashboardRenderer {
    fn render(&self, data: &DashboardData) -> anyhow::Result<DashboardFrame>;
}

/// Sends a frame to its destination.
pub trait DisplayDriver {
    fn show(&self, frame: &DashboardFrame) -> anyhow::Result<()>;
}

/// Fixed text layout: year total, month total and projection, each with a
/// caption, plus a "Last update" footer.
///
/// With a background directory set, each frame also names one of the images
/// in it.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    background_dir: Option<PathBuf>,
}

impl TextRenderer {
    pub fn new(background_dir: Option<PathBuf>) -> Self {
        Self { background_dir }
    }

    fn pair(
        items: &mut Vec<TextItem>,
        caption: &str,
        caption_at: (u32, u32),
        km: f64,
        value_at: (u32, u32),
        color: TextColor,
    ) {
        items.push(TextItem {
            text: caption.to_string(),
            x: caption_at.0,
            y: caption_at.1,
            color,
            size: TextSize::Medium,
        });
        items.push(TextItem {
            text: format_km(km),
            x: value_at.0,
            y: value_at.1,
            color,
            size: TextSize::Large,
        });
    }
}

impl DashboardRenderer for TextRenderer {
    fn render(&self, data: &DashboardData) -> anyhow::Result<DashboardFrame> {
        let m = &data.metrics;
        let mut items = Vec::with_capacity(8);

        items.push(TextItem {
            text: data.athlete_name.clone(),
            x: 20,
            y: 10,
            color: TextColor::Black,
            size: TextSize::Small,
        });
        Self::pair(
            &mut items,
            "distance this year",
            (120, 40),
            m.ride_km_year,
            (220, 90),
            TextColor::Blue,
        );
        Self::pair(
            &mut items,
            "distance this month",
            (120, 160),
            m.ride_km_month,
            (250, 200),
            TextColor::Red,
        );
        Self::pair(
            &mut items,
            "projected kms this year",
            (120, 270),
            m.ride_km_year_extrapolated,
            (220, 310),
            TextColor::Green,
        );
        items.push(TextItem {
            text: format!("Last update: {}", format_last_update(&data.generated_at)),
            x: 170,
            y: 410,
            color: TextColor::Black,
            size: TextSize::Small,
        });

        let background = match &self.background_dir {
            Some(dir) => pick_background(dir, data.generated_at.timestamp())?,
            None => None,
        };

        Ok(DashboardFrame {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            background,
            items,
        })
    }
}

/// Choose a background image from `dir`.
///
/// Candidates are the non-hidden regular files, sorted by name; the choice
/// rotates once per minute of `timestamp`. An empty directory yields `None`.
pub fn pick_background(dir: &Path, timestamp: i64) -> anyhow::Result<Option<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read background directory {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.file_type()?.is_file() {
            images.push(entry.path());
        }
    }
    images.sort();

    if images.is_empty() {
        tracing::warn!(dir = %dir.display(), "No background images found");
        return Ok(None);
    }

    let index = timestamp.div_euclid(60).rem_euclid(images.len() as i64) as usize;
    let image = images.swap_remove(index);
    tracing::debug!(background = %image.display(), "Background picked");
    Ok(Some(image))
}

/// Format a distance for display, one decimal place.
pub fn format_km(km: f64) -> String {
    format!("{:.1} km", km)
}

/// Prints the frame as plain text on stdout.
#[derive(Debug, Clone, Default)]
pub struct StdoutDisplay;

impl DisplayDriver for StdoutDisplay {
    fn show(&self, frame: &DashboardFrame) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", frame.to_plain_text()).context("Failed to write dashboard to stdout")?;
        Ok(())
    }
}

/// Writes the frame as JSON for an external rasterizer/panel driver.
#[derive(Debug, Clone)]
pub struct FileDisplay {
    path: PathBuf,
}

impl FileDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DisplayDriver for FileDisplay {
    fn show(&self, frame: &DashboardFrame) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(frame)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write dashboard to {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "Dashboard frame written");
        Ok(())
    }
}
