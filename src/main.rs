// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava e-ink dashboard
//!
//! Single run: refresh the token, fetch ride data, render the dashboard and
//! exit. Meant to be invoked periodically (cron, systemd timer).

use std::process::ExitCode;
use strava_dashboard::{
    config::{Config, LogFormat},
    db::FileTokenStore,
    error::AppError,
    render::{DisplayDriver, FileDisplay, StdoutDisplay, TextRenderer},
    services::DashboardPipeline,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Config::from_env();

    init_logging(
        config
            .as_ref()
            .map(|c| c.log_format)
            .unwrap_or_default(),
    );

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, exit_code = e.exit_code(), "Dashboard run failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    tracing::info!(
        token_file = %config.token_file.display(),
        refresh_policy = ?config.refresh_policy,
        timeout_secs = config.request_timeout.as_secs_f64(),
        "Starting Strava dashboard"
    );

    let store = FileTokenStore::new(&config.token_file);
    let pipeline = DashboardPipeline::new(&config, store)?;

    let display: Box<dyn DisplayDriver> = match &config.dashboard_output {
        Some(path) => Box::new(FileDisplay::new(path)),
        None => Box::new(StdoutDisplay),
    };

    let renderer = TextRenderer::new(config.background_dir.clone());

    pipeline
        .run(&renderer, display.as_ref(), chrono::Local::now())
        .await?;
    Ok(())
}

/// Initialize logging on stderr; stdout carries the dashboard.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("strava_dashboard=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
