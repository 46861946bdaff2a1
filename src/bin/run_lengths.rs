use anyhow::Result;
use chrono::Local;
use nickscraper::{analysis, config::Config};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Longest-running report over an existing `nick.parquet`, without
/// re-scraping the page.
fn main() -> Result<()> {
    let cfg = Config::load()?;
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::default()
                .add_directive(cfg.log_level.parse().unwrap_or(Level::INFO.into()))
        }))
        .init();

    let today = cfg
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let report_path = cfg.run_lengths_path();
    let runs = analysis::report_from_parquet(
        &cfg.records_path(),
        &cfg.animated_section,
        today,
        &report_path,
    )?;

    for run in runs.iter().take(10) {
        info!(title = %run.title, days = ?run.delta_days, active = ?run.active, "run length");
    }
    info!(rows = runs.len(), path = %report_path.display(), "wrote report");
    Ok(())
}
