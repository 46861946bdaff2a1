use anyhow::{Context, Result};
use chrono::Local;
use nickscraper::{analysis, config::Config, document, fetch, parse, record};
use reqwest::Client;
use std::fs;
use tokio::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) config + logging ─────────────────────────────────────────
    let cfg = Config::load()?;
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(cfg.log_level.parse().unwrap_or(Level::INFO.into()))
    });
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!(out_dir = %cfg.out_dir.display(), "startup");
    let start = Instant::now();

    // ─── 2) get the page ─────────────────────────────────────────────
    let html = match &cfg.source_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading page from {}", path.display()))?,
        None => {
            let client = Client::new();
            fetch::fetch_page(&client, &cfg.source_url).await?
        }
    };

    // ─── 3) flatten + parse ──────────────────────────────────────────
    let nodes = document::nodes_from_html(&html, &cfg.content_selector)?;
    let records = parse::parse_nodes(nodes, &cfg.stop_at)?;

    // ─── 4) write records ────────────────────────────────────────────
    let records_path = cfg.records_path();
    record::write_parquet(&records, &records_path)?;
    info!(rows = records.len(), path = %records_path.display(), "wrote records");

    // ─── 5) longest-running report ───────────────────────────────────
    let today = cfg
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let runs = analysis::longest_running(&records, &cfg.animated_section, today);
    let report_path = cfg.run_lengths_path();
    analysis::write_run_lengths_csv(&runs, &report_path)?;
    if let Some(top) = runs.first() {
        info!(title = %top.title, days = ?top.delta_days, "longest running");
    }

    info!(elapsed = ?start.elapsed(), "all done");
    Ok(())
}
