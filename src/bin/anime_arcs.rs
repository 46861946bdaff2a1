use anyhow::Result;
use nickscraper::anime::{self, data};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let arcs = anime::arcs();
    let episodes = anime::episodes(data::SEASON_EPISODES, &arcs, data::APPLE_TV);
    let summaries = anime::arc_summaries(&episodes);
    info!(
        episodes = episodes.len(),
        arcs = summaries.len(),
        "built arc breakdown"
    );

    // canon arcs
    let canon: Vec<_> = summaries
        .iter()
        .filter(|s| s.anime_original == Some(false))
        .collect();
    println!("{}", serde_json::to_string_pretty(&canon)?);

    println!("core seasons: {:?}", anime::core_seasons(&summaries));

    let missing = anime::missing_canon(&summaries);
    if !missing.is_empty() {
        println!("canon arcs not on Apple TV:");
        println!("{}", serde_json::to_string_pretty(&missing)?);
    }
    Ok(())
}
