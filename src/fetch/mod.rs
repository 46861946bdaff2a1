// src/fetch/mod.rs

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use url::Url;

pub const NICKELODEON_PROGRAMS_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_programs_broadcast_by_Nickelodeon";

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Fetch a page's HTML, retrying transport failures and bad statuses a few
/// times before giving up.
pub async fn fetch_page(client: &Client, page_url: &str) -> Result<String> {
    let url = Url::parse(page_url).with_context(|| format!("invalid page url `{}`", page_url))?;
    let mut attempt = 0;

    loop {
        attempt += 1;

        let resp = client.get(url.clone()).send().await;
        match resp {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(html) => {
                    info!(url = %url, bytes = html.len(), attempt, "fetched page");
                    return Ok(html);
                }
                Err(e) if attempt < MAX_RETRIES => {
                    warn!(url = %url, attempt, "reading body failed: {}", e);
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e.into()),
            },
            Ok(resp) if attempt < MAX_RETRIES => {
                warn!(url = %url, attempt, status = %resp.status(), "bad status, retrying");
                sleep(RETRY_DELAY).await;
            }
            Ok(resp) => return Err(anyhow!("HTTP error: {}", resp.status())),
            Err(e) if attempt < MAX_RETRIES => {
                warn!(url = %url, attempt, "request failed: {}", e);
                sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
