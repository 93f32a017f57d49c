use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::http_client::http_client;

pub const FINALS_PAGE_URL: &str = "https://en.wikipedia.org/wiki/List_of_FIFA_World_Cup_finals";

pub fn fetch_finals_page() -> Result<String> {
    let client = http_client()?;
    fetch_page(client, FINALS_PAGE_URL)
}

/// GET `url` and return the body; any non-2xx status is an error.
pub fn fetch_page(client: &Client, url: &str) -> Result<String> {
    info!(url, "fetching finals page");
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("request to {url} failed"))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http {status} from {url}"));
    }
    let body = resp.text().context("failed reading body")?;
    debug!(bytes = body.len(), "finals page fetched");
    Ok(body)
}
