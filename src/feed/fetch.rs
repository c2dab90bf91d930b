// src/feed/fetch.rs
// =============================================================================
// This module fetches the Ultima Online news feed and finds the latest
// publish announcement.
//
// How it works:
// 1. GET the feed (same client and timeout as the release fetcher)
// 2. Parse it with feed-rs, which handles RSS and Atom alike
// 3. Pick an entry whose title contains the keyword (see select.rs)
// 4. Turn that entry into a single highlight
//
// "Nothing matched" is a normal result and is not logged. Only failures to
// fetch or parse the feed are logged, as errors.
// =============================================================================

use reqwest::Client;
use tracing::{debug, error};

use super::select::{highlight_from_entry, select_entry, SelectionStrategy};
use crate::error::FetchError;
use crate::http::fetch_body;
use crate::updates::{FetchOutcome, GameUpdates};

const FEED_ACCEPT: &str = "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8";

// Fetches the feed and reports the selected publish entry
//
// Parameters:
//   client: shared HTTP client
//   url: feed URL
//   keyword: case-insensitive substring to look for in entry titles
//   strategy: which matching entry wins
//
// Returns: FetchOutcome::Fetched (possibly with no highlights) or
// FetchOutcome::Failed. Never panics, never returns an Err.
pub async fn fetch_latest_publish(
    client: &Client,
    url: &str,
    keyword: &str,
    strategy: SelectionStrategy,
) -> FetchOutcome {
    match try_fetch_latest_publish(client, url, keyword, strategy).await {
        Ok(updates) => {
            debug!(url, matched = !updates.is_empty(), "fetched Ultima Online feed");
            FetchOutcome::Fetched(updates)
        }
        Err(e) => {
            error!(url, error = %e, "Error fetching Ultima Online updates");
            FetchOutcome::Failed(e)
        }
    }
}

async fn try_fetch_latest_publish(
    client: &Client,
    url: &str,
    keyword: &str,
    strategy: SelectionStrategy,
) -> Result<GameUpdates, FetchError> {
    let body = fetch_body(client, url, FEED_ACCEPT).await?;
    let feed = feed_rs::parser::parse(body.as_slice())?;

    let updates = select_entry(&feed.entries, keyword, strategy)
        .map(|entry| GameUpdates::single(highlight_from_entry(entry)))
        .unwrap_or_else(GameUpdates::empty);

    Ok(updates)
}
