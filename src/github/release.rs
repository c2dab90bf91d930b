// src/github/release.rs
// =============================================================================
// This module fetches the latest ServUO release from the GitHub Releases API.
//
// Strategy:
// - One GET to the "releases/latest" endpoint (no auth, public API)
// - Deserialize only the four fields we care about, all optional
// - Turn the release into a single UpdateHighlight
//
// Anything that goes wrong (network, HTTP status, bad JSON) is logged and
// reported as FetchOutcome::Failed. There are no retries: one failed attempt
// is one failed outcome, and nothing about it is remembered.
//
// Rust concepts:
// - #[derive(Deserialize)] with Option fields: missing keys become None
//   instead of a parse error
// - Slices of Option<&str>: an ordered list of fallbacks
// =============================================================================

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::FetchError;
use crate::http::fetch_body;
use crate::updates::{FetchOutcome, GameUpdates, UpdateHighlight};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

pub const UNKNOWN_VERSION: &str = "Unknown Version";

// The subset of the GitHub release object we read
//
// Every field is optional: GitHub sends null for an unnamed release or an
// empty body, and we substitute defaults rather than fail.
#[derive(Debug, Default, Deserialize)]
pub struct LatestRelease {
    pub name: Option<String>,
    pub tag_name: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
}

// Fetches the latest release and turns it into GameUpdates
//
// Parameters:
//   client: shared HTTP client
//   url: the "releases/latest" endpoint
//
// Returns: FetchOutcome::Fetched with one highlight, or FetchOutcome::Failed.
// Never panics, never returns an Err.
pub async fn fetch_latest_release(client: &Client, url: &str) -> FetchOutcome {
    match try_fetch_latest_release(client, url).await {
        Ok(updates) => {
            debug!(url, "fetched latest ServUO release");
            FetchOutcome::Fetched(updates)
        }
        Err(e) => {
            error!(url, error = %e, "Error fetching ServUO updates");
            FetchOutcome::Failed(e)
        }
    }
}

async fn try_fetch_latest_release(client: &Client, url: &str) -> Result<GameUpdates, FetchError> {
    let body = fetch_body(client, url, GITHUB_ACCEPT).await?;
    let release: LatestRelease = serde_json::from_slice(&body)?;
    Ok(GameUpdates::single(highlight_from_release(release)))
}

// Maps a release payload onto a highlight
//
//   version       <- name, else tag_name, else "Unknown Version"
//   description   <- body with each "\r\n" turned into a space, trimmed
//   documentation <- html_url, or ""
pub fn highlight_from_release(release: LatestRelease) -> UpdateHighlight {
    let version = resolve_version(&[release.name.as_deref(), release.tag_name.as_deref()]);

    let description = release
        .body
        .as_deref()
        .map(collapse_line_breaks)
        .unwrap_or_default();

    UpdateHighlight {
        version,
        description,
        documentation_url: release.html_url.unwrap_or_default(),
    }
}

// Picks the first candidate that is present and non-empty
//
// Candidates are tried in order; when none qualifies the literal
// "Unknown Version" is returned.
pub fn resolve_version(candidates: &[Option<&str>]) -> String {
    candidates
        .iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
        .map(|candidate| candidate.to_string())
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

fn collapse_line_breaks(body: &str) -> String {
    body.replace("\r\n", " ").trim().to_string()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why .as_deref()?
//    - release.name is Option<String>
//    - .as_deref() borrows it as Option<&str> without cloning
//    - That lets one resolve_version() work for any string source
//
// 2. What does .flatten() do on an iterator of Options?
//    - It skips the None values and yields the inner values of Some
//    - [Some("a"), None, Some("b")] -> "a", "b"
//
// 3. Why unwrap_or_default()?
//    - For Option<String>, the default is the empty string
//    - Handy for "absent means empty" fields like html_url
//
// 4. Why return FetchOutcome instead of Result?
//    - Callers must always get something renderable back
//    - FetchOutcome still says whether the fetch failed, so nothing is hidden
// -----------------------------------------------------------------------------
