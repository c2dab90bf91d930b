// src/config.rs
// =============================================================================
// Where the updates come from and how long we wait for them.
//
// Values arrive from CLI flags (with environment variable fallbacks, see
// cli.rs) and are validated here before any request is made.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::feed::SelectionStrategy;

pub const SERVUO_RELEASES_API: &str = "https://api.github.com/repos/ServUO/ServUO/releases/latest";
pub const ULTIMA_FEED_URL: &str = "https://uo.com/feed/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_KEYWORD: &str = "publish";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// GitHub "latest release" endpoint for ServUO
    pub release_url: String,
    /// RSS / Atom feed for Ultima Online news
    pub feed_url: String,
    /// Applied to every request, release and feed alike
    pub timeout: Duration,
    /// Case-insensitive substring a feed entry title must contain
    pub keyword: String,
    pub strategy: SelectionStrategy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            release_url: SERVUO_RELEASES_API.to_string(),
            feed_url: ULTIMA_FEED_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            keyword: DEFAULT_KEYWORD.to_string(),
            strategy: SelectionStrategy::FirstMatch,
        }
    }
}

impl SourceConfig {
    // Rejects configs that could never produce a request
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.release_url).context("invalid release URL")?;
        validate_http_url(&self.feed_url).context("invalid feed URL")?;

        if self.timeout.is_zero() {
            return Err(anyhow!("timeout must be greater than zero"));
        }
        if self.keyword.trim().is_empty() {
            return Err(anyhow!("feed keyword must not be empty"));
        }
        Ok(())
    }

    // Builds the HTTP client shared by both fetchers
    //
    // GitHub rejects API requests that carry no User-Agent, so one is always set.
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")
    }
}

fn validate_http_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| anyhow!("'{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow!("'{}': unsupported scheme '{}'", raw, other)),
    }
}
