// src/aggregate/aggregator.rs
// =============================================================================
// Combines both update sources into one AggregatedUpdates value.
//
// The release fetcher and the feed fetcher know nothing about each other:
// both always run, a failure in one never stops the other, and the result
// always has both games in it. A failed source shows up as empty highlights
// plus an entry in `failures`.
// =============================================================================

use anyhow::Result;
use futures::future;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::feed;
use crate::github;
use crate::updates::{AggregatedUpdates, FetchOutcome, Game, GameUpdates, SourceFailure};

pub struct UpdateAggregator {
    client: Client,
    config: SourceConfig,
}

impl UpdateAggregator {
    /// Validates the config and builds the shared HTTP client.
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate()?;
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub async fn fetch_latest_release(&self) -> FetchOutcome {
        github::fetch_latest_release(&self.client, &self.config.release_url).await
    }

    pub async fn fetch_latest_publish(&self) -> FetchOutcome {
        feed::fetch_latest_publish(
            &self.client,
            &self.config.feed_url,
            &self.config.keyword,
            self.config.strategy,
        )
        .await
    }

    // Runs both fetchers side by side and combines their results
    //
    // Cannot fail: every source failure is already folded into its outcome.
    pub async fn load_game_updates(&self) -> AggregatedUpdates {
        let (release, publish) =
            future::join(self.fetch_latest_release(), self.fetch_latest_publish()).await;

        let aggregated = combine(release, publish);

        if aggregated.has_failures() {
            warn!(
                failed = aggregated.failures.len(),
                "some update sources could not be read"
            );
        } else {
            info!("loaded updates from all sources");
        }

        aggregated
    }
}

fn combine(release: FetchOutcome, publish: FetchOutcome) -> AggregatedUpdates {
    let mut failures = Vec::new();
    let servuo = settle(Game::ServUO, release, &mut failures);
    let ultima_online = settle(Game::UltimaOnline, publish, &mut failures);

    AggregatedUpdates {
        servuo,
        ultima_online,
        failures,
    }
}

fn settle(
    game: Game,
    outcome: FetchOutcome,
    failures: &mut Vec<SourceFailure>,
) -> GameUpdates {
    match outcome {
        FetchOutcome::Fetched(updates) => updates,
        FetchOutcome::Failed(e) => {
            failures.push(SourceFailure {
                game,
                message: e.to_string(),
            });
            GameUpdates::empty()
        }
    }
}
