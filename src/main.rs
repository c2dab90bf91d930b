// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so --json output on stdout stays clean)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = all sources answered, 1 = a source failed,
//    2 = error)
//
// Rust concepts used:
// - async/await: the two sources are fetched concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod aggregate;     // src/aggregate/ - combining sources, TTL cache
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - source URLs, timeout, HTTP client
mod error;         // src/error.rs - fetch error type
mod feed;          // src/feed/ - Ultima Online news feed
mod github;        // src/github/ - ServUO releases on GitHub
mod http;          // src/http.rs - shared HTTP GET
mod render;        // src/render.rs - text / JSON output
mod updates;       // src/updates/ - shared data types

use aggregate::{UpdateAggregator, UpdateCache};
use clap::Parser;
use cli::{Cli, Commands};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use updates::{AggregatedUpdates, FetchOutcome, Game};

use anyhow::{anyhow, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every source answered
//   Ok(1) = at least one source failed (its highlights are shown as empty)
//   Err   = bad configuration or output failure
async fn run(cli: Cli) -> Result<i32> {
    let aggregator = UpdateAggregator::new(cli.sources.into_config())?;

    match cli.command {
        Commands::Release { json } => {
            let outcome = aggregator.fetch_latest_release().await;
            handle_single(Game::ServUO, outcome, json)
        }
        Commands::Feed { json } => {
            let outcome = aggregator.fetch_latest_publish().await;
            handle_single(Game::UltimaOnline, outcome, json)
        }
        Commands::All { json } => {
            let updates = aggregator.load_game_updates().await;
            render::print_updates(&updates, json)?;
            Ok(exit_code(&updates))
        }
        Commands::Watch {
            json,
            interval,
            cache_ttl,
            iterations,
        } => handle_watch(&aggregator, json, interval, cache_ttl, iterations).await,
    }
}

fn handle_single(game: Game, outcome: FetchOutcome, json: bool) -> Result<i32> {
    let failure = outcome.failure().map(|e| e.to_string());
    let updates = outcome.into_updates();

    render::print_game_updates(game, &updates, failure.as_deref(), json)?;

    Ok(if failure.is_some() { 1 } else { 0 })
}

// Prints both sources every `interval` seconds until Ctrl-C or until
// `iterations` rounds have run. Sources are only contacted again once the
// cached result has expired, or on the next round after one failed.
async fn handle_watch(
    aggregator: &UpdateAggregator,
    json: bool,
    interval: u64,
    cache_ttl: Option<u64>,
    iterations: Option<usize>,
) -> Result<i32> {
    if interval == 0 {
        return Err(anyhow!("--interval must be at least 1 second"));
    }

    let cache = UpdateCache::new(cache_ttl.map(Duration::from_secs));
    let mut ticker = tokio::time::interval(Duration::from_secs(interval));
    let mut rounds = 0;
    let mut last_code = 0;

    info!(
        interval,
        cache_ttl = ?cache.ttl(),
        feed = %aggregator.config().feed_url,
        "watching for updates"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping");
                break;
            }
        }

        debug!(round = rounds + 1, cached = cache.is_fresh().await, "starting round");
        let updates = load_round(&cache, aggregator).await;
        render::print_updates(&updates, json)?;
        last_code = exit_code(&updates);

        rounds += 1;
        if iterations.is_some_and(|max| rounds >= max) {
            break;
        }
    }

    Ok(last_code)
}

// Loads through the cache, dropping a result with a failed source so the
// next round asks that source again
async fn load_round(cache: &UpdateCache, aggregator: &UpdateAggregator) -> AggregatedUpdates {
    let updates = cache.get_or_load(|| aggregator.load_game_updates()).await;
    if updates.has_failures() {
        cache.invalidate().await;
    }
    updates
}

fn exit_code(updates: &AggregatedUpdates) -> i32 {
    if updates.has_failures() {
        1
    } else {
        0
    }
}

// Sets up log output on stderr
//
// RUST_LOG wins when set; otherwise -v flags pick the level.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            // Default: fetch errors and warnings only
            0 => "warn".to_string(),
            1 => "warn,servuo_updates=info".to_string(),
            2 => "info,servuo_updates=debug".to_string(),
            _ => "debug,servuo_updates=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::SourceConfig;
    use updates::SourceFailure;

    #[test]
    fn test_exit_code_reflects_failures() {
        let healthy = AggregatedUpdates::default();
        assert_eq!(exit_code(&healthy), 0);

        let degraded = AggregatedUpdates {
            failures: vec![SourceFailure {
                game: Game::UltimaOnline,
                message: "https://uo.com/feed/ returned HTTP 503".to_string(),
            }],
            ..AggregatedUpdates::default()
        };
        assert_eq!(exit_code(&degraded), 1);
    }

    #[tokio::test]
    async fn test_failed_round_is_not_reused() {
        let config = SourceConfig {
            release_url: "http://127.0.0.1:1/releases/latest".to_string(),
            feed_url: "http://127.0.0.1:1/feed/".to_string(),
            ..SourceConfig::default()
        };
        let aggregator = UpdateAggregator::new(config).unwrap();
        let cache = UpdateCache::new(None);

        let updates = load_round(&cache, &aggregator).await;

        assert!(updates.has_failures());
        assert_eq!(exit_code(&updates), 1);
        assert!(!cache.is_fresh().await);
    }
}
