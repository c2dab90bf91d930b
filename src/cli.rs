// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Layout:
// - Global flags describe WHERE updates come from (URLs, timeout, keyword,
//   selection strategy). Each URL/timeout flag can also be set through an
//   environment variable.
// - Subcommands describe WHAT to show: one source, both, or both on a timer.
// =============================================================================

use clap::{ArgAction, Args, Parser, Subcommand};
use std::time::Duration;

use crate::config::{
    SourceConfig, DEFAULT_KEYWORD, DEFAULT_TIMEOUT_SECS, SERVUO_RELEASES_API, ULTIMA_FEED_URL,
};
use crate::feed::SelectionStrategy;

#[derive(Parser, Debug)]
#[command(
    name = "servuo-updates",
    version,
    about = "Show the latest ServUO release and Ultima Online publish notes",
    long_about = "servuo-updates reads the latest ServUO release from GitHub and the newest \
                  publish announcement from the Ultima Online news feed. \
                  A source that cannot be reached is reported as having no highlights."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// GitHub "latest release" endpoint for ServUO
    #[arg(long, env = "SERVUO_RELEASE_URL", default_value = SERVUO_RELEASES_API, global = true)]
    pub release_url: String,

    /// RSS or Atom feed with Ultima Online news
    #[arg(long, env = "UO_FEED_URL", default_value = ULTIMA_FEED_URL, global = true)]
    pub feed_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "UPDATES_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    /// Feed entries whose title contains this text (any case) are publish notes
    #[arg(long, default_value = DEFAULT_KEYWORD, global = true)]
    pub keyword: String,

    /// Which matching feed entry to report
    #[arg(long, value_enum, default_value_t = SelectionStrategy::FirstMatch, global = true)]
    pub strategy: SelectionStrategy,
}

impl SourceArgs {
    pub fn into_config(self) -> SourceConfig {
        SourceConfig {
            release_url: self.release_url,
            feed_url: self.feed_url,
            timeout: Duration::from_secs(self.timeout),
            keyword: self.keyword,
            strategy: self.strategy,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the latest ServUO release
    ///
    /// Example: servuo-updates release --json
    Release {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the latest Ultima Online publish announcement
    ///
    /// Example: servuo-updates feed --strategy most-recent
    Feed {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show both ServUO and Ultima Online updates
    All {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print both updates repeatedly, reusing cached results between rounds
    ///
    /// Example: servuo-updates watch --interval 60 --cache-ttl 600
    Watch {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Seconds between rounds
        #[arg(long, default_value_t = 300)]
        interval: u64,

        /// Seconds a fetched result stays valid. Without it, results are
        /// fetched once and reused until the program exits.
        #[arg(long)]
        cache_ttl: Option<u64>,

        /// Stop after this many rounds (default: run until Ctrl-C)
        #[arg(long)]
        iterations: Option<usize>,
    },
}
