// src/updates/mod.rs
// =============================================================================
// Shared data types for update highlights.
//
// Both fetchers (github, feed) produce GameUpdates; the aggregator combines
// them into AggregatedUpdates.
// =============================================================================

mod types;

pub use types::{
    AggregatedUpdates, FetchOutcome, Game, GameUpdates, SourceFailure, UpdateHighlight,
};
