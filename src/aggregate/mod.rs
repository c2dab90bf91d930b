// src/aggregate/mod.rs
// =============================================================================
// This module combines the two update sources.
//
// Submodules:
// - aggregator: runs the release and feed fetchers and merges their results
// - cache: keeps the merged result around for a configurable time
// =============================================================================

mod aggregator;
mod cache;

pub use aggregator::UpdateAggregator;
pub use cache::UpdateCache;
