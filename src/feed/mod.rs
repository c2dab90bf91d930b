// src/feed/mod.rs
// =============================================================================
// This module reads the Ultima Online news feed.
//
// Submodules:
// - fetch: downloads and parses the feed
// - select: chooses which matching entry to report
// =============================================================================

mod fetch;
mod select;

pub use fetch::fetch_latest_publish;
pub use select::SelectionStrategy;
