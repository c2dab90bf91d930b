// src/github/mod.rs
// =============================================================================
// This module handles fetching release information from GitHub.
//
// Currently implements:
// - Fetching the latest release of a repository via the Releases API
// - Mapping the release onto an UpdateHighlight
//
// Requests are unauthenticated. A rate-limit response is just another
// failed fetch.
// =============================================================================

mod release;

pub use release::fetch_latest_release;
