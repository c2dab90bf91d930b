// src/updates/types.rs
// =============================================================================
// The data shapes every fetcher produces and every consumer reads.
//
// JSON shape (kept stable for anything downstream that reads --json output):
//
//   {
//     "ServUO":       { "Highlights": { "<version>": { "Description": "...", "Documentation": "..." } } },
//     "UltimaOnline": { "Highlights": { ... } }
//   }
//
// Rust concepts:
// - serde rename attributes: Rust field names stay snake_case while the JSON
//   keys keep their capitalized form
// - BTreeMap: a map with a stable (sorted) iteration order
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::FetchError;

// One notable release / publish entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateHighlight {
    /// Release or publish label. It is the map key in GameUpdates, so it is
    /// not repeated inside the serialized value.
    #[serde(skip)]
    pub version: String,
    /// Free-text summary; empty means "no data", not an error
    #[serde(rename = "Description")]
    pub description: String,
    /// Link to further detail; may be empty
    #[serde(rename = "Documentation")]
    pub documentation_url: String,
}

// Per-game result
//
// Holds at most one highlight today (each fetcher picks a single newest
// entry), but nothing downstream should rely on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameUpdates {
    #[serde(rename = "Highlights")]
    pub highlights: BTreeMap<String, UpdateHighlight>,
}

impl GameUpdates {
    /// No highlights. Used for "nothing matched" and for failed fetches.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A result holding exactly one highlight, keyed by its version label.
    pub fn single(highlight: UpdateHighlight) -> Self {
        let mut highlights = BTreeMap::new();
        highlights.insert(highlight.version.clone(), highlight);
        Self { highlights }
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// Iterates highlights with the version label filled in from the map key,
    /// which matters for values that came back through deserialization.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UpdateHighlight)> {
        self.highlights.iter().map(|(version, h)| (version.as_str(), h))
    }
}

// The fixed set of games this tool reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    #[serde(rename = "ServUO")]
    ServUO,
    #[serde(rename = "UltimaOnline")]
    UltimaOnline,
}

impl Game {
    pub const ALL: [Game; 2] = [Game::ServUO, Game::UltimaOnline];

    pub fn as_str(&self) -> &'static str {
        match self {
            Game::ServUO => "ServUO",
            Game::UltimaOnline => "UltimaOnline",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// What a single fetcher attempt produced
//
// `Fetched` with empty highlights means the source answered but had nothing
// relevant (e.g. no feed entry matched). `Failed` means the source could not
// be read at all.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(GameUpdates),
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn failure(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Failed(e) => Some(e),
            FetchOutcome::Fetched(_) => None,
        }
    }

    /// Collapses a failure into empty highlights.
    pub fn into_updates(self) -> GameUpdates {
        match self {
            FetchOutcome::Fetched(updates) => updates,
            FetchOutcome::Failed(_) => GameUpdates::empty(),
        }
    }
}

// A source that failed during one aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub game: Game,
    pub message: String,
}

// Both games' results, always with both keys present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedUpdates {
    #[serde(rename = "ServUO")]
    pub servuo: GameUpdates,
    #[serde(rename = "UltimaOnline")]
    pub ultima_online: GameUpdates,
    /// Not part of the JSON shape
    #[serde(skip)]
    pub failures: Vec<SourceFailure>,
}

impl AggregatedUpdates {
    pub fn get(&self, game: Game) -> &GameUpdates {
        match game {
            Game::ServUO => &self.servuo,
            Game::UltimaOnline => &self.ultima_online,
        }
    }

    pub fn games(&self) -> impl Iterator<Item = (Game, &GameUpdates)> {
        Game::ALL.into_iter().map(move |game| (game, self.get(game)))
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn highlight(version: &str) -> UpdateHighlight {
        UpdateHighlight {
            version: version.to_string(),
            description: "Line1 Line2".to_string(),
            documentation_url: "http://x".to_string(),
        }
    }

    #[test]
    fn test_game_updates_json_shape() {
        let updates = GameUpdates::single(highlight("v1.2"));
        let value = serde_json::to_value(&updates).unwrap();
        assert_eq!(
            value,
            json!({"Highlights": {"v1.2": {"Description": "Line1 Line2", "Documentation": "http://x"}}})
        );
    }

    #[test]
    fn test_empty_updates_still_have_highlights_key() {
        let value = serde_json::to_value(GameUpdates::empty()).unwrap();
        assert_eq!(value, json!({"Highlights": {}}));
    }

    #[test]
    fn test_aggregated_has_exactly_two_keys() {
        let mut aggregated = AggregatedUpdates::default();
        aggregated.failures.push(SourceFailure {
            game: Game::ServUO,
            message: "boom".to_string(),
        });

        let value = serde_json::to_value(&aggregated).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(value.get("ServUO").is_some());
        assert!(value.get("UltimaOnline").is_some());
    }

    #[test]
    fn test_iter_uses_map_key_as_version() {
        let parsed: GameUpdates = serde_json::from_value(json!({
            "Highlights": {"Publish 116": {"Description": "", "Documentation": ""}}
        }))
        .unwrap();
        let versions: Vec<&str> = parsed.iter().map(|(v, _)| v).collect();
        assert_eq!(versions, vec!["Publish 116"]);
    }

    #[test]
    fn test_failed_outcome_collapses_to_empty() {
        let outcome = FetchOutcome::Failed(FetchError::Status {
            url: "http://x".to_string(),
            status: 500,
        });
        assert!(outcome.failure().is_some());
        assert!(outcome.into_updates().is_empty());
    }
}
