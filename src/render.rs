// src/render.rs
// =============================================================================
// Prints updates either as readable text or as JSON.
//
// Feed summaries are usually HTML fragments (WordPress wraps them in <p>
// and escapes entities), so the text view strips markup with `scraper`.
// JSON output keeps every field exactly as fetched.
// =============================================================================

use anyhow::Result;
use scraper::Html;

use crate::updates::{AggregatedUpdates, Game, GameUpdates};

const MAX_DESCRIPTION_CHARS: usize = 280;

// Prints both games
pub fn print_updates(updates: &AggregatedUpdates, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(updates)?);
        return Ok(());
    }

    for (game, game_updates) in updates.games() {
        let failure = updates
            .failures
            .iter()
            .find(|f| f.game == game)
            .map(|f| f.message.as_str());
        print_game_text(game, game_updates, failure);
    }
    Ok(())
}

// Prints a single game's result
pub fn print_game_updates(
    game: Game,
    updates: &GameUpdates,
    failure: Option<&str>,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(updates)?);
    } else {
        print_game_text(game, updates, failure);
    }
    Ok(())
}

fn print_game_text(game: Game, updates: &GameUpdates, failure: Option<&str>) {
    println!("📦 {}", game);
    println!("{}", "=".repeat(60));

    if updates.is_empty() {
        match failure {
            Some(message) => println!("⚠️  No highlights found (source unavailable: {})", message),
            None => println!("ℹ️  No highlights found"),
        }
        println!();
        return;
    }

    for (version, highlight) in updates.iter() {
        println!("🔖 {}", version);

        let description = plain_text(&highlight.description);
        if !description.is_empty() {
            println!("   {}", truncate(&description, MAX_DESCRIPTION_CHARS));
        }
        if !highlight.documentation_url.is_empty() {
            println!("   🔗 {}", highlight.documentation_url);
        }
    }
    println!();
}

// Strips HTML tags and collapses whitespace
//
// Plain text passes through unchanged apart from whitespace.
pub fn plain_text(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    let text: String = parsed.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Cuts at a char boundary, never in the middle of a multi-byte character
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
