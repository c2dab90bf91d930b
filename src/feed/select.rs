// src/feed/select.rs
// =============================================================================
// Picks the feed entry to report and turns it into a highlight.
//
// Two strategies:
// - FirstMatch: walk entries in feed order, stop at the first title that
//   contains the keyword. Feeds are usually newest-first, but if one ever
//   lists an older matching entry ahead of a newer one, this returns the
//   older one.
// - MostRecent: among all matching entries, take the one with the latest
//   published (or updated) date. Undated entries rank oldest; ties keep
//   feed order.
// =============================================================================

use clap::ValueEnum;
use feed_rs::model::{Entry, Link};

use crate::updates::UpdateHighlight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SelectionStrategy {
    /// First matching entry in feed order
    #[default]
    FirstMatch,
    /// Matching entry with the newest published/updated date
    MostRecent,
}

// Case-insensitive substring match on the entry title
//
// Entries without a title never match.
pub fn title_matches(entry: &Entry, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    entry
        .title
        .as_ref()
        .map(|title| title.content.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

pub fn select_entry<'a>(
    entries: &'a [Entry],
    keyword: &str,
    strategy: SelectionStrategy,
) -> Option<&'a Entry> {
    let mut matching = entries.iter().filter(|entry| title_matches(entry, keyword));

    match strategy {
        SelectionStrategy::FirstMatch => matching.next(),
        SelectionStrategy::MostRecent => matching
            .enumerate()
            // max_by keeps the last of equal elements, so on equal dates the
            // lower index has to compare as greater
            .max_by(|(ia, a), (ib, b)| entry_date(a).cmp(&entry_date(b)).then(ib.cmp(ia)))
            .map(|(_, entry)| entry),
    }
}

fn entry_date(entry: &Entry) -> Option<i64> {
    entry
        .published
        .or(entry.updated)
        .map(|date| date.timestamp())
}

// Maps a feed entry onto a highlight
//
//   version       <- title as parsed (surrounding whitespace trimmed, entities decoded)
//   description   <- summary, trimmed ("" when missing)
//   documentation <- the entry's alternate link ("" when missing)
pub fn highlight_from_entry(entry: &Entry) -> UpdateHighlight {
    UpdateHighlight {
        version: entry
            .title
            .as_ref()
            .map(|title| title.content.clone())
            .unwrap_or_default(),
        description: entry
            .summary
            .as_ref()
            .map(|summary| summary.content.trim().to_string())
            .unwrap_or_default(),
        documentation_url: entry_link(&entry.links).unwrap_or_default(),
    }
}

// RSS items have a single <link>; Atom entries may carry several, and the
// "alternate" one (or one without a rel) points at the human-readable page.
fn entry_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|link| matches!(link.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|link| link.href.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds a small RSS document; each item is (title, summary, link, pubDate)
    fn rss(items: &[(&str, Option<&str>, &str, Option<&str>)]) -> Vec<Entry> {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>UO</title><link>https://uo.com</link><description>news</description>"#,
        );
        for (title, summary, link, date) in items {
            xml.push_str("<item>");
            xml.push_str(&format!("<title>{}</title>", title));
            if let Some(summary) = summary {
                xml.push_str(&format!("<description>{}</description>", summary));
            }
            xml.push_str(&format!("<link>{}</link>", link));
            if let Some(date) = date {
                xml.push_str(&format!("<pubDate>{}</pubDate>", date));
            }
            xml.push_str("</item>");
        }
        xml.push_str("</channel></rss>");

        feed_rs::parser::parse(xml.as_bytes()).unwrap().entries
    }

    #[test]
    fn test_first_match_skips_non_matching() {
        let entries = rss(&[
            ("Patch notes", None, "https://uo.com/patch", None),
            ("Publish 116.3", Some("s"), "https://uo.com/l", None),
        ]);

        let entry = select_entry(&entries, "publish", SelectionStrategy::FirstMatch).unwrap();
        let highlight = highlight_from_entry(entry);
        assert_eq!(highlight.version, "Publish 116.3");
        assert_eq!(highlight.description, "s");
        assert_eq!(highlight.documentation_url, "https://uo.com/l");
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let entries = rss(&[("UO PUBLISH 117 Notes", None, "https://uo.com/a", None)]);
        assert!(select_entry(&entries, "publish", SelectionStrategy::FirstMatch).is_some());
        assert!(select_entry(&entries, "PuBlIsH", SelectionStrategy::FirstMatch).is_some());
    }

    #[test]
    fn test_no_match() {
        let entries = rss(&[
            ("Patch notes", None, "https://uo.com/a", None),
            ("Event schedule", None, "https://uo.com/b", None),
        ]);
        assert!(select_entry(&entries, "publish", SelectionStrategy::FirstMatch).is_none());
        assert!(select_entry(&entries, "publish", SelectionStrategy::MostRecent).is_none());
    }

    #[test]
    fn test_first_match_returns_stale_entry_when_feed_out_of_order() {
        let entries = rss(&[
            ("Publish 115", None, "https://uo.com/115", Some("Mon, 01 Jan 2024 00:00:00 GMT")),
            ("Publish 116", None, "https://uo.com/116", Some("Wed, 01 May 2024 00:00:00 GMT")),
        ]);

        let first = select_entry(&entries, "publish", SelectionStrategy::FirstMatch).unwrap();
        assert_eq!(highlight_from_entry(first).version, "Publish 115");

        let newest = select_entry(&entries, "publish", SelectionStrategy::MostRecent).unwrap();
        assert_eq!(highlight_from_entry(newest).version, "Publish 116");
    }

    #[test]
    fn test_most_recent_ties_keep_feed_order() {
        let entries = rss(&[
            ("Publish A", None, "https://uo.com/a", None),
            ("Publish B", None, "https://uo.com/b", None),
        ]);
        let entry = select_entry(&entries, "publish", SelectionStrategy::MostRecent).unwrap();
        assert_eq!(highlight_from_entry(entry).version, "Publish A");
    }

    #[test]
    fn test_missing_summary_is_empty() {
        let entries = rss(&[("Publish 118", None, "https://uo.com/118", None)]);
        let highlight = highlight_from_entry(&entries[0]);
        assert_eq!(highlight.description, "");
    }

    #[test]
    fn test_summary_is_trimmed() {
        let entries = rss(&[("Publish 118", Some("   details   "), "https://uo.com/118", None)]);
        let highlight = highlight_from_entry(&entries[0]);
        assert_eq!(highlight.description, "details");
    }

    fn parse_items(items: &str) -> Vec<Entry> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>UO</title><link>https://uo.com</link><description>news</description>{}</channel></rss>"#,
            items
        );
        feed_rs::parser::parse(xml.as_bytes()).unwrap().entries
    }

    #[test]
    fn test_untitled_entry_never_matches() {
        let entries = parse_items(
            "<item><description>Publish 119 details</description><link>https://uo.com/119</link></item>",
        );
        assert_eq!(entries.len(), 1);
        assert!(select_entry(&entries, "publish", SelectionStrategy::FirstMatch).is_none());
        assert!(select_entry(&entries, "publish", SelectionStrategy::MostRecent).is_none());
    }

    #[test]
    fn test_matching_entry_without_link() {
        let entries = parse_items("<item><title>  Publish 116 &amp; more  </title></item>");

        let entry = select_entry(&entries, "publish", SelectionStrategy::FirstMatch).unwrap();
        let highlight = highlight_from_entry(entry);
        assert_eq!(highlight.version, "Publish 116 & more");
        assert_eq!(highlight.documentation_url, "");
    }
}
