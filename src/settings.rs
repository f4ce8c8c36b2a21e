//! Enumerated per-context options, their clamping rules, and the fuzzy
//! search surface over built-in methods and registered GTAB tables.

use crate::lexicon;

/// Output character set for committed text. Mirrors the Host API's stable
/// `Charset` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Charset {
    Traditional = 0,
    Simplified = 1,
}

/// How a host should lay out the candidate list. Opaque to the core beyond
/// being stored and handed back; mirrors the Host API's stable
/// `CandidateStyle` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CandidateStyle {
    Horizontal = 0,
    Vertical = 1,
    Popup = 2,
}

/// Mirrors the Host API's stable `ColorScheme` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorScheme {
    Light = 0,
    Dark = 1,
    System = 2,
}

pub const MIN_CANDIDATES_PER_PAGE: u8 = 1;
pub const MAX_CANDIDATES_PER_PAGE: u8 = 10;
pub const MIN_VIBRATION_MS: u32 = 1;
pub const MAX_VIBRATION_MS: u32 = 500;
pub const DEFAULT_SELECTION_KEYS: &str = "1234567890";

pub fn clamp_candidates_per_page(n: u8) -> u8 {
    n.clamp(MIN_CANDIDATES_PER_PAGE, MAX_CANDIDATES_PER_PAGE)
}

pub fn clamp_vibration_ms(n: u32) -> u32 {
    n.clamp(MIN_VIBRATION_MS, MAX_VIBRATION_MS)
}

/// Human-readable names for the four always-available methods (GTAB tables
/// are searched separately, by their registered Chinese names).
const METHOD_NAMES: &[&str] = &["Phonetic", "Phrase", "Internal Code"];

/// One fuzzy-search hit: the matched name and its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub name: String,
    pub score: i32,
}

/// `None` if `query` does not appear in `name` at all; otherwise
/// `100 - offset`, with a `+50` bonus when the match starts at offset 0.
/// An empty query matches everything with score 100.
fn score(query: &str, name: &str) -> Option<i32> {
    if query.is_empty() {
        return Some(100);
    }
    let query = query.to_lowercase();
    let haystack = name.to_lowercase();
    let offset = haystack.find(&query)?;
    let mut s = 100 - offset as i32;
    if offset == 0 {
        s += 50;
    }
    Some(s)
}

/// Searches the union of built-in method names and registered GTAB table
/// names, sorted by descending score.
pub fn search(query: &str) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = METHOD_NAMES
        .iter()
        .filter_map(|&name| {
            score(query, name).map(|score| SearchHit {
                name: name.to_string(),
                score,
            })
        })
        .collect();
    hits.extend(lexicon::BUILTIN_GTAB_TABLES.iter().filter_map(|table| {
        score(query, table.name).map(|score| SearchHit {
            name: table.name.to_string(),
            score,
        })
    }));
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_query_matches_everything() {
        let hits = search("");
        assert!(hits.iter().all(|h| h.score == 100));
        assert!(hits.len() >= METHOD_NAMES.len() + lexicon::BUILTIN_GTAB_TABLES.len());
    }

    #[test]
    fn prefix_match_outscores_substring_match() {
        let hits = search("Pho");
        let prefix_hit = hits.iter().find(|h| h.name == "Phonetic").unwrap();
        assert!(prefix_hit.score > 100);
    }

    #[test]
    fn no_match_is_excluded() {
        let hits = search("zzzzz_no_such_method");
        assert!(hits.is_empty());
    }

    #[test]
    fn clamping_bounds_are_respected() {
        assert_eq!(clamp_candidates_per_page(0), MIN_CANDIDATES_PER_PAGE);
        assert_eq!(clamp_candidates_per_page(99), MAX_CANDIDATES_PER_PAGE);
        assert_eq!(clamp_vibration_ms(0), MIN_VIBRATION_MS);
        assert_eq!(clamp_vibration_ms(10_000), MAX_VIBRATION_MS);
    }
}
