//! Card name normalization
//!
//! Names copied from wikis and banlist exports carry qualifiers such as
//! "(Anime)" or "(Alternative Artwork)" that no lookup source knows about.

use lazy_static::lazy_static;
use regex::Regex;

/// Parenthetical qualifiers stripped before any lookup (matched case-insensitively).
pub const QUALIFIERS: [&str; 5] = ["Anime", "Manga", "VG", "Video Game", "Alternative Artwork"];

lazy_static! {
    static ref QUALIFIER_RE: Regex = Regex::new(&format!(
        r"(?i)\s*\((?:{})\)",
        QUALIFIERS
            .iter()
            .map(|q| regex::escape(q))
            .collect::<Vec<_>>()
            .join("|")
    ))
    .unwrap();
}

/// Remove denylisted qualifiers (and the whitespace in front of them), then trim.
///
/// Anything else, including other parentheticals, is left untouched.
pub fn normalize(name: &str) -> String {
    QUALIFIER_RE.replace_all(name, "").trim().to_string()
}

/// Case-folded normalized name, for matching names typed by hand (file names, list entries).
pub fn normalized_key(name: &str) -> String {
    normalize(name).to_lowercase()
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
