//! Simulator `.conf` list files
//!
//! Entry lines look like `<id> <tier> # <card name>,`. Everything else in the
//! file (list headers such as `!Name` or `$whitelist`, comments, blank lines)
//! is kept as-is, and so is an entry line until its fields are edited.

use crate::card_id::CardId;
use crate::error::{LookupError, LookupResult};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

lazy_static! {
    static ref ENTRY_RE: Regex = Regex::new(r"^(\d+) (\d) # (.+),").unwrap();
}

/// Restriction tier as written in a conf entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Forbidden,
    Limited,
    SemiLimited,
    Unlimited,
}

impl Tier {
    pub fn digit(self) -> u8 {
        match self {
            Tier::Forbidden => 0,
            Tier::Limited => 1,
            Tier::SemiLimited => 2,
            Tier::Unlimited => 3,
        }
    }

    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Tier::Forbidden),
            1 => Some(Tier::Limited),
            2 => Some(Tier::SemiLimited),
            3 => Some(Tier::Unlimited),
            _ => None,
        }
    }

    /// Map a banlist status label; unknown labels count as Unlimited.
    pub fn from_status(label: &str) -> Self {
        match label.trim() {
            "Forbidden" => Tier::Forbidden,
            "Limited" => Tier::Limited,
            "Semi-Limited" => Tier::SemiLimited,
            _ => Tier::Unlimited,
        }
    }
}

/// One `<id> <tier> # <name>,` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfEntry {
    pub id: CardId,
    pub tier: u8,
    pub name: String,
}

impl ConfEntry {
    pub fn new(id: CardId, tier: Tier, name: impl Into<String>) -> Self {
        Self {
            id,
            tier: tier.digit(),
            name: name.into(),
        }
    }

    /// Parse an entry line. Trailing text after the last comma is not part of the entry.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = ENTRY_RE.captures(line)?;
        Some(Self {
            id: CardId::parse(&caps[1])?,
            tier: caps[2].parse().ok()?,
            name: caps[3].to_string(),
        })
    }
}

impl fmt::Display for ConfEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} # {},", self.id, self.tier, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfLine {
    /// An entry and, when read from a file, the line it came from
    Entry {
        entry: ConfEntry,
        raw: Option<String>,
    },
    Other(String),
}

impl ConfLine {
    fn entry(entry: ConfEntry) -> Self {
        ConfLine::Entry { entry, raw: None }
    }
}

impl fmt::Display for ConfLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Unedited entries are written back verbatim, trailing text included
            ConfLine::Entry {
                entry,
                raw: Some(raw),
            } if ConfEntry::parse(raw).as_ref() == Some(entry) => f.write_str(raw),
            ConfLine::Entry { entry, .. } => fmt::Display::fmt(entry, f),
            ConfLine::Other(line) => f.write_str(line),
        }
    }
}

/// An in-memory conf file, line order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfFile {
    lines: Vec<ConfLine>,
}

impl ConfFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| match ConfEntry::parse(line) {
                Some(entry) => ConfLine::Entry {
                    entry,
                    raw: Some(line.to_string()),
                },
                None => ConfLine::Other(line.to_string()),
            })
            .collect();
        Self { lines }
    }

    pub fn load(path: &Path) -> LookupResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LookupError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Load a conf file, or `None` if it does not exist yet.
    pub fn load_if_exists(path: &Path) -> LookupResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(Self::parse(&text))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LookupError::io(path, e)),
        }
    }

    pub fn save(&self, path: &Path) -> LookupResult<()> {
        std::fs::write(path, self.render()).map_err(|e| LookupError::io(path, e))
    }

    /// File contents: one line per entry, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }

    pub fn lines(&self) -> &[ConfLine] {
        &self.lines
    }

    pub fn entries(&self) -> impl Iterator<Item = &ConfEntry> {
        self.lines.iter().filter_map(|line| match line {
            ConfLine::Entry { entry, .. } => Some(entry),
            ConfLine::Other(_) => None,
        })
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut ConfEntry> {
        self.lines.iter_mut().filter_map(|line| match line {
            ConfLine::Entry { entry, .. } => Some(entry),
            ConfLine::Other(_) => None,
        })
    }

    pub fn ids(&self) -> HashSet<CardId> {
        self.entries().map(|entry| entry.id.clone()).collect()
    }

    pub fn push(&mut self, entry: ConfEntry) {
        self.lines.push(ConfLine::entry(entry));
    }

    /// Keep only entries matching `keep`; other lines always stay.
    /// Returns how many entries were removed.
    pub fn retain_entries<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&ConfEntry) -> bool,
    {
        let before = self.lines.len();
        self.lines.retain(|line| match line {
            ConfLine::Entry { entry, .. } => keep(entry),
            ConfLine::Other(_) => true,
        });
        before - self.lines.len()
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

impl FromIterator<ConfEntry> for ConfFile {
    fn from_iter<I: IntoIterator<Item = ConfEntry>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(ConfLine::entry).collect(),
        }
    }
}

/// Read the set of card ids listed in a conf file.
///
/// A missing file is logged and reads as an empty list.
pub fn read_card_ids(path: &Path) -> LookupResult<HashSet<CardId>> {
    match ConfFile::load_if_exists(path)? {
        Some(conf) => Ok(conf.ids()),
        None => {
            log::error!("Conf file not found: {}", path.display());
            Ok(HashSet::new())
        }
    }
}

#[cfg(test)]
#[path = "conf_tests.rs"]
mod tests;
