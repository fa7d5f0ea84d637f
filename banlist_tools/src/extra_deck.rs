//! Extra deck bookkeeping
//!
//! Adding: the extra deck banlist text lists monsters under "Tier B Cards",
//! "Tier C Cards" and "Tier D Cards" headings; each tier feeds one conf list.
//! Removing: strip known extra deck monsters out of conf lists.

use crate::error::Result;
use crate::io::{load_conf, read_name_list, read_text};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use ygo_common::{CardDataFile, CardId, ConfEntry, ConfFile, LocalSource, Resolver, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtraTier {
    B,
    C,
    D,
}

impl ExtraTier {
    pub const ALL: [ExtraTier; 3] = [ExtraTier::B, ExtraTier::C, ExtraTier::D];

    /// Heading line that opens this tier's section
    pub fn heading(self) -> &'static str {
        match self {
            ExtraTier::B => "Tier B Cards",
            ExtraTier::C => "Tier C Cards",
            ExtraTier::D => "Tier D Cards",
        }
    }
}

/// Card names per tier, in banlist order
pub type ExtraDeckBanlist = HashMap<ExtraTier, Vec<String>>;

pub fn parse_extra_banlist(text: &str) -> ExtraDeckBanlist {
    let mut banlist: ExtraDeckBanlist = ExtraTier::ALL.iter().map(|t| (*t, Vec::new())).collect();
    let mut current = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(tier) = ExtraTier::ALL.into_iter().find(|t| line.contains(t.heading())) {
            current = Some(tier);
        } else if let Some(tier) = current {
            banlist.entry(tier).or_default().push(line.to_string());
        }
    }
    banlist
}

/// Conf list receiving each tier
#[derive(Debug, Clone)]
pub struct ExtraDeckTargets {
    pub tier_b: PathBuf,
    pub tier_c: PathBuf,
    pub tier_d: PathBuf,
}

impl ExtraDeckTargets {
    pub fn path(&self, tier: ExtraTier) -> &Path {
        match tier {
            ExtraTier::B => &self.tier_b,
            ExtraTier::C => &self.tier_c,
            ExtraTier::D => &self.tier_d,
        }
    }
}

impl Default for ExtraDeckTargets {
    fn default() -> Self {
        Self {
            tier_b: PathBuf::from("OnlyBlueCards.conf"),
            tier_c: PathBuf::from("OnlyRedCards.conf"),
            tier_d: PathBuf::from("OnlyWhiteCards.conf"),
        }
    }
}

/// Append names not yet in `conf` (case-insensitive), resolving their ids.
/// Unresolved cards get `default_id`. Returns the number appended.
pub fn append_missing(
    conf: &mut ConfFile,
    names: &[String],
    resolver: &Resolver,
    default_id: &CardId,
) -> usize {
    let mut existing: HashSet<String> = conf
        .entries()
        .map(|entry| entry.name.trim().to_lowercase())
        .collect();

    let mut appended = 0;
    for name in names {
        if !existing.insert(name.trim().to_lowercase()) {
            continue;
        }
        let id = resolver.resolve_or(name, default_id);
        conf.push(ConfEntry::new(id, Tier::Limited, name.as_str()));
        appended += 1;
    }
    appended
}

/// Add every tier's extra deck monsters to its conf list, creating lists as needed.
pub fn add_extra_deck_cards(
    banlist_path: &Path,
    targets: &ExtraDeckTargets,
    resolver: &Resolver,
    default_id: &CardId,
) -> Result<Vec<(PathBuf, usize)>> {
    let banlist = parse_extra_banlist(&read_text(banlist_path)?);

    let mut results = Vec::new();
    for tier in ExtraTier::ALL {
        let path = targets.path(tier);
        let mut conf = match ConfFile::load_if_exists(path)? {
            Some(conf) => conf,
            None => {
                log::info!("{} not found. Creating a new one.", path.display());
                ConfFile::new()
            }
        };

        let names = banlist.get(&tier).map(Vec::as_slice).unwrap_or_default();
        let appended = append_missing(&mut conf, names, resolver, default_id);
        conf.save(path)?;

        log::info!(
            "Updated {} with {} new extra deck monsters ({} listed under {})",
            path.display(),
            appended,
            names.len(),
            tier.heading()
        );
        results.push((path.to_path_buf(), appended));
    }

    Ok(results)
}

/// `X.conf` → `X_filtered.conf` next to it
pub fn filtered_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}_filtered.conf", stem))
}

/// Ids of the listed extra deck monsters that the mapping file knows.
pub fn extra_deck_ids(names: &[String], card_data: &CardDataFile) -> HashSet<CardId> {
    names
        .iter()
        .filter_map(|name| card_data.get(name).cloned())
        .collect()
}

/// Write a filtered copy of each conf without the extra deck monsters.
/// Returns (output path, entries removed) per file.
pub fn remove_extra_deck(
    extra_deck_path: &Path,
    card_data: &CardDataFile,
    conf_paths: &[PathBuf],
) -> Result<Vec<(PathBuf, usize)>> {
    let names = read_name_list(extra_deck_path)?;
    let ids = extra_deck_ids(&names, card_data);
    log::info!(
        "{} of {} extra deck names found in {}",
        ids.len(),
        names.len(),
        card_data.label()
    );

    let mut results = Vec::with_capacity(conf_paths.len());
    for path in conf_paths {
        let mut conf = load_conf(path)?;
        let removed = conf.retain_entries(|entry| !ids.contains(&entry.id));
        let output = filtered_path(path);
        conf.save(&output)?;

        log::info!(
            "Filtered file saved as {} ({} removed)",
            output.display(),
            removed
        );
        results.push((output, removed));
    }

    Ok(results)
}
