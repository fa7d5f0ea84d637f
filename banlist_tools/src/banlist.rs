//! Applying a banlist's restriction tiers to conf lists
//!
//! The banlist is the tab-separated table copied from the format's web page:
//! the card name sits in the third column and the status in the fourth.

use crate::error::Result;
use crate::io::{load_conf, read_text};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use ygo_common::{ConfFile, Tier};

/// Card name → restriction tier
pub type Banlist = HashMap<String, Tier>;

/// Outcome of applying a banlist to one conf file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TierUpdate {
    /// Entries in the file
    pub entries: usize,
    /// Entries whose tier digit changed
    pub changed: usize,
    /// Entries not on the banlist (set to Unlimited)
    pub unlisted: usize,
}

pub fn parse_banlist(text: &str) -> Banlist {
    let mut banlist = Banlist::new();
    for line in text.lines() {
        let parts: Vec<&str> = line.trim().split('\t').collect();
        if parts.len() >= 4 {
            banlist.insert(parts[2].trim().to_string(), Tier::from_status(parts[3]));
        }
    }
    banlist
}

pub fn load_banlist(path: &Path) -> Result<Banlist> {
    let banlist = parse_banlist(&read_text(path)?);
    log::info!("Loaded {} banlist entries from {}", banlist.len(), path.display());
    Ok(banlist)
}

/// Set every entry's tier from the banlist; cards not listed become Unlimited.
pub fn apply_tiers(conf: &mut ConfFile, banlist: &Banlist) -> TierUpdate {
    let mut update = TierUpdate::default();
    for entry in conf.entries_mut() {
        update.entries += 1;
        let tier = match banlist.get(&entry.name) {
            Some(tier) => *tier,
            None => {
                update.unlisted += 1;
                Tier::Unlimited
            }
        };
        if entry.tier != tier.digit() {
            entry.tier = tier.digit();
            update.changed += 1;
        }
    }
    update
}

/// Rewrite each conf file in place with the banlist's tiers.
pub fn apply_banlist(banlist_path: &Path, conf_paths: &[PathBuf]) -> Result<Vec<TierUpdate>> {
    let banlist = load_banlist(banlist_path)?;

    let mut updates = Vec::with_capacity(conf_paths.len());
    for path in conf_paths {
        let mut conf = load_conf(path)?;
        let update = apply_tiers(&mut conf, &banlist);
        conf.save(path)?;
        log::info!(
            "Updated {}: {} entries, {} tier changes, {} not on the banlist",
            path.display(),
            update.entries,
            update.changed,
            update.unlisted
        );
        updates.push(update);
    }

    Ok(updates)
}
