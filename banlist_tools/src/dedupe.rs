//! Removing cards from one tier list that already sit in another

use crate::error::Result;
use crate::io::load_conf;
use std::path::Path;
use ygo_common::read_card_ids;

/// Drop every entry of `from` whose id is listed in `keep`; rewrites `from` in place.
///
/// A missing `keep` list removes nothing. Returns the number of entries removed.
pub fn remove_duplicates(keep: &Path, from: &Path) -> Result<usize> {
    let keep_ids = read_card_ids(keep)?;
    let mut conf = load_conf(from)?;

    let removed = conf.retain_entries(|entry| !keep_ids.contains(&entry.id));
    conf.save(from)?;

    log::info!(
        "Removed {} cards of {} from {}",
        removed,
        keep.display(),
        from.display()
    );
    Ok(removed)
}
