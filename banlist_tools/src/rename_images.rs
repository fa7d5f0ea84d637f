//! Renaming card artwork files from card names to card ids

use crate::error::{Result, ToolError};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use ygo_common::{CardDataFile, CardId};

const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// A planned rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameAction {
    pub source: PathBuf,
    pub target: PathBuf,
    pub card_id: CardId,
}

/// Summary of a rename pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: Vec<RenameAction>,
    /// Files already named after their id
    pub verified: usize,
    pub unmatched: Vec<String>,
    /// Renames skipped because the target already exists
    pub conflicts: Vec<String>,
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Image files in `dir`, sorted by file name.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ToolError::MissingInput(dir.to_path_buf()),
        _ => ToolError::io(dir, e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ToolError::io(dir, e))?.path();
        if path.is_file() && is_image(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Rename every image whose name matches a card to `<id>.png`.
///
/// With `dry_run` the renames are only logged; the summary is the same as a real run.
pub fn rename_images(
    card_data: &CardDataFile,
    dir: &Path,
    dry_run: bool,
) -> Result<RenameSummary> {
    let ids: HashMap<String, CardId> = card_data.by_normalized_key();
    let mut summary = RenameSummary::default();
    let mut planned = HashSet::new();

    for source in list_images(dir)? {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let key = source
            .file_stem()
            .map(|s| s.to_string_lossy().trim().to_lowercase())
            .unwrap_or_default();
        log::debug!("Processing file: {} (normalized: {})", file_name, key);

        let Some(card_id) = ids.get(&key) else {
            log::info!("No matching entry found for '{}', skipping", file_name);
            summary.unmatched.push(file_name);
            continue;
        };

        let target_name = format!("{}.png", card_id);
        if file_name == target_name {
            log::info!("Verified '{}' is correctly named", file_name);
            summary.verified += 1;
            continue;
        }

        let target = dir.join(&target_name);
        // Several images can map to the same card; only the first one gets the id
        if target.exists() || planned.contains(&target) {
            log::warn!(
                "Cannot rename '{}': '{}' already exists",
                file_name,
                target_name
            );
            summary.conflicts.push(file_name);
            continue;
        }

        planned.insert(target.clone());
        if dry_run {
            log::info!("Would rename '{}' to '{}'", file_name, target_name);
        } else {
            fs::rename(&source, &target).map_err(|e| ToolError::io(&source, e))?;
            log::info!("Renamed '{}' to '{}'", file_name, target_name);
        }
        summary.renamed.push(RenameAction {
            source,
            target,
            card_id: card_id.clone(),
        });
    }

    log::info!(
        "Renaming complete: {} renamed, {} verified, {} unmatched, {} conflicts",
        summary.renamed.len(),
        summary.verified,
        summary.unmatched.len(),
        summary.conflicts.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_jpg_and_png_count_as_images() {
        assert!(is_image(Path::new("Dark Magician.jpg")));
        assert!(is_image(Path::new("Dark Magician.PNG")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("README")));
    }
}
