//! Cross-referencing a card CSV export against the red and blue lists
//!
//! The export starts with a few title rows before the real header, and
//! repeats header-like rows between sections. Rows without a usable numeric
//! id are resolved by name.

use crate::error::{Result, ToolError};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use ygo_common::{read_card_ids, CardId, ConfEntry, ConfFile, Resolver, Tier};

const ID_COLUMN: &str = "Card ID";
const NAME_COLUMN: &str = "Card Name";

/// One data row of the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// Raw id cell, trimmed; may be empty or non-numeric
    pub card_id: String,
    pub card_name: String,
}

/// Read the card rows out of a CSV export.
pub fn parse_card_export<R: Read>(reader: R) -> Result<Vec<ExportRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = rdr.records();

    let mut header = None;
    for record in records.by_ref() {
        let record = record?;
        let has = |column: &str| record.iter().any(|cell| cell.trim() == column);
        if has(ID_COLUMN) && has(NAME_COLUMN) {
            header = Some(record);
            break;
        }
    }
    let header = header.ok_or_else(|| {
        ToolError::InvalidInput(format!(
            "no header row with '{}' and '{}' columns",
            ID_COLUMN, NAME_COLUMN
        ))
    })?;
    log::debug!("Detected headers: {:?}", header);

    let position = |column: &str| header.iter().position(|cell| cell.trim() == column);
    let id_idx = position(ID_COLUMN);
    let name_idx = position(NAME_COLUMN);
    let cell = |record: &csv::StringRecord, idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if record.iter().filter(|c| !c.trim().is_empty()).count() < 2 {
            continue;
        }

        let card_name = cell(&record, name_idx);
        if card_name == NAME_COLUMN || card_name == "Tier" {
            continue;
        }

        rows.push(ExportRow {
            card_id: cell(&record, id_idx),
            card_name,
        });
        if rows.len() % 1000 == 0 {
            log::info!("Processed {} cards...", rows.len());
        }
    }

    log::info!("Loaded {} cards from CSV", rows.len());
    Ok(rows)
}

pub fn read_card_export(path: &Path) -> Result<Vec<ExportRow>> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ToolError::MissingInput(path.to_path_buf()),
        _ => ToolError::io(path, e),
    })?;
    parse_card_export(file)
}

/// Result of a missing-cards scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MissingSummary {
    pub scanned: usize,
    /// Rows whose id came from the resolver
    pub resolved: usize,
    /// Rows left without any id
    pub unresolved: usize,
    /// Distinct missing cards written
    pub missing: usize,
}

/// Cards from `rows` listed in none of `known`, keyed by id (later rows win).
pub fn find_missing_cards(
    rows: &[ExportRow],
    known: &HashSet<CardId>,
    resolver: &Resolver,
    summary: &mut MissingSummary,
) -> BTreeMap<CardId, String> {
    let mut missing = BTreeMap::new();

    for row in rows {
        summary.scanned += 1;
        log::debug!("Looking up ID for: {}", row.card_name);

        let id = match CardId::parse(&row.card_id) {
            Some(id) => Some(id),
            None if row.card_name.is_empty() => None,
            None => {
                let id = resolver.resolve(&row.card_name);
                if id.is_some() {
                    summary.resolved += 1;
                }
                id
            }
        };

        match id {
            Some(id) if !known.contains(&id) => {
                missing.insert(id, row.card_name.clone());
            }
            Some(_) => {}
            None => summary.unresolved += 1,
        }
    }

    summary.missing = missing.len();
    missing
}

/// Write every exported card missing from the red and blue lists to `output`.
pub fn find_missing(
    csv_path: &Path,
    red: &Path,
    blue: &Path,
    output: &Path,
    resolver: &Resolver,
) -> Result<MissingSummary> {
    let mut known = read_card_ids(red)?;
    known.extend(read_card_ids(blue)?);

    let rows = read_card_export(csv_path)?;
    let mut summary = MissingSummary::default();
    let missing = find_missing_cards(&rows, &known, resolver, &mut summary);

    let conf: ConfFile = missing
        .into_iter()
        .map(|(id, name)| ConfEntry::new(id, Tier::Limited, name))
        .collect();
    conf.save(output)?;

    log::info!(
        "Processed {} missing cards into '{}'",
        summary.missing,
        output.display()
    );
    Ok(summary)
}
