//! Rewriting `datas.ot` in card databases from conf list membership
//!
//! Red cards are marked illegal, blue cards TCG, white cards custom; every
//! card on none of the lists is hidden. All writes for one database happen in
//! a single transaction.

use crate::error::{Result, ToolError};
use rusqlite::{params, Connection, Transaction};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use ygo_common::{read_card_ids, CardId};

/// Hidden from deck building
pub const OT_HIDDEN: i64 = 4096;
/// Shown as illegal
pub const OT_ILLEGAL: i64 = 8;
pub const OT_TCG: i64 = 2;
pub const OT_CUSTOM: i64 = 32;

/// Card ids per list color
#[derive(Debug, Default, Clone)]
pub struct ListSets {
    pub red: HashSet<CardId>,
    pub blue: HashSet<CardId>,
    pub white: HashSet<CardId>,
}

impl ListSets {
    pub fn load(red: &Path, blue: &Path, white: &Path) -> Result<Self> {
        Ok(Self {
            red: read_card_ids(red)?,
            blue: read_card_ids(blue)?,
            white: read_card_ids(white)?,
        })
    }

    /// Every listed id, any color
    pub fn all(&self) -> HashSet<&CardId> {
        self.red.iter().chain(&self.blue).chain(&self.white).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty() && self.blue.is_empty() && self.white.is_empty()
    }
}

/// Rows changed in one database
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelStats {
    pub hidden: usize,
    pub illegal: usize,
    pub tcg: usize,
    pub custom: usize,
}

/// Relabel one open database.
pub fn label_connection(
    conn: &mut Connection,
    lists: &ListSets,
) -> rusqlite::Result<LabelStats> {
    let tx = conn.transaction()?;
    let stats = label_tx(&tx, lists)?;
    tx.commit()?;
    Ok(stats)
}

fn label_tx(tx: &Transaction<'_>, lists: &ListSets) -> rusqlite::Result<LabelStats> {
    // Listed ids go through a temp table; an IN (...) list would hit the bound-parameter limit
    tx.execute_batch(
        "CREATE TEMP TABLE IF NOT EXISTS listed_ids (id INTEGER PRIMARY KEY);
         DELETE FROM listed_ids;",
    )?;
    {
        let mut insert = tx.prepare_cached("INSERT OR IGNORE INTO listed_ids (id) VALUES (?1)")?;
        for id in lists.all() {
            match id.as_i64() {
                Some(id) => {
                    insert.execute(params![id])?;
                }
                None => log::warn!("Card id out of range, ignored: {}", id),
            }
        }
    }

    let hidden = tx.execute(
        "UPDATE datas SET ot = ?1 WHERE id NOT IN (SELECT id FROM listed_ids)",
        params![OT_HIDDEN],
    )?;
    log::info!("Updated {} unlisted cards to OT = {}.", hidden, OT_HIDDEN);

    let illegal = set_ot(tx, &lists.red, OT_ILLEGAL)?;
    log::info!("Updated {} RED cards to ILLEGAL ({}).", illegal, OT_ILLEGAL);
    let tcg = set_ot(tx, &lists.blue, OT_TCG)?;
    log::info!("Updated {} BLUE cards to TCG ({}).", tcg, OT_TCG);
    let custom = set_ot(tx, &lists.white, OT_CUSTOM)?;
    log::info!("Updated {} WHITE cards to CUSTOM ({}).", custom, OT_CUSTOM);

    tx.execute_batch("DROP TABLE temp.listed_ids;")?;

    Ok(LabelStats {
        hidden,
        illegal,
        tcg,
        custom,
    })
}

fn set_ot(tx: &Transaction<'_>, ids: &HashSet<CardId>, ot: i64) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare_cached("UPDATE datas SET ot = ?1 WHERE id = ?2")?;
    let mut count = 0;
    for id in ids.iter().filter_map(CardId::as_i64) {
        count += stmt.execute(params![ot, id])?;
    }
    Ok(count)
}

/// Relabel every database from the three conf lists.
///
/// Empty lists abort before any database is touched. A database that fails is
/// logged and the rest are still processed.
pub fn label_databases(
    red: &Path,
    blue: &Path,
    white: &Path,
    databases: &[PathBuf],
) -> Result<Vec<(PathBuf, LabelStats)>> {
    let lists = ListSets::load(red, blue, white)?;
    if lists.is_empty() {
        return Err(ToolError::InvalidInput(
            "No card IDs found in the conf lists. Aborting update.".to_string(),
        ));
    }

    let mut results = Vec::new();
    for path in databases {
        if !path.exists() {
            log::warn!("Card database not found, skipping: {}", path.display());
            continue;
        }

        log::info!("Relabelling cards in {}...", path.display());
        let outcome =
            Connection::open(path).and_then(|mut conn| label_connection(&mut conn, &lists));
        match outcome {
            Ok(stats) => {
                log::info!("Database update complete for {}!", path.display());
                results.push((path.clone(), stats));
            }
            Err(e) => log::error!("Database error in {}: {}", path.display(), e),
        }
    }

    Ok(results)
}
