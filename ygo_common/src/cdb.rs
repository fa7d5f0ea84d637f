//! Local simulator card databases (`.cdb`, SQLite)
//!
//! Card names normally live in `texts.name`, but hand-edited databases have
//! been seen with the name on `datas` instead. The usable table/column is
//! probed once when the file is opened.

use crate::card_id::CardId;
use crate::error::{LookupError, LookupResult};
use crate::resolver::LocalSource;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};

/// Candidate (table, column) pairs holding the card name, in probe order
const NAME_FIELDS: [(&str, &str); 3] = [("texts", "name"), ("datas", "name"), ("datas", "text")];

/// A read-only card database used as a name-to-id store
pub struct CdbSource {
    path: PathBuf,
    label: String,
    conn: Connection,
    table: &'static str,
    column: &'static str,
}

impl CdbSource {
    /// Open a card database, or `Ok(None)` if the file does not exist.
    pub fn open(path: &Path) -> LookupResult<Option<Self>> {
        if !path.exists() {
            log::info!("Card database not found, skipping: {}", path.display());
            return Ok(None);
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let (table, column) = probe_name_field(&conn)?
            .ok_or_else(|| LookupError::MissingNameField(path.to_path_buf()))?;
        log::debug!("{}: card names in {}.{}", path.display(), table, column);

        Ok(Some(Self {
            path: path.to_path_buf(),
            label: path.display().to_string(),
            conn,
            table,
            column,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The (table, column) this store matches names against
    pub fn name_field(&self) -> (&'static str, &'static str) {
        (self.table, self.column)
    }

    /// Exact-name lookup, with errors surfaced.
    pub fn find_id(&self, name: &str) -> LookupResult<Option<CardId>> {
        // Table and column come from NAME_FIELDS, never from input
        let sql = format!(
            "SELECT id FROM {} WHERE {} = ?1 LIMIT 1",
            self.table, self.column
        );
        let id: Option<i64> = self
            .conn
            .query_row(&sql, params![name], |row| row.get(0))
            .optional()?;

        match id {
            Some(raw) => u64::try_from(raw)
                .map(|id| Some(CardId::from(id)))
                .map_err(|_| LookupError::InvalidCardId(raw.to_string())),
            None => Ok(None),
        }
    }
}

impl LocalSource for CdbSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn lookup(&self, name: &str) -> Option<CardId> {
        match self.find_id(name) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Error querying {} for '{}': {}", self.label, name, e);
                None
            }
        }
    }
}

fn probe_name_field(conn: &Connection) -> LookupResult<Option<(&'static str, &'static str)>> {
    for (table, column) in NAME_FIELDS {
        let columns = table_columns(conn, table)?;
        if columns.iter().any(|c| c == column) {
            return Ok(Some((table, column)));
        }
    }
    Ok(None)
}

fn table_columns(conn: &Connection, table: &str) -> LookupResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns: rusqlite::Result<Vec<String>> =
        stmt.query_map([], |row| row.get(1))?.collect();
    Ok(columns?)
}

/// Open every existing database in priority order.
///
/// Missing files are skipped; files that fail to open are logged and skipped.
pub fn open_all(paths: &[PathBuf]) -> Vec<CdbSource> {
    let mut sources = Vec::new();
    for path in paths {
        match CdbSource::open(path) {
            Ok(Some(source)) => sources.push(source),
            Ok(None) => {}
            Err(e) => log::warn!("Failed to open card database {}: {}", path.display(), e),
        }
    }
    sources
}
