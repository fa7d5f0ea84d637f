//! `cardData.json` name-to-id mapping files
//!
//! A JSON list of `{ "name": ..., "id": ... }` records exported from the
//! card database. Ids may be numbers or digit strings.

use crate::card_id::CardId;
use crate::error::{LookupError, LookupResult};
use crate::normalize::normalized_key;
use crate::resolver::LocalSource;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CardDataRecord {
    name: String,
    id: RawCardId,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCardId {
    Number(u64),
    Text(String),
}

/// Exact-name lookup over a mapping file. Later records win on duplicate names.
#[derive(Debug, Clone, Default)]
pub struct CardDataFile {
    label: String,
    /// Valid records in file order
    records: Vec<(String, CardId)>,
    by_name: HashMap<String, CardId>,
}

impl CardDataFile {
    pub fn load(path: &Path) -> LookupResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| LookupError::io(path, e))?;
        let data = Self::from_json(path.display().to_string(), &json)?;
        log::info!("Loaded {} card names from {}", data.len(), path.display());
        Ok(data)
    }

    /// Load a mapping file, or `Ok(None)` if it does not exist.
    pub fn open(path: &Path) -> LookupResult<Option<Self>> {
        if !path.exists() {
            log::info!("Card data file not found, skipping: {}", path.display());
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn from_json(label: impl Into<String>, json: &str) -> LookupResult<Self> {
        let raw_records: Vec<CardDataRecord> = serde_json::from_str(json)?;
        let mut records = Vec::with_capacity(raw_records.len());

        for record in raw_records {
            let id = match record.id {
                RawCardId::Number(id) => Some(CardId::from(id)),
                RawCardId::Text(raw) => CardId::parse(&raw),
            };
            match id {
                Some(id) => records.push((record.name, id)),
                None => log::warn!("Skipping '{}': id is not numeric", record.name),
            }
        }

        let by_name = records.iter().cloned().collect();
        Ok(Self {
            label: label.into(),
            records,
            by_name,
        })
    }

    pub fn get(&self, name: &str) -> Option<&CardId> {
        self.by_name.get(name)
    }

    /// Ids keyed by `normalized_key(name)`, for matching hand-typed names.
    ///
    /// When several names fold to the same key the last record in the file wins.
    pub fn by_normalized_key(&self) -> HashMap<String, CardId> {
        self.records
            .iter()
            .map(|(name, id)| (normalized_key(name), id.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl LocalSource for CardDataFile {
    fn label(&self) -> &str {
        &self.label
    }

    fn lookup(&self, name: &str) -> Option<CardId> {
        self.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_DATA: &str = r#"[
        {"name": "Dark Magician", "id": 46986414},
        {"name": "Pot of Greed", "id": "55144522"},
        {"name": "Dark Magician (Manga)", "id": 46986415},
        {"name": "Broken Entry", "id": "n/a"}
    ]"#;

    #[test]
    fn loads_numeric_and_string_ids() {
        let data = CardDataFile::from_json("cardData.json", CARD_DATA).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.get("Dark Magician").unwrap().as_str(), "46986414");
        assert_eq!(data.get("Pot of Greed").unwrap().as_str(), "55144522");
        assert!(data.get("Broken Entry").is_none());
    }

    #[test]
    fn later_duplicate_names_win() {
        let json = r#"[{"name": "Kuriboh", "id": 1}, {"name": "Kuriboh", "id": 40640057}]"#;
        let data = CardDataFile::from_json("cardData.json", json).unwrap();
        assert_eq!(data.lookup("Kuriboh").unwrap().as_str(), "40640057");
    }

    #[test]
    fn lookup_is_exact() {
        let data = CardDataFile::from_json("cardData.json", CARD_DATA).unwrap();
        assert!(data.lookup("dark magician").is_none());
        assert_eq!(data.label(), "cardData.json");
    }

    #[test]
    fn normalized_keys_fold_case_and_qualifiers() {
        let data = CardDataFile::from_json("cardData.json", CARD_DATA).unwrap();
        let keys = data.by_normalized_key();
        assert!(keys.contains_key("dark magician"));
        assert!(keys.contains_key("pot of greed"));
        assert!(!keys.contains_key("dark magician (manga)"));
        // "Dark Magician (Manga)" comes later in the file
        assert_eq!(keys["dark magician"].as_str(), "46986415");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let result = CardDataFile::from_json("cardData.json", "{not json");
        assert!(matches!(result, Err(LookupError::Parse(_))));
    }

    #[test]
    fn open_missing_file_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(CardDataFile::open(&dir.path().join("cardData.json"))
            .unwrap()
            .is_none());
    }
}
