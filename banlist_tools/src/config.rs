//! Lookup source configuration shared by the commands that resolve card names

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use ygo_common::ygoprodeck::{DEFAULT_API_URL, YgoProDeckClient};
use ygo_common::{cdb, CardDataFile, Resolver};

/// Where card ids are looked up, in priority order: API, card databases, mapping file
#[derive(Args, Debug, Clone)]
pub struct ResolverArgs {
    /// YGOPRODeck card info endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Pause after each API request, in milliseconds
    #[arg(long, default_value_t = 200)]
    pub delay_ms: u64,

    /// Card database to search after the API (repeatable, searched in order).
    /// Defaults to the EDOPro expansion databases.
    #[arg(long = "cdb", value_name = "PATH")]
    pub cdb: Vec<PathBuf>,

    /// Name-to-id mapping file searched last
    #[arg(long, value_name = "PATH")]
    pub card_data: Option<PathBuf>,

    /// Skip the API and use local sources only
    #[arg(long, default_value_t = false)]
    pub offline: bool,
}

impl Default for ResolverArgs {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            delay_ms: 200,
            cdb: Vec::new(),
            card_data: None,
            offline: false,
        }
    }
}

/// Returns the EDOPro expansion databases: ~/.local/opt/edopro/app/expansions/cards*.cdb
pub fn default_cdb_paths() -> Vec<PathBuf> {
    let expansions = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("opt")
        .join("edopro")
        .join("app")
        .join("expansions");
    vec![
        expansions.join("cards.cdb"),
        expansions.join("cards-unofficial.cdb"),
    ]
}

impl ResolverArgs {
    pub fn cdb_paths(&self) -> Vec<PathBuf> {
        if self.cdb.is_empty() {
            default_cdb_paths()
        } else {
            self.cdb.clone()
        }
    }

    /// Build the resolver. Unavailable local stores are logged and left out.
    pub fn build_resolver(&self) -> Resolver {
        let mut resolver = Resolver::new();

        if self.offline {
            log::info!("Offline mode: YGOPRODeck lookups disabled");
        } else {
            resolver = resolver.with_remote(
                YgoProDeckClient::with_base_url(self.api_url.as_str())
                    .with_post_call_delay(Duration::from_millis(self.delay_ms)),
            );
        }

        for source in cdb::open_all(&self.cdb_paths()) {
            resolver.push_local(Box::new(source));
        }

        if let Some(path) = &self.card_data {
            match CardDataFile::open(path) {
                Ok(Some(data)) => resolver.push_local(Box::new(data)),
                Ok(None) => {}
                Err(e) => log::warn!("Failed to load card data {}: {}", path.display(), e),
            }
        }

        log::info!(
            "Lookup order: {}{}",
            if resolver.has_remote() { "YGOPRODeck, " } else { "" },
            resolver.local_labels().join(", ")
        );
        resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_cdb_paths_point_at_edopro_expansions() {
        let paths = default_cdb_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with(".local/opt/edopro/app/expansions/cards.cdb"));
        assert!(paths[1].ends_with("cards-unofficial.cdb"));
    }

    #[test]
    fn explicit_cdb_paths_replace_defaults() {
        let args = ResolverArgs {
            cdb: vec![PathBuf::from("goat.cdb")],
            ..ResolverArgs::default()
        };
        assert_eq!(args.cdb_paths(), vec![PathBuf::from("goat.cdb")]);
    }

    #[test]
    fn offline_resolver_uses_card_data_only() {
        let dir = TempDir::new().unwrap();
        let card_data = dir.path().join("cardData.json");
        std::fs::write(&card_data, r#"[{"name": "Dark Magician", "id": 46986414}]"#).unwrap();

        let args = ResolverArgs {
            offline: true,
            cdb: vec![dir.path().join("missing.cdb")],
            card_data: Some(card_data),
            ..ResolverArgs::default()
        };
        let resolver = args.build_resolver();

        assert!(!resolver.has_remote());
        assert_eq!(resolver.local_labels().len(), 1);
        assert_eq!(
            resolver.resolve("Dark Magician (Anime)").unwrap().as_str(),
            "46986414"
        );
    }
}
