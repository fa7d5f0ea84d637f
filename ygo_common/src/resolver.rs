//! Name-to-id resolution over layered lookup sources
//!
//! A name is normalized once, then offered to the remote source (exact, then
//! fuzzy search) and after that to each local store in priority order. The
//! first id wins. Sources swallow their own failures, so `resolve` only ever
//! answers "this id" or "not found".

use crate::card_id::CardId;
use crate::normalize::normalize;

/// A web card database queried by name.
///
/// Implementations run their exact and fuzzy searches inside `lookup` and
/// apply their own post-call pause.
pub trait RemoteSource {
    fn lookup(&self, name: &str) -> Option<CardId>;
}

/// A local store mapping card names to ids (card database, mapping file).
pub trait LocalSource {
    /// Short description used in log lines, usually the file path
    fn label(&self) -> &str;

    fn lookup(&self, name: &str) -> Option<CardId>;
}

/// Remote source first, then local stores in the order they were added.
#[derive(Default)]
pub struct Resolver {
    remote: Option<Box<dyn RemoteSource>>,
    locals: Vec<Box<dyn LocalSource>>,
}

impl Resolver {
    /// A resolver with no sources; every name resolves to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote(mut self, remote: impl RemoteSource + 'static) -> Self {
        self.remote = Some(Box::new(remote));
        self
    }

    /// Append a local store with the lowest priority so far.
    pub fn with_local(mut self, local: impl LocalSource + 'static) -> Self {
        self.locals.push(Box::new(local));
        self
    }

    pub fn push_local(&mut self, local: Box<dyn LocalSource>) {
        self.locals.push(local);
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local_labels(&self) -> Vec<&str> {
        self.locals.iter().map(|local| local.label()).collect()
    }

    /// Resolve a card name to its id, or `None` when no source knows it.
    pub fn resolve(&self, card_name: &str) -> Option<CardId> {
        let name = normalize(card_name);
        if name.is_empty() {
            log::warn!("Skipping lookup for empty card name: {:?}", card_name);
            return None;
        }

        if let Some(remote) = &self.remote {
            if let Some(id) = remote.lookup(&name) {
                log::debug!("Resolved '{}' remotely: {}", card_name, id);
                return Some(id);
            }
        }

        for local in &self.locals {
            if let Some(id) = local.lookup(&name) {
                log::info!("Found '{}' in {} with ID: {}", card_name, local.label(), id);
                return Some(id);
            }
        }

        log::warn!("Card ID not found for: '{}'", card_name);
        None
    }

    /// Resolve, substituting the caller's placeholder id on a miss.
    pub fn resolve_or(&self, card_name: &str, default_id: &CardId) -> CardId {
        self.resolve(card_name).unwrap_or_else(|| default_id.clone())
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
