//! YGOPRODeck API client for resolving card ids by name
//!
//! Uses blocking reqwest; lookups run one after another with a fixed pause
//! after every request to stay under the API's rate limit.

use crate::card_id::CardId;
use crate::error::{LookupError, LookupResult};
use crate::resolver::RemoteSource;
use serde::Deserialize;
use std::time::Duration;

/// Public card info endpoint (v7)
pub const DEFAULT_API_URL: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";

/// Pause after each request
pub const DEFAULT_POST_CALL_DELAY: Duration = Duration::from_millis(200);

const USER_AGENT: &str = "YGO-Banlist-Tools/1.0";

/// Which name search to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameQuery {
    /// `name=`: exact card name
    Exact,
    /// `fname=`: partial name match
    Fuzzy,
}

impl NameQuery {
    pub fn param(self) -> &'static str {
        match self {
            NameQuery::Exact => "name",
            NameQuery::Fuzzy => "fname",
        }
    }
}

/// `cardinfo.php` response body
#[derive(Debug, Deserialize)]
pub struct CardInfoResponse {
    #[serde(default)]
    pub data: Vec<CardRecord>,
}

#[derive(Debug, Deserialize)]
pub struct CardRecord {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl CardInfoResponse {
    /// Id of the first record, in the API's own order
    pub fn first_id(&self) -> Option<CardId> {
        self.data.first().map(|record| CardId::from(record.id))
    }
}

pub struct YgoProDeckClient {
    client: reqwest::blocking::Client,
    base_url: String,
    post_call_delay: Duration,
}

impl YgoProDeckClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            post_call_delay: DEFAULT_POST_CALL_DELAY,
        }
    }

    pub fn with_post_call_delay(mut self, delay: Duration) -> Self {
        self.post_call_delay = delay;
        self
    }

    pub fn post_call_delay(&self) -> Duration {
        self.post_call_delay
    }

    /// Run a single search. No pause is applied here.
    ///
    /// `Ok(None)` means the API answered but listed no cards.
    pub fn fetch(&self, query: NameQuery, name: &str) -> LookupResult<Option<CardId>> {
        log::debug!("Querying YGOPRODeck ({}={})", query.param(), name);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[(query.param(), name)])
            .header("User-Agent", USER_AGENT)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus(status));
        }

        let body = response.text()?;
        let parsed: CardInfoResponse = serde_json::from_str(&body)?;
        Ok(parsed.first_id())
    }

    /// One search followed by the post-call pause; failures become `None`.
    fn attempt(&self, query: NameQuery, name: &str) -> Option<CardId> {
        let result = self.fetch(query, name);
        if !self.post_call_delay.is_zero() {
            std::thread::sleep(self.post_call_delay);
        }

        match result {
            Ok(id) => id,
            // The API answers unknown names with a 400
            Err(LookupError::HttpStatus(status)) => {
                log::debug!(
                    "{:?} search failed for '{}': HTTP {}",
                    query,
                    name,
                    status
                );
                None
            }
            Err(e) => {
                log::warn!("Error querying YGOPRODeck for '{}': {}", name, e);
                None
            }
        }
    }
}

impl Default for YgoProDeckClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSource for YgoProDeckClient {
    fn lookup(&self, name: &str) -> Option<CardId> {
        self.attempt(NameQuery::Exact, name)
            .or_else(|| self.attempt(NameQuery::Fuzzy, name))
    }
}

#[cfg(test)]
#[path = "ygoprodeck_tests.rs"]
mod tests;
