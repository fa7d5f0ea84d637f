//! ygo_common - shared building blocks for Yu-Gi-Oh list maintenance
//!
//! Card identifiers, the `.conf` list format, name normalization and the
//! layered name-to-id resolver (YGOPRODeck first, local card databases after).

pub mod card_data;
pub mod card_id;
pub mod cdb;
pub mod conf;
pub mod error;
pub mod normalize;
pub mod resolver;
pub mod ygoprodeck;

// Re-export commonly used items
pub use card_data::CardDataFile;
pub use card_id::CardId;
pub use cdb::CdbSource;
pub use conf::{read_card_ids, ConfEntry, ConfFile, ConfLine, Tier};
pub use error::{LookupError, LookupResult};
pub use normalize::{normalize, normalized_key};
pub use resolver::{LocalSource, RemoteSource, Resolver};
pub use ygoprodeck::YgoProDeckClient;
