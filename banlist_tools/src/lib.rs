//! Banlist Tools - Yu-Gi-Oh format list maintenance
//!
//! Keeps the simulator's `.conf` tier lists and card databases in sync with a
//! format's published banlists. Each command is a library function returning
//! a small summary; `main.rs` only wires them to the command line.

pub mod banlist;
pub mod cdb_labels;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod extra_deck;
pub mod extract_ids;
pub mod io;
pub mod missing_cards;
pub mod rename_images;

pub use banlist::{apply_banlist, TierUpdate};
pub use cdb_labels::{label_databases, LabelStats};
pub use config::ResolverArgs;
pub use dedupe::remove_duplicates;
pub use error::{Result, ToolError};
pub use extra_deck::{add_extra_deck_cards, remove_extra_deck, ExtraDeckTargets};
pub use extract_ids::{extract_ids, ExtractSummary};
pub use missing_cards::{find_missing, MissingSummary};
pub use rename_images::{rename_images, RenameSummary};
