//! Banlist Tools - Yu-Gi-Oh format list maintenance
//!
//! Applies banlists to simulator conf lists, resolves card names to ids and
//! relabels card databases.

use banlist_tools::{
    add_extra_deck_cards, apply_banlist, extract_ids, find_missing, label_databases,
    remove_duplicates, remove_extra_deck, rename_images, ExtraDeckTargets, ResolverArgs,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ygo_common::{CardDataFile, CardId};

/// Yu-Gi-Oh banlist maintenance - keeps conf lists and card databases in sync
#[derive(Parser, Debug)]
#[command(name = "banlist_tools")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set every conf entry's tier from a tab-separated banlist
    ApplyBanlist {
        /// Banlist table copied from the format page
        #[arg(short, long, default_value = "Banlist.txt")]
        banlist: PathBuf,

        /// Conf lists to update in place
        #[arg(required = true)]
        confs: Vec<PathBuf>,
    },

    /// Append the extra deck banlist's monsters to the tier B/C/D conf lists
    AddExtraDeck {
        /// Extra deck banlist text with "Tier B/C/D Cards" sections
        #[arg(short, long, default_value = "ExtraDeckBanlist.txt")]
        banlist: PathBuf,

        #[arg(long, default_value = "OnlyBlueCards.conf")]
        tier_b: PathBuf,

        #[arg(long, default_value = "OnlyRedCards.conf")]
        tier_c: PathBuf,

        #[arg(long, default_value = "OnlyWhiteCards.conf")]
        tier_d: PathBuf,

        /// Id written for cards no source knows
        #[arg(long, default_value = "00000000")]
        default_id: CardId,

        #[command(flatten)]
        lookup: ResolverArgs,
    },

    /// Resolve plain card name lists into conf lists
    ExtractIds {
        /// Name lists, one card per line; each is written next to itself as .conf
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Where names that could not be resolved are listed
        #[arg(long, default_value = "cards_not_found.txt")]
        report: PathBuf,

        #[command(flatten)]
        lookup: ResolverArgs,
    },

    /// Remove cards from one conf list that already appear in another
    Dedupe {
        #[arg(long, default_value = "OnlyBlueCards.conf")]
        keep: PathBuf,

        #[arg(long, default_value = "OnlyWhiteCards.conf")]
        from: PathBuf,
    },

    /// Rewrite card database `ot` labels from the red, blue and white lists
    LabelDatabases {
        #[arg(long, default_value = "OnlyRedCards.conf")]
        red: PathBuf,

        #[arg(long, default_value = "OnlyBlueCards.conf")]
        blue: PathBuf,

        #[arg(long, default_value = "OnlyWhiteCards.conf")]
        white: PathBuf,

        /// Card databases to relabel
        #[arg(required = true)]
        databases: Vec<PathBuf>,
    },

    /// List cards of a CSV export that are on neither the red nor blue list
    FindMissing {
        /// Card pool CSV export
        csv: PathBuf,

        #[arg(long, default_value = "OnlyRedCards.conf")]
        red: PathBuf,

        #[arg(long, default_value = "OnlyBlueCards.conf")]
        blue: PathBuf,

        #[arg(short, long, default_value = "MissingCards.conf")]
        output: PathBuf,

        #[command(flatten)]
        lookup: ResolverArgs,
    },

    /// Write copies of conf lists without the extra deck monsters
    RemoveExtraDeck {
        /// Extra deck monster names, one per line
        #[arg(short, long, default_value = "ExtraDeck.txt")]
        extra_deck: PathBuf,

        #[arg(long, default_value = "cardData.json")]
        card_data: PathBuf,

        /// Conf lists to filter; output goes to <name>_filtered.conf
        #[arg(required = true)]
        confs: Vec<PathBuf>,
    },

    /// Rename card images from card names to <id>.png
    RenameImages {
        /// Directory holding the images
        dir: PathBuf,

        #[arg(long, default_value = "cardData.json")]
        card_data: PathBuf,

        /// Show planned renames without executing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Resolve card names and print their ids
    Resolve {
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        lookup: ResolverArgs,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> banlist_tools::Result<()> {
    match command {
        Command::ApplyBanlist { banlist, confs } => {
            let updates = apply_banlist(&banlist, &confs)?;
            let changed: usize = updates.iter().map(|u| u.changed).sum();
            log::info!(
                "Banlist applied to {} files, {} tiers changed",
                confs.len(),
                changed
            );
        }

        Command::AddExtraDeck {
            banlist,
            tier_b,
            tier_c,
            tier_d,
            default_id,
            lookup,
        } => {
            let targets = ExtraDeckTargets {
                tier_b,
                tier_c,
                tier_d,
            };
            let resolver = lookup.build_resolver();
            let results = add_extra_deck_cards(&banlist, &targets, &resolver, &default_id)?;
            for (path, appended) in results {
                println!("{}\t{}", appended, path.display());
            }
        }

        Command::ExtractIds {
            inputs,
            report,
            lookup,
        } => {
            let resolver = lookup.build_resolver();
            let summary = extract_ids(&inputs, &report, &resolver)?;
            let written: usize = summary.outcomes.iter().map(|o| o.written).sum();
            log::info!(
                "Wrote {} cards to {} conf files ({} not found, {} inputs skipped)",
                written,
                summary.outcomes.len(),
                summary.not_found().count(),
                summary.skipped.len()
            );
        }

        Command::Dedupe { keep, from } => {
            remove_duplicates(&keep, &from)?;
        }

        Command::LabelDatabases {
            red,
            blue,
            white,
            databases,
        } => {
            let results = label_databases(&red, &blue, &white, &databases)?;
            for (path, stats) in &results {
                log::info!(
                    "{}: {} hidden, {} illegal, {} TCG, {} custom",
                    path.display(),
                    stats.hidden,
                    stats.illegal,
                    stats.tcg,
                    stats.custom
                );
            }
            if results.len() < databases.len() {
                log::warn!(
                    "{} of {} databases were not updated",
                    databases.len() - results.len(),
                    databases.len()
                );
            }
        }

        Command::FindMissing {
            csv,
            red,
            blue,
            output,
            lookup,
        } => {
            let resolver = lookup.build_resolver();
            let summary = find_missing(&csv, &red, &blue, &output, &resolver)?;
            log::info!(
                "{} rows scanned, {} ids resolved by name, {} without id",
                summary.scanned,
                summary.resolved,
                summary.unresolved
            );
        }

        Command::RemoveExtraDeck {
            extra_deck,
            card_data,
            confs,
        } => {
            let card_data = CardDataFile::load(&card_data)?;
            remove_extra_deck(&extra_deck, &card_data, &confs)?;
        }

        Command::RenameImages {
            dir,
            card_data,
            dry_run,
        } => {
            let card_data = CardDataFile::load(&card_data)?;
            rename_images(&card_data, &dir, dry_run)?;
        }

        Command::Resolve { names, lookup } => {
            let resolver = lookup.build_resolver();
            for name in &names {
                match resolver.resolve(name) {
                    Some(id) => println!("{}\t{}", id, name),
                    None => println!("NOT FOUND\t{}", name),
                }
            }
        }
    }

    Ok(())
}
