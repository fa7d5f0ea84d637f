//! Turning plain card name lists into conf lists

use crate::error::{Result, ToolError};
use crate::io::{read_name_list, write_text};
use std::path::{Path, PathBuf};
use ygo_common::{ConfEntry, ConfFile, Resolver, Tier};

/// Outcome of converting one name list
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractOutcome {
    pub output: PathBuf,
    pub written: usize,
    pub not_found: Vec<String>,
}

/// Summary over all inputs
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub outcomes: Vec<ExtractOutcome>,
    /// Inputs that did not exist
    pub skipped: Vec<PathBuf>,
    /// Where unresolved names were written, if any were
    pub report: Option<PathBuf>,
}

impl ExtractSummary {
    pub fn not_found(&self) -> impl Iterator<Item = &String> {
        self.outcomes.iter().flat_map(|o| o.not_found.iter())
    }
}

/// `OnlyRedCards.txt` → `OnlyRedCards.conf`
pub fn conf_path_for(input: &Path) -> PathBuf {
    input.with_extension("conf")
}

/// Resolve every name in `input` and write the hits to `output`.
///
/// `output` must differ from `input`; a `.conf` name list is rejected rather than overwritten.
pub fn convert_name_list(
    input: &Path,
    output: &Path,
    resolver: &Resolver,
) -> Result<ExtractOutcome> {
    if output == input {
        return Err(ToolError::InvalidInput(format!(
            "{} would be overwritten by its own conf output",
            input.display()
        )));
    }
    let names = read_name_list(input)?;

    let mut conf = ConfFile::new();
    let mut not_found = Vec::new();
    for name in names {
        match resolver.resolve(&name) {
            Some(id) => conf.push(ConfEntry::new(id, Tier::Limited, name)),
            None => not_found.push(name),
        }
    }

    conf.save(output)?;
    log::info!(
        "Processed {} cards from '{}' into '{}'",
        conf.len(),
        input.display(),
        output.display()
    );

    Ok(ExtractOutcome {
        output: output.to_path_buf(),
        written: conf.len(),
        not_found,
    })
}

/// Convert each input list next to itself and collect the misses in `report`.
pub fn extract_ids(
    inputs: &[PathBuf],
    report: &Path,
    resolver: &Resolver,
) -> Result<ExtractSummary> {
    let mut summary = ExtractSummary::default();

    for input in inputs {
        if !input.exists() {
            log::error!("Input file {} not found!", input.display());
            summary.skipped.push(input.clone());
            continue;
        }
        let outcome = convert_name_list(input, &conf_path_for(input), resolver)?;
        summary.outcomes.push(outcome);
    }

    let missing: Vec<&str> = summary.not_found().map(String::as_str).collect();
    if missing.is_empty() {
        log::info!("All cards were found.");
    } else {
        write_text(report, &format!("{}\n", missing.join("\n")))?;
        log::warn!(
            "{} cards were not found. See '{}'.",
            missing.len(),
            report.display()
        );
        summary.report = Some(report.to_path_buf());
    }

    Ok(summary)
}
