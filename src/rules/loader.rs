//! Rules file loading.
//!
//! # Responsibilities
//! - Read the comma-delimited rules file line by line
//! - Feed (source, destination) pairs to the index builder in file order
//! - Skip and log bad rows without aborting the load
//!
//! # Design Decisions
//! - An unreadable file is fatal; a bad row only costs that row
//! - Columns beyond the second are ignored
//! - File order is preserved verbatim into the index

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::rules::index::{RuleIndex, RuleIndexBuilder};

/// The rules file could not be read at all. Fatal to startup.
#[derive(Debug, Error)]
pub enum RulesFileError {
    #[error("rules file unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}

/// Load the rules file into a frozen index.
///
/// Rows with fewer than two columns and rows whose source URL is rejected by
/// the builder are logged and skipped; the load continues.
pub fn load_rules(path: &Path) -> Result<RuleIndex, RulesFileError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut builder = RuleIndexBuilder::new();
    let mut loaded = 0usize;
    let mut skipped = 0usize;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = number + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut columns = line.split(',');
        let (source, destination) = match (columns.next(), columns.next()) {
            (Some(source), Some(destination)) => (source, destination),
            _ => {
                tracing::warn!(line = line_number, row = %line, "Invalid row format, skipping");
                skipped += 1;
                continue;
            }
        };

        if let Err(e) = builder.add(source, destination) {
            tracing::warn!(line = line_number, error = %e, "Invalid rule, skipping");
            skipped += 1;
            continue;
        }
        loaded += 1;
    }

    let index = builder.build();
    tracing::info!(
        path = %path.display(),
        loaded,
        skipped,
        keys = index.len(),
        "Redirect rules loaded"
    );
    Ok(index)
}
