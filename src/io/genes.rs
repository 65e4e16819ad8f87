//! Gene-name list loading.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads one gene name per line from `path`.
///
/// Lines are trimmed of surrounding whitespace. Blank lines are kept as empty
/// names and duplicates are not removed, so the result lines up one-to-one with
/// the source file.
pub fn read_gene_names(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open gene names file: {}", path.display()))?;

    parse_gene_names(BufReader::new(file))
        .with_context(|| format!("Failed to read gene names from {}", path.display()))
}

/// Parses a newline-delimited gene list from any buffered reader.
pub fn parse_gene_names<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let names = reader
        .lines()
        .map(|line| line.map(|line| line.trim().to_string()))
        .collect::<std::io::Result<Vec<_>>>()?;

    Ok(names)
}
