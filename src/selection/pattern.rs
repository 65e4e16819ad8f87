use anyhow::{Context, Result};
use regex::bytes::Regex;
use std::collections::HashSet;

/// Identifier matcher for a single gene name.
///
/// An identifier matches when it is exactly the gene name, optionally followed
/// by a version suffix made of a dot and one or more digits (`BRCA1`, `BRCA1.2`).
/// The gene name is taken literally, so characters such as `.` or `+` in it
/// carry no regex meaning.
#[derive(Debug, Clone)]
pub struct GenePattern {
    name: String,
    regex: Regex,
}

impl GenePattern {
    /// Compiles the pattern `^<name>(\.\d+)?$` for `name`.
    ///
    /// # Example
    /// ```
    /// use fasta_extract::selection::GenePattern;
    ///
    /// let pattern = GenePattern::new("G1").unwrap();
    /// assert!(pattern.is_match(b"G1.3"));
    /// assert!(!pattern.is_match(b"G1X"));
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"^{}(\.\d+)?$", regex::escape(name)))
            .with_context(|| format!("Failed to build identifier pattern for gene: {}", name))?;

        Ok(Self {
            name: name.to_string(),
            regex,
        })
    }

    /// Gene name this pattern was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tests a record identifier against the pattern.
    pub fn is_match(&self, identifier: &[u8]) -> bool {
        self.regex.is_match(identifier)
    }
}

/// Compiles one pattern per distinct gene name, preserving first-seen order.
///
/// Repeated names are skipped so that a record never lands in the same group twice.
pub fn compile_patterns(gene_names: &[String]) -> Result<Vec<GenePattern>> {
    let mut seen: HashSet<&String> = HashSet::new();

    gene_names
        .iter()
        .filter(|name| seen.insert(*name))
        .map(|name| GenePattern::new(name))
        .collect()
}
