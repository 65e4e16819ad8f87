// Command-line interface definition

use crate::io::fasta::DEFAULT_LINE_WIDTH;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fasta-extract",
    version,
    about = "Filter a FASTA file for specific genes and optionally keep the longest sequence per gene",
    long_about = None
)]
pub struct Cli {
    /// Input FASTA file (plain, gzip or BGZF)
    #[arg(value_name = "FASTA")]
    pub input: PathBuf,

    /// File with one gene name per line to filter by
    #[arg(value_name = "GENES")]
    pub gene_names: PathBuf,

    /// Output FASTA file for the selected records (.gz/.bgz/.bgzf for BGZF)
    #[arg(value_name = "FASTA")]
    pub output: PathBuf,

    /// Only output the longest sequence for each gene match
    #[arg(long)]
    pub longest: bool,

    /// Sequence symbols per output line
    #[arg(short = 'w', long, default_value_t = DEFAULT_LINE_WIDTH, value_parser = parse_line_width)]
    pub line_width: usize,

    /// Number of compression threads for compressed output (0 = auto-detect)
    #[arg(short = 't', long, default_value = "0")]
    pub threads: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_line_width(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("line width must be at least 1".to_string()),
        Ok(width) => Ok(width),
        Err(e) => Err(e.to_string()),
    }
}

/// Styled stderr messages for verbose mode.
pub mod fmt {
    use console::style;
    use std::fmt::Display;

    pub fn header(text: impl Display) -> String {
        style(text).bold().underlined().to_string()
    }

    /// Parameter name right-padded to `width` columns.
    pub fn param_aligned(name: &str, width: usize) -> String {
        style(format!("{:<width$}", name, width = width)).cyan().to_string()
    }

    pub fn progress(text: impl Display) -> String {
        format!("{} {}", style("→").blue().bold(), text)
    }

    pub fn success(text: impl Display) -> String {
        format!("{} {}", style("✓").green().bold(), text)
    }

    pub fn warning(text: impl Display) -> String {
        format!("{} {}", style("!").yellow().bold(), style(text).yellow())
    }
}
