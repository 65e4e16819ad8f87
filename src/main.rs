use anyhow::Result;
use clap::Parser;
use fasta_extract::cli::{Cli, fmt};
use fasta_extract::extractor::{ExtractOptions, extract_genes};
use fasta_extract::io::read_gene_names;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        eprintln!("{}", fmt::header("FASTA Extract Configuration"));
        eprintln!("{}: {}", fmt::param_aligned("Input", 16), cli.input.display());
        eprintln!("{}: {}", fmt::param_aligned("Gene names", 16), cli.gene_names.display());
        eprintln!("{}: {}", fmt::param_aligned("Output", 16), cli.output.display());
        eprintln!("{}: {}", fmt::param_aligned("Longest only", 16), cli.longest);
        eprintln!("{}: {}", fmt::param_aligned("Line width", 16), cli.line_width);
        eprintln!();
    }

    let gene_names = read_gene_names(&cli.gene_names)?;

    if cli.verbose {
        eprintln!("{}", fmt::progress(format!("Loaded {} gene names", gene_names.len())));
        eprintln!("{}", fmt::progress(format!("Scanning {}...", cli.input.display())));
    }

    let options = ExtractOptions {
        longest: cli.longest,
        line_width: cli.line_width,
        compression_threads: cli.threads,
    };
    let summary = extract_genes(&cli.input, &gene_names, &cli.output, &options)?;

    if cli.verbose {
        eprintln!("{}: {}", fmt::param_aligned("Records scanned", 16), summary.records_scanned);
        eprintln!(
            "{}: {}/{}",
            fmt::param_aligned("Genes found", 16),
            summary.genes_found,
            summary.genes_requested
        );
        eprintln!("{}: {}", fmt::param_aligned("Records written", 16), summary.records_written);
        if !summary.missing_genes.is_empty() {
            eprintln!(
                "{}",
                fmt::warning(format!("No records for: {}", summary.missing_genes.join(", ")))
            );
        }
        eprintln!("{}", fmt::success(format!("Output written to {}", cli.output.display())));
    }

    Ok(())
}
