//! I/O module for reading and writing sequence files.
//!
//! Provides the FASTA reader and writer and the gene-name list loader.

pub mod fasta;
pub mod genes;

// Re-export main types
pub use fasta::{FastaReader, FastaWriter};
pub use genes::read_gene_names;
