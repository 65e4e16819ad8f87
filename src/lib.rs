//! Extract FASTA records by gene name.
//!
//! Records whose identifier is a listed gene name, optionally followed by a
//! `.<digits>` version suffix, are grouped per gene and written back out as
//! FASTA. Each group can be reduced to its longest sequence.

pub mod cli;
pub mod extractor;
pub mod io;
pub mod selection;
