//! Gene-name matching and per-gene record selection.

pub mod groups;
pub mod pattern;

pub use groups::{MatchGroups, group_records};
pub use pattern::{GenePattern, compile_patterns};
