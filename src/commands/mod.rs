//! Duplicate-removal engine: stream driver, group resolver and pattern extractor.

pub mod dedup;
pub mod patterns;
pub mod resolve;

pub use dedup::{DedupReport, DuplicateRemoverCommand};
pub use patterns::{informative_sites, methylation_pattern, partition_by_pattern, PatternClass};
pub use resolve::GroupResolver;
