//! mrdedup: duplicate removal for sorted bisulfite mapped reads.
//!
//! Reads that map to the same chromosome, start, end and strand are treated
//! as copies of one fragment and collapsed to a single random representative.
//! In sequence-aware mode, copies with different methylation patterns at
//! informative cytosines are kept apart, one representative per pattern.
//!
//! # Features
//!
//! - **Single pass**: only the current duplicate group is held in memory
//! - **Sort checking**: unsorted input is rejected instead of silently mis-grouped
//! - **Reproducible**: all random choices come from one seeded generator
//! - **Gzip transparent**: compressed input is detected, `.gz` output is compressed
//!
//! # Example
//!
//! ```rust,no_run
//! use mrdedup::{DedupConfig, DuplicateRemoverCommand};
//!
//! let cmd = DuplicateRemoverCommand::new(DedupConfig::new().with_sequence(true));
//! let mut out = std::io::stdout();
//! let report = cmd.run("reads.mr.gz", &mut out).unwrap();
//! eprintln!("{}", report.stats);
//! ```

pub mod commands;
pub mod config;
pub mod mr;
pub mod read;
pub mod stats;
pub mod streaming;

// Re-export commonly used types
pub use commands::{DedupReport, DuplicateRemoverCommand, GroupResolver};
pub use config::{DedupConfig, DedupPolicy, SiteContext, DEFAULT_SEED};
pub use mr::{parse_reads, read_reads, MrError, MrReader};
pub use read::{MappedRead, Strand};
pub use stats::{DedupStats, DuplicateHistogram};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{DedupReport, DuplicateRemoverCommand};
    pub use crate::config::{DedupConfig, DedupPolicy, SiteContext};
    pub use crate::mr::{MrError, MrReader};
    pub use crate::read::{MappedRead, Strand};
    pub use crate::stats::{DedupStats, DuplicateHistogram};
}
