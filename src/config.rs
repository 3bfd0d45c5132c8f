//! Run configuration for duplicate removal.
//!
//! All switches are fixed for the whole run and passed to the engine by
//! value; nothing here is global.

/// Seed used when none is given on the command line.
pub const DEFAULT_SEED: u64 = 408;

/// How a group of identically placed reads is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Keep one random read per placement.
    #[default]
    PositionOnly,
    /// Keep one random read per distinct methylation pattern.
    SequenceAware,
}

/// Which offsets count as informative when building methylation patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteContext {
    /// Cytosines followed by a guanine in some read of the group.
    #[default]
    CpG,
    /// Any offset where some read of the group shows a cytosine.
    AllCytosines,
}

/// Configuration for one duplicate-removal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupConfig {
    pub policy: DedupPolicy,
    pub context: SiteContext,
    /// Fail on reads that break sort order.
    pub validate_sort: bool,
    pub seed: u64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DedupConfig {
    pub fn new() -> Self {
        Self {
            policy: DedupPolicy::PositionOnly,
            context: SiteContext::CpG,
            validate_sort: true,
            seed: DEFAULT_SEED,
        }
    }

    /// Use methylation patterns to tell duplicates apart.
    pub fn with_sequence(mut self, use_sequence: bool) -> Self {
        self.policy = if use_sequence {
            DedupPolicy::SequenceAware
        } else {
            DedupPolicy::PositionOnly
        };
        self
    }

    /// Use every cytosine instead of CpG sites only.
    pub fn with_all_cytosines(mut self, all_c: bool) -> Self {
        self.context = if all_c {
            SiteContext::AllCytosines
        } else {
            SiteContext::CpG
        };
        self
    }

    pub fn with_sort_validation(mut self, validate: bool) -> Self {
        self.validate_sort = validate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
