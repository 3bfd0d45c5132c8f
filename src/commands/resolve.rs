//! Collapsing a duplicate group into its kept representatives.

use crate::commands::patterns::partition_by_pattern;
use crate::config::{DedupConfig, DedupPolicy, SiteContext};
use crate::mr::Result;
use crate::read::MappedRead;
use crate::stats::DuplicateHistogram;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Picks representatives for each group and tallies unit sizes.
///
/// The random source is seeded once and consulted for every selection in
/// call order, so a run is reproducible from its seed.
#[derive(Debug)]
pub struct GroupResolver<R: Rng = SmallRng> {
    policy: DedupPolicy,
    context: SiteContext,
    rng: R,
    histogram: DuplicateHistogram,
}

impl GroupResolver<SmallRng> {
    /// Resolver seeded from the configured seed.
    pub fn from_config(config: &DedupConfig) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> GroupResolver<R> {
    pub fn with_rng(config: &DedupConfig, rng: R) -> Self {
        Self {
            policy: config.policy,
            context: config.context,
            rng,
            histogram: DuplicateHistogram::new(),
        }
    }

    /// Reduce a non-empty group to its kept reads, in their original order.
    pub fn resolve(&mut self, group: Vec<MappedRead>) -> Result<Vec<MappedRead>> {
        match self.policy {
            DedupPolicy::PositionOnly => Ok(self.resolve_position(group)),
            DedupPolicy::SequenceAware => self.resolve_sequence(group),
        }
    }

    /// One random read per group.
    fn resolve_position(&mut self, mut group: Vec<MappedRead>) -> Vec<MappedRead> {
        if group.is_empty() {
            return group;
        }
        let n = group.len();
        let selected = self.rng.gen_range(0..n);
        self.histogram.record(n);
        vec![group.swap_remove(selected)]
    }

    /// One random read per methylation pattern.
    fn resolve_sequence(&mut self, group: Vec<MappedRead>) -> Result<Vec<MappedRead>> {
        let classes = partition_by_pattern(&group, self.context)?;

        let mut keep = vec![false; group.len()];
        for class in &classes {
            let pick = self.rng.gen_range(0..class.len());
            keep[class.members[pick]] = true;
            self.histogram.record(class.len());
        }

        Ok(group
            .into_iter()
            .zip(keep)
            .filter_map(|(read, kept)| kept.then_some(read))
            .collect())
    }

    pub fn histogram(&self) -> &DuplicateHistogram {
        &self.histogram
    }

    pub fn into_histogram(self) -> DuplicateHistogram {
        self.histogram
    }
}
