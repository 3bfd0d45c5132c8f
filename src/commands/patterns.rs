//! Methylation pattern extraction for groups of identically placed reads.
//!
//! # Algorithm
//!
//! 1. Collect the informative offsets of the group: offsets where at least
//!    one read has a cytosine (all-cytosine mode) or the start of a CpG
//!    (CpG mode).
//! 2. For every read, emit one symbol per informative offset: `1` if that
//!    read shows a cytosine there, `0` otherwise.
//! 3. Reads with the same pattern form a pattern-class.
//!
//! A group without informative offsets yields the empty pattern for every
//! read, and so a single class.

use crate::config::SiteContext;
use crate::mr::{MrError, Result};
use crate::read::{is_cpg, is_cytosine, MappedRead};
use rustc_hash::FxHashMap;

/// Reads of one group sharing a methylation pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternClass {
    /// `0`/`1` symbols, one per informative offset.
    pub pattern: Vec<u8>,
    /// Positions of the member reads within the group, ascending.
    pub members: Vec<usize>,
}

impl PatternClass {
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn pattern_str(&self) -> &str {
        // Only ever holds b'0' / b'1'.
        std::str::from_utf8(&self.pattern).unwrap_or_default()
    }
}

/// Reject groups whose reads differ in sequence length.
pub fn check_uniform_length(group: &[MappedRead]) -> Result<()> {
    let Some(first) = group.first() else {
        return Ok(());
    };
    let expected = first.seq_len();
    match group.iter().find(|r| r.seq_len() != expected) {
        Some(other) => Err(MrError::MixedReadLength {
            chrom: first.chrom.clone(),
            start: first.start,
            end: first.end,
            expected,
            found: other.seq_len(),
        }),
        None => Ok(()),
    }
}

/// Offsets (ascending) that carry methylation information for this group.
///
/// The first read's length bounds the scan.
pub fn informative_sites(group: &[MappedRead], context: SiteContext) -> Vec<usize> {
    let Some(first) = group.first() else {
        return Vec::new();
    };
    let lim = first.seq_len();
    match context {
        SiteContext::AllCytosines => (0..lim)
            .filter(|&i| {
                group
                    .iter()
                    .any(|r| r.seq.as_bytes().get(i).copied().is_some_and(is_cytosine))
            })
            .collect(),
        SiteContext::CpG => (0..lim.saturating_sub(1))
            .filter(|&i| group.iter().any(|r| is_cpg(r.seq.as_bytes(), i)))
            .collect(),
    }
}

/// Pattern of one read over the group's informative offsets.
#[inline]
pub fn methylation_pattern(read: &MappedRead, sites: &[usize]) -> Vec<u8> {
    let seq = read.seq.as_bytes();
    sites
        .iter()
        .map(|&i| match seq.get(i) {
            Some(&b) if is_cytosine(b) => b'1',
            _ => b'0',
        })
        .collect()
}

/// Split a group into pattern-classes, in order of first appearance.
///
/// Class sizes always sum to the group size.
pub fn partition_by_pattern(group: &[MappedRead], context: SiteContext) -> Result<Vec<PatternClass>> {
    check_uniform_length(group)?;
    let sites = informative_sites(group, context);

    let mut index: FxHashMap<Vec<u8>, usize> = FxHashMap::default();
    let mut classes: Vec<PatternClass> = Vec::new();
    for (i, read) in group.iter().enumerate() {
        let pattern = methylation_pattern(read, &sites);
        match index.get(&pattern) {
            Some(&c) => classes[c].members.push(i),
            None => {
                index.insert(pattern.clone(), classes.len());
                classes.push(PatternClass {
                    pattern,
                    members: vec![i],
                });
            }
        }
    }
    Ok(classes)
}
