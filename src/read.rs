//! Core mapped-read types: genomic placement plus the bisulfite base calls.

use std::cmp::Ordering;
use std::fmt;

/// Strand orientation.
///
/// Variants are declared in byte order of their symbols (`+` < `-` < `.`),
/// so the derived ordering matches a plain character comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strand {
    Plus,
    Minus,
    Unknown,
}

impl Strand {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Strand::Plus),
            b'-' => Some(Strand::Minus),
            b'.' => Some(Strand::Unknown),
            _ => None,
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        match self {
            Strand::Plus => b'+',
            Strand::Minus => b'-',
            Strand::Unknown => b'.',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}

/// A single mapped read.
///
/// Coordinates are 0-based, half-open. The score is kept as the original text
/// token so that kept reads are written back exactly as they were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRead {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
    pub score: String,
    pub strand: Strand,
    /// One symbol per sequenced base.
    pub seq: String,
    /// Optional trailing per-base quality column.
    pub qual: Option<String>,
}

impl MappedRead {
    /// Create a read with a placeholder name and score.
    pub fn new(
        chrom: impl Into<String>,
        start: u64,
        end: u64,
        strand: Strand,
        seq: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            name: "X".to_string(),
            score: "0".to_string(),
            strand,
            seq: seq.into(),
            qual: None,
        }
    }

    /// Set the read name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of sequenced bases.
    #[inline]
    pub fn seq_len(&self) -> usize {
        self.seq.len()
    }

    /// Strict placement order: chromosome, start, end, strand.
    ///
    /// Only used to validate that input is sorted, never to reorder it.
    #[inline]
    pub fn precedes(&self, other: &MappedRead) -> bool {
        self.placement_cmp(other) == Ordering::Less
    }

    /// Same chromosome, start, end and strand.
    ///
    /// Says nothing about sequence content or length.
    #[inline]
    pub fn equivalent(&self, other: &MappedRead) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.strand == other.strand
            && self.chrom == other.chrom
    }

    #[inline]
    pub fn placement_cmp(&self, other: &MappedRead) -> Ordering {
        self.chrom
            .cmp(&other.chrom)
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
            .then(self.strand.cmp(&other.strand))
    }
}

impl fmt::Display for MappedRead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.name, self.score, self.strand, self.seq
        )?;
        if let Some(ref qual) = self.qual {
            write!(f, "\t{}", qual)?;
        }
        Ok(())
    }
}

/// Cytosine call, either case.
#[inline(always)]
pub fn is_cytosine(b: u8) -> bool {
    b == b'C' || b == b'c'
}

#[inline(always)]
pub fn is_guanine(b: u8) -> bool {
    b == b'G' || b == b'g'
}

/// True if a CpG dinucleotide starts at `pos` in `seq`.
#[inline]
pub fn is_cpg(seq: &[u8], pos: usize) -> bool {
    pos + 1 < seq.len() && is_cytosine(seq[pos]) && is_guanine(seq[pos + 1])
}
