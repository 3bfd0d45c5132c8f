//! Run statistics and the library-complexity histogram.
//!
//! Both files are read by downstream complexity tools, so their layout and
//! number formatting are fixed: integers in plain decimal, ratios in C-style
//! `%g` notation with six significant digits.

use crate::mr::{MrError, Result};
use crate::read::MappedRead;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Counts of resolved units by multiplicity.
///
/// A unit is a whole duplicate group in position-only mode and a
/// pattern-class in sequence-aware mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateHistogram {
    counts: Vec<u64>,
}

impl DuplicateHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one unit of the given size.
    #[inline]
    pub fn record(&mut self, multiplicity: usize) {
        if self.counts.len() <= multiplicity {
            self.counts.resize(multiplicity + 1, 0);
        }
        self.counts[multiplicity] += 1;
    }

    /// Number of units recorded with this multiplicity.
    pub fn get(&self, multiplicity: usize) -> u64 {
        self.counts.get(multiplicity).copied().unwrap_or(0)
    }

    /// Nonzero entries as `(multiplicity, count)`, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(m, &count)| (m, count))
    }

    /// Total number of units recorded.
    pub fn units(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Total number of reads covered by the recorded units.
    pub fn reads(&self) -> u64 {
        self.iter().map(|(m, count)| m as u64 * count).sum()
    }

    /// Write `multiplicity\tcount` lines.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut buf = itoa::Buffer::new();
        for (m, count) in self.iter() {
            w.write_all(buf.format(m).as_bytes())?;
            w.write_all(b"\t")?;
            w.write_all(buf.format(count).as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Running totals for one pass over the input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DedupStats {
    /// Reads consumed
    pub reads_in: u64,
    /// Bases consumed
    pub bases_in: u64,
    /// Reads kept
    pub reads_out: u64,
    /// Bases kept
    pub bases_out: u64,
    /// Groups that lost at least one read
    pub groups_with_duplicates: u64,
}

impl DedupStats {
    /// Count one input read.
    #[inline]
    pub fn record_input(&mut self, read: &MappedRead) {
        self.reads_in += 1;
        self.bases_in += read.seq_len() as u64;
    }

    /// Count the kept reads of a flushed group of `group_size` reads.
    #[inline]
    pub fn record_group(&mut self, group_size: usize, kept: &[MappedRead]) {
        self.reads_out += kept.len() as u64;
        self.bases_out += kept.iter().map(|r| r.seq_len() as u64).sum::<u64>();
        if kept.len() < group_size {
            self.groups_with_duplicates += 1;
        }
    }

    #[inline]
    pub fn reads_removed(&self) -> u64 {
        self.reads_in - self.reads_out
    }

    pub fn non_duplicate_fraction(&self) -> f64 {
        (self.reads_out as f64 - self.groups_with_duplicates as f64) / self.reads_in as f64
    }

    /// Mean size of groups that had duplicates.
    ///
    /// NaN or infinite when no duplicates were seen.
    pub fn duplication_rate(&self) -> f64 {
        (self.reads_removed() + self.groups_with_duplicates) as f64
            / self.groups_with_duplicates as f64
    }

    /// Write the `key: value` statistics report.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, "total_reads: {}", self.reads_in)?;
        writeln!(w, "total_bases: {}", self.bases_in)?;
        writeln!(w, "unique_reads: {}", self.reads_out)?;
        writeln!(w, "unique_read_bases: {}", self.bases_out)?;
        writeln!(
            w,
            "non_duplicate_fraction: {}",
            format_general(self.non_duplicate_fraction())
        )?;
        writeln!(w, "duplicate_reads: {}", self.groups_with_duplicates)?;
        writeln!(w, "reads_removed: {}", self.reads_removed())?;
        writeln!(
            w,
            "duplication_rate: {}",
            format_general(self.duplication_rate())
        )?;
        Ok(())
    }
}

impl fmt::Display for DedupStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read: {}, Kept: {}, Removed: {}, Groups with duplicates: {}, Duplication rate: {}",
            self.reads_in,
            self.reads_out,
            self.reads_removed(),
            self.groups_with_duplicates,
            format_general(self.duplication_rate())
        )
    }
}

const GENERAL_PRECISION: i32 = 6;

/// Format a float like C's `%g` with the default precision of 6.
pub fn format_general(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // The exponent after rounding to the target precision decides the style.
    let sci = format!("{:.*e}", (GENERAL_PRECISION - 1) as usize, x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..GENERAL_PRECISION).contains(&exp) {
        let decimals = (GENERAL_PRECISION - 1 - exp) as usize;
        strip_fraction_zeros(&format!("{:.*}", decimals, x)).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_fraction_zeros(mantissa), sign, exp.abs())
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn create_report(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| MrError::Open {
            path: path.display().to_string(),
            source,
        })
}

/// Write the statistics report to a file.
pub fn write_stats_file<P: AsRef<Path>>(path: P, stats: &DedupStats) -> Result<()> {
    let mut w = create_report(path.as_ref())?;
    stats.write_to(&mut w)?;
    w.flush()?;
    Ok(())
}

/// Write the histogram to a file.
pub fn write_histogram_file<P: AsRef<Path>>(path: P, hist: &DuplicateHistogram) -> Result<()> {
    let mut w = create_report(path.as_ref())?;
    hist.write_to(&mut w)?;
    w.flush()?;
    Ok(())
}
