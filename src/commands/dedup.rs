//! Streaming duplicate removal over sorted mapped reads.
//!
//! # Algorithm
//!
//! For sorted input:
//! 1. Read reads one at a time
//! 2. Buffer reads that share chromosome, start, end and strand with the
//!    first buffered read
//! 3. On the first read that does not, collapse the buffered group, write
//!    its kept reads and start a new group with the new read
//! 4. Collapse whatever is buffered at end of input
//!
//! # Memory Complexity
//!
//! O(d) - only the current duplicate group is held, where d is the
//! deepest duplicate group in the input.
//!
//! # Requirements
//!
//! Input MUST be sorted by chromosome, start, end, then strand. Unless
//! validation is disabled, a read that sorts before the current group
//! aborts the run.

use crate::commands::resolve::GroupResolver;
use crate::config::{DedupConfig, DedupPolicy};
use crate::mr::{MrError, MrReader, Result};
use crate::read::MappedRead;
use crate::stats::{DedupStats, DuplicateHistogram};
use crate::streaming::buffers::DEFAULT_GROUP_CAPACITY;
use crate::streaming::compression::open_input;
use crate::streaming::output::MrWriter;
use crate::streaming::validation::SortValidator;
use log::{debug, info};
use std::io::{BufRead, Write};
use std::path::Path;

/// Streaming duplicate-removal command.
#[derive(Debug, Clone, Default)]
pub struct DuplicateRemoverCommand {
    pub config: DedupConfig,
}

/// Everything a finished run reports besides the kept reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupReport {
    pub stats: DedupStats,
    pub histogram: DuplicateHistogram,
}

impl DuplicateRemoverCommand {
    pub fn new(config: DedupConfig) -> Self {
        Self { config }
    }

    /// Remove duplicates from a (possibly gzipped) mapped-read file.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input_path: P, output: &mut W) -> Result<DedupReport> {
        let path = input_path.as_ref();
        let reader = MrReader::new(open_input(path)?);
        self.run_reader(reader, &path.display().to_string(), output)
    }

    /// Core streaming algorithm.
    ///
    /// Holds only the current duplicate group in memory.
    pub fn run_streaming<R: BufRead, W: Write>(
        &self,
        reader: MrReader<R>,
        output: &mut W,
    ) -> Result<DedupReport> {
        self.run_reader(reader, "input", output)
    }

    /// Run over an already opened reader; `source` names it in messages.
    pub fn run_reader<R: BufRead, W: Write>(
        &self,
        mut reader: MrReader<R>,
        source: &str,
        output: &mut W,
    ) -> Result<DedupReport> {
        let first = first_record(&mut reader, source)?;
        self.run_from(first, reader, source, output)
    }

    /// Run with the first read already taken from `reader`.
    ///
    /// Lets callers defer creating the output until the input is known
    /// to be non-empty.
    pub fn run_from<R: BufRead, W: Write>(
        &self,
        first: MappedRead,
        mut reader: MrReader<R>,
        source: &str,
        output: &mut W,
    ) -> Result<DedupReport> {
        info!(
            "removing duplicates from {} ({}, seed {})",
            source,
            match self.config.policy {
                DedupPolicy::PositionOnly => "position only".to_string(),
                DedupPolicy::SequenceAware => format!("{:?} patterns", self.config.context),
            },
            self.config.seed
        );

        let mut writer = MrWriter::new(output);
        let validator = if self.config.validate_sort {
            SortValidator::new()
        } else {
            SortValidator::disabled()
        };
        let mut resolver = GroupResolver::from_config(&self.config);
        let mut stats = DedupStats::default();

        let mut group: Vec<MappedRead> = Vec::with_capacity(DEFAULT_GROUP_CAPACITY);
        stats.record_input(&first);
        group.push(first);

        while let Some(read) = reader.read_record()? {
            stats.record_input(&read);
            validator.validate(&group[0], &read)?;

            if !read.equivalent(&group[0]) {
                let full = std::mem::take(&mut group);
                flush_group(full, &mut resolver, &mut writer, &mut stats)?;
            }
            group.try_reserve(1).map_err(|_| MrError::Allocation)?;
            group.push(read);
        }
        flush_group(group, &mut resolver, &mut writer, &mut stats)?;
        writer.flush()?;

        info!(
            "{} lines read, {} reads written",
            reader.line_number(),
            writer.records_written()
        );
        info!("{}", stats);

        Ok(DedupReport {
            stats,
            histogram: resolver.into_histogram(),
        })
    }
}

/// Take the first read, failing on input with no reads.
pub fn first_record<R: BufRead>(reader: &mut MrReader<R>, source: &str) -> Result<MappedRead> {
    reader
        .read_record()?
        .ok_or_else(|| MrError::EmptyInput(source.to_string()))
}

/// Collapse one group and write the kept reads.
fn flush_group<W: Write>(
    group: Vec<MappedRead>,
    resolver: &mut GroupResolver,
    writer: &mut MrWriter<W>,
    stats: &mut DedupStats,
) -> Result<()> {
    let size = group.len();
    let kept = resolver.resolve(group)?;
    for read in &kept {
        writer.write_read(read)?;
    }
    if kept.len() < size {
        if let Some(front) = kept.first() {
            debug!(
                "{}:{}-{}:{} kept {} of {}",
                front.chrom,
                front.start,
                front.end,
                front.strand,
                kept.len(),
                size
            );
        }
    }
    stats.record_group(size, &kept);
    Ok(())
}
