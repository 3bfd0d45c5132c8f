//! Streaming mapped-read (`.mr`) file parser.
//!
//! Each line holds one read:
//!
//! ```text
//! chrom  start  end  name  score  strand  seq  [qual]
//! chrom  start  name  score  strand  seq  [qual]
//! ```
//!
//! The second (short) layout omits the end coordinate, which is then taken
//! as `start + len(seq)`. Fields may be separated by tabs or spaces.

use crate::read::{MappedRead, Strand};
use crate::streaming::compression::open_input;
use crate::streaming::parsing::{is_all_digits, parse_u64_fast, should_skip_line, trim_line_end, Fields};
use crate::streaming::buffers::DEFAULT_LINE_BUFFER;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while removing duplicates.
#[derive(Error, Debug)]
pub enum MrError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("error reading file: {0} (no mapped reads found)")]
    EmptyInput(String),

    #[error("input not properly sorted:\n{previous}\n{current}")]
    Unsorted { previous: String, current: String },

    #[error(
        "reads at {chrom}:{start}-{end} have different lengths ({expected} and {found}); \
         sequence patterns need equal-length reads"
    )]
    MixedReadLength {
        chrom: String,
        start: u64,
        end: u64,
        expected: usize,
        found: usize,
    },

    #[error("could not allocate memory")]
    Allocation,
}

pub type Result<T> = std::result::Result<T, MrError>;

/// A streaming mapped-read reader.
pub struct MrReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
}

impl MrReader<Box<dyn BufRead>> {
    /// Open a mapped-read file, decompressing gzip input transparently.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(open_input(path.as_ref())?))
    }
}

impl<R: BufRead> MrReader<R> {
    /// Create a new reader from any buffered source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::with_capacity(DEFAULT_LINE_BUFFER),
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next mapped read.
    pub fn read_record(&mut self) -> Result<Option<MappedRead>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = trim_line_end(&self.buffer);
            if should_skip_line(line) {
                continue;
            }

            return parse_line(line, self.line_number).map(Some);
        }
    }

    /// Get an iterator over all records.
    pub fn records(self) -> MrRecordIter<R> {
        MrRecordIter { reader: self }
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> MrError {
    MrError::Parse {
        line,
        message: message.into(),
    }
}

fn text_field(field: &[u8], line: usize, what: &str) -> Result<String> {
    std::str::from_utf8(field)
        .map(str::to_string)
        .map_err(|_| parse_error(line, format!("{} is not valid UTF-8", what)))
}

/// Parse a single mapped-read line (without its line terminator).
fn parse_line(line: &[u8], line_number: usize) -> Result<MappedRead> {
    let mut fields = Fields::new(line);
    let mut next = |what: &str| {
        fields
            .next()
            .ok_or_else(|| parse_error(line_number, format!("missing {} field", what)))
    };

    let chrom = text_field(next("chromosome")?, line_number, "chromosome")?;
    let start_field = next("start")?;
    let start = parse_u64_fast(start_field).ok_or_else(|| {
        parse_error(
            line_number,
            format!("Invalid start position: '{}'", String::from_utf8_lossy(start_field)),
        )
    })?;

    let third = next("end")?;
    let (end, name) = if is_all_digits(third) {
        let end = parse_u64_fast(third).ok_or_else(|| {
            parse_error(
                line_number,
                format!("Invalid end position: '{}'", String::from_utf8_lossy(third)),
            )
        })?;
        (Some(end), text_field(next("name")?, line_number, "name")?)
    } else {
        (None, text_field(third, line_number, "name")?)
    };

    let score = text_field(next("score")?, line_number, "score")?;
    if score.parse::<f64>().is_err() {
        return Err(parse_error(line_number, format!("Invalid score: '{}'", score)));
    }

    let strand_field = next("strand")?;
    let strand = match strand_field {
        [b] => Strand::from_byte(*b),
        _ => None,
    }
    .ok_or_else(|| {
        parse_error(
            line_number,
            format!("Invalid strand: '{}'", String::from_utf8_lossy(strand_field)),
        )
    })?;

    let seq = text_field(next("sequence")?, line_number, "sequence")?;
    let qual = match fields.next() {
        Some(q) => Some(text_field(q, line_number, "quality")?),
        None => None,
    };

    let end = match end {
        Some(end) => end,
        None => start
            .checked_add(seq.len() as u64)
            .ok_or_else(|| parse_error(line_number, "end coordinate overflows"))?,
    };
    if start > end {
        return Err(parse_error(
            line_number,
            format!("Start ({}) > end ({})", start, end),
        ));
    }

    Ok(MappedRead {
        chrom,
        start,
        end,
        name,
        score,
        strand,
        seq,
        qual,
    })
}

/// Iterator over mapped reads.
pub struct MrRecordIter<R: BufRead> {
    reader: MrReader<R>,
}

impl<R: BufRead> Iterator for MrRecordIter<R> {
    type Item = Result<MappedRead>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Read all mapped reads from a file.
pub fn read_reads<P: AsRef<Path>>(path: P) -> Result<Vec<MappedRead>> {
    MrReader::from_path(path)?.records().collect()
}

/// Parse mapped reads from a string (useful for testing).
pub fn parse_reads(content: &str) -> Result<Vec<MappedRead>> {
    MrReader::new(content.as_bytes()).records().collect()
}

/// Write mapped reads to a writer, one per line.
pub fn write_reads<W: io::Write>(writer: &mut W, reads: &[MappedRead]) -> io::Result<()> {
    for read in reads {
        writeln!(writer, "{}", read)?;
    }
    Ok(())
}
