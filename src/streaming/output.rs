//! Efficient output formatting for kept reads.
//!
//! Uses itoa for coordinate formatting to avoid allocation in the hot path.

use crate::mr::{MrError, Result};
use crate::read::MappedRead;
use crate::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use std::io::{BufWriter, Write};

/// Buffered mapped-read writer.
pub struct MrWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    records_written: u64,
}

impl<W: Write> MrWriter<W> {
    /// Create a new MrWriter with the default buffer size.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    /// Create a new MrWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            records_written: 0,
        }
    }

    /// Write one read followed by a newline.
    #[inline]
    pub fn write_read(&mut self, read: &MappedRead) -> Result<()> {
        let w = &mut self.writer;
        w.write_all(read.chrom.as_bytes())?;
        w.write_all(b"\t")?;
        w.write_all(self.itoa_buf.format(read.start).as_bytes())?;
        w.write_all(b"\t")?;
        w.write_all(self.itoa_buf.format(read.end).as_bytes())?;
        w.write_all(b"\t")?;
        w.write_all(read.name.as_bytes())?;
        w.write_all(b"\t")?;
        w.write_all(read.score.as_bytes())?;
        w.write_all(&[b'\t', read.strand.as_byte(), b'\t'])?;
        w.write_all(read.seq.as_bytes())?;
        if let Some(ref qual) = read.qual {
            w.write_all(b"\t")?;
            w.write_all(qual.as_bytes())?;
        }
        w.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of reads written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| MrError::Io(e.into_error()))
    }
}
