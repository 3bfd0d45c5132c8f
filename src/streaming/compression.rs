//! Gzip-transparent input and output.
//!
//! Input compression is detected from the stream's magic bytes, so both
//! files and standard input may be gzipped. Output is compressed when the
//! path ends in `.gz`.

use crate::mr::{MrError, Result};
use crate::streaming::buffers::DEFAULT_INPUT_BUFFER;
use flate2::bufread::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// True if the path names a gzip file by extension.
#[inline]
pub fn has_gz_ext(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// True if the path means standard input / output.
#[inline]
pub fn is_stdio_path(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_error(path: &Path, source: io::Error) -> MrError {
    MrError::Open {
        path: path.display().to_string(),
        source,
    }
}

/// Wrap a raw source, inserting a gzip decoder if the data starts with the gzip magic.
pub fn buffered_input<R: Read + 'static>(source: R) -> io::Result<Box<dyn BufRead>> {
    let mut reader = BufReader::with_capacity(DEFAULT_INPUT_BUFFER, source);
    let compressed = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if compressed {
        Ok(Box::new(BufReader::with_capacity(
            DEFAULT_INPUT_BUFFER,
            MultiGzDecoder::new(reader),
        )))
    } else {
        Ok(Box::new(reader))
    }
}

/// Open a path for reading; `-` reads standard input.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_stdio_path(path) {
        return open_stdin();
    }
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    buffered_input(file).map_err(|e| open_error(path, e))
}

/// Read from standard input.
pub fn open_stdin() -> Result<Box<dyn BufRead>> {
    Ok(buffered_input(io::stdin())?)
}

/// Destination for kept reads.
pub enum OutputSink {
    Stdout(io::Stdout),
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl OutputSink {
    /// Create the sink for an optional output path; `None` or `-` is standard output.
    pub fn create(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !is_stdio_path(p) => p,
            _ => return Ok(OutputSink::Stdout(io::stdout())),
        };
        let file = File::create(path).map_err(|e| open_error(path, e))?;
        if has_gz_ext(path) {
            Ok(OutputSink::Gzip(GzEncoder::new(file, Compression::default())))
        } else {
            Ok(OutputSink::Plain(file))
        }
    }

    /// Flush everything, writing the gzip trailer if compressed.
    pub fn finish(self) -> Result<()> {
        match self {
            OutputSink::Stdout(mut out) => out.flush()?,
            OutputSink::Plain(mut file) => file.flush()?,
            OutputSink::Gzip(encoder) => {
                encoder.finish()?;
            }
        }
        Ok(())
    }
}

impl Write for OutputSink {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(out) => out.write(buf),
            OutputSink::Plain(file) => file.write(buf),
            OutputSink::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(out) => out.flush(),
            OutputSink::Plain(file) => file.flush(),
            OutputSink::Gzip(encoder) => encoder.flush(),
        }
    }
}
