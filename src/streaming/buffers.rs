//! Buffer size constants for streaming operations.
//!
//! These constants control memory usage vs I/O throughput tradeoffs.

/// Default output buffer size (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Default input buffer size (256 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Default line buffer capacity (1 KB).
/// Mapped-read lines carry the full read sequence, so this is a starting size only.
pub const DEFAULT_LINE_BUFFER: usize = 1024;

/// Initial capacity of the duplicate group buffer.
/// Most groups hold a single read; deep duplicates grow it on demand.
pub const DEFAULT_GROUP_CAPACITY: usize = 16;
