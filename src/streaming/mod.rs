//! Streaming utilities shared by the duplicate remover:
//! - Zero-allocation field parsing
//! - Sort validation
//! - Buffered output formatting
//! - Gzip-transparent input and output

pub mod buffers;
pub mod compression;
pub mod output;
pub mod parsing;
pub mod validation;

pub use compression::{open_input, open_stdin, OutputSink};
pub use output::MrWriter;
pub use parsing::{parse_u64_fast, should_skip_line, Fields};
pub use validation::SortValidator;
