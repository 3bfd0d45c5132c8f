//! Sort validation for streaming duplicate removal.
//!
//! Duplicate groups are only contiguous when the input is sorted by
//! chromosome, start, end and strand. Each incoming read is checked
//! against the first read of the group currently being buffered; a read
//! that precedes it means the input was not sorted.

use crate::mr::{MrError, Result};
use crate::read::MappedRead;

/// Inline sort validator for use within the streaming loop.
#[derive(Debug, Clone, Copy)]
pub struct SortValidator {
    enabled: bool,
}

impl Default for SortValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SortValidator {
    /// Create an enabled validator.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a validator that accepts any order.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Validate that `next` does not precede the group front.
    ///
    /// The error carries both reads for diagnosis.
    #[inline]
    pub fn validate(&self, front: &MappedRead, next: &MappedRead) -> Result<()> {
        if self.enabled && next.precedes(front) {
            return Err(MrError::Unsorted {
                previous: front.to_string(),
                current: next.to_string(),
            });
        }
        Ok(())
    }
}
