use std::slice::Chunks;

use crate::error::{validation_error, Error};

/// Splits a borrowed sequence into contiguous batches, used to keep remote
/// calls under provider batch limits.
pub struct Chunker<'a, T> {
    items: &'a [T],
}

impl<'a, T> Chunker<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    /// Yields `len / size` batches of exactly `size` elements, followed by one
    /// shorter batch holding the remainder when there is one. The source is
    /// never mutated, so this can be called again with a different size.
    pub fn chunks(&self, size: usize) -> Result<Chunks<'a, T>, Error> {
        if size == 0 {
            return Err(validation_error("chunk size should be at least 1"));
        }

        Ok(self.items.chunks(size))
    }
}
