//! Queue of image rows shared between worker threads.
//!
//! The row list itself never changes after creation; workers claim rows by
//! bumping an atomic cursor, so every row is handed out exactly once and
//! a drained queue stays drained.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Rows left to render, claimed one at a time.
#[derive(Debug)]
pub struct LineQueue {
    rows: Vec<u32>,
    next: AtomicUsize,
}

impl LineQueue {
    /// Queue every row of an image `height` rows tall.
    pub fn new(height: u32) -> Self {
        Self::from_rows((0..height).collect())
    }

    /// Queue an explicit list of rows.
    pub fn from_rows(rows: Vec<u32>) -> Self {
        Self {
            rows,
            next: AtomicUsize::new(0),
        }
    }

    /// Claim the next row, or `None` once the queue is drained.
    pub fn claim(&self) -> Option<u32> {
        let i = self.next.fetch_add(1, Ordering::AcqRel);
        self.rows.get(i).copied()
    }

    /// Total number of rows this queue was created with.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if every row has been claimed.
    pub fn is_empty(&self) -> bool {
        self.next.load(Ordering::Acquire) >= self.rows.len()
    }

    /// Iterate over claimed rows until the queue is drained.
    pub fn iter(&self) -> LineQueueIter<'_> {
        LineQueueIter { queue: self }
    }
}

/// Iterator that claims rows from a shared queue.
pub struct LineQueueIter<'a> {
    queue: &'a LineQueue,
}

impl<'a> Iterator for LineQueueIter<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.queue.claim()
    }
}
