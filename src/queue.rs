//! Min-priority queue of tree-node candidates.
//!
//! Entries are ordered by frequency, ties broken by insertion order, so the
//! same sequence of inserts always yields the same sequence of extractions.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};

struct Entry<T> {
    freq: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-priority on top of BinaryHeap's max-heap.
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered collection keyed by frequency.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Create an empty queue with room for `capacity` entries.
    ///
    /// # Errors
    /// Returns `Error::AllocationFailure` if the storage cannot be reserved.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut queue = Self::new();
        queue.heap.try_reserve_exact(capacity)?;
        Ok(queue)
    }

    /// Add `item` with sort key `freq`.
    pub fn insert(&mut self, item: T, freq: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { freq, seq, item });
    }

    /// Remove and return the lowest-frequency entry.
    ///
    /// Among equal frequencies, the entry inserted first wins.
    ///
    /// # Errors
    /// Returns `Error::EmptyQueue` if nothing remains.
    pub fn extract_min(&mut self) -> Result<T> {
        self.heap.pop().map(|e| e.item).ok_or(Error::EmptyQueue)
    }

    /// Number of remaining entries.
    pub fn size(&self) -> usize {
        self.heap.len()
    }

    /// True when no entries remain.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
