//! Priority queue for BPE merge candidates.
//!
//! [`MaxHeap`] is a plain array-backed binary max-heap ordered by a signed
//! priority only; payloads never take part in comparisons, so ties are
//! resolved purely by heap position. [`PairPriorityQueue`] layers merge
//! candidates on top of it with lazy re-insertion: a count change pushes a
//! fresh entry and older entries for the same pair stay in the heap.

use crate::error::{Result, TokenizerError};
use compact_str::CompactString;

/// Identifier of an adjacent token pair: the concatenation of both texts.
pub type PairId = CompactString;

/// A heap slot: signed priority plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapEntry<T> {
    pub priority: i64,
    pub payload: T,
}

impl<T> HeapEntry<T> {
    pub fn new(priority: i64, payload: T) -> Self {
        Self { priority, payload }
    }
}

/// Binary max-heap over [`HeapEntry`] priorities.
///
/// Invariant: every entry's priority is `>=` the priority of both children.
#[derive(Debug, Clone)]
pub struct MaxHeap<T> {
    entries: Vec<HeapEntry<T>>,
}

impl<T> MaxHeap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append `entry` and sift it toward the root.
    pub fn insert(&mut self, entry: HeapEntry<T>) {
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the entry with the largest priority.
    pub fn extract_max(&mut self) -> Result<HeapEntry<T>> {
        if self.entries.is_empty() {
            return Err(TokenizerError::EmptyQueue);
        }

        let top = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.entries[parent].priority >= self.entries[pos].priority {
                break;
            }
            self.entries.swap(parent, pos);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;

            // Left child wins ties
            let child = if right < len && self.entries[right].priority > self.entries[left].priority
            {
                right
            } else {
                left
            };

            if self.entries[pos].priority >= self.entries[child].priority {
                break;
            }
            self.entries.swap(pos, child);
            pos = child;
        }
    }
}

impl<T> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair to merge
    pub pair: PairId,
    /// Frequency of the pair when this candidate was queued
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: impl Into<PairId>, count: u64) -> Self {
        Self {
            pair: pair.into(),
            count,
        }
    }
}

/// Priority queue for BPE merge candidates, most frequent first.
///
/// There is no decrease-key and no deduplication. Popped candidates are
/// returned as queued, even when a newer entry for the same pair exists or
/// the pair's real frequency has since moved on.
#[derive(Debug, Clone, Default)]
pub struct PairPriorityQueue {
    heap: MaxHeap<PairId>,
}

impl PairPriorityQueue {
    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: MaxHeap::with_capacity(capacity),
        }
    }

    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a merge candidate onto the queue.
    pub fn push(&mut self, candidate: MergeCandidate) {
        let priority = i64::try_from(candidate.count).unwrap_or(i64::MAX);
        self.heap.insert(HeapEntry::new(priority, candidate.pair));
    }

    /// Pop the highest priority merge candidate, failing on an empty queue.
    pub fn extract(&mut self) -> Result<MergeCandidate> {
        let entry = self.heap.extract_max()?;
        Ok(MergeCandidate {
            pair: entry.payload,
            count: entry.priority as u64,
        })
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
