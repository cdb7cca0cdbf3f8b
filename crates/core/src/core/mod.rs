//! Core data structures for pair encoding.
//!
//! Vocabulary storage, the prefix trie used for greedy segmentation, and the
//! priority queue that schedules merges during training.

pub mod priority;
pub mod trie;
pub mod vocab;

pub use priority::{HeapEntry, MaxHeap, MergeCandidate, PairId, PairPriorityQueue};
pub use trie::{PrefixMatch, PrefixTrie, TrieNode};
pub use vocab::{Vocab, VocabR, Vocabulary};
