//! Pairtok-core - Core data structures for pair-encoding tokenization
//!
//! This crate provides the building blocks shared by training and
//! tokenization, independent of how the corpus or vocabulary is stored.
//!
//! # Features
//!
//! - Append-only vocabulary with positive, sequentially assigned ids
//! - Character trie for longest-prefix token lookup
//! - Binary max-heap and merge-candidate queue with lazy re-insertion
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use pairtok_core::{PrefixTrie, Vocabulary};
//!
//! let mut vocab = Vocabulary::new();
//! let id = vocab.add_token("th").unwrap();
//!
//! let mut trie = PrefixTrie::new();
//! trie.insert("th", id);
//! assert_eq!(trie.longest_prefix_match("the").unwrap().token, "th");
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use core::{
    HeapEntry, MaxHeap, MergeCandidate, PairId, PairPriorityQueue, PrefixMatch, PrefixTrie,
    TrieNode, Vocab, VocabR, Vocabulary,
};
