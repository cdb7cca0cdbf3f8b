//! Pairtok-training - merge learning for pair-encoding tokenizers
//!
//! This crate learns new vocabulary tokens from a corpus by repeatedly
//! merging the most frequent adjacent pair.
//!
//! # Features
//!
//! - Pair frequency counting keyed by the concatenated pair text
//! - Lazily updated merge queue with a merge budget and a singleton cut-off
//! - Integration with pairtok-core for vocabulary and trie updates
//!
//! # Example
//!
//! ```rust
//! use pairtok_core::{PrefixTrie, Vocabulary};
//! use pairtok_training::BpeTrainer;
//!
//! let mut vocab = Vocabulary::new();
//! let mut trie = PrefixTrie::new();
//! let outcome = BpeTrainer::with_max_merges(1).train("aaa", &mut vocab, &mut trie)?;
//!
//! assert_eq!(vocab.get_id("aa"), Some(1));
//! assert_eq!(outcome.tokens.len(), 2);
//! # Ok::<(), pairtok_core::TokenizerError>(())
//! ```

pub use pairtok_core::{Result, TokenizerError};

pub mod training;
pub use training::{
    BpeTrainer, MergeRecord, PairCounter, StopReason, TrainingConfig, TrainingOutcome,
    DEFAULT_SENTINEL,
};
