//! Pairtok-tokenizer - High-level pair-encoding API
//!
//! This crate ties the vocabulary, prefix trie and trainer together behind
//! a single engine, and persists vocabularies as flat JSON files.
//!
//! # Features
//!
//! - Builder-configured engine that loads an existing vocabulary on start
//! - Training that extends the vocabulary and optionally persists it
//! - Lazy greedy longest-prefix tokenization that never alters the input
//!
//! # Example
//!
//! ```rust
//! use pairtok_tokenizer::BpeEngine;
//!
//! let mut engine = BpeEngine::builder().build()?;
//! engine.train("aaa", false, 1)?;
//!
//! let tokens: Vec<&str> = engine.tokenize("aaa").collect();
//! assert_eq!(tokens, ["aa", "a"]);
//! # Ok::<(), pairtok_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use pairtok_core::{PrefixTrie, Result, TokenizerError, Vocabulary};
pub use pairtok_training::{MergeRecord, StopReason, TrainingOutcome};

// Engine API
pub mod tokenizer;
pub use tokenizer::{BpeEngine, Encoding, EngineBuilder, EngineConfig, Tokens};

// IO/Serialization
pub mod io;
pub use io::{SerializedVocab, VocabLoader, VocabSaver, VOCAB_FILE_NAME};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
