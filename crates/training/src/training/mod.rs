//! Training infrastructure for pair-encoding tokenizers.
//!
//! This module provides the pair-frequency counter and the merge loop that
//! learns new vocabulary tokens from text.

pub mod counter;
pub mod trainer;

pub use counter::PairCounter;
pub use trainer::{
    BpeTrainer, MergeRecord, StopReason, TrainingConfig, TrainingOutcome, DEFAULT_SENTINEL,
};
