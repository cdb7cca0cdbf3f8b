//! Vocabulary persistence.
//!
//! The vocabulary is stored as a single flat JSON object mapping token text
//! to id. Loading a missing store is not an error; it yields no vocabulary.

pub mod format;
pub mod load;
pub mod save;

pub use format::{SerializedVocab, VOCAB_FILE_NAME};
pub use load::VocabLoader;
pub use save::VocabSaver;
