//! Vocabulary storage and lookup.
//!
//! Token ids are positive and assigned append-only as one past the largest id
//! held, so the first learned token gets id 1 and a loaded vocabulary with
//! gaps in its ids never hands out an id it already uses. Strings are kept as `CompactString`, which stores
//! the short merged tokens this tokenizer produces inline.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = AHashMap<u32, CompactString>;

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    vocab: Vocab,
    /// Reverse mapping: ID -> token string
    vocab_r: VocabR,
    /// Largest id held, 0 when empty
    max_id: u32,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
            max_id: 0,
        }
    }

    /// The id the next appended token will receive.
    #[inline]
    pub fn next_id(&self) -> u32 {
        self.max_id.saturating_add(1)
    }

    /// Append a token to the vocabulary.
    ///
    /// Returns the ID assigned to the token, or the existing ID if the token
    /// is already present.
    pub fn add_token(&mut self, token: &str) -> Result<u32> {
        if let Some(&id) = self.vocab.get(token) {
            return Ok(id);
        }

        let id = self.next_id();
        self.add_token_with_id(token, id)?;
        Ok(id)
    }

    /// Add a token with a specific ID.
    ///
    /// Returns an error if the ID is zero or already taken.
    pub fn add_token_with_id(&mut self, token: &str, id: u32) -> Result<()> {
        if id == 0 {
            return Err(TokenizerError::InvalidConfig(format!(
                "Token {:?} has id 0; ids must be positive",
                token
            )));
        }
        if let Some(existing) = self.vocab_r.get(&id) {
            return Err(TokenizerError::DuplicateTokenId {
                id,
                existing: existing.to_string(),
            });
        }

        let token = CompactString::new(token);
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);
        self.max_id = self.max_id.max(id);

        Ok(())
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.vocab.contains_key(token)
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Iterate over `(token, id)` entries in ascending id order.
    pub fn iter_by_id(&self) -> impl Iterator<Item = (&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .vocab
            .iter()
            .map(|(token, &id)| (token.as_str(), id))
            .collect();
        entries.sort_unstable_by_key(|&(_, id)| id);
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_token() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello").unwrap();
        let id2 = vocab.add_token("world").unwrap();

        assert_eq!(id1, 1);
        assert_eq!(id2, 2);
        assert_eq!(vocab.get_id("hello"), Some(1));
        assert_eq!(vocab.get_id("world"), Some(2));
        assert_eq!(vocab.get_token(1), Some("hello"));
        assert_eq!(vocab.get_token(2), Some("world"));
    }

    #[test]
    fn test_add_duplicate_token() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello").unwrap();
        let id2 = vocab.add_token("hello").unwrap();

        assert_eq!(id1, id2);
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.next_id(), 2);
    }

    #[test]
    fn test_add_token_with_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("hello", 5).unwrap();
        vocab.add_token_with_id("world", 10).unwrap();

        assert_eq!(vocab.get_id("hello"), Some(5));
        assert_eq!(vocab.get_token(10), Some("world"));
    }

    #[test]
    fn test_next_id_skips_past_gaps() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("zz", 2).unwrap();
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.next_id(), 3);

        assert_eq!(vocab.add_token("aa").unwrap(), 3);
        assert_eq!(vocab.get_id("zz"), Some(2));
    }

    #[test]
    fn test_rejects_zero_and_taken_ids() {
        let mut vocab = Vocabulary::new();
        assert!(matches!(
            vocab.add_token_with_id("zero", 0),
            Err(TokenizerError::InvalidConfig(_))
        ));

        vocab.add_token_with_id("a", 1).unwrap();
        match vocab.add_token_with_id("b", 1) {
            Err(TokenizerError::DuplicateTokenId { id, existing }) => {
                assert_eq!(id, 1);
                assert_eq!(existing, "a");
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_iter_by_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("c", 3).unwrap();
        vocab.add_token_with_id("a", 1).unwrap();
        vocab.add_token_with_id("b", 2).unwrap();

        let ordered: Vec<_> = vocab.iter_by_id().collect();
        assert_eq!(ordered, vec![("a", 1), ("b", 2), ("c", 3)]);
    }
}
