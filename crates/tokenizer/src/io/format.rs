//! On-disk vocabulary format.
//!
//! The vocabulary store is one flat JSON object mapping token text to id:
//!
//! ```json
//! {
//!   "th": 1,
//!   "he": 2
//! }
//! ```
//!
//! Entries are written in ascending id order; any key order is accepted on
//! read. A token that appears twice as a key is rejected.

use ahash::AHashSet;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Default file name for a vocabulary store inside a model directory.
pub const VOCAB_FILE_NAME: &str = "vocab.json";

/// Flat vocabulary record, kept sorted by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializedVocab {
    pub entries: Vec<(String, u32)>,
}

impl SerializedVocab {
    /// Build a record from `(token, id)` pairs, sorting by id.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by_key(|&(_, id)| id);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SerializedVocab {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(token, id)| (token, id)))
    }
}

impl<'de> Deserialize<'de> for SerializedVocab {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SerializedVocabVisitor)
    }
}

struct SerializedVocabVisitor;

impl<'de> Visitor<'de> for SerializedVocabVisitor {
    type Value = SerializedVocab;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from token text to a positive integer id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let capacity = access.size_hint().unwrap_or(0);
        let mut seen = AHashSet::with_capacity(capacity);
        let mut entries = Vec::with_capacity(capacity);

        while let Some((token, id)) = access.next_entry::<String, u32>()? {
            if !seen.insert(token.clone()) {
                return Err(de::Error::custom(format!("duplicate token {:?}", token)));
            }
            entries.push((token, id));
        }

        Ok(SerializedVocab::from_entries(entries))
    }
}
