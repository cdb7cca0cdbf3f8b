//! Prefix trie over vocabulary tokens.
//!
//! Each edge is labelled with a single `char`. A node that ends a complete
//! token carries that token's ID. Lookups walk at most as many edges as the
//! text shares with the deepest reachable path, independent of vocabulary size.

use ahash::AHashMap;

/// A single trie node. Children are owned exclusively; the structure is a tree.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Outgoing edges keyed by character
    children: AHashMap<char, TrieNode>,
    /// True if a complete token ends at this node
    terminal: bool,
    /// ID of the token ending here, if any
    value: Option<u32>,
}

impl TrieNode {
    #[inline]
    fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }
}

/// Result of a successful longest-prefix lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch<'a> {
    /// The matched prefix, borrowed from the searched text
    pub token: &'a str,
    /// ID stored for the matched token
    pub id: u32,
}

impl PrefixMatch<'_> {
    /// Length of the match in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.token.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

/// Character trie mapping tokens to IDs.
#[derive(Debug, Clone, Default)]
pub struct PrefixTrie {
    root: TrieNode,
    len: usize,
}

impl PrefixTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `word` with `value`. Re-inserting a word overwrites its value.
    ///
    /// The empty word is ignored: the root never terminates a token.
    pub fn insert(&mut self, word: &str, value: u32) {
        if word.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }

        if !node.terminal {
            self.len += 1;
        }
        node.terminal = true;
        node.value = Some(value);
    }

    /// Look up the ID stored for exactly `word`.
    pub fn get(&self, word: &str) -> Option<u32> {
        let mut node = &self.root;
        for ch in word.chars() {
            node = node.child(ch)?;
        }
        if node.terminal {
            node.value
        } else {
            None
        }
    }

    /// Find the longest token in the trie that is a prefix of `text`.
    ///
    /// Returns `None` if no token is a prefix of `text`, including when
    /// `text` is empty.
    pub fn longest_prefix_match<'a>(&self, text: &'a str) -> Option<PrefixMatch<'a>> {
        let mut node = &self.root;
        let mut best = None;

        for (offset, ch) in text.char_indices() {
            node = match node.child(ch) {
                Some(next) => next,
                None => break,
            };
            if node.terminal {
                if let Some(id) = node.value {
                    let end = offset + ch.len_utf8();
                    best = Some(PrefixMatch {
                        token: &text[..end],
                        id,
                    });
                }
            }
        }

        best
    }

    /// Number of distinct tokens stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'s> FromIterator<(&'s str, u32)> for PrefixTrie {
    fn from_iter<I: IntoIterator<Item = (&'s str, u32)>>(iter: I) -> Self {
        let mut trie = Self::new();
        for (word, value) in iter {
            trie.insert(word, value);
        }
        trie
    }
}
