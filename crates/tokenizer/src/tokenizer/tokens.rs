//! Greedy longest-prefix segmentation.

use pairtok_core::PrefixTrie;
use std::iter::FusedIterator;

/// Lazy iterator over the tokens of a text.
///
/// At each position the longest vocabulary token that prefixes the remaining
/// text is emitted; if none does, the single next character is emitted.
/// Concatenating every item reproduces the input exactly.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    trie: &'a PrefixTrie,
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(trie: &'a PrefixTrie, text: &'a str) -> Self {
        Self { trie, rest: text }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;

        let len = match self.trie.longest_prefix_match(self.rest) {
            Some(found) => found.len(),
            None => first.len_utf8(),
        };

        let (token, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = self.rest.len();
        (usize::from(upper > 0), Some(upper))
    }
}

impl FusedIterator for Tokens<'_> {}
