// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

use std::collections::HashMap;

/// Token appended to source sentences when NULL alignment is requested.
pub const NULL_TOKEN: &str = "null";

/// Bijection between tokens and dense ids, assigned in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    tokens: Vec<String>, // id -> token
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary::default()
    }

    /// Returns the id of `token`, assigning the next free id if unseen.
    pub fn insert(&mut self, token: &str) -> usize {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }

        let id = self.tokens.len();
        self.tokens.push(token.to_owned());
        self.ids.insert(token.to_owned(), id);
        id
    }

    /// Encodes a tokenized sentence, growing the vocabulary as needed.
    pub fn encode<S: AsRef<str>>(&mut self, sentence: &[S]) -> Vec<usize> {
        sentence.iter().map(|tok| self.insert(tok.as_ref())).collect()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.ids.get(token).cloned()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates `(id, token)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.tokens.iter().map(String::as_str).enumerate()
    }
}

impl<S: AsRef<str>> std::iter::FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocab = Vocabulary::new();
        for tok in iter {
            vocab.insert(tok.as_ref());
        }
        vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_first_seen() {
        let mut vocab = Vocabulary::new();
        assert_eq!(vocab.insert("la"), 0);
        assert_eq!(vocab.insert("maison"), 1);
        assert_eq!(vocab.insert("la"), 0);
        assert_eq!(vocab.insert("fleur"), 2);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.token(1), Some("maison"));
        assert_eq!(vocab.id("fleur"), Some(2));
        assert_eq!(vocab.id("chien"), None);
        assert_eq!(vocab.token(3), None);
    }

    #[test]
    fn encode_keeps_repetitions() {
        let mut vocab = Vocabulary::new();
        let ids = vocab.encode(&["a", "b", "a"]);
        assert_eq!(ids, vec![0, 1, 0]);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn collects_from_tokens() {
        let vocab: Vocabulary = vec!["the", "house", "the"].into_iter().collect();
        let listed: Vec<_> = vocab.iter().collect();
        assert_eq!(listed, vec![(0, "the"), (1, "house")]);
    }
}
