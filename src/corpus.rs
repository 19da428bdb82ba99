// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

use counter::Counter;

use crate::error::{Error, Result};

/// One aligned sentence pair, already encoded to ids.
///
/// Repeated ids are kept: every position is a separate event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentencePair {
    pub source: Vec<usize>,
    pub observed: Vec<usize>,
}

impl SentencePair {
    pub fn new(source: Vec<usize>, observed: Vec<usize>) -> Self {
        SentencePair { source, observed }
    }
}

/// Ordered collection of sentence pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    pairs: Vec<SentencePair>,
}

impl Corpus {
    pub fn new(pairs: Vec<SentencePair>) -> Self {
        Corpus { pairs }
    }

    pub fn push(&mut self, pair: SentencePair) {
        self.pairs.push(pair);
    }

    pub fn pairs(&self) -> &[SentencePair] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<SentencePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Checks the corpus against the vocabulary sizes it will be trained
    /// with. Must hold before any table is touched.
    pub fn validate(&self, vs_size: usize, vo_size: usize) -> Result<()> {
        if vs_size == 0 {
            return Err(Error::EmptyVocabulary { side: "source" });
        }
        if vo_size == 0 {
            return Err(Error::EmptyVocabulary { side: "observed" });
        }
        if self.pairs.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        for (idx, pair) in self.pairs.iter().enumerate() {
            if let Some(&id) = pair.source.iter().find(|&&id| id >= vs_size) {
                return Err(Error::IdOutOfRange {
                    side: "source",
                    pair: idx,
                    id,
                    size: vs_size,
                });
            }
            if let Some(&id) = pair.observed.iter().find(|&&id| id >= vo_size) {
                return Err(Error::IdOutOfRange {
                    side: "observed",
                    pair: idx,
                    id,
                    size: vo_size,
                });
            }
        }

        Ok(())
    }

    /// Number of positions at which each source id occurs.
    pub fn source_occurrences(&self) -> Counter<usize> {
        self.pairs
            .iter()
            .flat_map(|pair| pair.source.iter().cloned())
            .collect::<Counter<_>>()
    }

    /// Number of positions at which each observed id occurs.
    pub fn observed_occurrences(&self) -> Counter<usize> {
        self.pairs
            .iter()
            .flat_map(|pair| pair.observed.iter().cloned())
            .collect::<Counter<_>>()
    }

    /// Source ids below `vs_size` that never occur. Their columns collapse
    /// to zero after the first iteration.
    pub fn unused_sources(&self, vs_size: usize) -> Vec<usize> {
        let seen = self.source_occurrences();
        (0..vs_size).filter(|s| !seen.contains_key(s)).collect()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a SentencePair;
    type IntoIter = std::slice::Iter<'a, SentencePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl std::iter::FromIterator<SentencePair> for Corpus {
    fn from_iter<I: IntoIterator<Item = SentencePair>>(iter: I) -> Self {
        Corpus::new(iter.into_iter().collect())
    }
}
