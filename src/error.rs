// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised before or around training. Numeric edge cases inside an
/// iteration are never errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("corpus contains no sentence pairs")]
    EmptyCorpus,

    #[error("{side} vocabulary is empty")]
    EmptyVocabulary { side: &'static str },

    #[error("{side} id {id} in sentence pair {pair} is out of range for vocabulary of size {size}")]
    IdOutOfRange {
        side: &'static str,
        pair: usize,
        id: usize,
        size: usize,
    },

    #[error("probability table is {found:?} but {expected:?} was expected (observed, source)")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("t({o}|{s}) = {value} is not a probability")]
    ProbabilityOutOfRange { o: usize, s: usize, value: f64 },

    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("source file has {source_lines} lines but target file has {target_lines}")]
    LineCountMismatch {
        source_lines: usize,
        target_lines: usize,
    },

    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    #[error(transparent)]
    Stream(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            err,
        }
    }
}
