// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

//! Lexical translation probabilities t(o|s) estimated with IBM Model 1 EM
//! over a sentence-aligned parallel corpus.

pub mod corpus;
pub mod error;
pub mod io;
pub mod table;
pub mod trainer;
pub mod vocab;

pub use corpus::{Corpus, SentencePair};
pub use error::{Error, Result};
pub use io::{load_parallel, read_parallel, save_dictionary, write_dictionary, ParallelCorpus};
pub use table::{ExpectedCounts, ProbabilityTable};
pub use trainer::{
    expectation_step, log_likelihood, maximization_step, unexplained_tokens, FixedIterations, IterationObserver,
    IterationReport, LikelihoodDelta, LogObserver, NoopObserver, StopCriterion, Trainer,
    TrainingConfig, TrainingSummary, DEFAULT_ITERATIONS,
};
pub use vocab::{Vocabulary, NULL_TOKEN};
