// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

//! EM training of IBM Model 1 lexical translation probabilities.

use std::f64::NEG_INFINITY;
use std::fmt;

use log::{debug, info, trace};

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::table::{ExpectedCounts, ProbabilityTable};
use crate::vocab::Vocabulary;

pub const DEFAULT_ITERATIONS: usize = 50;

/// Decides whether training may stop before the iteration budget is spent.
pub trait StopCriterion: fmt::Debug {
    /// `previous` and `current` are the corpus log-likelihoods before the
    /// last and the current iteration.
    fn should_stop(&self, iteration: usize, previous: f64, current: f64) -> bool;
}

/// Never stops early.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedIterations;

impl StopCriterion for FixedIterations {
    fn should_stop(&self, _iteration: usize, _previous: f64, _current: f64) -> bool {
        false
    }
}

/// Stops once the log-likelihood moves by no more than `epsilon`.
#[derive(Clone, Copy, Debug)]
pub struct LikelihoodDelta {
    pub epsilon: f64,
}

impl Default for LikelihoodDelta {
    fn default() -> Self {
        LikelihoodDelta {
            epsilon: 10.0_f64.powi(-5),
        }
    }
}

impl StopCriterion for LikelihoodDelta {
    fn should_stop(&self, _iteration: usize, previous: f64, current: f64) -> bool {
        previous.is_finite() && (current - previous).abs() <= self.epsilon
    }
}

#[derive(Debug)]
pub struct TrainingConfig {
    pub iterations: usize,
    pub stop: Box<dyn StopCriterion>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            iterations: DEFAULT_ITERATIONS,
            stop: Box::new(FixedIterations),
        }
    }
}

impl TrainingConfig {
    pub fn with_iterations(iterations: usize) -> Self {
        TrainingConfig {
            iterations,
            ..TrainingConfig::default()
        }
    }

    pub fn stop_when<C: StopCriterion + 'static>(mut self, criterion: C) -> Self {
        self.stop = Box::new(criterion);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::ZeroIterations);
        }
        Ok(())
    }
}

/// State handed to an [`IterationObserver`] after each M-step.
#[derive(Debug)]
pub struct IterationReport<'a> {
    pub iteration: usize,
    /// Log-likelihood under the table the iteration started from.
    pub log_likelihood: f64,
    pub counts: &'a ExpectedCounts,
    pub table: &'a ProbabilityTable,
    /// Source ids whose column collapsed to zero.
    pub degenerate_sources: &'a [usize],
}

/// Receives per-iteration diagnostics. Has no influence on training.
pub trait IterationObserver {
    fn on_iteration(&mut self, report: &IterationReport);
}

pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    fn on_iteration(&mut self, _report: &IterationReport) {}
}

/// Dumps every count and probability through `log` at trace level.
#[derive(Default)]
pub struct LogObserver<'v> {
    vocabularies: Option<(&'v Vocabulary, &'v Vocabulary)>,
}

impl<'v> LogObserver<'v> {
    pub fn new() -> Self {
        LogObserver { vocabularies: None }
    }

    /// Print token names instead of ids.
    pub fn with_vocabularies(source: &'v Vocabulary, observed: &'v Vocabulary) -> Self {
        LogObserver {
            vocabularies: Some((source, observed)),
        }
    }

    fn names(&self, o: usize, s: usize) -> (String, String) {
        match self.vocabularies {
            Some((source, observed)) => (
                observed.token(o).unwrap_or("?").to_owned(),
                source.token(s).unwrap_or("?").to_owned(),
            ),
            None => (o.to_string(), s.to_string()),
        }
    }
}

impl<'v> IterationObserver for LogObserver<'v> {
    fn on_iteration(&mut self, report: &IterationReport) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }

        let (vo_size, vs_size) = report.counts.dim();

        trace!("unnormalised counts in iteration {}", report.iteration);
        for s in 0..vs_size {
            for o in 0..vo_size {
                let (obs, src) = self.names(o, s);
                trace!("{}\t{}\t{}", obs, src, report.counts.get(o, s));
            }
        }

        trace!(
            "after iteration {} trans probs (t(o|s)):",
            report.iteration
        );
        for o in 0..vo_size {
            for s in 0..vs_size {
                let (obs, src) = self.names(o, s);
                trace!("{}\t{}\t{}", obs, src, report.table.get(o, s));
            }
        }
    }
}

/// Outcome of a training run.
#[derive(Clone, Debug)]
pub struct TrainingSummary {
    pub table: ProbabilityTable,
    pub iterations_run: usize,
    /// Log-likelihood at the start of each iteration that ran.
    pub log_likelihoods: Vec<f64>,
    pub stopped_early: bool,
}

/// Σ over observed positions of ln Σ over source positions of t(o|s).
///
/// The constant uniform-alignment factor is dropped. Tokens no source
/// position can generate (Z = 0) are left out so the value stays finite.
pub fn log_likelihood(corpus: &Corpus, table: &ProbabilityTable) -> f64 {
    likelihood_and_unexplained(corpus, table).0
}

/// Observed tokens with Z = 0 under `table`, e.g. those paired with an
/// empty source sentence.
pub fn unexplained_tokens(corpus: &Corpus, table: &ProbabilityTable) -> usize {
    likelihood_and_unexplained(corpus, table).1
}

fn likelihood_and_unexplained(corpus: &Corpus, table: &ProbabilityTable) -> (f64, usize) {
    let mut likelihood = 0.;
    let mut unexplained = 0;
    for pair in corpus {
        for &o in &pair.observed {
            let z: f64 = pair.source.iter().map(|&s| table.get(o, s)).sum();
            if z > 0. {
                likelihood += z.ln();
            } else {
                unexplained += 1;
            }
        }
    }
    (likelihood, unexplained)
}

/// Accumulates expected counts for every (o, s) under `table`.
pub fn expectation_step(corpus: &Corpus, table: &ProbabilityTable) -> ExpectedCounts {
    let (vo_size, vs_size) = table.dim();
    let mut counts = ExpectedCounts::zeros(vo_size, vs_size);

    for pair in corpus {
        for &o in &pair.observed {
            // Sums over positions: a repeated source word counts twice.
            let z: f64 = pair.source.iter().map(|&s| table.get(o, s)).sum();
            if z <= 0. {
                continue;
            }

            for &s in &pair.source {
                let p = table.get(o, s);
                if p > 0. {
                    counts.add(o, s, p / z);
                }
            }
        }
    }

    counts
}

/// Renormalizes expected counts into the next table.
pub fn maximization_step(counts: &ExpectedCounts) -> ProbabilityTable {
    counts.normalize()
}

fn degenerate_sources(counts: &ExpectedCounts) -> Vec<usize> {
    counts
        .source_totals()
        .iter()
        .enumerate()
        .filter(|&(_, &total)| total <= 0.)
        .map(|(s, _)| s)
        .collect()
}

pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Trainer { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn train(&self, corpus: &Corpus, vs_size: usize, vo_size: usize) -> Result<TrainingSummary> {
        self.train_with_observer(corpus, vs_size, vo_size, &mut NoopObserver)
    }

    /// Trains from a uniform table, reporting each iteration to `observer`.
    pub fn train_with_observer(
        &self,
        corpus: &Corpus,
        vs_size: usize,
        vo_size: usize,
        observer: &mut dyn IterationObserver,
    ) -> Result<TrainingSummary> {
        self.config.validate()?;
        corpus.validate(vs_size, vo_size)?;

        let unused = corpus.unused_sources(vs_size);
        if !unused.is_empty() {
            debug!(
                "{} source ids never occur in the corpus and will collapse to zero",
                unused.len()
            );
        }

        let mut table = ProbabilityTable::uniform(vo_size, vs_size);
        let mut log_likelihoods = Vec::with_capacity(self.config.iterations);
        let mut previous_likelihood = NEG_INFINITY;
        let mut stopped_early = false;

        for iteration in 0..self.config.iterations {
            let (likelihood, unexplained) = likelihood_and_unexplained(corpus, &table);
            if unexplained > 0 {
                debug!(
                    "iteration {}: {} observed tokens have no source word with mass, left out of the likelihood",
                    iteration, unexplained
                );
            }
            if iteration > 0
                && self
                    .config
                    .stop
                    .should_stop(iteration, previous_likelihood, likelihood)
            {
                info!(
                    "stopping after {} iterations\tNew: {:.4}\tOld: {:.4}",
                    iteration, likelihood, previous_likelihood
                );
                stopped_early = true;
                break;
            }
            log_likelihoods.push(likelihood);

            // E-step
            let counts = expectation_step(corpus, &table);

            // M-step
            table.replace(maximization_step(&counts))?;

            let degenerate = degenerate_sources(&counts);
            if !degenerate.is_empty() {
                debug!(
                    "iteration {}: source ids {:?} received no mass, columns set to zero",
                    iteration, degenerate
                );
            }

            info!(
                "{}\tNew: {:.4}\tOld: {:.4}",
                iteration, likelihood, previous_likelihood
            );

            observer.on_iteration(&IterationReport {
                iteration,
                log_likelihood: likelihood,
                counts: &counts,
                table: &table,
                degenerate_sources: &degenerate,
            });

            previous_likelihood = likelihood;
        }

        Ok(TrainingSummary {
            table,
            iterations_run: log_likelihoods.len(),
            log_likelihoods,
            stopped_early,
        })
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Trainer::new(TrainingConfig::default())
    }
}
