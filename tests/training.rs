use std::io::Cursor;

use word_translation::{
    expectation_step, log_likelihood, maximization_step, read_parallel, unexplained_tokens,
    Corpus, IterationObserver, IterationReport, LikelihoodDelta, ProbabilityTable, SentencePair,
    Trainer, TrainingConfig,
};

fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

fn toy() -> word_translation::ParallelCorpus {
    read_parallel(
        Cursor::new("la maison\nla fleur\n"),
        Cursor::new("the house\nthe flower\n"),
        false,
    )
    .unwrap()
}

#[test]
fn toy_corpus_after_fifty_iterations() {
    let data = toy();
    let summary = Trainer::default()
        .train(&data.corpus, data.source.len(), data.observed.len())
        .unwrap();
    assert_eq!(summary.iterations_run, 50);

    let t = |o: &str, s: &str| {
        summary.table.get(
            data.observed.id(o).unwrap(),
            data.source.id(s).unwrap(),
        )
    };

    assert!(close(t("the", "la"), 1., 1e-6));
    assert!(close(t("house", "la"), 0., 1e-6));
    assert!(close(t("flower", "la"), 0., 1e-6));

    // The unambiguous nouns are still converging at this point.
    assert!(t("house", "maison") > 0.98);
    assert!(t("flower", "fleur") > 0.98);
    assert!(t("the", "maison") < 0.02);
    assert!(t("the", "fleur") < 0.02);
    assert!(t("house", "maison") > t("house", "la"));

    // Never co-occur.
    assert_eq!(t("flower", "maison"), 0.);
    assert_eq!(t("house", "fleur"), 0.);
}

#[test]
fn toy_corpus_keeps_converging() {
    let data = toy();
    let summary = Trainer::new(TrainingConfig::with_iterations(2000))
        .train(&data.corpus, data.source.len(), data.observed.len())
        .unwrap();
    let house = data.observed.id("house").unwrap();
    let maison = data.source.id("maison").unwrap();
    assert!(summary.table.get(house, maison) > 0.999);
}

#[test]
fn log_likelihood_never_decreases() {
    let data = toy();
    let summary = Trainer::default()
        .train(&data.corpus, data.source.len(), data.observed.len())
        .unwrap();

    for pair in summary.log_likelihoods.windows(2) {
        assert!(pair[1] >= pair[0] - 1e-12, "{} < {}", pair[1], pair[0]);
    }
    assert!(close(summary.log_likelihoods[0], 4. * (2f64 / 3.).ln(), 1e-12));
}

#[test]
fn single_pair_stays_symmetric() {
    let corpus = Corpus::new(vec![SentencePair::new(vec![0, 1], vec![0, 1])]);
    let summary = Trainer::default().train(&corpus, 2, 2).unwrap();

    for o in 0..2 {
        for s in 0..2 {
            assert!(close(summary.table.get(o, s), 0.5, 1e-12));
        }
    }
}

#[test]
fn repeated_source_word_counts_per_position() {
    // a=0 b=1 / x=0 y=1
    let repeated = Corpus::new(vec![
        SentencePair::new(vec![0, 0, 1], vec![0]),
        SentencePair::new(vec![1], vec![1]),
    ]);
    let deduplicated = Corpus::new(vec![
        SentencePair::new(vec![0, 1], vec![0]),
        SentencePair::new(vec![1], vec![1]),
    ]);
    let uniform = ProbabilityTable::uniform(2, 2);

    let counts = expectation_step(&repeated, &uniform);
    assert!(close(counts.get(0, 0), 2. / 3., 1e-12));
    assert!(close(counts.get(0, 1), 1. / 3., 1e-12));

    let with_repeat = maximization_step(&counts);
    let without_repeat = maximization_step(&expectation_step(&deduplicated, &uniform));

    assert!(close(with_repeat.get(0, 1), 0.25, 1e-12));
    assert!(close(without_repeat.get(0, 1), 1. / 3., 1e-12));
    assert!(close(with_repeat.get(0, 0), 1., 1e-12));
}

struct UnusedSourceWatcher {
    source: usize,
    violations: usize,
    normalization_failures: usize,
}

impl IterationObserver for UnusedSourceWatcher {
    fn on_iteration(&mut self, report: &IterationReport) {
        let (vo_size, vs_size) = report.table.dim();
        for o in 0..vo_size {
            if report.counts.get(o, self.source) != 0. || report.table.get(o, self.source) != 0. {
                self.violations += 1;
            }
        }

        let totals = report.counts.source_totals();
        let sums = report.table.column_sums();
        for s in 0..vs_size {
            let expected = if totals[s] > 0. { 1. } else { 0. };
            if !close(sums[s], expected, 1e-9) {
                self.normalization_failures += 1;
            }
        }
    }
}

#[test]
fn unused_source_column_stays_zero() {
    let data = toy();
    let vs_size = data.source.len() + 1;
    let mut watcher = UnusedSourceWatcher {
        source: vs_size - 1,
        violations: 0,
        normalization_failures: 0,
    };

    let summary = Trainer::new(TrainingConfig::with_iterations(20))
        .train_with_observer(&data.corpus, vs_size, data.observed.len(), &mut watcher)
        .unwrap();

    assert_eq!(watcher.violations, 0);
    assert_eq!(watcher.normalization_failures, 0);
    for o in 0..data.observed.len() {
        assert_eq!(summary.table.get(o, vs_size - 1), 0.);
    }
}

#[test]
fn likelihood_matches_trained_table() {
    let data = toy();
    let summary = Trainer::new(TrainingConfig::with_iterations(10))
        .train(&data.corpus, data.source.len(), data.observed.len())
        .unwrap();
    let last = *summary.log_likelihoods.last().unwrap();
    assert!(log_likelihood(&data.corpus, &summary.table) >= last);
}

#[test]
fn grid_export_matches_get() {
    let data = toy();
    let summary = Trainer::new(TrainingConfig::with_iterations(5))
        .train(&data.corpus, data.source.len(), data.observed.len())
        .unwrap();
    let grid = summary.table.to_grid();
    assert_eq!(grid.len(), data.observed.len());
    for (o, row) in grid.iter().enumerate() {
        for (s, &p) in row.iter().enumerate() {
            assert_eq!(p, summary.table.get(o, s));
        }
    }
}

#[test]
fn blank_source_line_does_not_disable_early_stopping() {
    let data = read_parallel(
        Cursor::new("la maison\nla fleur\n\n"),
        Cursor::new("the house\nthe flower\nthe\n"),
        false,
    )
    .unwrap();
    assert!(data.corpus.pairs()[2].source.is_empty());

    let config = TrainingConfig::with_iterations(500).stop_when(LikelihoodDelta::default());
    let summary = Trainer::new(config)
        .train(&data.corpus, data.source.len(), data.observed.len())
        .unwrap();

    assert!(summary.stopped_early);
    assert!(summary.iterations_run < 500);
    assert!(summary.log_likelihoods.iter().all(|ll| ll.is_finite()));
    assert_eq!(unexplained_tokens(&data.corpus, &summary.table), 1);
}
