// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

use log::{info, LevelFilter};
use stdinout::OrExit;

use word_translation::{
    load_parallel, save_dictionary, LikelihoodDelta, LogObserver, Trainer, TrainingConfig,
    DEFAULT_ITERATIONS,
};

mod args;
use args::parse_args;

/// `-v`/`-q` override the level; otherwise `RUST_LOG` decides.
fn level_override(verbose: u64, quiet: u64) -> Option<LevelFilter> {
    match (verbose, quiet) {
        (0, 0) => None,
        (_, 1) => Some(LevelFilter::Warn),
        (_, q) if q > 1 => Some(LevelFilter::Error),
        (1, _) => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

fn init_logging(verbose: u64, quiet: u64) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level_override(verbose, quiet) {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn main() {
    let arguments = parse_args();

    init_logging(
        arguments.occurrences_of("VERBOSE"),
        arguments.occurrences_of("QUIET"),
    );

    let source_file = arguments.value_of("SOURCE").or_exit("Missing source file", 1);
    let target_file = arguments.value_of("TARGET").or_exit("Missing target file", 1);
    let output_file = arguments.value_of("OUTPUT").or_exit("Missing output file", 1);

    let p: f64 = arguments
        .value_of("PROBABILITY")
        .unwrap_or("0.5")
        .parse()
        .or_exit("Cannot parse probability", 1);

    let mut config = match arguments.value_of("ITERATIONS") {
        Some(i) => TrainingConfig::with_iterations(i.parse().or_exit("Cannot parse iterations", 1)),
        None => TrainingConfig::with_iterations(DEFAULT_ITERATIONS),
    };

    if let Some(eps) = arguments.value_of("STOP_EPSILON") {
        let epsilon: f64 = eps.parse().or_exit("Cannot parse stop epsilon", 1);
        config = config.stop_when(LikelihoodDelta { epsilon });
    }

    let data = load_parallel(source_file, target_file, arguments.is_present("NULL"))
        .or_exit("Cannot load parallel corpus", 1);

    let trainer = Trainer::new(config);
    let mut observer = LogObserver::with_vocabularies(&data.source, &data.observed);
    let summary = trainer
        .train_with_observer(
            &data.corpus,
            data.source.len(),
            data.observed.len(),
            &mut observer,
        )
        .or_exit("Training failed", 1);

    let written = save_dictionary(output_file, &data, &summary.table, p)
        .or_exit("Could not write to output file", 1);

    info!(
        "wrote {} entries after {} iterations to {}",
        written, summary.iterations_run, output_file
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_kept_without_flags() {
        assert_eq!(level_override(0, 0), None);
    }

    #[test]
    fn flags_override_env_filter() {
        assert_eq!(level_override(1, 0), Some(LevelFilter::Debug));
        assert_eq!(level_override(3, 0), Some(LevelFilter::Trace));
        assert_eq!(level_override(0, 1), Some(LevelFilter::Warn));
        assert_eq!(level_override(0, 2), Some(LevelFilter::Error));
    }
}
