// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

use clap::{App, AppSettings, Arg, ArgMatches};

static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
];

pub fn parse_args() -> ArgMatches<'static> {
    App::new("word-translation")
        .about("Estimates word translation probabilities with IBM Model 1 EM")
        .settings(DEFAULT_CLAP_SETTINGS)
        .arg(
            Arg::with_name("ITERATIONS")
                .short("i")
                .long("iterations")
                .value_name("I")
                .help("Number of EM iterations (default: 50)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("PROBABILITY")
                .short("p")
                .long("probability")
                .value_name("P")
                .help("Minimum probability for a dictionary entry (default: 0.5)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("STOP_EPSILON")
                .short("e")
                .long("stop-epsilon")
                .value_name("E")
                .help("Stop early once the log-likelihood changes by at most E")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("NULL")
                .short("n")
                .long("null")
                .help("Append a NULL word to every source sentence"),
        )
        .arg(
            Arg::with_name("VERBOSE")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Increase logging (-vv dumps counts and probabilities)"),
        )
        .arg(
            Arg::with_name("QUIET")
                .short("q")
                .long("quiet")
                .multiple(true)
                .conflicts_with("VERBOSE")
                .help("Decrease logging"),
        )
        .arg(
            Arg::with_name("SOURCE")
                .help("Source language sentences, one per line")
                .index(1)
                .required(true),
        )
        .arg(
            Arg::with_name("TARGET")
                .help("Target language sentences, aligned line by line with SOURCE")
                .index(2)
                .required(true),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Output file to store the translation dictionary")
                .index(3)
                .required(true),
        )
        .get_matches()
}
