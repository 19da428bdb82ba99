// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::info;
use unicode_segmentation::UnicodeSegmentation;

use crate::corpus::{Corpus, SentencePair};
use crate::error::{Error, Result};
use crate::table::ProbabilityTable;
use crate::vocab::{Vocabulary, NULL_TOKEN};

/// An encoded corpus together with the vocabularies that encode it.
#[derive(Clone, Debug, Default)]
pub struct ParallelCorpus {
    pub corpus: Corpus,
    pub source: Vocabulary,
    pub observed: Vocabulary,
}

impl ParallelCorpus {
    /// Tokenizes and encodes one pair of raw lines.
    pub fn push_line_pair(&mut self, source_line: &str, observed_line: &str, add_null: bool) {
        let mut source = tokenize(source_line);
        if add_null {
            source.push(String::from(NULL_TOKEN));
        }
        let observed = tokenize(observed_line);

        let pair = SentencePair::new(self.source.encode(&source), self.observed.encode(&observed));
        self.corpus.push(pair);
    }
}

// Tokenize sentences on Unicode word boundaries, dropping whitespace
pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .to_lowercase()
        .split_word_bounds()
        .filter(|tok| !tok.trim().is_empty())
        .map(String::from)
        .collect()
}

/// Reads line-aligned source and observed text.
pub fn read_parallel<S: BufRead, T: BufRead>(
    source: S,
    target: T,
    add_null: bool,
) -> Result<ParallelCorpus> {
    let source_lines = source.lines().collect::<std::io::Result<Vec<_>>>()?;
    let target_lines = target.lines().collect::<std::io::Result<Vec<_>>>()?;

    if source_lines.len() != target_lines.len() {
        return Err(Error::LineCountMismatch {
            source_lines: source_lines.len(),
            target_lines: target_lines.len(),
        });
    }

    let mut data = ParallelCorpus::default();
    for (source_line, target_line) in source_lines.iter().zip(target_lines.iter()) {
        data.push_line_pair(source_line, target_line, add_null);
    }

    Ok(data)
}

// Load sentences
pub fn load_parallel<P: AsRef<Path>, Q: AsRef<Path>>(
    source_file: P,
    target_file: Q,
    add_null: bool,
) -> Result<ParallelCorpus> {
    let source_path = source_file.as_ref();
    let target_path = target_file.as_ref();
    let source = File::open(source_path).map_err(|err| Error::io(source_path, err))?;
    let target = File::open(target_path).map_err(|err| Error::io(target_path, err))?;

    let data = read_parallel(BufReader::new(source), BufReader::new(target), add_null)?;
    info!(
        "loaded {} sentence pairs, {} source and {} target word types",
        data.corpus.len(),
        data.source.len(),
        data.observed.len()
    );

    Ok(data)
}

/// Writes `source\tobserved\tprobability` for every entry above `threshold`.
pub fn write_dictionary<W: Write>(
    mut writer: W,
    table: &ProbabilityTable,
    source: &Vocabulary,
    observed: &Vocabulary,
    threshold: f64,
) -> Result<usize> {
    let mut written = 0;

    for (s, src) in source.iter() {
        for (o, obs) in observed.iter() {
            let p = table.get(o, s);
            if p > threshold {
                writeln!(writer, "{}\t{}\t{:.4}", src, obs, p)?;
                written += 1;
            }
        }
    }

    writer.flush()?;
    Ok(written)
}

// Save the dictionary to a file
pub fn save_dictionary<P: AsRef<Path>>(
    output_file: P,
    data: &ParallelCorpus,
    table: &ProbabilityTable,
    threshold: f64,
) -> Result<usize> {
    let path = output_file.as_ref();
    let output = File::create(path).map_err(|err| Error::io(path, err))?;

    write_dictionary(
        std::io::BufWriter::new(output),
        table,
        &data.source,
        &data.observed,
        threshold,
    )
}
