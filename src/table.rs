// Course:      Efficient Linear Algebra and Machine Learning
// Assignment:  Final Assignment, Word Alignment ("Translation Pairs")
// Author:      Michael Watkins
//
// Honor Code:  I pledge that this program represents my own work.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{Error, Result};

/// Translation probabilities t(o|s), stored as a dense
/// (observed, source) grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityTable {
    t_table: Array2<f64>,
}

impl ProbabilityTable {
    /// Every source word generates every observed word with 1/vo_size.
    pub fn uniform(vo_size: usize, vs_size: usize) -> Self {
        ProbabilityTable {
            t_table: Array2::from_elem((vo_size, vs_size), 1. / (vo_size as f64)),
        }
    }

    /// Wraps an existing grid. Every entry must lie in [0, 1].
    pub fn from_array(t_table: Array2<f64>) -> Result<Self> {
        if let Some(((o, s), &value)) = t_table
            .indexed_iter()
            .find(|&(_, &p)| !(0. ..=1.).contains(&p))
        {
            return Err(Error::ProbabilityOutOfRange { o, s, value });
        }
        Ok(ProbabilityTable { t_table })
    }

    /// Resets the table to the uniform distribution, keeping its shape.
    pub fn initialize_uniform(&mut self, vo_size: usize, vs_size: usize) {
        *self = ProbabilityTable::uniform(vo_size, vs_size);
    }

    pub fn get(&self, o: usize, s: usize) -> f64 {
        self.t_table[[o, s]]
    }

    /// Swaps in `new_table`. The shape may not change during a run.
    pub fn replace(&mut self, new_table: ProbabilityTable) -> Result<()> {
        if new_table.dim() != self.dim() {
            return Err(Error::ShapeMismatch {
                expected: self.dim(),
                found: new_table.dim(),
            });
        }
        self.t_table = new_table.t_table;
        Ok(())
    }

    /// (vo_size, vs_size)
    pub fn dim(&self) -> (usize, usize) {
        self.t_table.dim()
    }

    pub fn observed_size(&self) -> usize {
        self.t_table.nrows()
    }

    pub fn source_size(&self) -> usize {
        self.t_table.ncols()
    }

    /// Σ_o t(o|s) for every source id.
    pub fn column_sums(&self) -> Array1<f64> {
        self.t_table.sum_axis(Axis(0))
    }

    pub fn view(&self) -> ArrayView2<f64> {
        self.t_table.view()
    }

    /// Dense export keyed `[o][s]`.
    pub fn to_grid(&self) -> Vec<Vec<f64>> {
        self.t_table
            .outer_iter()
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.t_table
    }
}

/// Expected (o, s) co-occurrence counts for one iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpectedCounts {
    counts: Array2<f64>,
}

impl ExpectedCounts {
    pub fn zeros(vo_size: usize, vs_size: usize) -> Self {
        ExpectedCounts {
            counts: Array2::zeros((vo_size, vs_size)),
        }
    }

    pub fn add(&mut self, o: usize, s: usize, amount: f64) {
        self.counts[[o, s]] += amount;
    }

    pub fn get(&self, o: usize, s: usize) -> f64 {
        self.counts[[o, s]]
    }

    /// Σ_o count(o, s) for every source id.
    pub fn source_totals(&self) -> Array1<f64> {
        self.counts.sum_axis(Axis(0))
    }

    pub fn dim(&self) -> (usize, usize) {
        self.counts.dim()
    }

    pub fn view(&self) -> ArrayView2<f64> {
        self.counts.view()
    }

    /// Renormalizes each source column into a probability table. Columns
    /// without any mass are set to zero.
    pub fn normalize(&self) -> ProbabilityTable {
        let totals = self.source_totals();
        let mut t_table = self.counts.to_owned();

        for (mut column, &total) in t_table.axis_iter_mut(Axis(1)).zip(totals.iter()) {
            if total > 0. {
                column /= total;
            } else {
                column.fill(total);
            }
        }

        ProbabilityTable { t_table }
    }
}
