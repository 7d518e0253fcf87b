use crate::error::{Error, Result};

const SUM_TOLERANCE: f64 = 1e-6;

/// Inverse-transform sampler over a discrete distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeTable<T> {
    entries: Vec<(f64, T)>,
}

impl<T: Clone> CumulativeTable<T> {
    /// Builds the running-sum table from `(value, probability)` pairs in the
    /// order given. Zero-probability entries are dropped so they can never be
    /// drawn.
    pub fn new(label: &str, weights: impl IntoIterator<Item = (T, f64)>) -> Result<Self> {
        let mut entries = Vec::new();
        let mut cumulative = 0.0;
        for (value, probability) in weights {
            if !probability.is_finite() || probability < 0.0 {
                return Err(Error::InvalidDistribution(format!(
                    "{}: probability {} must be a non-negative number",
                    label, probability
                )));
            }
            if probability == 0.0 {
                continue;
            }
            cumulative += probability;
            entries.push((cumulative, value));
        }

        if (cumulative - 1.0).abs() > SUM_TOLERANCE {
            return Err(Error::InvalidDistribution(format!(
                "{}: probabilities must sum to 1 (got {:.4})",
                label, cumulative
            )));
        }

        Ok(Self { entries })
    }

    /// Value of the first entry whose cumulative bound is at least `u`.
    pub fn sample(&self, u: f64) -> T {
        // A table that passed the sum check holds at least one entry.
        match self.entries.iter().find(|(upper, _)| u <= *upper) {
            Some((_, value)) => value.clone(),
            None => self.entries[self.entries.len() - 1].1.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
