//! Split divisions by rounded integer ratios.
//!
//! The i-th division takes ratio `i mod len` and its numerator is cut into
//! integer parts proportional to that ratio. Parts keep the division's
//! denominator, so `(5, 8)` by `1:1` becomes `(2, 8), (3, 8)`.

use super::DivisionCallback;
use crate::division::Division;
use crate::error::BacaError;
use crate::pattern;
use crate::threading::thread_offsets;
use log::debug;

const WHOLE: &[i64] = &[1];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitByRoundedRatiosCallback {
    ratios: Vec<Vec<i64>>,
}

impl Default for SplitByRoundedRatiosCallback {
    fn default() -> Self {
        Self {
            ratios: vec![vec![1]],
        }
    }
}

impl SplitByRoundedRatiosCallback {
    /// An empty list means the single ratio `1`, which leaves divisions whole.
    ///
    /// # Errors
    /// [`BacaError::ConfigurationError`] when a ratio is empty or has a
    /// non-positive part.
    pub fn new(ratios: Vec<Vec<i64>>) -> Result<Self, BacaError> {
        if ratios.is_empty() {
            return Ok(Self::default());
        }
        for ratio in &ratios {
            if ratio.is_empty() {
                return Err(BacaError::ConfigurationError(
                    "ratio must have at least one part".to_string(),
                ));
            }
            if let Some(part) = ratio.iter().find(|part| **part <= 0) {
                return Err(BacaError::ConfigurationError(format!(
                    "ratio parts must be positive: {:?} has {}",
                    ratio, part
                )));
            }
        }
        Ok(Self { ratios })
    }

    pub fn ratios(&self) -> &[Vec<i64>] {
        &self.ratios
    }
}

impl DivisionCallback for SplitByRoundedRatiosCallback {
    fn call(&self, divisions: &[Division]) -> Result<Vec<Vec<Division>>, BacaError> {
        let start_offset = divisions.first().and_then(|d| d.start_offset());
        let result: Vec<Vec<Division>> = divisions
            .iter()
            .enumerate()
            .map(|(i, division)| {
                let ratio = pattern::cyclic_get(&self.ratios, i)
                    .map(|ratio| ratio.as_slice())
                    .unwrap_or(WHOLE);
                pattern::partition_integer_by_ratio(division.numerator, ratio)
                    .into_iter()
                    .map(|numerator| Division::new(numerator, division.denominator))
                    .collect()
            })
            .collect();
        debug!(
            "split {} divisions by {} ratios",
            divisions.len(),
            self.ratios.len()
        );
        Ok(thread_offsets(result, start_offset))
    }
}
