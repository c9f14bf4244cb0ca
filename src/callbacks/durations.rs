//! Split divisions by a duration pattern.
//!
//! For the i-th input division:
//! 1. An empty pattern passes the division through unchanged.
//! 2. Compound meters (per the classifier) scale every pattern element by the
//!    compound meter multiplier; simple meters use the pattern as written.
//! 3. The pattern is rotated by `pattern_rotation_index * i`.
//! 4. Cyclic patterns repeat element by element up to the input duration,
//!    never past it. Non-cyclic patterns are used once.
//! 5. Whatever is left over becomes a remainder division on the configured
//!    side, or is fused into the neighbouring element when it is no longer
//!    than the fuse threshold.

use super::{DivisionCallback, Remainder};
use crate::division::Division;
use crate::error::BacaError;
use crate::meter::{MeterClass, MeterClassifier, StandardMeterClassifier};
use crate::pattern;
use crate::threading::thread_offsets;
use log::{debug, trace};
use num_rational::Rational64;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SplitByDurationsCallback {
    pub(crate) durations: Vec<Division>,
    pub(crate) cyclic: bool,
    pub(crate) compound_meter_multiplier: Rational64,
    pub(crate) pattern_rotation_index: i64,
    pub(crate) remainder: Remainder,
    pub(crate) remainder_fuse_threshold: Option<Division>,
    pub(crate) classifier: Arc<dyn MeterClassifier + Send + Sync>,
}

impl Default for SplitByDurationsCallback {
    fn default() -> Self {
        Self {
            durations: Vec::new(),
            cyclic: false,
            compound_meter_multiplier: Rational64::from_integer(1),
            pattern_rotation_index: 0,
            remainder: Remainder::Right,
            remainder_fuse_threshold: None,
            classifier: Arc::new(StandardMeterClassifier),
        }
    }
}

impl SplitByDurationsCallback {
    pub fn builder() -> SplitByDurationsBuilder {
        SplitByDurationsBuilder::default()
    }

    pub fn durations(&self) -> &[Division] {
        &self.durations
    }

    pub fn cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn compound_meter_multiplier(&self) -> Rational64 {
        self.compound_meter_multiplier
    }

    pub fn pattern_rotation_index(&self) -> i64 {
        self.pattern_rotation_index
    }

    pub fn remainder(&self) -> Remainder {
        self.remainder
    }

    pub fn remainder_fuse_threshold(&self) -> Option<&Division> {
        self.remainder_fuse_threshold.as_ref()
    }

    /// Split one division; `index` drives the pattern rotation.
    fn split_division(&self, index: usize, division: &Division) -> Vec<Division> {
        if self.durations.is_empty() {
            return vec![division.clone()];
        }
        let duration = division.duration();

        let working = match self.classifier.classify(division) {
            MeterClass::Simple => self.durations.clone(),
            MeterClass::Compound => self
                .durations
                .iter()
                .map(|d| d.scale(self.compound_meter_multiplier))
                .collect(),
        };
        // Rotation only matters modulo the pattern length; reduce before multiplying.
        let len = working.len() as i64;
        let rotation = self.pattern_rotation_index.rem_euclid(len) * (index as i64 % len) % len;
        let working = pattern::rotate(&working, rotation);
        let mut parts = if self.cyclic {
            pattern::repeat_to_weight(&working, duration, |d| d.duration())
        } else {
            working
        };

        let total: Rational64 = parts.iter().map(|d| d.duration()).sum();
        if total == duration {
            return parts;
        }

        let remainder = Division::from_duration(duration - total);
        let fuse = match &self.remainder_fuse_threshold {
            Some(threshold) => remainder.duration() <= threshold.duration() && !parts.is_empty(),
            None => false,
        };
        trace!(
            "division {} of {}: remainder {} on the {:?} ({})",
            index,
            division,
            remainder,
            self.remainder,
            if fuse { "fused" } else { "separate" }
        );
        match (self.remainder, fuse) {
            (Remainder::Left, true) => parts[0] = &remainder + &parts[0],
            (Remainder::Left, false) => parts.insert(0, remainder),
            (Remainder::Right, true) => {
                let last = parts.len() - 1;
                parts[last] = &parts[last] + &remainder;
            }
            (Remainder::Right, false) => parts.push(remainder),
        }

        let total: Rational64 = parts.iter().map(|d| d.duration()).sum();
        assert_eq!(
            total, duration,
            "split of {} does not sum to its duration",
            division
        );
        parts
    }
}

impl DivisionCallback for SplitByDurationsCallback {
    /// # Errors
    /// [`BacaError::InvalidOperation`] when an input division is not positive.
    fn call(&self, divisions: &[Division]) -> Result<Vec<Vec<Division>>, BacaError> {
        let start_offset = divisions.first().and_then(|d| d.start_offset());
        let mut result = Vec::with_capacity(divisions.len());
        for (i, division) in divisions.iter().enumerate() {
            if !division.is_positive() {
                return Err(BacaError::InvalidOperation(format!(
                    "division must be positive: {}",
                    division
                )));
            }
            result.push(self.split_division(i, division));
        }
        debug!(
            "split {} divisions by {} durations into {} parts",
            divisions.len(),
            self.durations.len(),
            result.iter().map(|parts| parts.len()).sum::<usize>()
        );
        Ok(thread_offsets(result, start_offset))
    }
}

/// Builder for [`SplitByDurationsCallback`]. Validation happens in [`build()`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct SplitByDurationsBuilder {
    durations: Vec<(i64, i64)>,
    cyclic: bool,
    compound_meter_multiplier: Option<Rational64>,
    pattern_rotation_index: i64,
    remainder: Remainder,
    remainder_fuse_threshold: Option<(i64, i64)>,
    classifier: Option<Arc<dyn MeterClassifier + Send + Sync>>,
}

impl SplitByDurationsBuilder {
    pub fn durations(mut self, durations: &[(i64, i64)]) -> Self {
        self.durations = durations.to_vec();
        self
    }

    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn compound_meter_multiplier(mut self, multiplier: Rational64) -> Self {
        self.compound_meter_multiplier = Some(multiplier);
        self
    }

    pub fn pattern_rotation_index(mut self, index: i64) -> Self {
        self.pattern_rotation_index = index;
        self
    }

    pub fn remainder(mut self, remainder: Remainder) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn remainder_fuse_threshold(mut self, threshold: (i64, i64)) -> Self {
        self.remainder_fuse_threshold = Some(threshold);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn MeterClassifier + Send + Sync>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// # Errors
    /// [`BacaError::ConfigurationError`] for zero denominators, non-positive
    /// durations, a non-positive multiplier or a non-positive threshold.
    pub fn build(self) -> Result<SplitByDurationsCallback, BacaError> {
        let durations = self
            .durations
            .iter()
            .map(|&pair| positive_division(pair, "duration"))
            .collect::<Result<Vec<_>, _>>()?;

        let compound_meter_multiplier = self
            .compound_meter_multiplier
            .unwrap_or_else(|| Rational64::from_integer(1));
        if compound_meter_multiplier <= Rational64::from_integer(0) {
            return Err(BacaError::ConfigurationError(format!(
                "compound meter multiplier must be positive: {}",
                compound_meter_multiplier
            )));
        }

        let remainder_fuse_threshold = self
            .remainder_fuse_threshold
            .map(|pair| positive_division(pair, "remainder fuse threshold"))
            .transpose()?;

        Ok(SplitByDurationsCallback {
            durations,
            cyclic: self.cyclic,
            compound_meter_multiplier,
            pattern_rotation_index: self.pattern_rotation_index,
            remainder: self.remainder,
            remainder_fuse_threshold,
            classifier: self
                .classifier
                .unwrap_or_else(|| Arc::new(StandardMeterClassifier)),
        })
    }
}

fn positive_division(pair: (i64, i64), what: &str) -> Result<Division, BacaError> {
    if pair.1 == 0 {
        return Err(BacaError::ConfigurationError(format!(
            "{} has a zero denominator: {}/{}",
            what, pair.0, pair.1
        )));
    }
    let division = Division::new(pair.0, pair.1);
    if !division.is_positive() {
        return Err(BacaError::ConfigurationError(format!(
            "{} must be positive: {}",
            what, division
        )));
    }
    Ok(division)
}
