//! # Meter Classification
//!
//! Duration splitting scales its pattern when the input division reads as a
//! compound meter (6/8, 9/8, 12/8, ...). Which meters count as compound is a
//! question for a [`MeterClassifier`]; [`StandardMeterClassifier`] is the
//! usual rule and is what callbacks use unless told otherwise.
//!
//! ## Standard Rule
//! A division `n/d` is compound when 3 divides `n` and `n` is not 3 itself:
//! - `6/8`, `9/8`, `12/8`, `6/4`, `15/16` - compound
//! - `3/4`, `3/8`, `4/4`, `5/8`, `2/2` - simple
//!
//! The pair is read as written, so `6/8` is compound while `3/4` is simple.
//!
//! ## Example
//! ```rust
//! use baca::{Division, MeterClass, MeterClassifier, StandardMeterClassifier};
//!
//! let classifier = StandardMeterClassifier;
//! assert_eq!(classifier.classify(&Division::new(6, 8)), MeterClass::Compound);
//! assert_eq!(classifier.classify(&Division::new(3, 4)), MeterClass::Simple);
//! ```

use crate::division::Division;
use std::fmt;

/// Meter class of a division read as a time signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterClass {
    Simple,
    Compound,
}

/// Classifies divisions as simple or compound meters.
pub trait MeterClassifier: fmt::Debug {
    fn classify(&self, division: &Division) -> MeterClass;
}

/// Compound when the numerator is a multiple of 3 other than 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMeterClassifier;

impl MeterClassifier for StandardMeterClassifier {
    fn classify(&self, division: &Division) -> MeterClass {
        let beats = division.numerator.abs();
        if beats % 3 == 0 && beats != 3 && beats != 0 {
            MeterClass::Compound
        } else {
            MeterClass::Simple
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(n: i64, d: i64) -> MeterClass {
        StandardMeterClassifier.classify(&Division::new(n, d))
    }

    #[test]
    fn test_compound_meters() {
        assert_eq!(classify(6, 8), MeterClass::Compound);
        assert_eq!(classify(9, 8), MeterClass::Compound);
        assert_eq!(classify(12, 8), MeterClass::Compound);
        assert_eq!(classify(6, 4), MeterClass::Compound);
        assert_eq!(classify(15, 16), MeterClass::Compound);
    }

    #[test]
    fn test_simple_meters() {
        assert_eq!(classify(3, 4), MeterClass::Simple);
        assert_eq!(classify(3, 8), MeterClass::Simple);
        assert_eq!(classify(4, 4), MeterClass::Simple);
        assert_eq!(classify(5, 8), MeterClass::Simple);
        assert_eq!(classify(2, 2), MeterClass::Simple);
    }

    #[test]
    fn test_pair_is_read_as_written() {
        // 3/4 and 6/8 last the same but classify differently
        assert_eq!(classify(3, 4), MeterClass::Simple);
        assert_eq!(classify(6, 8), MeterClass::Compound);
    }
}
