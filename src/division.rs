//! # Division
//!
//! A [`Division`] is an exact duration written as a numerator/denominator pair
//! that is never reduced: `2/8` and `1/4` last equally long but stand for
//! different groupings (two eighths versus one quarter), so both the pair and
//! the duration are kept.
//!
//! A division may be anchored at a start offset. Arithmetic between two
//! anchored divisions works on their timespans:
//! - addition gives the hull of both spans
//! - subtraction removes one span from the other and must leave exactly one piece
//!
//! ## Example
//! ```rust
//! use baca::Division;
//!
//! let a = Division::new(4, 1).with_start_offset(10);
//! let b = Division::new(2, 1).with_start_offset(10);
//! assert_eq!(a.subtract(&b)?, Division::new(2, 1).with_start_offset(12));
//! assert_eq!(b.subtract(&a)?, Division::new(-2, 1).with_start_offset(12));
//!
//! // Unanchored addition keeps the shared denominator.
//! assert_eq!(Division::new(2, 8) + Division::new(2, 8), Division::new(4, 8));
//! # Ok::<(), baca::BacaError>(())
//! ```

use crate::error::BacaError;
use crate::timespan::{IntoOffset, Offset, Timespan};
use num_rational::Rational64;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg};

/// Non-reduced exact duration with an optional start offset and payload.
///
/// Equality, ordering and hashing look at the pair and the start offset;
/// the payload is ignored.
#[derive(Debug, Clone)]
pub struct Division {
    pub numerator: i64,
    pub denominator: i64,
    pub start_offset: Option<Offset>,
    pub payload: Option<String>, // Caller label, carried but never read
}

impl Division {
    /// Create an unanchored division. The sign is carried by the numerator.
    ///
    /// # Panics
    /// Panics when `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "division denominator must be nonzero");
        let (numerator, denominator) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        Self {
            numerator,
            denominator,
            start_offset: None,
            payload: None,
        }
    }

    /// Division with the reduced pair of `duration`.
    pub fn from_duration(duration: Rational64) -> Self {
        Self::new(*duration.numer(), *duration.denom())
    }

    pub fn with_start_offset<O: IntoOffset>(mut self, start_offset: O) -> Self {
        self.start_offset = Some(start_offset.into_offset());
        self
    }

    pub fn with_payload<S: Into<String>>(mut self, payload: S) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn pair(&self) -> (i64, i64) {
        (self.numerator, self.denominator)
    }

    pub fn duration(&self) -> Rational64 {
        Rational64::new(self.numerator, self.denominator)
    }

    pub fn start_offset(&self) -> Option<Offset> {
        self.start_offset
    }

    pub fn stop_offset(&self) -> Option<Offset> {
        self.start_offset.map(|start| start + self.duration())
    }

    pub fn timespan(&self) -> Option<Timespan> {
        self.start_offset
            .map(|start| Timespan::new(start, start + self.duration()))
    }

    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    /// Same duration written over `denominator`.
    pub fn with_denominator(&self, denominator: i64) -> Result<Division, BacaError> {
        if denominator <= 0 {
            return Err(BacaError::InvalidOperation(format!(
                "denominator must be positive: {}",
                denominator
            )));
        }
        let scaled = self.duration() * Rational64::from_integer(denominator);
        if !scaled.is_integer() {
            return Err(BacaError::InvalidOperation(format!(
                "{} can not be written over {}",
                self, denominator
            )));
        }
        Ok(Division {
            numerator: scaled.to_integer(),
            denominator,
            start_offset: self.start_offset,
            payload: self.payload.clone(),
        })
    }

    /// Multiply numerator and denominator by those of `multiplier`, without reducing.
    /// `1/4` scaled by `3/2` is `3/8`.
    pub fn scale(&self, multiplier: Rational64) -> Division {
        Division {
            numerator: self.numerator * multiplier.numer(),
            denominator: self.denominator * multiplier.denom(),
            start_offset: self.start_offset,
            payload: self.payload.clone(),
        }
    }

    /// Offset-aware subtraction.
    ///
    /// Unanchored divisions subtract as plain fractions. Anchored divisions
    /// subtract as timespans: when nothing of `self` is left after removing
    /// `other`, the operands are swapped and the single remaining piece comes
    /// back negated.
    ///
    /// # Errors
    /// - [`BacaError::InvalidOperation`] when only one side is anchored.
    /// - [`BacaError::AmbiguousSubtraction`] when the spans leave no piece or
    ///   more than one.
    pub fn subtract(&self, other: &Division) -> Result<Division, BacaError> {
        let (this_span, other_span) = match (self.timespan(), other.timespan()) {
            (None, None) => {
                let (numerator, denominator) =
                    combine_pairs(self.pair(), other.pair(), -1);
                return Ok(Division {
                    numerator,
                    denominator,
                    start_offset: None,
                    payload: self.payload.clone(),
                });
            }
            (Some(this_span), Some(other_span)) => (this_span, other_span),
            _ => {
                return Err(BacaError::InvalidOperation(format!(
                    "can not subtract {} from {}: exactly one start offset is set",
                    other, self
                )));
            }
        };

        let mut negate = false;
        let mut pieces = this_span.difference(&other_span);
        if pieces.is_empty() {
            pieces = other_span.difference(&this_span);
            negate = true;
        }
        if pieces.len() != 1 {
            return Err(BacaError::AmbiguousSubtraction {
                minuend: self.to_string(),
                subtrahend: other.to_string(),
                pieces: pieces.len(),
            });
        }

        let piece = pieces[0];
        let denominator = lcm(self.denominator, other.denominator);
        let mut difference = span_division(&piece, denominator);
        if negate {
            difference = -difference;
        }
        difference.payload = self.payload.clone();
        Ok(difference)
    }
}

/// Division covering `span`, written over `denominator` when the span's
/// duration fits it and over a wider common denominator otherwise.
fn span_division(span: &Timespan, denominator: i64) -> Division {
    let duration = span.duration();
    let denominator = lcm(denominator, *duration.denom());
    let numerator = (duration * Rational64::from_integer(denominator)).to_integer();
    Division::new(numerator, denominator).with_start_offset(span.start)
}

/// `a + sign * b` without reducing. Equal denominators are kept; otherwise
/// both sides are written over the least common multiple.
fn combine_pairs(a: (i64, i64), b: (i64, i64), sign: i64) -> (i64, i64) {
    if a.1 == b.1 {
        return (a.0 + sign * b.0, a.1);
    }
    let denominator = lcm(a.1, b.1);
    let numerator = a.0 * (denominator / a.1) + sign * b.0 * (denominator / b.1);
    (numerator, denominator)
}

pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

pub(crate) fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

impl<'a> Add<&'a Division> for &'a Division {
    type Output = Division;

    /// Both anchored: hull of the two spans. Otherwise a plain non-reduced
    /// sum that keeps whichever start offset is present.
    fn add(self, other: &'a Division) -> Division {
        let payload = self.payload.clone().or_else(|| other.payload.clone());
        let mut sum = match (self.timespan(), other.timespan()) {
            (Some(this_span), Some(other_span)) => {
                let hull = this_span.hull(&other_span);
                span_division(&hull, lcm(self.denominator, other.denominator))
            }
            _ => {
                let (numerator, denominator) = combine_pairs(self.pair(), other.pair(), 1);
                Division {
                    numerator,
                    denominator,
                    start_offset: self.start_offset.or(other.start_offset),
                    payload: None,
                }
            }
        };
        sum.payload = payload;
        sum
    }
}

impl Add for Division {
    type Output = Division;

    fn add(self, other: Division) -> Division {
        &self + &other
    }
}

impl Neg for Division {
    type Output = Division;

    fn neg(mut self) -> Division {
        self.numerator = -self.numerator;
        self
    }
}

impl From<(i64, i64)> for Division {
    fn from(pair: (i64, i64)) -> Self {
        Division::new(pair.0, pair.1)
    }
}

impl PartialEq for Division {
    fn eq(&self, other: &Self) -> bool {
        self.pair() == other.pair() && self.start_offset == other.start_offset
    }
}

impl Eq for Division {}

impl Hash for Division {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numerator.hash(state);
        self.denominator.hash(state);
        self.start_offset.hash(state);
    }
}

impl PartialOrd for Division {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Division {
    // Duration first, then notation, then position.
    fn cmp(&self, other: &Self) -> Ordering {
        self.duration()
            .cmp(&other.duration())
            .then(self.denominator.cmp(&other.denominator))
            .then(self.start_offset.cmp(&other.start_offset))
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)?;
        if let Some(start) = self.start_offset {
            write!(f, "@{}", start)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64, den: i64) -> Division {
        Division::new(n, den)
    }

    #[test]
    fn test_pair_is_not_reduced() {
        assert_eq!(d(2, 8).pair(), (2, 8));
        assert_ne!(d(2, 8), d(1, 4));
        assert_eq!(d(2, 8).duration(), d(1, 4).duration());
    }

    #[test]
    fn test_negative_denominator_moves_sign() {
        assert_eq!(d(3, -8).pair(), (-3, 8));
    }

    #[test]
    fn test_payload_ignored_by_equality() {
        assert_eq!(d(3, 8).with_payload("a"), d(3, 8).with_payload("b"));
        assert_ne!(d(3, 8).with_start_offset(0), d(3, 8));
    }

    #[test]
    fn test_unanchored_addition() {
        assert_eq!(d(2, 8) + d(2, 8), d(4, 8));
        assert_eq!(d(1, 4) + d(1, 8), d(3, 8));
        assert_eq!(d(1, 3) + d(1, 2), d(5, 6));
    }

    #[test]
    fn test_addition_propagates_single_offset() {
        let sum = d(1, 4).with_start_offset(Rational64::new(1, 2)) + d(1, 4);
        assert_eq!(sum, d(2, 4).with_start_offset(Rational64::new(1, 2)));
        let sum = d(1, 4) + d(1, 4).with_start_offset(3);
        assert_eq!(sum.start_offset(), Some(Offset::from_integer(3)));
    }

    #[test]
    fn test_anchored_addition_is_hull() {
        // [0, 1/4) and [1/4, 1/2) touch: hull 1/2
        let a = d(2, 8).with_start_offset(0);
        let b = d(2, 8).with_start_offset(Rational64::new(1, 4));
        assert_eq!(&a + &b, d(4, 8).with_start_offset(0));

        // Overlapping spans [0, 1) and [1/2, 1) give [0, 1)
        let a = d(4, 4).with_start_offset(0);
        let b = d(2, 4).with_start_offset(Rational64::new(1, 2));
        assert_eq!(&a + &b, d(4, 4).with_start_offset(0));

        // Gap between spans is covered
        let a = d(1, 4).with_start_offset(0);
        let b = d(1, 4).with_start_offset(Rational64::new(3, 4));
        assert_eq!(&a + &b, d(4, 4).with_start_offset(0));
    }

    #[test]
    fn test_anchored_subtraction_literal_cases() {
        let a = d(4, 1).with_start_offset(10);
        let b = d(2, 1).with_start_offset(10);
        assert_eq!(a.subtract(&b).unwrap(), d(2, 1).with_start_offset(12));
        assert_eq!(b.subtract(&a).unwrap(), d(-2, 1).with_start_offset(12));
    }

    #[test]
    fn test_subtraction_of_identical_spans_is_ambiguous() {
        let a = d(4, 1).with_start_offset(10);
        let result = a.subtract(&a.clone());
        assert!(matches!(
            result,
            Err(BacaError::AmbiguousSubtraction { pieces: 0, .. })
        ));
    }

    #[test]
    fn test_subtraction_leaving_two_pieces_is_ambiguous() {
        let a = d(4, 1).with_start_offset(10);
        let b = d(1, 1).with_start_offset(11);
        assert!(matches!(
            a.subtract(&b),
            Err(BacaError::AmbiguousSubtraction { pieces: 2, .. })
        ));
    }

    #[test]
    fn test_subtraction_with_one_offset_fails() {
        let a = d(4, 1).with_start_offset(10);
        assert!(matches!(
            a.subtract(&d(1, 1)),
            Err(BacaError::InvalidOperation(_))
        ));
        assert!(matches!(
            d(1, 1).subtract(&a),
            Err(BacaError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_unanchored_subtraction() {
        assert_eq!(d(5, 8).subtract(&d(1, 4)).unwrap(), d(3, 8));
        assert_eq!(d(1, 4).subtract(&d(5, 8)).unwrap(), d(-3, 8));
    }

    #[test]
    fn test_disjoint_subtraction_returns_minuend_span() {
        let a = d(1, 1).with_start_offset(0);
        let b = d(1, 1).with_start_offset(5);
        assert_eq!(a.subtract(&b).unwrap(), d(1, 1).with_start_offset(0));
    }

    #[test]
    fn test_with_denominator() {
        assert_eq!(d(1, 4).with_denominator(8).unwrap(), d(2, 8));
        assert!(d(1, 3).with_denominator(8).is_err());
    }

    #[test]
    fn test_scale_is_not_reduced() {
        assert_eq!(d(1, 4).scale(Rational64::new(3, 2)), d(3, 8));
        assert_eq!(d(2, 8).scale(Rational64::new(3, 2)), d(6, 16));
    }

    #[test]
    fn test_ordering_by_duration() {
        assert!(d(1, 8) < d(1, 4));
        assert!(d(1, 8) <= d(2, 16));
        assert!(d(3, 8) > d(1, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(d(3, 8).to_string(), "3/8");
        assert_eq!(
            d(3, 8).with_start_offset(Rational64::new(1, 2)).to_string(),
            "3/8@1/2"
        );
    }
}
