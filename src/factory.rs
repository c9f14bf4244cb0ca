//! # Division Factories
//!
//! Ready-made callbacks and pipelines for the common cases.
//!
//! | Factory | Result |
//! |---------|--------|
//! | [`split_by_durations()`] | cyclic duration split, remainder on the right |
//! | [`split_by_rounded_ratios()`] | rounded ratio split |
//! | [`fuse_divisions()`] | cyclic fuse by counts |
//! | [`quarter_divisions()`] | quarters, remainder on the right |
//! | [`compound_quarter_divisions()`] | quarters, dotted quarters in compound meters |
//! | [`strict_quarter_divisions()`] | quarters, flattened |
//! | [`fuse_compound_quarter_divisions()`] | fuse, then compound quarters per group |
//!
//! ## Example
//! ```rust
//! use baca::{factory, DivisionCallback, Division};
//!
//! let callback = factory::compound_quarter_divisions();
//! let result = callback.call(&[Division::new(6, 8), Division::new(2, 4)])?;
//! assert_eq!(result[0], vec![Division::new(3, 8), Division::new(3, 8)]);
//! assert_eq!(result[1], vec![Division::new(1, 4), Division::new(1, 4)]);
//! # Ok::<(), baca::BacaError>(())
//! ```

use crate::callbacks::{
    FuseByCountsCallback, FuseCounts, SplitByDurationsCallback, SplitByRoundedRatiosCallback,
};
use crate::division::Division;
use crate::error::BacaError;
use crate::pipeline::DivisionPipeline;
use num_rational::Rational64;

/// Cyclic split by `durations` with the remainder on the right.
pub fn split_by_durations(durations: &[(i64, i64)]) -> Result<SplitByDurationsCallback, BacaError> {
    SplitByDurationsCallback::builder()
        .durations(durations)
        .cyclic(true)
        .build()
}

pub fn split_by_rounded_ratios(ratios: Vec<Vec<i64>>) -> Result<SplitByRoundedRatiosCallback, BacaError> {
    SplitByRoundedRatiosCallback::new(ratios)
}

/// Cyclic fuse by `counts`, keeping a short final group.
pub fn fuse_divisions(counts: &[usize]) -> Result<FuseByCountsCallback, BacaError> {
    FuseByCountsCallback::builder(FuseCounts::Counts(counts.to_vec())).build()
}

pub fn quarter_divisions() -> SplitByDurationsCallback {
    SplitByDurationsCallback {
        durations: vec![Division::new(1, 4)],
        cyclic: true,
        ..SplitByDurationsCallback::default()
    }
}

/// Quarters in simple meters, dotted quarters (3/8) in compound meters.
pub fn compound_quarter_divisions() -> SplitByDurationsCallback {
    SplitByDurationsCallback {
        compound_meter_multiplier: Rational64::new(3, 2),
        ..quarter_divisions()
    }
}

/// Quarter split flattened into one sequence.
pub fn strict_quarter_divisions() -> DivisionPipeline {
    DivisionPipeline::new()
        .split_by_durations(quarter_divisions())
        .flatten()
}

/// Fuse by `counts`, then split every fused division into compound quarters.
pub fn fuse_compound_quarter_divisions(counts: &[usize]) -> Result<FuseByCountsCallback, BacaError> {
    FuseByCountsCallback::builder(FuseCounts::Counts(counts.to_vec()))
        .secondary(compound_quarter_divisions())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::DivisionCallback;
    use crate::sequence::DivisionSequence;

    fn d(n: i64, den: i64) -> Division {
        Division::new(n, den)
    }

    #[test]
    fn test_quarter_divisions_remainder_right() {
        let result = quarter_divisions().call(&[d(7, 8)]).unwrap();
        assert_eq!(result, vec![vec![d(1, 4), d(1, 4), d(1, 4), d(1, 8)]]);
    }

    #[test]
    fn test_compound_quarter_divisions_nine_eight() {
        let result = compound_quarter_divisions().call(&[d(9, 8)]).unwrap();
        assert_eq!(result, vec![vec![d(3, 8), d(3, 8), d(3, 8)]]);
    }

    #[test]
    fn test_strict_quarter_divisions() {
        let input = DivisionSequence::from_pairs(&[(3, 8), (2, 4)]);
        let output = strict_quarter_divisions().run(&input).unwrap();
        assert_eq!(output.nested.len(), 1);
        assert_eq!(
            output.divisions,
            DivisionSequence::from_pairs(&[(1, 4), (1, 8), (1, 4), (1, 4)])
        );
    }

    #[test]
    fn test_fuse_compound_quarter_divisions() {
        let callback = fuse_compound_quarter_divisions(&[2]).unwrap();
        let result = callback.call(&[d(3, 8), d(3, 8), d(5, 8)]).unwrap();
        assert_eq!(
            result,
            vec![vec![d(3, 8), d(3, 8)], vec![d(1, 4), d(1, 4), d(1, 8)]]
        );
    }

    #[test]
    fn test_factories_validate_input() {
        assert!(split_by_durations(&[(0, 4)]).is_err());
        assert!(fuse_divisions(&[]).is_err());
        assert!(split_by_rounded_ratios(vec![vec![-1]]).is_err());
    }
}
