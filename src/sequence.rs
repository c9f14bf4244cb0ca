//! # Division Sequence
//!
//! An ordered list of divisions. When the first division is anchored, the
//! sequence keeps its start offsets contiguous: every operation that reorders
//! or regroups divisions re-threads offsets from the original first start
//! offset.
//!
//! ## Operations
//! - [`DivisionSequence::rotate()`] - reorder, then re-thread offsets
//! - [`DivisionSequence::split_by_durations()`] - one subsequence per division
//! - [`DivisionSequence::split_by_rounded_ratios()`] - one subsequence per division
//! - [`DivisionSequence::fuse_by_counts()`] - one subsequence per fused group
//! - [`DivisionSequence::partition_by_counts()`] - regroup without fusing
//!
//! ## Example
//! ```rust
//! use baca::{Division, DivisionSequence, Offset};
//!
//! let sequence = DivisionSequence::from_pairs(&[(3, 8), (2, 4), (1, 4)]).anchored(0);
//! let rotated = sequence.rotate(1);
//! assert_eq!(rotated[0], Division::new(1, 4).with_start_offset(0));
//! assert_eq!(rotated[1], Division::new(3, 8).with_start_offset(Offset::new(1, 4)));
//! assert_eq!(rotated.rotate(-1), sequence);
//! ```

use crate::callbacks::{
    DivisionCallback, FuseByCountsCallback, SplitByDurationsCallback,
    SplitByRoundedRatiosCallback,
};
use crate::division::Division;
use crate::error::BacaError;
use crate::pattern;
use crate::threading::thread_flat;
use crate::timespan::{IntoOffset, Offset};
use num_rational::Rational64;
use std::fmt;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DivisionSequence {
    divisions: Vec<Division>,
}

impl DivisionSequence {
    pub fn new(divisions: Vec<Division>) -> Self {
        Self { divisions }
    }

    pub fn from_pairs(pairs: &[(i64, i64)]) -> Self {
        pairs.iter().map(|&pair| Division::from(pair)).collect()
    }

    /// Anchor the sequence at `start_offset`, threading offsets through every division.
    pub fn anchored<O: IntoOffset>(self, start_offset: O) -> Self {
        Self::new(thread_flat(self.divisions, Some(start_offset.into_offset())))
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Division> {
        self.divisions.iter()
    }

    pub fn as_slice(&self) -> &[Division] {
        &self.divisions
    }

    pub fn into_vec(self) -> Vec<Division> {
        self.divisions
    }

    pub fn start_offset(&self) -> Option<Offset> {
        self.divisions.first().and_then(|d| d.start_offset())
    }

    /// Total duration.
    pub fn duration(&self) -> Rational64 {
        self.divisions.iter().map(|d| d.duration()).sum()
    }

    /// All divisions fused into one by division addition.
    pub fn sum(&self) -> Option<Division> {
        crate::callbacks::fuse_group(&self.divisions)
    }

    /// True when every start offset equals the previous start plus its
    /// duration. Unanchored sequences are trivially contiguous.
    pub fn is_contiguous(&self) -> bool {
        let Some(mut expected) = self.start_offset() else {
            return self.divisions.iter().all(|d| d.start_offset().is_none());
        };
        for division in &self.divisions {
            if division.start_offset() != Some(expected) {
                return false;
            }
            expected += division.duration();
        }
        true
    }

    /// Rotate by `n` (positive moves the last division to the front) and
    /// re-thread offsets from the original first start offset.
    pub fn rotate(&self, n: i64) -> Self {
        let rotated = pattern::rotate(&self.divisions, n);
        match self.start_offset() {
            Some(start) => Self::new(thread_flat(rotated, Some(start))),
            None => Self::new(rotated),
        }
    }

    pub fn split_by_durations(
        &self,
        callback: &SplitByDurationsCallback,
    ) -> Result<Vec<DivisionSequence>, BacaError> {
        self.apply(callback)
    }

    pub fn split_by_rounded_ratios(
        &self,
        callback: &SplitByRoundedRatiosCallback,
    ) -> Result<Vec<DivisionSequence>, BacaError> {
        self.apply(callback)
    }

    pub fn fuse_by_counts(
        &self,
        callback: &FuseByCountsCallback,
    ) -> Result<Vec<DivisionSequence>, BacaError> {
        self.apply(callback)
    }

    /// Run any callback and wrap each inner list as a sequence.
    pub fn apply<C: DivisionCallback + ?Sized>(
        &self,
        callback: &C,
    ) -> Result<Vec<DivisionSequence>, BacaError> {
        Ok(callback
            .call(&self.divisions)?
            .into_iter()
            .map(DivisionSequence::new)
            .collect())
    }

    /// Regroup consecutive divisions by counts without fusing them.
    pub fn partition_by_counts(
        &self,
        counts: &[usize],
        cyclic: bool,
        overhang: bool,
    ) -> Vec<DivisionSequence> {
        pattern::partition_by_counts(&self.divisions, counts, cyclic, overhang)
            .into_iter()
            .map(DivisionSequence::new)
            .collect()
    }

    /// Concatenate nested sequences in order.
    pub fn flatten(nested: &[DivisionSequence]) -> DivisionSequence {
        nested.iter().flat_map(|s| s.iter().cloned()).collect()
    }
}

impl Index<usize> for DivisionSequence {
    type Output = Division;

    fn index(&self, index: usize) -> &Division {
        &self.divisions[index]
    }
}

impl FromIterator<Division> for DivisionSequence {
    fn from_iter<I: IntoIterator<Item = Division>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for DivisionSequence {
    type Item = Division;
    type IntoIter = std::vec::IntoIter<Division>;

    fn into_iter(self) -> Self::IntoIter {
        self.divisions.into_iter()
    }
}

impl<'a> IntoIterator for &'a DivisionSequence {
    type Item = &'a Division;
    type IntoIter = std::slice::Iter<'a, Division>;

    fn into_iter(self) -> Self::IntoIter {
        self.divisions.iter()
    }
}

impl From<Vec<Division>> for DivisionSequence {
    fn from(divisions: Vec<Division>) -> Self {
        Self::new(divisions)
    }
}

impl fmt::Display for DivisionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, division) in self.divisions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", division)?;
        }
        write!(f, "]")
    }
}
