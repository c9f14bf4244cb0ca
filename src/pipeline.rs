//! # Division Pipeline
//!
//! A declarative chain of division transformations.
//!
//! The pipeline keeps a nested state (a list of subsequences), starting with the
//! input as a single subsequence:
//! - callback steps flatten the state and replace it with the callback's output
//! - `Rotate(n)` flattens, rotates and re-threads offsets
//! - `Flatten` collapses the state into a single subsequence
//!
//! ## Example
//! ```rust
//! use baca::{factory, DivisionPipeline, DivisionSequence};
//!
//! let pipeline = DivisionPipeline::new()
//!     .split_by_durations(factory::split_by_durations(&[(1, 4)])?)
//!     .fuse_by_counts(factory::fuse_divisions(&[2])?);
//! let output = pipeline.run(&DivisionSequence::from_pairs(&[(3, 4)]))?;
//! assert_eq!(output.divisions, DivisionSequence::from_pairs(&[(2, 4), (1, 4)]));
//! # Ok::<(), baca::BacaError>(())
//! ```

use crate::callbacks::{
    FuseByCountsCallback, SplitByDurationsCallback, SplitByRoundedRatiosCallback,
};
use crate::error::BacaError;
use crate::sequence::DivisionSequence;
use log::debug;

/// One stage of a [`DivisionPipeline`]
#[derive(Debug, Clone)]
pub enum Step {
    SplitByDurations(SplitByDurationsCallback),
    SplitByRoundedRatios(SplitByRoundedRatiosCallback),
    FuseByCounts(FuseByCountsCallback),
    Rotate(i64),
    Flatten,
}

/// Result of running a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Subsequences as left by the last step
    pub nested: Vec<DivisionSequence>,
    /// Everything flattened, in order
    pub divisions: DivisionSequence,
}

#[derive(Debug, Clone, Default)]
pub struct DivisionPipeline {
    steps: Vec<Step>,
}

impl DivisionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn split_by_durations(self, callback: SplitByDurationsCallback) -> Self {
        self.push(Step::SplitByDurations(callback))
    }

    pub fn split_by_rounded_ratios(self, callback: SplitByRoundedRatiosCallback) -> Self {
        self.push(Step::SplitByRoundedRatios(callback))
    }

    pub fn fuse_by_counts(self, callback: FuseByCountsCallback) -> Self {
        self.push(Step::FuseByCounts(callback))
    }

    pub fn rotate(self, n: i64) -> Self {
        self.push(Step::Rotate(n))
    }

    pub fn flatten(self) -> Self {
        self.push(Step::Flatten)
    }

    /// Run every step in order.
    ///
    /// # Errors
    /// Whatever error the first failing callback returns.
    pub fn run(&self, divisions: &DivisionSequence) -> Result<PipelineOutput, BacaError> {
        let mut nested = vec![divisions.clone()];
        for (i, step) in self.steps.iter().enumerate() {
            let flat = DivisionSequence::flatten(&nested);
            nested = match step {
                Step::SplitByDurations(callback) => flat.split_by_durations(callback)?,
                Step::SplitByRoundedRatios(callback) => flat.split_by_rounded_ratios(callback)?,
                Step::FuseByCounts(callback) => flat.fuse_by_counts(callback)?,
                Step::Rotate(n) => vec![flat.rotate(*n)],
                Step::Flatten => vec![flat],
            };
            debug!(
                "step {} ({}) left {} subsequences",
                i,
                step.name(),
                nested.len()
            );
        }
        let divisions = DivisionSequence::flatten(&nested);
        Ok(PipelineOutput { nested, divisions })
    }
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::SplitByDurations(_) => "split-by-durations",
            Step::SplitByRoundedRatios(_) => "split-by-rounded-ratios",
            Step::FuseByCounts(_) => "fuse-by-counts",
            Step::Rotate(_) => "rotate",
            Step::Flatten => "flatten",
        }
    }
}
