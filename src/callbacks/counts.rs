//! Fuse consecutive divisions in groups.
//!
//! Divisions are partitioned into groups whose sizes come from the count list
//! (cycled when `cyclic`), a short final group is kept, and every group is
//! summed into one division. `FuseCounts::Infinite` fuses everything into a
//! single division. An optional secondary duration splitter then re-splits
//! each fused division.

use super::{DivisionCallback, SplitByDurationsCallback};
use crate::division::Division;
use crate::error::BacaError;
use crate::pattern;
use crate::threading::thread_offsets;
use log::debug;

/// Group sizes for fusing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuseCounts {
    /// One group holding every division
    Infinite,
    Counts(Vec<usize>),
}

#[derive(Debug, Clone)]
pub struct FuseByCountsCallback {
    pub(crate) counts: FuseCounts,
    pub(crate) cyclic: bool,
    pub(crate) secondary: Option<SplitByDurationsCallback>,
}

impl FuseByCountsCallback {
    pub fn builder(counts: FuseCounts) -> FuseByCountsBuilder {
        FuseByCountsBuilder {
            counts,
            cyclic: true,
            secondary: None,
        }
    }

    pub fn counts(&self) -> &FuseCounts {
        &self.counts
    }

    pub fn cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn secondary(&self) -> Option<&SplitByDurationsCallback> {
        self.secondary.as_ref()
    }
}

impl DivisionCallback for FuseByCountsCallback {
    fn call(&self, divisions: &[Division]) -> Result<Vec<Vec<Division>>, BacaError> {
        if divisions.is_empty() {
            return Ok(Vec::new());
        }
        let start_offset = divisions.first().and_then(|d| d.start_offset());
        let groups = match &self.counts {
            FuseCounts::Infinite => vec![divisions.to_vec()],
            FuseCounts::Counts(counts) => {
                pattern::partition_by_counts(divisions, counts, self.cyclic, true)
            }
        };
        let fused: Vec<Division> = groups.iter().filter_map(|group| fuse_group(group)).collect();
        debug!("fused {} divisions into {}", divisions.len(), fused.len());

        let lists = match &self.secondary {
            None => fused.into_iter().map(|division| vec![division]).collect(),
            Some(secondary) => {
                let mut lists = Vec::with_capacity(fused.len());
                for division in fused {
                    let split = secondary.call(std::slice::from_ref(&division))?;
                    lists.push(split.into_iter().next().unwrap_or_default());
                }
                lists
            }
        };
        Ok(thread_offsets(lists, start_offset))
    }
}

/// Sum of a group by division addition. `None` for an empty group.
pub(crate) fn fuse_group(group: &[Division]) -> Option<Division> {
    let (first, rest) = group.split_first()?;
    Some(rest.iter().fold(first.clone(), |sum, division| &sum + division))
}

/// Builder for [`FuseByCountsCallback`]. Fusing is cyclic unless told otherwise.
#[derive(Debug, Clone)]
pub struct FuseByCountsBuilder {
    counts: FuseCounts,
    cyclic: bool,
    secondary: Option<SplitByDurationsCallback>,
}

impl FuseByCountsBuilder {
    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn secondary(mut self, secondary: SplitByDurationsCallback) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// # Errors
    /// [`BacaError::ConfigurationError`] when the count list is empty or holds a zero.
    pub fn build(self) -> Result<FuseByCountsCallback, BacaError> {
        if let FuseCounts::Counts(counts) = &self.counts {
            if counts.is_empty() {
                return Err(BacaError::ConfigurationError(
                    "fuse counts must not be empty".to_string(),
                ));
            }
            if counts.contains(&0) {
                return Err(BacaError::ConfigurationError(format!(
                    "fuse counts must be positive: {:?}",
                    counts
                )));
            }
        }
        Ok(FuseByCountsCallback {
            counts: self.counts,
            cyclic: self.cyclic,
            secondary: self.secondary,
        })
    }
}
