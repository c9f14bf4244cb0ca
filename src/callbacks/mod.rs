//! # Division Callbacks
//!
//! Configure-once, call-many transformations from a flat list of divisions to
//! a list of lists of divisions.
//!
//! ## Sub-modules
//! - `durations` - split each division by a duration pattern
//! - `ratios` - split each division by a rounded integer ratio
//! - `counts` - fuse consecutive divisions in groups of given sizes
//!
//! ## Output Contract
//! Split callbacks return exactly one inner list per input division. The fuse
//! callback returns one inner list per group. In both cases, when the first
//! input division is anchored, start offsets are threaded through the whole
//! nested result so that the flattened output is contiguous.
//!
//! ## Example
//! ```rust
//! use baca::callbacks::{DivisionCallback, Remainder, SplitByDurationsCallback};
//! use baca::Division;
//!
//! let callback = SplitByDurationsCallback::builder()
//!     .durations(&[(1, 4)])
//!     .cyclic(true)
//!     .remainder(Remainder::Left)
//!     .build()?;
//! let result = callback.call(&[Division::new(5, 8)])?;
//! assert_eq!(result, vec![vec![Division::new(1, 8), Division::new(1, 4), Division::new(1, 4)]]);
//! # Ok::<(), baca::BacaError>(())
//! ```

mod counts;
mod durations;
mod ratios;

use crate::division::Division;
use crate::error::BacaError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use counts::{FuseByCountsBuilder, FuseByCountsCallback, FuseCounts};
pub use durations::{SplitByDurationsBuilder, SplitByDurationsCallback};
pub use ratios::SplitByRoundedRatiosCallback;
pub(crate) use counts::fuse_group;

/// Transformation from a flat list of divisions to nested lists.
pub trait DivisionCallback: fmt::Debug {
    fn call(&self, divisions: &[Division]) -> Result<Vec<Vec<Division>>, BacaError>;
}

/// Side on which leftover duration is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Remainder {
    Left,
    #[default]
    Right,
}
