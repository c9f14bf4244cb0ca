//! # Start-Offset Threading
//!
//! Turns duration-like input into divisions and assigns start offsets.
//!
//! Input comes in three shapes ([`DivisionInput`]): a raw `(numerator,
//! denominator)` pair, an existing [`Division`], or a nested list of either.
//! [`to_divisions()`] walks the input depth-first, left to right, with a single
//! running offset: each leaf gets the current offset and pushes it forward by
//! its duration. Siblings and nested lists share the same counter, so the
//! flattened result is contiguous end to end, not just inside each sublist.
//!
//! The running offset is passed in and handed back, never captured.
//!
//! ## Example
//! ```rust
//! use baca::threading::{to_divisions, DivisionInput};
//! use baca::{Division, Offset};
//!
//! let input = DivisionInput::Nested(vec![
//!     DivisionInput::Nested(vec![DivisionInput::Pair(1, 4), DivisionInput::Pair(1, 8)]),
//!     DivisionInput::Nested(vec![DivisionInput::Pair(3, 8)]),
//! ]);
//! let (tree, stop) = to_divisions(input, Some(Offset::from_integer(0)));
//! let leaves = tree.flatten();
//! assert_eq!(leaves[1], Division::new(1, 8).with_start_offset(Offset::new(1, 4)));
//! assert_eq!(leaves[2], Division::new(3, 8).with_start_offset(Offset::new(3, 8)));
//! assert_eq!(stop, Some(Offset::new(3, 4)));
//! ```

use crate::division::Division;
use crate::timespan::Offset;

/// Duration-like input accepted by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum DivisionInput {
    Pair(i64, i64),
    Division(Division),
    Nested(Vec<DivisionInput>),
}

impl From<(i64, i64)> for DivisionInput {
    fn from(pair: (i64, i64)) -> Self {
        DivisionInput::Pair(pair.0, pair.1)
    }
}

impl From<Division> for DivisionInput {
    fn from(division: Division) -> Self {
        DivisionInput::Division(division)
    }
}

impl<T: Into<DivisionInput>> From<Vec<T>> for DivisionInput {
    fn from(items: Vec<T>) -> Self {
        DivisionInput::Nested(items.into_iter().map(Into::into).collect())
    }
}

/// Nested divisions, the output shape of [`to_divisions()`]
#[derive(Debug, Clone, PartialEq)]
pub enum DivisionTree {
    Leaf(Division),
    Branch(Vec<DivisionTree>),
}

impl DivisionTree {
    /// Leaves in emission order.
    pub fn flatten(&self) -> Vec<Division> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves(&self, leaves: &mut Vec<Division>) {
        match self {
            DivisionTree::Leaf(division) => leaves.push(division.clone()),
            DivisionTree::Branch(children) => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }

    /// Depth of nesting; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            DivisionTree::Leaf(_) => 0,
            DivisionTree::Branch(children) => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }
}

/// Convert `input` into divisions, threading `start_offset` through every leaf.
///
/// Returns the converted tree and the offset after the last leaf. With no
/// start offset, leaves keep whatever offset they already carry and `None`
/// comes back.
pub fn to_divisions(
    input: DivisionInput,
    start_offset: Option<Offset>,
) -> (DivisionTree, Option<Offset>) {
    match input {
        DivisionInput::Pair(numerator, denominator) => {
            thread_leaf(Division::new(numerator, denominator), start_offset)
        }
        DivisionInput::Division(division) => thread_leaf(division, start_offset),
        DivisionInput::Nested(items) => {
            let mut offset = start_offset;
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                let (child, next) = to_divisions(item, offset);
                children.push(child);
                offset = next;
            }
            (DivisionTree::Branch(children), offset)
        }
    }
}

fn thread_leaf(division: Division, start_offset: Option<Offset>) -> (DivisionTree, Option<Offset>) {
    match start_offset {
        Some(start) => {
            let stop = start + division.duration();
            (DivisionTree::Leaf(division.with_start_offset(start)), Some(stop))
        }
        None => (DivisionTree::Leaf(division), None),
    }
}

/// Thread `start_offset` through a list of lists, the shape every callback returns.
pub fn thread_offsets(lists: Vec<Vec<Division>>, start_offset: Option<Offset>) -> Vec<Vec<Division>> {
    let input = DivisionInput::Nested(
        lists
            .into_iter()
            .map(|list| DivisionInput::Nested(list.into_iter().map(DivisionInput::Division).collect()))
            .collect(),
    );
    let (tree, _) = to_divisions(input, start_offset);
    match tree {
        DivisionTree::Branch(children) => children.iter().map(|child| child.flatten()).collect(),
        DivisionTree::Leaf(division) => vec![vec![division]],
    }
}

/// Thread `start_offset` through a flat list.
pub fn thread_flat(divisions: Vec<Division>, start_offset: Option<Offset>) -> Vec<Division> {
    let input = DivisionInput::Nested(divisions.into_iter().map(DivisionInput::Division).collect());
    to_divisions(input, start_offset).0.flatten()
}
