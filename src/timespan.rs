//! Half-open exact-rational time spans.
//!
//! A [`Timespan`] is `[start, stop)`. Anchored divisions are compared and
//! subtracted through their timespans.

use num_rational::Rational64;

/// Exact point in time, measured in whole notes from the start of the piece.
pub type Offset = Rational64;

/// Values usable as a start offset: whole numbers or exact rationals.
pub trait IntoOffset {
    fn into_offset(self) -> Offset;
}

impl IntoOffset for Offset {
    fn into_offset(self) -> Offset {
        self
    }
}

impl IntoOffset for i64 {
    fn into_offset(self) -> Offset {
        Offset::from_integer(self)
    }
}

impl IntoOffset for i32 {
    fn into_offset(self) -> Offset {
        Offset::from_integer(self as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timespan {
    pub start: Offset,
    pub stop: Offset,
}

impl Timespan {
    pub fn new(start: Offset, stop: Offset) -> Self {
        Self { start, stop }
    }

    pub fn duration(&self) -> Offset {
        self.stop - self.start
    }

    /// True when the spans share more than a single point.
    pub fn intersects(&self, other: &Timespan) -> bool {
        self.start < other.stop && other.start < self.stop
    }

    /// Smallest span covering both.
    pub fn hull(&self, other: &Timespan) -> Timespan {
        Timespan::new(self.start.min(other.start), self.stop.max(other.stop))
    }

    /// Set difference `self - other`.
    ///
    /// Returns zero, one or two pieces in time order. Spans that only touch
    /// do not intersect, so `self` comes back unchanged.
    pub fn difference(&self, other: &Timespan) -> Vec<Timespan> {
        if !self.intersects(other) {
            return vec![*self];
        }
        let mut pieces = Vec::new();
        if self.start < other.start {
            pieces.push(Timespan::new(self.start, other.start));
        }
        if other.stop < self.stop {
            pieces.push(Timespan::new(other.stop, self.stop));
        }
        pieces
    }
}
