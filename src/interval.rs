use std::cmp::Ordering;
use std::fmt;

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IntervalError, Result};
use crate::order::{LimitOrder, Natural};

bitflags! {
    /// Inclusivity of an interval's start and end.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BoundaryType: u8 {
        const START_CLOSED = 0b01;
        const END_CLOSED = 0b10;
        const CLOSED = Self::START_CLOSED.bits() | Self::END_CLOSED.bits();
    }
}

impl BoundaryType {
    /// Both ends excluded.
    pub const OPEN: BoundaryType = BoundaryType::empty();

    #[inline]
    pub fn is_start_closed(self) -> bool {
        self.contains(BoundaryType::START_CLOSED)
    }

    #[inline]
    pub fn is_end_closed(self) -> bool {
        self.contains(BoundaryType::END_CLOSED)
    }
}

/// A one-dimensional interval between two limits, with an optional payload.
///
/// Intervals are immutable once built. The constructors reject an interval
/// whose start sorts after its end, and a single-point interval that is not
/// closed on both ends (it would contain nothing).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval<L, V = ()> {
    start: L,
    end: L,
    boundary: BoundaryType,
    value: V,
}

impl<L, V> Interval<L, V> {
    /// Builds an interval validated against the natural ordering of `L`.
    pub fn with_value(start: L, end: L, boundary: BoundaryType, value: V) -> Result<Self>
    where
        L: Ord,
    {
        Self::with_value_by(start, end, boundary, value, &Natural)
    }

    /// Builds an interval validated against a caller-supplied ordering.
    pub fn with_value_by<O>(
        start: L,
        end: L,
        boundary: BoundaryType,
        value: V,
        order: &O,
    ) -> Result<Self>
    where
        O: LimitOrder<L>,
    {
        let interval = Interval {
            start,
            end,
            boundary,
            value,
        };
        interval.validate(order)?;
        Ok(interval)
    }

    /// Checks the start/end invariants against `order`.
    pub fn validate<O>(&self, order: &O) -> Result<()>
    where
        O: LimitOrder<L>,
    {
        match order.compare(&self.start, &self.end) {
            Ordering::Greater => Err(IntervalError::StartAfterEnd),
            Ordering::Equal if self.boundary != BoundaryType::CLOSED => {
                Err(IntervalError::OpenPoint)
            }
            _ => Ok(()),
        }
    }

    #[inline]
    pub fn start(&self) -> &L {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &L {
        &self.end
    }

    #[inline]
    pub fn boundary(&self) -> BoundaryType {
        self.boundary
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    #[inline]
    pub fn is_start_closed(&self) -> bool {
        self.boundary.is_start_closed()
    }

    #[inline]
    pub fn is_end_closed(&self) -> bool {
        self.boundary.is_end_closed()
    }

    /// Returns the same interval carrying `value` instead.
    pub fn map_value<W>(self, value: W) -> Interval<L, W> {
        Interval {
            start: self.start,
            end: self.end,
            boundary: self.boundary,
            value,
        }
    }

    /// Assembles an interval whose invariants the caller already upholds.
    pub(crate) fn from_parts(start: L, end: L, boundary: BoundaryType, value: V) -> Self {
        Interval {
            start,
            end,
            boundary,
            value,
        }
    }
}

impl<L: Ord> Interval<L> {
    pub fn new(start: L, end: L, boundary: BoundaryType) -> Result<Self> {
        Self::with_value(start, end, boundary, ())
    }

    /// `[start, end]`
    pub fn closed(start: L, end: L) -> Result<Self> {
        Self::new(start, end, BoundaryType::CLOSED)
    }

    /// `]start, end[`
    pub fn open(start: L, end: L) -> Result<Self> {
        Self::new(start, end, BoundaryType::OPEN)
    }

    /// `[start, end[`
    pub fn closed_open(start: L, end: L) -> Result<Self> {
        Self::new(start, end, BoundaryType::START_CLOSED)
    }

    /// `]start, end]`
    pub fn open_closed(start: L, end: L) -> Result<Self> {
        Self::new(start, end, BoundaryType::END_CLOSED)
    }
}

impl<L: Clone> Interval<L> {
    /// The degenerate closed interval `[limit, limit]`.
    pub fn point(limit: L) -> Self {
        Interval {
            start: limit.clone(),
            end: limit,
            boundary: BoundaryType::CLOSED,
            value: (),
        }
    }
}

impl<L, V> fmt::Display for Interval<L, V>
where
    L: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let open = if self.is_start_closed() { '[' } else { ']' };
        let close = if self.is_end_closed() { ']' } else { '[' };
        write!(f, "{}{},{}{}", open, self.start, self.end, close)
    }
}
