//! Boundary-aware comparisons between intervals.
//!
//! None of these functions touch the tree. Equal limits are resolved through
//! the boundary flags: a closed start sorts before an open one at the same
//! limit, and an open end sorts before a closed one.

use std::cmp::Ordering::{self, Equal, Greater, Less};

use crate::interval::{BoundaryType, Interval};
use crate::order::LimitOrder;

/// How a stored interval must relate to a query interval to match it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntersectionType {
    /// The two share at least one point.
    #[default]
    Any,
    /// The query covers the stored interval.
    Cover,
    /// The stored interval covers the query.
    Within,
}

impl IntersectionType {
    pub fn matches<L, V, W, O>(self, query: &Interval<L, V>, stored: &Interval<L, W>, order: &O) -> bool
    where
        O: LimitOrder<L>,
    {
        match self {
            IntersectionType::Any => has_any_intersection(stored, query, order),
            IntersectionType::Cover => covers(query, stored, order),
            IntersectionType::Within => covers(stored, query, order),
        }
    }
}

/// Total order over intervals: by start, then closed-start first, then by
/// end, then open-end first. Values are ignored.
pub fn compare<L, V, W, O>(a: &Interval<L, V>, b: &Interval<L, W>, order: &O) -> Ordering
where
    O: LimitOrder<L>,
{
    order
        .compare(a.start(), b.start())
        .then_with(|| b.is_start_closed().cmp(&a.is_start_closed()))
        .then_with(|| order.compare(a.end(), b.end()))
        .then_with(|| a.is_end_closed().cmp(&b.is_end_closed()))
}

/// Returns `true` if `a` and `b` share at least one point.
pub fn has_any_intersection<L, V, W, O>(a: &Interval<L, V>, b: &Interval<L, W>, order: &O) -> bool
where
    O: LimitOrder<L>,
{
    let start_to_end = order.compare(a.start(), b.end());
    let end_to_start = order.compare(a.end(), b.start());

    let starts_before = match start_to_end {
        Less => true,
        Equal => a.is_start_closed() && b.is_end_closed(),
        Greater => false,
    };
    let ends_after = match end_to_start {
        Greater => true,
        Equal => a.is_end_closed() && b.is_start_closed(),
        Less => false,
    };
    starts_before && ends_after
}

/// Returns `true` if every point of `b` is also in `a`.
pub fn covers<L, V, W, O>(a: &Interval<L, V>, b: &Interval<L, W>, order: &O) -> bool
where
    O: LimitOrder<L>,
{
    let start_ok = match order.compare(a.start(), b.start()) {
        Less => true,
        Equal => a.is_start_closed() || !b.is_start_closed(),
        Greater => false,
    };
    let end_ok = match order.compare(a.end(), b.end()) {
        Greater => true,
        Equal => a.is_end_closed() || !b.is_end_closed(),
        Less => false,
    };
    start_ok && end_ok
}

/// Returns `true` if `a` ends exactly where `b` starts and the shared limit
/// belongs to at least one of them. Expects `a <= b`.
pub fn touches<L, V, W, O>(a: &Interval<L, V>, b: &Interval<L, W>, order: &O) -> bool
where
    O: LimitOrder<L>,
{
    order.compare(a.end(), b.start()) == Equal && (a.is_end_closed() || b.is_start_closed())
}

/// Combines two overlapping or touching intervals, `a <= b`, into the smallest
/// interval covering both. The merged value comes from `combine`.
pub fn merge<L, V, O, F>(a: &Interval<L, V>, b: &Interval<L, V>, order: &O, combine: F) -> Interval<L, V>
where
    L: Clone,
    O: LimitOrder<L>,
    F: FnOnce(&Interval<L, V>, &Interval<L, V>) -> V,
{
    let mut boundary = BoundaryType::OPEN;

    let start_closed = match order.compare(a.start(), b.start()) {
        Equal => a.is_start_closed() || b.is_start_closed(),
        _ => a.is_start_closed(),
    };
    boundary.set(BoundaryType::START_CLOSED, start_closed);

    let (end, end_closed) = match order.compare(a.end(), b.end()) {
        Greater => (a.end(), a.is_end_closed()),
        Less => (b.end(), b.is_end_closed()),
        Equal => (a.end(), a.is_end_closed() || b.is_end_closed()),
    };
    boundary.set(BoundaryType::END_CLOSED, end_closed);

    Interval::from_parts(a.start().clone(), end.clone(), boundary, combine(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Natural;

    fn iv(start: i32, end: i32, boundary: BoundaryType) -> Interval<i32> {
        Interval::new(start, end, boundary).unwrap()
    }

    #[test]
    fn ordering_breaks_ties_on_boundaries() {
        let closed = iv(3, 8, BoundaryType::CLOSED);
        let open = iv(3, 8, BoundaryType::OPEN);
        let start_closed = iv(3, 8, BoundaryType::START_CLOSED);
        let end_closed = iv(3, 8, BoundaryType::END_CLOSED);

        // Closed start first, then open end first.
        let mut all = vec![&closed, &open, &end_closed, &start_closed];
        all.sort_by(|a, b| compare(*a, *b, &Natural));
        assert_eq!(all, vec![&start_closed, &closed, &open, &end_closed]);

        assert_eq!(compare(&iv(2, 5, BoundaryType::OPEN), &closed, &Natural), Less);
        assert_eq!(compare(&iv(3, 5, BoundaryType::CLOSED), &closed, &Natural), Less);
        assert_eq!(compare(&closed, &closed.clone(), &Natural), Equal);
    }

    #[test]
    fn ordering_ignores_values() {
        let a = Interval::with_value(1, 2, BoundaryType::CLOSED, "a").unwrap();
        let b = Interval::with_value(1, 2, BoundaryType::CLOSED, 42).unwrap();
        assert_eq!(compare(&a, &b, &Natural), Equal);
    }

    #[test]
    fn intersection_at_shared_limit_needs_both_sides_closed() {
        let query = iv(8, 11, BoundaryType::CLOSED);
        assert!(has_any_intersection(&iv(3, 8, BoundaryType::CLOSED), &query, &Natural));
        assert!(!has_any_intersection(&iv(3, 8, BoundaryType::OPEN), &query, &Natural));
        assert!(has_any_intersection(&iv(11, 16, BoundaryType::START_CLOSED), &query, &Natural));
        assert!(!has_any_intersection(&iv(11, 14, BoundaryType::END_CLOSED), &query, &Natural));
        assert!(has_any_intersection(&iv(7, 10, BoundaryType::OPEN), &query, &Natural));
        assert!(!has_any_intersection(&iv(2, 5, BoundaryType::CLOSED), &query, &Natural));

        let open_query = iv(8, 11, BoundaryType::OPEN);
        assert!(!has_any_intersection(&iv(3, 8, BoundaryType::CLOSED), &open_query, &Natural));
        assert!(has_any_intersection(&iv(9, 9, BoundaryType::CLOSED), &open_query, &Natural));
    }

    #[test]
    fn intersection_is_symmetric() {
        let intervals = [
            iv(0, 4, BoundaryType::OPEN),
            iv(4, 4, BoundaryType::CLOSED),
            iv(4, 9, BoundaryType::START_CLOSED),
            iv(2, 4, BoundaryType::END_CLOSED),
            iv(9, 12, BoundaryType::CLOSED),
        ];
        for a in &intervals {
            for b in &intervals {
                assert_eq!(
                    has_any_intersection(a, b, &Natural),
                    has_any_intersection(b, a, &Natural),
                    "{} vs {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn covering_respects_boundaries() {
        let closed = iv(2, 8, BoundaryType::CLOSED);
        let open = iv(2, 8, BoundaryType::OPEN);
        assert!(covers(&closed, &open, &Natural));
        assert!(!covers(&open, &closed, &Natural));
        assert!(covers(&open, &open, &Natural));
        assert!(covers(&open, &iv(3, 7, BoundaryType::CLOSED), &Natural));
        assert!(!covers(&open, &iv(2, 2, BoundaryType::CLOSED), &Natural));
        assert!(!covers(&closed, &iv(1, 7, BoundaryType::OPEN), &Natural));
    }

    #[test]
    fn intersection_types() {
        let query = iv(3, 6, BoundaryType::CLOSED);
        let inner = iv(4, 5, BoundaryType::CLOSED);
        let outer = iv(1, 9, BoundaryType::CLOSED);
        let partial = iv(5, 9, BoundaryType::CLOSED);

        assert!(IntersectionType::Cover.matches(&query, &inner, &Natural));
        assert!(!IntersectionType::Cover.matches(&query, &outer, &Natural));
        assert!(IntersectionType::Within.matches(&query, &outer, &Natural));
        assert!(!IntersectionType::Within.matches(&query, &inner, &Natural));
        assert!(IntersectionType::Any.matches(&query, &partial, &Natural));
        assert!(!IntersectionType::Cover.matches(&query, &partial, &Natural));
        assert!(!IntersectionType::Within.matches(&query, &partial, &Natural));
    }

    #[test]
    fn touching_needs_one_closed_side() {
        assert!(!touches(&iv(6, 8, BoundaryType::OPEN), &iv(8, 12, BoundaryType::OPEN), &Natural));
        assert!(touches(&iv(6, 8, BoundaryType::END_CLOSED), &iv(8, 12, BoundaryType::OPEN), &Natural));
        assert!(touches(&iv(6, 8, BoundaryType::OPEN), &iv(8, 12, BoundaryType::START_CLOSED), &Natural));
        assert!(!touches(&iv(6, 7, BoundaryType::CLOSED), &iv(8, 12, BoundaryType::CLOSED), &Natural));
    }

    #[test]
    fn merge_takes_outer_limits_and_their_boundaries() {
        let merged = merge(
            &iv(6, 11, BoundaryType::CLOSED),
            &iv(7, 12, BoundaryType::START_CLOSED),
            &Natural,
            |_, _| (),
        );
        assert_eq!(merged, iv(6, 12, BoundaryType::START_CLOSED));

        let merged = merge(
            &iv(6, 8, BoundaryType::END_CLOSED),
            &iv(8, 12, BoundaryType::OPEN),
            &Natural,
            |_, _| (),
        );
        assert_eq!(merged, iv(6, 12, BoundaryType::OPEN));

        // Shared limits union their closedness.
        let merged = merge(
            &iv(1, 5, BoundaryType::START_CLOSED),
            &iv(1, 5, BoundaryType::END_CLOSED),
            &Natural,
            |_, _| (),
        );
        assert_eq!(merged, iv(1, 5, BoundaryType::CLOSED));

        // An inner interval does not move the end.
        let merged = merge(
            &iv(1, 9, BoundaryType::OPEN),
            &iv(2, 3, BoundaryType::CLOSED),
            &Natural,
            |_, _| (),
        );
        assert_eq!(merged, iv(1, 9, BoundaryType::OPEN));
    }

    #[test]
    fn merge_combines_values() {
        let a = Interval::with_value(1, 4, BoundaryType::CLOSED, 2).unwrap();
        let b = Interval::with_value(3, 6, BoundaryType::CLOSED, 5).unwrap();
        let merged = merge(&a, &b, &Natural, |a, b| a.value() + b.value());
        assert_eq!(merged, Interval::with_value(1, 6, BoundaryType::CLOSED, 7).unwrap());
    }
}
