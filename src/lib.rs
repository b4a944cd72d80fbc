//! An ordered, mutable set of one-dimensional intervals ([`IntervalSet`]) with
//! open or closed bounds on either end.
//!
//! The set is backed by an AA-tree ([`aa_tree::AaTree`]) whose nodes also
//! carry the greatest end found in their subtree. That aggregate lets
//! queries ("which intervals overlap `q`?", "which ones lie inside `q`?")
//! skip whole subtrees instead of scanning every interval.
//!
//! Equal limits are resolved through the boundary flags everywhere: `[3,8]`
//! and `[8,11]` share the point 8, `]3,8[` and `[8,11]` do not, and
//! `]6,8]` touches `]8,12[` so the two merge into `]6,12[`.
//!
//! Limits are ordered by their [`Ord`] implementation by default; any other
//! total order can be injected through [`LimitOrder`].

/// A generic AA-tree with a hook for per-node aggregates.
pub mod aa_tree;
pub mod algebra;
mod error;
pub mod interval;
pub mod interval_set;
mod node;
pub mod order;

pub use algebra::IntersectionType;
pub use error::{IntervalError, Result};
pub use interval::{BoundaryType, Interval};
pub use interval_set::IntervalSet;
pub use order::{LimitOrder, Natural, OrderFn};
