use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;
use std::iter::FusedIterator;

use itertools::{EitherOrBoth, Itertools};
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::aa_tree::{self, AaTree, TreePolicy};
use crate::algebra::{self, IntersectionType};
use crate::error::{IntervalError, Result};
use crate::interval::Interval;
use crate::node::Node;
use crate::order::{LimitOrder, Natural};

/// Tree payload: an interval plus the greatest end found in its subtree.
#[derive(Clone, Debug)]
pub(crate) struct Entry<L, V> {
    interval: Interval<L, V>,
    max_end: L,
}

impl<L: Clone, V> Entry<L, V> {
    fn new(interval: Interval<L, V>) -> Self {
        let max_end = interval.end().clone();
        Entry { interval, max_end }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct EntryPolicy<C> {
    order: C,
}

impl<L, V, C> TreePolicy<Entry<L, V>> for EntryPolicy<C>
where
    L: Clone,
    C: LimitOrder<L>,
{
    fn compare(&self, a: &Entry<L, V>, b: &Entry<L, V>) -> std::cmp::Ordering {
        algebra::compare(&a.interval, &b.interval, &self.order)
    }

    fn refresh(&self, value: &mut Entry<L, V>, left: Option<&Entry<L, V>>, right: Option<&Entry<L, V>>) {
        let mut max_end = value.interval.end();
        for child in left.into_iter().chain(right) {
            max_end = self.order.max_of(max_end, &child.max_end);
        }
        value.max_end = max_end.clone();
    }
}

/// An ordered set of intervals.
///
/// Intervals are kept sorted by start, closed starts before open ones, then by
/// end, open ends before closed ones. Two intervals with the same limits and
/// boundary type are the same element, whatever values they carry: adding
/// one keeps the value already stored.
///
/// Every node also records the greatest end of its subtree, which lets
/// [`IntervalSet::intersect`] skip subtrees that end before the query starts.
///
/// # Examples
///
/// ```
/// use aa_interval_set::{Interval, IntervalSet, IntersectionType};
///
/// let mut set = IntervalSet::new();
/// set.add(Interval::closed(1, 4)?)?;
/// set.add(Interval::open(3, 8)?)?;
/// set.add(Interval::closed(10, 12)?)?;
///
/// let hits = set.intersect(&Interval::closed(5, 10)?, IntersectionType::Any);
/// assert_eq!(hits.to_string(), "{]3,8[, [10,12]}");
///
/// let merged = set.merge();
/// assert_eq!(merged.to_string(), "{[1,8[, [10,12]}");
/// # Ok::<(), aa_interval_set::IntervalError>(())
/// ```
#[derive(Clone)]
pub struct IntervalSet<L, V = (), C = Natural> {
    tree: AaTree<Entry<L, V>, EntryPolicy<C>>,
}

impl<L, V> IntervalSet<L, V, Natural> {
    /// An empty set ordered by `L`'s own [`Ord`].
    pub fn new() -> Self {
        IntervalSet::with_order(Natural)
    }
}

impl<L, V, C> IntervalSet<L, V, C> {
    /// An empty set ordered by `order`.
    pub fn with_order(order: C) -> Self {
        IntervalSet {
            tree: AaTree::new(EntryPolicy { order }),
        }
    }

    #[inline]
    pub fn order(&self) -> &C {
        &self.tree.policy().order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Iterates over the intervals in ascending order.
    pub fn iter(&self) -> Iter<'_, L, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    pub fn first(&self) -> Option<&Interval<L, V>> {
        self.tree.first().map(|entry| &entry.interval)
    }

    pub fn last(&self) -> Option<&Interval<L, V>> {
        self.tree.last().map(|entry| &entry.interval)
    }
}

impl<L, V, C> IntervalSet<L, V, C>
where
    L: Clone,
    C: LimitOrder<L>,
{
    /// Builds a set from intervals in any order. Among intervals that compare
    /// equal, the first one wins.
    ///
    /// Fails if an interval starts after its end under `order`.
    pub fn from_intervals_with_order<I>(intervals: I, order: C) -> Result<Self>
    where
        I: IntoIterator<Item = Interval<L, V>>,
    {
        Self::from_sorted_unique(intervals.into_iter().collect(), order)
    }

    /// Builds a set in linear time from intervals already sorted ascending
    /// with no two comparing equal.
    ///
    /// Input that turns out unsorted or duplicated is sorted and deduplicated
    /// first, keeping the first of equal intervals. Fails if an interval
    /// starts after its end under `order`.
    pub fn from_sorted_unique(mut intervals: Vec<Interval<L, V>>, order: C) -> Result<Self> {
        for interval in &intervals {
            interval.validate(&order)?;
        }

        let sorted = intervals
            .windows(2)
            .all(|pair| algebra::compare(&pair[0], &pair[1], &order) == Less);
        if !sorted {
            debug!(len = intervals.len(), "input not sorted and unique, sorting");
            intervals.sort_by(|a, b| algebra::compare(a, b, &order));
            intervals.dedup_by(|later, earlier| algebra::compare(later, earlier, &order) == Equal);
        }
        Ok(Self::build_sorted(intervals, order))
    }

    /// Bulk build for intervals taken from a set sharing `order`, so already
    /// valid, sorted and unique.
    fn build_sorted(intervals: Vec<Interval<L, V>>, order: C) -> Self {
        let entries = intervals.into_iter().map(Entry::new).collect();
        IntervalSet {
            tree: AaTree::from_sorted_unique(entries, EntryPolicy { order }),
        }
    }

    /// Adds `interval`, returning `false` if an equal interval was present.
    ///
    /// Fails, leaving the set untouched, if `interval` starts after its end
    /// under the set's order.
    pub fn add(&mut self, interval: Interval<L, V>) -> Result<bool> {
        interval.validate(self.order())?;
        Ok(self.tree.insert(Entry::new(interval)))
    }

    /// Removes the interval equal to `interval`. Values are not compared.
    pub fn remove<W>(&mut self, interval: &Interval<L, W>) -> bool {
        self.tree
            .remove_by(|policy, entry| algebra::compare(interval, &entry.interval, &policy.order))
            .is_some()
    }

    /// Removes every interval containing `limit`.
    pub fn remove_point(&mut self, limit: &L) -> bool {
        let point = Interval::point(limit.clone());
        let hits: Vec<Interval<L>> = match self.tree.root() {
            Some(root) => {
                let walk = Walk::new(&point, IntersectionType::Any, self.order());
                let mut hits = Vec::new();
                walk.collect_matching(root, &mut hits, |iv| {
                    Interval::from_parts(iv.start().clone(), iv.end().clone(), iv.boundary(), ())
                });
                hits
            }
            None => return false,
        };

        for hit in &hits {
            self.remove(hit);
        }
        trace!(removed = hits.len(), "removed intervals containing a point");
        !hits.is_empty()
    }

    pub fn contains<W>(&self, interval: &Interval<L, W>) -> bool {
        self.tree
            .find_by(|policy, entry| algebra::compare(interval, &entry.interval, &policy.order))
            .is_some()
    }

    /// Returns the intervals matching `query` under `kind`:
    ///
    /// * [`IntersectionType::Any`]: sharing at least one point with `query`,
    /// * [`IntersectionType::Cover`]: lying inside `query`,
    /// * [`IntersectionType::Within`]: containing `query`.
    pub fn intersect<W>(&self, query: &Interval<L, W>, kind: IntersectionType) -> Self
    where
        V: Clone,
        C: Clone,
    {
        let mut found = Vec::new();
        if let Some(root) = self.tree.root() {
            Walk::new(query, kind, self.order()).collect_matching(root, &mut found, Clone::clone);
        }
        Self::build_sorted(found, self.order().clone())
    }

    /// Returns the intervals that do not match `query` under `kind`; the
    /// complement of [`IntervalSet::intersect`].
    pub fn except<W>(&self, query: &Interval<L, W>, kind: IntersectionType) -> Self
    where
        V: Clone,
        C: Clone,
    {
        let mut kept = Vec::new();
        if let Some(root) = self.tree.root() {
            Walk::new(query, kind, self.order()).collect_excluded(root, &mut kept);
        }
        Self::build_sorted(kept, self.order().clone())
    }

    /// Returns every interval of `self` and `other`. On equal intervals the
    /// one from `self` is kept.
    pub fn union(&self, other: &Self) -> Result<Self>
    where
        V: Clone,
        C: Clone,
    {
        self.check_compatible(other)?;

        if other.len() < self.len() / 2 {
            debug!(len = self.len(), other = other.len(), "union by insertion");
            let mut result = self.clone();
            for interval in other.iter() {
                result.tree.insert(Entry::new(interval.clone()));
            }
            return Ok(result);
        }

        debug!(len = self.len(), other = other.len(), "union by linear merge");
        let order = self.order();
        let merged = self
            .iter()
            .merge_join_by(other.iter(), |a, b| algebra::compare(*a, *b, order))
            .map(|either| match either {
                EitherOrBoth::Both(ours, _) | EitherOrBoth::Left(ours) => ours.clone(),
                EitherOrBoth::Right(theirs) => theirs.clone(),
            })
            .collect();
        Ok(Self::build_sorted(merged, order.clone()))
    }

    /// Folds overlapping and touching intervals together. Merged intervals
    /// carry `V::default()`; the others keep their value.
    pub fn merge(&self) -> Self
    where
        V: Clone + Default,
        C: Clone,
    {
        self.merge_with(|_, _| V::default())
    }

    /// Folds overlapping and touching intervals together, computing each
    /// merged value with `combine(accumulated, next)`.
    pub fn merge_with<F>(&self, mut combine: F) -> Self
    where
        V: Clone,
        C: Clone,
        F: FnMut(&Interval<L, V>, &Interval<L, V>) -> V,
    {
        let order = self.order();
        let merged: Vec<_> = self
            .iter()
            .cloned()
            .coalesce(|current, next| {
                if algebra::has_any_intersection(&current, &next, order)
                    || algebra::touches(&current, &next, order)
                {
                    Ok(algebra::merge(&current, &next, order, &mut combine))
                } else {
                    Err((current, next))
                }
            })
            .collect();

        trace!(before = self.len(), after = merged.len(), "merged intervals");
        Self::build_sorted(merged, order.clone())
    }

    /// Adds every interval of `intervals`.
    ///
    /// All intervals are checked before any is added, so on error the set is
    /// unchanged.
    pub fn union_with<I>(&mut self, intervals: I) -> Result<()>
    where
        I: IntoIterator<Item = Interval<L, V>>,
    {
        let intervals: Vec<_> = intervals.into_iter().collect();
        for interval in &intervals {
            interval.validate(self.order())?;
        }
        for interval in intervals {
            self.tree.insert(Entry::new(interval));
        }
        Ok(())
    }

    /// Keeps only the intervals also found in `intervals`.
    pub fn intersect_with<W, I>(&mut self, intervals: I)
    where
        I: IntoIterator<Item = Interval<L, W>>,
    {
        let order = self.order();
        let mut others: Vec<Interval<L, W>> = intervals.into_iter().collect();
        others.sort_by(|a, b| algebra::compare(a, b, order));

        self.tree.retain(|policy, entry| {
            others
                .binary_search_by(|other| algebra::compare(other, &entry.interval, &policy.order))
                .is_ok()
        });
    }

    /// Removes every interval found in `intervals`.
    pub fn except_with<W, I>(&mut self, intervals: I)
    where
        I: IntoIterator<Item = Interval<L, W>>,
    {
        for interval in intervals {
            self.remove(&interval);
        }
    }

    pub fn is_subset_of(&self, other: &Self) -> Result<bool> {
        self.check_compatible(other)?;
        Ok(self.len() <= other.len() && self.iter().all(|interval| other.contains(interval)))
    }

    pub fn is_superset_of(&self, other: &Self) -> Result<bool> {
        other.is_subset_of(self)
    }

    /// Returns `true` if the sets share at least one interval.
    pub fn overlaps(&self, other: &Self) -> Result<bool> {
        self.check_compatible(other)?;
        let order = self.order();
        Ok(self
            .iter()
            .merge_join_by(other.iter(), |a, b| algebra::compare(*a, *b, order))
            .any(|either| either.is_both()))
    }

    /// Returns `true` if both sets hold the same intervals, ignoring values.
    pub fn set_equals(&self, other: &Self) -> Result<bool> {
        self.check_compatible(other)?;
        let order = self.order();
        Ok(self.len() == other.len()
            && self
                .iter()
                .merge_join_by(other.iter(), |a, b| algebra::compare(*a, *b, order))
                .all(|either| either.is_both()))
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.order().is_compatible(other.order()) {
            Ok(())
        } else {
            Err(IntervalError::IncompatibleOrder)
        }
    }
}

/// A pruned walk over the tree for one query.
struct Walk<'q, L, W, C> {
    query: &'q Interval<L, W>,
    kind: IntersectionType,
    order: &'q C,
}

impl<'q, L, W, C> Walk<'q, L, W, C>
where
    C: LimitOrder<L>,
{
    fn new(query: &'q Interval<L, W>, kind: IntersectionType, order: &'q C) -> Self {
        Walk { query, kind, order }
    }

    /// Nothing in the subtree reaches the query start.
    fn ends_before<V>(&self, node: &Node<Entry<L, V>>) -> bool {
        self.order.compare(self.query.start(), &node.value.max_end) == Greater
    }

    /// Neither the node's right subtree nor anything after it starts before
    /// the query ends.
    fn starts_after<V>(&self, node: &Node<Entry<L, V>>) -> bool {
        self.order.compare(self.query.end(), node.value.interval.start()) == Less
    }

    fn matches<V>(&self, node: &Node<Entry<L, V>>) -> bool {
        self.kind.matches(self.query, &node.value.interval, self.order)
    }

    fn collect_matching<V, T, F>(&self, node: &Node<Entry<L, V>>, out: &mut Vec<T>, mut emit: F)
    where
        F: FnMut(&Interval<L, V>) -> T,
    {
        self.collect_matching_into(node, out, &mut emit);
    }

    fn collect_matching_into<V, T, F>(&self, node: &Node<Entry<L, V>>, out: &mut Vec<T>, emit: &mut F)
    where
        F: FnMut(&Interval<L, V>) -> T,
    {
        if self.ends_before(node) {
            return;
        }
        if let Some(left) = node.left.as_deref() {
            self.collect_matching_into(left, out, emit);
        }
        if self.matches(node) {
            out.push(emit(&node.value.interval));
        }
        if !self.starts_after(node) {
            if let Some(right) = node.right.as_deref() {
                self.collect_matching_into(right, out, emit);
            }
        }
    }

    fn collect_excluded<V>(&self, node: &Node<Entry<L, V>>, out: &mut Vec<Interval<L, V>>)
    where
        L: Clone,
        V: Clone,
    {
        if self.ends_before(node) {
            push_subtree(node, out);
            return;
        }
        if let Some(left) = node.left.as_deref() {
            self.collect_excluded(left, out);
        }
        if !self.matches(node) {
            out.push(node.value.interval.clone());
        }
        let Some(right) = node.right.as_deref() else {
            return;
        };
        if self.starts_after(node) {
            push_subtree(right, out);
        } else if self.kind == IntersectionType::Within || !self.covers_right_of(node, right) {
            self.collect_excluded(right, out);
        }
    }

    /// Whether the query covers every interval in `right`, the right subtree
    /// of `node`. Those all start no earlier than `node` and end no later
    /// than the subtree's max end.
    fn covers_right_of<V>(&self, node: &Node<Entry<L, V>>, right: &Node<Entry<L, V>>) -> bool {
        let start_covered = match self.order.compare(self.query.start(), node.value.interval.start()) {
            Less => true,
            Equal => self.query.is_start_closed() || !node.value.interval.is_start_closed(),
            Greater => false,
        };
        let end_covered = match self.order.compare(self.query.end(), &right.value.max_end) {
            Greater => true,
            Equal => self.query.is_end_closed(),
            Less => false,
        };
        start_covered && end_covered
    }
}

fn push_subtree<L: Clone, V: Clone>(node: &Node<Entry<L, V>>, out: &mut Vec<Interval<L, V>>) {
    if let Some(left) = node.left.as_deref() {
        push_subtree(left, out);
    }
    out.push(node.value.interval.clone());
    if let Some(right) = node.right.as_deref() {
        push_subtree(right, out);
    }
}

impl<L, V, C: Default> Default for IntervalSet<L, V, C> {
    fn default() -> Self {
        IntervalSet::with_order(C::default())
    }
}

/// # Panics
///
/// Panics if an interval starts after its end under `C::default()`. Use
/// [`IntervalSet::from_intervals_with_order`] to get the error instead.
impl<L, V, C> FromIterator<Interval<L, V>> for IntervalSet<L, V, C>
where
    L: Clone,
    C: LimitOrder<L> + Default,
{
    fn from_iter<I: IntoIterator<Item = Interval<L, V>>>(iter: I) -> Self {
        match Self::from_intervals_with_order(iter, C::default()) {
            Ok(set) => set,
            Err(err) => panic!("cannot collect into an interval set: {}", err),
        }
    }
}

/// # Panics
///
/// Panics if an interval starts after its end under the set's order, leaving
/// the set unchanged. Use [`IntervalSet::union_with`] to get the error instead.
impl<L, V, C> Extend<Interval<L, V>> for IntervalSet<L, V, C>
where
    L: Clone,
    C: LimitOrder<L>,
{
    fn extend<I: IntoIterator<Item = Interval<L, V>>>(&mut self, iter: I) {
        if let Err(err) = self.union_with(iter) {
            panic!("cannot extend an interval set: {}", err);
        }
    }
}

impl<L, V, C> PartialEq for IntervalSet<L, V, C>
where
    L: PartialEq,
    V: PartialEq,
{
    /// Structural equality: same intervals, same values, same order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<L: Eq, V: Eq, C> Eq for IntervalSet<L, V, C> {}

impl<L, V, C> fmt::Debug for IntervalSet<L, V, C>
where
    L: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<L, V, C> fmt::Display for IntervalSet<L, V, C>
where
    L: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().format(", "))
    }
}

/// Borrowing iterator over an [`IntervalSet`], in ascending order.
pub struct Iter<'a, L, V> {
    inner: aa_tree::Iter<'a, Entry<L, V>>,
}

impl<'a, L, V> Iterator for Iter<'a, L, V> {
    type Item = &'a Interval<L, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.interval)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<L, V> ExactSizeIterator for Iter<'_, L, V> {}

impl<L, V> FusedIterator for Iter<'_, L, V> {}

/// Owning iterator over an [`IntervalSet`], in ascending order.
pub struct IntoIter<L, V> {
    inner: aa_tree::IntoIter<Entry<L, V>>,
}

impl<L, V> Iterator for IntoIter<L, V> {
    type Item = Interval<L, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.interval)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<L, V> ExactSizeIterator for IntoIter<L, V> {}

impl<L, V> FusedIterator for IntoIter<L, V> {}

impl<L, V, C> IntoIterator for IntervalSet<L, V, C> {
    type Item = Interval<L, V>;
    type IntoIter = IntoIter<L, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, L, V, C> IntoIterator for &'a IntervalSet<L, V, C> {
    type Item = &'a Interval<L, V>;
    type IntoIter = Iter<'a, L, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<L, V, C> Serialize for IntervalSet<L, V, C>
where
    L: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, L, V, C> Deserialize<'de> for IntervalSet<L, V, C>
where
    L: Deserialize<'de> + Clone,
    V: Deserialize<'de>,
    C: LimitOrder<L> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let intervals = Vec::<Interval<L, V>>::deserialize(deserializer)?;
        Self::from_intervals_with_order(intervals, C::default()).map_err(de::Error::custom)
    }
}
