//! A generic AA-tree: a binary search tree kept balanced through integer
//! levels, restored after every change by two local rotations.
//!
//! * `skew` removes a left link between nodes of equal level (rotate right).
//! * `split` removes two consecutive right links at the same level (rotate
//!   left and promote the middle node).
//!
//! Nodes have no parent pointers. Every mutating routine takes ownership of
//! a subtree and hands back its (possibly different) root. Whenever a child
//! link changes, the [`TreePolicy::refresh`] hook runs on the node whose link
//! changed, so an aggregate derived from the children stays current through
//! rotations.

use std::cmp::Ordering::{self, Equal, Greater, Less};
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use tracing::trace;

use crate::node::Node;

/// Ordering and augmentation for the values of an [`AaTree`].
pub trait TreePolicy<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Recomputes the aggregate carried by `value` from its children. Runs
    /// bottom-up after every structural change.
    fn refresh(&self, _value: &mut T, _left: Option<&T>, _right: Option<&T>) {}
}

#[derive(Clone, Debug)]
pub struct AaTree<T, P> {
    root: Option<Box<Node<T>>>,
    len: usize,
    policy: P,
}

impl<T, P> AaTree<T, P> {
    pub fn new(policy: P) -> Self {
        AaTree {
            root: None,
            len: 0,
            policy,
        }
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }
}

impl<T, P> AaTree<T, P>
where
    P: TreePolicy<T>,
{
    /// Builds a tree from values sorted strictly ascending by the policy, in
    /// linear time.
    ///
    /// The result has exactly the shape that inserting the values one by one,
    /// in order, would settle into.
    ///
    /// # Correctness
    ///
    /// Only debug builds check the order. Unsorted or duplicated input builds
    /// a tree whose lookups and removals may miss values.
    pub fn from_sorted_unique(values: Vec<T>, policy: P) -> Self {
        let len = values.len();
        let root = build(&policy, values);
        AaTree { root, len, policy }
    }

    /// Inserts `value`, returning `false` and dropping it if an equal value is
    /// already present.
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = insert_at(&self.policy, self.root.take(), value);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes the value equal to `value`, if any.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.remove_by(|policy, v| policy.compare(value, v))
    }

    /// Removes the value located by `probe`, which returns where the target
    /// sorts relative to the value it is handed.
    pub fn remove_by<F>(&mut self, mut probe: F) -> Option<T>
    where
        F: FnMut(&P, &T) -> Ordering,
    {
        let (root, removed) = remove_at(&self.policy, self.root.take(), &mut probe);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find_by(|policy, v| policy.compare(value, v)).is_some()
    }

    pub fn find_by<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&P, &T) -> Ordering,
    {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            node = match probe(&self.policy, &n.value) {
                Less => n.left.as_deref(),
                Greater => n.right.as_deref(),
                Equal => return Some(&n.value),
            };
        }
        None
    }

    /// Keeps only the values for which `keep` returns `true`, rebuilding the
    /// tree in linear time.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&P, &T) -> bool,
    {
        let mut drain = IntoIter {
            stack: Vec::new(),
            remaining: self.len,
        };
        drain.push_left(self.root.take());

        let policy = &self.policy;
        let kept: Vec<T> = drain.filter(|v| keep(policy, v)).collect();
        self.len = kept.len();
        self.root = build(&self.policy, kept);
    }
}

impl<T, P> fmt::Display for AaTree<T, P>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.root {
            Some(ref root) => write!(f, "{}", root),
            None => write!(f, "Empty tree"),
        }
    }
}

fn refresh<T, P: TreePolicy<T>>(policy: &P, node: &mut Node<T>) {
    let Node {
        value, left, right, ..
    } = node;
    policy.refresh(
        value,
        left.as_deref().map(|n| &n.value),
        right.as_deref().map(|n| &n.value),
    );
}

fn skew<T, P: TreePolicy<T>>(policy: &P, mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.left.take() {
        Some(mut left) if left.level == node.level => {
            node.left = left.right.take();
            refresh(policy, &mut node);
            left.right = Some(node);
            refresh(policy, &mut left);
            left
        }
        left => {
            node.left = left;
            node
        }
    }
}

fn split<T, P: TreePolicy<T>>(policy: &P, mut node: Box<Node<T>>) -> Box<Node<T>> {
    let doubled = node
        .right
        .as_ref()
        .and_then(|right| right.right.as_ref())
        .is_some_and(|right_right| right_right.level == node.level);
    if !doubled {
        return node;
    }

    let Some(mut right) = node.right.take() else {
        return node;
    };
    node.right = right.left.take();
    refresh(policy, &mut node);
    right.left = Some(node);
    right.level += 1;
    refresh(policy, &mut right);
    right
}

fn insert_at<T, P: TreePolicy<T>>(
    policy: &P,
    node: Option<Box<Node<T>>>,
    value: T,
) -> (Box<Node<T>>, bool) {
    let mut node = match node {
        Some(node) => node,
        None => {
            let mut leaf = Box::new(Node::new(value));
            refresh(policy, &mut leaf);
            return (leaf, true);
        }
    };

    let inserted = match policy.compare(&value, &node.value) {
        Less => {
            let (left, inserted) = insert_at(policy, node.left.take(), value);
            node.left = Some(left);
            inserted
        }
        Greater => {
            let (right, inserted) = insert_at(policy, node.right.take(), value);
            node.right = Some(right);
            inserted
        }
        Equal => false,
    };
    if !inserted {
        return (node, false);
    }

    refresh(policy, &mut node);
    let node = skew(policy, node);
    (split(policy, node), true)
}

fn remove_at<T, P, F>(
    policy: &P,
    node: Option<Box<Node<T>>>,
    probe: &mut F,
) -> (Option<Box<Node<T>>>, Option<T>)
where
    P: TreePolicy<T>,
    F: FnMut(&P, &T) -> Ordering,
{
    let Some(mut node) = node else {
        return (None, None);
    };

    let removed = match probe(policy, &node.value) {
        Less => {
            let (left, removed) = remove_at(policy, node.left.take(), probe);
            node.left = left;
            removed
        }
        Greater => {
            let (right, removed) = remove_at(policy, node.right.take(), probe);
            node.right = right;
            removed
        }
        Equal if node.left.is_none() => {
            let (value, right) = (*node).into_value_and_right();
            return (right, Some(value));
        }
        Equal => match node.right.take() {
            Some(right) => {
                let (right, successor) = take_min(policy, right);
                node.right = right;
                Some(mem::replace(&mut node.value, successor))
            }
            // A lone child always hangs right, so this only guards against a
            // malformed tree.
            None => {
                let Node { value, left, .. } = *node;
                return (left, Some(value));
            }
        },
    };
    if removed.is_none() {
        return (Some(node), None);
    }

    refresh(policy, &mut node);
    (Some(rebalance(policy, node)), removed)
}

/// Detaches the leftmost node of `node`, rebalancing on the way back up.
fn take_min<T, P: TreePolicy<T>>(policy: &P, mut node: Box<Node<T>>) -> (Option<Box<Node<T>>>, T) {
    match node.left.take() {
        None => {
            let (value, right) = (*node).into_value_and_right();
            (right, value)
        }
        Some(left) => {
            let (left, min) = take_min(policy, left);
            node.left = left;
            refresh(policy, &mut node);
            (Some(rebalance(policy, node)), min)
        }
    }
}

/// Restores the level invariants of `node` after a removal below it.
fn rebalance<T, P: TreePolicy<T>>(policy: &P, mut node: Box<Node<T>>) -> Box<Node<T>> {
    let should_be = Node::level_of(&node.left).min(Node::level_of(&node.right)) + 1;
    if should_be >= node.level {
        return node;
    }

    node.level = should_be;
    if let Some(right) = node.right.as_mut() {
        if right.level > should_be {
            right.level = should_be;
        }
    }

    let mut node = skew(policy, node);
    if let Some(right) = node.right.take() {
        let mut right = skew(policy, right);
        if let Some(right_right) = right.right.take() {
            right.right = Some(skew(policy, right_right));
            refresh(policy, &mut right);
        }
        node.right = Some(right);
        refresh(policy, &mut node);
    }

    let mut node = split(policy, node);
    if let Some(right) = node.right.take() {
        node.right = Some(split(policy, right));
        refresh(policy, &mut node);
    }
    node
}

fn build<T, P: TreePolicy<T>>(policy: &P, values: Vec<T>) -> Option<Box<Node<T>>> {
    debug_assert!(values
        .windows(2)
        .all(|pair| policy.compare(&pair[0], &pair[1]) == Less));

    let len = values.len();
    let shape = Shape::sequential(len);
    let mut values = values.into_iter();
    let root = shape
        .root
        .and_then(|index| assemble(policy, index, &shape, &mut values));

    trace!(len, root_level = Node::level_of(&root), "bulk built tree");
    root
}

/// Level and child layout, by position, of the tree a sequence of ascending
/// inserts produces.
struct Shape {
    levels: Vec<u32>,
    left: Vec<Option<usize>>,
    right: Vec<Option<usize>>,
    root: Option<usize>,
}

impl Shape {
    fn sequential(len: usize) -> Shape {
        // Counting positions from 1, position `p` sits at level `k + 1` for
        // the largest `k` such that `2^k` divides `p` and the `2^k - 1`
        // positions after it exist. Until they do, the trailing positions
        // hang off right links one level lower.
        let mut levels = vec![1u32; len];
        let mut stride = 2;
        let mut level = 2;
        while stride <= len {
            for position in (stride..=len + 1 - stride).step_by(stride) {
                levels[position - 1] = level;
            }
            stride *= 2;
            level += 1;
        }

        // An AA subtree is rooted at its leftmost node of highest level, so
        // the layout is the Cartesian tree of the levels with ties going
        // right.
        let mut left = vec![None; len];
        let mut right = vec![None; len];
        let mut spine: Vec<usize> = Vec::new();
        for index in 0..len {
            let mut last = None;
            while let Some(&top) = spine.last() {
                if levels[top] >= levels[index] {
                    break;
                }
                last = spine.pop();
            }
            left[index] = last;
            if let Some(&top) = spine.last() {
                right[top] = Some(index);
            }
            spine.push(index);
        }

        Shape {
            levels,
            left,
            right,
            root: spine.first().copied(),
        }
    }
}

/// Builds the subtree rooted at `index`, pulling values in order.
fn assemble<T, P, I>(policy: &P, index: usize, shape: &Shape, values: &mut I) -> Option<Box<Node<T>>>
where
    P: TreePolicy<T>,
    I: Iterator<Item = T>,
{
    let left = match shape.left[index] {
        Some(child) => Some(assemble(policy, child, shape, values)?),
        None => None,
    };
    let mut node = Box::new(Node {
        value: values.next()?,
        level: shape.levels[index],
        left,
        right: None,
    });
    node.right = match shape.right[index] {
        Some(child) => Some(assemble(policy, child, shape, values)?),
        None => None,
    };
    refresh(policy, &mut node);
    Some(node)
}

/// Borrowing in-order iterator over an [`AaTree`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning in-order iterator; tears the tree down as it goes.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn push_left(&mut self, mut node: Option<Box<Node<T>>>) {
        while let Some(mut n) = node {
            node = n.left.take();
            self.stack.push(n);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left(node.right.take());
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T, P> IntoIterator for AaTree<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left(self.root);
        iter
    }
}

impl<'a, T, P> IntoIterator for &'a AaTree<T, P> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<T, P> AaTree<T, P>
where
    T: fmt::Debug,
    P: TreePolicy<T>,
{
    /// Walks every node and panics on the first broken balance or ordering
    /// invariant.
    pub(crate) fn assert_invariants(&self) {
        let mut count = 0;
        let mut stack: Vec<&Node<T>> = self.root.iter().map(|n| &**n).collect();
        while let Some(n) = stack.pop() {
            count += 1;
            stack.extend(n.left.as_deref());
            stack.extend(n.right.as_deref());

            if n.is_leaf() {
                assert_eq!(n.level, 1, "leaf {:?} is not at level 1", n.value);
            }
            if let Some(left) = n.left.as_deref() {
                assert!(left.level < n.level, "left child of {:?} is too high", n.value);
            }
            if let Some(right) = n.right.as_deref() {
                assert!(right.level <= n.level, "right child of {:?} is too high", n.value);
                if let Some(right_right) = right.right.as_deref() {
                    assert!(
                        right_right.level < n.level,
                        "three nodes level with {:?} on the right",
                        n.value
                    );
                }
            }
            match (n.left.as_deref(), n.right.as_deref()) {
                (Some(_), None) => panic!("{:?} has a lone left child", n.value),
                (None, Some(right)) => assert_eq!(
                    right.level, n.level,
                    "lone right child of {:?} is not level with it",
                    n.value
                ),
                _ => {}
            }
        }
        assert_eq!(count, self.len);

        let values: Vec<&T> = self.iter().collect();
        for pair in values.windows(2) {
            assert_eq!(
                self.policy.compare(pair[0], pair[1]),
                Less,
                "{:?} and {:?} are out of order",
                pair[0],
                pair[1]
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    #[derive(Clone, Debug, Default)]
    struct Ascending;

    impl TreePolicy<i32> for Ascending {
        fn compare(&self, a: &i32, b: &i32) -> Ordering {
            a.cmp(b)
        }
    }

    /// Keeps the subtree size next to each key.
    #[derive(Clone, Debug, Default)]
    struct SubtreeSize;

    impl TreePolicy<(i32, usize)> for SubtreeSize {
        fn compare(&self, a: &(i32, usize), b: &(i32, usize)) -> Ordering {
            a.0.cmp(&b.0)
        }

        fn refresh(&self, value: &mut (i32, usize), left: Option<&(i32, usize)>, right: Option<&(i32, usize)>) {
            value.1 = 1 + left.map_or(0, |l| l.1) + right.map_or(0, |r| r.1);
        }
    }

    fn assert_sizes(node: Option<&Node<(i32, usize)>>) -> usize {
        match node {
            None => 0,
            Some(n) => {
                let size = 1 + assert_sizes(n.left.as_deref()) + assert_sizes(n.right.as_deref());
                assert_eq!(n.value.1, size, "stale size at {}", n.value.0);
                size
            }
        }
    }

    fn tree_of(values: &[i32]) -> AaTree<i32, Ascending> {
        let mut tree = AaTree::new(Ascending);
        for &v in values {
            tree.insert(v);
        }
        tree
    }

    #[test]
    fn empty_tree() {
        let tree = AaTree::new(Ascending);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.iter().next(), None);
        assert!(!tree.contains(&3));
        assert_eq!(tree.to_string(), "Empty tree");
    }

    #[test]
    fn sequential_inserts_settle_into_known_shapes() {
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(tree.to_string(), " { 2 (2) left: { 1 (1) } right: { 3 (1) } } ");

        let tree = tree_of(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(
            tree.to_string(),
            " { 2 (2) left: { 1 (1) } right: { 4 (2) left: { 3 (1) } right: { 5 (1) right: { 6 (1) } } } } "
        );
        tree.assert_invariants();
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut tree = tree_of(&[5, 3, 8]);
        assert!(!tree.insert(5));
        assert_eq!(tree.len(), 3);
        assert!(tree.insert(4));
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5, 8]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut tree = tree_of(&[5, 3, 8]);
        assert_eq!(tree.remove(&4), None);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.remove(&3), Some(3));
        assert_eq!(tree.len(), 2);
        tree.assert_invariants();
    }

    #[test]
    fn first_last_and_find() {
        let tree = tree_of(&[7, 1, 9, 4]);
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&9));
        assert_eq!(tree.find_by(|_, v| 4.cmp(v)), Some(&4));
        assert_eq!(tree.find_by(|_, v| 5.cmp(v)), None);
    }

    #[test]
    fn bulk_build_matches_sequential_inserts() {
        for len in 0..300 {
            let values: Vec<i32> = (0..len).collect();
            let built = AaTree::from_sorted_unique(values.clone(), Ascending);
            let inserted = tree_of(&values);

            built.assert_invariants();
            assert_eq!(built.root, inserted.root, "shapes differ for {} values", len);
            assert_eq!(built.iter().copied().collect::<Vec<_>>(), values);
        }
    }

    #[test]
    fn bulk_build_pairs_and_triples() {
        // An even count leaves its last pair on a horizontal link.
        let tree = AaTree::from_sorted_unique(vec![1, 2], Ascending);
        assert_eq!(tree.to_string(), " { 1 (1) right: { 2 (1) } } ");

        // The node before a full three-node subtree becomes its leftmost leaf.
        let tree = AaTree::from_sorted_unique(vec![1, 2, 3, 4], Ascending);
        assert_eq!(
            tree.to_string(),
            " { 2 (2) left: { 1 (1) } right: { 3 (1) right: { 4 (1) } } } "
        );
    }

    #[test]
    fn retain_rebuilds_balanced() {
        let mut tree = tree_of(&(0..100).collect::<Vec<_>>());
        tree.retain(|_, v| v % 3 == 0);
        tree.assert_invariants();
        assert_eq!(tree.len(), 34);
        assert_eq!(
            tree.iter().copied().collect::<Vec<_>>(),
            (0..100).filter(|v| v % 3 == 0).collect::<Vec<_>>()
        );

        tree.retain(|_, _| false);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn into_iter_yields_ascending() {
        let tree = tree_of(&[9, 2, 7, 4, 5, 1]);
        let iter = tree.into_iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.collect::<Vec<_>>(), vec![1, 2, 4, 5, 7, 9]);
    }

    #[test]
    fn thirteen_values_survive_removals_at_every_height() {
        let values = [7, 2, 11, 5, 13, 1, 9, 4, 12, 3, 8, 10, 6];
        let mut tree = tree_of(&values);
        tree.assert_invariants();
        let mut expected: BTreeSet<i32> = values.iter().copied().collect();

        let leaf = find_node(&tree, |n| n.is_leaf());
        let low_inner = find_node(&tree, |n| !n.is_leaf() && n.level <= 2);
        let high_inner = tree.root().map(|n| n.value).unwrap();
        assert!(tree.root().unwrap().level >= 3);

        for victim in [leaf, low_inner, high_inner] {
            assert_eq!(tree.remove(&victim), Some(victim));
            expected.remove(&victim);
            tree.assert_invariants();
            assert_eq!(
                tree.iter().copied().collect::<Vec<_>>(),
                expected.iter().copied().collect::<Vec<_>>()
            );
        }
    }

    fn find_node<F>(tree: &AaTree<i32, Ascending>, pred: F) -> i32
    where
        F: Fn(&Node<i32>) -> bool,
    {
        let mut stack: Vec<&Node<i32>> = tree.root().into_iter().collect();
        while let Some(n) = stack.pop() {
            if pred(n) {
                return n.value;
            }
            stack.extend(n.left.as_deref());
            stack.extend(n.right.as_deref());
        }
        panic!("no matching node");
    }

    #[test]
    fn random_operations_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut tree = AaTree::new(Ascending);
            let mut model = BTreeSet::new();
            for _ in 0..rng.gen_range(0..120) {
                let v = rng.gen_range(0..80);
                if rng.gen_bool(0.6) {
                    assert_eq!(tree.insert(v), model.insert(v));
                } else {
                    assert_eq!(tree.remove(&v).is_some(), model.remove(&v));
                }
                tree.assert_invariants();
            }
            assert_eq!(
                tree.iter().copied().collect::<Vec<_>>(),
                model.into_iter().collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn refresh_hook_tracks_rotations() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut tree = AaTree::new(SubtreeSize);
        for _ in 0..2000 {
            let key = rng.gen_range(0..300);
            if rng.gen_bool(0.55) {
                tree.insert((key, 1));
            } else {
                tree.remove_by(|_, v: &(i32, usize)| key.cmp(&v.0));
            }
            assert_eq!(assert_sizes(tree.root()), tree.len());
        }

        let built = AaTree::from_sorted_unique((0..100).map(|k| (k, 1)).collect(), SubtreeSize);
        assert_eq!(assert_sizes(built.root()), 100);
    }
}
