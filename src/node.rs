use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Node<T> {
    pub value: T,
    pub level: u32, // AA rank, 1 for leaves.
    pub left: Option<Box<Node<T>>>,
    pub right: Option<Box<Node<T>>>,
}

impl<T> fmt::Display for Node<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.left, &self.right) {
            (None, None) => write!(f, " {{ {} ({}) }} ", self.value, self.level),
            (None, Some(right)) => {
                write!(f, " {{ {} ({}) right:{}}} ", self.value, self.level, right)
            }
            (Some(left), None) => {
                write!(f, " {{ {} ({}) left:{}}} ", self.value, self.level, left)
            }
            (Some(left), Some(right)) => write!(
                f,
                " {{ {} ({}) left:{}right:{}}} ",
                self.value, self.level, left, right
            ),
        }
    }
}

impl<T> Node<T> {
    pub fn new(value: T) -> Node<T> {
        Node {
            value,
            level: 1,
            left: None,
            right: None,
        }
    }

    #[cfg(test)]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub fn level_of(node: &Option<Box<Node<T>>>) -> u32 {
        node.as_ref().map_or(0, |n| n.level)
    }

    /// Splits the node into its value and its right subtree. Only valid on a
    /// node without a left child.
    pub fn into_value_and_right(self) -> (T, Option<Box<Node<T>>>) {
        debug_assert!(self.left.is_none());
        (self.value, self.right)
    }
}
