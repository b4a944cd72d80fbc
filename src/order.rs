use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A total order over interval limits.
///
/// Sets that share intervals (union, subset checks, ...) must agree on how
/// limits are ordered, which is what [`LimitOrder::is_compatible`] decides.
pub trait LimitOrder<L: ?Sized> {
    fn compare(&self, a: &L, b: &L) -> Ordering;

    /// Returns `true` if two sets ordered by `self` and `other` can exchange
    /// intervals without misordering them.
    fn is_compatible(&self, other: &Self) -> bool;

    /// Returns the greater of `a` and `b`, preferring `a` on ties.
    fn max_of<'a>(&self, a: &'a L, b: &'a L) -> &'a L {
        match self.compare(a, b) {
            Ordering::Less => b,
            _ => a,
        }
    }
}

/// The ordering given by the limit type's own [`Ord`] implementation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<L: Ord + ?Sized> LimitOrder<L> for Natural {
    #[inline]
    fn compare(&self, a: &L, b: &L) -> Ordering {
        a.cmp(b)
    }

    #[inline]
    fn is_compatible(&self, _other: &Self) -> bool {
        true
    }
}

/// A caller-supplied ordering function.
///
/// Two `OrderFn`s are compatible only if they share the same `Arc`, that is
/// one is a clone of the other. Separate `OrderFn::new` calls are never
/// compatible, even when built from the same closure value: there is no way
/// to tell whether two closures agree.
pub struct OrderFn<L: ?Sized> {
    f: Arc<dyn Fn(&L, &L) -> Ordering + Send + Sync>,
}

impl<L: ?Sized> OrderFn<L> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&L, &L) -> Ordering + Send + Sync + 'static,
    {
        OrderFn { f: Arc::new(f) }
    }
}

impl<L: ?Sized> Clone for OrderFn<L> {
    fn clone(&self) -> Self {
        OrderFn {
            f: Arc::clone(&self.f),
        }
    }
}

impl<L: ?Sized> fmt::Debug for OrderFn<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OrderFn")
            .field("f", &Arc::as_ptr(&self.f))
            .finish()
    }
}

impl<L: ?Sized> LimitOrder<L> for OrderFn<L> {
    #[inline]
    fn compare(&self, a: &L, b: &L) -> Ordering {
        (self.f)(a, b)
    }

    fn is_compatible(&self, other: &Self) -> bool {
        // Both allocations are live here, so equal data addresses mean the
        // same `Arc`, even for a zero-sized closure.
        Arc::ptr_eq(&self.f, &other.f)
    }
}
