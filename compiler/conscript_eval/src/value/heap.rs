//! Enforced-`Arc` heap wrapper.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared, immutable heap allocation for composite values.
///
/// The constructor is crate-private: external code builds heap values
/// through the factory methods on [`crate::Value`], which keeps every
/// allocation behind an `Arc` and the whole value model `Send + Sync`.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    /// Allocate a new shared value. Crate-private on purpose.
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Pointer identity — the basis of shallow (`===`-style) comparison
    /// for composite values.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: PartialEq + ?Sized> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}
