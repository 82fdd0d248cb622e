//! Shared storage for container values.
//!
//! `Heap<T>` wraps `Arc<T>`. Its constructor is `pub(super)`, so strings,
//! lists and dicts can only be allocated through `Value::string`,
//! `Value::list` and `Value::dict`.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted, immutable container payload.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> Heap<T> {
    /// Copy of the payload, for building a modified value.
    pub fn to_owned_inner(&self) -> T {
        (*self.0).clone()
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

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized> AsRef<T> for Heap<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deref_reads_payload() {
        let h = Heap::new(42i64);
        assert_eq!(*h, 42);
    }

    #[test]
    fn clone_shares_allocation() {
        let h1 = Heap::new(vec![1, 2, 3]);
        let h2 = h1.clone();
        assert!(h1.ptr_eq(&h2));
        assert!(!h1.ptr_eq(&Heap::new(vec![1, 2, 3])));
    }

    #[test]
    fn eq_compares_content() {
        assert_eq!(Heap::new("a".to_string()), Heap::new("a".to_string()));
        assert_ne!(Heap::new("a".to_string()), Heap::new("b".to_string()));
    }
}
