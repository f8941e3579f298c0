//! Reference-counted storage for heap values.
//!
//! `Heap<T>` holds immutable shared data (strings, bytes, tuples).
//! `Shared<T>` holds mutable shared data (list, set and map storage) so that
//! every holder of a container, including its iterators, observes mutation.
//!
//! Both constructors are `pub(super)`: heap values are only created through
//! the `Value` factory methods and the container constructors.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Immutable shared heap data.
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T: ?Sized> Heap<T> {
    #[inline]
    pub(super) fn new(value: Rc<T>) -> Self {
        Heap(value)
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mutable shared heap data.
///
/// Single-threaded: no locking, borrows are checked by `RefCell`.
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    /// Borrow the contents.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrow the contents.
    #[inline]
    pub(super) fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether two handles point at the same container.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the container, for identity hashing.
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.borrow().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_deref() {
        let h: Heap<str> = Heap::new(Rc::from("hello"));
        assert_eq!(&*h, "hello");
    }

    #[test]
    fn test_heap_clone_shares_allocation() {
        let h1: Heap<[i32]> = Heap::new(Rc::from(vec![1, 2, 3]));
        let h2 = h1.clone();
        assert!(h1.ptr_eq(&h2));
        assert_eq!(&*h1, &*h2);
    }

    #[test]
    fn test_shared_mutation_visible_through_clone() {
        let s1 = Shared::new(vec![1]);
        let s2 = s1.clone();
        s1.borrow_mut().push(2);
        assert_eq!(*s2.borrow(), vec![1, 2]);
        assert!(s1.ptr_eq(&s2));
    }
}
