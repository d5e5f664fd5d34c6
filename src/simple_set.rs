//! The minimal set interface shared by the splay set and the reference set it is checked against.

use crate::splay_tree::SplaySet;
use std::collections::HashSet;
use std::hash::Hash;

/// A set supporting the four operations the differential harness compares.
///
/// `contains` takes `&mut self` because a self-adjusting set restructures itself on lookups.
pub trait SimpleSet<T> {
    /// Returns the number of elements in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a value. Returns `true` if it was not already present.
    fn insert(&mut self, value: T) -> bool;

    /// Removes a value. Returns `true` if it was present.
    fn remove(&mut self, value: &T) -> bool;

    /// Returns `true` if the value is present.
    fn contains(&mut self, value: &T) -> bool;
}

impl<T> SimpleSet<T> for SplaySet<T>
where
    T: Ord,
{
    fn len(&self) -> usize {
        SplaySet::len(self)
    }

    fn insert(&mut self, value: T) -> bool {
        SplaySet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        SplaySet::remove(self, value)
    }

    fn contains(&mut self, value: &T) -> bool {
        SplaySet::contains(self, value)
    }
}

impl<T> SimpleSet<T> for HashSet<T>
where
    T: Eq + Hash,
{
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn insert(&mut self, value: T) -> bool {
        HashSet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }

    fn contains(&mut self, value: &T) -> bool {
        HashSet::contains(self, value)
    }
}
