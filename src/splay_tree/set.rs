use crate::arena::Handle;
use crate::splay_tree::tree::{Search, Tree};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

/// An ordered set implemented using a splay tree.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that recently
/// accessed elements are quick to access again. Every `insert`, `remove` and `contains` moves the
/// node it touched to the root of the tree, or the last node visited if the search missed. There
/// is no explicit balance invariant; operations are logarithmic in the amortized sense.
///
/// Nodes are kept in an arena and link to their parents, so splaying happens bottom-up with
/// zig, zig-zig and zig-zag rotations.
///
/// Two elements that compare equal are treated as the same member. The behavior is unspecified
/// if the `Ord` implementation of `T` is not a total order.
///
/// # Examples
///
/// ```
/// use splay_set::splay_tree::SplaySet;
///
/// let mut set = SplaySet::new();
/// assert!(set.insert(5));
/// assert!(set.insert(3));
/// assert!(set.insert(8));
/// assert!(!set.insert(3));
///
/// assert!(set.contains(&3));
/// assert_eq!(set.root(), Some(&3));
///
/// assert!(set.remove(&5));
/// assert!(!set.contains(&5));
/// assert_eq!(set.len(), 2);
/// ```
pub struct SplaySet<T> {
    tree: Tree<T>,
    len: usize,
}

impl<T> SplaySet<T> {
    /// Constructs a new, empty `SplaySet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let set: SplaySet<u32> = SplaySet::new();
    /// ```
    pub fn new() -> Self {
        SplaySet {
            tree: Tree::new(),
            len: 0,
        }
    }

    /// Inserts a value into the set. Returns `true` if the value was added and `false` if an
    /// equal value was already present, in which case the stored value is kept. Either way the
    /// node holding the value becomes the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let handle = match self.tree.find(&value) {
            None => self.tree.insert_root(value),
            Some(Search::Found(handle)) => {
                self.tree.splay(handle);
                return false;
            },
            Some(Search::Vacant(parent, side)) => self.tree.insert_leaf(parent, side, value),
        };
        self.tree.splay(handle);
        self.len += 1;
        true
    }

    /// Removes a value from the set. Returns `true` if the value was present.
    ///
    /// On a miss the last node visited by the search is splayed. On a hit the node is excised and
    /// the node whose position changed (the parent of the excised node) is splayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<V>(&mut self, value: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes a value from the set and returns it. Returns `None` if the value was not present.
    /// Splays like `remove`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(String::from("a"));
    /// assert_eq!(set.take("a"), Some(String::from("a")));
    /// assert_eq!(set.take("a"), None);
    /// ```
    pub fn take<V>(&mut self, value: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let handle = match self.tree.find(value)? {
            Search::Found(handle) => handle,
            Search::Vacant(handle, _) => {
                self.tree.splay(handle);
                return None;
            },
        };
        let (removed, anchor) = self.tree.remove(handle);
        if let Some(anchor) = anchor {
            self.tree.splay(anchor);
        }
        self.len -= 1;
        Some(removed)
    }

    /// Checks if a value exists in the set. The node holding the value, or the last node visited
    /// if it is absent, is splayed to the root, which is why this takes `&mut self`. Use `get` for
    /// a lookup that leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// assert_eq!(set.root(), Some(&1));
    /// ```
    pub fn contains<V>(&mut self, value: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        match self.tree.find(value) {
            Some(search) => {
                self.tree.splay(search.handle());
                match search {
                    Search::Found(_) => true,
                    Search::Vacant(..) => false,
                }
            },
            None => false,
        }
    }

    /// Returns a reference to the value in the set equal to `value`, without splaying.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.get(&1), Some(&1));
    /// assert_eq!(set.get(&3), None);
    /// assert_eq!(set.root(), Some(&2));
    /// ```
    pub fn get<V>(&self, value: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        match self.tree.find(value)? {
            Search::Found(handle) => Some(self.value(handle)),
            Search::Vacant(..) => None,
        }
    }

    /// Returns the value at the root of the tree, which is the most recently accessed one.
    pub fn root(&self) -> Option<&T> {
        self.tree.root().map(|handle| self.value(handle))
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty. Note that `min`
    /// does not splay the tree in order to use a non-mutable reference.
    pub fn min(&self) -> Option<&T> {
        self.tree.min().map(|handle| self.value(handle))
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty. Note that `max`
    /// does not splay the tree in order to use a non-mutable reference.
    pub fn max(&self) -> Option<&T> {
        self.tree.max().map(|handle| self.value(handle))
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplaySetIter<T> {
        SplaySetIter {
            tree: &self.tree,
            current: self.tree.root(),
            stack: Vec::new(),
            remaining: self.len,
        }
    }

    /// Returns an iterator that yields each value before the values of its left subtree, followed
    /// by the values of its right subtree. The order reflects the current shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// set.insert(2);
    /// assert_eq!(set.preorder().collect::<Vec<&u32>>(), vec![&2, &1, &3]);
    /// ```
    pub fn preorder(&self) -> SplaySetPreorder<T> {
        SplaySetPreorder {
            tree: &self.tree,
            stack: self.tree.root().into_iter().collect(),
        }
    }

    fn value(&self, handle: Handle) -> &T {
        &self.tree.node(handle).value
    }

    #[cfg(test)]
    fn assert_consistent(&self)
    where
        T: Ord + fmt::Debug,
    {
        assert_eq!(self.tree.assert_consistent(), self.len);
    }
}

impl<T> IntoIterator for SplaySet<T> {
    type Item = T;
    type IntoIter = SplaySetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree.root(),
            tree: self.tree,
            stack: Vec::new(),
            remaining: self.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a SplaySet<T>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = SplaySetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `SplaySet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct SplaySetIntoIter<T> {
    tree: Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
    remaining: usize,
}

impl<T> Iterator for SplaySetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.current = self.tree.node(handle).left;
            self.stack.push(handle);
        }
        self.stack.pop().map(|handle| {
            let node = self.tree.free(handle);
            self.current = node.right;
            self.remaining -= 1;
            node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SplaySetIntoIter<T> {}

/// An iterator for `SplaySet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct SplaySetIter<'a, T>
where
    T: 'a,
{
    tree: &'a Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for SplaySetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(handle) = self.current {
            self.current = tree.node(handle).left;
            self.stack.push(handle);
        }
        self.stack.pop().map(|handle| {
            let node = tree.node(handle);
            self.current = node.right;
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for SplaySetIter<'a, T> where T: 'a {}

/// A pre-order iterator for `SplaySet<T>`.
///
/// This iterator yields a node, then its left subtree, then its right subtree.
pub struct SplaySetPreorder<'a, T>
where
    T: 'a,
{
    tree: &'a Tree<T>,
    stack: Vec<Handle>,
}

impl<'a, T> Iterator for SplaySetPreorder<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.stack.pop().map(|handle| {
            let node = tree.node(handle);
            self.stack.extend(node.right);
            self.stack.extend(node.left);
            &node.value
        })
    }
}

impl<T> Default for SplaySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for SplaySet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for SplaySet<T> where T: Eq {}

impl<T> fmt::Debug for SplaySet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders the tree in pre-order as `[ a b c ]`. An empty set renders as an empty string.
impl<T> fmt::Display for SplaySet<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "[ ")?;
        for value in self.preorder() {
            write!(f, "{} ", value)?;
        }
        write!(f, "]")
    }
}

impl<T> FromIterator<T> for SplaySet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = SplaySet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for SplaySet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> Serialize for SplaySet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct SplaySetVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for SplaySetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = SplaySet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = SplaySet::new();
        while let Some(value) = seq.next_element()? {
            set.insert(value);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for SplaySet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SplaySetVisitor {
            marker: PhantomData,
        })
    }
}
