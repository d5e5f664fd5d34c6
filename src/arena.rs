//! Simple slot allocator for tree nodes.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object allocated in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(usize);

enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A growable allocator that only allocates a single type of object.
///
/// Objects live in a single `Vec` and are addressed by `Handle`s, so structures with back-links
/// (such as a tree with parent pointers) can be expressed without shared ownership or unsafe
/// code. Freed slots are threaded into a free list and reused by later allocations. All objects
/// are dropped when the arena is dropped.
///
/// # Examples
///
/// ```
/// use splay_set::arena::TypedArena;
///
/// let mut arena = TypedArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<usize>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new();
    /// ```
    pub fn new() -> Self {
        TypedArena {
            head: None,
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns a `Handle` that can later be used to access
    /// or deallocate it. Vacant slots are reused before the arena grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Handle(self.blocks.len() - 1)
            },
            Some(index) => {
                let vacant_block = mem::replace(&mut self.blocks[index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next) => self.head = next,
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
                Handle(index)
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.0 >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(&mut self.blocks[handle.0], Block::Vacant(self.head));
        match old_block {
            Block::Vacant(next) => {
                self.blocks[handle.0] = Block::Vacant(next);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle.0);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// does not correspond to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.blocks.get(handle.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns mutable references to two distinct live objects at once. Returns `None` if the
    /// handles are equal or either one is not live.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_set::arena::TypedArena;
    /// use std::mem;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(1);
    /// let y = arena.allocate(2);
    /// if let Some((a, b)) = arena.pair_mut(x, y) {
    ///     mem::swap(a, b);
    /// }
    /// assert_eq!(arena[x], 2);
    /// assert_eq!(arena[y], 1);
    /// ```
    pub fn pair_mut(&mut self, a: Handle, b: Handle) -> Option<(&mut T, &mut T)> {
        if a == b || a.0 >= self.blocks.len() || b.0 >= self.blocks.len() {
            return None;
        }
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.blocks.split_at_mut(high);
        match (&mut head[low], &mut tail[0]) {
            (Block::Occupied(low_value), Block::Occupied(high_value)) => {
                if a.0 < b.0 {
                    Some((low_value, high_value))
                } else {
                    Some((high_value, low_value))
                }
            },
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object and releases the slots.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;
    use super::TypedArena;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new();
        arena.free(Handle(0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new();
        let handle = arena.allocate(0);
        arena.free(handle);
        arena.free(handle);
    }

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new();
        assert_eq!(arena.allocate(0), Handle(0));
        assert_eq!(arena.allocate(0), Handle(1));
        assert_eq!(arena.allocate(0), Handle(2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slots() {
        let mut arena = TypedArena::new();
        let a = arena.allocate(0);
        let b = arena.allocate(1);
        assert_eq!(arena.free(a), 0);
        assert_eq!(arena.free(b), 1);
        assert!(arena.is_empty());

        // most recently freed slot is reused first
        assert_eq!(arena.allocate(2), b);
        assert_eq!(arena.allocate(3), a);
        assert_eq!(arena.allocate(4), Handle(2));
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new();
        let handle = arena.allocate(0);
        arena.free(handle);
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.get_mut(handle), None);
        assert_eq!(arena.get(Handle(7)), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new();
        let handle = arena.allocate(0);
        *arena.get_mut(handle).unwrap() = 1;
        assert_eq!(arena.get(handle), Some(&1));
    }

    #[test]
    fn test_pair_mut() {
        let mut arena = TypedArena::new();
        let a = arena.allocate(0);
        let b = arena.allocate(1);
        assert!(arena.pair_mut(a, a).is_none());
        {
            let (x, y) = arena.pair_mut(b, a).unwrap();
            assert_eq!((*x, *y), (1, 0));
            *x = 10;
        }
        assert_eq!(arena[b], 10);
        arena.free(a);
        assert!(arena.pair_mut(a, b).is_none());
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new();
        arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(2), Handle(0));
    }
}
