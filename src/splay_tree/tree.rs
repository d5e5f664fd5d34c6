use crate::arena::{Handle, TypedArena};
use crate::splay_tree::node::{Node, Side};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// Where a search through the tree stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Search {
    /// The node holds a value equal to the target.
    Found(Handle),
    /// The target is absent. The node is the last one visited and `Side` is its empty child slot
    /// where the target would be linked.
    Vacant(Handle, Side),
}

impl Search {
    pub fn handle(self) -> Handle {
        match self {
            Search::Found(handle) | Search::Vacant(handle, _) => handle,
        }
    }
}

/// A binary search tree whose nodes live in an arena and link to their parents, restructured
/// bottom-up by splaying.
pub struct Tree<T> {
    arena: TypedArena<Node<T>>,
    root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree {
            arena: TypedArena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn node(&self, handle: Handle) -> &Node<T> {
        &self.arena[handle]
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    fn side_of(&self, parent: Handle, child: Handle) -> Side {
        if self.arena[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Links `child` into a slot of `parent`, updating the child's parent link.
    fn set_child(&mut self, parent: Handle, side: Side, child: Option<Handle>) {
        *self.arena[parent].child_mut(side) = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
    }

    /// Puts `replacement` in the slot `handle` occupies, which is either a child slot of its
    /// parent or the root. The parent link of `handle` itself is left untouched.
    fn replace_with(&mut self, handle: Handle, replacement: Option<Handle>) {
        match self.arena[handle].parent {
            Some(parent) => {
                let side = self.side_of(parent, handle);
                self.set_child(parent, side, replacement);
            },
            None => {
                if let Some(replacement) = replacement {
                    self.arena[replacement].parent = None;
                }
                self.root = replacement;
            },
        }
    }

    /// Rotates `handle` above its parent: a right rotation if it is a left child and a left
    /// rotation if it is a right child. Does nothing at the root.
    fn rotate(&mut self, handle: Handle) {
        let parent = match self.arena[handle].parent {
            Some(parent) => parent,
            None => return,
        };
        let side = self.side_of(parent, handle);
        self.replace_with(parent, Some(handle));
        let inner = self.arena[handle].child(side.opposite());
        self.set_child(parent, side, inner);
        self.set_child(handle, side.opposite(), Some(parent));
    }

    /// Moves `handle` to the root with zig, zig-zig and zig-zag steps.
    pub fn splay(&mut self, handle: Handle) {
        let mut rotations = 0;
        while let Some(parent) = self.arena[handle].parent {
            match self.arena[parent].parent {
                // zig or zag
                None => {
                    self.rotate(handle);
                    rotations += 1;
                },
                Some(grandparent) => {
                    if self.side_of(parent, handle) == self.side_of(grandparent, parent) {
                        // zig-zig or zag-zag
                        self.rotate(parent);
                        self.rotate(handle);
                    } else {
                        // zig-zag or zag-zig
                        self.rotate(handle);
                        self.rotate(handle);
                    }
                    rotations += 2;
                },
            }
        }
        trace!("splayed {:?} to the root with {} rotations", handle, rotations);
    }

    /// Descends from the root towards `key`. Returns `None` only if the tree is empty.
    pub fn find<V>(&self, key: &V) -> Option<Search>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root?;
        loop {
            let side = match key.cmp(self.arena[curr].value.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Some(Search::Found(curr)),
            };
            match self.arena[curr].child(side) {
                Some(child) => curr = child,
                None => return Some(Search::Vacant(curr, side)),
            }
        }
    }

    /// Allocates `value` as the sole node of an empty tree.
    pub fn insert_root(&mut self, value: T) -> Handle {
        debug_assert!(self.root.is_none());
        let handle = self.arena.allocate(Node::new(value));
        self.root = Some(handle);
        handle
    }

    /// Allocates `value` as a new leaf in the empty slot `side` of `parent`.
    pub fn insert_leaf(&mut self, parent: Handle, side: Side, value: T) -> Handle {
        debug_assert!(self.arena[parent].child(side).is_none());
        let handle = self.arena.allocate(Node::new(value));
        self.set_child(parent, side, Some(handle));
        handle
    }

    /// Follows right links down from `handle` to the maximum of its subtree.
    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    /// Follows left links down from `handle` to the minimum of its subtree.
    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    pub fn min(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    pub fn max(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Exchanges the values held by two distinct nodes, leaving the structure as is.
    fn swap_values(&mut self, a: Handle, b: Handle) {
        if let Some((a, b)) = self.arena.pair_mut(a, b) {
            mem::swap(&mut a.value, &mut b.value);
        }
    }

    /// Unlinks a node with at most one child and frees it. Returns the stored value together with
    /// the node that should be splayed next: the former parent, or the promoted child if the node
    /// was the root.
    fn excise(&mut self, handle: Handle) -> (T, Option<Handle>) {
        let (left, right, parent) = {
            let node = &self.arena[handle];
            (node.left, node.right, node.parent)
        };
        debug_assert!(left.is_none() || right.is_none());
        let child = left.or(right);
        self.replace_with(handle, child);
        let Node { value, .. } = self.arena.free(handle);
        (value, parent.or(child))
    }

    /// Removes the value held by `handle` from the tree. A node with two children takes the value
    /// of the maximum of its left subtree, and that donor node is excised instead.
    pub fn remove(&mut self, handle: Handle) -> (T, Option<Handle>) {
        let (left, right) = (self.arena[handle].left, self.arena[handle].right);
        match (left, right) {
            (Some(left), Some(_)) => {
                let donor = self.rightmost(left);
                self.swap_values(handle, donor);
                self.excise(donor)
            },
            _ => self.excise(handle),
        }
    }

    /// Takes the value out of a node during teardown. The structure is not repaired, so the
    /// caller must not follow links into freed nodes afterwards.
    pub fn free(&mut self, handle: Handle) -> Node<T> {
        self.arena.free(handle)
    }

    /// Checks parent links, search order and node count. Returns the number of reachable nodes.
    #[cfg(test)]
    pub fn assert_consistent(&self) -> usize
    where
        T: Ord + ::std::fmt::Debug,
    {
        let root = match self.root {
            Some(root) => root,
            None => {
                assert!(self.arena.is_empty());
                return 0;
            },
        };
        assert_eq!(self.arena[root].parent, None);

        let mut count = 0;
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            count += 1;
            let node = &self.arena[handle];
            for &(child, ordering) in &[(node.left, Ordering::Less), (node.right, Ordering::Greater)] {
                if let Some(child) = child {
                    assert_eq!(self.arena[child].parent, Some(handle));
                    assert_eq!(self.arena[child].value.cmp(&node.value), ordering);
                    stack.push(child);
                }
            }
        }

        // local ordering alone does not catch a value on the wrong side of an ancestor
        let mut prev: Option<&T> = None;
        let mut stack = Vec::new();
        let mut curr = Some(root);
        loop {
            while let Some(handle) = curr {
                stack.push(handle);
                curr = self.arena[handle].left;
            }
            let handle = match stack.pop() {
                Some(handle) => handle,
                None => break,
            };
            let value = &self.arena[handle].value;
            if let Some(prev) = prev {
                assert!(prev < value, "{:?} is not less than {:?}", prev, value);
            }
            prev = Some(value);
            curr = self.arena[handle].right;
        }

        assert_eq!(count, self.arena.len());
        count
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}
