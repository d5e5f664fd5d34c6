//! An ordered set backed by a bottom-up splay tree, and a differential harness that checks it
//! against the standard library's `HashSet`.

pub mod arena;
pub mod harness;
pub mod simple_set;
pub mod splay_tree;
