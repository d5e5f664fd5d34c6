//! Self-adjusting binary search tree with the additional property that recently accessed elements
//! are quick to access again.

mod node;
mod set;
mod tree;

pub use self::set::{SplaySet, SplaySetIntoIter, SplaySetIter, SplaySetPreorder};
