//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! Nodes live in a `TypedArena` and refer to their children and their parent by handle, so a
//! cursor can step to the next or previous key in constant amortized time without a stack.

mod node;
mod set;
mod tree;

pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter, Cursor, DEFAULT_CHUNK_SIZE};
pub use crate::arena::{Error, Result};
