//! An ordered set backed by an avl tree whose nodes live in a typed arena.
//!
//! # Examples
//! ```
//! use avl_set::avl_tree::AvlSet;
//!
//! let a = AvlSet::try_from_iter(vec![1, 2, 3, 4]).unwrap();
//! let b = AvlSet::try_from_iter(vec![4, 5, 6]).unwrap();
//!
//! let union = a.union(&b).unwrap();
//! assert_eq!(union.len(), 6);
//! assert_eq!(a.intersection(&b).unwrap().iter().collect::<Vec<_>>(), vec![&4]);
//! assert_eq!(a.difference(&b).unwrap().iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
//! ```

pub mod arena;
pub mod avl_tree;
