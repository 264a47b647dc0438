use crate::arena::{Handle, TypedArena};

pub type Link = Option<Handle>;
pub type Arena<T> = TypedArena<Node<T>>;

/// A struct representing an internal node of an avl tree.
///
/// `left` and `right` own their subtrees. `parent` is a back-reference that is only used to walk
/// to the in-order successor or predecessor.
pub struct Node<T> {
    pub key: T,
    pub height: usize,
    pub balance: i32,
    pub left: Link,
    pub right: Link,
    pub parent: Link,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            height: 1,
            balance: 0,
            left: None,
            right: None,
            parent: None,
        }
    }
}

/// Returns the in-order successor of `handle`, or `None` if it holds the largest key.
pub fn next_node<T>(arena: &Arena<T>, handle: Handle) -> Link {
    if let Some(mut curr) = arena[handle].right {
        while let Some(left) = arena[curr].left {
            curr = left;
        }
        return Some(curr);
    }

    let mut child = handle;
    let mut parent = arena[handle].parent;
    while let Some(curr) = parent {
        if arena[curr].right != Some(child) {
            break;
        }
        child = curr;
        parent = arena[curr].parent;
    }
    parent
}

/// Returns the in-order predecessor of `handle`, or `None` if it holds the smallest key.
pub fn prev_node<T>(arena: &Arena<T>, handle: Handle) -> Link {
    if let Some(mut curr) = arena[handle].left {
        while let Some(right) = arena[curr].right {
            curr = right;
        }
        return Some(curr);
    }

    let mut child = handle;
    let mut parent = arena[handle].parent;
    while let Some(curr) = parent {
        if arena[curr].left != Some(child) {
            break;
        }
        child = curr;
        parent = arena[curr].parent;
    }
    parent
}
