use crate::arena::{Handle, Result};
use crate::avl_tree::node::{Arena, Link, Node};
use log::trace;
use std::borrow::Borrow;
use std::cmp::{self, Ordering};

pub fn height<T>(arena: &Arena<T>, tree: Link) -> usize {
    match tree {
        None => 0,
        Some(handle) => arena[handle].height,
    }
}

// Re-parents the children of `handle` and refreshes its cached height and balance.
fn update<T>(arena: &mut Arena<T>, handle: Handle) {
    let (left, right) = (arena[handle].left, arena[handle].right);
    if let Some(child) = left {
        arena[child].parent = Some(handle);
    }
    if let Some(child) = right {
        arena[child].parent = Some(handle);
    }

    let left_height = height(arena, left);
    let right_height = height(arena, right);
    let node = &mut arena[handle];
    node.height = cmp::max(left_height, right_height) + 1;
    node.balance = right_height as i32 - left_height as i32;
}

fn rotate_left<T>(arena: &mut Arena<T>, handle: Handle) -> Handle {
    let child = arena[handle]
        .right
        .expect("Expected right child node to be `Some`.");
    arena[handle].right = arena[child].left;
    arena[child].left = Some(handle);
    update(arena, handle);
    update(arena, child);
    child
}

fn rotate_right<T>(arena: &mut Arena<T>, handle: Handle) -> Handle {
    let child = arena[handle]
        .left
        .expect("Expected left child node to be `Some`.");
    arena[handle].left = arena[child].right;
    arena[child].right = Some(handle);
    update(arena, handle);
    update(arena, child);
    child
}

fn rotate_left_right<T>(arena: &mut Arena<T>, handle: Handle) -> Handle {
    let child = arena[handle]
        .left
        .expect("Expected left child node to be `Some`.");
    arena[handle].left = Some(rotate_left(arena, child));
    rotate_right(arena, handle)
}

fn rotate_right_left<T>(arena: &mut Arena<T>, handle: Handle) -> Handle {
    let child = arena[handle]
        .right
        .expect("Expected right child node to be `Some`.");
    arena[handle].right = Some(rotate_right(arena, child));
    rotate_left(arena, handle)
}

/// Refreshes `tree` from its children and restores the avl invariant with at most two
/// rotations. Returns the new root of the subtree; its `parent` link is left for the caller.
fn rebalance<T>(arena: &mut Arena<T>, tree: Link) -> Link {
    let handle = tree?;
    update(arena, handle);

    let new_root = match arena[handle].balance {
        -2 => {
            let child = arena[handle]
                .left
                .expect("Expected left-heavy node to have a left child.");
            if arena[child].balance > 0 {
                trace!("rotating left then right");
                rotate_left_right(arena, handle)
            } else {
                trace!("rotating right");
                rotate_right(arena, handle)
            }
        },
        2 => {
            let child = arena[handle]
                .right
                .expect("Expected right-heavy node to have a right child.");
            if arena[child].balance < 0 {
                trace!("rotating right then left");
                rotate_right_left(arena, handle)
            } else {
                trace!("rotating left");
                rotate_left(arena, handle)
            }
        },
        _ => handle,
    };
    Some(new_root)
}

/// Inserts `key` into `tree` and returns the new root of the subtree together with whether the
/// key was added. A key equal to an existing one leaves the subtree untouched.
///
/// The only allocation happens when the new leaf is created, before any link is rewritten, so
/// an error leaves the tree exactly as it was.
pub fn insert<T>(arena: &mut Arena<T>, tree: Link, key: T) -> Result<(Handle, bool)>
where
    T: Ord,
{
    let handle = match tree {
        Some(handle) => handle,
        None => return Ok((arena.try_allocate(Node::new(key))?, true)),
    };

    let inserted = match key.cmp(&arena[handle].key) {
        Ordering::Less => {
            let left = arena[handle].left;
            let (child, inserted) = insert(arena, left, key)?;
            arena[handle].left = Some(child);
            inserted
        },
        Ordering::Greater => {
            let right = arena[handle].right;
            let (child, inserted) = insert(arena, right, key)?;
            arena[handle].right = Some(child);
            inserted
        },
        Ordering::Equal => false,
    };

    if !inserted {
        return Ok((handle, false));
    }
    let new_root = rebalance(arena, Some(handle)).expect("Expected non-empty tree.");
    Ok((new_root, true))
}

/// Unlinks the minimum node of `handle`'s subtree and returns the new root of what remains.
/// The unlinked node keeps its stale links; the caller decides where it goes.
fn remove_min<T>(arena: &mut Arena<T>, handle: Handle) -> Link {
    match arena[handle].left {
        None => arena[handle].right,
        Some(child) => {
            arena[handle].left = remove_min(arena, child);
            rebalance(arena, Some(handle))
        },
    }
}

/// Removes `key` from `tree` and returns the new root of the subtree together with the removed
/// key, if it was present.
pub fn remove<T, V>(arena: &mut Arena<T>, tree: Link, key: &V) -> (Link, Option<T>)
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let handle = match tree {
        Some(handle) => handle,
        None => return (None, None),
    };

    match key.cmp(arena[handle].key.borrow()) {
        Ordering::Less => {
            let left = arena[handle].left;
            let (child, removed) = remove(arena, left, key);
            arena[handle].left = child;
            if removed.is_none() {
                return (Some(handle), None);
            }
            (rebalance(arena, Some(handle)), removed)
        },
        Ordering::Greater => {
            let right = arena[handle].right;
            let (child, removed) = remove(arena, right, key);
            arena[handle].right = child;
            if removed.is_none() {
                return (Some(handle), None);
            }
            (rebalance(arena, Some(handle)), removed)
        },
        Ordering::Equal => {
            // Sever every link before releasing the node so no subtree goes with it.
            let (left, right) = {
                let node = &mut arena[handle];
                node.parent = None;
                (node.left.take(), node.right.take())
            };
            let Node { key: removed, .. } = arena.free(&handle);

            let right = match right {
                Some(right) => right,
                None => return (left, Some(removed)),
            };

            let mut successor = right;
            while let Some(child) = arena[successor].left {
                successor = child;
            }
            let rest = remove_min(arena, right);
            arena[successor].right = rest;
            arena[successor].left = left;
            (rebalance(arena, Some(successor)), Some(removed))
        },
    }
}

/// Returns the node holding the smallest key of `handle`'s subtree.
pub fn smallest<T>(arena: &Arena<T>, handle: Handle) -> Handle {
    let mut curr = handle;
    while let Some(left) = arena[curr].left {
        curr = left;
    }
    curr
}

/// Returns the node holding the largest key of `handle`'s subtree.
pub fn largest<T>(arena: &Arena<T>, handle: Handle) -> Handle {
    let mut curr = handle;
    while let Some(right) = arena[curr].right {
        curr = right;
    }
    curr
}

/// Returns the first node whose key is not less than `key`.
pub fn lower_bound<T, V>(arena: &Arena<T>, tree: Link, key: &V) -> Link
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let handle = tree?;
    match key.cmp(arena[handle].key.borrow()) {
        Ordering::Less => lower_bound(arena, arena[handle].left, key).or(Some(handle)),
        Ordering::Greater => lower_bound(arena, arena[handle].right, key),
        Ordering::Equal => Some(handle),
    }
}

/// Returns the first node whose key is greater than `key`.
pub fn upper_bound<T, V>(arena: &Arena<T>, tree: Link, key: &V) -> Link
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let handle = tree?;
    match key.cmp(arena[handle].key.borrow()) {
        Ordering::Less => upper_bound(arena, arena[handle].left, key).or(Some(handle)),
        _ => upper_bound(arena, arena[handle].right, key),
    }
}

/// Returns the last node whose key is not greater than `key`.
pub fn floor<T, V>(arena: &Arena<T>, tree: Link, key: &V) -> Link
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let handle = tree?;
    match key.cmp(arena[handle].key.borrow()) {
        Ordering::Greater => floor(arena, arena[handle].right, key).or(Some(handle)),
        Ordering::Less => floor(arena, arena[handle].left, key),
        Ordering::Equal => Some(handle),
    }
}

pub fn find<T, V>(arena: &Arena<T>, tree: Link, key: &V) -> Link
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    lower_bound(arena, tree, key).filter(|handle| key == arena[*handle].key.borrow())
}
