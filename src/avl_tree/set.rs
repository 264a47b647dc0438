use crate::arena::Result;
use crate::avl_tree::node::{self, Arena, Link};
use crate::avl_tree::tree;
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::ptr;
use std::vec;

/// The number of nodes reserved at a time when a set needs more room.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Nodes are stored in an arena
/// and keep a link to their parent, which lets a `Cursor` walk the set in either direction.
///
/// Operations that may allocate return a `Result` so an allocation failure reaches the caller
/// with the set unchanged.
///
/// # Examples
/// ```
/// use avl_set::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// assert_eq!(set.insert(0).unwrap(), true);
/// assert_eq!(set.insert(3).unwrap(), true);
/// assert_eq!(set.insert(3).unwrap(), false);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct AvlSet<T> {
    arena: Arena<T>,
    root: Link,
    len: usize,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `AvlSet<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::with_chunk_size(16);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        AvlSet {
            arena: Arena::new(chunk_size),
            root: None,
            len: 0,
        }
    }

    /// Constructs a set from the keys of an iterator, ignoring duplicates.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set = AvlSet::try_from_iter(vec![3, 1, 3, 2]).unwrap();
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn try_from_iter<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        for key in iter {
            set.insert(key)?;
        }
        Ok(set)
    }

    fn fix_root(&mut self) {
        if let Some(root) = self.root {
            self.arena[root].parent = None;
        }
    }

    /// Inserts a key into the set. Returns `true` if the key was added and `false` if an equal
    /// key was already present, in which case the set is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the node for the key could not be allocated. The set is unchanged.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.insert(1).unwrap(), true);
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1).unwrap(), false);
    /// ```
    pub fn insert(&mut self, key: T) -> Result<bool> {
        let (root, inserted) = tree::insert(&mut self.arena, self.root, key)?;
        if inserted {
            self.root = Some(root);
            self.fix_root();
            self.len += 1;
            trace!("inserted key, set now holds {} keys", self.len);
        }
        Ok(inserted)
    }

    /// Removes a key from the set. If the key exists in the set, it will return the removed
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let (root, removed) = tree::remove(&mut self.arena, self.root, key);
        if removed.is_some() {
            self.root = root;
            self.fix_root();
            self.len -= 1;
            trace!("removed key, set now holds {} keys", self.len);
        }
        removed
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::find(&self.arena, self.root, key).is_some()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    fn key(&self, link: Link) -> Option<&T> {
        link.map(|handle| &self.arena[handle].key)
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.key(tree::floor(&self.arena, self.root, key))
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.key(tree::lower_bound(&self.arena, self.root, key))
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.key(self.root.map(|root| tree::smallest(&self.arena, root)))
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.key(self.root.map(|root| tree::largest(&self.arena, root)))
    }

    fn cursor(&self, node: Link) -> Cursor<'_, T> {
        Cursor { set: self, node }
    }

    /// Returns a cursor positioned at a key equal to `key`, or the end cursor if there is none.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.find(&1).get(), Some(&1));
    /// assert!(set.find(&2) == set.cursor_end());
    /// ```
    pub fn find<V>(&self, key: &V) -> Cursor<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.cursor(tree::find(&self.arena, self.root, key))
    }

    /// Returns a cursor positioned at the first key that is not less than `key`.
    pub fn lower_bound<V>(&self, key: &V) -> Cursor<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.cursor(tree::lower_bound(&self.arena, self.root, key))
    }

    /// Returns a cursor positioned at the first key that is greater than `key`.
    pub fn upper_bound<V>(&self, key: &V) -> Cursor<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.cursor(tree::upper_bound(&self.arena, self.root, key))
    }

    /// Returns a cursor positioned at the minimum key, or the end cursor if the set is empty.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.cursor(self.root.map(|root| tree::smallest(&self.arena, root)))
    }

    /// Returns a cursor positioned at the maximum key, or the end cursor if the set is empty.
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        self.cursor(self.root.map(|root| tree::largest(&self.arena, root)))
    }

    /// Returns the cursor positioned one past the maximum key.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        self.cursor(None)
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<'_, T> {
        AvlSetIter {
            arena: &self.arena,
            front: self.cursor_front().node,
            back: self.cursor_back().node,
            remaining: self.len,
        }
    }

    /// Returns `true` if every key of the set is also a key of `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        if self.len > other.len {
            return false;
        }
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        while let (Some(&l), Some(&r)) = (left.peek(), right.peek()) {
            match l.cmp(r) {
                Ordering::Less => return false,
                Ordering::Greater => {
                    right.next();
                },
                Ordering::Equal => {
                    left.next();
                    right.next();
                },
            }
        }
        left.peek().is_none()
    }
}

impl<T> AvlSet<T>
where
    T: Ord + Clone,
{
    fn empty_like(&self) -> Self {
        AvlSet::with_chunk_size(self.arena.chunk_size())
    }

    /// Returns a copy of the set.
    pub fn try_clone(&self) -> Result<Self> {
        let mut ret = self.empty_like();
        for key in self {
            ret.insert(key.clone())?;
        }
        Ok(ret)
    }

    /// Returns a new set containing the keys that are in `self` or in `other`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let n = AvlSet::try_from_iter(vec![1, 2]).unwrap();
    /// let m = AvlSet::try_from_iter(vec![2, 3]).unwrap();
    ///
    /// let union = n.union(&m).unwrap();
    /// assert_eq!(union.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn union(&self, other: &Self) -> Result<Self> {
        if ptr::eq(self, other) {
            return self.try_clone();
        }
        let mut ret = self.empty_like();
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        while let (Some(&l), Some(&r)) = (left.peek(), right.peek()) {
            match l.cmp(r) {
                Ordering::Less => {
                    ret.insert(l.clone())?;
                    left.next();
                },
                Ordering::Greater => {
                    ret.insert(r.clone())?;
                    right.next();
                },
                Ordering::Equal => {
                    ret.insert(l.clone())?;
                    left.next();
                    right.next();
                },
            }
        }
        for key in left.chain(right) {
            ret.insert(key.clone())?;
        }
        Ok(ret)
    }

    /// Returns a new set containing the keys that are in both `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let n = AvlSet::try_from_iter(vec![1, 2]).unwrap();
    /// let m = AvlSet::try_from_iter(vec![2, 3]).unwrap();
    ///
    /// let inter = n.intersection(&m).unwrap();
    /// assert_eq!(inter.iter().collect::<Vec<&u32>>(), vec![&2]);
    /// ```
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        if ptr::eq(self, other) {
            return self.try_clone();
        }
        let mut ret = self.empty_like();
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        while let (Some(&l), Some(&r)) = (left.peek(), right.peek()) {
            match l.cmp(r) {
                Ordering::Less => {
                    left.next();
                },
                Ordering::Greater => {
                    right.next();
                },
                Ordering::Equal => {
                    ret.insert(l.clone())?;
                    left.next();
                    right.next();
                },
            }
        }
        Ok(ret)
    }

    /// Returns a new set containing the keys that are in `self` but not in `other`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let n = AvlSet::try_from_iter(vec![1, 2]).unwrap();
    /// let m = AvlSet::try_from_iter(vec![2, 3]).unwrap();
    ///
    /// let difference = n.difference(&m).unwrap();
    /// assert_eq!(difference.iter().collect::<Vec<&u32>>(), vec![&1]);
    /// ```
    pub fn difference(&self, other: &Self) -> Result<Self> {
        let mut ret = self.empty_like();
        if ptr::eq(self, other) {
            return Ok(ret);
        }
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        while let (Some(&l), Some(&r)) = (left.peek(), right.peek()) {
            match l.cmp(r) {
                Ordering::Less => {
                    ret.insert(l.clone())?;
                    left.next();
                },
                Ordering::Greater => {
                    right.next();
                },
                Ordering::Equal => {
                    left.next();
                    right.next();
                },
            }
        }
        for key in left {
            ret.insert(key.clone())?;
        }
        Ok(ret)
    }

    /// Returns a new set containing the keys that are in exactly one of `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let n = AvlSet::try_from_iter(vec![1, 2]).unwrap();
    /// let m = AvlSet::try_from_iter(vec![2, 3]).unwrap();
    ///
    /// let symmetric_difference = n.symmetric_difference(&m).unwrap();
    /// assert_eq!(symmetric_difference.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// ```
    pub fn symmetric_difference(&self, other: &Self) -> Result<Self> {
        let mut ret = self.empty_like();
        if ptr::eq(self, other) {
            return Ok(ret);
        }
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        while let (Some(&l), Some(&r)) = (left.peek(), right.peek()) {
            match l.cmp(r) {
                Ordering::Less => {
                    ret.insert(l.clone())?;
                    left.next();
                },
                Ordering::Greater => {
                    ret.insert(r.clone())?;
                    right.next();
                },
                Ordering::Equal => {
                    left.next();
                    right.next();
                },
            }
        }
        for key in left.chain(right) {
            ret.insert(key.clone())?;
        }
        Ok(ret)
    }
}

impl<T> IntoIterator for AvlSet<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = AvlSetIntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut handles = Vec::with_capacity(self.len);
        let mut curr = self.cursor_front().node;
        while let Some(handle) = curr {
            handles.push(handle);
            curr = node::next_node(&self.arena, handle);
        }

        let keys: Vec<T> = handles
            .iter()
            .map(|handle| self.arena.free(handle).key)
            .collect();
        Self::IntoIter {
            keys: keys.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = AvlSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct AvlSetIntoIter<T> {
    keys: vec::IntoIter<T>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> DoubleEndedIterator for AvlSetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back()
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references. It
/// follows parent links, so it needs no stack.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    arena: &'a Arena<T>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = node::next_node(self.arena, handle);
        Some(&self.arena[handle].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = node::prev_node(self.arena, handle);
        Some(&self.arena[handle].key)
    }
}

impl<'a, T> ExactSizeIterator for AvlSetIter<'a, T> where T: 'a {}

/// A bidirectional position in an `AvlSet<T>`.
///
/// A cursor either points at a key or at the end position one past the maximum key. Moving
/// forward from the end stays at the end; moving backward from the end goes to the maximum key;
/// moving backward from the minimum key stays there. Two cursors are equal only if they belong
/// to the same set and point at the same position.
///
/// # Examples
/// ```
/// use avl_set::avl_tree::AvlSet;
///
/// let set = AvlSet::try_from_iter(vec![1, 2]).unwrap();
///
/// let mut cursor = set.cursor_end();
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some(&2));
/// cursor.move_prev();
/// assert!(cursor == set.cursor_front());
/// cursor.move_next();
/// cursor.move_next();
/// assert!(cursor == set.cursor_end());
/// ```
pub struct Cursor<'a, T>
where
    T: 'a,
{
    set: &'a AvlSet<T>,
    node: Link,
}

impl<'a, T> Cursor<'a, T>
where
    T: 'a + Ord,
{
    /// Returns the key at the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        let set = self.set;
        self.node.map(|handle| &set.arena[handle].key)
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Moves the cursor to the next key in order, or to the end position after the maximum key.
    pub fn move_next(&mut self) {
        if let Some(handle) = self.node {
            self.node = node::next_node(&self.set.arena, handle);
        }
    }

    /// Moves the cursor to the previous key in order. From the end position this is the maximum
    /// key; at the minimum key the cursor does not move.
    pub fn move_prev(&mut self) {
        match self.node {
            None => self.node = self.set.cursor_back().node,
            Some(handle) => {
                if let Some(prev) = node::prev_node(&self.set.arena, handle) {
                    self.node = Some(prev);
                }
            },
        }
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Cursor<'a, T>) -> bool {
        ptr::eq(self.set, other.set) && self.node == other.node
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<T> PartialEq for AvlSet<T>
where
    T: Ord,
{
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for AvlSet<T> where T: Ord {}

impl<T> fmt::Debug for AvlSet<T>
where
    T: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for AvlSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::AvlSet;
    use crate::arena::Error;
    use crate::avl_tree::tree::tests::assert_valid;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn set_of(keys: &[i32]) -> AvlSet<i32> {
        AvlSet::try_from_iter(keys.iter().cloned()).unwrap()
    }

    fn keys_of(set: &AvlSet<i32>) -> Vec<i32> {
        set.iter().cloned().collect()
    }

    fn assert_set_valid<T: Ord>(set: &AvlSet<T>) {
        assert_eq!(assert_valid(&set.arena, set.root), set.len());
    }

    #[test]
    fn test_len_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert_ignores_duplicates() {
        let mut set = AvlSet::new();
        for key in &[10, 6, 6, 7, 9, 9, 8, 11] {
            set.insert(*key).unwrap();
            assert_set_valid(&set);
        }
        assert_eq!(keys_of(&set), vec![6, 7, 8, 9, 10, 11]);
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_remove_sequence() {
        let mut set = set_of(&[3, 7, -1, 16, 11, 4]);
        let steps = vec![
            (7, vec![-1, 3, 4, 11, 16]),
            (16, vec![-1, 3, 4, 11]),
            (3, vec![-1, 4, 11]),
            (11, vec![-1, 4]),
            (-1, vec![4]),
            (4, vec![]),
        ];
        for (key, expected) in steps {
            assert_eq!(set.remove(&key), Some(key));
            assert_set_valid(&set);
            assert_eq!(set.len(), expected.len());
            assert_eq!(keys_of(&set), expected);
        }
        assert!(set.cursor_front() == set.cursor_end());
    }

    #[test]
    fn test_remove_absent() {
        let mut set = set_of(&[1, 2, 3]);
        assert_eq!(set.remove(&4), None);
        assert_eq!(set.len(), 3);
        assert_set_valid(&set);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut set = AvlSet::new();
        set.insert(String::from("b")).unwrap();
        set.insert(String::from("a")).unwrap();
        assert!(set.contains("a"));
        assert_eq!(set.find("b").get().map(String::as_str), Some("b"));
        assert_eq!(set.remove("a"), Some(String::from("a")));
    }

    #[test]
    fn test_floor_ceil() {
        let set = set_of(&[1, 3, 5]);

        assert_eq!(set.floor(&0), None);
        assert_eq!(set.floor(&2), Some(&1));
        assert_eq!(set.floor(&4), Some(&3));
        assert_eq!(set.floor(&6), Some(&5));

        assert_eq!(set.ceil(&0), Some(&1));
        assert_eq!(set.ceil(&2), Some(&3));
        assert_eq!(set.ceil(&4), Some(&5));
        assert_eq!(set.ceil(&6), None);
    }

    #[test]
    fn test_bounds() {
        let set = set_of(&[1, 3, 5]);
        assert_eq!(set.lower_bound(&3).get(), Some(&3));
        assert_eq!(set.upper_bound(&3).get(), Some(&5));
        assert!(set.upper_bound(&5).is_end());
    }

    #[test]
    fn test_cursor_walk() {
        let set = set_of(&[6, 10]);
        let mut cursor = set.cursor_front();
        assert_eq!(cursor.get(), Some(&6));
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&10));
        cursor.move_next();
        assert!(cursor == set.cursor_end());
        cursor.move_next();
        assert!(cursor.is_end());

        cursor.move_prev();
        assert!(cursor == set.cursor_back());
        cursor.move_prev();
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&6));
    }

    #[test]
    fn test_cursor_identity() {
        let a = set_of(&[1]);
        let b = set_of(&[1]);
        assert!(a.cursor_end() != b.cursor_end());
        assert!(a.find(&1) == a.cursor_front());
        assert!(a.find(&1) != b.find(&1));
        assert!(a.find(&2) == a.cursor_end());
    }

    #[test]
    fn test_iter_both_ends() {
        let set = set_of(&[1, 2, 3, 4]);
        let mut iter = set.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_into_iter() {
        let set = set_of(&[1, 5, 3]);
        assert_eq!(set.into_iter().collect::<Vec<i32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_clear() {
        let mut set = set_of(&[1, 2]);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.min(), None);
        set.insert(3).unwrap();
        assert_set_valid(&set);
    }

    #[test]
    fn test_set_algebra() {
        let a = set_of(&[1, 2, 3, 4]);
        let b = set_of(&[4, 5, 6]);

        assert_eq!(keys_of(&a.union(&b).unwrap()), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(keys_of(&a.intersection(&b).unwrap()), vec![4]);
        assert_eq!(keys_of(&a.difference(&b).unwrap()), vec![1, 2, 3]);
        assert_eq!(keys_of(&b.difference(&a).unwrap()), vec![5, 6]);
        assert_eq!(
            keys_of(&a.symmetric_difference(&b).unwrap()),
            vec![1, 2, 3, 5, 6],
        );
        assert_eq!(keys_of(&a), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_set_algebra_with_self() {
        let a = set_of(&[1, 2, 3]);
        assert_eq!(a.union(&a).unwrap(), a);
        assert_eq!(a.intersection(&a).unwrap(), a);
        assert!(a.difference(&a).unwrap().is_empty());
        assert!(a.symmetric_difference(&a).unwrap().is_empty());
    }

    #[test]
    fn test_is_subset() {
        let a = set_of(&[1, 2]);
        let b = set_of(&[1, 2, 3]);
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(AvlSet::new().is_subset(&a));
    }

    #[test]
    fn test_is_subset_interleaved() {
        let a = set_of(&[2, 4]);
        assert!(a.is_subset(&set_of(&[1, 2, 3, 4, 5])));
        assert!(!a.is_subset(&set_of(&[1, 2, 3, 5, 6])));
        assert!(!set_of(&[7]).is_subset(&set_of(&[1, 2, 3])));
        assert!(a.is_subset(&a));
    }

    #[test]
    fn test_union_overlapping() {
        let a = set_of(&[1, 3, 5, 7]);
        let b = set_of(&[2, 3, 6, 7, 9]);
        let union = a.union(&b).unwrap();
        assert_set_valid(&union);
        assert_eq!(keys_of(&union), vec![1, 2, 3, 5, 6, 7, 9]);
        assert_eq!(union.len(), 7);
    }

    #[test]
    fn test_insert_alloc_failure_leaves_set_unchanged() {
        let mut set: AvlSet<u64> = AvlSet::with_chunk_size(usize::max_value() / 2);
        match set.insert(1) {
            Err(Error::AllocError(_)) => {},
            _ => panic!("Expected an allocation error."),
        }
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert!(!set.contains(&1));
        assert!(set.cursor_front() == set.cursor_end());
        assert_set_valid(&set);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", set_of(&[2, 1])), "{1, 2}");
    }

    proptest! {
        #[test]
        fn prop_matches_btree_set(
            ops in prop::collection::vec((any::<bool>(), -32i32..32), 0..200),
        ) {
            let mut set = AvlSet::with_chunk_size(4);
            let mut expected = BTreeSet::new();
            for (is_insert, key) in ops {
                if is_insert {
                    prop_assert_eq!(set.insert(key).unwrap(), expected.insert(key));
                } else {
                    prop_assert_eq!(set.remove(&key).is_some(), expected.remove(&key));
                }
                assert_set_valid(&set);
                prop_assert_eq!(set.len(), expected.len());
            }
            prop_assert_eq!(keys_of(&set), expected.iter().cloned().collect::<Vec<_>>());
            prop_assert_eq!(
                set.iter().rev().cloned().collect::<Vec<_>>(),
                expected.iter().rev().cloned().collect::<Vec<_>>(),
            );
        }

        #[test]
        fn prop_set_algebra_laws(
            a in prop::collection::btree_set(0i32..48, 0..32),
            b in prop::collection::btree_set(0i32..48, 0..32),
        ) {
            let x = AvlSet::try_from_iter(a.iter().cloned()).unwrap();
            let y = AvlSet::try_from_iter(b.iter().cloned()).unwrap();

            let union = x.union(&y).unwrap();
            let intersection = x.intersection(&y).unwrap();
            let difference = x.difference(&y).unwrap();
            assert_set_valid(&union);
            assert_set_valid(&intersection);
            assert_set_valid(&difference);

            prop_assert_eq!(union.len(), x.len() + y.len() - intersection.len());
            prop_assert_eq!(intersection.len() + difference.len(), x.len());
            for key in &x {
                prop_assert!(intersection.contains(key) != difference.contains(key));
                prop_assert_eq!(intersection.contains(key), y.contains(key));
            }
            prop_assert_eq!(keys_of(&union), a.union(&b).cloned().collect::<Vec<_>>());
            prop_assert_eq!(
                keys_of(&x.symmetric_difference(&y).unwrap()),
                a.symmetric_difference(&b).cloned().collect::<Vec<_>>(),
            );
        }
    }
}
