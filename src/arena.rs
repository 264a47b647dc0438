//! Chunked typed arena that backs the nodes of a tree.
//!
//! Objects are addressed by a copyable `Handle` instead of a pointer, so a node can refer to its
//! children and to its parent without any ownership cycle.

use log::{debug, warn};
use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};
use std::result;
use std::vec::Vec;

/// An error raised when the arena cannot reserve memory for a new chunk.
#[derive(Debug)]
pub enum Error {
    AllocError(TryReserveError),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::AllocError(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::AllocError(error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::AllocError(error) => write!(f, "arena allocation failed: {}", error),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// A handle to an object stored in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object.
///
/// Storage grows one chunk at a time, so objects never move once allocated. Freed blocks are
/// kept on a free list and reused by later allocations. Growing the arena is fallible: if the
/// memory for a new chunk cannot be reserved, `try_allocate` returns an error and leaves the
/// arena exactly as it was.
///
/// # Examples
///
/// ```
/// use avl_set::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.try_allocate(1).unwrap();
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: &Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    fn grow(&mut self) -> Result<()> {
        let mut chunk = Vec::new();
        if let Err(err) = chunk
            .try_reserve_exact(self.chunk_size)
            .and_then(|_| self.chunks.try_reserve(1))
        {
            warn!("failed to reserve a chunk of {} blocks: {}", self.chunk_size, err);
            return Err(Error::from(err));
        }
        self.chunks.push(chunk);
        self.capacity += self.chunk_size;
        debug!(
            "arena grew to {} chunks ({} blocks)",
            self.chunks.len(),
            self.capacity,
        );
        Ok(())
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Returns the number of objects per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates an object in the arena and returns its `Handle`. Returns an error if a new chunk
    /// was needed and could not be reserved, in which case the arena is unchanged and `value` is
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.try_allocate(0).unwrap();
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn try_allocate(&mut self, value: T) -> Result<Handle> {
        if let Some(handle) = self.head.take() {
            let vacant_block = mem::replace(
                &mut self.chunks[handle.chunk_index][handle.block_index],
                Block::Occupied(value),
            );
            self.head = match vacant_block {
                Block::Vacant(next_handle) => next_handle,
                Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
            };
            self.len += 1;
            return Ok(handle);
        }

        if self.len == self.capacity {
            self.grow()?;
        }
        self.len += 1;

        let chunk_index = self.chunks.len() - 1;
        let last_chunk = &mut self.chunks[chunk_index];
        last_chunk.push(Block::Occupied(value));
        Ok(Handle {
            chunk_index,
            block_index: last_chunk.len() - 1,
        })
    }

    /// Deallocates an object in the arena and returns it. The block is reused by the next
    /// allocation.
    ///
    /// # Panics
    ///
    /// Panics if `handle` corresponds to an invalid or vacant block.
    pub fn free(&mut self, handle: &Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let block = &mut self.chunks[handle.chunk_index][handle.block_index];
        if let Block::Vacant(_) = block {
            panic!("Error: attempting to free vacant block.");
        }
        match mem::replace(block, Block::Vacant(self.head.take())) {
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(*handle);
                value
            },
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// does not correspond to a live object.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a live object.
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Drops every object in the arena and releases its chunks.
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle does not refer to a live block.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle does not refer to a live block.")
    }
}
