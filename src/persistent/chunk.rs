//! Persistent (immutable) sequence backed by a balanced concatenation tree.
//!
//! This module provides [`Chunk`], an immutable sequence that uses
//! structural sharing for efficient operations.
//!
//! # Overview
//!
//! `Chunk` represents a sequence as a small tree over contiguous runs of
//! elements. Concatenation joins two trees under a balancing discipline
//! instead of copying, and slicing wraps a lazy window around a run
//! instead of copying. It provides:
//!
//! - O(1) `clone`, `len` and `is_empty`
//! - Amortized O(1) `append` and `prepend`
//! - O(log N) `concat` with a bounded tree height
//! - O(1) `take`, `skip` and `slice`
//! - O(log N) random access before flattening, O(1) after
//!
//! All operations return new sequences without modifying the original,
//! and structural sharing keeps old versions cheap.
//!
//! # Internal Structure
//!
//! A handle consists of:
//! - A backing node: empty, a single element, a contiguous run, a binary
//!   concatenation, or a lazy slice window
//! - Cached `length` and `depth`, derived once at construction
//!
//! The first whole-sequence read (iteration, `as_slice`, equality)
//! flattens the tree into one contiguous array which is memoized inside
//! the shared node, so every clone of the handle benefits and later reads
//! are O(1). Flattening never changes the observable value.
//!
//! # Examples
//!
//! ```rust
//! use imseq::persistent::Chunk;
//!
//! let sequence: Chunk<i32> = (1..=3).collect();
//! let extended = sequence.append(4);
//!
//! assert_eq!(sequence.len(), 3);    // Original unchanged
//! assert_eq!(extended.len(), 4);    // New sequence
//! assert_eq!(extended.to_vec(), vec![1, 2, 3, 4]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Index;

use super::{MaterializeCell, ReferenceCounter};

use crate::typeclass::{Foldable, Functor, Monoid, Semigroup, TypeConstructor};

use super::non_empty::NonEmptyChunk;

// =============================================================================
// Error Definition
// =============================================================================

/// Error raised by positional access outside `[0, length)`.
///
/// Returned by [`Chunk::get_checked`] and rendered by the panic message of
/// the [`Index`] implementation. Safe accessors ([`Chunk::get`],
/// [`Chunk::update`], [`Chunk::modify`]) report the same condition as
/// `None` instead.
///
/// # Examples
///
/// ```rust
/// use imseq::persistent::{Chunk, IndexOutOfBounds};
///
/// let sequence: Chunk<i32> = (1..=3).collect();
/// assert_eq!(
///     sequence.get_checked(10),
///     Err(IndexOutOfBounds { index: 10, length: 3 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The offending index.
    pub index: usize,
    /// The length of the sequence at the time of the access.
    pub length: usize,
}

impl fmt::Display for IndexOutOfBounds {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "index {} out of bounds for sequence of length {}",
            self.index, self.length
        )
    }
}

impl std::error::Error for IndexOutOfBounds {}

// =============================================================================
// Backing Node Definitions
// =============================================================================

/// Backing node of a sequence handle.
///
/// `Empty` is the unique representation of length 0 and is stored inline,
/// so empty sequences never allocate. The remaining kinds sit behind a
/// reference counter and are shared between versions.
enum Backing<T> {
    /// No elements.
    Empty,
    /// Exactly one element.
    Singleton(ReferenceCounter<T>),
    /// A materialized contiguous run.
    Array(ReferenceCounter<[T]>),
    /// A binary join of two non-empty sequences.
    Concat(ReferenceCounter<ConcatNode<T>>),
    /// A lazy window into another sequence.
    Slice(ReferenceCounter<SliceNode<T>>),
}

/// Join node. Both children are non-empty; an empty operand is simplified
/// away at construction time and never stored.
struct ConcatNode<T> {
    left: Chunk<T>,
    right: Chunk<T>,
    /// Memoized flattening of the whole subtree, set at most once.
    flat: MaterializeCell<ReferenceCounter<[T]>>,
}

/// Window node. `source` is never itself a slice: slicing a slice adjusts
/// the window arithmetically instead of nesting.
struct SliceNode<T> {
    source: Chunk<T>,
    offset: usize,
    flat: MaterializeCell<ReferenceCounter<[T]>>,
}

// Manual impl: cloning only bumps reference counts, so no `T: Clone`
// bound is required and clone stays O(1) for every node kind.
impl<T> Clone for Backing<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Singleton(value) => Self::Singleton(value.clone()),
            Self::Array(values) => Self::Array(values.clone()),
            Self::Concat(node) => Self::Concat(node.clone()),
            Self::Slice(node) => Self::Slice(node.clone()),
        }
    }
}

// =============================================================================
// Chunk Definition
// =============================================================================

/// A persistent (immutable) sequence backed by a balanced concatenation
/// tree.
///
/// `Chunk` is an immutable data structure that uses structural sharing to
/// efficiently support functional programming patterns. Joining and
/// windowing are cheap tree operations; the first whole-sequence read
/// flattens the tree once into a cached contiguous array.
///
/// # Time Complexity
///
/// | Operation   | Complexity                       |
/// |-------------|----------------------------------|
/// | `empty`     | O(1), allocation-free            |
/// | `clone`     | O(1)                             |
/// | `len`       | O(1)                             |
/// | `get`       | O(log N), O(1) after flattening  |
/// | `concat`    | O(log N)                         |
/// | `append`    | amortized O(1)                   |
/// | `take`/`skip` | O(1) plus O(depth) rewriting   |
/// | `as_slice`  | O(N) once, then O(1)             |
///
/// # Examples
///
/// ```rust
/// use imseq::persistent::Chunk;
///
/// let sequence: Chunk<i32> = (0..100).collect();
/// assert_eq!(sequence.len(), 100);
/// assert_eq!(sequence.get(50), Some(&50));
/// ```
pub struct Chunk<T> {
    /// Total number of elements.
    length: usize,
    /// Height of the backing tree; drives concatenation balancing only.
    depth: usize,
    /// Backing node.
    backing: Backing<T>,
}

impl<T> Clone for Chunk<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            depth: self.depth,
            backing: self.backing.clone(),
        }
    }
}

// =============================================================================
// Construction and Access
// =============================================================================

impl<T> Chunk<T> {
    /// Creates the empty sequence.
    ///
    /// The empty backing is a zero-sized variant stored inline, so this
    /// never allocates and every empty handle is canonical.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = Chunk::empty();
    /// assert!(sequence.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            length: 0,
            depth: 0,
            backing: Backing::Empty,
        }
    }

    /// Creates a sequence containing a single element.
    ///
    /// The result is a [`NonEmptyChunk`], recording the non-emptiness in
    /// the type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence = Chunk::of(42);
    /// assert_eq!(sequence.len(), 1);
    /// assert_eq!(sequence.head(), &42);
    /// ```
    #[inline]
    #[must_use]
    pub fn of(element: T) -> NonEmptyChunk<T> {
        NonEmptyChunk::new_unchecked(Self::singleton(element))
    }

    /// Creates a sequence by moving an existing buffer, without copying.
    ///
    /// Ownership of the buffer transfers into the sequence, so no later
    /// aliasing of the storage is possible. Length 0 routes to
    /// [`Chunk::empty`] and length 1 to a single-element node, keeping
    /// those representations canonical.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence = Chunk::from_vec(vec![1, 2, 3]);
    /// assert_eq!(sequence.len(), 3);
    /// assert_eq!(sequence.get(0), Some(&1));
    /// ```
    #[must_use]
    pub fn from_vec(mut values: Vec<T>) -> Self {
        match values.len() {
            0 => Self::empty(),
            1 => match values.pop() {
                Some(element) => Self::singleton(element),
                None => Self::empty(),
            },
            length => Self {
                length,
                depth: 0,
                backing: Backing::Array(ReferenceCounter::from(values)),
            },
        }
    }

    /// Creates a sequence of `count` elements produced by `function`,
    /// applied to the indices `0..count`.
    ///
    /// `count == 0` yields the empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let squares = Chunk::make_by(4, |index| index * index);
    /// assert_eq!(squares.to_vec(), vec![0, 1, 4, 9]);
    /// ```
    #[must_use]
    pub fn make_by<F>(count: usize, function: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_vec((0..count).map(function).collect())
    }

    /// Returns the number of elements in the sequence.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the height of the backing tree.
    ///
    /// Depth is 0 for empty, single-element and contiguous sequences and
    /// grows with concatenation; the balancing discipline keeps it within
    /// O(log N) of the element count. It exists to drive rebalancing and
    /// has no effect on the observable value.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(depth) before flattening, O(1) afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=5).collect();
    /// assert_eq!(sequence.get(0), Some(&1));
    /// assert_eq!(sequence.get(4), Some(&5));
    /// assert_eq!(sequence.get(10), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.length {
            return None;
        }
        self.lookup(index)
    }

    /// Returns a reference to the element at the given index, or an
    /// [`IndexOutOfBounds`] error carrying the offending index.
    ///
    /// Prefer [`Chunk::get`] unless the error detail is needed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBounds`] when `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<&str> = vec!["a", "b", "c"].into();
    /// assert_eq!(sequence.get_checked(1), Ok(&"b"));
    /// assert!(sequence.get_checked(10).is_err());
    /// ```
    pub fn get_checked(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.get(index).ok_or(IndexOutOfBounds {
            index,
            length: self.length,
        })
    }

    /// Returns a reference to the first element.
    ///
    /// Returns `None` if the sequence is empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the last element.
    ///
    /// Returns `None` if the sequence is empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.length.checked_sub(1).and_then(|index| self.get(index))
    }

    /// Builds the single-element node.
    #[inline]
    pub(crate) fn singleton(element: T) -> Self {
        Self {
            length: 1,
            depth: 0,
            backing: Backing::Singleton(ReferenceCounter::new(element)),
        }
    }

    /// Index dispatch over the node kinds. `index` may be out of range for
    /// defensive callers; the leaf arms bounds-check.
    fn lookup(&self, index: usize) -> Option<&T> {
        match &self.backing {
            Backing::Empty => None,
            Backing::Singleton(value) => {
                if index == 0 {
                    Some(value.as_ref())
                } else {
                    None
                }
            }
            Backing::Array(values) => values.get(index),
            Backing::Concat(node) => {
                if let Some(flat) = node.flat.get() {
                    return flat.get(index);
                }
                if index < node.left.length {
                    node.left.lookup(index)
                } else {
                    node.right.lookup(index - node.left.length)
                }
            }
            Backing::Slice(node) => {
                if let Some(flat) = node.flat.get() {
                    return flat.get(index);
                }
                node.source.lookup(index + node.offset)
            }
        }
    }

    /// Left child of a join node, or the canonical empty handle for every
    /// other node kind.
    fn left_child(&self) -> Self {
        match &self.backing {
            Backing::Concat(node) => node.left.clone(),
            _ => Self::empty(),
        }
    }

    /// Right child of a join node, or the canonical empty handle.
    fn right_child(&self) -> Self {
        match &self.backing {
            Backing::Concat(node) => node.right.clone(),
            _ => Self::empty(),
        }
    }
}

// =============================================================================
// Concatenation Engine
// =============================================================================

impl<T> Chunk<T> {
    /// Concatenates two sequences.
    ///
    /// The result shares both operands structurally. Joining keeps the
    /// backing tree balanced: when one operand's tree is more than one
    /// level deeper than the other, the join rotates into the deeper
    /// side's heavier child (AVL-style single or double rotation) so the
    /// total height stays within O(log N) over any sequence of
    /// concatenations.
    ///
    /// # Complexity
    ///
    /// O(1) when the depths differ by at most one; O(depth difference)
    /// otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let left: Chunk<i32> = vec![1, 2, 3].into();
    /// let right: Chunk<i32> = vec![4, 5, 6].into();
    /// assert_eq!(left.concat(&right).to_vec(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    #[must_use]
    pub fn concat(&self, that: &Self) -> Self {
        if self.is_empty() {
            return that.clone();
        }
        if that.is_empty() {
            return self.clone();
        }

        if self.depth.abs_diff(that.depth) <= 1 {
            return Self::join(self.clone(), that.clone());
        }

        if self.depth > that.depth {
            // Left side too deep: rotate into `self`'s heavier child.
            let left = self.left_child();
            let right = self.right_child();
            if left.depth >= right.depth {
                let joined = right.concat(that);
                Self::join(left, joined)
            } else if matches!(right.backing, Backing::Concat(_)) {
                let right_left = right.left_child();
                let joined = right.right_child().concat(that);
                if joined.depth + 3 == self.depth {
                    // The rotation fully absorbed the skew.
                    Self::join(left, Self::join(right_left, joined))
                } else {
                    Self::join(Self::join(left, right_left), joined)
                }
            } else {
                // `right` is a leaf or window and has no children to
                // rotate through; its depth is at most 1, so a plain
                // join keeps the height bounded.
                Self::join(self.clone(), that.clone())
            }
        } else {
            // Mirror case: rotate into `that`'s heavier child.
            let left = that.left_child();
            let right = that.right_child();
            if right.depth >= left.depth {
                let joined = self.concat(&left);
                Self::join(joined, right)
            } else if matches!(left.backing, Backing::Concat(_)) {
                let left_right = left.right_child();
                let joined = self.concat(&left.left_child());
                if joined.depth + 3 == that.depth {
                    Self::join(Self::join(joined, left_right), right)
                } else {
                    Self::join(joined, Self::join(left_right, right))
                }
            } else {
                Self::join(self.clone(), that.clone())
            }
        }
    }

    /// Appends one element to the end of the sequence.
    ///
    /// This is concatenation with a single-element sequence, so the
    /// balancing discipline gives it amortized O(1) cost, and the result
    /// is statically non-empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = vec![1, 2].into();
    /// let extended = sequence.append(3);
    /// assert_eq!(extended.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(sequence.len(), 2);
    /// ```
    #[must_use]
    pub fn append(&self, element: T) -> NonEmptyChunk<T> {
        NonEmptyChunk::new_unchecked(self.concat(&Self::singleton(element)))
    }

    /// Prepends one element to the front of the sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = vec![2, 3].into();
    /// assert_eq!(sequence.prepend(1).to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn prepend(&self, element: T) -> NonEmptyChunk<T> {
        NonEmptyChunk::new_unchecked(Self::singleton(element).concat(self))
    }

    /// Builds a join node, simplifying away empty operands so that a join
    /// never stores an empty child.
    fn join(left: Self, right: Self) -> Self {
        if left.is_empty() {
            return right;
        }
        if right.is_empty() {
            return left;
        }
        Self {
            length: left.length + right.length,
            depth: 1 + left.depth.max(right.depth),
            backing: Backing::Concat(ReferenceCounter::new(ConcatNode {
                left,
                right,
                flat: MaterializeCell::new(),
            })),
        }
    }
}

// =============================================================================
// Slicing Engine
// =============================================================================

impl<T> Chunk<T> {
    /// Returns the first `count` elements as a new sequence.
    ///
    /// `count >= self.len()` returns the whole sequence and `count == 0`
    /// the empty one. No elements are copied: window nodes are adjusted
    /// arithmetically, join nodes recurse into the affected child only,
    /// and contiguous runs are wrapped in a fresh window.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=5).collect();
    /// assert_eq!(sequence.take(3).to_vec(), vec![1, 2, 3]);
    /// assert_eq!(sequence.take(9).len(), 5);
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        if count == 0 {
            return Self::empty();
        }
        if count >= self.length {
            return self.clone();
        }
        match &self.backing {
            // Slices of slices collapse against the same ultimate source.
            Backing::Slice(node) => Self::window(node.source.clone(), node.offset, count),
            Backing::Concat(node) => {
                if count <= node.left.length {
                    node.left.take(count)
                } else {
                    Self::join(node.left.clone(), node.right.take(count - node.left.length))
                }
            }
            _ => Self::window(self.clone(), 0, count),
        }
    }

    /// Returns the sequence without its first `count` elements.
    ///
    /// `count == 0` returns the whole sequence and `count >= self.len()`
    /// the empty one. Like [`Chunk::take`], this copies nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=5).collect();
    /// assert_eq!(sequence.skip(3).to_vec(), vec![4, 5]);
    /// assert_eq!(sequence.skip(9).len(), 0);
    /// ```
    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        if count == 0 {
            return self.clone();
        }
        if count >= self.length {
            return Self::empty();
        }
        match &self.backing {
            Backing::Slice(node) => {
                Self::window(node.source.clone(), node.offset + count, self.length - count)
            }
            Backing::Concat(node) => {
                if count >= node.left.length {
                    node.right.skip(count - node.left.length)
                } else {
                    Self::join(node.left.skip(count), node.right.clone())
                }
            }
            _ => Self::window(self.clone(), count, self.length - count),
        }
    }

    /// Returns the last `count` elements as a new sequence.
    #[inline]
    #[must_use]
    pub fn take_last(&self, count: usize) -> Self {
        self.skip(self.length.saturating_sub(count))
    }

    /// Returns the sequence without its last `count` elements.
    #[inline]
    #[must_use]
    pub fn skip_last(&self, count: usize) -> Self {
        self.take(self.length.saturating_sub(count))
    }

    /// Returns the window `start..end` as a new sequence.
    ///
    /// Degenerate bounds clamp: `end` is limited to the length and
    /// `start` to `end`, so crossed or oversized bounds yield a shorter or
    /// empty sequence rather than an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=5).collect();
    /// assert_eq!(sequence.slice(1, 4).to_vec(), vec![2, 3, 4]);
    /// assert_eq!(sequence.slice(4, 1).len(), 0);
    /// ```
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.length);
        let start = start.min(end);
        self.skip(start).take(end - start)
    }

    /// Splits the sequence at `index` into the elements before and from
    /// that position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=5).collect();
    /// let (front, back) = sequence.split_at(2);
    /// assert_eq!(front.to_vec(), vec![1, 2]);
    /// assert_eq!(back.to_vec(), vec![3, 4, 5]);
    /// ```
    #[must_use]
    pub fn split_at(&self, index: usize) -> (Self, Self) {
        (self.take(index), self.skip(index))
    }

    /// Builds a window node.
    ///
    /// Callers guarantee `offset + length <= source.len()` and that
    /// `source` is not itself a window, so windows never nest.
    fn window(source: Self, offset: usize, length: usize) -> Self {
        Self {
            length,
            depth: source.depth + 1,
            backing: Backing::Slice(ReferenceCounter::new(SliceNode {
                source,
                offset,
                flat: MaterializeCell::new(),
            })),
        }
    }
}

// =============================================================================
// Materialization
// =============================================================================

impl<T: Clone> Chunk<T> {
    /// Creates a sequence by cloning the elements of a slice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence = Chunk::from_slice(&[1, 2, 3]);
    /// assert_eq!(sequence.len(), 3);
    /// ```
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::from_vec(slice.to_vec())
    }

    /// Returns the elements as one contiguous slice.
    ///
    /// Empty, single-element and contiguous sequences return their
    /// storage directly. Join and window nodes are flattened on the first
    /// call: the elements are copied in logical order into a fresh array
    /// that is memoized inside the shared node, so the cost is paid once
    /// per node no matter how many handles share it. The observable value
    /// never changes.
    ///
    /// # Complexity
    ///
    /// O(N) on the first call for a lazy node, O(1) afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let left: Chunk<i32> = vec![1, 2].into();
    /// let joined = left.concat(&vec![3].into());
    /// assert_eq!(joined.as_slice(), &[1, 2, 3]);
    /// // Second call reuses the cached array.
    /// assert_eq!(joined.as_slice(), &[1, 2, 3]);
    /// ```
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match &self.backing {
            Backing::Empty => &[],
            Backing::Singleton(value) => std::slice::from_ref(value.as_ref()),
            Backing::Array(values) => values,
            Backing::Concat(node) => node.flat.get_or_init(|| self.flatten()),
            Backing::Slice(node) => node.flat.get_or_init(|| self.flatten()),
        }
    }

    /// Returns the elements as a fresh `Vec` in logical order.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Returns an iterator over references to the elements.
    ///
    /// Iteration forces flattening once; re-iterating afterwards starts
    /// over at O(1) setup cost.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=3).collect();
    /// let collected: Vec<&i32> = sequence.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> ChunkIterator<'_, T> {
        ChunkIterator {
            inner: self.as_slice().iter(),
        }
    }

    /// Copies the whole subtree into a shared array, in logical order.
    fn flatten(&self) -> ReferenceCounter<[T]> {
        let mut flat = Vec::with_capacity(self.length);
        self.write_range(&mut flat, 0, self.length);
        ReferenceCounter::from(flat)
    }

    /// Appends the elements of the logical window `offset..offset + length`
    /// of this sequence to `out`.
    fn write_range(&self, out: &mut Vec<T>, offset: usize, length: usize) {
        if length == 0 {
            return;
        }
        match &self.backing {
            Backing::Empty => {}
            Backing::Singleton(value) => out.push(value.as_ref().clone()),
            Backing::Array(values) => out.extend_from_slice(&values[offset..offset + length]),
            Backing::Concat(node) => {
                if let Some(flat) = node.flat.get() {
                    out.extend_from_slice(&flat[offset..offset + length]);
                    return;
                }
                let left_length = node.left.length;
                if offset + length <= left_length {
                    node.left.write_range(out, offset, length);
                } else if offset >= left_length {
                    node.right.write_range(out, offset - left_length, length);
                } else {
                    let from_left = left_length - offset;
                    node.left.write_range(out, offset, from_left);
                    node.right.write_range(out, 0, length - from_left);
                }
            }
            Backing::Slice(node) => {
                if let Some(flat) = node.flat.get() {
                    out.extend_from_slice(&flat[offset..offset + length]);
                    return;
                }
                node.source.write_range(out, node.offset + offset, length);
            }
        }
    }
}

// =============================================================================
// Updates
// =============================================================================

impl<T: Clone> Chunk<T> {
    /// Returns a new sequence with the element at `index` replaced.
    ///
    /// Returns `None` if the index is out of bounds; the original is
    /// never modified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=3).collect();
    /// let updated = sequence.update(1, 99).unwrap();
    /// assert_eq!(updated.to_vec(), vec![1, 99, 3]);
    /// assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(sequence.update(10, 0), None);
    /// ```
    #[must_use]
    pub fn update(&self, index: usize, element: T) -> Option<Self> {
        if index >= self.length {
            return None;
        }
        let mut values = self.to_vec();
        values[index] = element;
        Some(Self::from_vec(values))
    }

    /// Returns a new sequence with the element at `index` transformed by
    /// `function`.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=3).collect();
    /// let modified = sequence.modify(2, |n| n * 10).unwrap();
    /// assert_eq!(modified.to_vec(), vec![1, 2, 30]);
    /// ```
    #[must_use]
    pub fn modify<F>(&self, index: usize, function: F) -> Option<Self>
    where
        F: FnOnce(&T) -> T,
    {
        let replacement = function(self.get(index)?);
        self.update(index, replacement)
    }
}

// =============================================================================
// Higher-Order Combinators
// =============================================================================
//
// The combinators flatten, run the flat-array algorithm and rewrap the
// result; they add no structural invariants beyond those of the tree.

impl<T: Clone> Chunk<T> {
    /// Returns a new sequence with `function` applied to every element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=3).collect();
    /// assert_eq!(sequence.map(|n| n * 2).to_vec(), vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn map<B, F>(&self, function: F) -> Chunk<B>
    where
        F: FnMut(&T) -> B,
    {
        Chunk::from_vec(self.as_slice().iter().map(function).collect())
    }

    /// Returns the elements satisfying the predicate, in order.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        Self::from_vec(
            self.as_slice()
                .iter()
                .filter(|element| predicate(element))
                .cloned()
                .collect(),
        )
    }

    /// Maps every element and keeps the `Some` results, in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=5).collect();
    /// let evens_doubled = sequence.filter_map(|n| (n % 2 == 0).then(|| n * 2));
    /// assert_eq!(evens_doubled.to_vec(), vec![4, 8]);
    /// ```
    #[must_use]
    pub fn filter_map<B, F>(&self, function: F) -> Chunk<B>
    where
        F: FnMut(&T) -> Option<B>,
    {
        Chunk::from_vec(self.as_slice().iter().filter_map(function).collect())
    }

    /// Maps every element to a sequence and concatenates the results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=3).collect();
    /// let repeated = sequence.flat_map(|n| Chunk::from_vec(vec![*n, *n]));
    /// assert_eq!(repeated.to_vec(), vec![1, 1, 2, 2, 3, 3]);
    /// ```
    #[must_use]
    pub fn flat_map<B, F>(&self, mut function: F) -> Chunk<B>
    where
        B: Clone,
        F: FnMut(&T) -> Chunk<B>,
    {
        let mut values = Vec::new();
        for element in self.as_slice() {
            values.extend_from_slice(function(element).as_slice());
        }
        Chunk::from_vec(values)
    }

    /// Calls `function` on every element in logical order.
    pub fn for_each<F>(&self, function: F)
    where
        F: FnMut(&T),
    {
        self.as_slice().iter().for_each(function);
    }

    /// Returns the sequence in reverse order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=3).collect();
    /// assert_eq!(sequence.reverse().to_vec(), vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut values = self.to_vec();
        values.reverse();
        Self::from_vec(values)
    }

    /// Pairs this sequence with another, truncating to the shorter one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let numbers: Chunk<i32> = (1..=3).collect();
    /// let letters: Chunk<char> = vec!['a', 'b'].into();
    /// assert_eq!(numbers.zip(&letters).to_vec(), vec![(1, 'a'), (2, 'b')]);
    /// ```
    #[must_use]
    pub fn zip<B: Clone>(&self, that: &Chunk<B>) -> Chunk<(T, B)> {
        self.zip_with(that, |left, right| (left.clone(), right.clone()))
    }

    /// Combines this sequence with another element-wise, truncating to
    /// the shorter one.
    #[must_use]
    pub fn zip_with<B, C, F>(&self, that: &Chunk<B>, mut function: F) -> Chunk<C>
    where
        B: Clone,
        F: FnMut(&T, &B) -> C,
    {
        Chunk::from_vec(
            self.as_slice()
                .iter()
                .zip(that.as_slice())
                .map(|(left, right)| function(left, right))
                .collect(),
        )
    }

    /// Splits the elements into those satisfying the predicate and those
    /// that do not, both in logical order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = (1..=5).collect();
    /// let (even, odd) = sequence.partition(|n| n % 2 == 0);
    /// assert_eq!(even.to_vec(), vec![2, 4]);
    /// assert_eq!(odd.to_vec(), vec![1, 3, 5]);
    /// ```
    #[must_use]
    pub fn partition<P>(&self, mut predicate: P) -> (Self, Self)
    where
        P: FnMut(&T) -> bool,
    {
        let (matching, rest): (Vec<T>, Vec<T>) = self
            .as_slice()
            .iter()
            .cloned()
            .partition(|element| predicate(element));
        (Self::from_vec(matching), Self::from_vec(rest))
    }

    /// Returns the sequence sorted in ascending order.
    #[must_use]
    pub fn sort(&self) -> Self
    where
        T: Ord,
    {
        let mut values = self.to_vec();
        values.sort();
        Self::from_vec(values)
    }

    /// Returns the sequence sorted by the given comparator.
    #[must_use]
    pub fn sort_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut values = self.to_vec();
        values.sort_by(compare);
        Self::from_vec(values)
    }

    /// Removes duplicate elements, keeping the first occurrence of each.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let sequence: Chunk<i32> = vec![1, 2, 1, 3, 2].into();
    /// assert_eq!(sequence.dedupe().to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn dedupe(&self) -> Self
    where
        T: PartialEq,
    {
        let mut values: Vec<T> = Vec::new();
        for element in self.as_slice() {
            if !values.contains(element) {
                values.push(element.clone());
            }
        }
        Self::from_vec(values)
    }

    /// Returns the deduplicated elements of this sequence followed by the
    /// elements of `that` not already present.
    #[must_use]
    pub fn union(&self, that: &Self) -> Self
    where
        T: PartialEq,
    {
        let mut values: Vec<T> = Vec::new();
        for element in self.as_slice().iter().chain(that.as_slice()) {
            if !values.contains(element) {
                values.push(element.clone());
            }
        }
        Self::from_vec(values)
    }

    /// Returns the deduplicated elements of this sequence that also occur
    /// in `that`, keeping this sequence's order.
    #[must_use]
    pub fn intersection(&self, that: &Self) -> Self
    where
        T: PartialEq,
    {
        let mut values: Vec<T> = Vec::new();
        for element in self.as_slice() {
            if that.contains(element) && !values.contains(element) {
                values.push(element.clone());
            }
        }
        Self::from_vec(values)
    }

    /// Returns the elements of this sequence that do not occur in `that`.
    #[must_use]
    pub fn difference(&self, that: &Self) -> Self
    where
        T: PartialEq,
    {
        self.filter(|element| !that.contains(element))
    }

    /// Returns `true` if the sequence contains the element.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(element)
    }

    /// Returns a reference to the first element satisfying the predicate.
    #[must_use]
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().find(|element| predicate(element))
    }

    /// Returns `true` if any element satisfies the predicate.
    #[must_use]
    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().any(|element| predicate(element))
    }

    /// Returns `true` if every element satisfies the predicate.
    #[must_use]
    pub fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().all(|element| predicate(element))
    }
}

// =============================================================================
// Numeric Ranges
// =============================================================================

impl Chunk<i64> {
    /// Creates the inclusive range `start..=end`.
    ///
    /// Crossed bounds clamp rather than error: when `end < start` the
    /// result is the single-element sequence containing `start`, so the
    /// result is always non-empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// assert_eq!(Chunk::range(1, 4).to_vec(), vec![1, 2, 3, 4]);
    /// assert_eq!(Chunk::range(4, 1).to_vec(), vec![4]);
    /// ```
    #[must_use]
    pub fn range(start: i64, end: i64) -> NonEmptyChunk<i64> {
        if end <= start {
            return Self::of(start);
        }
        NonEmptyChunk::new_unchecked(Self::from_vec((start..=end).collect()))
    }
}

// =============================================================================
// Construction Macro
// =============================================================================

/// Creates a [`Chunk`](crate::persistent::Chunk) from a list of elements.
///
/// # Examples
///
/// ```rust
/// use imseq::chunk;
/// use imseq::persistent::Chunk;
///
/// let sequence = chunk![1, 2, 3];
/// assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
///
/// let none: Chunk<i32> = chunk![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! chunk {
    () => {
        $crate::persistent::Chunk::empty()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::persistent::Chunk::from_vec(vec![$($element),+])
    };
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`Chunk`], yielding elements in logical
/// order.
///
/// Created by [`Chunk::iter`]; iterates over the flattened array, so
/// construction pays the one-time flattening cost and every step is O(1).
pub struct ChunkIterator<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for ChunkIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for ChunkIterator<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> DoubleEndedIterator for ChunkIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Owning iterator over a [`Chunk`].
///
/// Created by the [`IntoIterator`] implementation for `Chunk`.
pub struct ChunkIntoIterator<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for ChunkIntoIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for ChunkIntoIterator<T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> DoubleEndedIterator for ChunkIntoIterator<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Chunk<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> FromIterator<T> for Chunk<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for Chunk<T> {
    #[inline]
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: Clone> From<&[T]> for Chunk<T> {
    #[inline]
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

impl<T: Clone> IntoIterator for Chunk<T> {
    type Item = T;
    type IntoIter = ChunkIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        ChunkIntoIterator {
            inner: self.to_vec().into_iter(),
        }
    }
}

impl<'a, T: Clone> IntoIterator for &'a Chunk<T> {
    type Item = &'a T;
    type IntoIter = ChunkIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Positional access in the style of `Vec`.
///
/// # Panics
///
/// Panics with the [`IndexOutOfBounds`] message when the index is outside
/// `[0, length)`; prefer [`Chunk::get`] when the index is not already
/// proven in range.
impl<T> Index<usize> for Chunk<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get_checked(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Equality over the logical element order.
///
/// Two sequences are equal iff their lengths match and every positionally
/// corresponding pair of elements is equal; the internal tree shapes play
/// no part.
impl<T: Clone + PartialEq> PartialEq for Chunk<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.as_slice() == other.as_slice()
    }
}

impl<T: Clone + Eq> Eq for Chunk<T> {}

/// Computes a hash value for this sequence.
///
/// The hash folds the length and then every element in logical order, so
/// equal sequences with different internal tree shapes hash identically
/// (Hash-Eq consistency over the logical value, never the tree).
impl<T: Clone + Hash> Hash for Chunk<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self.as_slice() {
            element.hash(state);
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Chunk<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Chunk<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self.as_slice() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<T> TypeConstructor for Chunk<T> {
    type Inner = T;
    type WithType<B> = Chunk<B>;
}

impl<T: Clone> Functor for Chunk<T> {
    fn fmap<B, F>(self, mut function: F) -> Chunk<B>
    where
        F: FnMut(T) -> B,
    {
        Chunk::from_vec(self.into_iter().map(&mut function).collect())
    }

    fn fmap_ref<B, F>(&self, function: F) -> Chunk<B>
    where
        F: FnMut(&T) -> B,
    {
        self.map(function)
    }
}

impl<T: Clone> Foldable for Chunk<T> {
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.into_iter().fold(init, function)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(T, B) -> B,
    {
        self.into_iter()
            .rev()
            .fold(init, |accumulator, element| function(element, accumulator))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl<T> Semigroup for Chunk<T> {
    fn combine(self, other: Self) -> Self {
        self.concat(&other)
    }

    fn combine_ref(&self, other: &Self) -> Self {
        self.concat(other)
    }
}

impl<T> Monoid for Chunk<T> {
    fn empty() -> Self {
        Self::empty()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

/// Debug JSON projection: `{ "_id": "Chunk", "values": [...] }`.
///
/// The projection identifies the container kind and lists the elements in
/// logical order. It is meant for inspection only and is deliberately not
/// deserializable back into a sequence.
#[cfg(feature = "serde")]
impl<T: Clone + serde::Serialize> serde::Serialize for Chunk<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Chunk", 2)?;
        state.serialize_field("_id", "Chunk")?;
        state.serialize_field("values", self.as_slice())?;
        state.end()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Representation Tests
    // =========================================================================

    #[rstest]
    fn test_empty_has_depth_zero() {
        let sequence: Chunk<i32> = Chunk::empty();
        assert_eq!(sequence.depth(), 0);
        assert_eq!(sequence.len(), 0);
    }

    #[rstest]
    fn test_from_vec_routes_degenerate_lengths() {
        let none: Chunk<i32> = Chunk::from_vec(vec![]);
        assert!(none.is_empty());
        assert_eq!(none.depth(), 0);

        let one = Chunk::from_vec(vec![7]);
        assert_eq!(one.len(), 1);
        assert_eq!(one.depth(), 0);
        assert_eq!(one.get(0), Some(&7));
    }

    #[rstest]
    fn test_concat_with_empty_reuses_operand() {
        let sequence: Chunk<i32> = (1..=3).collect();
        let empty: Chunk<i32> = Chunk::empty();
        assert_eq!(empty.concat(&sequence).depth(), sequence.depth());
        assert_eq!(sequence.concat(&empty).to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_join_increments_depth() {
        let left: Chunk<i32> = vec![1, 2].into();
        let right: Chunk<i32> = vec![3, 4].into();
        let joined = left.concat(&right);
        assert_eq!(joined.depth(), 1);
        assert_eq!(joined.len(), 4);
    }

    #[rstest]
    fn test_take_of_slice_does_not_nest_windows() {
        let sequence: Chunk<i32> = (1..=10).collect();
        let window = sequence.skip(2).take(5).skip(1).take(3);
        // Window arithmetic collapses against the contiguous source, so
        // depth stays at one window above the flat run.
        assert_eq!(window.depth(), 1);
        assert_eq!(window.to_vec(), vec![4, 5, 6]);
    }

    // =========================================================================
    // Error Tests
    // =========================================================================

    #[rstest]
    fn test_index_out_of_bounds_display() {
        let error = IndexOutOfBounds {
            index: 10,
            length: 3,
        };
        assert_eq!(
            error.to_string(),
            "index 10 out of bounds for sequence of length 3"
        );
    }

    #[rstest]
    #[should_panic(expected = "index 5 out of bounds for sequence of length 3")]
    fn test_index_operator_panics_with_error_message() {
        let sequence: Chunk<i32> = (1..=3).collect();
        let _ = sequence[5];
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_formats_elements() {
        let sequence: Chunk<i32> = (1..=3).collect();
        assert_eq!(sequence.to_string(), "[1, 2, 3]");
    }

    #[rstest]
    fn test_display_empty() {
        let sequence: Chunk<i32> = Chunk::empty();
        assert_eq!(sequence.to_string(), "[]");
    }

    #[rstest]
    fn test_debug_formats_as_list() {
        let sequence: Chunk<&str> = vec!["a", "b"].into();
        assert_eq!(format!("{sequence:?}"), r#"["a", "b"]"#);
    }

    // =========================================================================
    // Macro Tests
    // =========================================================================

    #[rstest]
    fn test_chunk_macro_builds_sequence() {
        let sequence = chunk![1, 2, 3];
        assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_chunk_macro_empty() {
        let sequence: Chunk<i32> = chunk![];
        assert!(sequence.is_empty());
    }
}
