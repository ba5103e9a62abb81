//! Statically non-empty persistent sequence.
//!
//! [`NonEmptyChunk`] shares the representation of [`Chunk`] and adds a
//! type-level guarantee of at least one element, so `head` and the last
//! element need no `Option`. Constructors that can prove non-emptiness
//! ([`Chunk::of`], [`Chunk::append`], [`Chunk::prepend`]) return it
//! directly, and emptiness-preserving operations keep the refinement.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use super::chunk::{Chunk, ChunkIntoIterator, ChunkIterator};

use crate::typeclass::Semigroup;

/// A [`Chunk`] refined with a static guarantee of `length >= 1`.
///
/// `NonEmptyChunk` dereferences to [`Chunk`], so the whole sequence API
/// is available on it; operations that cannot lose elements (`map`,
/// `reverse`, `append`, `prepend`, `concat`) are re-exposed here with the
/// refinement preserved.
///
/// # Examples
///
/// ```rust
/// use imseq::persistent::Chunk;
///
/// let sequence = Chunk::of(1).append(2).append(3);
/// assert_eq!(sequence.head(), &1);
/// assert_eq!(sequence.reverse().head(), &3);
/// // The full Chunk API is available through deref.
/// assert_eq!(sequence.take(2).to_vec(), vec![1, 2]);
/// ```
pub struct NonEmptyChunk<T> {
    inner: Chunk<T>,
}

impl<T> NonEmptyChunk<T> {
    /// Wraps a sequence the caller has proven non-empty.
    pub(crate) fn new_unchecked(inner: Chunk<T>) -> Self {
        debug_assert!(!inner.is_empty());
        Self { inner }
    }

    /// Refines a sequence, returning `None` when it is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::{Chunk, NonEmptyChunk};
    ///
    /// let sequence: Chunk<i32> = vec![1, 2].into();
    /// assert!(NonEmptyChunk::from_chunk(sequence).is_some());
    /// assert!(NonEmptyChunk::from_chunk(Chunk::<i32>::empty()).is_none());
    /// ```
    #[must_use]
    pub fn from_chunk(chunk: Chunk<T>) -> Option<Self> {
        if chunk.is_empty() {
            None
        } else {
            Some(Self { inner: chunk })
        }
    }

    /// Discards the refinement, returning the underlying sequence.
    #[inline]
    #[must_use]
    pub fn into_chunk(self) -> Chunk<T> {
        self.inner
    }

    /// Returns the underlying sequence by reference.
    #[inline]
    #[must_use]
    pub const fn as_chunk(&self) -> &Chunk<T> {
        &self.inner
    }

    /// Returns a reference to the first element.
    ///
    /// Unlike [`Chunk::first`], no `Option` is involved: emptiness is
    /// ruled out statically.
    #[inline]
    #[must_use]
    pub fn head(&self) -> &T {
        &self.inner[0]
    }

    /// Returns a reference to the last element.
    #[inline]
    #[must_use]
    pub fn last_element(&self) -> &T {
        &self.inner[self.inner.len() - 1]
    }

    /// Concatenates another sequence onto the end, keeping the
    /// refinement.
    #[must_use]
    pub fn concat(&self, that: &Chunk<T>) -> Self {
        Self::new_unchecked(self.inner.concat(that))
    }
}

impl<T: Clone> NonEmptyChunk<T> {
    /// Returns a new sequence with `function` applied to every element.
    ///
    /// Mapping preserves the length, so the refinement carries over.
    #[must_use]
    pub fn map<B, F>(&self, function: F) -> NonEmptyChunk<B>
    where
        F: FnMut(&T) -> B,
    {
        NonEmptyChunk::new_unchecked(self.inner.map(function))
    }

    /// Returns the sequence in reverse order, keeping the refinement.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::persistent::Chunk;
    ///
    /// let reversed = Chunk::of(1).append(2).append(3).reverse();
    /// assert_eq!(reversed.head(), &3);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::new_unchecked(self.inner.reverse())
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for NonEmptyChunk<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Deref for NonEmptyChunk<T> {
    type Target = Chunk<T>;

    #[inline]
    fn deref(&self) -> &Chunk<T> {
        &self.inner
    }
}

impl<T> From<NonEmptyChunk<T>> for Chunk<T> {
    #[inline]
    fn from(non_empty: NonEmptyChunk<T>) -> Self {
        non_empty.into_chunk()
    }
}

impl<T: Clone> IntoIterator for NonEmptyChunk<T> {
    type Item = T;
    type IntoIter = ChunkIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a NonEmptyChunk<T> {
    type Item = &'a T;
    type IntoIter = ChunkIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T: Clone + PartialEq> PartialEq for NonEmptyChunk<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Clone + Eq> Eq for NonEmptyChunk<T> {}

impl<T: Clone + Hash> Hash for NonEmptyChunk<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for NonEmptyChunk<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, formatter)
    }
}

impl<T: Clone + fmt::Display> fmt::Display for NonEmptyChunk<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, formatter)
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<T> Semigroup for NonEmptyChunk<T> {
    fn combine(self, other: Self) -> Self {
        self.concat(other.as_chunk())
    }

    fn combine_ref(&self, other: &Self) -> Self {
        self.concat(other.as_chunk())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: Clone + serde::Serialize> serde::Serialize for NonEmptyChunk<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}

// =============================================================================
// Tests
// =============================================================================
