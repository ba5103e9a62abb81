//! Persistent (immutable) sequences.
//!
//! This module provides [`Chunk`], a tree-backed immutable sequence with
//! structural sharing, and [`NonEmptyChunk`], the same sequence refined
//! with a static guarantee of at least one element.
//!
//! # Structural Sharing
//!
//! Every operation that looks like a mutation (`append`, `concat`, `take`,
//! `map`, ...) returns a new handle; the original value is never changed.
//! New handles share as much of the old tree as possible, so versions are
//! cheap to keep around.
//!
//! # Examples
//!
//! ## `Chunk`
//!
//! ```rust
//! use imseq::persistent::Chunk;
//!
//! let numbers: Chunk<i32> = (1..=3).collect();
//! let extended = numbers.append(4);
//!
//! assert_eq!(numbers.len(), 3);      // Original unchanged
//! assert_eq!(extended.len(), 4);     // New sequence
//! assert_eq!(extended.to_vec(), vec![1, 2, 3, 4]);
//! ```
//!
//! ## `NonEmptyChunk`
//!
//! ```rust
//! use imseq::persistent::Chunk;
//!
//! let non_empty = Chunk::of(1).append(2);
//!
//! // head and last need no Option: emptiness is ruled out statically
//! assert_eq!(non_empty.head(), &1);
//! assert_eq!(non_empty.last_element(), &2);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Materialization Cell Type Alias
// =============================================================================

/// Write-once cell holding the flattened form of a lazy sequence node.
///
/// Flattening is a memoization of a deterministic function of the value,
/// so the cell is set at most once and every later read observes the same
/// array. With the `arc` feature the cell is `std::sync::OnceLock`, making
/// first-writer-wins materialization safe under concurrent sharing; the
/// default build uses the cheaper `std::cell::OnceCell`.
#[cfg(feature = "arc")]
pub(crate) type MaterializeCell<T> = std::sync::OnceLock<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type MaterializeCell<T> = std::cell::OnceCell<T>;

mod chunk;
mod non_empty;

pub use chunk::Chunk;
pub use chunk::ChunkIntoIterator;
pub use chunk::ChunkIterator;
pub use chunk::IndexOutOfBounds;
pub use non_empty::NonEmptyChunk;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::{MaterializeCell, ReferenceCounter};
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_clone() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(*reference_counter, *reference_counter_clone);
    }

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }

    #[rstest]
    fn test_materialize_cell_sets_once() {
        let cell: MaterializeCell<i32> = MaterializeCell::new();
        assert_eq!(cell.get(), None);
        assert_eq!(*cell.get_or_init(|| 1), 1);
        assert_eq!(*cell.get_or_init(|| 2), 1);
    }
}
