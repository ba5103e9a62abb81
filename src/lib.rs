//! # imseq
//!
//! Persistent immutable sequences for Rust with structural sharing and
//! balanced concatenation.
//!
//! ## Overview
//!
//! The centerpiece of this library is [`Chunk`](persistent::Chunk), a
//! tree-backed immutable sequence offering:
//!
//! - O(1) `clone` and structural sharing between versions
//! - Amortized O(1) `append`/`prepend`
//! - O(log N) balanced concatenation
//! - O(1) `take`/`skip`/`slice` via lazy windows
//! - One-time flattening into a cached contiguous array on first read
//!
//! [`NonEmptyChunk`](persistent::NonEmptyChunk) refines `Chunk` with a
//! static guarantee of at least one element.
//!
//! A slim type-class layer ([`Semigroup`](typeclass::Semigroup),
//! [`Monoid`](typeclass::Monoid), [`Functor`](typeclass::Functor),
//! [`Foldable`](typeclass::Foldable)) lets the sequences participate in
//! generic functional code.
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits (Functor, Foldable, Semigroup, Monoid)
//! - `persistent`: Persistent sequences (`Chunk`, `NonEmptyChunk`)
//! - `arc`: Use `Arc`/`OnceLock` internally for thread-safe sharing
//! - `serde`: Debug JSON projection via `serde::Serialize`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use imseq::persistent::Chunk;
//!
//! let left: Chunk<i32> = vec![1, 2, 3].into();
//! let right: Chunk<i32> = vec![4, 5, 6].into();
//!
//! let joined = left.concat(&right);
//! assert_eq!(joined.to_vec(), vec![1, 2, 3, 4, 5, 6]);
//!
//! // The operands are unchanged; the result shares their structure.
//! assert_eq!(left.len(), 3);
//! assert_eq!(joined.take(2).to_vec(), vec![1, 2]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use imseq::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(test)]
mod tests {
    #[test]
    fn library_compiles() {
        // Basic smoke test to ensure the library compiles
        assert!(true);
    }
}
