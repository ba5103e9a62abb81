//! Type class traits for functional programming abstractions.
//!
//! This module provides the small algebra the persistent sequences plug
//! into:
//!
//! - [`TypeConstructor`]: Higher-kinded type emulation via GATs
//! - [`Functor`]: Mapping over container values
//! - [`Foldable`]: Folding structures down to summary values
//! - [`Semigroup`]: Associative binary operations
//! - [`Monoid`]: Semigroup with an identity element
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust has no native higher-kinded types. [`TypeConstructor`] uses a
//! generic associated type to stand in for "the same container with a
//! different element type", which is enough to state `Functor` and
//! `Foldable` generically.
//!
//! # Examples
//!
//! ```rust
//! use imseq::typeclass::{Semigroup, Monoid};
//!
//! let a = vec![1, 2];
//! let b = vec![3, 4];
//! assert_eq!(a.combine(b), vec![1, 2, 3, 4]);
//!
//! assert!(Vec::<i32>::empty().is_empty());
//! ```

mod foldable;
mod functor;
mod higher;
mod monoid;
mod semigroup;

pub use foldable::Foldable;
pub use functor::Functor;
pub use higher::TypeConstructor;
pub use monoid::Monoid;
pub use semigroup::Semigroup;
