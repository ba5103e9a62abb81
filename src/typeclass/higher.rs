//! Higher-kinded type emulation.
//!
//! Rust cannot abstract over type constructors directly, so this module
//! emulates the ability with a generic associated type: a container names
//! its element type and how to rebuild itself around a different one.

/// Trait for emulating higher-kinded types.
///
/// A `TypeConstructor` is a container shape that knows its element type
/// ([`Inner`](Self::Inner)) and can name the same shape holding a
/// different element type ([`WithType`](Self::WithType)).
///
/// # Examples
///
/// ```rust
/// use imseq::typeclass::TypeConstructor;
///
/// fn assert_shape<T: TypeConstructor<Inner = i32>>() {}
/// assert_shape::<Option<i32>>();
/// assert_shape::<Vec<i32>>();
/// ```
pub trait TypeConstructor {
    /// The element type this constructor is applied to.
    type Inner;

    /// The same constructor applied to a different element type `B`.
    ///
    /// The constraint keeps the rebuilt shape usable as a constructor in
    /// its own right, so transformations can be chained.
    type WithType<B>: TypeConstructor<Inner = B>;
}

// =============================================================================
// Standard Library Type Implementations
// =============================================================================

impl<A> TypeConstructor for Option<A> {
    type Inner = A;
    type WithType<B> = Option<B>;
}

impl<T, E> TypeConstructor for Result<T, E> {
    type Inner = T;
    type WithType<B> = Result<B, E>;
}

impl<T> TypeConstructor for Vec<T> {
    type Inner = T;
    type WithType<B> = Vec<B>;
}
