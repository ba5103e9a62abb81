//! Functor type class.

use super::TypeConstructor;

/// A container that supports mapping a function over its elements.
///
/// # Laws
///
/// All implementations must satisfy:
///
/// ## Identity
///
/// ```text
/// x.fmap(|a| a) == x
/// ```
///
/// ## Composition
///
/// ```text
/// x.fmap(f).fmap(g) == x.fmap(|a| g(f(a)))
/// ```
///
/// # Examples
///
/// ```rust
/// use imseq::typeclass::Functor;
///
/// let x: Option<i32> = Some(5);
/// let y: Option<String> = x.fmap(|n| n.to_string());
/// assert_eq!(y, Some("5".to_string()));
/// ```
pub trait Functor: TypeConstructor {
    /// Applies a function to every element, consuming the container.
    ///
    /// The function is `FnMut` so multi-element containers can apply it
    /// repeatedly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::typeclass::Functor;
    ///
    /// let doubled = vec![1, 2, 3].fmap(|n| n * 2);
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    fn fmap<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnMut(Self::Inner) -> B;

    /// Applies a function to references of the elements without consuming
    /// the container.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::typeclass::Functor;
    ///
    /// let words = vec!["a".to_string(), "bc".to_string()];
    /// let lengths = words.fmap_ref(|word| word.len());
    /// assert_eq!(lengths, vec![1, 2]);
    /// assert_eq!(words.len(), 2);
    /// ```
    fn fmap_ref<B, F>(&self, function: F) -> Self::WithType<B>
    where
        F: FnMut(&Self::Inner) -> B;
}

// =============================================================================
// Standard Library Type Implementations
// =============================================================================

impl<A> Functor for Option<A> {
    fn fmap<B, F>(self, mut function: F) -> Option<B>
    where
        F: FnMut(A) -> B,
    {
        self.map(&mut function)
    }

    fn fmap_ref<B, F>(&self, mut function: F) -> Option<B>
    where
        F: FnMut(&A) -> B,
    {
        self.as_ref().map(&mut function)
    }
}

impl<T> Functor for Vec<T> {
    fn fmap<B, F>(self, function: F) -> Vec<B>
    where
        F: FnMut(T) -> B,
    {
        self.into_iter().map(function).collect()
    }

    fn fmap_ref<B, F>(&self, function: F) -> Vec<B>
    where
        F: FnMut(&T) -> B,
    {
        self.iter().map(function).collect()
    }
}
