//! Foldable type class.

use super::TypeConstructor;

/// A container whose elements can be folded down to a summary value.
///
/// # Examples
///
/// ```rust
/// use imseq::typeclass::Foldable;
///
/// let sum = vec![1, 2, 3].fold_left(0, |accumulator, n| accumulator + n);
/// assert_eq!(sum, 6);
/// ```
pub trait Foldable: TypeConstructor {
    /// Folds the elements from the left.
    ///
    /// # Arguments
    ///
    /// * `init` - The initial accumulator value
    /// * `function` - Combines the accumulator with each element in order
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::typeclass::Foldable;
    ///
    /// let joined = vec!["a", "b", "c"]
    ///     .fold_left(String::new(), |mut accumulator, s| {
    ///         accumulator.push_str(s);
    ///         accumulator
    ///     });
    /// assert_eq!(joined, "abc");
    /// ```
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, Self::Inner) -> B;

    /// Folds the elements from the right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::typeclass::Foldable;
    ///
    /// let reversed = vec![1, 2, 3].fold_right(Vec::new(), |n, mut accumulator| {
    ///     accumulator.push(n);
    ///     accumulator
    /// });
    /// assert_eq!(reversed, vec![3, 2, 1]);
    /// ```
    fn fold_right<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(Self::Inner, B) -> B;

    /// Returns `true` if the container has no elements.
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the container.
    fn length(&self) -> usize;
}

// =============================================================================
// Standard Library Type Implementations
// =============================================================================

impl<T> Foldable for Vec<T> {
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
        Vec::is_empty(self)
    }

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }
}

impl<A> Foldable for Option<A> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        match self {
            Some(value) => function(init, value),
            None => init,
        }
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(A, B) -> B,
    {
        match self {
            Some(value) => function(value, init),
            None => init,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn length(&self) -> usize {
        usize::from(self.is_some())
    }
}
