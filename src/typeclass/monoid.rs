//! Monoid type class.

use super::Semigroup;

/// A [`Semigroup`] with an identity element.
///
/// # Laws
///
/// In addition to associativity, all implementations must satisfy:
///
/// ## Left identity
///
/// ```text
/// Self::empty().combine(a) == a
/// ```
///
/// ## Right identity
///
/// ```text
/// a.combine(Self::empty()) == a
/// ```
///
/// # Examples
///
/// ```rust
/// use imseq::typeclass::{Semigroup, Monoid};
///
/// let s = String::from("hello");
/// assert_eq!(String::empty().combine(s.clone()), s);
/// ```
pub trait Monoid: Semigroup {
    /// Returns the identity element for this monoid.
    fn empty() -> Self;

    /// Combines all elements of an iterator, starting from the identity
    /// element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imseq::typeclass::Monoid;
    ///
    /// let combined = Vec::combine_all(vec![vec![1], vec![2, 3], vec![]]);
    /// assert_eq!(combined, vec![1, 2, 3]);
    /// ```
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .fold(Self::empty(), |accumulator, element| {
                accumulator.combine(element)
            })
    }
}

// =============================================================================
// Standard Library Type Implementations
// =============================================================================

impl Monoid for String {
    fn empty() -> Self {
        Self::new()
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }
}

impl<A: Semigroup> Monoid for Option<A> {
    fn empty() -> Self {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_empty_is_left_identity() {
        let value = vec![1, 2];
        assert_eq!(Vec::empty().combine(value.clone()), value);
    }

    #[rstest]
    fn test_empty_is_right_identity() {
        let value = "abc".to_string();
        assert_eq!(value.clone().combine(String::empty()), value);
    }

    #[rstest]
    fn test_combine_all_of_empty_iterator_is_identity() {
        let combined = String::combine_all(Vec::<String>::new());
        assert_eq!(combined, String::empty());
    }
}
