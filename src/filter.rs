//! Predicate combinators.
//!
//! [`and`] and [`or`] fold a list of predicates, all applied to the same
//! shared arguments, into one answer. They are meant to be used inside the
//! predicates given to [`Collection::find`](crate::Collection::find) and
//! [`Collection::has_matching`](crate::Collection::has_matching).
//!
//! The two are deliberately not mirror images:
//!
//! | Combinator | Short-circuits | Empty predicate list |
//! |------------|----------------|----------------------|
//! | `and`      | yes            | `true`               |
//! | `or`       | no             | `None`               |
//!
//! Several shared arguments are passed as a tuple.
//!
//! # Examples
//!
//! ```rust
//! use identity_collection::{Collection, filter};
//!
//! let mut numbers = Collection::with_identity(|value: &i32| *value);
//! numbers.add_all(-5..=5);
//!
//! let positive = |value: &i32| *value > 0;
//! let even = |value: &i32| value % 2 == 0;
//! let predicates: [&dyn Fn(&i32) -> bool; 2] = [&positive, &even];
//!
//! let positive_even = numbers.find(|value| filter::and(predicates, value));
//! assert_eq!(positive_even.sort(), vec![&2, &4]);
//! ```

/// Returns `true` if every predicate holds for `arguments`.
///
/// Predicates run in order and evaluation stops at the first one returning
/// `false`. An empty list of predicates holds vacuously.
///
/// # Examples
///
/// ```rust
/// use identity_collection::filter;
///
/// let short = |word: &&str| word.len() < 6;
/// let lowercase = |word: &&str| word.chars().all(char::is_lowercase);
///
/// assert!(filter::and([&short as &dyn Fn(&&str) -> bool, &lowercase], &"rust"));
/// assert!(!filter::and([&short as &dyn Fn(&&str) -> bool, &lowercase], &"Rust"));
/// assert!(filter::and(Vec::<fn(&&str) -> bool>::new(), &"anything"));
/// ```
pub fn and<A, P, I>(predicates: I, arguments: &A) -> bool
where
    A: ?Sized,
    P: FnMut(&A) -> bool,
    I: IntoIterator<Item = P>,
{
    predicates
        .into_iter()
        .all(|mut predicate| predicate(arguments))
}

/// Ors the answers of every predicate for `arguments`.
///
/// Every predicate runs, whatever the earlier ones answered. Returns `None`
/// for an empty list of predicates, otherwise `Some` of the accumulated
/// answer.
///
/// # Examples
///
/// ```rust
/// use identity_collection::filter;
///
/// let tiny = |value: &u32| *value < 10;
/// let huge = |value: &u32| *value > 1_000;
///
/// assert_eq!(filter::or([&tiny as &dyn Fn(&u32) -> bool, &huge], &5), Some(true));
/// assert_eq!(filter::or([&tiny as &dyn Fn(&u32) -> bool, &huge], &500), Some(false));
/// assert_eq!(filter::or(Vec::<fn(&u32) -> bool>::new(), &5), None);
/// ```
pub fn or<A, P, I>(predicates: I, arguments: &A) -> Option<bool>
where
    A: ?Sized,
    P: FnMut(&A) -> bool,
    I: IntoIterator<Item = P>,
{
    predicates
        .into_iter()
        .fold(None, |accumulated, mut predicate| {
            let answer = predicate(arguments);
            Some(accumulated.unwrap_or(false) || answer)
        })
}
