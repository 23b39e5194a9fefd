//! Identity extraction for [`Collection`](super::Collection).
//!
//! Every collection owns an [`Identity`]: the function that maps an item to
//! the key it is stored under. Two items with equal keys are the same
//! logical member.
//!
//! - The default identity reads the item's [`Identifiable::id`] (the `_id`
//!   field of a record) and coerces it to a `String` through `Display`.
//! - A custom identity is any closure `Fn(&T) -> K`, shared by reference
//!   counting so that derived collections reuse the very same function.

use std::fmt;

use super::ReferenceCounter;

/// Types that carry their own identity field.
///
/// This is what the default identity of a collection reads. Usually derived:
///
/// ```rust
/// use identity_collection::{Collection, Identifiable};
///
/// #[derive(Clone, Identifiable)]
/// struct Account {
///     _id: u64,
///     owner: String,
/// }
///
/// let mut accounts = Collection::new();
/// accounts.add(Account { _id: 7, owner: "ada".to_string() });
/// assert!(accounts.has_key("7"));
/// ```
///
/// The identity field must implement `Display`:
///
/// ```rust,compile_fail
/// use identity_collection::Identifiable;
///
/// #[derive(Identifiable)]
/// struct Batch {
///     _id: Vec<u8>,
/// }
/// ```
pub trait Identifiable {
    /// The type of the identity field.
    type Id: fmt::Display + ?Sized;

    /// Returns a reference to the identity field.
    fn id(&self) -> &Self::Id;
}

/// A function usable as a custom identity.
///
/// Blanket-implemented for every suitable closure. With the `arc` feature the
/// function must also be `Send + Sync`.
#[cfg(not(feature = "arc"))]
pub trait IdentityFunction<T, K>: Fn(&T) -> K + 'static {}

#[cfg(not(feature = "arc"))]
impl<T, K, F> IdentityFunction<T, K> for F where F: Fn(&T) -> K + 'static {}

/// A function usable as a custom identity.
///
/// Blanket-implemented for every suitable closure. With the `arc` feature the
/// function must also be `Send + Sync`.
#[cfg(feature = "arc")]
pub trait IdentityFunction<T, K>: Fn(&T) -> K + Send + Sync + 'static {}

#[cfg(feature = "arc")]
impl<T, K, F> IdentityFunction<T, K> for F where F: Fn(&T) -> K + Send + Sync + 'static {}

/// Internal representation of the identity.
enum IdentityInner<T, K> {
    Default(fn(&T) -> K),
    Custom(ReferenceCounter<dyn IdentityFunction<T, K>>),
}

/// The identity function of a collection.
///
/// Cloning an `Identity` shares the underlying function; it never copies
/// the closure.
pub struct Identity<T, K> {
    inner: IdentityInner<T, K>,
}

fn default_key<T: Identifiable>(item: &T) -> String {
    item.id().to_string()
}

impl<T: Identifiable> Identity<T, String> {
    /// The identity derived from [`Identifiable::id`], coerced to `String`.
    #[inline]
    #[must_use]
    pub fn from_id_field() -> Self {
        Self {
            inner: IdentityInner::Default(default_key::<T>),
        }
    }
}

impl<T, K> Identity<T, K> {
    /// Wraps a custom identity function.
    #[inline]
    #[must_use]
    pub fn custom<F>(function: F) -> Self
    where
        F: IdentityFunction<T, K>,
    {
        Self {
            inner: IdentityInner::Custom(ReferenceCounter::new(function)),
        }
    }

    /// Computes the identity key of `item`.
    #[inline]
    pub fn key_of(&self, item: &T) -> K {
        match &self.inner {
            IdentityInner::Default(function) => function(item),
            IdentityInner::Custom(function) => function(item),
        }
    }

    /// Returns `true` if this is the default, field-based identity.
    #[inline]
    pub const fn is_default(&self) -> bool {
        matches!(self.inner, IdentityInner::Default(_))
    }

    /// Returns `true` if both identities are the same function.
    ///
    /// Two default identities are always the same; two custom identities are
    /// the same only when one was cloned from the other (for example, a
    /// collection and the collections derived from it).
    pub fn is_same(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (IdentityInner::Default(_), IdentityInner::Default(_)) => true,
            (IdentityInner::Custom(left), IdentityInner::Custom(right)) => {
                ReferenceCounter::ptr_eq(left, right)
            }
            _ => false,
        }
    }
}

impl<T, K> Clone for Identity<T, K> {
    fn clone(&self) -> Self {
        let inner = match &self.inner {
            IdentityInner::Default(function) => IdentityInner::Default(*function),
            IdentityInner::Custom(function) => {
                IdentityInner::Custom(ReferenceCounter::clone(function))
            }
        };
        Self { inner }
    }
}

impl<T, K> fmt::Debug for Identity<T, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            IdentityInner::Default(_) => formatter.write_str("Identity::Default"),
            IdentityInner::Custom(_) => formatter.write_str("Identity::Custom"),
        }
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Identity<String, String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Identity<String, String>: Send, Sync);
