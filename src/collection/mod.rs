//! Identity-keyed, insertion-ordered collection.
//!
//! This module provides [`Collection`], a mutable store of domain objects
//! deduplicated by an identity function rather than by value equality.
//!
//! # Overview
//!
//! - Items are stored under the key their [`Identity`] extracts from them.
//! - Adding an item whose key is already present replaces the stored value
//!   and keeps its original position.
//! - Iteration (`each`, `iter`, `sort`, `single`) follows insertion order;
//!   removals keep the relative order of the survivors.
//! - `len()` is a counter maintained by every mutation, never recomputed.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity       |
//! |------------------|------------------|
//! | `add`            | O(1) average     |
//! | `remove_one`     | O(n)             |
//! | `has_key`        | O(1) average     |
//! | `has_matching`   | O(n)             |
//! | `find`           | O(n)             |
//! | `group_by`       | O(n)             |
//! | `sort_by`        | O(n log n)       |
//! | `single`         | O(1)             |
//!
//! Removal shifts later entries to keep insertion order, hence O(n).
//!
//! # Examples
//!
//! ```rust
//! use identity_collection::{Collection, Identifiable};
//!
//! #[derive(Clone, Debug, PartialEq, Identifiable)]
//! struct Item {
//!     _id: u32,
//!     value: char,
//! }
//!
//! let mut collection = Collection::new();
//! collection.add(Item { _id: 1, value: 'a' });
//! collection.add(Item { _id: 2, value: 'b' });
//! collection.add(Item { _id: 1, value: 'c' });
//!
//! assert_eq!(collection.len(), 2);
//! assert_eq!(collection.items()["1"].value, 'c');
//!
//! assert_eq!(collection.remove_one("1"), Some(Item { _id: 1, value: 'c' }));
//! assert_eq!(collection.len(), 1);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;
use tracing::trace;

mod group;
mod identity;
mod iteration;
mod merge;

pub use group::GroupKey;
pub use identity::{Identifiable, Identity, IdentityFunction};
pub use iteration::IterationControl;
pub use merge::MergeError;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer holding custom identity functions.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which lets
/// collections cross threads.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Hasher Type Alias
// =============================================================================

/// Hasher of the backing map.
///
/// `rustc_hash::FxBuildHasher` with the `fxhash` feature, otherwise
/// `ahash::RandomState` with the `ahash` feature, otherwise the standard
/// library's `RandomState`.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// Hasher of the backing map.
///
/// `rustc_hash::FxBuildHasher` with the `fxhash` feature, otherwise
/// `ahash::RandomState` with the `ahash` feature, otherwise the standard
/// library's `RandomState`.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// Hasher of the backing map.
///
/// `rustc_hash::FxBuildHasher` with the `fxhash` feature, otherwise
/// `ahash::RandomState` with the `ahash` feature, otherwise the standard
/// library's `RandomState`.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

/// Iterator over the items of a [`Collection`] in insertion order.
pub type Iter<'a, K, T> = indexmap::map::Values<'a, K, T>;

/// Owning iterator over the items of a [`Collection`] in insertion order.
pub type IntoIter<K, T> = indexmap::map::IntoValues<K, T>;

/// An insertion-ordered collection deduplicated by identity.
///
/// # Type Parameters
///
/// * `T` - The item type. Items are opaque apart from identity extraction.
/// * `K` - The identity key type. `String` for the default identity.
/// * `S` - The hasher of the backing map.
///
/// # Examples
///
/// ```rust
/// use identity_collection::Collection;
///
/// let mut words = Collection::with_identity(|word: &&str| word.len());
/// words.add("one");
/// words.add("three");
/// words.add("two");
///
/// // "two" has the same identity (length 3) as "one" and replaced it in place.
/// let ordered: Vec<&&str> = words.iter().collect();
/// assert_eq!(ordered, vec![&"two", &"three"]);
/// ```
#[derive(Clone)]
pub struct Collection<T, K = String, S = DefaultHashBuilder> {
    identity: Identity<T, K>,
    items: IndexMap<K, T, S>,
    length: usize,
}

impl<T: Identifiable> Collection<T> {
    /// Creates an empty collection keyed by the items' [`Identifiable::id`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::{Collection, Identifiable};
    ///
    /// #[derive(Identifiable)]
    /// struct User {
    ///     _id: String,
    /// }
    ///
    /// let users: Collection<User> = Collection::new();
    /// assert!(users.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_identity_and_hasher(Identity::from_id_field(), DefaultHashBuilder::default())
    }
}

impl<T, K: Hash + Eq> Collection<T, K> {
    /// Creates an empty collection keyed by `identity`.
    ///
    /// The function overrides the default identity for this collection and
    /// every collection derived from it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut numbers = Collection::with_identity(|number: &i32| number.rem_euclid(10));
    /// numbers.add(3);
    /// numbers.add(13);
    /// assert_eq!(numbers.len(), 1);
    /// assert_eq!(numbers.get(&3), Some(&13));
    /// ```
    #[inline]
    #[must_use]
    pub fn with_identity<F>(identity: F) -> Self
    where
        F: IdentityFunction<T, K>,
    {
        Self::with_identity_and_hasher(Identity::custom(identity), DefaultHashBuilder::default())
    }
}

impl<T, K, S> Collection<T, K, S> {
    /// Creates an empty collection from an explicit identity and hasher.
    #[inline]
    #[must_use]
    pub fn with_identity_and_hasher(identity: Identity<T, K>, hasher: S) -> Self {
        Self {
            identity,
            items: IndexMap::with_hasher(hasher),
            length: 0,
        }
    }

    /// Returns the number of distinct identities stored.
    ///
    /// # Complexity
    ///
    /// O(1). The counter is updated by every mutation.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the collection contains no items.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the backing map, in insertion order.
    #[inline]
    pub const fn items(&self) -> &IndexMap<K, T, S> {
        &self.items
    }

    /// Returns the identity of this collection.
    #[inline]
    pub const fn identity(&self) -> &Identity<T, K> {
        &self.identity
    }

    /// Computes the identity key of `item` without looking it up.
    #[inline]
    pub fn identity_of(&self, item: &T) -> K {
        self.identity.key_of(item)
    }

    /// Returns an iterator over the items in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, T> {
        self.items.values()
    }

    /// Returns an iterator over the identity keys in insertion order.
    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, K, T> {
        self.items.keys()
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.length = 0;
        trace!("cleared collection");
    }

    /// Returns the first surviving item by insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut collection = Collection::with_identity(|value: &u8| *value);
    /// assert_eq!(collection.single(), None);
    ///
    /// collection.add_all([4, 2, 9]);
    /// collection.remove_one(&4);
    /// assert_eq!(collection.single(), Some(&2));
    /// ```
    #[inline]
    pub fn single(&self) -> Option<&T> {
        self.items.first().map(|(_, item)| item)
    }

    /// Returns the items in insertion order.
    #[inline]
    pub fn sort(&self) -> Vec<&T> {
        self.items.values().collect()
    }

    /// Returns the items sorted by `compare`.
    ///
    /// The sort is stable: items that compare equal keep insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut collection = Collection::with_identity(|value: &i32| *value);
    /// collection.add_all([3, 1, 2]);
    ///
    /// let descending = collection.sort_by(|left, right| right.cmp(left));
    /// assert_eq!(descending, vec![&3, &2, &1]);
    /// assert_eq!(collection.sort(), vec![&3, &1, &2]);
    /// ```
    pub fn sort_by<F>(&self, mut compare: F) -> Vec<&T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut sorted = self.sort();
        sorted.sort_by(|left, right| compare(*left, *right));
        sorted
    }

    /// Returns `true` if `predicate` returns `true` for any item.
    ///
    /// Items are visited in insertion order and the search stops at the
    /// first match.
    pub fn has_matching<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.values().any(predicate)
    }

    /// Calls `iteratee` with each item, its key and the collection.
    ///
    /// Items are visited in insertion order. Returning `false` (or
    /// [`ControlFlow::Break`](std::ops::ControlFlow::Break)) stops the
    /// iteration; returning `()` or `true` moves on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut collection = Collection::with_identity(|value: &u32| *value);
    /// collection.add_all([1, 2, 3, 4]);
    ///
    /// let mut visited = Vec::new();
    /// collection.each(|value, _key, _collection| {
    ///     visited.push(*value);
    ///     *value < 2
    /// });
    /// assert_eq!(visited, vec![1, 2]);
    /// ```
    pub fn each<F, R>(&self, mut iteratee: F)
    where
        F: FnMut(&T, &K, &Self) -> R,
        R: IterationControl,
    {
        for (key, item) in &self.items {
            if !iteratee(item, key, self).should_continue() {
                break;
            }
        }
    }

    /// Creates an empty collection with the same identity and hasher.
    fn empty_like(&self) -> Self
    where
        S: Clone,
    {
        Self::with_identity_and_hasher(self.identity.clone(), self.items.hasher().clone())
    }
}

impl<T, K, S> Collection<T, K, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Adds an item, replacing any stored item with the same identity.
    ///
    /// A replaced item keeps its position in insertion order and the length
    /// does not change.
    pub fn add(&mut self, item: T) {
        let key = self.identity.key_of(&item);
        if self.items.insert(key, item).is_none() {
            self.length += 1;
        }
        trace!(length = self.length, "added item");
    }

    /// Adds every item in order, as repeated calls to [`add`](Self::add).
    ///
    /// When several items share an identity the last one wins.
    pub fn add_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.add(item);
        }
    }

    /// Removes the item stored under `key` and returns it.
    ///
    /// Returns `None` if the collection is empty or the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut collection = Collection::with_identity(|word: &String| word.to_lowercase());
    /// collection.add("Hello".to_string());
    ///
    /// assert_eq!(collection.remove_one("hello"), Some("Hello".to_string()));
    /// assert_eq!(collection.remove_one("hello"), None);
    /// ```
    pub fn remove_one<Q>(&mut self, key: &Q) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.is_empty() {
            return None;
        }
        let removed = self.items.shift_remove(key)?;
        self.length -= 1;
        trace!(length = self.length, "removed item");
        Some(removed)
    }

    /// Removes the stored item with the same identity as `item`.
    pub fn remove_item(&mut self, item: &T) -> Option<T> {
        let key = self.identity.key_of(item);
        self.remove_one(&key)
    }

    /// Removes each key in turn.
    ///
    /// The result holds exactly one entry per key, in argument order, each
    /// being what [`remove_one`](Self::remove_one) returned for that key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut collection = Collection::with_identity(|value: &i32| *value);
    /// collection.add_all([1, 2]);
    ///
    /// assert_eq!(collection.remove_many(&[2, 5, 2]), vec![Some(2), None, None]);
    /// ```
    pub fn remove_many<'a, Q, I>(&mut self, keys: I) -> Vec<Option<T>>
    where
        I: IntoIterator<Item = &'a Q>,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        keys.into_iter().map(|key| self.remove_one(key)).collect()
    }

    /// Returns `true` if an item is stored under `key`.
    #[inline]
    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.contains_key(key)
    }

    /// Returns `true` if an item with the same identity as `item` is stored.
    #[inline]
    pub fn has_item(&self, item: &T) -> bool {
        self.items.contains_key(&self.identity.key_of(item))
    }

    /// Returns the item stored under `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.get(key)
    }

    /// Returns the stored item with the same identity as `item`.
    #[inline]
    pub fn get_item(&self, item: &T) -> Option<&T> {
        self.items.get(&self.identity.key_of(item))
    }

    /// Calls `action` with the item stored under `key`, if any.
    ///
    /// Only raw keys are looked up; no identity is computed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut collection = Collection::with_identity(|value: &i32| *value);
    /// collection.add(7);
    ///
    /// assert_eq!(collection.do_when_has(&7, |value| value * 2), Some(14));
    /// assert_eq!(collection.do_when_has(&8, |value| value * 2), None);
    /// ```
    pub fn do_when_has<Q, F, R>(&self, key: &Q, action: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&T) -> R,
    {
        self.items.get(key).map(action)
    }

    /// Returns a new collection holding the items that satisfy `predicate`.
    ///
    /// The result shares this collection's identity and keeps insertion
    /// order. Its storage is independent of this collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut collection = Collection::with_identity(|value: &i32| *value);
    /// collection.add_all(1..=6);
    ///
    /// let even = collection.find(|value| value % 2 == 0);
    /// assert_eq!(even.sort(), vec![&2, &4, &6]);
    /// assert_eq!(collection.len(), 6);
    /// ```
    pub fn find<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
        T: Clone,
        S: Clone,
    {
        let mut found = self.empty_like();
        for item in self.items.values() {
            if predicate(item) {
                found.add(item.clone());
            }
        }
        found
    }
}

impl<T: Identifiable> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.add_all(iter);
        collection
    }
}

impl<T, K, S> Extend<T> for Collection<T, K, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, T, K, S> IntoIterator for &'a Collection<T, K, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, K, S> IntoIterator for Collection<T, K, S> {
    type Item = T;
    type IntoIter = IntoIter<K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values()
    }
}

/// Two collections are equal when they report the same length and hold equal
/// entries in the same order. Identities are not compared.
impl<T, K, S> PartialEq for Collection<T, K, S>
where
    T: PartialEq,
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.items.iter().eq(other.items.iter())
    }
}

impl<T: fmt::Debug, K: fmt::Debug, S> fmt::Debug for Collection<T, K, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Collection")
            .field("identity", &self.identity)
            .field("length", &self.length)
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Collection<String, String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
