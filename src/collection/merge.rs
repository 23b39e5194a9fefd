//! Merging collections that share an identity.
//!
//! [`Collection::merge`] unions the backing maps of several collections into
//! a new one. Its length is the sum of the inputs' lengths, taken verbatim:
//! when inputs hold the same identity the result reports more items than it
//! stores. [`Collection::merge_distinct`] reports the distinct count instead.

use std::hash::{BuildHasher, Hash};

use thiserror::Error;
use tracing::debug;

use super::Collection;

/// Errors raised by [`Collection::try_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A collection was built with a different identity function than the
    /// first one. `position` counts from zero, the first collection being 0.
    #[error(
        "collection at position {position} uses a different identity function than the first collection"
    )]
    IdentityMismatch {
        /// Position of the offending collection.
        position: usize,
    },
}

impl<T, K, S> Collection<T, K, S>
where
    T: Clone,
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Unions `first` and `rest` into a new collection.
    ///
    /// The result uses the identity function and hasher of `first`. Entries
    /// are copied in argument order; on a shared identity the later value
    /// wins and the earlier position is kept. The resulting length is the
    /// sum of the inputs' lengths, so shared identities are counted once per
    /// input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identity_collection::Collection;
    ///
    /// let mut left = Collection::with_identity(|value: &(u8, char)| value.0);
    /// left.add_all([(1, 'a'), (2, 'b')]);
    /// let mut right = left.find(|_| false);
    /// right.add_all([(2, 'B'), (3, 'C')]);
    ///
    /// let merged = Collection::merge(&left, [&right]);
    /// assert_eq!(merged.len(), 4);
    /// assert_eq!(merged.items().len(), 3);
    /// assert_eq!(merged.get(&2), Some(&(2, 'B')));
    /// ```
    pub fn merge<'a, I>(first: &'a Self, rest: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        let mut merged = first.empty_like();
        let mut length = 0;
        for source in std::iter::once(first).chain(rest) {
            merged.items.extend(
                source
                    .items
                    .iter()
                    .map(|(key, item)| (key.clone(), item.clone())),
            );
            length += source.length;
        }
        merged.length = length;
        if merged.length != merged.items.len() {
            debug!(
                length = merged.length,
                distinct = merged.items.len(),
                "merged collections share identities; length counts duplicates"
            );
        }
        merged
    }

    /// Unions every collection of `collections`.
    ///
    /// Returns `None` when there is nothing to merge; otherwise behaves as
    /// [`merge`](Self::merge) with the first collection leading.
    pub fn merge_all<'a, I>(collections: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        let mut collections = collections.into_iter();
        let first = collections.next()?;
        Some(Self::merge(first, collections))
    }

    /// Like [`merge`](Self::merge), but the length is the number of distinct
    /// identities in the result.
    pub fn merge_distinct<'a, I>(first: &'a Self, rest: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        let mut merged = Self::merge(first, rest);
        merged.length = merged.items.len();
        merged
    }

    /// Like [`merge`](Self::merge), but refuses collections whose identity
    /// function is not the one of `first`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::IdentityMismatch`] naming the first offending
    /// collection. Collections built with the default identity always match
    /// each other; custom identities match only when shared, as between a
    /// collection and the collections derived from it.
    pub fn try_merge<'a, I>(first: &'a Self, rest: I) -> Result<Self, MergeError>
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        let rest: Vec<&Self> = rest.into_iter().collect();
        if let Some(position) = rest
            .iter()
            .position(|collection| !collection.identity.is_same(&first.identity))
        {
            return Err(MergeError::IdentityMismatch {
                position: position + 1,
            });
        }
        Ok(Self::merge(first, rest))
    }
}
