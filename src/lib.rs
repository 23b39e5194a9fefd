//! # identity-collection
//!
//! An insertion-ordered collection of domain objects, deduplicated by a
//! caller-supplied identity function rather than by value equality.
//!
//! ## Overview
//!
//! - **[`Collection`]**: the container. Items are keyed by the value the
//!   identity function extracts from them; adding an item whose identity is
//!   already present replaces the stored value in place.
//! - **Derived views**: [`Collection::find`], [`Collection::group_by`],
//!   [`Collection::sort`] and [`Collection::single`] build on iteration.
//! - **[`filter`]**: `and` / `or` combinators over lists of predicates.
//! - **Merging**: [`Collection::merge`] and friends union several
//!   collections that share an identity function.
//!
//! ## Feature Flags
//!
//! - `derive` (default): `#[derive(Identifiable)]`
//! - `arc`: share identity functions through `Arc`, making collections
//!   `Send + Sync` when their contents are
//! - `fxhash` / `ahash`: faster hashers for the backing map
//! - `full`: `derive` and `arc`
//!
//! ## Example
//!
//! ```rust
//! use identity_collection::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Task {
//!     id: u32,
//!     title: &'static str,
//! }
//!
//! let mut tasks = Collection::with_identity(|task: &Task| task.id);
//! tasks.add(Task { id: 1, title: "write" });
//! tasks.add(Task { id: 2, title: "review" });
//! tasks.add(Task { id: 1, title: "rewrite" });
//!
//! assert_eq!(tasks.len(), 2);
//! assert_eq!(tasks.get(&1).map(|task| task.title), Some("rewrite"));
//! assert_eq!(tasks.remove_one(&2).map(|task| task.title), Some("review"));
//! assert_eq!(tasks.remove_one(&2), None);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Lets `#[derive(Identifiable)]` resolve `::identity_collection` inside this crate.
extern crate self as identity_collection;

/// Prelude module for convenient imports.
///
/// ```rust
/// use identity_collection::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::*;
    pub use crate::filter;

    #[cfg(feature = "derive")]
    pub use identity_collection_derive::Identifiable;
}

pub mod collection;
pub mod filter;

pub use collection::{
    Collection, DefaultHashBuilder, GroupKey, Identifiable, Identity, IdentityFunction,
    IterationControl, MergeError,
};

#[cfg(feature = "derive")]
pub use identity_collection_derive::Identifiable;
