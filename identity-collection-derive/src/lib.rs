//! Derive macro for identity-collection.
//!
//! This crate provides `#[derive(Identifiable)]`, which implements the
//! `identity_collection::Identifiable` trait so that a type can be stored in a
//! `Collection` keyed by its default identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use identity_collection::{Collection, Identifiable};
//!
//! #[derive(Clone, Identifiable)]
//! struct Invoice {
//!     _id: u64,
//!     amount: u32,
//! }
//!
//! let mut invoices = Collection::new();
//! invoices.add(Invoice { _id: 10, amount: 250 });
//! assert!(invoices.has_key("10"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod identifiable;

use proc_macro::TokenStream;

/// Derive macro implementing `Identifiable` for a struct.
///
/// The identity field is, in order of preference:
///
/// 1. the field marked `#[identity]` (named or tuple field),
/// 2. the field named `_id`,
/// 3. the field named `id`.
///
/// Anything else is a compile error, as is marking more than one field.
/// The field type must implement `Display`; the default identity key is its
/// string form.
///
/// # Generated Code
///
/// ```rust,ignore
/// impl ::identity_collection::Identifiable for StructName
/// where
///     FieldType: ::core::fmt::Display,
/// {
///     type Id = FieldType;
///
///     fn id(&self) -> &Self::Id {
///         &self.field
///     }
/// }
/// ```
///
/// # Example
///
/// ```rust,ignore
/// use identity_collection::Identifiable;
///
/// #[derive(Identifiable)]
/// struct Customer {
///     #[identity]
///     email: String,
///     name: String,
/// }
///
/// #[derive(Identifiable)]
/// struct Code(#[identity] u32, &'static str);
/// ```
///
/// # Generics
///
/// Generic structs are supported; the implementation requires the identity
/// field's type to implement `Display`:
///
/// ```rust,ignore
/// #[derive(Identifiable)]
/// struct Keyed<K, V> {
///     id: K,
///     value: V,
/// }
/// ```
#[proc_macro_derive(Identifiable, attributes(identity))]
pub fn derive_identifiable(input: TokenStream) -> TokenStream {
    identifiable::derive_identifiable_impl(input)
}
