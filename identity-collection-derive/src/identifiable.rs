//! Implementation of the `#[derive(Identifiable)]` macro.
//!
//! This module picks the identity field of a struct and generates the
//! `Identifiable` implementation that hands it out.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Field, Fields, Generics, Ident, Index,
    Member,
};

/// Attribute marking the identity field explicitly.
const IDENTITY_ATTRIBUTE: &str = "identity";

/// Field names used when no field is marked, in order of preference.
const FALLBACK_FIELD_NAMES: [&str; 2] = ["_id", "id"];

/// Main implementation of the Identifiable derive macro.
pub fn derive_identifiable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(data_struct) => {
            generate_identifiable(&input.ident, &input.generics, &data_struct.fields)
                .unwrap_or_else(syn::Error::into_compile_error)
        }
        Data::Enum(_) => syn::Error::new_spanned(
            &input.ident,
            "Identifiable can only be derived for structs, not enums. Implement it by hand to pick an identity per variant.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Identifiable cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

/// Generates the `Identifiable` implementation for a struct.
fn generate_identifiable(
    name: &Ident,
    generics: &Generics,
    fields: &Fields,
) -> syn::Result<TokenStream2> {
    let (member, field) = select_identity_field(name, fields)?;
    let field_type = &field.ty;

    let mut generics = generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(#field_type: ::core::fmt::Display));
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::identity_collection::Identifiable for #name #type_generics #where_clause {
            type Id = #field_type;

            #[inline]
            fn id(&self) -> &Self::Id {
                &self.#member
            }
        }
    })
}

/// Picks the field marked `#[identity]`, else the field named `_id`, else `id`.
fn select_identity_field<'a>(name: &Ident, fields: &'a Fields) -> syn::Result<(Member, &'a Field)> {
    let marked: Vec<(usize, &Field)> = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| {
            field
                .attrs
                .iter()
                .any(|attribute| attribute.path().is_ident(IDENTITY_ATTRIBUTE))
        })
        .collect();

    match marked.as_slice() {
        [(index, field)] => return Ok((member_of(*index, field), *field)),
        [_, (_, second), ..] => {
            return Err(syn::Error::new_spanned(
                second,
                "only one field may be marked #[identity]",
            ));
        }
        [] => {}
    }

    FALLBACK_FIELD_NAMES
        .iter()
        .find_map(|fallback| {
            fields.iter().enumerate().find(|(_, field)| {
                field
                    .ident
                    .as_ref()
                    .is_some_and(|ident| ident == *fallback)
            })
        })
        .map(|(index, field)| (member_of(index, field), field))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                name,
                "Identifiable needs an identity field: mark one with #[identity] or name it `_id` or `id`",
            )
        })
}

fn member_of(index: usize, field: &Field) -> Member {
    field
        .ident
        .clone()
        .map_or_else(|| Member::Unnamed(Index::from(index)), Member::Named)
}
