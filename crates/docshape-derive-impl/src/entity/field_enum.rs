// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field enumeration generation.
//!
//! Generates the closed `{Entity}Field` enum keying sparse updates.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! pub enum UserField {
//!     /// Record key.
//!     Id,
//!     Username,
//! }
//!
//! impl UserField {
//!     pub const ALL: [Self; 2] = [Self::Id, Self::Username];
//!     pub const fn wire_name(&self) -> &'static str { ... }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::EntityDef;

/// Generate the field enum and its inherent helpers.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let vis = &entity.vis;
    let enum_ident = entity.field_enum_ident();
    let enum_doc = format!("Declared fields of [`{}`].", entity.ident);
    let len = entity.declared_len();

    let variants = entity.declared_fields().map(|field| {
        let variant = field.variant();
        let doc = field
            .doc()
            .map(str::to_string)
            .unwrap_or_else(|| format!("`{}` field.", field.wire()));
        quote! {
            #[doc = #doc]
            #variant
        }
    });
    let all = entity.declared_fields().map(|field| field.variant());
    let wire_arms = entity.declared_fields().map(|field| {
        let variant = field.variant();
        let wire = field.wire();
        quote! { Self::#variant => #wire }
    });

    quote! {
        #[doc = #enum_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #vis enum #enum_ident {
            #(#variants),*
        }

        impl #enum_ident {
            /// Every field in declaration order.
            pub const ALL: [Self; #len] = [#(Self::#all),*];

            /// Name used in request and response payloads.
            pub const fn wire_name(&self) -> &'static str {
                match self {
                    #(#wire_arms),*
                }
            }
        }
    }
}
