// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `EntityShape` implementation generation.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! impl ::docshape_core::EntityShape for User {
//!     type Field = UserField;
//!     const NAME: &'static str = "User";
//!     const COLLECTION: &'static str = "users";
//!
//!     fn fields() -> &'static [FieldSpec<UserField>] {
//!         static FIELDS: [FieldSpec<UserField>; 2] = [
//!             FieldSpec::new(UserField::Id, "id").stored_as("_id").identity(),
//!             FieldSpec::new(UserField::Username, "username"),
//!         ];
//!         &FIELDS
//!     }
//!
//!     fn read(&self, field: UserField) -> serde_json::Result<Value> {
//!         match field {
//!             UserField::Id => serde_json::to_value(&self.id),
//!             UserField::Username => serde_json::to_value(&self.username),
//!         }
//!     }
//!
//!     fn write(&mut self, field: UserField, value: Value) -> serde_json::Result<()> { ... }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, FieldDef};

/// Generate the `EntityShape` implementation.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let enum_ident = entity.field_enum_ident();
    let name = entity.name_str();
    let collection = &entity.collection;
    let len = entity.declared_len();

    let specs = entity
        .declared_fields()
        .map(|field| field_spec(field, &enum_ident));
    let read_arms = entity.declared_fields().map(|field| {
        let variant = field.variant();
        let member = field.name();
        quote! {
            #enum_ident::#variant => ::docshape_core::__private::serde_json::to_value(&self.#member)
        }
    });
    let write_arms = entity.declared_fields().map(|field| {
        let variant = field.variant();
        let member = field.name();
        quote! {
            #enum_ident::#variant => {
                self.#member = ::docshape_core::__private::serde_json::from_value(value)?;
            }
        }
    });

    quote! {
        impl ::docshape_core::EntityShape for #ident {
            type Field = #enum_ident;

            const NAME: &'static str = #name;
            const COLLECTION: &'static str = #collection;

            fn fields() -> &'static [::docshape_core::FieldSpec<#enum_ident>] {
                static FIELDS: [::docshape_core::FieldSpec<#enum_ident>; #len] = [#(#specs),*];
                &FIELDS
            }

            fn read(
                &self,
                field: #enum_ident
            ) -> ::docshape_core::__private::serde_json::Result<::docshape_core::__private::serde_json::Value> {
                match field {
                    #(#read_arms),*
                }
            }

            fn write(
                &mut self,
                field: #enum_ident,
                value: ::docshape_core::__private::serde_json::Value
            ) -> ::docshape_core::__private::serde_json::Result<()> {
                match field {
                    #(#write_arms)*
                }
                Ok(())
            }
        }
    }
}

fn field_spec(field: &FieldDef, enum_ident: &syn::Ident) -> TokenStream {
    let variant = field.variant();
    let wire = field.wire();
    let stored_as = field
        .storage
        .storage
        .as_deref()
        .filter(|storage| *storage != wire)
        .map(|storage| quote! { .stored_as(#storage) });
    let identity = field.is_id().then(|| quote! { .identity() });

    quote! {
        ::docshape_core::FieldSpec::new(#enum_ident::#variant, #wire) #stored_as #identity
    }
}
