// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Validate` implementation generation.
//!
//! Each `#[validate(...)]` rule becomes one call into
//! `docshape_core::validation::rules`, in declaration order. Value rules on
//! `Option<T>` fields inspect the inner value and pass when it is `None`.
//! A field that fails `required` skips its value rules.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! impl ::docshape_core::Validate for User {
//!     fn violations(&self) -> Vec<Violation> {
//!         let mut violations = Vec::new();
//!         if let Some(violation) = rules::required("email", &self.email) {
//!             violations.push(violation);
//!         } else {
//!             violations.extend(rules::email("email", &self.email));
//!         }
//!         if let Some(value) = self.phone.as_ref() {
//!             violations.extend(rules::length("phone", value, None, Some(18)));
//!         }
//!         violations
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, FieldDef};

/// Generate the `Validate` implementation.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let checks: Vec<TokenStream> = entity
        .declared_fields()
        .filter(|field| field.validation().has_validation())
        .map(field_checks)
        .collect();

    let body = if checks.is_empty() {
        quote! { ::std::vec::Vec::new() }
    } else {
        quote! {
            let mut violations = ::std::vec::Vec::new();
            #(#checks)*
            violations
        }
    };

    quote! {
        impl ::docshape_core::Validate for #ident {
            fn violations(&self) -> ::std::vec::Vec<::docshape_core::Violation> {
                #body
            }
        }
    }
}

fn field_checks(field: &FieldDef) -> TokenStream {
    let member = field.name();
    let wire = field.wire();
    let rules = field.validation();

    let value = if field.is_option() {
        quote! { value }
    } else {
        quote! { &self.#member }
    };
    let mut value_rules = Vec::new();
    if rules.has_length() {
        let min = optional_bound(rules.min_length.map(|min| quote! { #min }));
        let max = optional_bound(rules.max_length.map(|max| quote! { #max }));
        value_rules.push(quote! {
            violations.extend(::docshape_core::validation::rules::length(#wire, #value, #min, #max));
        });
    }
    if rules.has_range() {
        let min = optional_bound(rules.minimum.as_ref().map(|min| quote! { #min }));
        let max = optional_bound(rules.maximum.as_ref().map(|max| quote! { #max }));
        value_rules.push(quote! {
            violations.extend(::docshape_core::validation::rules::range(#wire, #value, #min, #max));
        });
    }
    if rules.email {
        value_rules.push(quote! {
            violations.extend(::docshape_core::validation::rules::email(#wire, #value));
        });
    }
    if rules.url {
        value_rules.push(quote! {
            violations.extend(::docshape_core::validation::rules::url(#wire, #value));
        });
    }

    let value_rules = if value_rules.is_empty() {
        TokenStream::new()
    } else if field.is_option() {
        quote! {
            if let ::std::option::Option::Some(value) = self.#member.as_ref() {
                #(#value_rules)*
            }
        }
    } else {
        quote! { #(#value_rules)* }
    };

    if !rules.required {
        return value_rules;
    }
    let required = quote! {
        ::docshape_core::validation::rules::required(#wire, &self.#member)
    };
    if value_rules.is_empty() {
        return quote! { violations.extend(#required); };
    }
    quote! {
        if let ::std::option::Option::Some(violation) = #required {
            violations.push(violation);
        } else {
            #value_rules
        }
    }
}

fn optional_bound(bound: Option<TokenStream>) -> TokenStream {
    match bound {
        Some(bound) => quote! { ::std::option::Option::Some(#bound) },
        None => quote! { ::std::option::Option::None }
    }
}
