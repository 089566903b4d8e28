// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities for code generation.
//!
//! # Submodules
//!
//! - [`docs`]: Doc comment extraction
//! - [`naming`]: Wire names and enum variant names
//! - [`serde_attrs`]: The serde options that change wire names

pub mod docs;
pub mod naming;
pub mod serde_attrs;

use syn::Type;

/// Last path segment of a type, with its generic argument if it has exactly
/// one (`Option<String>` → `("Option", Some(String))`).
pub fn outer_type(ty: &Type) -> Option<(String, Option<&Type>)> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    let inner = match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) if args.args.len() == 1 => {
            match args.args.first() {
                Some(syn::GenericArgument::Type(inner)) => Some(inner),
                _ => None
            }
        }
        _ => None
    };
    Some((segment.ident.to_string(), inner))
}

/// Check if a type is spelled `Option<T>`.
pub fn is_option(ty: &Type) -> bool {
    matches!(outer_type(ty), Some((name, Some(_))) if name == "Option")
}
