// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation extraction utilities.
//!
//! Doc comments (`///` and `/** */`) reach the macro as `#[doc = "..."]`
//! attributes. Field docs are carried over to the variants of the generated
//! `{Entity}Field` enum so the enum reads like the struct it mirrors.
//!
//! # Example
//!
//! ```rust,ignore
//! pub struct User {
//!     /// Login shown to other users.
//!     pub username: String,
//! }
//!
//! // Generates:
//! // pub enum UserField {
//! //     /// Login shown to other users.
//! //     Username,
//! // }
//! ```

use syn::Attribute;

/// Extract doc comments from attributes.
///
/// Combines all `#[doc = "..."]` attributes into a single string,
/// trimming leading whitespace from each line.
///
/// Returns `None` if no doc comments are present.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let doc_lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let syn::Meta::NameValue(meta) = &attr.meta
                && let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) = &meta.value
            {
                return Some(lit_str.value());
            }
            None
        })
        .collect();

    if doc_lines.is_empty() {
        return None;
    }

    // Join lines and clean up
    let combined = doc_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    // Trim the result and return if non-empty
    let trimmed = combined.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
