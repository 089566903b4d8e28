// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Reading the `#[serde(...)]` attributes that affect wire names.
//!
//! Only `rename_all` (container), `rename`, `skip` and `flatten` (field) are
//! interpreted. Every other serde option is skipped without inspection.

use syn::{Attribute, Expr, LitStr, Token, meta::ParseNestedMeta};

use super::naming::RenameRule;

/// Serde options of one field.
#[derive(Debug, Default, Clone)]
pub struct SerdeField {
    /// `#[serde(rename = "...")]`.
    pub rename: Option<String>,

    /// `#[serde(skip)]`.
    pub skip: bool,

    /// `#[serde(flatten)]`.
    pub flatten: bool
}

/// Read `#[serde(rename_all = "...")]` from container attributes.
///
/// # Errors
///
/// Returns an error on malformed serde attributes or unknown rules.
pub fn container_rename_all(attrs: &[Attribute]) -> syn::Result<RenameRule> {
    let mut rule = RenameRule::None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") && meta.input.peek(Token![=]) {
                let value: LitStr = meta.value()?.parse()?;
                rule = RenameRule::parse(&value.value(), value.span())?;
                Ok(())
            } else {
                skip_meta(&meta)
            }
        })?;
    }
    Ok(rule)
}

/// Read the serde options of a field.
///
/// # Errors
///
/// Returns an error on malformed serde attributes.
pub fn field_options(attrs: &[Attribute]) -> syn::Result<SerdeField> {
    let mut options = SerdeField::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                let value: LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("flatten") {
                options.flatten = true;
                Ok(())
            } else {
                skip_meta(&meta)
            }
        })?;
    }
    Ok(options)
}

/// Consume the value or argument list of a nested meta item.
///
/// # Errors
///
/// Returns an error if the tokens after `=` are not an expression.
pub fn skip_meta(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.input.parse::<proc_macro2::TokenTree>()?;
    }
    Ok(())
}
