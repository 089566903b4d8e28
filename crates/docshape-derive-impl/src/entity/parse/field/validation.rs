// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validation attribute parsing.
//!
//! Extracts `#[validate(...)]` attributes from fields. Each rule becomes one
//! call into `docshape_core::validation::rules` in the generated `Validate`
//! implementation.
//!
//! # Supported Rules
//!
//! | Rule | Fails when |
//! |------|------------|
//! | `required` | value is the type's zero value |
//! | `length(min = N, max = M)` | character count outside the bounds |
//! | `range(min = A, max = B)` | value outside the bounds |
//! | `email` | not an email address |
//! | `url` | not a URL |
//!
//! Rules may be split across several attributes:
//!
//! ```rust,ignore
//! #[validate(required, length(max = 100))]
//! #[validate(email)]
//! pub email: String,
//! ```

use syn::{Attribute, Expr, LitInt, meta::ParseNestedMeta};

/// Parsed validation rules of one field.
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// `required`.
    pub required: bool,

    /// Minimum character count.
    pub min_length: Option<u64>,

    /// Maximum character count.
    pub max_length: Option<u64>,

    /// Lower bound, as written.
    pub minimum: Option<Expr>,

    /// Upper bound, as written.
    pub maximum: Option<Expr>,

    /// `email`.
    pub email: bool,

    /// `url`.
    pub url: bool
}

impl ValidationConfig {
    /// Check if any rule is configured.
    #[must_use]
    pub fn has_validation(&self) -> bool {
        self.required || self.has_value_rules()
    }

    /// Check if any rule other than `required` is configured.
    #[must_use]
    pub fn has_value_rules(&self) -> bool {
        self.has_length() || self.has_range() || self.email || self.url
    }

    /// Check if a length bound is configured.
    #[must_use]
    pub fn has_length(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some()
    }

    /// Check if a range bound is configured.
    #[must_use]
    pub fn has_range(&self) -> bool {
        self.minimum.is_some() || self.maximum.is_some()
    }
}

/// Parse validation attributes from a field.
///
/// # Errors
///
/// Returns an error for unknown rules, malformed bounds and `min > max`
/// length bounds.
pub fn parse_validation_attrs(attrs: &[Attribute]) -> syn::Result<ValidationConfig> {
    let mut config = ValidationConfig::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            let path_str = meta.path.get_ident().map(|i| i.to_string());

            match path_str.as_deref() {
                Some("required") => config.required = true,
                Some("email") => config.email = true,
                Some("url") => config.url = true,
                Some("length") => {
                    meta.parse_nested_meta(|nested| {
                        match bound_name(&nested)? {
                            Bound::Min => config.min_length = Some(length_bound(&nested)?),
                            Bound::Max => config.max_length = Some(length_bound(&nested)?)
                        }
                        Ok(())
                    })?;
                }
                Some("range") => {
                    meta.parse_nested_meta(|nested| {
                        match bound_name(&nested)? {
                            Bound::Min => config.minimum = Some(nested.value()?.parse()?),
                            Bound::Max => config.maximum = Some(nested.value()?.parse()?)
                        }
                        Ok(())
                    })?;
                }
                _ => {
                    return Err(meta.error(
                        "unknown rule, expected `required`, `length`, `range`, `email` or `url`"
                    ));
                }
            }

            Ok(())
        })?;

        if let (Some(min), Some(max)) = (config.min_length, config.max_length)
            && min > max
        {
            return Err(syn::Error::new_spanned(
                attr,
                "length `min` must not exceed `max`"
            ));
        }
    }

    Ok(config)
}

enum Bound {
    Min,
    Max
}

fn bound_name(meta: &ParseNestedMeta<'_>) -> syn::Result<Bound> {
    if meta.path.is_ident("min") {
        Ok(Bound::Min)
    } else if meta.path.is_ident("max") {
        Ok(Bound::Max)
    } else {
        Err(meta.error("expected `min` or `max`"))
    }
}

fn length_bound(meta: &ParseNestedMeta<'_>) -> syn::Result<u64> {
    let value: LitInt = meta.value()?.parse()?;
    value.base10_parse()
}
