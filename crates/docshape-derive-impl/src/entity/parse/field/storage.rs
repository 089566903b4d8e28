// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage configuration for entity fields.
//!
//! Controls how a field is addressed and named in the document store.
//!
//! ```rust,ignore
//! #[id]
//! #[field(storage = "_id")]
//! pub id: String,
//!
//! #[field(skip)]
//! pub session_token: String,
//! ```

use syn::{Attribute, LitStr};

/// Document store configuration of one field.
///
/// # Attributes
///
/// - `#[id]`: Field addresses the record (repeat for composite identities)
/// - `#[field(storage = "name")]`: Storage name, defaults to the wire name
/// - `#[field(skip)]`: Field is not part of the entity shape
#[derive(Debug, Default, Clone)]
pub struct StorageConfig {
    /// Identity field (`#[id]`).
    pub is_id: bool,

    /// Storage name override.
    pub storage: Option<String>,

    /// Excluded from the entity shape.
    pub skip: bool
}

impl StorageConfig {
    /// Parse `#[field(...)]` into this config.
    ///
    /// # Errors
    ///
    /// Returns an error on unknown options or a blank storage name.
    pub fn parse_field_attr(&mut self, attr: &Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("storage") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().trim().is_empty() {
                    return Err(syn::Error::new(value.span(), "storage name cannot be empty"));
                }
                self.storage = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                self.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `storage = \"...\"` or `skip`"))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_name_is_read() {
        let attr: Attribute = syn::parse_quote!(#[field(storage = "_id")]);
        let mut config = StorageConfig::default();
        config.parse_field_attr(&attr).unwrap();
        assert_eq!(config.storage.as_deref(), Some("_id"));
        assert!(!config.skip);
    }

    #[test]
    fn skip_is_read() {
        let attr: Attribute = syn::parse_quote!(#[field(skip)]);
        let mut config = StorageConfig::default();
        config.parse_field_attr(&attr).unwrap();
        assert!(config.skip);
    }

    #[test]
    fn blank_storage_is_error() {
        let attr: Attribute = syn::parse_quote!(#[field(storage = " ")]);
        assert!(StorageConfig::default().parse_field_attr(&attr).is_err());
    }

    #[test]
    fn unknown_option_is_error() {
        let attr: Attribute = syn::parse_quote!(#[field(create)]);
        assert!(StorageConfig::default().parse_field_attr(&attr).is_err());
    }
}
