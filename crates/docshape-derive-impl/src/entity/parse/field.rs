// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! This module handles parsing of field attributes and delegates to
//! specialized submodules for different concerns:
//!
//! - [`storage`]: Identity, storage name and exclusion
//! - [`validation`]: Declarative validation rules
//!
//! The wire name comes from serde: `#[serde(rename = "...")]` when present,
//! otherwise the container's `rename_all` rule applied to the field name.

mod storage;
mod validation;

pub use storage::StorageConfig;
use syn::{Field, Ident, Type};
pub use validation::ValidationConfig;

use crate::utils::{
    docs::extract_doc_comments,
    is_option,
    naming::{RenameRule, field_name, variant_ident},
    serde_attrs
};

/// Field definition with all parsed attributes.
///
/// # Example
///
/// ```rust,ignore
/// #[id]                          // StorageConfig::is_id = true
/// #[field(storage = "_id")]      // StorageConfig::storage = Some("_id")
/// #[validate(required)]          // ValidationConfig::required = true
/// pub id: String,
///
/// #[serde(rename = "mail")]      // wire = "mail"
/// pub email: String,
/// ```
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier (e.g., `id`, `date_of_birth`).
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Name used in request and response payloads.
    pub wire: String,

    /// Store configuration.
    pub storage: StorageConfig,

    /// Validation rules from `#[validate(...)]`.
    pub validation: ValidationConfig,

    /// Documentation comment, carried to the field enum variant.
    pub doc: Option<String>
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// `rename_all` is the container's serde rule.
    ///
    /// # Errors
    ///
    /// - Tuple struct field
    /// - Malformed `#[field]`, `#[validate]` or `#[serde]` attributes
    /// - `#[serde(flatten)]`
    /// - `#[id]` on a skipped field
    pub fn from_field(field: &Field, rename_all: RenameRule) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Entity fields must be named").with_span(field)
        })?;
        let serde = serde_attrs::field_options(&field.attrs)?;
        let validation = validation::parse_validation_attrs(&field.attrs)?;
        let doc = extract_doc_comments(&field.attrs);

        let mut storage = StorageConfig {
            skip: serde.skip,
            ..StorageConfig::default()
        };
        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                attr.meta.require_path_only()?;
                storage.is_id = true;
            } else if attr.path().is_ident("field") {
                storage.parse_field_attr(attr)?;
            }
        }

        if serde.flatten {
            return Err(darling::Error::custom(
                "flattened fields have no single wire name; declare the fields directly"
            )
            .with_span(&ident));
        }
        if storage.is_id && storage.skip {
            return Err(
                darling::Error::custom("#[id] field cannot be skipped").with_span(&ident)
            );
        }

        let wire = serde
            .rename
            .unwrap_or_else(|| rename_all.apply(&field_name(&ident)));

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            wire,
            storage,
            validation,
            doc
        })
    }

    /// Get the field name as an identifier.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Get the field type.
    #[must_use]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Variant of the generated field enum.
    #[must_use]
    pub fn variant(&self) -> Ident {
        variant_ident(&self.ident)
    }

    /// Wire name.
    #[must_use]
    pub fn wire(&self) -> &str {
        &self.wire
    }

    /// Storage name, defaulting to the wire name.
    #[must_use]
    pub fn storage_name(&self) -> &str {
        self.storage.storage.as_deref().unwrap_or(&self.wire)
    }

    /// Check if the field type is `Option<T>`.
    #[must_use]
    pub fn is_option(&self) -> bool {
        is_option(&self.ty)
    }

    /// Check if this field addresses the record.
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.storage.is_id
    }

    /// Check if this field is part of the entity shape.
    #[must_use]
    pub fn is_declared(&self) -> bool {
        !self.storage.skip
    }

    /// Get the validation configuration.
    #[must_use]
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    /// Get the documentation comment if present.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}
