// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! EntityDef constructor (from_derive_input).

use std::collections::HashMap;

use darling::FromDeriveInput;
use syn::DeriveInput;

use super::{super::field::FieldDef, EntityAttrs, EntityDef};
use crate::utils::{docs::extract_doc_comments, serde_attrs::container_rename_all};

impl EntityDef {
    /// Parse entity definition from syn's `DeriveInput`.
    ///
    /// This is the main entry point for parsing. It:
    ///
    /// 1. Parses entity-level attributes using darling
    /// 2. Reads the serde `rename_all` rule
    /// 3. Parses field-level attributes for each field
    /// 4. Checks the shape: identity present, names unique
    ///
    /// # Errors
    ///
    /// - Missing `collection` attribute
    /// - Applied to non-struct (enum, union), tuple struct or unit struct
    /// - Generic parameters
    /// - No `#[id]` field
    /// - Two fields sharing a wire name, a storage name or an enum variant
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(darling::Error::custom("Entity cannot be generic")
                .with_span(&attrs.generics));
        }
        if attrs.collection.trim().is_empty() {
            return Err(
                darling::Error::custom("collection cannot be empty").with_span(&attrs.ident)
            );
        }

        let rename_all = container_rename_all(&attrs.attrs)?;

        let fields: Vec<FieldDef> = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => {
                    let mut errors = darling::Error::accumulator();
                    let fields: Vec<FieldDef> = named
                        .named
                        .iter()
                        .filter_map(|field| errors.handle(FieldDef::from_field(field, rename_all)))
                        .collect();
                    errors.finish_with(fields)?
                }
                _ => {
                    return Err(darling::Error::custom("Entity requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Entity can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let entity = Self {
            ident: attrs.ident,
            vis: attrs.vis,
            collection: attrs.collection,
            fields,
            doc: extract_doc_comments(&input.attrs)
        };
        entity.check_shape()?;
        Ok(entity)
    }

    fn check_shape(&self) -> darling::Result<()> {
        if self.id_fields().next().is_none() {
            return Err(darling::Error::custom(
                "Entity must have at least one field with #[id] attribute"
            )
            .with_span(&self.ident));
        }

        let mut errors = darling::Error::accumulator();
        let mut wire = HashMap::new();
        let mut storage = HashMap::new();
        let mut variants = HashMap::new();
        for field in self.declared_fields() {
            if let Some(first) = wire.insert(field.wire().to_string(), field.name()) {
                errors.push(
                    darling::Error::custom(format!(
                        "wire name `{}` is already used by `{first}`",
                        field.wire()
                    ))
                    .with_span(field.name())
                );
                continue;
            }
            if let Some(first) = storage.insert(field.storage_name().to_string(), field.name()) {
                errors.push(
                    darling::Error::custom(format!(
                        "storage name `{}` is already used by `{first}`",
                        field.storage_name()
                    ))
                    .with_span(field.name())
                );
            }
            if let Some(first) = variants.insert(field.variant().to_string(), field.name()) {
                errors.push(
                    darling::Error::custom(format!(
                        "field enum variant `{}` is already generated for `{first}`",
                        field.variant()
                    ))
                    .with_span(field.name())
                );
            }
        }
        errors.finish()
    }
}
