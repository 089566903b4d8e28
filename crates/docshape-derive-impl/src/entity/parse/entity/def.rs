// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! EntityDef struct definition and accessors.
//!
//! [`EntityDef`] is created once during macro expansion and passed to every
//! generator. It owns all its data.

use proc_macro2::Span;
use syn::{Ident, Visibility};

use super::super::field::FieldDef;

/// Complete parsed entity definition.
///
/// # Field Access
///
/// ```rust,ignore
/// // Fields that take part in the shape, in declaration order
/// let declared = entity.declared_fields();
///
/// // Identity fields (never empty)
/// let ids = entity.id_fields();
/// ```
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier (e.g., `User`).
    pub ident: Ident,

    /// Struct visibility.
    pub vis: Visibility,

    /// Document store collection.
    pub collection: String,

    /// All fields in declaration order, skipped ones included.
    pub fields: Vec<FieldDef>,

    /// Documentation comment of the struct.
    pub doc: Option<String>
}

impl EntityDef {
    /// Struct name as a string.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Identifier of the generated field enum (`User` → `UserField`).
    #[must_use]
    pub fn field_enum_ident(&self) -> Ident {
        Ident::new(&format!("{}Field", self.ident), Span::call_site())
    }

    /// Fields that take part in the entity shape.
    pub fn declared_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|field| field.is_declared())
    }

    /// Number of declared fields.
    #[must_use]
    pub fn declared_len(&self) -> usize {
        self.declared_fields().count()
    }

    /// Identity fields in declaration order.
    pub fn id_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.declared_fields().filter(|field| field.is_id())
    }
}
