// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing with darling.
//!
//! This module defines the internal [`EntityAttrs`] structure used for
//! parsing `#[entity(...)]` attributes. This is an implementation detail;
//! the public API uses [`EntityDef`](super::EntityDef).
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `collection` | Yes | none | Document store collection |
//!
//! `#[serde(...)]` container attributes are forwarded so that `rename_all`
//! can be applied to wire names.

use darling::FromDeriveInput;
use syn::{Attribute, Generics, Ident, Visibility};

/// Entity-level attributes parsed from `#[entity(...)]`.
///
/// # Example
///
/// ```rust,ignore
/// #[entity(collection = "users")]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named), forward_attrs(serde))]
pub struct EntityAttrs {
    /// Struct identifier (e.g., `User`).
    pub ident: Ident,

    /// Struct visibility, shared by the generated field enum.
    pub vis: Visibility,

    /// Generic parameters. Entities must not declare any.
    pub generics: Generics,

    /// Forwarded `#[serde(...)]` attributes.
    pub attrs: Vec<Attribute>,

    /// Document store collection name.
    ///
    /// This is a required attribute with no default value.
    pub collection: String
}
