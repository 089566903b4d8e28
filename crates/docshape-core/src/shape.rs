// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static entity descriptors.
//!
//! An entity describes its shape once, at compile time, through
//! [`EntityShape`]. `#[derive(Entity)]` writes the implementation; it can also
//! be written by hand.
//!
//! ```rust,ignore
//! #[derive(Entity, Default, Serialize, Deserialize)]
//! #[entity(collection = "users")]
//! #[serde(rename_all = "camelCase")]
//! pub struct User {
//!     #[id]
//!     #[field(storage = "_id")]
//!     pub id: String,
//!     pub user_name: String,
//! }
//!
//! // Generates:
//! // pub enum UserField { Id, UserName }
//! // impl EntityShape for User { type Field = UserField; ... }
//! ```

use std::{fmt::Debug, hash::Hash};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// One declared field of an entity.
///
/// `field` is the variant of the entity's closed field enumeration; the
/// position of the spec inside [`EntityShape::fields`] is its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec<F> {
    /// Field variant.
    pub field: F,

    /// Name used in request and response payloads.
    pub wire: &'static str,

    /// Name used by the document store.
    pub storage: &'static str,

    /// Whether the field addresses the record.
    pub identity: bool
}

impl<F> FieldSpec<F> {
    /// Create a non-identity field whose storage name equals its wire name.
    pub const fn new(field: F, wire: &'static str) -> Self {
        Self {
            field,
            wire,
            storage: wire,
            identity: false
        }
    }

    /// Override the storage name.
    pub const fn stored_as(mut self, storage: &'static str) -> Self {
        self.storage = storage;
        self
    }

    /// Mark the field as (part of) the identity.
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
}

/// Compile-time shape of an entity.
///
/// The serde representation of the entity must use the wire names listed in
/// [`fields`](EntityShape::fields). `Default` supplies the zero values used
/// for keys absent from a payload.
pub trait EntityShape:
    Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Closed enumeration of the declared fields.
    type Field: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Entity name used in diagnostics.
    const NAME: &'static str;

    /// Document store collection holding the records.
    const COLLECTION: &'static str;

    /// Declared fields in declaration order.
    fn fields() -> &'static [FieldSpec<Self::Field>];

    /// Read one field as a tagged JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the field's `Serialize` implementation fails.
    fn read(&self, field: Self::Field) -> serde_json::Result<Value>;

    /// Overwrite one field from a tagged JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not decode into the field's type.
    fn write(&mut self, field: Self::Field, value: Value) -> serde_json::Result<()>;
}
