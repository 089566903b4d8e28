// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Entity derive macro.
//!
//! It uses [`darling`] for entity-level attributes and manual parsing for
//! field-level attributes (which use marker-style syntax).
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── entity.rs          - Entity-level parsing (EntityDef)
//! └── field.rs           - Field-level parsing (FieldDef)
//!     ├── storage.rs     - Identity, storage name, skip
//!     └── validation.rs  - Validation rules
//! ```
//!
//! # Data Structures
//!
//! ```text
//! EntityDef
//! ├── ident: Ident          (struct name, e.g., "User")
//! ├── vis: Visibility       (pub, pub(crate), etc.)
//! ├── collection: String    (document store collection)
//! └── fields: Vec<FieldDef>
//!     └── FieldDef
//!         ├── ident: Ident              (field name)
//!         ├── ty: Type                  (field type)
//!         ├── wire: String              (payload key)
//!         ├── storage: StorageConfig
//!         │   ├── is_id: bool           (#[id] present)
//!         │   ├── storage: Option       (#[field(storage = "...")])
//!         │   └── skip: bool            (#[field(skip)] or #[serde(skip)])
//!         └── validation: ValidationConfig
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[entity(collection = "users")]
//! #[serde(rename_all = "camelCase")]
//! pub struct User {
//!     #[id]
//!     #[field(storage = "_id")]
//!     pub id: String,
//!     pub date_of_birth: Option<NaiveDate>,
//! }
//!
//! // Parses to:
//! // EntityDef {
//! //     ident: "User",
//! //     collection: "users",
//! //     fields: [
//! //         FieldDef { ident: "id", wire: "id", storage: { is_id: true, storage: "_id" } },
//! //         FieldDef { ident: "date_of_birth", wire: "dateOfBirth", ... },
//! //     ]
//! // }
//! ```

mod entity;
mod field;

pub use entity::EntityDef;
pub use field::{FieldDef, ValidationConfig};
