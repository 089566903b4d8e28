// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! This module contains all code generation logic for the `#[derive(Entity)]`
//! macro. It orchestrates the parsing of entity definitions and delegates code
//! generation to specialized submodules.
//!
//! # Architecture
//!
//! ```text
//! entity.rs (orchestrator)
//! │
//! ├── parse/         → Attribute parsing (EntityDef, FieldDef)
//! │
//! ├── field_enum.rs  → Closed `{Entity}Field` enum
//! ├── shape.rs       → EntityShape impl (field table, typed read/write)
//! └── validate.rs    → Validate impl (declarative rules)
//! ```
//!
//! # Generated Code
//!
//! For an entity like:
//!
//! ```rust,ignore
//! #[derive(Entity, Default, Serialize, Deserialize)]
//! #[entity(collection = "users")]
//! pub struct User {
//!     #[id]
//!     #[field(storage = "_id")]
//!     pub id: String,
//!     #[validate(required, email)]
//!     pub email: String,
//! }
//! ```
//!
//! The macro generates:
//!
//! | Item | Purpose |
//! |------|---------|
//! | `UserField` | One variant per declared field, keys sparse updates |
//! | `impl EntityShape for User` | Static field table, collection, typed field access |
//! | `impl Validate for User` | Runs the `#[validate]` rules |

mod field_enum;
pub mod parse;
mod shape;
mod validate;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => generate(entity),
        Err(err) => err.write_errors().into()
    }
}

fn generate(entity: EntityDef) -> TokenStream {
    let field_enum = field_enum::generate(&entity);
    let shape = shape::generate(&entity);
    let validate = validate::generate(&entity);

    let expanded = quote! {
        #field_enum
        #shape
        #validate
    };

    expanded.into()
}
