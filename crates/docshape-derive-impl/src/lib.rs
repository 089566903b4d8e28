// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ## Entity-Level `#[entity(...)]`
//!
//! ```rust,ignore
//! #[derive(Entity, Default, Serialize, Deserialize)]
//! #[entity(collection = "users")]   // Required: document store collection
//! #[serde(rename_all = "camelCase")] // Optional: applied to wire names
//! pub struct User { /* ... */ }
//! ```
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct User {
//!     #[id]                               // Identity; repeat for composite keys
//!     #[field(storage = "_id")]           // Storage name (default: wire name)
//!     #[validate(required)]
//!     pub id: String,
//!
//!     #[validate(required, email, length(max = 100))]
//!     pub email: String,
//!
//!     #[validate(range(min = 18, max = 120))]
//!     pub age: Option<u32>,               // Rules check the inner value
//!
//!     #[field(skip)]                      // Not part of the shape
//!     pub session: String,
//! }
//! ```
//!
//! ## Filter Attributes
//!
//! ```rust,ignore
//! #[derive(Filter, Default)]
//! #[filter(rename_all = "camelCase")]
//! pub struct UserFilter {
//!     pub id: Vec<String>,                           // eq, multi-valued
//!     #[filter(like)]
//!     pub username: Option<String>,
//!     #[filter(gte, field = "dateOfBirth")]
//!     pub date_of_birth_from: Option<NaiveDate>,
//!     #[filter(lte, param = "bornBefore", field = "dateOfBirth")]
//!     pub born_before: Option<NaiveDate>,
//!     #[paging]
//!     pub paging: Paging,
//! }
//! ```
//!
//! # Generated Code Overview
//!
//! | Derive | Generated |
//! |--------|-----------|
//! | `Entity` | `{Name}Field` enum, `impl EntityShape`, `impl Validate` |
//! | `Filter` | `impl FilterShape` |
//!
//! Generated code refers to `::docshape_core`, which must be a dependency of
//! the crate using the derives.
//!
//! # Compile-Time Guarantees
//!
//! - At least one `#[id]` field per entity
//! - Wire names and storage names are unique per entity
//! - Filter parameters are `Option<T>` or `Vec<T>`, never named `page`,
//!   `limit` or `sort`, and unique per filter
//! - At most one `#[paging]` block per filter

mod entity;
mod filter;
mod utils;

use proc_macro::TokenStream;

/// Derive the static shape of a document entity.
///
/// # Generated Items
///
/// For an entity named `User`:
///
/// - **`UserField`**: closed enum with one variant per declared field,
///   `ALL` in declaration order and `wire_name()`
/// - **`impl EntityShape for User`**: collection, field table (wire name,
///   storage name, identity flag) and typed per-field read / write through
///   JSON values
/// - **`impl Validate for User`**: the `#[validate(...)]` rules
///
/// The struct must also implement `Default`, `Serialize` and `Deserialize`;
/// serde's `rename_all` and `rename` options are honoured for wire names.
///
/// # Entity Attributes
///
/// | Attribute | Required | Description |
/// |-----------|----------|-------------|
/// | `collection` | **Yes** | Document store collection |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[id]` | Identity field. At least one is required. |
/// | `#[field(storage = "...")]` | Storage name, defaults to the wire name. |
/// | `#[field(skip)]` / `#[serde(skip)]` | Not part of the shape. |
/// | `#[validate(required)]` | Fails on the zero value, skipping the field's other rules. |
/// | `#[validate(length(min = N, max = M))]` | Character count bounds. |
/// | `#[validate(range(min = A, max = B))]` | Value bounds. |
/// | `#[validate(email)]` / `#[validate(url)]` | Format checks. |
///
/// # Example
///
/// ```rust,ignore
/// use docshape::Entity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Entity, Debug, Clone, Default, Serialize, Deserialize)]
/// #[entity(collection = "users")]
/// #[serde(rename_all = "camelCase")]
/// pub struct User {
///     #[id]
///     #[field(storage = "_id")]
///     #[validate(required)]
///     pub id: String,
///
///     #[validate(required, length(max = 100))]
///     pub username: String,
///
///     #[validate(length(max = 18))]
///     pub phone: String,
/// }
///
/// assert_eq!(UserField::Username.wire_name(), "username");
/// ```
#[proc_macro_derive(Entity, attributes(entity, id, field, validate))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}

/// Derive the static shape of a search filter.
///
/// Every field is a query parameter unless marked `#[paging]` or
/// `#[filter(skip)]`. Parameter fields are `Option<T>` (single value) or
/// `Vec<T>` (comma-separated or repeated values).
///
/// # Container Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[filter(rename_all = "...")]` | Naming rule for parameter names; `#[serde(rename_all)]` is used when absent |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[filter]` / `#[filter(eq)]` | Exact match, membership for `Vec<T>` (default) |
/// | `#[filter(like)]` | Case-insensitive substring |
/// | `#[filter(gte)]` / `#[filter(lte)]` | Inclusive bounds |
/// | `#[filter(param = "...")]` | Query parameter name |
/// | `#[filter(field = "...")]` | Targeted entity wire name (default: parameter name) |
/// | `#[filter(skip)]` | Not a parameter |
/// | `#[paging]` | The `Paging` block filled from `page`, `limit` and `sort` |
///
/// # Example
///
/// ```rust,ignore
/// use docshape::{Filter, Paging};
///
/// #[derive(Filter, Debug, Default)]
/// #[filter(rename_all = "camelCase")]
/// pub struct UserFilter {
///     pub id: Vec<String>,
///     #[filter(like)]
///     pub username: Option<String>,
///     #[paging]
///     pub paging: Paging,
/// }
/// ```
#[proc_macro_derive(Filter, attributes(filter, paging))]
pub fn derive_filter(input: TokenStream) -> TokenStream {
    filter::derive(input)
}
