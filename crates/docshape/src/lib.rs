// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # docshape
//!
//! One crate, all features. Re-exports:
//! - [`Entity`] and [`Filter`] derive macros from `docshape-derive-impl`
//! - All types from `docshape-core` ([`EntityMetadata`], [`SparseUpdate`],
//!   [`FilterDescriptor`], [`CrudService`], ...)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use docshape::{Entity, EntityMetadata, Identity, decode_patch};
//!
//! #[derive(Entity, Default, Serialize, Deserialize)]
//! #[entity(collection = "users")]
//! pub struct User {
//!     #[id]
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! let metadata = EntityMetadata::<User>::extract()?;
//! let update = decode_patch(br#"{"name":"Ann"}"#, &Identity::from("u1"), &metadata)?;
//! assert_eq!(update.len(), 1);
//! ```

pub use docshape_core::*;
pub use docshape_derive_impl::{Entity, Filter};
