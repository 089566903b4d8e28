// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and types for docshape.
//!
//! This crate is the runtime half of docshape. The derive macros in
//! `docshape-derive-impl` emit static descriptors that implement the traits
//! defined here; the engine then uses those descriptors to move records
//! between the wire, the application and a document store.
//!
//! # Overview
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`EntityShape`] / [`EntityMetadata`] | Static field table of an entity and the index built from it at startup |
//! | [`decode_patch`] / [`SparseUpdate`] | Sparse diff of exactly the fields a client supplied |
//! | [`validate`] / [`validate_patch`] | Declarative field rules, aware of partial updates |
//! | [`FilterShape`] / [`FilterDescriptor`] / [`decode_filter`] | Typed search filters decoded from query parameters |
//! | [`DocumentStore`] / [`CrudService`] | Storage contract and the orchestrator on top of it |
//!
//! # Usage
//!
//! Most users should depend on `docshape`, which re-exports this crate
//! together with the derives. Descriptors can also be written by hand:
//!
//! ```rust,ignore
//! use docshape_core::prelude::*;
//!
//! let metadata = EntityMetadata::<User>::extract()?;
//! let update = decode_patch(br#"{"name":"Ann"}"#, &Identity::from("u1"), &metadata)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod crud;
pub mod filter;
pub mod metadata;
pub mod outcome;
pub mod param;
pub mod prelude;
pub mod query;
pub mod shape;
pub mod sparse;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

/// Re-export async_trait for store implementations.
pub use async_trait::async_trait;
pub use crud::{Applied, CrudError, CrudService, SearchPage};
pub use filter::{FilterDescriptor, FilterOp, FilterShape, ParamSpec, Paging, PagingPolicy, SortField};
pub use metadata::{ConstructionError, EntityMetadata, MappingError};
pub use outcome::OperationResult;
pub use param::{FilterParam, ParamError, ParamScalar};
pub use query::{FilterError, RawQuery, decode_filter, encode_filter};
pub use shape::{EntityShape, FieldSpec};
pub use sparse::{
    Identity, PatchError, SparseUpdate, decode_entity, decode_patch, decode_replacement
};
pub use store::{DocumentStore, Predicate, SearchQuery, StorageDocument, compare_values};
pub use validation::{Validate, Violation, ViolationKind, validate, validate_patch};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Pagination window handed to the document store.
///
/// Produced by the query decoder from a filter's [`Paging`].
///
/// # Example
///
/// ```rust
/// use docshape_core::Pagination;
///
/// let first = Pagination::page(1, 25); // offset=0, limit=25
/// let third = Pagination::page(3, 20); // offset=40, limit=20
/// assert_eq!(first.offset, 0);
/// assert_eq!(third.offset, 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of results to return.
    pub limit: i64,

    /// Number of results to skip.
    pub offset: i64
}

impl Pagination {
    /// Create new pagination parameters.
    pub const fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset
        }
    }

    /// Create pagination for a 1-based page.
    ///
    /// Pages below 1 are treated as the first page.
    pub const fn page(page: i64, per_page: i64) -> Self {
        let page = if page < 1 { 1 } else { page };
        Self {
            limit:  per_page,
            offset: (page - 1).saturating_mul(per_page)
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit:  PagingPolicy::DEFAULT_LIMIT,
            offset: 0
        }
    }
}

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,

    /// Descending order (Z-A, 9-0, newest first).
    Desc
}

impl SortDirection {
    /// Query-string prefix for this direction (`-` for descending).
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Asc => "",
            Self::Desc => "-"
        }
    }
}
