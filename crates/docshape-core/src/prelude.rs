// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use docshape_core::prelude::*;
//! ```

pub use crate::{
    Applied, CrudError, CrudService, DocumentStore, EntityMetadata, EntityShape, FilterDescriptor,
    FilterError, FilterShape, Identity, OperationResult, Pagination, Paging, PagingPolicy,
    PatchError, RawQuery, SearchPage, SearchQuery, SortDirection, SortField, SparseUpdate,
    StorageDocument, Validate, Violation, async_trait, decode_filter, decode_patch, validate,
    validate_patch
};
