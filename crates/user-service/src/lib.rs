// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! User REST service.
//!
//! Wires the [`User`](model::User) entity and its
//! [`UserFilter`](filter::UserFilter) to a [`MemoryStore`](store::MemoryStore)
//! through a [`CrudService`] and serves it over axum.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use docshape::{ConstructionError, CrudService, EntityMetadata, FilterDescriptor};

use crate::{
    config::Config,
    filter::UserFilter,
    model::User,
    store::{CollectionSpec, MemoryStore}
};

/// Orchestrator serving `/users`.
pub type UserService = CrudService<User, UserFilter, MemoryStore>;

/// Build the service from configuration.
///
/// Metadata and the filter descriptor are extracted once here and shared by
/// every request.
///
/// # Errors
///
/// Returns [`ConstructionError`] if the entity or filter shape is invalid.
pub fn build_service(config: &Config) -> Result<UserService, ConstructionError> {
    let metadata = EntityMetadata::<User>::extract()?;
    let filters =
        FilterDescriptor::<UserFilter>::build(&metadata)?.with_paging(config.paging.policy());

    let collection = config
        .store
        .collection
        .clone()
        .unwrap_or_else(|| metadata.collection().to_string());
    let spec = CollectionSpec {
        key:    metadata
            .identity_fields()
            .map(|field| field.storage.to_string())
            .collect(),
        unique: config.store.unique.clone()
    };
    let store = MemoryStore::new().with_collection(collection.as_str(), spec);

    tracing::debug!(
        collection = %collection,
        fields = metadata.fields().len(),
        params = filters.params().len(),
        "user service assembled"
    );

    Ok(CrudService::new(Arc::new(metadata), Arc::new(filters), Arc::new(store))
        .with_collection(collection))
}
