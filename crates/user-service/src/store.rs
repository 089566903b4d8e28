// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory document store.
//!
//! Each collection is a `BTreeMap` from the serialised identity to the
//! storage document. Mutations answer with the integer convention of
//! [`DocumentStore`]:
//!
//! | Operation | Code |
//! |-----------|------|
//! | `insert` | `1`, or `-1` on a duplicate identity or unique value |
//! | `replace` / `apply_partial` | matched count, `-1` on a unique value clash |
//! | `remove` | deleted count |

use std::collections::{BTreeMap, HashMap};

use docshape_core::{DocumentStore, SearchQuery, StorageDocument, async_trait};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failure of the store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection was never registered.
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),

    /// A document or key lacks an identity field.
    #[error("document in `{collection}` has no `{field}` key")]
    MissingKey {
        /// Collection name.
        collection: String,
        /// Missing storage field.
        field:      String
    },

    /// The identity could not be serialised.
    #[error(transparent)]
    Encode(#[from] serde_json::Error)
}

/// Identity and unique fields of one collection, by storage name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSpec {
    /// Fields forming the identity, in order.
    pub key: Vec<String>,

    /// Fields whose non-empty values must differ between documents.
    pub unique: Vec<String>
}

type Collection = BTreeMap<String, StorageDocument>;

/// Document store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    specs:       HashMap<String, CollectionSpec>,
    collections: RwLock<HashMap<String, Collection>>
}

impl MemoryStore {
    /// Create a store without collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection.
    pub fn with_collection(mut self, name: impl Into<String>, spec: CollectionSpec) -> Self {
        let name = name.into();
        self.collections
            .get_mut()
            .insert(name.clone(), Collection::new());
        self.specs.insert(name, spec);
        self
    }

    fn spec(&self, collection: &str) -> Result<&CollectionSpec, StoreError> {
        self.specs
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_owned()))
    }

    fn key_of(&self, collection: &str, document: &StorageDocument) -> Result<String, StoreError> {
        let spec = self.spec(collection)?;
        let mut parts = Vec::with_capacity(spec.key.len());
        for field in &spec.key {
            let value = document
                .get(field)
                .filter(|value| !value.is_null())
                .ok_or_else(|| StoreError::MissingKey {
                    collection: collection.to_owned(),
                    field:      field.clone()
                })?;
            parts.push(value);
        }
        Ok(serde_json::to_string(&parts)?)
    }

    /// Check if `candidate` shares a unique value with another document.
    fn clashes(
        &self,
        collection: &str,
        documents: &Collection,
        key: &str,
        candidate: &StorageDocument
    ) -> Result<bool, StoreError> {
        let spec = self.spec(collection)?;
        let clash = spec.unique.iter().any(|field| {
            let Some(value) = candidate.get(field).filter(|value| !is_empty(value)) else {
                return false;
            };
            documents
                .iter()
                .any(|(other, document)| other != key && document.get(field) == Some(value))
        });
        Ok(clash)
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false
    }
}

fn collection_mut<'a>(
    collections: &'a mut HashMap<String, Collection>,
    name: &str
) -> Result<&'a mut Collection, StoreError> {
    collections
        .get_mut(name)
        .ok_or_else(|| StoreError::UnknownCollection(name.to_owned()))
}

fn window(len: usize, value: i64) -> usize {
    usize::try_from(value).map_or(0, |value| value.min(len))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    type Error = StoreError;

    async fn all(&self, collection: &str) -> Result<Vec<StorageDocument>, StoreError> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_owned()))?;
        Ok(documents.values().cloned().collect())
    }

    async fn load(
        &self,
        collection: &str,
        key: &StorageDocument
    ) -> Result<Option<StorageDocument>, StoreError> {
        let id = self.key_of(collection, key)?;
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_owned()))?;
        Ok(documents.get(&id).cloned())
    }

    async fn insert(&self, collection: &str, document: StorageDocument) -> Result<i64, StoreError> {
        let id = self.key_of(collection, &document)?;
        let mut collections = self.collections.write().await;
        let documents = collection_mut(&mut collections, collection)?;
        if documents.contains_key(&id) || self.clashes(collection, documents, &id, &document)? {
            tracing::debug!(collection, %id, "insert rejected");
            return Ok(-1);
        }
        documents.insert(id, document);
        Ok(1)
    }

    async fn replace(
        &self,
        collection: &str,
        key: &StorageDocument,
        document: StorageDocument
    ) -> Result<i64, StoreError> {
        let id = self.key_of(collection, key)?;
        let mut collections = self.collections.write().await;
        let documents = collection_mut(&mut collections, collection)?;
        if !documents.contains_key(&id) {
            return Ok(0);
        }
        if self.clashes(collection, documents, &id, &document)? {
            tracing::debug!(collection, %id, "replace rejected");
            return Ok(-1);
        }
        documents.insert(id, document);
        Ok(1)
    }

    async fn apply_partial(
        &self,
        collection: &str,
        key: &StorageDocument,
        patch: StorageDocument
    ) -> Result<i64, StoreError> {
        let id = self.key_of(collection, key)?;
        let mut collections = self.collections.write().await;
        let documents = collection_mut(&mut collections, collection)?;
        let Some(current) = documents.get(&id) else {
            return Ok(0);
        };
        let mut merged = current.clone();
        merged.extend(patch);
        if self.clashes(collection, documents, &id, &merged)? {
            tracing::debug!(collection, %id, "patch rejected");
            return Ok(-1);
        }
        documents.insert(id, merged);
        Ok(1)
    }

    async fn remove(&self, collection: &str, key: &StorageDocument) -> Result<i64, StoreError> {
        let id = self.key_of(collection, key)?;
        let mut collections = self.collections.write().await;
        let documents = collection_mut(&mut collections, collection)?;
        Ok(i64::from(documents.remove(&id).is_some()))
    }

    async fn find(
        &self,
        collection: &str,
        query: &SearchQuery
    ) -> Result<(Vec<StorageDocument>, u64), StoreError> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_owned()))?;

        let mut matched: Vec<&StorageDocument> = documents
            .values()
            .filter(|document| query.matches(document))
            .collect();
        matched.sort_by(|left, right| query.ordering(left, right));

        let total = matched.len() as u64;
        let offset = window(matched.len(), query.pagination.offset);
        let limit = window(matched.len() - offset, query.pagination.limit);
        let page = matched[offset..offset + limit]
            .iter()
            .map(|document| (*document).clone())
            .collect();
        Ok((page, total))
    }
}
