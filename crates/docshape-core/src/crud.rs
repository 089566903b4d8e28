// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CRUD orchestrator.
//!
//! [`CrudService`] wires the engine to a [`DocumentStore`]:
//!
//! ```text
//! payload ─► decode ─► validate ─► to storage ─► store ─► OperationResult
//! query   ─► decode_filter ─► search_query ─► store.find ─► SearchPage
//! ```
//!
//! Store return codes are converted to [`OperationResult`] here and nowhere
//! else. Backend failures surface as [`CrudError::Backend`], never as an
//! outcome.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::{
    filter::{FilterDescriptor, FilterShape},
    metadata::{EntityMetadata, MappingError},
    outcome::OperationResult,
    query::{FilterError, RawQuery, decode_filter},
    shape::EntityShape,
    sparse::{Identity, PatchError, SparseUpdate, decode_entity, decode_patch, decode_replacement},
    store::{DocumentStore, StorageDocument},
    validation::{Validate, Violation, validate, validate_patch}
};

/// Error returned by [`CrudService`] operations.
#[derive(Debug, Error)]
pub enum CrudError<B: std::error::Error + 'static> {
    /// Malformed payload or identity.
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Business rules failed.
    #[error("validation failed with {} violation(s)", .0.len())]
    Invalid(Vec<Violation>),

    /// A patch that supplies no field besides the identity.
    #[error("patch supplies no field to update")]
    EmptyPatch,

    /// Malformed search parameters.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A stored document that does not map back to the entity.
    #[error("stored document does not map to the entity: {0}")]
    Mapping(#[from] MappingError),

    /// The document store failed.
    #[error("document store failure: {0}")]
    Backend(#[source] B)
}

/// Value written by a mutation together with its outcome.
#[derive(Debug, Clone)]
pub struct Applied<T> {
    /// Decoded value that was sent to the store.
    pub value: T,

    /// What the store reported.
    pub outcome: OperationResult
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage<E> {
    /// Records inside the requested window.
    pub list: Vec<E>,

    /// Matching records before paging.
    pub total: u64
}

/// Orchestrates entity operations against a document store.
///
/// Cheap to clone; metadata, descriptor and store are shared.
pub struct CrudService<E, F, S>
where
    E: EntityShape,
    F: FilterShape
{
    metadata:   Arc<EntityMetadata<E>>,
    filters:    Arc<FilterDescriptor<F>>,
    store:      Arc<S>,
    collection: Arc<str>
}

impl<E, F, S> Clone for CrudService<E, F, S>
where
    E: EntityShape,
    F: FilterShape
{
    fn clone(&self) -> Self {
        Self {
            metadata:   Arc::clone(&self.metadata),
            filters:    Arc::clone(&self.filters),
            store:      Arc::clone(&self.store),
            collection: Arc::clone(&self.collection)
        }
    }
}

impl<E, F, S> CrudService<E, F, S>
where
    E: EntityShape + Validate,
    F: FilterShape,
    S: DocumentStore
{
    /// Create a service over the entity's default collection.
    pub fn new(
        metadata: Arc<EntityMetadata<E>>,
        filters: Arc<FilterDescriptor<F>>,
        store: Arc<S>
    ) -> Self {
        Self {
            metadata,
            filters,
            store,
            collection: Arc::from(E::COLLECTION)
        }
    }

    /// Use another collection.
    pub fn with_collection(mut self, collection: impl AsRef<str>) -> Self {
        self.collection = Arc::from(collection.as_ref());
        self
    }

    /// Entity metadata.
    pub fn metadata(&self) -> &EntityMetadata<E> {
        &self.metadata
    }

    /// Filter descriptor.
    pub fn filters(&self) -> &FilterDescriptor<F> {
        &self.filters
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Collection the records live in.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Every record.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Backend`] or [`CrudError::Mapping`].
    pub async fn all(&self) -> Result<Vec<E>, CrudError<S::Error>> {
        let documents = self
            .store
            .all(&self.collection)
            .await
            .map_err(CrudError::Backend)?;
        tracing::debug!(entity = E::NAME, count = documents.len(), "loaded all records");
        self.records(documents)
    }

    /// The record with this identity, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Patch`] for a malformed identity, otherwise
    /// [`CrudError::Backend`] or [`CrudError::Mapping`].
    pub async fn load(&self, id: &Identity) -> Result<Option<E>, CrudError<S::Error>> {
        let key = self.key(id)?;
        let document = self
            .store
            .load(&self.collection, &key)
            .await
            .map_err(CrudError::Backend)?;
        tracing::debug!(entity = E::NAME, %id, found = document.is_some(), "loaded record");
        Ok(document
            .map(|document| self.metadata.from_storage(document))
            .transpose()?)
    }

    /// Decode, validate and insert a new record.
    ///
    /// # Errors
    ///
    /// - [`CrudError::Patch`] on a malformed payload
    /// - [`CrudError::Invalid`] if any rule fails
    /// - [`CrudError::Backend`] if the store fails
    pub async fn create(&self, raw: &[u8]) -> Result<Applied<E>, CrudError<S::Error>> {
        let entity: E = decode_entity(raw)?;
        check(validate(&entity, false))?;
        let document = self.metadata.to_storage(&entity)?;
        let code = self
            .store
            .insert(&self.collection, document)
            .await
            .map_err(CrudError::Backend)?;
        let outcome = OperationResult::from_code(code);
        tracing::debug!(entity = E::NAME, ?outcome, "created record");
        Ok(Applied {
            value: entity,
            outcome
        })
    }

    /// Decode, validate and replace the record with this identity.
    ///
    /// # Errors
    ///
    /// - [`CrudError::Patch`] on a malformed payload or a conflicting
    ///   identity
    /// - [`CrudError::Invalid`] if any rule fails
    /// - [`CrudError::Backend`] if the store fails
    pub async fn update(&self, id: &Identity, raw: &[u8]) -> Result<Applied<E>, CrudError<S::Error>> {
        let entity = decode_replacement(raw, id, &self.metadata)?;
        check(validate(&entity, false))?;
        let key = self.metadata.key_of(&entity)?;
        let document = self.metadata.to_storage(&entity)?;
        let code = self
            .store
            .replace(&self.collection, &key, document)
            .await
            .map_err(CrudError::Backend)?;
        let outcome = OperationResult::from_code(code);
        tracing::debug!(entity = E::NAME, %id, ?outcome, "replaced record");
        Ok(Applied {
            value: entity,
            outcome
        })
    }

    /// Overwrite only the fields present in the payload.
    ///
    /// # Errors
    ///
    /// - [`CrudError::Patch`] on a malformed payload or a conflicting
    ///   identity
    /// - [`CrudError::Invalid`] if a supplied field breaks a rule
    /// - [`CrudError::EmptyPatch`] if no field besides the identity was sent;
    ///   the store is not called
    /// - [`CrudError::Backend`] if the store fails
    pub async fn patch(
        &self,
        id: &Identity,
        raw: &[u8]
    ) -> Result<Applied<SparseUpdate<E>>, CrudError<S::Error>> {
        let update = decode_patch(raw, id, &self.metadata)?;
        check(validate_patch(&update, &self.metadata))?;
        if update.is_empty() {
            return Err(CrudError::EmptyPatch);
        }
        let key = self.metadata.key_of(update.entity())?;
        let patch = self.metadata.storage_patch(&update);
        let code = self
            .store
            .apply_partial(&self.collection, &key, patch)
            .await
            .map_err(CrudError::Backend)?;
        let outcome = OperationResult::from_code(code);
        tracing::debug!(entity = E::NAME, %id, fields = update.len(), ?outcome, "patched record");
        Ok(Applied {
            value: update,
            outcome
        })
    }

    /// Delete the record with this identity.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Patch`] for a malformed identity or
    /// [`CrudError::Backend`] if the store fails.
    pub async fn delete(&self, id: &Identity) -> Result<OperationResult, CrudError<S::Error>> {
        let key = self.key(id)?;
        let code = self
            .store
            .remove(&self.collection, &key)
            .await
            .map_err(CrudError::Backend)?;
        let outcome = OperationResult::from_code(code);
        tracing::debug!(entity = E::NAME, %id, ?outcome, "deleted record");
        Ok(outcome)
    }

    /// Decode raw parameters and search.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Filter`] for malformed parameters, otherwise
    /// everything [`find`](Self::find) reports.
    pub async fn search(&self, raw: &RawQuery) -> Result<SearchPage<E>, CrudError<S::Error>> {
        let filter = decode_filter(raw, &self.filters)?;
        self.find(&filter).await
    }

    /// Search with an already decoded filter.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Backend`] or [`CrudError::Mapping`].
    pub async fn find(&self, filter: &F) -> Result<SearchPage<E>, CrudError<S::Error>> {
        let query = self.filters.search_query(filter);
        let (documents, total) = self
            .store
            .find(&self.collection, &query)
            .await
            .map_err(CrudError::Backend)?;
        tracing::debug!(
            entity = E::NAME,
            predicates = query.predicates.len(),
            returned = documents.len(),
            total,
            "searched records"
        );
        Ok(SearchPage {
            list: self.records(documents)?,
            total
        })
    }

    fn key(&self, id: &Identity) -> Result<StorageDocument, CrudError<S::Error>> {
        if id.is_empty() {
            return Err(PatchError::EmptyIdentity.into());
        }
        self.metadata.storage_key(id).map_err(|err| match err {
            MappingError::IdentityArity {
                expected,
                actual,
                ..
            } => PatchError::IdentityArity {
                expected,
                actual
            }
            .into(),
            MappingError::Write {
                source, ..
            } => PatchError::Decode(source).into(),
            other => CrudError::Mapping(other)
        })
    }

    fn records(&self, documents: Vec<StorageDocument>) -> Result<Vec<E>, CrudError<S::Error>> {
        documents
            .into_iter()
            .map(|document| self.metadata.from_storage(document))
            .collect::<Result<_, _>>()
            .map_err(CrudError::Mapping)
    }
}

fn check<B: std::error::Error + 'static>(violations: Vec<Violation>) -> Result<(), CrudError<B>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CrudError::Invalid(violations))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;
    use crate::{
        fixtures::{Account, AccountFilter},
        store::SearchQuery,
        validation::ViolationKind
    };

    #[derive(Debug, Error)]
    #[error("store offline")]
    struct Offline;

    /// Store answering every mutation with a fixed code and recording calls.
    #[derive(Default)]
    struct ScriptedStore {
        code:    i64,
        offline: bool,
        calls:   Mutex<Vec<(&'static str, Value)>>,
        stored:  Vec<StorageDocument>
    }

    impl ScriptedStore {
        fn answering(code: i64) -> Self {
            Self {
                code,
                ..Self::default()
            }
        }

        fn record(&self, op: &'static str, payload: Value) -> Result<i64, Offline> {
            if self.offline {
                return Err(Offline);
            }
            self.calls.lock().unwrap().push((op, payload));
            Ok(self.code)
        }

        fn calls(&self) -> Vec<(&'static str, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl DocumentStore for ScriptedStore {
        type Error = Offline;

        async fn all(&self, _collection: &str) -> Result<Vec<StorageDocument>, Offline> {
            Ok(self.stored.clone())
        }

        async fn load(
            &self,
            _collection: &str,
            key: &StorageDocument
        ) -> Result<Option<StorageDocument>, Offline> {
            Ok(self
                .stored
                .iter()
                .find(|doc| doc.get("_id") == key.get("_id"))
                .cloned())
        }

        async fn insert(&self, _collection: &str, document: StorageDocument) -> Result<i64, Offline> {
            self.record("insert", Value::Object(document))
        }

        async fn replace(
            &self,
            _collection: &str,
            key: &StorageDocument,
            document: StorageDocument
        ) -> Result<i64, Offline> {
            self.record("replace", json!([key, document]))
        }

        async fn apply_partial(
            &self,
            _collection: &str,
            key: &StorageDocument,
            patch: StorageDocument
        ) -> Result<i64, Offline> {
            self.record("apply_partial", json!([key, patch]))
        }

        async fn remove(&self, _collection: &str, key: &StorageDocument) -> Result<i64, Offline> {
            self.record("remove", Value::Object(key.clone()))
        }

        async fn find(
            &self,
            _collection: &str,
            query: &SearchQuery
        ) -> Result<(Vec<StorageDocument>, u64), Offline> {
            let matched: Vec<_> = self
                .stored
                .iter()
                .filter(|doc| query.matches(doc))
                .cloned()
                .collect();
            let total = matched.len() as u64;
            Ok((matched, total))
        }
    }

    fn service(store: ScriptedStore) -> CrudService<Account, AccountFilter, ScriptedStore> {
        let metadata = Arc::new(EntityMetadata::extract().unwrap());
        let filters = Arc::new(FilterDescriptor::build(&metadata).unwrap());
        CrudService::new(metadata, filters, Arc::new(store))
    }

    fn stored(value: Value) -> StorageDocument {
        match value {
            Value::Object(map) => map,
            _ => unreachable!()
        }
    }

    #[tokio::test]
    async fn return_codes_map_to_outcomes() {
        for (code, expected) in [
            (1, OperationResult::Success(1)),
            (0, OperationResult::NotFound),
            (-1, OperationResult::Conflict)
        ] {
            let service = service(ScriptedStore::answering(code));
            let outcome = service.delete(&Identity::from("u1")).await.unwrap();
            assert_eq!(outcome, expected);
        }
    }

    #[tokio::test]
    async fn create_writes_storage_document() {
        let service = service(ScriptedStore::answering(1));
        let applied = service
            .create(br#"{"id":"u1","name":"Ann","email":"ann@example.com","displayName":"Annie"}"#)
            .await
            .unwrap();

        assert_eq!(applied.outcome, OperationResult::Success(1));
        assert_eq!(applied.value.name, "Ann");
        let calls = service.store().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "insert");
        assert_eq!(calls[0].1["_id"], json!("u1"));
        assert_eq!(calls[0].1["display_name"], json!("Annie"));
    }

    #[tokio::test]
    async fn create_rejects_invalid_entity() {
        let service = service(ScriptedStore::answering(1));
        let err = service.create(br#"{"name":"Ann"}"#).await.unwrap_err();
        let CrudError::Invalid(violations) = &err else {
            panic!("expected violations, got {err:?}");
        };
        assert_eq!(violations[0].field, "id");
        assert_eq!(violations[0].kind, ViolationKind::Required);
        assert!(service.store().calls().is_empty());
    }

    #[tokio::test]
    async fn patch_sends_only_supplied_fields() {
        let service = service(ScriptedStore::answering(1));
        let applied = service
            .patch(&Identity::from("u1"), br#"{"name":"Ann"}"#)
            .await
            .unwrap();

        assert_eq!(applied.outcome, OperationResult::Success(1));
        assert_eq!(
            Value::Object(applied.value.to_wire(service.metadata()).unwrap()),
            json!({"id": "u1", "name": "Ann"})
        );
        assert_eq!(
            service.store().calls(),
            vec![("apply_partial", json!([{"_id": "u1"}, {"name": "Ann"}]))]
        );
    }

    #[tokio::test]
    async fn empty_patch_skips_backend() {
        let service = service(ScriptedStore::answering(1));
        let err = service
            .patch(&Identity::from("u1"), br#"{"id":"u1"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::EmptyPatch));
        assert!(service.store().calls().is_empty());
    }

    #[tokio::test]
    async fn patch_reports_supplied_empty_required_field() {
        let service = service(ScriptedStore::answering(1));
        let err = service
            .patch(&Identity::from("u1"), br#"{"name":""}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::Invalid(ref v) if v.len() == 1 && v[0].field == "name"));
    }

    #[tokio::test]
    async fn update_conflicting_identity_is_rejected() {
        let service = service(ScriptedStore::answering(1));
        let err = service
            .update(
                &Identity::from("u1"),
                br#"{"id":"u2","name":"Ann","email":"ann@example.com"}"#
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CrudError::Patch(PatchError::IdentityMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn update_replaces_with_injected_identity() {
        let service = service(ScriptedStore::answering(0));
        let applied = service
            .update(&Identity::from("u1"), br#"{"name":"Ann","email":"ann@example.com"}"#)
            .await
            .unwrap();
        assert_eq!(applied.outcome, OperationResult::NotFound);
        assert_eq!(applied.value.id, "u1");
        let calls = service.store().calls();
        assert_eq!(calls[0].1[0], json!({"_id": "u1"}));
    }

    #[tokio::test]
    async fn backend_failure_is_not_an_outcome() {
        let service = service(ScriptedStore {
            offline: true,
            ..ScriptedStore::default()
        });
        let err = service.delete(&Identity::from("u1")).await.unwrap_err();
        assert!(matches!(err, CrudError::Backend(Offline)));
    }

    #[tokio::test]
    async fn load_maps_storage_back() {
        let service = service(ScriptedStore {
            stored: vec![stored(json!({"_id": "u1", "name": "Ann", "display_name": "A"}))],
            ..ScriptedStore::default()
        });
        let account = service.load(&Identity::from("u1")).await.unwrap().unwrap();
        assert_eq!(account.display_name.as_deref(), Some("A"));
        assert!(service.load(&Identity::from("u2")).await.unwrap().is_none());

        let err = service.load(&Identity::from("")).await.unwrap_err();
        assert!(matches!(err, CrudError::Patch(PatchError::EmptyIdentity)));
    }

    #[tokio::test]
    async fn search_decodes_and_filters() {
        let service = service(ScriptedStore {
            stored: vec![
                stored(json!({"_id": "u1", "name": "Ann", "age": 30})),
                stored(json!({"_id": "u2", "name": "Bob", "age": 40}))
            ],
            ..ScriptedStore::default()
        });
        let raw: RawQuery = [("name", "an")].into_iter().collect();
        let page = service.search(&raw).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].id, "u1");

        let raw: RawQuery = [("minAge", "old")].into_iter().collect();
        let err = service.search(&raw).await.unwrap_err();
        assert!(matches!(err, CrudError::Filter(_)));
    }
}
