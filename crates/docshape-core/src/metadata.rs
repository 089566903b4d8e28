// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity metadata extraction.
//!
//! [`EntityMetadata`] indexes an entity's static field table once at process
//! start and is then shared read-only by every request. It answers three
//! questions for the rest of the engine:
//!
//! | Question | Method |
//! |----------|--------|
//! | Is this wire key a declared field? | [`EntityMetadata::field`] |
//! | What is it called in the store? | [`EntityMetadata::storage_name`] |
//! | Which fields address a record? | [`EntityMetadata::identity_fields`] |
//!
//! It also performs the record ⇄ storage document translation.

use std::{collections::HashMap, fmt, marker::PhantomData};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    shape::{EntityShape, FieldSpec},
    sparse::{Identity, SparseUpdate, write_identity},
    store::StorageDocument
};

/// Error raised while building a descriptor at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The entity has no `#[id]` field.
    #[error("entity `{entity}` declares no identity field")]
    NoIdentity {
        /// Entity name.
        entity: &'static str
    },

    /// Two fields share a wire name.
    #[error("entity `{entity}` declares wire name `{name}` more than once")]
    DuplicateWireName {
        /// Entity name.
        entity: &'static str,
        /// Colliding wire name.
        name:   &'static str
    },

    /// Two fields share a storage name.
    #[error("entity `{entity}` declares storage name `{name}` more than once")]
    DuplicateStorageName {
        /// Entity name.
        entity: &'static str,
        /// Colliding storage name.
        name:   &'static str
    },

    /// Two filter params share a query name.
    #[error("filter `{filter}` declares parameter `{name}` more than once")]
    DuplicateParam {
        /// Filter name.
        filter: &'static str,
        /// Colliding parameter name.
        name:   &'static str
    },

    /// A filter param uses `page`, `limit` or `sort`.
    #[error("filter `{filter}` uses reserved parameter name `{name}`")]
    ReservedParam {
        /// Filter name.
        filter: &'static str,
        /// Reserved name.
        name:   &'static str
    },

    /// A filter param targets a field the entity does not declare.
    #[error("filter `{filter}` parameter `{param}` targets unknown field `{target}` of `{entity}`")]
    UnknownTarget {
        /// Filter name.
        filter: &'static str,
        /// Parameter name.
        param:  &'static str,
        /// Targeted wire name.
        target: &'static str,
        /// Entity name.
        entity: &'static str
    }
}

/// Error raised while translating between a record and a document.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A field could not be serialized.
    #[error("field `{field}` cannot be read: {source}")]
    Read {
        /// Wire name of the field.
        field:  &'static str,
        /// Underlying serde error.
        source: serde_json::Error
    },

    /// A stored value does not fit the field type.
    #[error("value for field `{field}` does not decode: {source}")]
    Write {
        /// Wire name of the field.
        field:  &'static str,
        /// Underlying serde error.
        source: serde_json::Error
    },

    /// The identity has the wrong number of components.
    #[error("identity has {actual} component(s), `{entity}` expects {expected}")]
    IdentityArity {
        /// Entity name.
        entity:   &'static str,
        /// Declared identity field count.
        expected: usize,
        /// Supplied component count.
        actual:   usize
    }
}

/// Immutable index over an entity's declared fields.
///
/// Built once with [`EntityMetadata::extract`]; share it behind an `Arc`.
pub struct EntityMetadata<E: EntityShape> {
    fields:        &'static [FieldSpec<E::Field>],
    field_index:   HashMap<&'static str, usize>,
    storage_index: HashMap<&'static str, usize>,
    ordinals:      HashMap<E::Field, usize>,
    identity:      Vec<usize>,
    _entity:       PhantomData<fn() -> E>
}

impl<E: EntityShape> EntityMetadata<E> {
    /// Index the entity's static field table.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::NoIdentity`] if no field is an identity
    /// - [`ConstructionError::DuplicateWireName`] on a wire name collision
    /// - [`ConstructionError::DuplicateStorageName`] on a storage name
    ///   collision
    pub fn extract() -> Result<Self, ConstructionError> {
        let fields = E::fields();
        let mut field_index = HashMap::with_capacity(fields.len());
        let mut storage_index = HashMap::with_capacity(fields.len());
        let mut ordinals = HashMap::with_capacity(fields.len());
        let mut identity = Vec::new();

        for (ordinal, spec) in fields.iter().enumerate() {
            if field_index.insert(spec.wire, ordinal).is_some() {
                return Err(ConstructionError::DuplicateWireName {
                    entity: E::NAME,
                    name:   spec.wire
                });
            }
            if storage_index.insert(spec.storage, ordinal).is_some() {
                return Err(ConstructionError::DuplicateStorageName {
                    entity: E::NAME,
                    name:   spec.storage
                });
            }
            ordinals.insert(spec.field, ordinal);
            if spec.identity {
                identity.push(ordinal);
            }
        }

        if identity.is_empty() {
            return Err(ConstructionError::NoIdentity {
                entity: E::NAME
            });
        }

        Ok(Self {
            fields,
            field_index,
            storage_index,
            ordinals,
            identity,
            _entity: PhantomData
        })
    }

    /// Entity name.
    pub fn name(&self) -> &'static str {
        E::NAME
    }

    /// Collection holding the records.
    pub fn collection(&self) -> &'static str {
        E::COLLECTION
    }

    /// All declared fields in declaration order.
    pub fn fields(&self) -> &'static [FieldSpec<E::Field>] {
        self.fields
    }

    /// Ordinal of a wire name (case-sensitive).
    pub fn ordinal(&self, wire: &str) -> Option<usize> {
        self.field_index.get(wire).copied()
    }

    /// Field declared under a wire name.
    pub fn field(&self, wire: &str) -> Option<&'static FieldSpec<E::Field>> {
        let fields = self.fields;
        self.ordinal(wire).and_then(|ordinal| fields.get(ordinal))
    }

    /// Spec of a field variant.
    pub fn spec(&self, field: E::Field) -> Option<&'static FieldSpec<E::Field>> {
        let fields = self.fields;
        self.ordinals
            .get(&field)
            .and_then(|ordinal| fields.get(*ordinal))
    }

    /// Storage name of a wire name.
    pub fn storage_name(&self, wire: &str) -> Option<&'static str> {
        self.field(wire).map(|spec| spec.storage)
    }

    /// Identity fields in declaration order.
    pub fn identity_fields(&self) -> impl Iterator<Item = &'static FieldSpec<E::Field>> + '_ {
        let fields = self.fields;
        self.identity
            .iter()
            .filter_map(move |ordinal| fields.get(*ordinal))
    }

    /// Number of identity components.
    pub fn identity_len(&self) -> usize {
        self.identity.len()
    }

    /// Check if a field variant is part of the identity.
    pub fn is_identity(&self, field: E::Field) -> bool {
        self.spec(field).is_some_and(|spec| spec.identity)
    }

    /// Render a record as a wire document restricted to declared fields.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Read`] if a field fails to serialize.
    pub fn to_wire(&self, entity: &E) -> Result<Map<String, Value>, MappingError> {
        self.render(entity, |spec| spec.wire)
    }

    /// Render a record as a storage document.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Read`] if a field fails to serialize.
    pub fn to_storage(&self, entity: &E) -> Result<StorageDocument, MappingError> {
        self.render(entity, |spec| spec.storage)
    }

    /// Rebuild a record from a storage document.
    ///
    /// Storage keys the entity does not declare are ignored; declared fields
    /// missing from the document keep their zero value.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Write`] if a stored value does not fit its
    /// field type.
    pub fn from_storage(&self, document: StorageDocument) -> Result<E, MappingError> {
        let mut entity = E::default();
        for (key, value) in document {
            let Some(spec) = self
                .storage_index
                .get(key.as_str())
                .and_then(|ordinal| self.fields.get(*ordinal))
            else {
                continue;
            };
            entity
                .write(spec.field, value)
                .map_err(|source| MappingError::Write {
                    field: spec.wire,
                    source
                })?;
        }
        Ok(entity)
    }

    /// Translate a sparse update into storage field names.
    pub fn storage_patch(&self, update: &SparseUpdate<E>) -> StorageDocument {
        update
            .fields()
            .iter()
            .filter_map(|(field, value)| {
                self.spec(*field)
                    .map(|spec| (spec.storage.to_owned(), value.clone()))
            })
            .collect()
    }

    /// Storage filter addressing the record with this identity.
    ///
    /// Each component is decoded through the identity field's own type, so
    /// the key matches what [`to_storage`](Self::to_storage) writes.
    ///
    /// # Errors
    ///
    /// - [`MappingError::IdentityArity`] if the component count differs
    /// - [`MappingError::Write`] if a component does not fit its field type
    pub fn storage_key(&self, identity: &Identity) -> Result<StorageDocument, MappingError> {
        if identity.len() != self.identity.len() {
            return Err(MappingError::IdentityArity {
                entity:   E::NAME,
                expected: self.identity.len(),
                actual:   identity.len()
            });
        }

        let mut probe = E::default();
        let mut key = Map::new();
        for (spec, part) in self.identity_fields().zip(identity.parts()) {
            write_identity(&mut probe, spec.field, part).map_err(|source| {
                MappingError::Write {
                    field: spec.wire,
                    source
                }
            })?;
            let value = probe
                .read(spec.field)
                .map_err(|source| MappingError::Read {
                    field: spec.wire,
                    source
                })?;
            key.insert(spec.storage.to_owned(), value);
        }
        Ok(key)
    }

    /// Storage filter addressing an already decoded record.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Read`] if an identity field fails to serialize.
    pub fn key_of(&self, entity: &E) -> Result<StorageDocument, MappingError> {
        let mut key = Map::new();
        for spec in self.identity_fields() {
            let value = entity
                .read(spec.field)
                .map_err(|source| MappingError::Read {
                    field: spec.wire,
                    source
                })?;
            key.insert(spec.storage.to_owned(), value);
        }
        Ok(key)
    }

    fn render(
        &self,
        entity: &E,
        name: impl Fn(&FieldSpec<E::Field>) -> &'static str
    ) -> Result<Map<String, Value>, MappingError> {
        let mut document = Map::new();
        for spec in self.fields {
            let value = entity
                .read(spec.field)
                .map_err(|source| MappingError::Read {
                    field: spec.wire,
                    source
                })?;
            document.insert(name(spec).to_owned(), value);
        }
        Ok(document)
    }
}

impl<E: EntityShape> fmt::Debug for EntityMetadata<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMetadata")
            .field("entity", &E::NAME)
            .field("collection", &E::COLLECTION)
            .field("fields", &self.fields)
            .field("identity", &self.identity)
            .finish()
    }
}
