// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Document store contract.
//!
//! Stores see storage documents only: every key is a storage name, already
//! translated by [`EntityMetadata`](crate::EntityMetadata). Records are
//! addressed by a key document holding the identity fields.
//!
//! # Return codes
//!
//! Mutations report an integer, converted once by the orchestrator with
//! [`OperationResult::from_code`](crate::OperationResult::from_code):
//!
//! | Code | Meaning |
//! |------|---------|
//! | `> 0` | documents affected |
//! | `0` | nothing matched the key |
//! | `< 0` | the write clashed with an existing document |

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    Pagination, SortDirection,
    filter::{FilterOp, SortField}
};

/// Document keyed by storage field names.
pub type StorageDocument = Map<String, Value>;

/// One storage-level condition.
///
/// An array `value` matches when any element matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Storage field name.
    pub field: &'static str,

    /// Comparison.
    pub op: FilterOp,

    /// Operand.
    pub value: Value
}

impl Predicate {
    /// Evaluate against a document. A missing field never matches.
    pub fn matches(&self, document: &StorageDocument) -> bool {
        let Some(stored) = document.get(self.field) else {
            return false;
        };
        match &self.value {
            Value::Array(candidates) => candidates
                .iter()
                .any(|candidate| test(self.op, stored, candidate)),
            operand => test(self.op, stored, operand)
        }
    }
}

/// Storage-level search: conditions, ordering and window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchQuery {
    /// Conditions, all of which must hold.
    pub predicates: Vec<Predicate>,

    /// Sort keys over storage names.
    pub sort: Vec<SortField>,

    /// Window applied after filtering and sorting.
    pub pagination: Pagination
}

impl SearchQuery {
    /// Check if a document satisfies every predicate.
    pub fn matches(&self, document: &StorageDocument) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(document))
    }

    /// Order two documents by the sort keys. Missing values sort first.
    pub fn ordering(&self, left: &StorageDocument, right: &StorageDocument) -> Ordering {
        for key in &self.sort {
            let ordering = match (left.get(key.field), right.get(key.field)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => compare_values(a, b).unwrap_or(Ordering::Equal)
            };
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse()
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Compare two scalar JSON values of the same kind.
///
/// Returns `None` for mismatched kinds, arrays and objects.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                Some(a.cmp(&b))
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                Some(a.cmp(&b))
            } else {
                a.as_f64()?.partial_cmp(&b.as_f64()?)
            }
        }
        _ => None
    }
}

fn test(op: FilterOp, stored: &Value, operand: &Value) -> bool {
    match op {
        FilterOp::Eq => compare_values(stored, operand) == Some(Ordering::Equal),
        FilterOp::Like => match (stored, operand) {
            (Value::String(stored), Value::String(operand)) => stored
                .to_lowercase()
                .contains(&operand.to_lowercase()),
            _ => false
        },
        FilterOp::Gte => compare_values(stored, operand).is_some_and(Ordering::is_ge),
        FilterOp::Lte => compare_values(stored, operand).is_some_and(Ordering::is_le)
    }
}

/// Storage backend of a [`CrudService`](crate::CrudService).
///
/// Implementations own their concurrency control; each call must be atomic
/// for the single document it touches.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Backend failure, distinct from the not-found and conflict outcomes.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every document of a collection.
    async fn all(&self, collection: &str) -> Result<Vec<StorageDocument>, Self::Error>;

    /// The document matching `key`, if any.
    async fn load(
        &self,
        collection: &str,
        key: &StorageDocument
    ) -> Result<Option<StorageDocument>, Self::Error>;

    /// Insert a new document.
    async fn insert(&self, collection: &str, document: StorageDocument) -> Result<i64, Self::Error>;

    /// Replace the document matching `key`.
    async fn replace(
        &self,
        collection: &str,
        key: &StorageDocument,
        document: StorageDocument
    ) -> Result<i64, Self::Error>;

    /// Overwrite only the given fields of the document matching `key`.
    async fn apply_partial(
        &self,
        collection: &str,
        key: &StorageDocument,
        patch: StorageDocument
    ) -> Result<i64, Self::Error>;

    /// Delete the document matching `key`.
    async fn remove(&self, collection: &str, key: &StorageDocument) -> Result<i64, Self::Error>;

    /// Matching documents inside the window, plus the total match count
    /// before paging.
    async fn find(
        &self,
        collection: &str,
        query: &SearchQuery
    ) -> Result<(Vec<StorageDocument>, u64), Self::Error>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(value: Value) -> StorageDocument {
        match value {
            Value::Object(map) => map,
            _ => unreachable!()
        }
    }

    #[test]
    fn eq_matches_scalar_and_membership() {
        let doc = document(json!({"_id": "b", "age": 30}));
        let single = Predicate {
            field: "age",
            op:    FilterOp::Eq,
            value: json!(30.0)
        };
        let member = Predicate {
            field: "_id",
            op:    FilterOp::Eq,
            value: json!(["a", "b"])
        };
        assert!(single.matches(&doc));
        assert!(member.matches(&doc));
    }

    #[test]
    fn like_is_case_insensitive_substring() {
        let doc = document(json!({"name": "Annabel"}));
        let predicate = Predicate {
            field: "name",
            op:    FilterOp::Like,
            value: json!("NNAB")
        };
        assert!(predicate.matches(&doc));
    }

    #[test]
    fn bounds_are_inclusive() {
        let doc = document(json!({"born": "1990-05-01"}));
        let from = Predicate {
            field: "born",
            op:    FilterOp::Gte,
            value: json!("1990-05-01")
        };
        let to = Predicate {
            field: "born",
            op:    FilterOp::Lte,
            value: json!("1990-04-30")
        };
        assert!(from.matches(&doc));
        assert!(!to.matches(&doc));
    }

    #[test]
    fn missing_field_never_matches() {
        let predicate = Predicate {
            field: "name",
            op:    FilterOp::Eq,
            value: Value::Null
        };
        assert!(!predicate.matches(&StorageDocument::new()));
    }

    #[test]
    fn ordering_honours_direction_and_ties() {
        let query = SearchQuery {
            sort: vec![SortField::desc("age"), SortField::asc("name")],
            ..SearchQuery::default()
        };
        let ann = document(json!({"name": "Ann", "age": 30}));
        let bea = document(json!({"name": "Bea", "age": 30}));
        let cid = document(json!({"name": "Cid", "age": 40}));

        assert_eq!(query.ordering(&cid, &ann), Ordering::Less);
        assert_eq!(query.ordering(&ann, &bea), Ordering::Less);
        assert_eq!(query.ordering(&ann, &ann), Ordering::Equal);
    }

    #[test]
    fn mixed_kinds_do_not_compare() {
        assert_eq!(compare_values(&json!(1), &json!("1")), None);
        assert_eq!(compare_values(&json!(-1), &json!(2_u64)), Some(Ordering::Less));
    }
}
