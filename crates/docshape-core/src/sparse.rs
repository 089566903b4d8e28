// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Sparse diff of client payloads.
//!
//! A partial update must touch exactly the fields the client sent. Decoding a
//! payload straight into the entity loses that information, because a missing
//! key and a key sent with the zero value look the same afterwards. The
//! functions here keep both views: the typed entity, and the ordered list of
//! the fields that were actually present.
//!
//! # Identity reconciliation
//!
//! The record is addressed by the identity taken from the request path. The
//! payload may repeat it:
//!
//! | Payload identity | Result |
//! |------------------|--------|
//! | absent, `null` or `""` | addressed identity injected |
//! | equal to the addressed one | accepted |
//! | different | [`PatchError::IdentityMismatch`] |
//!
//! Identity fields never appear in [`SparseUpdate::fields`].

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    metadata::{EntityMetadata, MappingError},
    shape::EntityShape
};

/// Identity addressing one record, one component per identity field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(Vec<String>);

impl Identity {
    /// Create an identity from its components.
    pub fn new(parts: Vec<String>) -> Self {
        Self(parts)
    }

    /// Identity components in declaration order.
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no components or any component is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty() || self.0.iter().any(String::is_empty)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self(vec![value.to_owned()])
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// Error raised while decoding a payload.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The payload is not valid JSON or does not fit the entity.
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("payload must be a JSON object")]
    NotAnObject,

    /// The addressed identity is empty.
    #[error("identity must not be empty")]
    EmptyIdentity,

    /// The addressed identity has the wrong number of components.
    #[error("identity has {actual} component(s), expected {expected}")]
    IdentityArity {
        /// Declared identity field count.
        expected: usize,
        /// Supplied component count.
        actual:   usize
    },

    /// The payload carries an identity different from the addressed one.
    #[error("payload `{field}` is `{payload}` but the request addresses `{addressed}`")]
    IdentityMismatch {
        /// Wire name of the identity field.
        field:     &'static str,
        /// Identity value found in the payload.
        payload:   String,
        /// Identity taken from the request.
        addressed: String
    }
}

/// Typed entity plus the fields the client supplied.
///
/// Built by [`decode_patch`]. `fields` keeps payload order and never contains
/// an identity field.
#[derive(Debug, Clone)]
pub struct SparseUpdate<E: EntityShape> {
    entity:   E,
    identity: Identity,
    fields:   Vec<(E::Field, Value)>
}

impl<E: EntityShape> SparseUpdate<E> {
    /// Fully decoded entity, identity injected.
    pub fn entity(&self) -> &E {
        &self.entity
    }

    /// Consume the update, returning the decoded entity.
    pub fn into_entity(self) -> E {
        self.entity
    }

    /// Addressed identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Supplied non-identity fields in payload order.
    pub fn fields(&self) -> &[(E::Field, Value)] {
        &self.fields
    }

    /// Number of supplied non-identity fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the client supplied no non-identity field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check if a field was supplied.
    pub fn contains(&self, field: E::Field) -> bool {
        self.get(field).is_some()
    }

    /// Supplied value of a field.
    pub fn get(&self, field: E::Field) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value)
    }

    /// Overlay the supplied fields onto a loaded record.
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not decode into its field type.
    pub fn apply_to(&self, target: &mut E) -> serde_json::Result<()> {
        for (field, value) in &self.fields {
            target.write(*field, value.clone())?;
        }
        Ok(())
    }

    /// Wire document of the identity plus the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Read`] if an identity field fails to serialize.
    pub fn to_wire(&self, metadata: &EntityMetadata<E>) -> Result<Map<String, Value>, MappingError> {
        let mut document = Map::new();
        for spec in metadata.identity_fields() {
            let value = self
                .entity
                .read(spec.field)
                .map_err(|source| MappingError::Read {
                    field: spec.wire,
                    source
                })?;
            document.insert(spec.wire.to_owned(), value);
        }
        for (field, value) in &self.fields {
            if let Some(spec) = metadata.spec(*field) {
                document.insert(spec.wire.to_owned(), value.clone());
            }
        }
        Ok(document)
    }
}

/// Decode a full entity, as for create.
///
/// Unknown keys are ignored; missing keys keep the entity's zero values.
///
/// # Errors
///
/// - [`PatchError::Decode`] on malformed JSON or a mistyped value
/// - [`PatchError::NotAnObject`] if the payload is not an object
pub fn decode_entity<E: EntityShape>(raw: &[u8]) -> Result<E, PatchError> {
    let object = decode_object(raw)?;
    decode_typed(&object)
}

/// Decode a full replacement of the record addressed by `identity`.
///
/// # Errors
///
/// Everything [`decode_entity`] reports, plus the identity errors of
/// [`decode_patch`].
pub fn decode_replacement<E: EntityShape>(
    raw: &[u8],
    identity: &Identity,
    metadata: &EntityMetadata<E>
) -> Result<E, PatchError> {
    check_identity(identity, metadata)?;
    let object = decode_object(raw)?;
    let mut entity = decode_typed(&object)?;
    reconcile(&mut entity, &object, identity, metadata)?;
    Ok(entity)
}

/// Decode a partial update of the record addressed by `identity`.
///
/// # Example
///
/// ```rust,ignore
/// let update = decode_patch(br#"{"name":"Ann"}"#, &Identity::from("u1"), &metadata)?;
/// assert_eq!(update.len(), 1);
/// assert_eq!(update.entity().id, "u1");
/// ```
///
/// # Errors
///
/// - [`PatchError::Decode`] / [`PatchError::NotAnObject`] on a bad payload
/// - [`PatchError::EmptyIdentity`] / [`PatchError::IdentityArity`] on a bad
///   addressed identity
/// - [`PatchError::IdentityMismatch`] if the payload names another record
pub fn decode_patch<E: EntityShape>(
    raw: &[u8],
    identity: &Identity,
    metadata: &EntityMetadata<E>
) -> Result<SparseUpdate<E>, PatchError> {
    check_identity(identity, metadata)?;
    let object = decode_object(raw)?;
    let mut entity: E = decode_typed(&object)?;
    reconcile(&mut entity, &object, identity, metadata)?;

    let mut fields = Vec::with_capacity(object.len());
    for key in object.keys() {
        let Some(spec) = metadata.field(key) else {
            continue;
        };
        if spec.identity {
            continue;
        }
        fields.push((spec.field, entity.read(spec.field)?));
    }

    Ok(SparseUpdate {
        entity,
        identity: identity.clone(),
        fields
    })
}

fn check_identity<E: EntityShape>(
    identity: &Identity,
    metadata: &EntityMetadata<E>
) -> Result<(), PatchError> {
    if identity.is_empty() {
        return Err(PatchError::EmptyIdentity);
    }
    if identity.len() != metadata.identity_len() {
        return Err(PatchError::IdentityArity {
            expected: metadata.identity_len(),
            actual:   identity.len()
        });
    }
    Ok(())
}

fn decode_object(raw: &[u8]) -> Result<Map<String, Value>, PatchError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(raw)? {
        Value::Object(object) => Ok(object),
        _ => Err(PatchError::NotAnObject)
    }
}

/// Overlay the payload onto the serialized zero value, then decode.
///
/// `null` keeps the zero value, so a non-optional field sent as `null`
/// decodes the same as an omitted one.
fn decode_typed<E: EntityShape>(object: &Map<String, Value>) -> Result<E, PatchError> {
    let mut base = serde_json::to_value(E::default())?;
    match &mut base {
        Value::Object(target) => {
            for (key, value) in object {
                if !value.is_null() {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        _ => base = Value::Object(object.clone())
    }
    Ok(serde_json::from_value(base)?)
}

fn reconcile<E: EntityShape>(
    entity: &mut E,
    object: &Map<String, Value>,
    identity: &Identity,
    metadata: &EntityMetadata<E>
) -> Result<(), PatchError> {
    for (spec, addressed) in metadata.identity_fields().zip(identity.parts()) {
        let supplied = object.get(spec.wire).is_some_and(|value| !is_blank(value));
        if !supplied {
            write_identity(entity, spec.field, addressed)?;
            continue;
        }
        let payload = text(&entity.read(spec.field)?);
        if payload != *addressed {
            return Err(PatchError::IdentityMismatch {
                field: spec.wire,
                payload,
                addressed: addressed.clone()
            });
        }
    }
    Ok(())
}

/// Write one identity component taken from a request path.
///
/// The component is tried as a string first, then as a JSON literal, so
/// numeric and boolean identities accept `"7"` or `"true"`.
pub(crate) fn write_identity<E: EntityShape>(
    entity: &mut E,
    field: E::Field,
    part: &str
) -> serde_json::Result<()> {
    match entity.write(field, Value::String(part.to_owned())) {
        Ok(()) => Ok(()),
        Err(err) => match serde_json::from_str::<Value>(part) {
            Ok(literal) if !literal.is_string() => entity.write(field, literal),
            _ => Err(err)
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fixtures::{Account, AccountField};

    fn metadata() -> EntityMetadata<Account> {
        EntityMetadata::extract().unwrap()
    }

    #[test]
    fn sparse_keys_are_supplied_non_identity_fields() {
        let meta = metadata();
        let update = decode_patch::<Account>(
            br#"{"email":"ann@example.com","name":"Ann","unknown":1}"#,
            &Identity::from("u1"),
            &meta
        )
        .unwrap();

        let keys: Vec<_> = update.fields().iter().map(|(field, _)| *field).collect();
        assert_eq!(keys, vec![AccountField::Email, AccountField::Name]);
        assert_eq!(update.get(AccountField::Name), Some(&json!("Ann")));
        assert!(!update.contains(AccountField::Age));
    }

    #[test]
    fn injects_missing_identity() {
        let meta = metadata();
        let update =
            decode_patch::<Account>(br#"{"name":"Ann"}"#, &Identity::from("u1"), &meta).unwrap();

        assert_eq!(update.entity().id, "u1");
        assert_eq!(update.identity(), &Identity::from("u1"));
        assert_eq!(update.len(), 1);
        assert_eq!(
            Value::Object(update.to_wire(&meta).unwrap()),
            json!({"id": "u1", "name": "Ann"})
        );
    }

    #[test]
    fn blank_payload_identity_counts_as_absent() {
        let meta = metadata();
        for raw in [&br#"{"id":null,"age":3}"#[..], br#"{"id":"","age":3}"#] {
            let update = decode_patch::<Account>(raw, &Identity::from("u1"), &meta).unwrap();
            assert_eq!(update.entity().id, "u1");
            assert_eq!(update.fields(), &[(AccountField::Age, json!(3))]);
        }
    }

    #[test]
    fn matching_identity_is_elided() {
        let meta = metadata();
        let update =
            decode_patch::<Account>(br#"{"id":"u1","age":3}"#, &Identity::from("u1"), &meta)
                .unwrap();
        assert!(!update.contains(AccountField::Id));
        assert_eq!(update.len(), 1);
    }

    #[test]
    fn conflicting_identity_is_rejected() {
        let meta = metadata();
        let err = decode_patch::<Account>(br#"{"id":"u2"}"#, &Identity::from("u1"), &meta)
            .unwrap_err();
        assert!(matches!(
            err,
            PatchError::IdentityMismatch { field: "id", ref payload, ref addressed }
                if payload == "u2" && addressed == "u1"
        ));
    }

    #[test]
    fn empty_addressed_identity_is_rejected() {
        let meta = metadata();
        let err = decode_patch::<Account>(br#"{"name":"Ann"}"#, &Identity::from(""), &meta)
            .unwrap_err();
        assert!(matches!(err, PatchError::EmptyIdentity));
    }

    #[test]
    fn identity_arity_is_checked() {
        let meta = metadata();
        let identity = Identity::new(vec!["a".into(), "b".into()]);
        let err = decode_patch::<Account>(b"{}", &identity, &meta).unwrap_err();
        assert!(matches!(
            err,
            PatchError::IdentityArity {
                expected: 1,
                actual:   2
            }
        ));
    }

    #[test]
    fn empty_payload_yields_empty_update() {
        let meta = metadata();
        for raw in [&b"{}"[..], b"", b"  \n"] {
            let update = decode_patch::<Account>(raw, &Identity::from("u1"), &meta).unwrap();
            assert!(update.is_empty());
        }
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let meta = metadata();
        let err = decode_patch::<Account>(b"[1,2]", &Identity::from("u1"), &meta).unwrap_err();
        assert!(matches!(err, PatchError::NotAnObject));
        let err = decode_patch::<Account>(b"{name", &Identity::from("u1"), &meta).unwrap_err();
        assert!(matches!(err, PatchError::Decode(_)));
    }

    #[test]
    fn mistyped_value_is_decode_error() {
        let meta = metadata();
        let err = decode_patch::<Account>(br#"{"age":"old"}"#, &Identity::from("u1"), &meta)
            .unwrap_err();
        assert!(matches!(err, PatchError::Decode(_)));
    }

    #[test]
    fn duplicate_keys_last_value_wins() {
        let meta = metadata();
        let update = decode_patch::<Account>(
            br#"{"name":"Ann","name":"Bea"}"#,
            &Identity::from("u1"),
            &meta
        )
        .unwrap();
        assert_eq!(update.fields(), &[(AccountField::Name, json!("Bea"))]);
        assert_eq!(update.entity().name, "Bea");
    }

    #[test]
    fn explicit_null_clears_optional_field() {
        let meta = metadata();
        let update =
            decode_patch::<Account>(br#"{"displayName":null}"#, &Identity::from("u1"), &meta)
                .unwrap();
        assert_eq!(update.get(AccountField::DisplayName), Some(&Value::Null));

        let mut stored = Account {
            id: "u1".into(),
            display_name: Some("Annie".into()),
            ..Account::default()
        };
        update.apply_to(&mut stored).unwrap();
        assert_eq!(stored.display_name, None);
    }

    #[test]
    fn apply_matches_direct_overlay() {
        let meta = metadata();
        let stored = Account {
            id:           "u1".into(),
            name:         "Ann".into(),
            email:        "ann@example.com".into(),
            display_name: Some("Annie".into()),
            age:          30
        };
        let update = decode_patch::<Account>(
            br#"{"email":"bea@example.com","age":31}"#,
            &Identity::from("u1"),
            &meta
        )
        .unwrap();

        let mut patched = stored.clone();
        update.apply_to(&mut patched).unwrap();

        let expected = Account {
            email: "bea@example.com".into(),
            age: 31,
            ..stored
        };
        assert_eq!(patched, expected);
    }

    #[test]
    fn replacement_reconciles_identity() {
        let meta = metadata();
        let account = decode_replacement::<Account>(
            br#"{"name":"Ann","email":"ann@example.com"}"#,
            &Identity::from("u1"),
            &meta
        )
        .unwrap();
        assert_eq!(account.id, "u1");
        assert_eq!(account.name, "Ann");
        assert_eq!(account.age, 0);

        let err = decode_replacement::<Account>(br#"{"id":"u9"}"#, &Identity::from("u1"), &meta)
            .unwrap_err();
        assert!(matches!(err, PatchError::IdentityMismatch { .. }));
    }

    #[test]
    fn decode_entity_ignores_unknown_keys() {
        let account: Account =
            decode_entity(br#"{"id":"u1","name":"Ann","role":"admin"}"#).unwrap();
        assert_eq!(account.id, "u1");
        assert_eq!(account.name, "Ann");
        assert_eq!(account.email, "");
    }

    #[test]
    fn identity_display_joins_parts() {
        assert_eq!(Identity::new(vec!["a".into(), "b".into()]).to_string(), "a/b");
        assert!(Identity::new(Vec::new()).is_empty());
        assert!(!Identity::from("a").is_empty());
    }
}
