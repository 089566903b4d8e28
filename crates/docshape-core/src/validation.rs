// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validation adapter.
//!
//! Entities describe their rules with `#[validate(...)]`; the derive emits a
//! [`Validate`] implementation that calls the checks in [`rules`] in field
//! declaration order.
//!
//! Partial updates need one adjustment: a field the client did not send
//! decodes to its zero value, which would fail `required`. [`validate`] with
//! `partial = true` drops every `required` violation; [`validate_patch`]
//! drops them only for fields absent from the payload.

pub mod rules;

use std::fmt;

use serde::Serialize;

use crate::{metadata::EntityMetadata, shape::EntityShape, sparse::SparseUpdate};

/// Machine code of a failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// Value missing or zero.
    Required,
    /// Length outside bounds.
    Length,
    /// Number outside bounds.
    Range,
    /// Not an email address.
    Email,
    /// Not a URL.
    Url
}

impl ViolationKind {
    /// Code as sent to clients.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Length => "length",
            Self::Range => "range",
            Self::Email => "email",
            Self::Url => "url"
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Wire name of the field.
    pub field: &'static str,

    /// Failed rule.
    #[serde(rename = "code")]
    pub kind: ViolationKind,

    /// Human readable explanation.
    pub message: String
}

impl Violation {
    /// Create a violation.
    pub fn new(field: &'static str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into()
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Declarative rule set of an entity.
///
/// Generated by `#[derive(Entity)]` from `#[validate(...)]` attributes.
pub trait Validate {
    /// Run every rule, returning violations in declaration order.
    fn violations(&self) -> Vec<Violation>;
}

/// Validate an entity.
///
/// With `partial` set, `required` violations are discarded and every other
/// kind is kept.
pub fn validate<E: Validate>(entity: &E, partial: bool) -> Vec<Violation> {
    let mut violations = entity.violations();
    if partial {
        violations.retain(|violation| violation.kind != ViolationKind::Required);
    }
    violations
}

/// Validate a sparse update.
///
/// `required` violations are kept for identity fields and for fields the
/// client supplied, so an explicitly emptied field is still reported.
pub fn validate_patch<E>(update: &SparseUpdate<E>, metadata: &EntityMetadata<E>) -> Vec<Violation>
where
    E: EntityShape + Validate
{
    let mut violations = update.entity().violations();
    violations.retain(|violation| {
        if violation.kind != ViolationKind::Required {
            return true;
        }
        metadata
            .field(violation.field)
            .is_none_or(|spec| spec.identity || update.contains(spec.field))
    });
    violations
}
