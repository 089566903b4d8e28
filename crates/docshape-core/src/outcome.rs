// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tri-state outcome of a mutating store operation.

use serde::Serialize;

/// Result of `insert`, `replace`, `apply_partial` or `remove`.
///
/// Document stores report mutations with an integer: the number of affected
/// documents when positive, `0` when nothing matched and a negative value when
/// the write clashed with an existing document. The orchestrator converts that
/// integer exactly once with [`OperationResult::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "count", rename_all = "camelCase")]
pub enum OperationResult {
    /// The write affected this many documents.
    Success(u64),

    /// No document matched the identity.
    NotFound,

    /// The write clashed with an existing document.
    Conflict
}

impl OperationResult {
    /// Translate a store return code.
    ///
    /// ```rust
    /// use docshape_core::OperationResult;
    ///
    /// assert_eq!(OperationResult::from_code(1), OperationResult::Success(1));
    /// assert_eq!(OperationResult::from_code(0), OperationResult::NotFound);
    /// assert_eq!(OperationResult::from_code(-1), OperationResult::Conflict);
    /// ```
    pub const fn from_code(code: i64) -> Self {
        if code > 0 {
            Self::Success(code.unsigned_abs())
        } else if code == 0 {
            Self::NotFound
        } else {
            Self::Conflict
        }
    }

    /// Check if the write went through.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Number of affected documents, zero unless successful.
    pub const fn count(&self) -> u64 {
        match self {
            Self::Success(count) => *count,
            Self::NotFound | Self::Conflict => 0
        }
    }
}

impl From<i64> for OperationResult {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}
