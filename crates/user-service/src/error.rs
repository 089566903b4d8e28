// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP error responses.
//!
//! | Error | Status | Body |
//! |-------|--------|------|
//! | [`ApiError::NotFound`] | 404 | `0` |
//! | [`ApiError::Conflict`] | 409 | `-1` |
//! | malformed body, identity, filter or empty patch | 400 | message |
//! | failed rules | 422 | violation list |
//! | store or mapping failure | 500 | `Internal Server Error` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response}
};
use docshape::{CrudError, OperationResult};
use thiserror::Error;

use crate::store::StoreError;

/// Error returned by the request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No record matched the identity.
    #[error("record not found")]
    NotFound,

    /// The write clashed with an existing record.
    #[error("record conflicts with an existing one")]
    Conflict,

    /// A request body that is not JSON.
    #[error("malformed request body: {0}")]
    Body(#[from] serde_json::Error),

    /// Failure inside the orchestrator.
    #[error(transparent)]
    Crud(#[from] CrudError<StoreError>)
}

impl ApiError {
    /// Turn a non-successful outcome into an error, passing the count of a
    /// successful one through.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::Conflict`].
    pub fn check(outcome: OperationResult) -> Result<u64, Self> {
        match outcome {
            OperationResult::Success(count) => Ok(count),
            OperationResult::NotFound => Err(Self::NotFound),
            OperationResult::Conflict => Err(Self::Conflict)
        }
    }

    /// Like [`ApiError::check`], for inserts: a miss cannot happen on an
    /// insert, so every unsuccessful outcome is a conflict.
    ///
    /// # Errors
    ///
    /// [`ApiError::Conflict`].
    pub fn check_insert(outcome: OperationResult) -> Result<u64, Self> {
        match outcome {
            OperationResult::Success(count) => Ok(count),
            OperationResult::NotFound | OperationResult::Conflict => Err(Self::Conflict)
        }
    }

    /// Status code of this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Crud(err) => match err {
                CrudError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CrudError::Patch(_) | CrudError::EmptyPatch | CrudError::Filter(_) => {
                    StatusCode::BAD_REQUEST
                }
                CrudError::Mapping(_) | CrudError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::NotFound => (status, Json(0)).into_response(),
            Self::Conflict => (status, Json(-1)).into_response(),
            Self::Crud(CrudError::Invalid(violations)) => {
                (status, Json(violations)).into_response()
            }
            err if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %err, "request failed");
                (status, "Internal Server Error").into_response()
            }
            err => (status, err.to_string()).into_response()
        }
    }
}
