// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request handlers and the router.
//!
//! | Method | Path | Answer |
//! |--------|------|--------|
//! | `GET` | `/health` | `{"status":"ok"}` |
//! | `GET` | `/users` | every user |
//! | `GET` / `POST` | `/users/search` | `{"list": [...], "total": n}` |
//! | `GET` | `/users/{id}` | the user, or `404` with `null` |
//! | `POST` | `/users` | `201` with the user |
//! | `PUT` | `/users/{id}` | the user |
//! | `PATCH` | `/users/{id}` | the identity plus the supplied fields |
//! | `DELETE` | `/users/{id}` | deleted count |

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get
};
use docshape::{CrudError, Identity, RawQuery, SearchPage};
use serde_json::{Map, Value, json};
use tower_http::trace::TraceLayer;

use crate::{UserService, error::ApiError, model::User, store::StoreError};

/// Build the router over a service.
pub fn router(users: UserService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(all).post(create))
        .route("/users/search", get(search_query).post(search_body))
        .route("/users/{id}", get(load).put(update).patch(patch).delete(delete))
        .layer(TraceLayer::new_for_http())
        .with_state(users)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn all(State(users): State<UserService>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(users.all().await?))
}

async fn load(
    State(users): State<UserService>,
    Path(id): Path<String>
) -> Result<Response, ApiError> {
    let found = users.load(&Identity::from(id.as_str())).await?;
    Ok(match found {
        Some(user) => Json(user).into_response(),
        None => (StatusCode::NOT_FOUND, Json(Value::Null)).into_response()
    })
}

async fn create(
    State(users): State<UserService>,
    body: Bytes
) -> Result<(StatusCode, Json<User>), ApiError> {
    let applied = users.create(&body).await?;
    ApiError::check_insert(applied.outcome)?;
    Ok((StatusCode::CREATED, Json(applied.value)))
}

async fn update(
    State(users): State<UserService>,
    Path(id): Path<String>,
    body: Bytes
) -> Result<Json<User>, ApiError> {
    let applied = users.update(&Identity::from(id.as_str()), &body).await?;
    ApiError::check(applied.outcome)?;
    Ok(Json(applied.value))
}

async fn patch(
    State(users): State<UserService>,
    Path(id): Path<String>,
    body: Bytes
) -> Result<Json<Map<String, Value>>, ApiError> {
    let applied = users.patch(&Identity::from(id.as_str()), &body).await?;
    ApiError::check(applied.outcome)?;
    let document = applied
        .value
        .to_wire(users.metadata())
        .map_err(CrudError::<StoreError>::Mapping)?;
    Ok(Json(document))
}

async fn delete(
    State(users): State<UserService>,
    Path(id): Path<String>
) -> Result<Json<u64>, ApiError> {
    let outcome = users.delete(&Identity::from(id.as_str())).await?;
    Ok(Json(ApiError::check(outcome)?))
}

async fn search_query(
    State(users): State<UserService>,
    Query(pairs): Query<Vec<(String, String)>>
) -> Result<Json<SearchPage<User>>, ApiError> {
    let raw: RawQuery = pairs.into_iter().collect();
    Ok(Json(users.search(&raw).await?))
}

async fn search_body(
    State(users): State<UserService>,
    body: Bytes
) -> Result<Json<SearchPage<User>>, ApiError> {
    let raw = if body.iter().all(u8::is_ascii_whitespace) {
        RawQuery::new()
    } else {
        let value: Value = serde_json::from_slice(&body)?;
        RawQuery::from_json(&value).map_err(CrudError::<StoreError>::Filter)?
    };
    Ok(Json(users.search(&raw).await?))
}
