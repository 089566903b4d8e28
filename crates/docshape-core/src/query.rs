// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query decoder.
//!
//! Turns raw query parameters into a typed filter and back.
//!
//! ```text
//! ?page=2&limit=10&name=ann&sort=-age,name
//!
//! AccountFilter {
//!     name:   Some("ann"),
//!     paging: Paging { page: 2, limit: 10, offset: 10, sort: [-age, name] },
//!     ..
//! }
//! ```
//!
//! Unrecognised parameters are ignored. Blank values count as absent.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use thiserror::Error;

use crate::{
    SortDirection,
    filter::{FilterDescriptor, FilterShape, Paging, SortField}
};

/// Error raised while decoding a filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A recognised parameter carries a value of the wrong type.
    #[error("invalid value `{value}` for filter parameter `{param}`")]
    InvalidFilterValue {
        /// Parameter name.
        param: String,
        /// Offending raw value.
        value: String
    },

    /// A search body that is not a flat JSON object.
    #[error("search body must be a JSON object of scalars or arrays of scalars")]
    InvalidBody
}

impl FilterError {
    fn invalid(param: &str, value: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            param: param.to_owned(),
            value: value.into()
        }
    }
}

/// Multimap of raw query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawQuery(HashMap<String, Vec<String>>);

impl RawQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a flat JSON object.
    ///
    /// Strings are taken verbatim, numbers and booleans in their JSON form,
    /// arrays contribute one value per element and `null` is skipped.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidBody`] if `body` is not an object
    /// - [`FilterError::InvalidFilterValue`] for a nested object
    pub fn from_json(body: &Value) -> Result<Self, FilterError> {
        let Value::Object(object) = body else {
            return Err(FilterError::InvalidBody);
        };
        let mut query = Self::new();
        for (key, value) in object {
            match value {
                Value::Array(items) => {
                    for item in items {
                        query.push_json(key, item)?;
                    }
                }
                scalar => query.push_json(key, scalar)?
            }
        }
        Ok(query)
    }

    /// Append one value to a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replace all values of a parameter.
    pub fn set(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.0.insert(key.into(), values);
    }

    /// Values of a parameter, empty when absent.
    pub fn get(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check if a parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of distinct parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key-value pairs sorted by key, for URL encoding.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let sorted: BTreeMap<_, _> = self.0.iter().collect();
        sorted
            .into_iter()
            .flat_map(|(key, values)| values.iter().map(|value| (key.clone(), value.clone())))
            .collect()
    }

    fn push_json(&mut self, key: &str, value: &Value) -> Result<(), FilterError> {
        match value {
            Value::Null => {}
            Value::String(text) => self.push(key, text.clone()),
            Value::Bool(_) | Value::Number(_) => self.push(key, value.to_string()),
            Value::Array(_) | Value::Object(_) => {
                return Err(FilterError::invalid(key, value.to_string()));
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for RawQuery
where
    K: Into<String>,
    V: Into<String>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.push(key, value);
        }
        query
    }
}

impl From<HashMap<String, Vec<String>>> for RawQuery {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

/// Decode raw parameters into a typed filter.
///
/// # Errors
///
/// Returns [`FilterError::InvalidFilterValue`] for a value that does not parse
/// into its parameter type, a non-numeric `page` / `limit`, or a `sort` key
/// that is not a declared entity field.
pub fn decode_filter<F: FilterShape>(
    raw: &RawQuery,
    descriptor: &FilterDescriptor<F>
) -> Result<F, FilterError> {
    let mut filter = F::default();
    for spec in descriptor.params() {
        let values = raw.get(spec.name);
        if values.is_empty() {
            continue;
        }
        filter
            .assign(spec.ordinal, values)
            .map_err(|err| FilterError::invalid(spec.name, err.value))?;
    }
    if let Some(paging) = filter.paging_mut() {
        *paging = decode_paging(raw, descriptor)?;
    }
    Ok(filter)
}

/// Encode a typed filter back into raw parameters.
///
/// `decode_filter(encode_filter(f)) == f` for any `f` produced by
/// [`decode_filter`].
pub fn encode_filter<F: FilterShape>(filter: &F, descriptor: &FilterDescriptor<F>) -> RawQuery {
    let mut raw = RawQuery::new();
    for spec in descriptor.params() {
        let values = filter.encode(spec.ordinal);
        if !values.is_empty() {
            raw.set(spec.name, values);
        }
    }
    if let Some(paging) = filter.paging() {
        raw.push("page", paging.page.to_string());
        raw.push("limit", paging.limit.to_string());
        if !paging.sort.is_empty() {
            let sort: Vec<String> = paging.sort.iter().map(SortField::to_string).collect();
            raw.push("sort", sort.join(","));
        }
    }
    raw
}

fn decode_paging<F: FilterShape>(
    raw: &RawQuery,
    descriptor: &FilterDescriptor<F>
) -> Result<Paging, FilterError> {
    let page = number(raw, "page")?.unwrap_or(1);
    let limit = number(raw, "limit")?.unwrap_or(0);
    let window = descriptor.policy().window(page, limit);

    let mut sort = Vec::new();
    for token in raw.get("sort").iter().flat_map(|value| value.split(',')) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (direction, name) = match token.strip_prefix('-') {
            Some(name) => (SortDirection::Desc, name),
            None => (
                SortDirection::Asc,
                token.strip_prefix('+').unwrap_or(token)
            )
        };
        let field = descriptor
            .sort_field(name)
            .ok_or_else(|| FilterError::invalid("sort", token))?;
        sort.push(SortField {
            field,
            direction
        });
    }

    Ok(Paging {
        page: page.max(1),
        limit: window.limit,
        offset: window.offset,
        sort
    })
}

fn number(raw: &RawQuery, key: &'static str) -> Result<Option<i64>, FilterError> {
    let Some(value) = raw
        .get(key)
        .iter()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
    else {
        return Ok(None);
    };
    value
        .parse()
        .map(Some)
        .map_err(|_| FilterError::invalid(key, value))
}
