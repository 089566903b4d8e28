// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed query parameter values.
//!
//! Filter fields are `Option<T>` (single valued) or `Vec<T>` (multi valued)
//! over a [`ParamScalar`]. The generated [`FilterShape`](crate::FilterShape)
//! code dispatches to [`FilterParam`] for decoding, encoding and predicate
//! extraction.

use serde_json::Value;
use thiserror::Error;

/// A raw value that does not parse into the parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{value}` is not a valid value")]
pub struct ParamError {
    /// Offending raw value.
    pub value: String
}

/// Scalar that can appear in a query string.
pub trait ParamScalar: Sized {
    /// Parse a trimmed, non-empty raw value.
    fn parse_param(raw: &str) -> Option<Self>;

    /// Render for a query string.
    fn encode_param(&self) -> String;

    /// Value compared against stored documents.
    fn to_json(&self) -> Value;
}

impl ParamScalar for String {
    fn parse_param(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }

    fn encode_param(&self) -> String {
        self.clone()
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ParamScalar for bool {
    fn parse_param(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None
        }
    }

    fn encode_param(&self) -> String {
        self.to_string()
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! numeric_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamScalar for $ty {
                fn parse_param(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }

                fn encode_param(&self) -> String {
                    self.to_string()
                }

                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

numeric_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(feature = "chrono")]
impl ParamScalar for chrono::NaiveDate {
    fn parse_param(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn encode_param(&self) -> String {
        self.to_string()
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

/// Field type of a filter parameter.
pub trait FilterParam {
    /// Whether the parameter accepts several values.
    const MULTI: bool;

    /// Replace the value from raw strings. Blank strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns the first raw value that does not parse.
    fn assign(&mut self, values: &[String]) -> Result<(), ParamError>;

    /// Predicate value, `None` when the parameter is unset.
    fn predicate(&self) -> Option<Value>;

    /// Raw strings that decode back into the same value.
    fn encode(&self) -> Vec<String>;
}

impl<T: ParamScalar> FilterParam for Option<T> {
    const MULTI: bool = false;

    fn assign(&mut self, values: &[String]) -> Result<(), ParamError> {
        *self = match values.iter().map(|raw| raw.trim()).find(|raw| !raw.is_empty()) {
            Some(raw) => Some(parse(raw)?),
            None => None
        };
        Ok(())
    }

    fn predicate(&self) -> Option<Value> {
        self.as_ref().map(ParamScalar::to_json)
    }

    fn encode(&self) -> Vec<String> {
        self.iter().map(ParamScalar::encode_param).collect()
    }
}

impl<T: ParamScalar> FilterParam for Vec<T> {
    const MULTI: bool = true;

    fn assign(&mut self, values: &[String]) -> Result<(), ParamError> {
        let mut parsed = Vec::new();
        for raw in values.iter().flat_map(|raw| raw.split(',')) {
            let raw = raw.trim();
            if !raw.is_empty() {
                parsed.push(parse(raw)?);
            }
        }
        *self = parsed;
        Ok(())
    }

    fn predicate(&self) -> Option<Value> {
        (!self.is_empty()).then(|| Value::Array(self.iter().map(ParamScalar::to_json).collect()))
    }

    fn encode(&self) -> Vec<String> {
        self.iter().map(ParamScalar::encode_param).collect()
    }
}

fn parse<T: ParamScalar>(raw: &str) -> Result<T, ParamError> {
    T::parse_param(raw).ok_or_else(|| ParamError {
        value: raw.to_owned()
    })
}
