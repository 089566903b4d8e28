// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field checks called by generated [`Validate`](super::Validate) code.
//!
//! `required` fails on the zero value. The other checks inspect the value as
//! it is, zero included: a supplied `0` still fails `range(min = 18)`.
//! Generated code skips them on a field whose `required` check already
//! failed, so a missing value reports `required` alone.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display
};

use validator::{ValidateEmail, ValidateLength, ValidateUrl};

use super::{Violation, ViolationKind};

/// Zero-value detection.
pub trait Presence {
    /// Check if the value is the type's zero value.
    fn is_blank(&self) -> bool;
}

impl Presence for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for bool {
    fn is_blank(&self) -> bool {
        !*self
    }
}

impl<T> Presence for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

impl<T> Presence for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Presence for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Presence for HashMap<K, V, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Presence for BTreeMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for serde_json::Value {
    fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(text) => text.is_empty(),
            Self::Array(items) => items.is_empty(),
            Self::Object(map) => map.is_empty(),
            Self::Bool(_) | Self::Number(_) => false
        }
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

macro_rules! zero_is_blank {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Presence for $ty {
                fn is_blank(&self) -> bool {
                    *self == $zero
                }
            }
        )*
    };
}

zero_is_blank!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0
);

#[cfg(feature = "chrono")]
impl Presence for chrono::NaiveDate {
    fn is_blank(&self) -> bool {
        false
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Presence for chrono::DateTime<Tz> {
    fn is_blank(&self) -> bool {
        false
    }
}

/// Fail on the zero value.
pub fn required<T: Presence + ?Sized>(field: &'static str, value: &T) -> Option<Violation> {
    value
        .is_blank()
        .then(|| Violation::new(field, ViolationKind::Required, "is required"))
}

/// Fail when the length in characters (or items) is outside `min..=max`.
pub fn length<T>(
    field: &'static str,
    value: &T,
    min: Option<u64>,
    max: Option<u64>
) -> Option<Violation>
where
    T: ValidateLength<u64>
{
    if value.validate_length(min, max, None) {
        return None;
    }
    let message = match (min, max) {
        (Some(min), Some(max)) => format!("length must be between {min} and {max}"),
        (Some(min), None) => format!("length must be at least {min}"),
        (None, Some(max)) => format!("length must be at most {max}"),
        (None, None) => return None
    };
    Some(Violation::new(field, ViolationKind::Length, message))
}

/// Fail when the number is outside `min..=max`.
pub fn range<T>(field: &'static str, value: &T, min: Option<T>, max: Option<T>) -> Option<Violation>
where
    T: PartialOrd + Display
{
    let below = min.as_ref().is_some_and(|min| value < min);
    let above = max.as_ref().is_some_and(|max| value > max);
    if !below && !above {
        return None;
    }
    let message = match (min, max) {
        (Some(min), Some(max)) => format!("must be between {min} and {max}"),
        (Some(min), None) => format!("must be at least {min}"),
        (None, Some(max)) => format!("must be at most {max}"),
        (None, None) => return None
    };
    Some(Violation::new(field, ViolationKind::Range, message))
}

/// Fail when the value is not an email address.
pub fn email<T>(field: &'static str, value: &T) -> Option<Violation>
where
    T: ValidateEmail
{
    (!value.validate_email())
        .then(|| Violation::new(field, ViolationKind::Email, "must be an email address"))
}

/// Fail when the value is not a URL.
pub fn url<T>(field: &'static str, value: &T) -> Option<Violation>
where
    T: ValidateUrl
{
    (!value.validate_url())
        .then(|| Violation::new(field, ViolationKind::Url, "must be a URL"))
}
