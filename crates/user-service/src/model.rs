// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The `User` record.

use chrono::NaiveDate;
use docshape::Entity;
use serde::{Deserialize, Serialize};

/// Registered user.
///
/// Stored in the `users` collection under `_id`.
#[derive(Entity, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[entity(collection = "users")]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Record key.
    #[id]
    #[field(storage = "_id")]
    #[validate(required)]
    pub id: String,

    /// Login name.
    #[validate(required, length(max = 100))]
    pub username: String,

    /// Contact address.
    #[validate(required, email, length(max = 100))]
    pub email: String,

    /// Phone number.
    #[validate(length(max = 18))]
    pub phone: String,

    pub date_of_birth: Option<NaiveDate>
}

#[cfg(test)]
mod tests {
    use docshape::{EntityMetadata, ViolationKind, validate};

    use super::*;

    fn valid() -> User {
        User {
            id:            "u1".to_string(),
            username:      "ann".to_string(),
            email:         "ann@example.com".to_string(),
            phone:         "+1 555 0100".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 1)
        }
    }

    #[test]
    fn wire_names_are_camel_case() {
        let metadata = EntityMetadata::<User>::extract().unwrap();
        assert_eq!(metadata.storage_name("id"), Some("_id"));
        assert_eq!(metadata.storage_name("dateOfBirth"), Some("dateOfBirth"));
        assert_eq!(UserField::DateOfBirth.wire_name(), "dateOfBirth");
    }

    #[test]
    fn valid_user_passes() {
        assert!(validate(&valid(), false).is_empty());
    }

    #[test]
    fn rules_are_reported_in_field_order() {
        let user = User {
            id: String::new(),
            email: "not-an-email".to_string(),
            phone: "0".repeat(19),
            ..valid()
        };
        let violations = validate(&user, false);
        let reported: Vec<(&str, ViolationKind)> = violations
            .iter()
            .map(|violation| (violation.field, violation.kind))
            .collect();
        assert_eq!(
            reported,
            vec![
                ("id", ViolationKind::Required),
                ("email", ViolationKind::Email),
                ("phone", ViolationKind::Length)
            ]
        );
    }

    #[test]
    fn partial_validation_ignores_missing_values() {
        let user = User {
            id: "u1".to_string(),
            ..User::default()
        };
        assert!(validate(&user, true).is_empty());
        assert_eq!(validate(&user, false).len(), 2);
    }
}
