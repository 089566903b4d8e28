// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::{Entity, EntityMetadata, EntityShape, Identity, decode_patch};
use serde::{Deserialize, Serialize};

/// Registered user.
#[derive(Entity, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[entity(collection = "users")]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Record key.
    #[id]
    #[field(storage = "_id")]
    #[validate(required)]
    pub id: String,

    #[validate(required, length(max = 100))]
    pub user_name: String,

    #[validate(required, email)]
    pub email: String,

    pub phone: Option<String>
}

fn main() {
    assert_eq!(UserField::ALL.len(), 4);
    assert_eq!(UserField::UserName.wire_name(), "userName");
    assert_eq!(User::NAME, "User");
    assert_eq!(User::COLLECTION, "users");

    let metadata = EntityMetadata::<User>::extract().unwrap();
    assert_eq!(metadata.storage_name("id"), Some("_id"));
    assert_eq!(metadata.storage_name("userName"), Some("userName"));

    let update =
        decode_patch(br#"{"userName":"ann"}"#, &Identity::from("u1"), &metadata).unwrap();
    assert_eq!(update.len(), 1);
    assert!(update.contains(UserField::UserName));
    assert_eq!(update.entity().id, "u1");
}
