// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::{Entity, EntityMetadata, Identity};
use serde::{Deserialize, Serialize};

#[derive(Entity, Default, Serialize, Deserialize)]
#[entity(collection = "memberships")]
pub struct Membership {
    #[id]
    pub org: String,

    #[id]
    pub user: String,

    pub role: String
}

fn main() {
    let metadata = EntityMetadata::<Membership>::extract().unwrap();
    assert_eq!(metadata.identity_len(), 2);

    let key = metadata
        .storage_key(&Identity::new(vec!["acme".to_string(), "ann".to_string()]))
        .unwrap();
    assert_eq!(key.get("org"), Some(&serde_json::json!("acme")));
    assert_eq!(key.get("user"), Some(&serde_json::json!("ann")));
    assert!(metadata.storage_key(&Identity::from("acme")).is_err());
}
