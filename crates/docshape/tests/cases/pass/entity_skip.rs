// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::{Entity, EntityMetadata, Identity};
use serde::{Deserialize, Serialize};

#[derive(Entity, Default, Serialize, Deserialize)]
#[entity(collection = "documents")]
pub struct Document {
    #[id]
    pub id: u64,

    pub r#type: String,

    #[serde(skip)]
    pub cache: Vec<u8>,

    #[field(skip)]
    pub note: String
}

fn main() {
    assert_eq!(DocumentField::ALL, [DocumentField::Id, DocumentField::Type]);
    assert_eq!(DocumentField::Type.wire_name(), "type");

    let metadata = EntityMetadata::<Document>::extract().unwrap();
    assert_eq!(metadata.fields().len(), 2);
    assert!(metadata.field("note").is_none());

    let key = metadata.storage_key(&Identity::from("7")).unwrap();
    assert_eq!(key.get("id"), Some(&serde_json::json!(7)));
}
