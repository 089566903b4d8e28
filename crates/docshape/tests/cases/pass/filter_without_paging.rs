// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::{Entity, EntityMetadata, Filter, FilterDescriptor, FilterShape};
use serde::{Deserialize, Serialize};

#[derive(Entity, Default, Serialize, Deserialize)]
#[entity(collection = "tags")]
pub struct Tag {
    #[id]
    pub id: String,

    pub label: String
}

#[derive(Filter, Default)]
pub struct TagFilter {
    #[filter]
    pub label: Option<String>,

    #[filter(skip)]
    pub cursor: String
}

#[derive(Filter, Default)]
pub struct AnyTag {}

fn main() {
    assert_eq!(TagFilter::paging_ordinal(), None);
    assert_eq!(AnyTag::params().len(), 0);

    let metadata = EntityMetadata::<Tag>::extract().unwrap();
    assert!(FilterDescriptor::<TagFilter>::build(&metadata).is_ok());
    assert!(FilterDescriptor::<AnyTag>::build(&metadata).is_ok());
}
