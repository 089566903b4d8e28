// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::{
    Entity, EntityMetadata, Filter, FilterDescriptor, FilterOp, Paging, RawQuery, decode_filter
};
use serde::{Deserialize, Serialize};

#[derive(Entity, Default, Serialize, Deserialize)]
#[entity(collection = "users")]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[id]
    pub id: String,

    pub user_name: String,

    pub age: u32
}

#[derive(Filter, Debug, Default)]
#[filter(rename_all = "camelCase")]
pub struct UserFilter {
    pub id: Vec<String>,

    #[filter(like)]
    pub user_name: Option<String>,

    #[filter(gte, param = "minAge", field = "age")]
    pub min_age: Option<u32>,

    #[paging]
    pub paging: Paging
}

fn main() {
    let metadata = EntityMetadata::<User>::extract().unwrap();
    let descriptor = FilterDescriptor::<UserFilter>::build(&metadata).unwrap();
    assert_eq!(descriptor.params().len(), 3);
    assert_eq!(descriptor.param("minAge").map(|spec| spec.op), Some(FilterOp::Gte));
    assert_eq!(descriptor.paging_ordinal(), Some(3));

    let raw: RawQuery = [("id", "a,b"), ("userName", "an"), ("minAge", "18"), ("page", "2")]
        .into_iter()
        .collect();
    let filter = decode_filter(&raw, &descriptor).unwrap();
    assert_eq!(filter.id, vec!["a", "b"]);
    assert_eq!(filter.user_name.as_deref(), Some("an"));
    assert_eq!(filter.min_age, Some(18));
    assert_eq!(filter.paging.page, 2);
    assert_eq!(filter.paging.offset, filter.paging.limit);
}
