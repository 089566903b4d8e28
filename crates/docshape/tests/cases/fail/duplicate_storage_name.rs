// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::Entity;
use serde::{Deserialize, Serialize};

#[derive(Entity, Default, Serialize, Deserialize)]
#[entity(collection = "users")]
pub struct User {
    #[id]
    #[field(storage = "_id")]
    pub id:        String,
    #[field(storage = "_id")]
    pub legacy_id: String
}

fn main() {}
