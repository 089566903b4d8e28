// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![allow(unreachable_patterns)]

use docshape::Entity;
use serde::{Deserialize, Serialize};

#[derive(Entity, Default, Serialize, Deserialize)]
#[entity(collection = "users")]
pub struct User {
    #[id]
    pub id:    String,
    pub name:  String,
    #[serde(rename = "name")]
    pub alias: String
}

fn main() {}
