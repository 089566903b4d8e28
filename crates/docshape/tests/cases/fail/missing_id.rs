// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::Entity;
use serde::{Deserialize, Serialize};

#[derive(Entity, Default, Serialize, Deserialize)]
#[entity(collection = "users")]
pub struct User {
    pub name: String
}

fn main() {}
