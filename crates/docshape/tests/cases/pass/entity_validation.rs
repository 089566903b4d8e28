// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::{Entity, ViolationKind, validate};
use serde::{Deserialize, Serialize};

#[derive(Entity, Default, Serialize, Deserialize)]
#[entity(collection = "players")]
pub struct Player {
    #[id]
    #[validate(required)]
    pub id: String,

    #[validate(length(min = 2, max = 12))]
    pub nick: String,

    #[validate(range(min = -10, max = 10))]
    pub score: i32,

    #[validate(url)]
    pub homepage: Option<String>
}

fn main() {
    let player = Player {
        id:       String::new(),
        nick:     "x".to_string(),
        score:    42,
        homepage: Some("not a url".to_string())
    };

    let kinds: Vec<ViolationKind> = validate(&player, false)
        .into_iter()
        .map(|violation| violation.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ViolationKind::Required,
            ViolationKind::Length,
            ViolationKind::Range,
            ViolationKind::Url
        ]
    );

    let partial = validate(&player, true);
    assert_eq!(partial.len(), 3);
}
