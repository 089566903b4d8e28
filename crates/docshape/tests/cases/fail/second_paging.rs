// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::{Filter, Paging};

#[derive(Filter, Default)]
pub struct UserFilter {
    pub name:   Option<String>,
    #[paging]
    pub paging: Paging,
    #[paging]
    pub extra:  Paging
}

fn main() {}
