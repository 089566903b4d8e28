// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docshape::Filter;

#[derive(Filter, Default)]
pub struct UserFilter {
    pub sort: Option<String>
}

fn main() {}
