// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Search parameters of `/users/search`.

use chrono::NaiveDate;
use docshape::{Filter, Paging};

/// User search filter.
///
/// ```text
/// ?id=u1,u2&username=an&dateOfBirthFrom=1990-01-01&page=2&limit=10&sort=-username
/// ```
#[derive(Filter, Debug, Default, Clone, PartialEq)]
#[filter(rename_all = "camelCase")]
pub struct UserFilter {
    /// Any of these ids.
    pub id: Vec<String>,

    #[filter(like)]
    pub username: Option<String>,

    #[filter(like)]
    pub email: Option<String>,

    #[filter(like)]
    pub phone: Option<String>,

    /// Born on or after.
    #[filter(gte, field = "dateOfBirth")]
    pub date_of_birth_from: Option<NaiveDate>,

    /// Born on or before.
    #[filter(lte, field = "dateOfBirth")]
    pub date_of_birth_to: Option<NaiveDate>,

    #[paging]
    pub paging: Paging
}
