// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Filter derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! filter.rs (orchestrator)
//! ├── parse.rs  → FilterDef, ParamDef, PagingDef
//! └── shape.rs  → FilterShape impl
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Filter, Default)]
//! #[filter(rename_all = "camelCase")]
//! pub struct UserFilter {
//!     pub id: Vec<String>,
//!     #[filter(like)]
//!     pub username: Option<String>,
//!     #[filter(gte, field = "dateOfBirth")]
//!     pub date_of_birth_from: Option<NaiveDate>,
//!     #[paging]
//!     pub paging: Paging,
//! }
//! ```
//!
//! Parameter names and targets are checked against the entity when
//! `FilterDescriptor::build` runs; the macro checks what it can see alone:
//! reserved and duplicate names, parameter types and the single paging
//! block.

mod parse;
mod shape;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::FilterDef;

/// Main entry point for the Filter derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match FilterDef::from_derive_input(&input) {
        Ok(filter) => shape::generate(&filter).into(),
        Err(err) => err.write_errors().into()
    }
}
