// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing.
//!
//! This module handles parsing of entity-level attributes using darling,
//! and provides the main [`EntityDef`] structure used by all code generators.
//!
//! # Module Structure
//!
//! ```text
//! entity/
//! ├── def.rs          EntityDef struct and accessors
//! ├── constructor.rs  EntityDef::from_derive_input() and shape checks
//! ├── attrs.rs        EntityAttrs (darling parsing struct)
//! └── tests.rs        Unit tests
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::entity::parse::EntityDef;
//!
//! let entity = EntityDef::from_derive_input(&input)?;
//! let ids = entity.id_fields();
//! ```

mod attrs;
mod constructor;
mod def;

pub use attrs::EntityAttrs;
pub use def::EntityDef;
