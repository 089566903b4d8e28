// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-written descriptors shared by the unit tests.
//!
//! They mirror what `#[derive(Entity)]` and `#[derive(Filter)]` emit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    filter::{FilterOp, FilterShape, ParamSpec, Paging},
    param::{FilterParam, ParamError},
    shape::{EntityShape, FieldSpec},
    validation::{Validate, Violation, rules}
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id:           String,
    pub name:         String,
    pub email:        String,
    pub display_name: Option<String>,
    pub age:          u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountField {
    Id,
    Name,
    Email,
    DisplayName,
    Age
}

static ACCOUNT_FIELDS: [FieldSpec<AccountField>; 5] = [
    FieldSpec::new(AccountField::Id, "id").stored_as("_id").identity(),
    FieldSpec::new(AccountField::Name, "name"),
    FieldSpec::new(AccountField::Email, "email"),
    FieldSpec::new(AccountField::DisplayName, "displayName").stored_as("display_name"),
    FieldSpec::new(AccountField::Age, "age")
];

impl EntityShape for Account {
    type Field = AccountField;

    const NAME: &'static str = "Account";
    const COLLECTION: &'static str = "accounts";

    fn fields() -> &'static [FieldSpec<AccountField>] {
        &ACCOUNT_FIELDS
    }

    fn read(&self, field: AccountField) -> serde_json::Result<Value> {
        match field {
            AccountField::Id => serde_json::to_value(&self.id),
            AccountField::Name => serde_json::to_value(&self.name),
            AccountField::Email => serde_json::to_value(&self.email),
            AccountField::DisplayName => serde_json::to_value(&self.display_name),
            AccountField::Age => serde_json::to_value(self.age)
        }
    }

    fn write(&mut self, field: AccountField, value: Value) -> serde_json::Result<()> {
        match field {
            AccountField::Id => self.id = serde_json::from_value(value)?,
            AccountField::Name => self.name = serde_json::from_value(value)?,
            AccountField::Email => self.email = serde_json::from_value(value)?,
            AccountField::DisplayName => self.display_name = serde_json::from_value(value)?,
            AccountField::Age => self.age = serde_json::from_value(value)?
        }
        Ok(())
    }
}

impl Validate for Account {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        out.extend(rules::required("id", &self.id));
        if let Some(violation) = rules::required("name", &self.name) {
            out.push(violation);
        } else {
            out.extend(rules::length("name", &self.name, None, Some(50)));
        }
        if let Some(violation) = rules::required("email", &self.email) {
            out.push(violation);
        } else {
            out.extend(rules::email("email", &self.email));
        }
        if let Some(value) = self.display_name.as_ref() {
            out.extend(rules::length("displayName", value, Some(2), Some(30)));
        }
        out.extend(rules::range("age", &self.age, None, Some(150)));
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountFilter {
    pub id:      Vec<String>,
    pub name:    Option<String>,
    pub email:   Option<String>,
    pub min_age: Option<u32>,
    pub paging:  Paging
}

static ACCOUNT_FILTER_PARAMS: [ParamSpec; 4] = [
    ParamSpec::new("id", 0).multi(true),
    ParamSpec::new("name", 1).op(FilterOp::Like),
    ParamSpec::new("email", 2),
    ParamSpec::new("minAge", 3).targets("age").op(FilterOp::Gte)
];

impl FilterShape for AccountFilter {
    const NAME: &'static str = "AccountFilter";

    fn params() -> &'static [ParamSpec] {
        &ACCOUNT_FILTER_PARAMS
    }

    fn paging_ordinal() -> Option<usize> {
        Some(4)
    }

    fn paging(&self) -> Option<&Paging> {
        Some(&self.paging)
    }

    fn paging_mut(&mut self) -> Option<&mut Paging> {
        Some(&mut self.paging)
    }

    fn assign(&mut self, ordinal: usize, values: &[String]) -> Result<(), ParamError> {
        match ordinal {
            0 => self.id.assign(values),
            1 => self.name.assign(values),
            2 => self.email.assign(values),
            3 => self.min_age.assign(values),
            _ => Ok(())
        }
    }

    fn predicate(&self, ordinal: usize) -> Option<Value> {
        match ordinal {
            0 => self.id.predicate(),
            1 => self.name.predicate(),
            2 => self.email.predicate(),
            3 => self.min_age.predicate(),
            _ => None
        }
    }

    fn encode(&self, ordinal: usize) -> Vec<String> {
        match ordinal {
            0 => self.id.encode(),
            1 => self.name.encode(),
            2 => self.email.encode(),
            3 => self.min_age.encode(),
            _ => Vec::new()
        }
    }
}

/// Filter claiming a reserved parameter name.
#[derive(Default)]
pub struct ReservedFilter {
    pub sort: Option<String>
}

static RESERVED_PARAMS: [ParamSpec; 1] = [ParamSpec::new("sort", 0).targets("name")];

impl FilterShape for ReservedFilter {
    const NAME: &'static str = "ReservedFilter";

    fn params() -> &'static [ParamSpec] {
        &RESERVED_PARAMS
    }

    fn paging_ordinal() -> Option<usize> {
        None
    }

    fn paging(&self) -> Option<&Paging> {
        None
    }

    fn paging_mut(&mut self) -> Option<&mut Paging> {
        None
    }

    fn assign(&mut self, ordinal: usize, values: &[String]) -> Result<(), ParamError> {
        match ordinal {
            0 => self.sort.assign(values),
            _ => Ok(())
        }
    }

    fn predicate(&self, ordinal: usize) -> Option<Value> {
        match ordinal {
            0 => self.sort.predicate(),
            _ => None
        }
    }

    fn encode(&self, ordinal: usize) -> Vec<String> {
        match ordinal {
            0 => self.sort.encode(),
            _ => Vec::new()
        }
    }
}

/// Filter targeting a field `Account` does not declare.
#[derive(Default)]
pub struct StrayFilter {
    pub nickname: Option<String>
}

static STRAY_PARAMS: [ParamSpec; 1] = [ParamSpec::new("nickname", 0)];

impl FilterShape for StrayFilter {
    const NAME: &'static str = "StrayFilter";

    fn params() -> &'static [ParamSpec] {
        &STRAY_PARAMS
    }

    fn paging_ordinal() -> Option<usize> {
        None
    }

    fn paging(&self) -> Option<&Paging> {
        None
    }

    fn paging_mut(&mut self) -> Option<&mut Paging> {
        None
    }

    fn assign(&mut self, ordinal: usize, values: &[String]) -> Result<(), ParamError> {
        match ordinal {
            0 => self.nickname.assign(values),
            _ => Ok(())
        }
    }

    fn predicate(&self, ordinal: usize) -> Option<Value> {
        match ordinal {
            0 => self.nickname.predicate(),
            _ => None
        }
    }

    fn encode(&self, ordinal: usize) -> Vec<String> {
        match ordinal {
            0 => self.nickname.encode(),
            _ => Vec::new()
        }
    }
}

/// Filter declaring the parameter `name` twice.
#[derive(Default)]
pub struct TwinFilter {
    pub name:  Option<String>,
    pub alias: Option<String>
}

static TWIN_PARAMS: [ParamSpec; 2] = [
    ParamSpec::new("name", 0),
    ParamSpec::new("name", 1).op(FilterOp::Like)
];

impl FilterShape for TwinFilter {
    const NAME: &'static str = "TwinFilter";

    fn params() -> &'static [ParamSpec] {
        &TWIN_PARAMS
    }

    fn paging_ordinal() -> Option<usize> {
        None
    }

    fn paging(&self) -> Option<&Paging> {
        None
    }

    fn paging_mut(&mut self) -> Option<&mut Paging> {
        None
    }

    fn assign(&mut self, ordinal: usize, values: &[String]) -> Result<(), ParamError> {
        match ordinal {
            0 => self.name.assign(values),
            1 => self.alias.assign(values),
            _ => Ok(())
        }
    }

    fn predicate(&self, ordinal: usize) -> Option<Value> {
        match ordinal {
            0 => self.name.predicate(),
            1 => self.alias.predicate(),
            _ => None
        }
    }

    fn encode(&self, ordinal: usize) -> Vec<String> {
        match ordinal {
            0 => self.name.encode(),
            1 => self.alias.encode(),
            _ => Vec::new()
        }
    }
}

/// Entity without an identity field.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Orphan {
    pub name: String
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrphanField {
    Name
}

static ORPHAN_FIELDS: [FieldSpec<OrphanField>; 1] = [FieldSpec::new(OrphanField::Name, "name")];

impl EntityShape for Orphan {
    type Field = OrphanField;

    const NAME: &'static str = "Orphan";
    const COLLECTION: &'static str = "orphans";

    fn fields() -> &'static [FieldSpec<OrphanField>] {
        &ORPHAN_FIELDS
    }

    fn read(&self, _field: OrphanField) -> serde_json::Result<Value> {
        serde_json::to_value(&self.name)
    }

    fn write(&mut self, _field: OrphanField, value: Value) -> serde_json::Result<()> {
        self.name = serde_json::from_value(value)?;
        Ok(())
    }
}

/// Entity declaring the wire name `name` twice.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Clash {
    pub id:    String,
    pub name:  String,
    pub alias: String
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClashField {
    Id,
    Name,
    Alias
}

static CLASH_FIELDS: [FieldSpec<ClashField>; 3] = [
    FieldSpec::new(ClashField::Id, "id").identity(),
    FieldSpec::new(ClashField::Name, "name"),
    FieldSpec::new(ClashField::Alias, "name").stored_as("alias")
];

impl EntityShape for Clash {
    type Field = ClashField;

    const NAME: &'static str = "Clash";
    const COLLECTION: &'static str = "clashes";

    fn fields() -> &'static [FieldSpec<ClashField>] {
        &CLASH_FIELDS
    }

    fn read(&self, field: ClashField) -> serde_json::Result<Value> {
        match field {
            ClashField::Id => serde_json::to_value(&self.id),
            ClashField::Name => serde_json::to_value(&self.name),
            ClashField::Alias => serde_json::to_value(&self.alias)
        }
    }

    fn write(&mut self, field: ClashField, value: Value) -> serde_json::Result<()> {
        match field {
            ClashField::Id => self.id = serde_json::from_value(value)?,
            ClashField::Name => self.name = serde_json::from_value(value)?,
            ClashField::Alias => self.alias = serde_json::from_value(value)?
        }
        Ok(())
    }
}

/// Entity storing two fields under `label`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageClash {
    pub id:    String,
    pub name:  String,
    pub label: String
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClashField {
    Id,
    Name,
    Label
}

static STORAGE_CLASH_FIELDS: [FieldSpec<StorageClashField>; 3] = [
    FieldSpec::new(StorageClashField::Id, "id").identity(),
    FieldSpec::new(StorageClashField::Name, "name").stored_as("label"),
    FieldSpec::new(StorageClashField::Label, "label")
];

impl EntityShape for StorageClash {
    type Field = StorageClashField;

    const NAME: &'static str = "StorageClash";
    const COLLECTION: &'static str = "storage_clashes";

    fn fields() -> &'static [FieldSpec<StorageClashField>] {
        &STORAGE_CLASH_FIELDS
    }

    fn read(&self, field: StorageClashField) -> serde_json::Result<Value> {
        match field {
            StorageClashField::Id => serde_json::to_value(&self.id),
            StorageClashField::Name => serde_json::to_value(&self.name),
            StorageClashField::Label => serde_json::to_value(&self.label)
        }
    }

    fn write(&mut self, field: StorageClashField, value: Value) -> serde_json::Result<()> {
        match field {
            StorageClashField::Id => self.id = serde_json::from_value(value)?,
            StorageClashField::Name => self.name = serde_json::from_value(value)?,
            StorageClashField::Label => self.label = serde_json::from_value(value)?
        }
        Ok(())
    }
}
