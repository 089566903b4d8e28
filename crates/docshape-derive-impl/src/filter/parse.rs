// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Filter derive macro.
//!
//! # Supported Attributes
//!
//! | Attribute | Level | Description |
//! |-----------|-------|-------------|
//! | `#[filter(rename_all = "...")]` | Container | Naming rule for parameter names; falls back to `#[serde(rename_all)]` |
//! | `#[paging]` | Field | The embedded `Paging` block (at most one) |
//! | `#[filter]` / `#[filter(eq)]` | Field | Exact match, membership for `Vec<T>` |
//! | `#[filter(like)]` | Field | Case-insensitive substring |
//! | `#[filter(gte)]` / `#[filter(lte)]` | Field | Inclusive bounds |
//! | `#[filter(param = "...")]` | Field | Query parameter name |
//! | `#[filter(field = "...")]` | Field | Targeted entity wire name, defaults to the parameter name |
//! | `#[filter(skip)]` | Field | Not a parameter |
//!
//! Every other field is a parameter and must be `Option<T>` or `Vec<T>`.

use std::collections::HashMap;

use darling::FromDeriveInput;
use syn::{Attribute, DeriveInput, Field, Generics, Ident, LitStr, Type};

use crate::utils::{
    naming::{RenameRule, field_name},
    outer_type, serde_attrs
};

/// Query parameter names claimed by the paging block.
const RESERVED_PARAMS: [&str; 3] = ["page", "limit", "sort"];

/// Container attributes parsed from `#[filter(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(filter), supports(struct_named), forward_attrs(serde))]
pub struct FilterAttrs {
    /// Struct identifier (e.g., `UserFilter`).
    pub ident: Ident,

    /// Generic parameters. Filters must not declare any.
    pub generics: Generics,

    /// Forwarded `#[serde(...)]` attributes.
    pub attrs: Vec<Attribute>,

    /// Naming rule for parameter names.
    #[darling(default)]
    pub rename_all: Option<LitStr>
}

/// Comparison keyword of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamOp {
    #[default]
    Eq,
    Like,
    Gte,
    Lte
}

impl ParamOp {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "eq" => Some(Self::Eq),
            "like" => Some(Self::Like),
            "gte" => Some(Self::Gte),
            "lte" => Some(Self::Lte),
            _ => None
        }
    }

    /// `FilterOp` variant name in the core crate.
    #[must_use]
    pub fn variant(&self) -> Ident {
        let name = match self {
            Self::Eq => "Eq",
            Self::Like => "Like",
            Self::Gte => "Gte",
            Self::Lte => "Lte"
        };
        Ident::new(name, proc_macro2::Span::call_site())
    }
}

/// One query parameter of a filter.
#[derive(Debug)]
pub struct ParamDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type, `Option<T>` or `Vec<T>`.
    pub ty: Type,

    /// Position of the field inside the struct.
    pub ordinal: usize,

    /// Query parameter name.
    pub param: String,

    /// Targeted entity wire name.
    pub target: String,

    /// Comparison.
    pub op: ParamOp
}

/// The embedded paging block.
#[derive(Debug)]
pub struct PagingDef {
    /// Field identifier.
    pub ident: Ident,

    /// Position of the field inside the struct.
    pub ordinal: usize
}

/// Complete parsed filter definition.
#[derive(Debug)]
pub struct FilterDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Parameters in declaration order.
    pub params: Vec<ParamDef>,

    /// Paging block, if declared.
    pub paging: Option<PagingDef>
}

#[derive(Default)]
struct FieldOptions {
    op:     Option<ParamOp>,
    param:  Option<String>,
    target: Option<String>,
    skip:   bool
}

impl FilterDef {
    /// Parse filter definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to non-struct, tuple struct or generic struct
    /// - More than one `#[paging]` field
    /// - Parameter field that is not `Option<T>` or `Vec<T>`
    /// - Parameter named `page`, `limit` or `sort`
    /// - Two parameters sharing a name
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = FilterAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(darling::Error::custom("Filter cannot be generic")
                .with_span(&attrs.generics));
        }

        let rename_all = match &attrs.rename_all {
            Some(rule) => RenameRule::parse(&rule.value(), rule.span())?,
            None => serde_attrs::container_rename_all(&attrs.attrs)?
        };

        let named = match &input.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(named),
                ..
            }) => &named.named,
            _ => {
                return Err(darling::Error::custom("Filter requires named fields")
                    .with_span(&input.ident));
            }
        };

        let mut errors = darling::Error::accumulator();
        let mut params = Vec::new();
        let mut paging: Option<PagingDef> = None;

        for (ordinal, field) in named.iter().enumerate() {
            let Some(ident) = field.ident.clone() else {
                continue;
            };
            if field.attrs.iter().any(|attr| attr.path().is_ident("paging")) {
                if paging.is_some() {
                    errors.push(
                        darling::Error::custom("only one #[paging] field is allowed")
                            .with_span(&ident)
                    );
                } else {
                    paging = Some(PagingDef {
                        ident,
                        ordinal
                    });
                }
                continue;
            }
            if let Some(param) = errors.handle(parse_param(field, ident, ordinal, rename_all)) {
                params.extend(param);
            }
        }

        let mut seen: HashMap<&str, &Ident> = HashMap::new();
        for param in &params {
            if RESERVED_PARAMS.contains(&param.param.as_str()) {
                errors.push(
                    darling::Error::custom(format!(
                        "parameter name `{}` is reserved for paging",
                        param.param
                    ))
                    .with_span(&param.ident)
                );
            }
            if let Some(first) = seen.insert(&param.param, &param.ident) {
                errors.push(
                    darling::Error::custom(format!(
                        "parameter name `{}` is already used by `{first}`",
                        param.param
                    ))
                    .with_span(&param.ident)
                );
            }
        }

        errors.finish()?;
        Ok(Self {
            ident: attrs.ident,
            params,
            paging
        })
    }
}

fn parse_param(
    field: &Field,
    ident: Ident,
    ordinal: usize,
    rename_all: RenameRule
) -> darling::Result<Option<ParamDef>> {
    let mut options = FieldOptions::default();
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("filter")) {
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("param") {
                let value: LitStr = meta.value()?.parse()?;
                options.param = Some(value.value());
            } else if meta.path.is_ident("field") {
                let value: LitStr = meta.value()?.parse()?;
                options.target = Some(value.value());
            } else if meta.path.is_ident("skip") {
                options.skip = true;
            } else if let Some(op) = meta.path.get_ident().and_then(ParamOp::from_ident) {
                if options.op.is_some_and(|existing| existing != op) {
                    return Err(meta.error("conflicting filter operators"));
                }
                options.op = Some(op);
            } else {
                return Err(meta.error(
                    "expected `eq`, `like`, `gte`, `lte`, `param = \"...\"`, `field = \"...\"` or `skip`"
                ));
            }
            Ok(())
        })?;
    }
    if options.skip {
        return Ok(None);
    }

    let is_param_type = matches!(
        outer_type(&field.ty),
        Some((name, Some(_))) if name == "Option" || name == "Vec"
    );
    if !is_param_type {
        return Err(darling::Error::custom(
            "filter parameters must be `Option<T>` or `Vec<T>`"
        )
        .with_span(&field.ty));
    }

    let param = match options.param {
        Some(param) => param,
        None => serde_attrs::field_options(&field.attrs)?
            .rename
            .unwrap_or_else(|| rename_all.apply(&field_name(&ident)))
    };
    if param.trim().is_empty() {
        return Err(darling::Error::custom("parameter name cannot be empty").with_span(&ident));
    }
    let target = options.target.unwrap_or_else(|| param.clone());

    Ok(Some(ParamDef {
        ident,
        ty: field.ty.clone(),
        ordinal,
        param,
        target,
        op: options.op.unwrap_or_default()
    }))
}
