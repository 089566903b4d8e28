// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Filter shapes and their descriptors.
//!
//! A filter is a struct of optional predicate fields plus, usually, one
//! embedded [`Paging`] block. `#[derive(Filter)]` implements [`FilterShape`]
//! for it; [`FilterDescriptor::build`] then checks it against the entity it
//! searches and resolves every parameter to a storage field.
//!
//! # Operators
//!
//! | Attribute | Operator | Matches when |
//! |-----------|----------|--------------|
//! | `#[filter]` / `#[filter(eq)]` | [`FilterOp::Eq`] | equal, or one of the values for `Vec<T>` |
//! | `#[filter(like)]` | [`FilterOp::Like`] | stored text contains the value, ignoring case |
//! | `#[filter(gte)]` | [`FilterOp::Gte`] | stored value `>=` the value |
//! | `#[filter(lte)]` | [`FilterOp::Lte`] | stored value `<=` the value |

use std::{collections::HashMap, fmt, marker::PhantomData};

use serde::Serialize;
use serde_json::Value;

use crate::{
    Pagination, SortDirection,
    metadata::{ConstructionError, EntityMetadata},
    param::ParamError,
    shape::EntityShape,
    store::{Predicate, SearchQuery}
};

/// Query parameter names claimed by [`Paging`].
pub const RESERVED_PARAMS: [&str; 3] = ["page", "limit", "sort"];

/// Comparison applied by a filter parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Exact match; membership for multi-valued parameters.
    #[default]
    Eq,
    /// Case-insensitive substring.
    Like,
    /// Inclusive lower bound.
    Gte,
    /// Inclusive upper bound.
    Lte
}

impl FilterOp {
    /// Attribute keyword of the operator.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Like => "like",
            Self::Gte => "gte",
            Self::Lte => "lte"
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One queryable parameter of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Query parameter name.
    pub name: &'static str,

    /// Wire name of the targeted entity field.
    pub target: &'static str,

    /// Comparison.
    pub op: FilterOp,

    /// Position of the field inside the filter struct.
    pub ordinal: usize,

    /// Whether the parameter accepts several values.
    pub multi: bool
}

impl ParamSpec {
    /// Create a single-valued `eq` parameter targeting the field of the same
    /// name.
    pub const fn new(name: &'static str, ordinal: usize) -> Self {
        Self {
            name,
            target: name,
            op: FilterOp::Eq,
            ordinal,
            multi: false
        }
    }

    /// Target another entity field.
    pub const fn targets(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    /// Set the comparison.
    pub const fn op(mut self, op: FilterOp) -> Self {
        self.op = op;
        self
    }

    /// Mark as multi-valued.
    pub const fn multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }
}

/// Sort key: a field name and a direction.
///
/// Inside a filter the name is an entity wire name; inside a
/// [`SearchQuery`] it is the storage name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortField {
    /// Field name.
    pub field: &'static str,

    /// Direction.
    pub direction: SortDirection
}

impl SortField {
    /// Ascending sort on a field.
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Asc
        }
    }

    /// Descending sort on a field.
    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Desc
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.prefix(), self.field)
    }
}

/// Paging block embedded in a filter.
///
/// After decoding, `page >= 1`, `1 <= limit <= max_limit` and
/// `offset = (page - 1) * limit`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paging {
    /// 1-based page number.
    pub page: i64,

    /// Page size.
    pub limit: i64,

    /// Records skipped.
    pub offset: i64,

    /// Sort keys, first one most significant.
    pub sort: Vec<SortField>
}

/// Defaults and bounds applied to [`Paging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    /// Limit used when none (or a non-positive one) is requested.
    pub default_limit: i64,

    /// Largest accepted limit.
    pub max_limit: i64
}

impl PagingPolicy {
    /// Default page size.
    pub const DEFAULT_LIMIT: i64 = 20;

    /// Default upper bound of the page size.
    pub const DEFAULT_MAX_LIMIT: i64 = 100;

    /// Create a policy. `max_limit` is raised to `default_limit` if lower.
    pub const fn new(default_limit: i64, max_limit: i64) -> Self {
        let default_limit = if default_limit < 1 {
            Self::DEFAULT_LIMIT
        } else {
            default_limit
        };
        let max_limit = if max_limit < default_limit {
            default_limit
        } else {
            max_limit
        };
        Self {
            default_limit,
            max_limit
        }
    }

    /// Normalize a requested page and limit.
    ///
    /// ```rust
    /// use docshape_core::{Pagination, PagingPolicy};
    ///
    /// let policy = PagingPolicy::new(20, 100);
    /// assert_eq!(policy.window(0, 0), Pagination::new(20, 0));
    /// assert_eq!(policy.window(3, 20), Pagination::new(20, 40));
    /// assert_eq!(policy.window(2, 500), Pagination::new(100, 100));
    /// ```
    pub const fn window(&self, page: i64, limit: i64) -> Pagination {
        let page = if page < 1 { 1 } else { page };
        let limit = if limit < 1 {
            self.default_limit
        } else if limit > self.max_limit {
            self.max_limit
        } else {
            limit
        };
        Pagination::new(limit, (page - 1).saturating_mul(limit))
    }
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, Self::DEFAULT_MAX_LIMIT)
    }
}

/// Compile-time shape of a search filter.
///
/// Generated by `#[derive(Filter)]`. Ordinals are field positions inside the
/// filter struct; every method is a no-op for an ordinal the shape does not
/// declare.
pub trait FilterShape: Default + Send + Sync + 'static {
    /// Filter name used in diagnostics.
    const NAME: &'static str;

    /// Declared predicate parameters.
    fn params() -> &'static [ParamSpec];

    /// Position of the embedded [`Paging`] field, if any.
    fn paging_ordinal() -> Option<usize>;

    /// Embedded paging block.
    fn paging(&self) -> Option<&Paging>;

    /// Embedded paging block, mutably.
    fn paging_mut(&mut self) -> Option<&mut Paging>;

    /// Replace a parameter from raw strings.
    ///
    /// # Errors
    ///
    /// Returns the first raw value that does not parse.
    fn assign(&mut self, ordinal: usize, values: &[String]) -> Result<(), ParamError>;

    /// Predicate value of a parameter, `None` when unset.
    fn predicate(&self, ordinal: usize) -> Option<Value>;

    /// Raw strings that decode back into the parameter's value.
    fn encode(&self, ordinal: usize) -> Vec<String>;
}

/// Immutable index over a filter's parameters.
///
/// Built once per filter shape with [`FilterDescriptor::build`] and shared
/// behind an `Arc`.
pub struct FilterDescriptor<F: FilterShape> {
    params:      &'static [ParamSpec],
    param_index: HashMap<&'static str, usize>,
    storage:     Vec<&'static str>,
    sortable:    HashMap<&'static str, &'static str>,
    paging:      Option<usize>,
    policy:      PagingPolicy,
    _filter:     PhantomData<fn() -> F>
}

impl<F: FilterShape> FilterDescriptor<F> {
    /// Index the filter's parameters against the searched entity.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::DuplicateParam`] on a parameter name collision
    /// - [`ConstructionError::ReservedParam`] on `page`, `limit` or `sort`
    /// - [`ConstructionError::UnknownTarget`] if a parameter targets a field
    ///   the entity does not declare
    pub fn build<E: EntityShape>(metadata: &EntityMetadata<E>) -> Result<Self, ConstructionError> {
        let params = F::params();
        let mut param_index = HashMap::with_capacity(params.len());
        let mut storage = Vec::with_capacity(params.len());

        for (index, spec) in params.iter().enumerate() {
            if RESERVED_PARAMS.contains(&spec.name) {
                return Err(ConstructionError::ReservedParam {
                    filter: F::NAME,
                    name:   spec.name
                });
            }
            if param_index.insert(spec.name, index).is_some() {
                return Err(ConstructionError::DuplicateParam {
                    filter: F::NAME,
                    name:   spec.name
                });
            }
            let target =
                metadata
                    .field(spec.target)
                    .ok_or(ConstructionError::UnknownTarget {
                        filter: F::NAME,
                        param:  spec.name,
                        target: spec.target,
                        entity: E::NAME
                    })?;
            storage.push(target.storage);
        }

        let sortable = metadata
            .fields()
            .iter()
            .map(|spec| (spec.wire, spec.storage))
            .collect();

        Ok(Self {
            params,
            param_index,
            storage,
            sortable,
            paging: F::paging_ordinal(),
            policy: PagingPolicy::default(),
            _filter: PhantomData
        })
    }

    /// Replace the paging policy.
    pub fn with_paging(mut self, policy: PagingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Filter name.
    pub fn name(&self) -> &'static str {
        F::NAME
    }

    /// Paging policy.
    pub fn policy(&self) -> PagingPolicy {
        self.policy
    }

    /// Declared parameters.
    pub fn params(&self) -> &'static [ParamSpec] {
        self.params
    }

    /// Parameter declared under a query name (case-sensitive).
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        let params = self.params;
        self.param_index
            .get(name)
            .and_then(|index| params.get(*index))
    }

    /// Position of the paging block inside the filter struct.
    pub fn paging_ordinal(&self) -> Option<usize> {
        self.paging
    }

    /// Resolve a sortable wire name to its static form.
    pub fn sort_field(&self, wire: &str) -> Option<&'static str> {
        self.sortable.get_key_value(wire).map(|(wire, _)| *wire)
    }

    /// Resolve a typed filter into a storage-level query.
    ///
    /// Without a paging block the first page of the default size is used.
    pub fn search_query(&self, filter: &F) -> SearchQuery {
        let predicates = self
            .params
            .iter()
            .zip(&self.storage)
            .filter_map(|(spec, storage)| {
                filter.predicate(spec.ordinal).map(|value| Predicate {
                    field: *storage,
                    op: spec.op,
                    value
                })
            })
            .collect();

        let (sort, pagination) = match filter.paging() {
            Some(paging) => (
                paging
                    .sort
                    .iter()
                    .filter_map(|key| {
                        self.sortable.get(key.field).map(|storage| SortField {
                            field:     *storage,
                            direction: key.direction
                        })
                    })
                    .collect(),
                self.policy.window(paging.page, paging.limit)
            ),
            None => (Vec::new(), self.policy.window(1, 0))
        };

        SearchQuery {
            predicates,
            sort,
            pagination
        }
    }
}

impl<F: FilterShape> fmt::Debug for FilterDescriptor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterDescriptor")
            .field("filter", &F::NAME)
            .field("params", &self.params)
            .field("paging", &self.paging)
            .field("policy", &self.policy)
            .finish()
    }
}
