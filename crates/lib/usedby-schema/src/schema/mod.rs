//! In-memory type graph consumed by the reverse dependency indexer.
//!
//! A [TypeGraph] is a name-keyed, declaration-ordered map of [NamedType]s
//! plus the names of the operation root types. It is produced by the SDL
//! loader ([TypeGraph::from_sdl]) or the introspection loader and is never
//! validated beyond name uniqueness.
use crate::prelude::*;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::fmt;

mod type_ref;
mod types;

pub use type_ref::{TypeRef, TypeRefKind};
pub use types::*;

/// Names starting with this prefix belong to the introspection system
pub const INTROSPECTION_PREFIX: &str = "__";

/// Kind of an operation root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Query,
        OperationKind::Mutation,
        OperationKind::Subscription,
    ];

    /// Lowercase keyword, as written in a `schema { ... }` block
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }

    /// Conventional root type name used when no `schema` block is present
    pub fn default_type_name(&self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    types: IndexMap<String, NamedType>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, rejecting a second declaration with the same name
    pub fn insert(&mut self, named_type: NamedType) -> SchemaResult<()> {
        match self.types.entry(named_type.name().to_owned()) {
            Entry::Occupied(entry) => Err(SchemaError::DuplicateType {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(named_type);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    /// All declarations in declaration order
    pub fn types(&self) -> impl Iterator<Item = (&str, &NamedType)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn set_root(&mut self, kind: OperationKind, type_name: impl Into<String>) {
        let slot = match kind {
            OperationKind::Query => &mut self.query_type,
            OperationKind::Mutation => &mut self.mutation_type,
            OperationKind::Subscription => &mut self.subscription_type,
        };
        *slot = Some(type_name.into());
    }

    /// Declared root type name for an operation kind.
    ///
    /// The name may point at a type that is not in the graph; callers
    /// decide what a missing root means.
    pub fn root(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    /// Declared operation roots, in query, mutation, subscription order
    pub fn roots(&self) -> impl Iterator<Item = (OperationKind, &str)> {
        OperationKind::ALL
            .into_iter()
            .filter_map(|kind| self.root(kind).map(|name| (kind, name)))
    }

    /// Fills every unset root with its conventional type name when a type
    /// with that name exists.
    pub fn apply_default_roots(&mut self) {
        for kind in OperationKind::ALL {
            if self.root(kind).is_none() && self.types.contains_key(kind.default_type_name()) {
                self.set_root(kind, kind.default_type_name());
            }
        }
    }
}
