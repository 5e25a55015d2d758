//! Reverse dependency index.
//!
//! Walks every declaration of a [TypeGraph] once, resolves each type
//! reference it contains to a named type, and records the declaration (or,
//! for operation roots, the operation field) under every name it references.
//! Directive names are recorded the same way as type names.
use crate::error::{IndexError, IndexResult};
use crate::resolver::resolve_named_type;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error, info, warn};
use usedby_schema::schema::{
    FieldDef, INTROSPECTION_PREFIX, InputValueDef, NamedType, ObjectType, OperationKind,
    TypeGraph, TypeRef,
};

/// Category of the entity that references a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Object,
    Interface,
    Union,
    Input,
    Query,
    Mutation,
    Subscription,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Object => "object",
            Category::Interface => "interface",
            Category::Union => "union",
            Category::Input => "input",
            Category::Query => "query",
            Category::Mutation => "mutation",
            Category::Subscription => "subscription",
        }
    }
}

impl From<OperationKind> for Category {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Query => Category::Query,
            OperationKind::Mutation => Category::Mutation,
            OperationKind::Subscription => Category::Subscription,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One "used by" record: who references a target, and what kind of thing it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependent {
    pub name: String,
    pub category: Category,
}

impl Dependent {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Map from a type or directive name to the entities that reference it.
///
/// Targets and their dependents both keep first-seen order, and a target
/// never lists the same dependent name twice. The index owns plain strings
/// only, so the graph it was built from can be dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    entries: IndexMap<String, Vec<Dependent>>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh index from a type graph
    #[tracing::instrument(skip_all)]
    pub fn build(graph: &TypeGraph) -> IndexResult<Self> {
        let mut index = Self::new();
        index.index_graph(graph)?;

        Ok(index)
    }

    /// Appends the records of another graph to this index.
    ///
    /// Existing records are kept and the deduplication rule applies across
    /// graphs. If the graph holds a malformed reference the index is left
    /// untouched.
    #[tracing::instrument(skip_all)]
    pub fn extend(&mut self, graph: &TypeGraph) -> IndexResult<()> {
        let mut staged = self.clone();
        staged.index_graph(graph)?;
        *self = staged;

        Ok(())
    }

    /// Drops every record
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Dependents of a target in insertion order, empty when nothing references it
    pub fn lookup(&self, name: &str) -> &[Dependent] {
        self.entries
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct targets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Targets in the order they were first referenced
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Dependent])> {
        self.entries
            .iter()
            .map(|(target, dependents)| (target.as_str(), dependents.as_slice()))
    }

    fn index_graph(&mut self, graph: &TypeGraph) -> IndexResult<()> {
        info!(types = graph.len(), "Reverse dependency indexing has begun");

        let mut roots = HashMap::new();
        for (kind, root_name) in graph.roots() {
            if graph.get(root_name).is_none() {
                warn!(%kind, root_name, "Operation root type is not declared, skipping");
                continue;
            }
            roots.insert(root_name, kind);
        }

        for (name, named_type) in graph.types() {
            if name.starts_with(INTROSPECTION_PREFIX) {
                debug!(name, "Skipping introspection type");
                continue;
            }

            if let Some(&kind) = roots.get(name) {
                if let NamedType::Object(root) = named_type {
                    self.index_operation_root(kind, root)?;
                    continue;
                }
                warn!(name, %kind, "Operation root is not an object type, indexing it as a declaration");
            }

            self.index_declaration(named_type)?;
        }

        info!(targets = self.len(), "Reverse dependency index built");

        Ok(())
    }

    /// Every field of an operation root is its own dependent
    fn index_operation_root(&mut self, kind: OperationKind, root: &ObjectType) -> IndexResult<()> {
        let category = Category::from(kind);

        for field in &root.fields {
            let mut targets = Vec::new();
            collect_field_targets(&root.name, field, &mut targets)?;

            for target in targets {
                self.record(target, &field.name, category);
            }
        }

        Ok(())
    }

    fn index_declaration(&mut self, named_type: &NamedType) -> IndexResult<()> {
        let name = named_type.name();
        let mut targets = Vec::new();

        let category = match named_type {
            NamedType::Scalar(_) | NamedType::Enum(_) => {
                debug!(name, kind = %named_type.kind(), "Leaf type has no dependencies");
                return Ok(());
            }
            NamedType::Object(object) => {
                collect_composite_targets(name, &object.interfaces, &object.fields, &mut targets)?;
                Category::Object
            }
            NamedType::Interface(interface) => {
                collect_composite_targets(
                    name,
                    &interface.interfaces,
                    &interface.fields,
                    &mut targets,
                )?;
                Category::Interface
            }
            NamedType::Union(union_type) => {
                for member in &union_type.members {
                    targets.push(resolve(member, || name.to_string())?);
                }
                Category::Union
            }
            NamedType::Input(input) => {
                for field in &input.fields {
                    collect_input_value_targets(name, field, &mut targets)?;
                }
                Category::Input
            }
        };

        targets.extend(
            named_type
                .directives()
                .iter()
                .map(|directive| directive.name.as_str()),
        );

        for target in targets {
            self.record(target, name, category);
        }

        Ok(())
    }

    /// Appends a dependent unless the target already lists that name
    fn record(&mut self, target: &str, name: &str, category: Category) {
        let dependents = self.entries.entry(target.to_string()).or_default();
        if dependents.iter().any(|dependent| dependent.name == name) {
            return;
        }

        dependents.push(Dependent::new(name, category));
    }
}

fn collect_composite_targets<'a>(
    owner: &str,
    interfaces: &'a [TypeRef],
    fields: &'a [FieldDef],
    targets: &mut Vec<&'a str>,
) -> IndexResult<()> {
    for interface in interfaces {
        targets.push(resolve(interface, || owner.to_string())?);
    }

    for field in fields {
        collect_field_targets(owner, field, targets)?;
    }

    Ok(())
}

/// Return type, argument types and applied directives of a field
fn collect_field_targets<'a>(
    owner: &str,
    field: &'a FieldDef,
    targets: &mut Vec<&'a str>,
) -> IndexResult<()> {
    targets.push(resolve(&field.ty, || format!("{owner}.{}", field.name))?);

    for argument in &field.arguments {
        let context = format!("{owner}.{}", field.name);
        collect_input_value_targets(&context, argument, targets)?;
    }

    targets.extend(field.directives.iter().map(|directive| directive.name.as_str()));

    Ok(())
}

fn collect_input_value_targets<'a>(
    owner: &str,
    value: &'a InputValueDef,
    targets: &mut Vec<&'a str>,
) -> IndexResult<()> {
    targets.push(resolve(&value.ty, || format!("{owner}.{}", value.name))?);
    targets.extend(value.directives.iter().map(|directive| directive.name.as_str()));

    Ok(())
}

fn resolve(reference: &TypeRef, declaration: impl FnOnce() -> String) -> IndexResult<&str> {
    resolve_named_type(reference).map_err(|source| {
        let declaration = declaration();
        error!(%declaration, %source, "Failed to resolve a type reference");
        IndexError::MalformedReference {
            declaration,
            source,
        }
    })
}

#[cfg(test)]
mod tests;
