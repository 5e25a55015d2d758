//! Loader for introspection query results.
//!
//! Accepts the JSON produced by the standard introspection query, either as
//! the full response (`{"data": {"__schema": ...}}`) or just its `data`
//! object (`{"__schema": ...}`). Type references are kept in their raw
//! `kind`/`name`/`ofType` shape; they are only unwrapped at indexing time.
use crate::prelude::*;
use serde::Deserialize;
use tracing::{error, info};

const DEPRECATED_DIRECTIVE: &str = "deprecated";

#[derive(Debug, Deserialize)]
struct IntrospectionResponse {
    data: Option<IntrospectionData>,
    #[serde(rename = "__schema")]
    schema: Option<IntrospectionSchema>,
}

#[derive(Debug, Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<RootTypeName>,
    mutation_type: Option<RootTypeName>,
    subscription_type: Option<RootTypeName>,
    types: Vec<FullType>,
}

#[derive(Debug, Deserialize)]
struct RootTypeName {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullType {
    kind: TypeKind,
    name: String,
    #[serde(default)]
    fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    input_fields: Option<Vec<IntrospectionInputValue>>,
    #[serde(default)]
    interfaces: Option<Vec<TypeRef>>,
    #[serde(default)]
    possible_types: Option<Vec<TypeRef>>,
    #[serde(default)]
    enum_values: Option<Vec<IntrospectionEnumValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionField {
    name: String,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    ty: TypeRef,
    #[serde(default)]
    is_deprecated: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionInputValue {
    name: String,
    #[serde(rename = "type")]
    ty: TypeRef,
    #[serde(default)]
    default_value: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
}

#[derive(Debug, Deserialize)]
struct IntrospectionEnumValue {
    name: String,
}

impl From<IntrospectionInputValue> for InputValueDef {
    fn from(value: IntrospectionInputValue) -> Self {
        Self {
            name: value.name,
            ty: value.ty,
            default_value: value.default_value,
            directives: deprecation(value.is_deprecated),
        }
    }
}

impl From<IntrospectionField> for FieldDef {
    fn from(field: IntrospectionField) -> Self {
        Self {
            name: field.name,
            ty: field.ty,
            arguments: field.args.into_iter().map(InputValueDef::from).collect(),
            directives: deprecation(field.is_deprecated),
        }
    }
}

/// Introspection only exposes the built-in `@deprecated` directive, as a flag
fn deprecation(is_deprecated: bool) -> Vec<DirectiveUse> {
    if is_deprecated {
        vec![DirectiveUse::new(DEPRECATED_DIRECTIVE)]
    } else {
        vec![]
    }
}

impl FullType {
    fn into_named_type(self) -> SchemaResult<NamedType> {
        let fields: Vec<FieldDef> = self
            .fields
            .unwrap_or_default()
            .into_iter()
            .map(FieldDef::from)
            .collect();

        let named_type = match self.kind {
            TypeKind::Scalar => NamedType::Scalar(ScalarType {
                name: self.name,
                directives: vec![],
            }),
            TypeKind::Enum => NamedType::Enum(EnumType {
                name: self.name,
                values: self
                    .enum_values
                    .unwrap_or_default()
                    .into_iter()
                    .map(|value| value.name)
                    .collect(),
                directives: vec![],
            }),
            TypeKind::Object => NamedType::Object(ObjectType {
                name: self.name,
                interfaces: self.interfaces.unwrap_or_default(),
                fields,
                directives: vec![],
            }),
            TypeKind::Interface => NamedType::Interface(InterfaceType {
                name: self.name,
                interfaces: self.interfaces.unwrap_or_default(),
                fields,
                directives: vec![],
            }),
            TypeKind::Union => NamedType::Union(UnionType {
                name: self.name,
                members: self.possible_types.unwrap_or_default(),
                directives: vec![],
            }),
            TypeKind::InputObject => NamedType::Input(InputObjectType {
                name: self.name,
                fields: self
                    .input_fields
                    .unwrap_or_default()
                    .into_iter()
                    .map(InputValueDef::from)
                    .collect(),
                directives: vec![],
            }),
            kind @ (TypeKind::List | TypeKind::NonNull) => {
                error!(name = ?self.name, %kind, "Wrapper kind found in the type map");
                return Err(SchemaError::UnknownTypeKind {
                    name: self.name,
                    kind: kind.to_string(),
                });
            }
        };

        Ok(named_type)
    }
}

impl TypeGraph {
    /// Builds a type graph from an introspection query result
    #[tracing::instrument(skip_all)]
    pub fn from_introspection_json(json: &str) -> SchemaResult<Self> {
        info!("An introspection loading job has begun");

        let response: IntrospectionResponse = serde_json::from_str(json).map_err(|error| {
            error!(?error, "Failed to deserialize the introspection result");
            SchemaError::Json(error)
        })?;

        let schema = match (response.data, response.schema) {
            (Some(data), _) => data.schema,
            (None, Some(schema)) => schema,
            (None, None) => return Err(SchemaError::MissingElement("__schema".to_string())),
        };

        let mut graph = TypeGraph::new();
        for full_type in schema.types {
            graph.insert(full_type.into_named_type()?)?;
        }

        let roots = [
            (OperationKind::Query, schema.query_type),
            (OperationKind::Mutation, schema.mutation_type),
            (OperationKind::Subscription, schema.subscription_type),
        ];
        for (kind, root) in roots {
            if let Some(root) = root {
                graph.set_root(kind, root.name);
            }
        }

        info!(types = graph.len(), "Introspection result loaded");

        Ok(graph)
    }
}
