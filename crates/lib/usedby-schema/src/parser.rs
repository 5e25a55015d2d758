use crate::prelude::*;
use pest::Parser as PestParserTrait;
use pest::iterators::Pair;
use std::path::Path;
use tracing::{debug, error, info};

#[derive(pest_derive::Parser)]
#[grammar = "grammars/graphql_sdl.pest"]
pub struct PestParser;

/// Loader for GraphQL schema definition language documents
pub struct Parser;

impl Parser {
    pub fn parse(source: &str) -> SchemaResult<TypeGraph> {
        let mut pairs = PestParser::parse(Rule::document, source).map_err(|error| {
            error!("Failed to parse the schema document");
            SchemaError::PestError(Box::new(error))
        })?;

        let document_pair = pairs
            .next()
            .ok_or_else(|| SchemaError::MissingElement("document".to_string()))?;

        Self::parse_document(document_pair)
    }

    fn parse_document(pair: Pair<Rule>) -> SchemaResult<TypeGraph> {
        check_rule(&pair, Rule::document)?;

        let mut graph = TypeGraph::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::schema_def => {
                    for (kind, type_name) in Self::parse_schema_def(inner_pair)? {
                        graph.set_root(kind, type_name);
                    }
                }
                Rule::directive_def => {
                    // Directive definitions declare no dependencies of their own
                    debug!(definition = inner_pair.as_str(), "Skipping directive definition");
                }
                Rule::scalar_def => {
                    graph.insert(NamedType::Scalar(Self::parse_scalar_def(inner_pair)?))?;
                }
                Rule::object_def => {
                    graph.insert(NamedType::Object(Self::parse_object_def(inner_pair)?))?;
                }
                Rule::interface_def => {
                    let object = Self::parse_object_def(inner_pair)?;
                    graph.insert(NamedType::Interface(InterfaceType {
                        name: object.name,
                        interfaces: object.interfaces,
                        fields: object.fields,
                        directives: object.directives,
                    }))?;
                }
                Rule::union_def => {
                    graph.insert(NamedType::Union(Self::parse_union_def(inner_pair)?))?;
                }
                Rule::enum_def => {
                    graph.insert(NamedType::Enum(Self::parse_enum_def(inner_pair)?))?;
                }
                Rule::input_def => {
                    graph.insert(NamedType::Input(Self::parse_input_def(inner_pair)?))?;
                }
                Rule::EOI => {
                    // End of input, ignore
                }
                _ => {
                    return Err(SchemaError::UnexpectedRule {
                        expected: "a type system definition".to_string(),
                        found: format!("{:?}", inner_pair.as_rule()),
                    });
                }
            }
        }

        graph.apply_default_roots();

        Ok(graph)
    }

    fn parse_schema_def(pair: Pair<Rule>) -> SchemaResult<Vec<(OperationKind, String)>> {
        check_rule(&pair, Rule::schema_def)?;

        let mut roots = Vec::new();
        for inner_pair in pair.into_inner() {
            if inner_pair.as_rule() != Rule::root_operation {
                // Descriptions and schema directives
                continue;
            }

            let mut kind = None;
            let mut type_name = None;
            for root_pair in inner_pair.into_inner() {
                match root_pair.as_rule() {
                    Rule::operation_kind => {
                        kind = match root_pair.as_str() {
                            "query" => Some(OperationKind::Query),
                            "mutation" => Some(OperationKind::Mutation),
                            "subscription" => Some(OperationKind::Subscription),
                            _ => None,
                        };
                    }
                    Rule::name => type_name = Some(root_pair.as_str().to_string()),
                    _ => return Err(unexpected("operation_kind or name", &root_pair)),
                }
            }

            let kind =
                kind.ok_or_else(|| SchemaError::MissingElement("operation kind".to_string()))?;
            let type_name = type_name
                .ok_or_else(|| SchemaError::MissingElement("root type name".to_string()))?;
            roots.push((kind, type_name));
        }

        Ok(roots)
    }

    fn parse_scalar_def(pair: Pair<Rule>) -> SchemaResult<ScalarType> {
        check_rule(&pair, Rule::scalar_def)?;

        let mut name = None;
        let mut directives = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::description => {}
                Rule::name => name = Some(inner_pair.as_str().to_string()),
                Rule::directives => directives = Self::parse_directives(inner_pair)?,
                _ => return Err(unexpected("name or directives", &inner_pair)),
            }
        }

        let name = name.ok_or_else(|| SchemaError::MissingElement("scalar name".to_string()))?;

        Ok(ScalarType { name, directives })
    }

    /// Parses `type` and `interface` definitions, which share their layout
    fn parse_object_def(pair: Pair<Rule>) -> SchemaResult<ObjectType> {
        if pair.as_rule() != Rule::object_def && pair.as_rule() != Rule::interface_def {
            return Err(unexpected("object_def or interface_def", &pair));
        }

        let mut name = None;
        let mut interfaces = Vec::new();
        let mut fields = Vec::new();
        let mut directives = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::description => {}
                Rule::name => name = Some(inner_pair.as_str().to_string()),
                Rule::implements => interfaces = Self::parse_named_types(inner_pair)?,
                Rule::directives => directives = Self::parse_directives(inner_pair)?,
                Rule::fields_def => {
                    for field_pair in inner_pair.into_inner() {
                        fields.push(Self::parse_field_def(field_pair)?);
                    }
                }
                _ => return Err(unexpected("implements, directives or fields", &inner_pair)),
            }
        }

        let name = name.ok_or_else(|| SchemaError::MissingElement("type name".to_string()))?;

        Ok(ObjectType {
            name,
            interfaces,
            fields,
            directives,
        })
    }

    fn parse_union_def(pair: Pair<Rule>) -> SchemaResult<UnionType> {
        check_rule(&pair, Rule::union_def)?;

        let mut name = None;
        let mut members = Vec::new();
        let mut directives = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::description => {}
                Rule::name => name = Some(inner_pair.as_str().to_string()),
                Rule::directives => directives = Self::parse_directives(inner_pair)?,
                Rule::union_members => members = Self::parse_named_types(inner_pair)?,
                _ => return Err(unexpected("directives or union members", &inner_pair)),
            }
        }

        let name = name.ok_or_else(|| SchemaError::MissingElement("union name".to_string()))?;

        Ok(UnionType {
            name,
            members,
            directives,
        })
    }

    fn parse_enum_def(pair: Pair<Rule>) -> SchemaResult<EnumType> {
        check_rule(&pair, Rule::enum_def)?;

        let mut name = None;
        let mut values = Vec::new();
        let mut directives = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::description => {}
                Rule::name => name = Some(inner_pair.as_str().to_string()),
                Rule::directives => directives = Self::parse_directives(inner_pair)?,
                Rule::enum_values => {
                    for value_pair in inner_pair.into_inner() {
                        let value_name = value_pair
                            .into_inner()
                            .find(|pair| pair.as_rule() == Rule::name)
                            .ok_or_else(|| {
                                SchemaError::MissingElement("enum value name".to_string())
                            })?;
                        values.push(value_name.as_str().to_string());
                    }
                }
                _ => return Err(unexpected("directives or enum values", &inner_pair)),
            }
        }

        let name = name.ok_or_else(|| SchemaError::MissingElement("enum name".to_string()))?;

        Ok(EnumType {
            name,
            values,
            directives,
        })
    }

    fn parse_input_def(pair: Pair<Rule>) -> SchemaResult<InputObjectType> {
        check_rule(&pair, Rule::input_def)?;

        let mut name = None;
        let mut fields = Vec::new();
        let mut directives = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::description => {}
                Rule::name => name = Some(inner_pair.as_str().to_string()),
                Rule::directives => directives = Self::parse_directives(inner_pair)?,
                Rule::input_fields => {
                    for field_pair in inner_pair.into_inner() {
                        fields.push(Self::parse_input_value_def(field_pair)?);
                    }
                }
                _ => return Err(unexpected("directives or input fields", &inner_pair)),
            }
        }

        let name = name.ok_or_else(|| SchemaError::MissingElement("input name".to_string()))?;

        Ok(InputObjectType {
            name,
            fields,
            directives,
        })
    }

    fn parse_field_def(pair: Pair<Rule>) -> SchemaResult<FieldDef> {
        check_rule(&pair, Rule::field_def)?;

        let mut name = None;
        let mut ty = None;
        let mut arguments = Vec::new();
        let mut directives = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::description => {}
                Rule::name => name = Some(inner_pair.as_str().to_string()),
                Rule::arguments_def => {
                    for argument_pair in inner_pair.into_inner() {
                        arguments.push(Self::parse_input_value_def(argument_pair)?);
                    }
                }
                Rule::type_ref => ty = Some(Self::parse_type_ref(inner_pair)?),
                Rule::directives => directives = Self::parse_directives(inner_pair)?,
                _ => return Err(unexpected("arguments, type or directives", &inner_pair)),
            }
        }

        let name = name.ok_or_else(|| SchemaError::MissingElement("field name".to_string()))?;
        let ty = ty.ok_or_else(|| SchemaError::MissingElement("field type".to_string()))?;

        Ok(FieldDef {
            name,
            ty,
            arguments,
            directives,
        })
    }

    fn parse_input_value_def(pair: Pair<Rule>) -> SchemaResult<InputValueDef> {
        check_rule(&pair, Rule::input_value_def)?;

        let mut name = None;
        let mut ty = None;
        let mut default_value = None;
        let mut directives = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::description => {}
                Rule::name => name = Some(inner_pair.as_str().to_string()),
                Rule::type_ref => ty = Some(Self::parse_type_ref(inner_pair)?),
                Rule::default_value => {
                    default_value = inner_pair
                        .into_inner()
                        .next()
                        .map(|value| value.as_str().trim().to_string());
                }
                Rule::directives => directives = Self::parse_directives(inner_pair)?,
                _ => return Err(unexpected("type, default value or directives", &inner_pair)),
            }
        }

        let name = name.ok_or_else(|| SchemaError::MissingElement("input value name".to_string()))?;
        let ty = ty.ok_or_else(|| SchemaError::MissingElement("input value type".to_string()))?;

        Ok(InputValueDef {
            name,
            ty,
            default_value,
            directives,
        })
    }

    fn parse_type_ref(pair: Pair<Rule>) -> SchemaResult<TypeRef> {
        check_rule(&pair, Rule::type_ref)?;

        let mut inner = pair.into_inner();
        let base_pair = inner
            .next()
            .ok_or_else(|| SchemaError::MissingElement("type reference".to_string()))?;

        let base = match base_pair.as_rule() {
            Rule::list_type => {
                let item_pair = base_pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| SchemaError::MissingElement("list item type".to_string()))?;
                TypeRef::list(Self::parse_type_ref(item_pair)?)
            }
            Rule::named_type => Self::parse_named_type(base_pair)?,
            _ => return Err(unexpected("list_type or named_type", &base_pair)),
        };

        match inner.next() {
            Some(marker) if marker.as_rule() == Rule::non_null => Ok(TypeRef::non_null(base)),
            Some(other) => Err(unexpected("non_null", &other)),
            None => Ok(base),
        }
    }

    fn parse_named_type(pair: Pair<Rule>) -> SchemaResult<TypeRef> {
        check_rule(&pair, Rule::named_type)?;

        let name = pair
            .into_inner()
            .next()
            .ok_or_else(|| SchemaError::MissingElement("type name".to_string()))?;

        Ok(TypeRef::named(name.as_str()))
    }

    /// Parses the named types of an `implements` clause or a union member list
    fn parse_named_types(pair: Pair<Rule>) -> SchemaResult<Vec<TypeRef>> {
        pair.into_inner().map(Self::parse_named_type).collect()
    }

    fn parse_directives(pair: Pair<Rule>) -> SchemaResult<Vec<DirectiveUse>> {
        check_rule(&pair, Rule::directives)?;

        let mut directives = Vec::new();
        for directive_pair in pair.into_inner() {
            let name = directive_pair
                .into_inner()
                .find(|pair| pair.as_rule() == Rule::name)
                .ok_or_else(|| SchemaError::MissingElement("directive name".to_string()))?;
            directives.push(DirectiveUse::new(name.as_str()));
        }

        Ok(directives)
    }
}

fn check_rule(pair: &Pair<Rule>, expected: Rule) -> SchemaResult<()> {
    if pair.as_rule() != expected {
        return Err(SchemaError::UnexpectedRule {
            expected: format!("{expected:?}"),
            found: format!("{:?}", pair.as_rule()),
        });
    }

    Ok(())
}

fn unexpected(expected: &str, pair: &Pair<Rule>) -> SchemaError {
    SchemaError::UnexpectedRule {
        expected: expected.to_string(),
        found: format!("{:?}", pair.as_rule()),
    }
}

impl TypeGraph {
    /// Builds a type graph from SDL source text
    #[tracing::instrument(skip_all)]
    pub fn from_sdl(source: &str) -> SchemaResult<Self> {
        info!("A schema parsing job has begun");
        let graph = Parser::parse(source)?;
        info!(types = graph.len(), "Schema parsed");

        Ok(graph)
    }

    /// Builds a type graph from an SDL file on disk
    #[tracing::instrument]
    pub fn from_sdl_file(path: &Path) -> SchemaResult<Self> {
        if !path.exists() {
            let file_path = path.to_str().unwrap_or("unknown");
            return Err(SchemaError::FileNotFound(file_path.to_string()));
        }

        let contents = std::fs::read_to_string(path).map_err(|error| {
            error!(?error, ?path, "Failed to read the schema file");
            SchemaError::Io(error)
        })?;

        Self::from_sdl(&contents)
    }
}
