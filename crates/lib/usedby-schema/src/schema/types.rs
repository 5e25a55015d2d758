use super::type_ref::TypeRef;
use serde::Deserialize;
use std::fmt;

/// Kind of a declaration, named after the introspection `__TypeKind` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directive applied to a declaration, field or input value.
///
/// Only the name is kept: directives are dependency targets, their
/// arguments are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveUse {
    pub name: String,
}

impl DirectiveUse {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Argument of a field, or field of an input object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValueDef {
    pub name: String,
    pub ty: TypeRef,
    /// Raw source text of the default value, if any
    pub default_value: Option<String>,
    pub directives: Vec<DirectiveUse>,
}

/// Output field of an object or interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<InputValueDef>,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarType {
    pub name: String,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    pub name: String,
    pub interfaces: Vec<TypeRef>,
    pub fields: Vec<FieldDef>,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceType {
    pub name: String,
    pub interfaces: Vec<TypeRef>,
    pub fields: Vec<FieldDef>,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    pub name: String,
    pub members: Vec<TypeRef>,
    pub directives: Vec<DirectiveUse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    pub name: String,
    pub fields: Vec<InputValueDef>,
    pub directives: Vec<DirectiveUse>,
}

/// A named declaration of the type graph
///
/// The variant is decided once, when the graph is loaded, and everything
/// downstream dispatches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedType {
    Scalar(ScalarType),
    Enum(EnumType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Input(InputObjectType),
}

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            NamedType::Scalar(scalar) => &scalar.name,
            NamedType::Enum(enum_type) => &enum_type.name,
            NamedType::Object(object) => &object.name,
            NamedType::Interface(interface) => &interface.name,
            NamedType::Union(union_type) => &union_type.name,
            NamedType::Input(input) => &input.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            NamedType::Scalar(_) => TypeKind::Scalar,
            NamedType::Enum(_) => TypeKind::Enum,
            NamedType::Object(_) => TypeKind::Object,
            NamedType::Interface(_) => TypeKind::Interface,
            NamedType::Union(_) => TypeKind::Union,
            NamedType::Input(_) => TypeKind::InputObject,
        }
    }

    pub fn directives(&self) -> &[DirectiveUse] {
        match self {
            NamedType::Scalar(scalar) => &scalar.directives,
            NamedType::Enum(enum_type) => &enum_type.directives,
            NamedType::Object(object) => &object.directives,
            NamedType::Interface(interface) => &interface.directives,
            NamedType::Union(union_type) => &union_type.directives,
            NamedType::Input(input) => &input.directives,
        }
    }
}
