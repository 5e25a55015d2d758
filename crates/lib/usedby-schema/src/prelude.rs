pub use crate::error::*;
pub use crate::schema::{
    DirectiveUse, EnumType, FieldDef, InputObjectType, InputValueDef, InterfaceType, NamedType,
    ObjectType, OperationKind, ScalarType, TypeGraph, TypeKind, TypeRef, TypeRefKind, UnionType,
};

pub type SchemaResult<T> = Result<T, SchemaError>;
