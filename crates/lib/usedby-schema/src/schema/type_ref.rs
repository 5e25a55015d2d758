use serde::Deserialize;

/// Wrapping layer of a [TypeRef]
///
/// Introspection results carry the full `__TypeKind` on every reference,
/// but only the two wrapper kinds matter for unwrapping, so every other
/// kind string collapses into [TypeRefKind::Named].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeRefKind {
    List,
    NonNull,
    #[default]
    #[serde(other)]
    Named,
}

/// A possibly wrapped pointer to a named type.
///
/// The layout follows the introspection `__Type` reference shape
/// (`kind`, `name`, `ofType`) so a reference taken straight out of an
/// introspection result can be deserialized as is. References built by the
/// SDL loader are always well formed; deserialized ones may not be, which
/// is why nothing here assumes a wrapper has an inner type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub kind: TypeRefKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "ofType")]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: TypeRefKind::Named,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeRefKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeRefKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    pub fn is_wrapper(&self) -> bool {
        matches!(self.kind, TypeRefKind::List | TypeRefKind::NonNull)
    }
}
