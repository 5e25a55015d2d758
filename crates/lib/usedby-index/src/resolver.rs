use crate::error::ResolveError;
use usedby_schema::schema::{TypeRef, TypeRefKind};

/// Deepest wrapper nesting accepted before a reference is treated as malformed
pub const MAX_WRAPPING_DEPTH: usize = 64;

/// Unwraps list, non-null and any other `ofType` indirection and returns the
/// name of the innermost named type.
///
/// A reference that is not a wrapper and has no inner type is already named.
pub fn resolve_named_type(reference: &TypeRef) -> Result<&str, ResolveError> {
    resolve_at_depth(reference, 0)
}

fn resolve_at_depth(reference: &TypeRef, depth: usize) -> Result<&str, ResolveError> {
    if depth > MAX_WRAPPING_DEPTH {
        return Err(ResolveError::DepthExceeded {
            limit: MAX_WRAPPING_DEPTH,
        });
    }

    match (reference.kind, reference.of_type.as_deref()) {
        (_, Some(inner)) => resolve_at_depth(inner, depth + 1),
        (kind @ (TypeRefKind::List | TypeRefKind::NonNull), None) => {
            Err(ResolveError::MissingInnerType { kind })
        }
        (TypeRefKind::Named, None) => match reference.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ResolveError::UnnamedType),
        },
    }
}
