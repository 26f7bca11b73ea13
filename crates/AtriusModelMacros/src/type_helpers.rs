//=============================================================================
// Type Analysis Helper Functions
//=============================================================================

use syn::{GenericArgument, Path, PathArguments, Type, TypePath};

/// How a field's declared type wraps the model type it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    /// `T`: the field is required.
    Plain,
    /// `Option<T>`: the field is optional.
    Option,
    /// `Vec<T>`: the field is repeated.
    Vec,
}

fn single_generic_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(TypePath {
        path: Path { segments, .. },
        ..
    }) = ty
        && let Some(segment) = segments.last()
        && segment.ident == wrapper
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner_ty)) = args.args.first()
    {
        return Some(inner_ty);
    }
    None
}

/// Extracts the inner type from an `Option<T>` type.
///
/// ```rust,ignore
/// // Option<Reference> -> Some(Reference)
/// // Reference         -> None
/// ```
pub(crate) fn get_option_inner_type(ty: &Type) -> Option<&Type> {
    single_generic_argument(ty, "Option")
}

/// Extracts the inner type from a `Vec<T>` type.
pub(crate) fn get_vec_inner_type(ty: &Type) -> Option<&Type> {
    single_generic_argument(ty, "Vec")
}

/// Splits a field type into its container kind and the wrapped type.
///
/// `Option<Vec<T>>` is rejected: an absent list and an empty list are the
/// same thing in the model.
pub(crate) fn container_kind(ty: &Type) -> syn::Result<(ContainerKind, &Type)> {
    if let Some(inner) = get_option_inner_type(ty) {
        if get_vec_inner_type(inner).is_some() {
            return Err(syn::Error::new_spanned(
                ty,
                "use Vec<T> for repeated fields; Option<Vec<T>> is not supported",
            ));
        }
        return Ok((ContainerKind::Option, inner));
    }
    if let Some(inner) = get_vec_inner_type(ty) {
        return Ok((ContainerKind::Vec, inner));
    }
    Ok((ContainerKind::Plain, ty))
}

/// Last path segment of a type, e.g. `ElementBase` for `crate::element::ElementBase`.
pub(crate) fn last_ident(ty: &Type) -> Option<String> {
    if let Type::Path(TypePath { path, .. }) = ty {
        return path.segments.last().map(|segment| segment.ident.to_string());
    }
    None
}
