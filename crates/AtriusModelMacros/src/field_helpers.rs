use heck::ToLowerCamelCase;
use syn::ext::IdentExt;
use syn::{Attribute, LitStr};

use crate::type_helpers::{ContainerKind, container_kind, last_ident};

/// Type-level `#[fhir(...)]` options.
pub(crate) struct ModelAttrs {
    pub kind: NodeKindAttr,
    pub name: Option<String>,
    pub value_or_children: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKindAttr {
    Resource,
    Element,
    Primitive,
}

/// The shared-field struct embedded by a model type.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum BaseKind {
    Element,
    BackboneElement,
    Resource,
    DomainResource,
}

impl BaseKind {
    fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "ElementBase" => Some(BaseKind::Element),
            "BackboneElementBase" => Some(BaseKind::BackboneElement),
            "ResourceBase" => Some(BaseKind::Resource),
            "DomainResourceBase" => Some(BaseKind::DomainResource),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldRole {
    Base(BaseKind),
    /// A raw value reported through `visit_value`.
    Primitive,
    /// A child node of a fixed type.
    Node,
    /// A per-field choice enum.
    Choice,
    /// The cached hash.
    Memo,
}

pub(crate) struct ModelField {
    pub ident: syn::Ident,
    /// Name used in descriptors, errors and paths.
    pub name: String,
    pub role: FieldRole,
    pub container: ContainerKind,
    /// Declared type with `Option`/`Vec` removed.
    pub inner: syn::Type,
    pub required: bool,
    pub check: Option<syn::Path>,
    pub reference_types: Vec<String>,
    pub codes: Vec<String>,
}

pub(crate) fn parse_model_attrs(attrs: &[Attribute]) -> syn::Result<ModelAttrs> {
    let mut kind = None;
    let mut name = None;
    let mut value_or_children = false;

    for attr in attrs.iter().filter(|a| a.path().is_ident("fhir")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                let lit: LitStr = meta.value()?.parse()?;
                kind = Some(match lit.value().as_str() {
                    "resource" => NodeKindAttr::Resource,
                    "element" => NodeKindAttr::Element,
                    "primitive" => NodeKindAttr::Primitive,
                    other => {
                        return Err(syn::Error::new(
                            lit.span(),
                            format!("unknown kind `{other}`, expected resource, element or primitive"),
                        ));
                    }
                });
            } else if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                name = Some(lit.value());
            } else if meta.path.is_ident("value_or_children") {
                value_or_children = true;
            } else {
                return Err(meta.error("unsupported #[fhir] type option"));
            }
            Ok(())
        })?;
    }

    Ok(ModelAttrs {
        kind: kind.unwrap_or(NodeKindAttr::Element),
        name,
        value_or_children,
    })
}

fn split_list(lit: &LitStr) -> Vec<String> {
    lit.value()
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Determines the effective field name.
///
/// - If `#[fhir(rename = "customName")]` is present, uses the custom name
/// - Otherwise, converts the Rust field name from `snake_case` to `camelCase`
///
/// ```rust,ignore
/// // pub implicit_rules: Option<Uri>  -> "implicitRules"
/// // pub r#type: Option<Uri>          -> "type"
/// ```
pub(crate) fn parse_model_field(field: &syn::Field) -> syn::Result<ModelField> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "model fields must be named"));
    };

    let mut rename = None;
    let mut base = false;
    let mut primitive = false;
    let mut choice = false;
    let mut required = false;
    let mut check = None;
    let mut reference_types = Vec::new();
    let mut codes = Vec::new();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("fhir")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("base") {
                base = true;
            } else if meta.path.is_ident("primitive") {
                primitive = true;
            } else if meta.path.is_ident("choice") {
                choice = true;
            } else if meta.path.is_ident("required") {
                required = true;
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                rename = Some(lit.value());
            } else if meta.path.is_ident("check") {
                let lit: LitStr = meta.value()?.parse()?;
                check = Some(lit.parse::<syn::Path>()?);
            } else if meta.path.is_ident("reference_types") {
                let lit: LitStr = meta.value()?.parse()?;
                reference_types = split_list(&lit);
            } else if meta.path.is_ident("codes") {
                let lit: LitStr = meta.value()?.parse()?;
                codes = split_list(&lit);
            } else {
                return Err(meta.error("unsupported #[fhir] field option"));
            }
            Ok(())
        })?;
    }

    let name = rename.unwrap_or_else(|| ident.unraw().to_string().to_lower_camel_case());
    let (container, inner) = container_kind(&field.ty)?;
    let inner = inner.clone();
    let type_name = last_ident(&field.ty).unwrap_or_default();

    let role = if base {
        let kind = BaseKind::from_type_name(&type_name).ok_or_else(|| {
            syn::Error::new_spanned(
                &field.ty,
                "#[fhir(base)] expects ElementBase, BackboneElementBase, ResourceBase or DomainResourceBase",
            )
        })?;
        FieldRole::Base(kind)
    } else if type_name == "HashMemo" {
        FieldRole::Memo
    } else if primitive {
        FieldRole::Primitive
    } else if choice {
        FieldRole::Choice
    } else {
        FieldRole::Node
    };

    if matches!(role, FieldRole::Primitive | FieldRole::Choice) && container == ContainerKind::Vec {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "primitive and choice fields cannot be repeated",
        ));
    }

    // a plain T is required; a Vec is required only when marked
    let required = match container {
        ContainerKind::Plain => true,
        ContainerKind::Option => false,
        ContainerKind::Vec => required,
    };

    Ok(ModelField {
        ident,
        name,
        role,
        container,
        inner,
        required,
        check,
        reference_types,
        codes,
    })
}
