use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Meta, MetaList, MetaNameValue};

/// One `#[fhir_invariant(...)]` attribute.
pub(crate) struct InvariantLit {
    key: LitStr,
    severity: LitStr,
    human: LitStr,
    location: LitStr,
    rule: syn::Path,
}

fn parse_fhir_invariant(attr: &Attribute, default_location: &str) -> syn::Result<InvariantLit> {
    let Meta::List(MetaList { tokens, .. }) = attr.meta.clone() else {
        return Err(syn::Error::new(attr.span(), "expected #[fhir_invariant(...)]"));
    };

    let parser = syn::punctuated::Punctuated::<MetaNameValue, syn::Token![,]>::parse_terminated;
    let list = parser.parse2(tokens)?;

    let mut key = None;
    let mut severity = None;
    let mut human = None;
    let mut location = None;
    let mut rule = None;

    for nv in list {
        let span = nv.span();
        let ident = nv
            .path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default();

        let lit = match nv.value {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s),
                ..
            }) => s,
            _ => return Err(syn::Error::new(span, "expected string literal")),
        };

        match ident.as_str() {
            "key" => key = Some(lit),
            "severity" => severity = Some(lit),
            "human" => human = Some(lit),
            "location" => location = Some(lit),
            "rule" => rule = Some(lit.parse::<syn::Path>()?),
            other => {
                return Err(syn::Error::new(
                    span,
                    format!("unknown fhir_invariant field: {other}"),
                ));
            }
        }
    }

    let missing = |name: &str| {
        syn::Error::new(
            attr.span(),
            format!("missing required fhir_invariant field: {name}"),
        )
    };

    Ok(InvariantLit {
        key: key.ok_or_else(|| missing("key"))?,
        severity: severity.unwrap_or_else(|| LitStr::new("error", attr.span())),
        human: human.ok_or_else(|| missing("human"))?,
        location: location.unwrap_or_else(|| LitStr::new(default_location, attr.span())),
        rule: rule.ok_or_else(|| missing("rule"))?,
    })
}

/// Builds the `CONSTRAINTS` table for the type-level invariants on `attrs`.
pub(crate) fn constraint_table(
    attrs: &[Attribute],
    type_name: &str,
    krate: &TokenStream,
) -> syn::Result<TokenStream> {
    let mut entries = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("fhir_invariant")) {
        let inv = parse_fhir_invariant(attr, type_name)?;
        let sev = match inv.severity.value().as_str() {
            "warning" => quote! { #krate::validation::Severity::Warning },
            "error" => quote! { #krate::validation::Severity::Error },
            other => {
                return Err(syn::Error::new(
                    inv.severity.span(),
                    format!("unknown severity `{other}`, expected error or warning"),
                ));
            }
        };
        let InvariantLit {
            key,
            human,
            location,
            rule,
            ..
        } = inv;
        entries.push(quote! {
            #krate::validation::Constraint {
                key: #key,
                severity: #sev,
                description: #human,
                location: #location,
                rule: #rule,
            }
        });
    }

    Ok(quote! {
        /// Type-level rules checked by `build()` after field validation.
        pub const CONSTRAINTS: &'static [#krate::validation::Constraint<Self>] = &[#(#entries),*];
    })
}
