use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

/// Generates `ChoiceElement` for a per-field choice enum. Each variant must
/// wrap exactly one value and be named after the `DataType` it holds.
pub(crate) fn generate_choice_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let krate = quote! { ::atrius_fhir_model };
    let name = &input.ident;

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(name, "FhirChoice only supports enums"));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(name, "a choice element needs at least one alternative"));
    }

    let mut variants = Vec::new();
    let mut types = Vec::new();
    for variant in &data.variants {
        let Fields::Unnamed(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(variant, "expected a single unnamed field"));
        };
        if fields.unnamed.len() != 1 {
            return Err(syn::Error::new_spanned(variant, "expected a single unnamed field"));
        }
        variants.push(&variant.ident);
        types.push(&fields.unnamed[0].ty);
    }
    let type_names = variants.iter().map(|v| v.to_string());

    Ok(quote! {
        impl #krate::ChoiceElement for #name {
            const ALTERNATIVES: &'static [#krate::DataType] = &[#(#krate::DataType::#variants),*];
            const TYPE_NAMES: &'static [&'static str] = &[#(#type_names),*];

            fn try_from_value(field: &'static str, value: #krate::DataValue) -> #krate::Result<Self> {
                match value {
                    #(#krate::DataValue::#variants(v) => Ok(#name::#variants(v)),)*
                    other => Err(<Self as #krate::ChoiceElement>::invalid_type(field, &other)),
                }
            }

            fn into_value(self) -> #krate::DataValue {
                match self {
                    #(#name::#variants(v) => #krate::DataValue::#variants(v),)*
                }
            }

            fn data_type(&self) -> #krate::DataType {
                match self {
                    #(#name::#variants(_) => #krate::DataType::#variants,)*
                }
            }

            fn as_visitable(&self) -> &dyn #krate::Visitable {
                match self {
                    #(#name::#variants(v) => v,)*
                }
            }
        }

        #(
            impl ::std::convert::From<#types> for #name {
                fn from(value: #types) -> Self {
                    #name::#variants(value)
                }
            }
        )*

        impl ::std::convert::From<#name> for #krate::DataValue {
            fn from(value: #name) -> Self {
                #krate::ChoiceElement::into_value(value)
            }
        }
    })
}
