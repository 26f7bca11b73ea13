use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use crate::field_helpers::{
    BaseKind, FieldRole, ModelField, NodeKindAttr, parse_model_attrs, parse_model_field,
};
use crate::fhir_invariant::constraint_table;
use crate::type_helpers::ContainerKind;

pub(crate) fn generate_model_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let krate = quote! { ::atrius_fhir_model };
    let name = &input.ident;
    let vis = &input.vis;
    let builder = format_ident!("{}Builder", name);

    let Data::Struct(ds) = &input.data else {
        return Err(syn::Error::new_spanned(name, "FhirModel only supports structs"));
    };
    let Fields::Named(named) = &ds.fields else {
        return Err(syn::Error::new_spanned(name, "FhirModel requires named fields"));
    };

    let attrs = parse_model_attrs(&input.attrs)?;
    let type_name = attrs.name.clone().unwrap_or_else(|| name.to_string());

    let fields = named
        .named
        .iter()
        .map(parse_model_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let (base, base_kind) = fields
        .iter()
        .find_map(|f| match f.role {
            FieldRole::Base(kind) => Some((f, kind)),
            _ => None,
        })
        .ok_or_else(|| syn::Error::new_spanned(name, "missing #[fhir(base)] field"))?;
    let memo = fields
        .iter()
        .find(|f| f.role == FieldRole::Memo)
        .ok_or_else(|| syn::Error::new_spanned(name, "missing HashMemo field"))?;
    let own: Vec<&ModelField> = fields
        .iter()
        .filter(|f| matches!(f.role, FieldRole::Primitive | FieldRole::Node | FieldRole::Choice))
        .collect();

    let base_ident = &base.ident;
    let base_ty = &base.inner;
    let memo_ident = &memo.ident;
    let base_builder_ty = match base_kind {
        BaseKind::Element => quote! { #krate::element::ElementBaseBuilder },
        BaseKind::BackboneElement => quote! { #krate::element::BackboneElementBaseBuilder },
        BaseKind::Resource => quote! { #krate::resource::ResourceBaseBuilder },
        BaseKind::DomainResource => quote! { #krate::resource::DomainResourceBaseBuilder },
    };
    let node_kind = match attrs.kind {
        NodeKindAttr::Resource => quote! { #krate::NodeKind::Resource },
        NodeKindAttr::Element => quote! { #krate::NodeKind::Element },
        NodeKindAttr::Primitive => quote! { #krate::NodeKind::Primitive },
    };

    let getters = own.iter().map(|f| getter(f));
    let builder_fields = own.iter().map(|f| builder_field(f, &krate));
    let setters = own.iter().filter(|f| !f.required).map(|f| setters(f, &krate));
    let copy_stmts = own.iter().map(|f| copy_stmt(f, &krate));
    let build_stmts = own.iter().map(|f| build_stmt(f, &krate));
    let descriptors = own.iter().map(|f| descriptor(f, &krate));
    let field_values = own.iter().enumerate().map(|(i, f)| {
        let index = Literal::usize_unsuffixed(i);
        let value = field_value(f, &krate);
        quote! { #index => #value, }
    });
    let hashed: Vec<&syn::Ident> = std::iter::once(base_ident)
        .chain(own.iter().map(|f| &f.ident))
        .collect();
    let all_idents = fields.iter().map(|f| &f.ident);
    let all_values = fields.iter().map(|f| match f.role {
        FieldRole::Base(_) => quote! { base },
        FieldRole::Memo => quote! { #krate::HashMemo::new() },
        _ => {
            let ident = &f.ident;
            quote! { #ident }
        }
    });

    let builder_with = builder_with(&own, &builder, &krate);
    let primitive_of = primitive_of(&attrs.kind, &own, &krate);
    let constraints = constraint_table(&input.attrs, &type_name, &krate)?;
    let value_or_children = attrs.value_or_children.then(|| {
        quote! { #krate::validation::require_value_or_children(&built)?; }
    });
    let capabilities = capability_impls(name, &builder, base_ident, base_kind, &krate);
    let builder_doc = format!("Stages the fields of a [`{name}`] until `build()` validates them.");

    Ok(quote! {
        impl #name {
            #(#getters)*

            pub fn builder() -> #builder {
                #builder::default()
            }

            #builder_with

            /// A new builder seeded with every field of this instance.
            pub fn to_builder(&self) -> #builder {
                #builder::default().copy_from(self)
            }

            /// Structural hash, computed on first use and cached.
            pub fn hash_code(&self) -> u64 {
                self.#memo_ident.get_or_compute(|| {
                    let mut hasher = #krate::hash::structural_hasher();
                    #(::std::hash::Hash::hash(&self.#hashed, &mut hasher);)*
                    ::std::hash::Hasher::finish(&hasher)
                })
            }

            #primitive_of

            #constraints
        }

        impl ::std::hash::Hash for #name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.hash_code());
            }
        }

        impl #krate::ModelType for #name {
            const TYPE_NAME: &'static str = #type_name;

            fn fields() -> &'static [#krate::FieldDescriptor] {
                const OWN: &[#krate::FieldDescriptor] = &[#(#descriptors),*];
                static ALL: #krate::__private::Lazy<::std::vec::Vec<#krate::FieldDescriptor>> =
                    #krate::__private::Lazy::new(|| [<#base_ty>::FIELDS, OWN].concat());
                ALL.as_slice()
            }
        }

        impl #krate::Visitable for #name {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn node_kind(&self) -> #krate::NodeKind {
                #node_kind
            }

            fn field_descriptors(&self) -> &'static [#krate::FieldDescriptor] {
                <Self as #krate::ModelType>::fields()
            }

            fn field_value(&self, index: usize) -> #krate::FieldValue<'_> {
                let base_len = <#base_ty>::FIELDS.len();
                if index < base_len {
                    return self.#base_ident.field_value(index);
                }
                match index - base_len {
                    #(#field_values)*
                    _ => #krate::FieldValue::Single(None),
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        #[doc = #builder_doc]
        #[derive(Debug, Clone, Default)]
        #vis struct #builder {
            #base_ident: #base_builder_ty,
            #(#builder_fields)*
        }

        impl #builder {
            #(#setters)*

            /// Appends every field of `source` to what is staged: scalars are
            /// overwritten, lists are extended with copies of the source entries.
            pub fn copy_from(mut self, source: &#name) -> Self {
                self.#base_ident = self.#base_ident.copy_from(&source.#base_ident);
                #(#copy_stmts)*
                self
            }

            /// Validates the staged fields and freezes them into a new instance.
            pub fn build(&self) -> #krate::Result<#name> {
                match self.build_checked() {
                    Ok(built) => {
                        #krate::__private::tracing::trace!(type_name = #type_name, "built");
                        Ok(built)
                    }
                    Err(error) => {
                        #krate::__private::tracing::debug!(type_name = #type_name, %error, "build failed");
                        Err(error)
                    }
                }
            }

            fn build_checked(&self) -> #krate::Result<#name> {
                let config = #krate::ModelConfig::current();
                let base = self.#base_ident.build(&config)?;
                #(#build_stmts)*
                let built = #name {
                    #(#all_idents: #all_values,)*
                };
                #value_or_children
                #krate::validation::check_constraints(&built, #type_name, #name::CONSTRAINTS)?;
                Ok(built)
            }
        }

        impl ::std::convert::From<&#name> for #builder {
            fn from(source: &#name) -> Self {
                #builder::default().copy_from(source)
            }
        }

        #capabilities
    })
}

fn name_lit(f: &ModelField) -> syn::LitStr {
    syn::LitStr::new(&f.name, f.ident.span())
}

fn getter(f: &ModelField) -> TokenStream {
    let ident = &f.ident;
    let inner = &f.inner;
    match f.container {
        ContainerKind::Plain => quote! {
            pub fn #ident(&self) -> &#inner {
                &self.#ident
            }
        },
        ContainerKind::Option => quote! {
            pub fn #ident(&self) -> ::std::option::Option<&#inner> {
                self.#ident.as_ref()
            }
        },
        ContainerKind::Vec => quote! {
            pub fn #ident(&self) -> &[#inner] {
                &self.#ident
            }
        },
    }
}

fn builder_field(f: &ModelField, krate: &TokenStream) -> TokenStream {
    let ident = &f.ident;
    let inner = &f.inner;
    match (f.role, f.container) {
        (FieldRole::Choice, _) => quote! { #ident: ::std::option::Option<#krate::DataValue>, },
        (_, ContainerKind::Vec) => quote! { #ident: ::std::vec::Vec<#inner>, },
        _ => quote! { #ident: ::std::option::Option<#inner>, },
    }
}

fn setters(f: &ModelField, krate: &TokenStream) -> TokenStream {
    let ident = &f.ident;
    let inner = &f.inner;
    match (f.role, f.container) {
        (FieldRole::Choice, _) => quote! {
            /// Accepts a value of any data type; `build()` rejects types the field does not declare.
            pub fn #ident(mut self, value: impl ::std::convert::Into<#krate::DataValue>) -> Self {
                self.#ident = Some(value.into());
                self
            }
        },
        (_, ContainerKind::Vec) => {
            let replace = format_ident!("set_{}", ident.unraw());
            quote! {
                /// Appends to the entries staged so far.
                pub fn #ident<I>(mut self, values: I) -> Self
                where
                    I: ::std::iter::IntoIterator,
                    I::Item: ::std::convert::Into<#inner>,
                {
                    self.#ident.extend(values.into_iter().map(::std::convert::Into::into));
                    self
                }

                /// Replaces the entries staged so far.
                pub fn #replace<I>(mut self, values: I) -> Self
                where
                    I: ::std::iter::IntoIterator,
                    I::Item: ::std::convert::Into<#inner>,
                {
                    self.#ident = values.into_iter().map(::std::convert::Into::into).collect();
                    self
                }
            }
        }
        _ => quote! {
            pub fn #ident(mut self, value: impl ::std::convert::Into<#inner>) -> Self {
                self.#ident = Some(value.into());
                self
            }
        },
    }
}

fn copy_stmt(f: &ModelField, krate: &TokenStream) -> TokenStream {
    let ident = &f.ident;
    match (f.role, f.container) {
        (FieldRole::Choice, ContainerKind::Plain) => quote! {
            self.#ident = Some(#krate::ChoiceElement::into_value(source.#ident.clone()));
        },
        (FieldRole::Choice, _) => quote! {
            self.#ident = source.#ident.clone().map(#krate::ChoiceElement::into_value);
        },
        (_, ContainerKind::Plain) => quote! {
            self.#ident = Some(source.#ident.clone());
        },
        (_, ContainerKind::Option) => quote! {
            self.#ident = source.#ident.clone();
        },
        (_, ContainerKind::Vec) => quote! {
            self.#ident.extend(source.#ident.iter().cloned());
        },
    }
}

/// Checks applied to one present value bound to `value`.
fn value_checks(f: &ModelField, krate: &TokenStream) -> TokenStream {
    let name = name_lit(f);
    let check = f.check.as_ref().map(|path| {
        let path = if path.get_ident().is_some() {
            quote! { #krate::validation::#path }
        } else {
            quote! { #path }
        };
        quote! { #path(value, #name, &config)?; }
    });
    let references = (!f.reference_types.is_empty()).then(|| {
        let allowed = &f.reference_types;
        quote! { #krate::validation::check_reference_type(value, #name, &[#(#allowed),*], &config)?; }
    });
    let codes = (!f.codes.is_empty()).then(|| {
        let allowed = &f.codes;
        quote! { #krate::validation::check_code_binding(value, #name, &[#(#allowed),*])?; }
    });
    quote! { #check #references #codes }
}

fn build_stmt(f: &ModelField, krate: &TokenStream) -> TokenStream {
    let ident = &f.ident;
    let inner = &f.inner;
    let name = name_lit(f);
    let checks = value_checks(f, krate);
    let has_checks = !checks.is_empty();

    match (f.role, f.container) {
        (FieldRole::Choice, ContainerKind::Plain) => quote! {
            let #ident = #krate::validation::require_choice_element::<#inner>(self.#ident.clone(), #name)?;
        },
        (FieldRole::Choice, _) => quote! {
            let #ident = #krate::validation::choice_element::<#inner>(self.#ident.clone(), #name)?;
        },
        (_, ContainerKind::Plain) => {
            let check_block = has_checks.then(|| quote! { { let value = &#ident; #checks } });
            quote! {
                let #ident = #krate::validation::require_non_null(self.#ident.clone(), #name)?;
                #check_block
            }
        }
        (_, ContainerKind::Option) => {
            let check_block = has_checks.then(|| quote! {
                if let Some(value) = &#ident {
                    #checks
                }
            });
            quote! {
                let #ident = self.#ident.clone();
                #check_block
            }
        }
        (_, ContainerKind::Vec) => {
            let take = if f.required {
                quote! { #krate::validation::require_non_empty(self.#ident.clone(), #name)? }
            } else {
                quote! { self.#ident.clone() }
            };
            let check_block = has_checks.then(|| quote! {
                for value in &#ident {
                    #checks
                }
            });
            quote! {
                let #ident: ::std::vec::Vec<#inner> = #take;
                #check_block
            }
        }
    }
}

fn descriptor(f: &ModelField, krate: &TokenStream) -> TokenStream {
    let name = name_lit(f);
    let inner = &f.inner;
    let required = f.required;
    let (kind, types) = match (f.role, f.container) {
        (FieldRole::Primitive, _) => (quote! { Primitive }, quote! { &[] }),
        (FieldRole::Choice, _) => (
            quote! { Choice },
            quote! { <#inner as #krate::ChoiceElement>::TYPE_NAMES },
        ),
        (_, ContainerKind::Vec) => (
            quote! { Repeated },
            quote! { &[<#inner as #krate::ModelType>::TYPE_NAME] },
        ),
        _ => (
            quote! { Single },
            quote! { &[<#inner as #krate::ModelType>::TYPE_NAME] },
        ),
    };
    quote! {
        #krate::FieldDescriptor {
            name: #name,
            kind: #krate::FieldKind::#kind,
            required: #required,
            types: #types,
        }
    }
}

fn field_value(f: &ModelField, krate: &TokenStream) -> TokenStream {
    let ident = &f.ident;
    match (f.role, f.container) {
        (FieldRole::Primitive, ContainerKind::Plain) => quote! {
            #krate::FieldValue::Primitive(Some(#krate::visitor::AsPrimitiveValue::as_primitive_value(&self.#ident)))
        },
        (FieldRole::Primitive, _) => quote! {
            #krate::FieldValue::Primitive(
                self.#ident.as_ref().map(#krate::visitor::AsPrimitiveValue::as_primitive_value),
            )
        },
        (FieldRole::Choice, ContainerKind::Plain) => quote! {
            #krate::FieldValue::Choice(Some(#krate::ChoiceElement::as_visitable(&self.#ident)))
        },
        (FieldRole::Choice, _) => quote! {
            #krate::FieldValue::Choice(self.#ident.as_ref().map(#krate::ChoiceElement::as_visitable))
        },
        (_, ContainerKind::Plain) => quote! {
            #krate::FieldValue::Single(Some(&self.#ident as &dyn #krate::Visitable))
        },
        (_, ContainerKind::Option) => quote! {
            #krate::FieldValue::Single(self.#ident.as_ref().map(|v| v as &dyn #krate::Visitable))
        },
        (_, ContainerKind::Vec) => quote! {
            #krate::FieldValue::Repeated(&self.#ident as &dyn #krate::NodeList)
        },
    }
}

/// `builder_with(required...)` and `to_builder_with(required...)`. Required
/// fields get no setter, so these are the only way to stage them. Scalars
/// take `impl Into<Option<T>>` so that an omitted value can still be passed
/// as `None` and reported by `build()`.
fn builder_with(own: &[&ModelField], builder: &syn::Ident, krate: &TokenStream) -> TokenStream {
    let required: Vec<&&ModelField> = own.iter().filter(|f| f.required).collect();
    if required.is_empty() {
        return TokenStream::new();
    }
    let params: Vec<TokenStream> = required
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let inner = &f.inner;
            match (f.role, f.container) {
                (FieldRole::Choice, _) => quote! {
                    #ident: impl ::std::convert::Into<::std::option::Option<#krate::DataValue>>
                },
                (_, ContainerKind::Vec) => quote! {
                    #ident: impl ::std::iter::IntoIterator<Item = impl ::std::convert::Into<#inner>>
                },
                _ => quote! { #ident: impl ::std::convert::Into<::std::option::Option<#inner>> },
            }
        })
        .collect();
    let assigns: Vec<TokenStream> = required
        .iter()
        .map(|f| {
            let ident = &f.ident;
            match f.container {
                ContainerKind::Vec => quote! {
                    builder.#ident = #ident.into_iter().map(::std::convert::Into::into).collect();
                },
                _ => quote! { builder.#ident = #ident.into(); },
            }
        })
        .collect();
    quote! {
        /// A builder holding the required fields, in declaration order. They
        /// cannot be changed on the returned builder.
        pub fn builder_with(#(#params),*) -> #builder {
            let mut builder = #builder::default();
            #(#assigns)*
            builder
        }

        /// A builder seeded with every field of this instance, with the
        /// required fields replaced by the given values.
        pub fn to_builder_with(&self, #(#params),*) -> #builder {
            let mut builder = self.to_builder();
            #(#assigns)*
            builder
        }
    }
}

fn primitive_of(kind: &NodeKindAttr, own: &[&ModelField], krate: &TokenStream) -> TokenStream {
    if *kind != NodeKindAttr::Primitive {
        return TokenStream::new();
    }
    let Some(value) = own
        .iter()
        .find(|f| f.role == FieldRole::Primitive && f.name == "value")
    else {
        return TokenStream::new();
    };
    let inner = &value.inner;
    quote! {
        /// Builds an instance holding just `value`.
        pub fn of(value: impl ::std::convert::Into<#inner>) -> #krate::Result<Self> {
            Self::builder().value(value).build()
        }
    }
}

fn capability_impls(
    name: &syn::Ident,
    builder: &syn::Ident,
    base: &syn::Ident,
    kind: BaseKind,
    krate: &TokenStream,
) -> TokenStream {
    let has_id = quote! {
        impl #krate::element::HasId for #name {
            fn id(&self) -> ::std::option::Option<&str> {
                #krate::element::HasId::id(&self.#base)
            }
        }
        impl #krate::element::IdBuilder for #builder {
            fn id_slot(&mut self) -> &mut ::std::option::Option<::std::string::String> {
                self.#base.id_slot()
            }
        }
    };
    let extensions = quote! {
        impl #krate::element::HasExtensions for #name {
            fn extension(&self) -> &[#krate::r4::Extension] {
                #krate::element::HasExtensions::extension(&self.#base)
            }
        }
        impl #krate::element::ExtensionBuilder for #builder {
            fn extension_slot(&mut self) -> &mut ::std::vec::Vec<#krate::r4::Extension> {
                self.#base.extension_slot()
            }
        }
    };
    let modifier_extensions = quote! {
        impl #krate::element::HasModifierExtensions for #name {
            fn modifier_extension(&self) -> &[#krate::r4::Extension] {
                #krate::element::HasModifierExtensions::modifier_extension(&self.#base)
            }
        }
        impl #krate::element::ModifierExtensionBuilder for #builder {
            fn modifier_extension_slot(&mut self) -> &mut ::std::vec::Vec<#krate::r4::Extension> {
                self.#base.modifier_extension_slot()
            }
        }
    };
    let resource = quote! {
        impl #krate::resource::HasMeta for #name {
            fn meta(&self) -> ::std::option::Option<&#krate::r4::Meta> {
                #krate::resource::HasMeta::meta(&self.#base)
            }
            fn implicit_rules(&self) -> ::std::option::Option<&#krate::r4::Uri> {
                #krate::resource::HasMeta::implicit_rules(&self.#base)
            }
            fn language(&self) -> ::std::option::Option<&#krate::r4::Code> {
                #krate::resource::HasMeta::language(&self.#base)
            }
        }
        impl #krate::resource::ResourceBuilder for #builder {
            fn resource_base_mut(&mut self) -> &mut #krate::resource::ResourceBaseBuilder {
                self.#base.resource_base_mut()
            }
        }
    };
    let domain_resource = quote! {
        impl #krate::resource::HasNarrative for #name {
            fn text(&self) -> ::std::option::Option<&#krate::r4::Narrative> {
                #krate::resource::HasNarrative::text(&self.#base)
            }
        }
        impl #krate::resource::HasContained for #name {
            fn contained(&self) -> &[#krate::r4::Resource] {
                #krate::resource::HasContained::contained(&self.#base)
            }
        }
        impl #krate::resource::DomainResourceBuilder for #builder {
            fn domain_base_mut(&mut self) -> &mut #krate::resource::DomainResourceBaseBuilder {
                self.#base.domain_base_mut()
            }
        }
    };

    match kind {
        BaseKind::Element => quote! { #has_id #extensions },
        BaseKind::BackboneElement => quote! { #has_id #extensions #modifier_extensions },
        BaseKind::Resource => quote! { #has_id #resource },
        BaseKind::DomainResource => {
            quote! { #has_id #resource #domain_resource #extensions #modifier_extensions }
        }
    }
}
