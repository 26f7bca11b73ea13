//! # Model Macros - Procedural Macros for the FHIR Object Model
//!
//! This crate generates the repetitive half of every model type in
//! `atrius-fhir-model`: accessors, the builder, validation, the field table
//! used by traversal, and structural hashing.
//!
//! ## Overview
//!
//! - **`#[derive(FhirModel)]`** - For resources, data types and primitive types.
//! - **`#[derive(FhirChoice)]`** - For the per-field enums of choice elements
//!   (`value[x]`, `occurrence[x]`).
//!
//! ## Type attributes
//!
//! - `#[fhir(kind = "resource" | "element" | "primitive")]` - the node kind (default `element`)
//! - `#[fhir(name = "Timing.Repeat")]` - the model type name (default: the struct name)
//! - `#[fhir(value_or_children)]` - reject instances with neither a value nor a child
//! - `#[fhir_invariant(key = "per-1", human = "...", rule = "path::to::fn")]` -
//!   a cross-field rule checked after the fields; `severity = "warning"` only logs it
//!
//! ## Field attributes
//!
//! - `#[fhir(base)]` - the embedded `ElementBase`, `BackboneElementBase`,
//!   `ResourceBase` or `DomainResourceBase`
//! - `#[fhir(primitive)]` - a raw value (`bool`, `String`, ...) rather than a child node
//! - `#[fhir(choice)]` - a choice element; the field type derives `FhirChoice`
//! - `#[fhir(required)]` - on a `Vec<T>`: at least one entry
//! - `#[fhir(rename = "name")]` - the element name (default: the camelCased field name)
//! - `#[fhir(check = "check_uri")]` - a `fn(&T, &'static str, &ModelConfig) -> Result<()>`
//!   run on each present value; bare names resolve in `atrius_fhir_model::validation`
//! - `#[fhir(reference_types = "Patient|Group")]` - allowed targets of a `Reference`
//! - `#[fhir(codes = "a|b|c")]` - the allowed values of a `Code`
//!
//! A plain `T` field is required, `Option<T>` is optional and `Vec<T>` is repeated.
//!
//! ## Usage
//!
//! ```ignore
//! use atrius_fhir_model::{FhirModel, HashMemo};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
//! #[fhir(value_or_children)]
//! #[fhir_invariant(key = "per-1", human = "If present, start SHALL have a lower value than end", rule = "period_ordered")]
//! pub struct Period {
//!     #[fhir(base)]
//!     base: ElementBase,
//!     start: Option<DateTime>,
//!     end: Option<DateTime>,
//!     hash: HashMemo,
//! }
//! ```

extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use crate::fhir_choice::generate_choice_impl;
use crate::fhir_model::generate_model_impl;

pub(crate) mod field_helpers;
pub(crate) mod fhir_choice;
pub(crate) mod fhir_invariant;
pub(crate) mod fhir_model;
pub(crate) mod type_helpers;

/// Derives accessors, a builder, validation, traversal and hashing for a model type.
///
/// For a struct `Slot` this generates:
///
/// - a getter per field (`&T`, `Option<&T>` or `&[T]`)
/// - `Slot::builder()`, `Slot::builder_with(required...)` and `Slot::to_builder()`
/// - `SlotBuilder` with one setter per field; repeated fields get an appending
///   setter and a replacing `set_` setter
/// - `SlotBuilder::build()`, which validates and returns `Result<Slot>`
/// - `Slot::hash_code()` and a `Hash` impl using it
/// - `ModelType` and `Visitable`, plus the capability traits of its base
#[proc_macro_derive(FhirModel, attributes(fhir, fhir_invariant))]
pub fn fhir_model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    generate_model_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `ChoiceElement` for the enum backing one choice element.
///
/// ```rust,ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash, FhirChoice)]
/// pub enum ServiceRequestOccurrence {
///     DateTime(DateTime),
///     Period(Period),
///     Timing(Timing),
/// }
/// ```
#[proc_macro_derive(FhirChoice)]
pub fn fhir_choice_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    generate_choice_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
