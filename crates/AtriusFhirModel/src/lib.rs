//! # Atrius FHIR Model
//!
//! An immutable, builder-constructed object model for FHIR resources and data
//! types, together with the engine every model type is built on:
//!
//! - **Validation** ([`validation`]): required fields, non-empty lists, choice
//!   membership, primitive formats and named cross-field rules, all checked by
//!   `build()` before an instance exists.
//! - **Choice elements** ([`choice`]): `value[x]`-style fields as per-field
//!   enums over the declared alternatives.
//! - **Base hierarchy** ([`element`], [`resource`]): shared fields embedded by
//!   composition and exposed through capability traits.
//! - **Traversal** ([`visitor`], [`visitors`]): an order-preserving visitor
//!   protocol driven by per-type field tables.
//!
//! Model types in [`r4`] derive all of this with `#[derive(FhirModel)]`.
//!
//! ```rust
//! use atrius_fhir_model::prelude::*;
//! use atrius_fhir_model::r4::{Code, FhirString, Instant, Reference, Slot};
//!
//! let slot = Slot::builder_with(
//!     Reference::builder().reference(FhirString::of("Schedule/example")?).build()?,
//!     Code::of("free")?,
//!     Instant::parse("2024-01-01T09:00:00Z")?,
//!     Instant::parse("2024-01-01T09:30:00Z")?,
//! )
//! .build()?;
//!
//! let commented = slot.to_builder().comment(FhirString::of("test")?).build()?;
//! assert_ne!(slot, commented);
//! assert_eq!(slot.comment(), None);
//! # Ok::<(), atrius_fhir_model::ConstructionError>(())
//! ```
//!
//! Required fields are passed to `builder_with` and have no setter, so a
//! builder cannot change them. `to_builder_with` derives a builder with new ones.
//!
//! ```rust,compile_fail
//! use atrius_fhir_model::r4::{Code, Slot};
//!
//! let builder = Slot::builder().status(Code::of("busy").unwrap());
//! ```

extern crate self as atrius_fhir_model;

pub mod choice;
pub mod config;
pub mod date_time;
pub mod element;
pub mod error;
pub mod hash;
pub mod model_support;
pub mod r4;
pub mod resource;
pub mod validation;
pub mod visitor;
pub mod visitors;

pub use atrius_model_macros::{FhirChoice, FhirModel};
pub use choice::{ChoiceElement, DataType, DataValue};
pub use config::{ConfigError, ModelConfig};
pub use date_time::{PrecisionDate, PrecisionDateTime, PrecisionInstant};
pub use error::{ConstructionError, ErrorKind, Result};
pub use hash::HashMemo;
pub use visitor::{
    Accept, AsNode, FieldDescriptor, FieldKind, FieldValue, ModelType, NodeKind, NodeList,
    PrimitiveValue, VisitContext, Visitable, Visitor,
};

/// Traits needed to use builders, accessors and traversal.
pub mod prelude {
    pub use crate::choice::ChoiceElement;
    pub use crate::element::{
        ExtensionBuilder, HasExtensions, HasId, HasModifierExtensions, IdBuilder,
        ModifierExtensionBuilder,
    };
    pub use crate::resource::{
        DomainResourceBuilder, HasContained, HasMeta, HasNarrative, ResourceBuilder,
    };
    pub use crate::visitor::{Accept, ModelType, Visitable, Visitor};
    pub use crate::visitors::{CollectingVisitor, DefaultVisitor, PathAwareVisitor, PathVisitor};
}

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
    pub use tracing;
}
