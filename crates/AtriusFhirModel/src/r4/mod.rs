//! The R4 catalogue: primitive types, general-purpose data types and resources.

pub mod complex_types;
pub use complex_types::*;

mod primitives;
pub use primitives::*;

pub mod resources;
pub use resources::*;

use crate::visitor::{FieldDescriptor, ModelType};

macro_rules! model_types {
    ($($ty:ty),* $(,)?) => {
        vec![$((<$ty as ModelType>::TYPE_NAME, <$ty as ModelType>::fields())),*]
    };
}

/// Type name and field table of every concrete model type.
pub(crate) fn model_types() -> Vec<(&'static str, &'static [FieldDescriptor])> {
    model_types![
        Boolean, Integer, PositiveInt, Decimal, FhirString, Code, Id, Uri, Canonical, Markdown,
        Xhtml, Date, DateTime, Instant,
        Annotation, CodeableConcept, Coding, ContactPoint, Duration, Extension, HumanName,
        Identifier, Meta, Narrative, Period, Quantity, Range, Ratio, Reference, Signature, Timing,
        TimingRepeat,
        Medication, MedicationIngredient, MedicationBatch, Organization, OrganizationContact,
        ServiceRequest, Slot, Subscription, SubscriptionChannel,
    ]
}
