use crate::element::ElementBase;
use crate::r4::{Coding, FhirString};
use crate::{FhirModel, HashMemo};

/// A concept given by codings and/or text.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct CodeableConcept {
    #[fhir(base)]
    base: ElementBase,
    coding: Vec<Coding>,
    text: Option<FhirString>,
    hash: HashMemo,
}
