use crate::r4::{Boolean, Code, CodeableConcept, FhirString, Identifier, Instant, Reference};
use crate::resource::DomainResourceBase;
use crate::{FhirModel, HashMemo};

/// A slot of time on a schedule that may be available for booking appointments.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "resource")]
#[fhir_invariant(
    key = "dom-6",
    severity = "warning",
    human = "A resource should have narrative for robust management",
    location = "(base)",
    rule = "crate::resource::has_narrative"
)]
pub struct Slot {
    #[fhir(base)]
    base: DomainResourceBase,
    identifier: Vec<Identifier>,
    service_category: Vec<CodeableConcept>,
    service_type: Vec<CodeableConcept>,
    specialty: Vec<CodeableConcept>,
    appointment_type: Option<CodeableConcept>,
    /// The schedule resource that this slot defines an interval of status information.
    #[fhir(reference_types = "Schedule")]
    schedule: Reference,
    #[fhir(codes = "busy|free|busy-unavailable|busy-tentative|entered-in-error")]
    status: Code,
    start: Instant,
    end: Instant,
    /// This slot has already been overbooked, appointments are unlikely to be accepted for it.
    overbooked: Option<Boolean>,
    comment: Option<FhirString>,
    hash: HashMemo,
}
