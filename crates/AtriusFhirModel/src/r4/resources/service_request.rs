use crate::r4::{
    Annotation, Boolean, Canonical, Code, CodeableConcept, DateTime, FhirString, Identifier,
    Period, Quantity, Range, Ratio, Reference, Timing, Uri,
};
use crate::resource::DomainResourceBase;
use crate::{FhirChoice, FhirModel, HashMemo};

/// A record of a request for a service such as a diagnostic investigation,
/// treatment or operation to be performed.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "resource")]
#[fhir_invariant(
    key = "dom-6",
    severity = "warning",
    human = "A resource should have narrative for robust management",
    location = "(base)",
    rule = "crate::resource::has_narrative"
)]
#[fhir_invariant(
    key = "prr-1",
    human = "orderDetail SHALL only be present if code is present",
    rule = "order_detail_needs_code"
)]
pub struct ServiceRequest {
    #[fhir(base)]
    base: DomainResourceBase,
    identifier: Vec<Identifier>,
    instantiates_canonical: Vec<Canonical>,
    instantiates_uri: Vec<Uri>,
    #[fhir(reference_types = "CarePlan|ServiceRequest|MedicationRequest")]
    based_on: Vec<Reference>,
    #[fhir(reference_types = "ServiceRequest")]
    replaces: Vec<Reference>,
    requisition: Option<Identifier>,
    #[fhir(codes = "draft|active|on-hold|revoked|completed|entered-in-error|unknown")]
    status: Code,
    #[fhir(codes = "proposal|plan|directive|order|original-order|reflex-order|filler-order|instance-order|option")]
    intent: Code,
    category: Vec<CodeableConcept>,
    #[fhir(codes = "routine|urgent|asap|stat")]
    priority: Option<Code>,
    do_not_perform: Option<Boolean>,
    code: Option<CodeableConcept>,
    order_detail: Vec<CodeableConcept>,
    #[fhir(choice)]
    quantity: Option<ServiceRequestQuantity>,
    #[fhir(reference_types = "Patient|Group|Location|Device")]
    subject: Reference,
    #[fhir(reference_types = "Encounter")]
    encounter: Option<Reference>,
    #[fhir(choice)]
    occurrence: Option<ServiceRequestOccurrence>,
    #[fhir(choice)]
    as_needed: Option<ServiceRequestAsNeeded>,
    authored_on: Option<DateTime>,
    #[fhir(reference_types = "Practitioner|PractitionerRole|Organization|Patient|RelatedPerson|Device")]
    requester: Option<Reference>,
    performer_type: Option<CodeableConcept>,
    #[fhir(
        reference_types = "Practitioner|PractitionerRole|Organization|CareTeam|HealthcareService|Patient|Device|RelatedPerson"
    )]
    performer: Vec<Reference>,
    reason_code: Vec<CodeableConcept>,
    #[fhir(reference_types = "Condition|Observation|DiagnosticReport|DocumentReference")]
    reason_reference: Vec<Reference>,
    #[fhir(reference_types = "Specimen")]
    specimen: Vec<Reference>,
    body_site: Vec<CodeableConcept>,
    note: Vec<Annotation>,
    patient_instruction: Option<FhirString>,
    #[fhir(reference_types = "Provenance")]
    relevant_history: Vec<Reference>,
    hash: HashMemo,
}

/// `ServiceRequest.quantity[x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirChoice)]
pub enum ServiceRequestQuantity {
    Quantity(Quantity),
    Ratio(Ratio),
    Range(Range),
}

/// `ServiceRequest.occurrence[x]`: when the service should occur.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirChoice)]
pub enum ServiceRequestOccurrence {
    DateTime(DateTime),
    Period(Period),
    Timing(Timing),
}

/// `ServiceRequest.asNeeded[x]`: a flag or the precondition for the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirChoice)]
pub enum ServiceRequestAsNeeded {
    Boolean(Boolean),
    CodeableConcept(CodeableConcept),
}

fn order_detail_needs_code(request: &ServiceRequest) -> bool {
    request.order_detail.is_empty() || request.code.is_some()
}
