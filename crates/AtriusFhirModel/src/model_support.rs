//! Lookups over the model's static type information.

use std::collections::{HashMap, HashSet};

use heck::ToUpperCamelCase;
use once_cell::sync::Lazy;

use crate::visitor::{FieldDescriptor, FieldKind};

/// Every R4 resource type name. Reference checks only apply to these.
static RESOURCE_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Account", "ActivityDefinition", "AdverseEvent", "AllergyIntolerance", "Appointment",
        "AppointmentResponse", "AuditEvent", "Basic", "Binary", "BiologicallyDerivedProduct",
        "BodyStructure", "Bundle", "CapabilityStatement", "CarePlan", "CareTeam", "CatalogEntry",
        "ChargeItem", "ChargeItemDefinition", "Claim", "ClaimResponse", "ClinicalImpression",
        "CodeSystem", "Communication", "CommunicationRequest", "CompartmentDefinition",
        "Composition", "ConceptMap", "Condition", "Consent", "Contract", "Coverage",
        "CoverageEligibilityRequest", "CoverageEligibilityResponse", "DetectedIssue", "Device",
        "DeviceDefinition", "DeviceMetric", "DeviceRequest", "DeviceUseStatement",
        "DiagnosticReport", "DocumentManifest", "DocumentReference", "EffectEvidenceSynthesis",
        "Encounter", "Endpoint", "EnrollmentRequest", "EnrollmentResponse", "EpisodeOfCare",
        "EventDefinition", "Evidence", "EvidenceVariable", "ExampleScenario",
        "ExplanationOfBenefit", "FamilyMemberHistory", "Flag", "Goal", "GraphDefinition", "Group",
        "GuidanceResponse", "HealthcareService", "ImagingStudy", "Immunization",
        "ImmunizationEvaluation", "ImmunizationRecommendation", "ImplementationGuide",
        "InsurancePlan", "Invoice", "Library", "Linkage", "List", "Location", "Measure",
        "MeasureReport", "Media", "Medication", "MedicationAdministration", "MedicationDispense",
        "MedicationKnowledge", "MedicationRequest", "MedicationStatement", "MedicinalProduct",
        "MedicinalProductAuthorization", "MedicinalProductContraindication",
        "MedicinalProductIndication", "MedicinalProductIngredient", "MedicinalProductInteraction",
        "MedicinalProductManufactured", "MedicinalProductPackaged",
        "MedicinalProductPharmaceutical", "MedicinalProductUndesirableEffect", "MessageDefinition",
        "MessageHeader", "MolecularSequence", "NamingSystem", "NutritionOrder", "Observation",
        "ObservationDefinition", "OperationDefinition", "OperationOutcome", "Organization",
        "OrganizationAffiliation", "Parameters", "Patient", "PaymentNotice",
        "PaymentReconciliation", "Person", "PlanDefinition", "Practitioner", "PractitionerRole",
        "Procedure", "Provenance", "Questionnaire", "QuestionnaireResponse", "RelatedPerson",
        "RequestGroup", "ResearchDefinition", "ResearchElementDefinition", "ResearchStudy",
        "ResearchSubject", "RiskAssessment", "RiskEvidenceSynthesis", "Schedule",
        "SearchParameter", "ServiceRequest", "Slot", "Specimen", "SpecimenDefinition",
        "StructureDefinition", "StructureMap", "Subscription", "Substance",
        "SubstanceNucleicAcid", "SubstancePolymer", "SubstanceProtein",
        "SubstanceReferenceInformation", "SubstanceSourceMaterial", "SubstanceSpecification",
        "SupplyDelivery", "SupplyRequest", "Task", "TerminologyCapabilities", "TestReport",
        "TestScript", "ValueSet", "VerificationResult", "VisionPrescription",
    ]
    .into_iter()
    .collect()
});

/// Field tables of every model type in this crate, keyed by type name.
static FIELDS_BY_TYPE: Lazy<HashMap<&'static str, &'static [FieldDescriptor]>> =
    Lazy::new(|| crate::r4::model_types().into_iter().collect());

pub fn is_resource_type(name: &str) -> bool {
    RESOURCE_TYPES.contains(name)
}

/// Name of a choice element holding a value of `type_name`:
/// `choice_field_name("occurrence", "DateTime") == "occurrenceDateTime"`.
pub fn choice_field_name(field: &str, type_name: &str) -> String {
    format!("{}{}", field, type_name.to_upper_camel_case())
}

/// Declared fields of a model type of this crate, base fields first.
pub fn fields(type_name: &str) -> Option<&'static [FieldDescriptor]> {
    FIELDS_BY_TYPE.get(type_name).copied()
}

pub fn field_names(type_name: &str) -> Vec<&'static str> {
    fields(type_name)
        .map(|fields| fields.iter().map(|field| field.name).collect())
        .unwrap_or_default()
}

pub fn is_choice_field(type_name: &str, field: &str) -> bool {
    fields(type_name)
        .and_then(|fields| fields.iter().find(|f| f.name == field))
        .is_some_and(|f| f.kind == FieldKind::Choice)
}

/// Alternative type names declared for a choice field.
pub fn choice_types(type_name: &str, field: &str) -> &'static [&'static str] {
    fields(type_name)
        .and_then(|fields| fields.iter().find(|f| f.name == field && f.is_choice()))
        .map(|f| f.types)
        .unwrap_or(&[])
}
