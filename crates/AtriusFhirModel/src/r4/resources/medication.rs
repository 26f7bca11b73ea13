use crate::element::BackboneElementBase;
use crate::r4::{Boolean, Code, CodeableConcept, DateTime, FhirString, Identifier, Ratio, Reference};
use crate::resource::DomainResourceBase;
use crate::{FhirChoice, FhirModel, HashMemo};

/// Definition of a medication, for prescribing, dispensing and administering.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "resource")]
#[fhir_invariant(
    key = "dom-6",
    severity = "warning",
    human = "A resource should have narrative for robust management",
    location = "(base)",
    rule = "crate::resource::has_narrative"
)]
pub struct Medication {
    #[fhir(base)]
    base: DomainResourceBase,
    identifier: Vec<Identifier>,
    code: Option<CodeableConcept>,
    #[fhir(codes = "active|inactive|entered-in-error")]
    status: Option<Code>,
    #[fhir(reference_types = "Organization")]
    manufacturer: Option<Reference>,
    form: Option<CodeableConcept>,
    amount: Option<Ratio>,
    ingredient: Vec<MedicationIngredient>,
    batch: Option<MedicationBatch>,
    hash: HashMemo,
}

/// An active or inactive ingredient of the medication.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(name = "Medication.Ingredient", value_or_children)]
pub struct MedicationIngredient {
    #[fhir(base)]
    base: BackboneElementBase,
    #[fhir(choice)]
    item: MedicationIngredientItem,
    is_active: Option<Boolean>,
    strength: Option<Ratio>,
    hash: HashMemo,
}

/// `Medication.ingredient.item[x]`: a coded substance or a reference to a
/// Substance or Medication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirChoice)]
pub enum MedicationIngredientItem {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
}

/// Details about packaged medications.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(name = "Medication.Batch", value_or_children)]
pub struct MedicationBatch {
    #[fhir(base)]
    base: BackboneElementBase,
    lot_number: Option<FhirString>,
    expiration_date: Option<DateTime>,
    hash: HashMemo,
}
