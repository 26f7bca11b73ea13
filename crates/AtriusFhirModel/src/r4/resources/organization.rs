use crate::element::BackboneElementBase;
use crate::r4::{
    Boolean, CodeableConcept, ContactPoint, FhirString, HumanName, Identifier, Reference,
};
use crate::resource::DomainResourceBase;
use crate::{FhirModel, HashMemo};

/// A formally or informally recognized grouping of people or organizations
/// formed for the purpose of achieving some form of collective action.
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
    key = "org-1",
    human = "The organization SHALL at least have a name or an identifier, and possibly more than one",
    location = "(base)",
    rule = "named_or_identified"
)]
#[fhir_invariant(
    key = "org-3",
    human = "The telecom of an organization can never be of use 'home'",
    location = "Organization.telecom",
    rule = "no_home_telecom"
)]
pub struct Organization {
    #[fhir(base)]
    base: DomainResourceBase,
    identifier: Vec<Identifier>,
    active: Option<Boolean>,
    r#type: Vec<CodeableConcept>,
    name: Option<FhirString>,
    alias: Vec<FhirString>,
    telecom: Vec<ContactPoint>,
    #[fhir(reference_types = "Organization")]
    part_of: Option<Reference>,
    contact: Vec<OrganizationContact>,
    #[fhir(reference_types = "Endpoint")]
    endpoint: Vec<Reference>,
    hash: HashMemo,
}

/// Contact for the organization for a certain purpose.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(name = "Organization.Contact", value_or_children)]
pub struct OrganizationContact {
    #[fhir(base)]
    base: BackboneElementBase,
    purpose: Option<CodeableConcept>,
    name: Option<HumanName>,
    telecom: Vec<ContactPoint>,
    hash: HashMemo,
}

fn named_or_identified(org: &Organization) -> bool {
    !org.identifier.is_empty() || org.name.is_some()
}

fn no_home_telecom(org: &Organization) -> bool {
    org.telecom
        .iter()
        .filter_map(|telecom| telecom.r#use().and_then(|code| code.value()))
        .all(|code| code != "home")
}
