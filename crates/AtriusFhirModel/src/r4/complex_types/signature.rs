use crate::element::ElementBase;
use crate::r4::{Code, Coding, Instant, Reference};
use crate::{FhirModel, HashMemo};

/// A digital signature along with supporting context.
///
/// The signed bytes themselves (`data`) are not modelled.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct Signature {
    #[fhir(base)]
    base: ElementBase,
    /// Why the signature was applied; at least one entry.
    #[fhir(required)]
    r#type: Vec<Coding>,
    when: Instant,
    #[fhir(reference_types = "Practitioner|PractitionerRole|RelatedPerson|Patient|Device|Organization")]
    who: Reference,
    #[fhir(reference_types = "Practitioner|PractitionerRole|RelatedPerson|Patient|Device|Organization")]
    on_behalf_of: Option<Reference>,
    target_format: Option<Code>,
    sig_format: Option<Code>,
    hash: HashMemo,
}
