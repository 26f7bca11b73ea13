use crate::element::ElementBase;
use crate::r4::{Code, Xhtml};
use crate::{FhirModel, HashMemo};

/// Human-readable summary of a resource.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct Narrative {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(codes = "generated|extensions|additional|empty")]
    status: Code,
    div: Xhtml,
    hash: HashMemo,
}
