use crate::element::ElementBase;
use crate::r4::{FhirString, Identifier, Uri};
use crate::{FhirModel, HashMemo};

/// A reference from one resource to another, by literal URL, logical
/// identifier or both.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct Reference {
    #[fhir(base)]
    base: ElementBase,
    /// Literal reference: relative (`Patient/123`), absolute or a fragment (`#p1`).
    reference: Option<FhirString>,
    /// Type the reference refers to (`Patient`).
    r#type: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
    hash: HashMemo,
}
