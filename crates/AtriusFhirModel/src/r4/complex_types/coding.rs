use crate::element::ElementBase;
use crate::r4::{Boolean, Code, FhirString, Uri};
use crate::{FhirModel, HashMemo};

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct Coding {
    #[fhir(base)]
    base: ElementBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
    hash: HashMemo,
}
