use crate::element::ElementBase;
use crate::r4::{Canonical, Coding, Id, Instant, Uri};
use crate::{FhirModel, HashMemo};

/// Metadata about a resource, maintained by the infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct Meta {
    #[fhir(base)]
    base: ElementBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Canonical>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
    hash: HashMemo,
}
