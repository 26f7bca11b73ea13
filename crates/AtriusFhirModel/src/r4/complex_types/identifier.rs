use crate::element::ElementBase;
use crate::r4::{Code, CodeableConcept, FhirString, Period, Uri};
use crate::{FhirModel, HashMemo};

/// A business identifier: a `value` unique within its `system`.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct Identifier {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(codes = "usual|official|temp|secondary|old")]
    r#use: Option<Code>,
    r#type: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    hash: HashMemo,
}
