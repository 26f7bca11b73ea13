use crate::element::ElementBase;
use crate::r4::{Code, FhirString, Period};
use crate::{FhirModel, HashMemo};

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct HumanName {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(codes = "usual|official|temp|nickname|anonymous|old|maiden")]
    r#use: Option<Code>,
    text: Option<FhirString>,
    family: Option<FhirString>,
    given: Vec<FhirString>,
    prefix: Vec<FhirString>,
    suffix: Vec<FhirString>,
    period: Option<Period>,
    hash: HashMemo,
}
