use crate::element::ElementBase;
use crate::r4::{Code, FhirString, Period, PositiveInt};
use crate::{FhirModel, HashMemo};

/// Details of a technology-mediated contact point (phone, email, ...).
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
#[fhir_invariant(
    key = "cpt-2",
    human = "A system is required if a value is provided.",
    rule = "value_has_system"
)]
pub struct ContactPoint {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(codes = "phone|fax|email|pager|url|sms|other")]
    system: Option<Code>,
    value: Option<FhirString>,
    #[fhir(codes = "home|work|temp|old|mobile")]
    r#use: Option<Code>,
    rank: Option<PositiveInt>,
    period: Option<Period>,
    hash: HashMemo,
}

fn value_has_system(contact: &ContactPoint) -> bool {
    contact.value.is_none() || contact.system.is_some()
}
