use crate::element::ElementBase;
use crate::r4::{Code, Decimal, FhirString, Uri};
use crate::{FhirModel, HashMemo};

pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

/// A length of time, as a quantity in UCUM time units.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
#[fhir_invariant(
    key = "drt-1",
    human = "There SHALL be a code if there is a value and it SHALL be an expression of time. If system is present, it SHALL be UCUM.",
    rule = "ucum_time_unit"
)]
pub struct Duration {
    #[fhir(base)]
    base: ElementBase,
    value: Option<Decimal>,
    #[fhir(codes = "<|<=|>=|>")]
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
    hash: HashMemo,
}

fn ucum_time_unit(duration: &Duration) -> bool {
    let system_is_ucum = duration
        .system
        .as_ref()
        .and_then(|uri| uri.value())
        .is_none_or(|uri| uri == UCUM_SYSTEM);
    let coded = duration.code.is_some() || duration.value.is_none();
    system_is_ucum && coded
}
