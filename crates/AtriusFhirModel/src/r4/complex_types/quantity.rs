use crate::element::ElementBase;
use crate::r4::{Code, Decimal, FhirString, Uri};
use crate::{FhirModel, HashMemo};

/// A measured amount, optionally coded with a unit system.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
#[fhir_invariant(
    key = "qty-3",
    human = "If a code for the unit is present, the system SHALL also be present",
    rule = "coded_unit_has_system"
)]
pub struct Quantity {
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

fn coded_unit_has_system(quantity: &Quantity) -> bool {
    quantity.code.is_none() || quantity.system.is_some()
}
