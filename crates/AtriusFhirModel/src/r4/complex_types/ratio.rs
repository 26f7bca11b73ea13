use crate::element::{ElementBase, HasExtensions};
use crate::r4::Quantity;
use crate::{FhirModel, HashMemo};

/// A relationship between two quantities.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
#[fhir_invariant(
    key = "rat-1",
    human = "Numerator and denominator SHALL both be present, or both are absent. If both are absent, there SHALL be some extension present",
    rule = "both_terms_or_extension"
)]
pub struct Ratio {
    #[fhir(base)]
    base: ElementBase,
    numerator: Option<Quantity>,
    denominator: Option<Quantity>,
    hash: HashMemo,
}

fn both_terms_or_extension(ratio: &Ratio) -> bool {
    match (&ratio.numerator, &ratio.denominator) {
        (Some(_), Some(_)) => true,
        (None, None) => !ratio.extension().is_empty(),
        _ => false,
    }
}
