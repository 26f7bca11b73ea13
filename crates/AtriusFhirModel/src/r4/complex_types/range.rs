use std::cmp::Ordering;

use crate::element::ElementBase;
use crate::r4::Quantity;
use crate::{FhirModel, HashMemo};

/// A set of ordered quantity values with inclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
#[fhir_invariant(
    key = "rng-2",
    human = "If present, low SHALL have a lower value than high",
    rule = "low_not_above_high"
)]
pub struct Range {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(check = "check_simple_quantity")]
    low: Option<Quantity>,
    #[fhir(check = "check_simple_quantity")]
    high: Option<Quantity>,
    hash: HashMemo,
}

fn low_not_above_high(range: &Range) -> bool {
    let amount = |q: &Option<Quantity>| q.as_ref().and_then(|q| q.value()).and_then(|d| d.value().copied());
    match (amount(&range.low), amount(&range.high)) {
        (Some(low), Some(high)) => low.cmp(&high) != Ordering::Greater,
        _ => true,
    }
}
