use std::cmp::Ordering;

use crate::element::ElementBase;
use crate::r4::DateTime;
use crate::{FhirModel, HashMemo};

/// A time range defined by start and end; an absent `end` means ongoing.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
#[fhir_invariant(
    key = "per-1",
    human = "If present, start SHALL have a lower value than end",
    rule = "start_before_end"
)]
pub struct Period {
    #[fhir(base)]
    base: ElementBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
    hash: HashMemo,
}

// Values of different precision that cannot be ordered pass.
fn start_before_end(period: &Period) -> bool {
    let start = period.start.as_ref().and_then(|dt| dt.value());
    let end = period.end.as_ref().and_then(|dt| dt.value());
    match (start, end) {
        (Some(start), Some(end)) => start.compare(end) != Some(Ordering::Greater),
        _ => true,
    }
}
