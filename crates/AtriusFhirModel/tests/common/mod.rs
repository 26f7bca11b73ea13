#![allow(dead_code)]

use atrius_fhir_model::PrecisionInstant;
use atrius_fhir_model::r4::{
    Code, FhirString, Identifier, Instant, Reference, Slot, SlotBuilder, Uri,
};
use chrono::{TimeDelta, TimeZone, Utc};

pub fn string(value: &str) -> FhirString {
    FhirString::of(value).unwrap()
}

pub fn code(value: &str) -> Code {
    Code::of(value).unwrap()
}

pub fn uri(value: &str) -> Uri {
    Uri::of(value).unwrap()
}

pub fn reference(target: &str) -> Reference {
    Reference::builder().reference(string(target)).build().unwrap()
}

pub fn identifier(system: &str, value: &str) -> Identifier {
    Identifier::builder()
        .system(uri(system))
        .value(string(value))
        .build()
        .unwrap()
}

/// 2024-01-01T09:00:00Z
pub fn t0() -> Instant {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    Instant::of(PrecisionInstant::from_utc(start)).unwrap()
}

/// 2024-01-01T09:30:00Z
pub fn t0_plus_30_minutes() -> Instant {
    let end = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + TimeDelta::minutes(30);
    Instant::of(PrecisionInstant::from_utc(end)).unwrap()
}

/// A slot from T0 to T0+30min.
pub fn slot_with(schedule: Reference, status: Code) -> SlotBuilder {
    Slot::builder_with(schedule, status, t0(), t0_plus_30_minutes())
}

/// A free slot on `Schedule/example` from T0 to T0+30min.
pub fn slot_builder() -> SlotBuilder {
    slot_with(reference("Schedule/example"), code("free"))
}
