use crate::element::ElementBase;
use crate::r4::{Code, CodeableConcept, DateTime, Decimal, Duration, Period, PositiveInt, Range};
use crate::{FhirChoice, FhirModel, HashMemo};

/// An event that may occur multiple times: explicit `event` times and/or a
/// `repeat` rule, optionally summarised by a `code` (`BID`, `Q4H`).
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct Timing {
    #[fhir(base)]
    base: ElementBase,
    event: Vec<DateTime>,
    repeat: Option<TimingRepeat>,
    code: Option<CodeableConcept>,
    hash: HashMemo,
}

/// When the event is to occur.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(name = "Timing.Repeat", value_or_children)]
#[fhir_invariant(
    key = "tim-1",
    human = "if there's a duration, there needs to be duration units",
    rule = "duration_has_unit"
)]
#[fhir_invariant(
    key = "tim-2",
    human = "if there's a period, there needs to be period units",
    rule = "period_has_unit"
)]
#[fhir_invariant(
    key = "tim-4",
    human = "duration SHALL be a non-negative value",
    rule = "duration_not_negative"
)]
#[fhir_invariant(
    key = "tim-5",
    human = "period SHALL be a non-negative value",
    rule = "period_not_negative"
)]
pub struct TimingRepeat {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(choice)]
    bounds: Option<TimingRepeatBounds>,
    count: Option<PositiveInt>,
    count_max: Option<PositiveInt>,
    duration: Option<Decimal>,
    duration_max: Option<Decimal>,
    #[fhir(codes = "s|min|h|d|wk|mo|a")]
    duration_unit: Option<Code>,
    frequency: Option<PositiveInt>,
    frequency_max: Option<PositiveInt>,
    period: Option<Decimal>,
    period_max: Option<Decimal>,
    #[fhir(codes = "s|min|h|d|wk|mo|a")]
    period_unit: Option<Code>,
    #[fhir(codes = "mon|tue|wed|thu|fri|sat|sun")]
    day_of_week: Vec<Code>,
    when: Vec<Code>,
    hash: HashMemo,
}

/// `Timing.repeat.bounds[x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirChoice)]
pub enum TimingRepeatBounds {
    Duration(Duration),
    Range(Range),
    Period(Period),
}

fn not_negative(value: &Option<Decimal>) -> bool {
    value
        .as_ref()
        .and_then(|d| d.value())
        .is_none_or(|d| !d.is_sign_negative())
}

fn duration_has_unit(repeat: &TimingRepeat) -> bool {
    repeat.duration.is_none() || repeat.duration_unit.is_some()
}

fn period_has_unit(repeat: &TimingRepeat) -> bool {
    repeat.period.is_none() || repeat.period_unit.is_some()
}

fn duration_not_negative(repeat: &TimingRepeat) -> bool {
    not_negative(&repeat.duration)
}

fn period_not_negative(repeat: &TimingRepeat) -> bool {
    not_negative(&repeat.period)
}
