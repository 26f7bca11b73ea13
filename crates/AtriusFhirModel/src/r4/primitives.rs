//! Primitive data types.
//!
//! Each primitive is an element with an optional raw `value`; an instance
//! without a value must carry an `id` or an extension instead.

use rust_decimal::Decimal as RawDecimal;

use crate::date_time::{PrecisionDate, PrecisionDateTime, PrecisionInstant};
use crate::element::ElementBase;
use crate::error::{ConstructionError, Result};
use crate::{FhirModel, HashMemo};

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "boolean", value_or_children)]
pub struct Boolean {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive)]
    value: Option<bool>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "integer", value_or_children)]
pub struct Integer {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive)]
    value: Option<i32>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "positiveInt", value_or_children)]
pub struct PositiveInt {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive, check = "check_positive_int")]
    value: Option<i32>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "decimal", value_or_children)]
pub struct Decimal {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive)]
    value: Option<RawDecimal>,
    hash: HashMemo,
}

/// The `string` primitive.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "string", value_or_children)]
pub struct FhirString {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive, check = "check_string")]
    value: Option<String>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "code", value_or_children)]
pub struct Code {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive, check = "check_code")]
    value: Option<String>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "id", value_or_children)]
pub struct Id {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive, check = "check_id")]
    value: Option<String>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "uri", value_or_children)]
pub struct Uri {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive, check = "check_uri")]
    value: Option<String>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "canonical", value_or_children)]
pub struct Canonical {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive, check = "check_uri")]
    value: Option<String>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "markdown", value_or_children)]
pub struct Markdown {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive, check = "check_string")]
    value: Option<String>,
    hash: HashMemo,
}

/// Limited XHTML content of a narrative. The markup itself is not parsed.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "xhtml", value_or_children)]
pub struct Xhtml {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive, check = "check_string")]
    value: Option<String>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "date", value_or_children)]
pub struct Date {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive)]
    value: Option<PrecisionDate>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "dateTime", value_or_children)]
pub struct DateTime {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive)]
    value: Option<PrecisionDateTime>,
    hash: HashMemo,
}

#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "primitive", name = "instant", value_or_children)]
pub struct Instant {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(primitive)]
    value: Option<PrecisionInstant>,
    hash: HashMemo,
}

fn unparseable(type_name: &str, text: &str) -> ConstructionError {
    ConstructionError::invalid_value("value", format!("'{text}' is not a valid {type_name}"))
}

impl Date {
    /// Parses `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub fn parse(text: &str) -> Result<Self> {
        let value = PrecisionDate::parse(text).ok_or_else(|| unparseable("date", text))?;
        Self::of(value)
    }
}

impl DateTime {
    /// Parses a partial date or a full date and time with an optional offset.
    pub fn parse(text: &str) -> Result<Self> {
        let value = PrecisionDateTime::parse(text).ok_or_else(|| unparseable("dateTime", text))?;
        Self::of(value)
    }
}

impl Instant {
    /// Parses a date and time with seconds and a zone offset.
    pub fn parse(text: &str) -> Result<Self> {
        let value = PrecisionInstant::parse(text).ok_or_else(|| unparseable("instant", text))?;
        Self::of(value)
    }
}
