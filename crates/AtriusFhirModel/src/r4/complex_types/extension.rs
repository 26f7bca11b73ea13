use crate::element::{ElementBase, HasExtensions};
use crate::r4::{
    Boolean, Canonical, Code, CodeableConcept, Coding, Date, DateTime, Decimal, FhirString,
    Identifier, Instant, Integer, Period, Quantity, Reference, Uri,
};
use crate::{FhirChoice, FhirModel, HashMemo};

/// Additional content defined by implementations, identified by `url`.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
#[fhir_invariant(
    key = "ext-1",
    human = "Must have either extensions or value[x], not both",
    rule = "extensions_or_value"
)]
pub struct Extension {
    #[fhir(base)]
    base: ElementBase,
    /// Identifies the meaning of the extension.
    #[fhir(primitive, check = "check_uri")]
    url: String,
    #[fhir(choice)]
    value: Option<ExtensionValue>,
    hash: HashMemo,
}

/// `Extension.value[x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirChoice)]
pub enum ExtensionValue {
    Boolean(Boolean),
    Integer(Integer),
    Decimal(Decimal),
    String(FhirString),
    Code(Code),
    Uri(Uri),
    Canonical(Canonical),
    Date(Date),
    DateTime(DateTime),
    Instant(Instant),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Identifier(Identifier),
    Reference(Reference),
    Period(Period),
    Quantity(Quantity),
}

fn extensions_or_value(ext: &Extension) -> bool {
    ext.extension().is_empty() != ext.value.is_none()
}
