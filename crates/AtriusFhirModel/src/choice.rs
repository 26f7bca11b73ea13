//! Choice elements (`value[x]`, `occurrence[x]`, ...).
//!
//! Builders accept a choice value as a [`DataValue`], whatever its type. At
//! `build()` the value is narrowed into the field's own enum through
//! [`ChoiceElement::try_from_value`], which rejects any type outside the
//! declared alternatives. The built instance therefore only ever holds one of
//! the alternatives, and the active one is the enum variant itself.

use crate::error::{ConstructionError, Result};
use crate::r4::*;
use crate::visitor::Visitable;

macro_rules! data_types {
    ($($variant:ident($ty:ty) => $fhir:literal,)*) => {
        /// Every data type a choice element may hold.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum DataType {
            $($variant,)*
        }

        impl DataType {
            pub const ALL: &'static [DataType] = &[$(DataType::$variant,)*];

            /// Name used as the suffix of a choice element (`DateTime`, `String`).
            pub fn name(&self) -> &'static str {
                match self {
                    $(DataType::$variant => stringify!($variant),)*
                }
            }

            /// FHIR type code (`dateTime`, `string`, `Period`).
            pub fn fhir_type(&self) -> &'static str {
                match self {
                    $(DataType::$variant => $fhir,)*
                }
            }

            pub fn from_name(name: &str) -> Option<DataType> {
                match name {
                    $(stringify!($variant) => Some(DataType::$variant),)*
                    _ => None,
                }
            }
        }

        /// A value of any data type.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum DataValue {
            $($variant($ty),)*
        }

        impl DataValue {
            pub fn data_type(&self) -> DataType {
                match self {
                    $(DataValue::$variant(_) => DataType::$variant,)*
                }
            }

            pub fn as_visitable(&self) -> &dyn Visitable {
                match self {
                    $(DataValue::$variant(value) => value,)*
                }
            }
        }

        $(
            impl From<$ty> for DataValue {
                fn from(value: $ty) -> Self {
                    DataValue::$variant(value)
                }
            }

            // Required choice arguments of `builder_with` take `Into<Option<DataValue>>`.
            impl From<$ty> for Option<DataValue> {
                fn from(value: $ty) -> Self {
                    Some(DataValue::$variant(value))
                }
            }
        )*
    };
}

data_types! {
    Boolean(Boolean) => "boolean",
    Integer(Integer) => "integer",
    PositiveInt(PositiveInt) => "positiveInt",
    Decimal(Decimal) => "decimal",
    String(FhirString) => "string",
    Code(Code) => "code",
    Id(Id) => "id",
    Uri(Uri) => "uri",
    Canonical(Canonical) => "canonical",
    Markdown(Markdown) => "markdown",
    Date(Date) => "date",
    DateTime(DateTime) => "dateTime",
    Instant(Instant) => "instant",
    Coding(Coding) => "Coding",
    CodeableConcept(CodeableConcept) => "CodeableConcept",
    Identifier(Identifier) => "Identifier",
    Reference(Reference) => "Reference",
    Period(Period) => "Period",
    Quantity(Quantity) => "Quantity",
    Duration(Duration) => "Duration",
    Range(Range) => "Range",
    Ratio(Ratio) => "Ratio",
    Timing(Timing) => "Timing",
    ContactPoint(ContactPoint) => "ContactPoint",
    HumanName(HumanName) => "HumanName",
    Annotation(Annotation) => "Annotation",
    Meta(Meta) => "Meta",
}

/// A per-field enum over the declared alternatives of one choice element.
///
/// Implemented by `#[derive(FhirChoice)]`; variants are named after the
/// [`DataType`] they hold.
pub trait ChoiceElement: Sized {
    const ALTERNATIVES: &'static [DataType];
    const TYPE_NAMES: &'static [&'static str];

    /// Narrows a runtime-typed value into this field's alternatives.
    fn try_from_value(field: &'static str, value: DataValue) -> Result<Self>;

    fn into_value(self) -> DataValue;

    fn data_type(&self) -> DataType;

    fn as_visitable(&self) -> &dyn Visitable;

    fn is<T: Visitable>(&self) -> bool {
        self.as_visitable().is::<T>()
    }

    fn as_type<T: Visitable>(&self) -> Option<&T> {
        self.as_visitable().downcast_ref::<T>()
    }

    /// Error for a value outside `ALTERNATIVES`.
    fn invalid_type(field: &'static str, value: &DataValue) -> ConstructionError {
        ConstructionError::InvalidChoiceType {
            field,
            actual: value.data_type().name(),
            allowed: Self::TYPE_NAMES.to_vec(),
        }
    }
}
