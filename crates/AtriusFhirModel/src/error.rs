use thiserror::Error;

/// Result alias used by every builder and validation helper.
pub type Result<T, E = ConstructionError> = std::result::Result<T, E>;

/// Fieldless view of [`ConstructionError`], handy for matching in callers
/// that only care about the category of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingRequiredField,
    InvalidChoiceType,
    StructuralEmptiness,
    ConstraintViolation,
    InvalidValue,
    InvalidReferenceType,
    Prohibited,
}

/// Failure raised by `build()`. No instance exists when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// A required scalar is absent, or a required list is empty.
    #[error("Missing required element: '{field}'")]
    MissingRequiredField { field: &'static str },

    /// A choice element received a value whose type is not one of the declared alternatives.
    #[error("Invalid type: {actual} for choice element: '{field}' must be one of: [{}]", .allowed.join(", "))]
    InvalidChoiceType {
        field: &'static str,
        actual: &'static str,
        allowed: Vec<&'static str>,
    },

    /// ele-1: an element with neither a value nor any child content.
    #[error("ele-1: All FHIR elements must have a @value or children ({type_name})")]
    StructuralEmptiness { type_name: &'static str },

    /// A named cross-field rule declared on the type was not met.
    #[error("{key}: {description} (location: {location})")]
    ConstraintViolation {
        key: &'static str,
        description: &'static str,
        location: &'static str,
    },

    /// A primitive value is malformed or outside its binding.
    #[error("Invalid value for element: '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },

    /// A literal reference names a resource type the field does not allow.
    #[error("Invalid reference type: '{reference}' for element: '{field}' must be one of: [{}]", .allowed.join(", "))]
    InvalidReferenceType {
        field: &'static str,
        reference: String,
        allowed: Vec<&'static str>,
    },

    /// The type named by a literal reference disagrees with `Reference.type`.
    #[error("Resource type found in reference value: '{reference}' for element: '{field}' does not match Reference.type: {type_name}")]
    ReferenceTypeMismatch {
        field: &'static str,
        reference: String,
        type_name: String,
    },

    #[error("Element: '{field}' is prohibited")]
    Prohibited { field: &'static str },
}

impl ConstructionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            Self::InvalidChoiceType { .. } => ErrorKind::InvalidChoiceType,
            Self::StructuralEmptiness { .. } => ErrorKind::StructuralEmptiness,
            Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::InvalidReferenceType { .. } | Self::ReferenceTypeMismatch { .. } => {
                ErrorKind::InvalidReferenceType
            }
            Self::Prohibited { .. } => ErrorKind::Prohibited,
        }
    }

    /// The offending field name, when the failure is tied to a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequiredField { field }
            | Self::InvalidChoiceType { field, .. }
            | Self::InvalidValue { field, .. }
            | Self::InvalidReferenceType { field, .. }
            | Self::ReferenceTypeMismatch { field, .. }
            | Self::Prohibited { field } => Some(field),
            Self::StructuralEmptiness { .. } | Self::ConstraintViolation { .. } => None,
        }
    }

    pub(crate) fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ConstructionError::MissingRequiredField { field: "status" };
        assert_eq!(err.to_string(), "Missing required element: 'status'");
        assert_eq!(err.field(), Some("status"));

        let err = ConstructionError::InvalidChoiceType {
            field: "occurrence",
            actual: "String",
            allowed: vec!["DateTime", "Period", "Timing"],
        };
        assert_eq!(
            err.to_string(),
            "Invalid type: String for choice element: 'occurrence' must be one of: [DateTime, Period, Timing]"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidChoiceType);
    }
}
