//! Construction-time checks run by every builder's `build()`.
//!
//! Each helper either passes its input through or returns the
//! [`ConstructionError`] describing the first problem found. A failing check
//! aborts the build, so no invalid instance ever exists.

use crate::choice::{ChoiceElement, DataValue};
use crate::config::ModelConfig;
use crate::error::{ConstructionError, Result};
use crate::model_support;
use crate::r4::{Code, Quantity, Reference};
use crate::visitor::Visitable;

pub const MAX_STRING_LENGTH: usize = 1_048_576;
const MAX_ID_LENGTH: usize = 64;

/// Severity of a declared type-level rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A violation aborts the build.
    Error,
    /// A violation is logged; the build succeeds.
    Warning,
}

/// A named cross-field rule evaluated against a fully built instance.
pub struct Constraint<T> {
    pub key: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub location: &'static str,
    pub rule: fn(&T) -> bool,
}

impl<T> Clone for Constraint<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Constraint<T> {}

impl<T> std::fmt::Debug for Constraint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Constraint")
            .field("key", &self.key)
            .field("severity", &self.severity)
            .field("description", &self.description)
            .field("location", &self.location)
            .finish()
    }
}

pub fn require_non_null<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(ConstructionError::MissingRequiredField { field })
}

/// A required list: present and holding at least one entry.
pub fn require_non_empty<T>(values: Vec<T>, field: &'static str) -> Result<Vec<T>> {
    if values.is_empty() {
        return Err(ConstructionError::MissingRequiredField { field });
    }
    Ok(values)
}

/// A required choice element: present and of one of the declared types.
pub fn require_choice_element<C: ChoiceElement>(
    value: Option<DataValue>,
    field: &'static str,
) -> Result<C> {
    C::try_from_value(field, require_non_null(value, field)?)
}

/// An optional choice element: absent, or of one of the declared types.
pub fn choice_element<C: ChoiceElement>(
    value: Option<DataValue>,
    field: &'static str,
) -> Result<Option<C>> {
    value.map(|value| C::try_from_value(field, value)).transpose()
}

pub fn prohibited<T>(value: Option<&T>, field: &'static str) -> Result<()> {
    match value {
        Some(_) => Err(ConstructionError::Prohibited { field }),
        None => Ok(()),
    }
}

/// ele-1: a node must carry a value or at least one child.
pub fn require_value_or_children(node: &dyn Visitable) -> Result<()> {
    if node.has_value() || node.has_children() {
        Ok(())
    } else {
        Err(ConstructionError::StructuralEmptiness {
            type_name: node.type_name(),
        })
    }
}

/// Runs `constraints` against `instance`: error rules abort, warning rules are logged.
pub fn check_constraints<T>(instance: &T, type_name: &'static str, constraints: &[Constraint<T>]) -> Result<()> {
    for constraint in constraints {
        if (constraint.rule)(instance) {
            continue;
        }
        match constraint.severity {
            Severity::Error => {
                return Err(ConstructionError::ConstraintViolation {
                    key: constraint.key,
                    description: constraint.description,
                    location: constraint.location,
                });
            }
            Severity::Warning => {
                tracing::warn!(
                    type_name,
                    key = constraint.key,
                    location = constraint.location,
                    "{}",
                    constraint.description
                );
            }
        }
    }
    Ok(())
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

/// string: bounded length, not blank, whitespace limited to space, tab, CR
/// and LF, and free of control characters when configured.
pub fn check_string(value: &str, field: &'static str, config: &ModelConfig) -> Result<()> {
    if value.len() > MAX_STRING_LENGTH {
        return Err(ConstructionError::invalid_value(
            field,
            format!("length exceeds {MAX_STRING_LENGTH}"),
        ));
    }
    if let Some(ch) = value.chars().find(|ch| ch.is_whitespace() && !is_whitespace(*ch)) {
        return Err(ConstructionError::invalid_value(
            field,
            format!("contains whitespace character U+{:04X}", ch as u32),
        ));
    }
    if value.chars().all(is_whitespace) {
        return Err(ConstructionError::invalid_value(
            field,
            "must contain at least one non-whitespace character",
        ));
    }
    if config.check_control_chars
        && let Some(ch) = value.chars().find(|ch| ch.is_control() && (*ch as u32) < 0x20 && !is_whitespace(*ch))
    {
        return Err(ConstructionError::invalid_value(
            field,
            format!("contains control character U+{:04X}", ch as u32),
        ));
    }
    Ok(())
}

/// code: a string with no leading or trailing whitespace and single inner spaces.
pub fn check_code(value: &str, field: &'static str, config: &ModelConfig) -> Result<()> {
    check_string(value, field, config)?;
    if value.trim() != value {
        return Err(ConstructionError::invalid_value(
            field,
            "must not start or end with whitespace",
        ));
    }
    if value.contains("  ") || value.chars().any(|ch| matches!(ch, '\t' | '\r' | '\n')) {
        return Err(ConstructionError::invalid_value(
            field,
            "only single spaces are allowed inside a code",
        ));
    }
    Ok(())
}

/// id: 1 to 64 characters of `[A-Za-z0-9\-.]`.
pub fn check_id(value: &str, field: &'static str, _config: &ModelConfig) -> Result<()> {
    if value.is_empty() || value.len() > MAX_ID_LENGTH {
        return Err(ConstructionError::invalid_value(
            field,
            format!("length must be between 1 and {MAX_ID_LENGTH}"),
        ));
    }
    if let Some(ch) = value
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '.'))
    {
        return Err(ConstructionError::invalid_value(
            field,
            format!("invalid character '{ch}' in id"),
        ));
    }
    Ok(())
}

/// uri: bounded length and no whitespace.
pub fn check_uri(value: &str, field: &'static str, _config: &ModelConfig) -> Result<()> {
    if value.len() > MAX_STRING_LENGTH {
        return Err(ConstructionError::invalid_value(
            field,
            format!("length exceeds {MAX_STRING_LENGTH}"),
        ));
    }
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConstructionError::invalid_value(
            field,
            "must be non-empty and contain no whitespace",
        ));
    }
    Ok(())
}

pub fn check_min_value(value: i32, min: i32, field: &'static str) -> Result<()> {
    if value < min {
        return Err(ConstructionError::invalid_value(
            field,
            format!("{value} is less than the minimum {min}"),
        ));
    }
    Ok(())
}

/// positiveInt: at least 1.
pub fn check_positive_int(value: &i32, field: &'static str, _config: &ModelConfig) -> Result<()> {
    check_min_value(*value, 1, field)
}

/// A required binding to a fixed list of codes. A code carrying only
/// extensions passes.
pub fn check_code_binding(code: &Code, field: &'static str, allowed: &[&str]) -> Result<()> {
    match code.value() {
        Some(value) if !allowed.contains(&value.as_str()) => Err(ConstructionError::invalid_value(
            field,
            format!("code '{value}' is not one of: [{}]", allowed.join(", ")),
        )),
        _ => Ok(()),
    }
}

/// SimpleQuantity: a quantity whose `comparator` is prohibited.
pub fn check_simple_quantity(quantity: &Quantity, _field: &'static str, _config: &ModelConfig) -> Result<()> {
    prohibited(quantity.comparator(), "comparator")
}

/// A URI scheme prefix followed by something (`urn:uuid:..`, `https://..`).
fn has_scheme(literal: &str) -> bool {
    matches!(literal.find(':'), Some(index) if index > 0 && literal.len() > index + 1)
}

fn is_reference_id(segment: &str) -> bool {
    (1..=MAX_ID_LENGTH).contains(&segment.len())
        && segment.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
}

/// The type of a relative literal: `Type/id` or `Type/id/_history/vid`.
fn relative_reference_type(literal: &str) -> Option<&str> {
    let mut segments = literal.split('/');
    let type_name = segments.next()?;
    let id = segments.next()?;
    let versioned = match (segments.next(), segments.next(), segments.next()) {
        (None, _, _) => true,
        (Some("_history"), Some(version), None) => is_reference_id(version),
        _ => false,
    };
    (versioned && is_reference_id(id)).then_some(type_name)
}

/// Checks the resource types a reference names against `allowed`.
///
/// A relative literal (`Type/id`, `Type/id/_history/vid`) or a conditional
/// one (`Type?query`) must name a known resource type that `allowed` lists.
/// So must `Reference.type`, and when both are given they must agree.
/// Fragments (`#x`) and literals with a URI scheme are not checked.
/// `Resource` in `allowed` admits every known type.
pub fn check_reference_type(
    reference: &Reference,
    field: &'static str,
    allowed: &[&'static str],
    config: &ModelConfig,
) -> Result<()> {
    if !config.check_reference_types {
        return Ok(());
    }
    let admits = |type_name: &str| {
        model_support::is_resource_type(type_name)
            && allowed.iter().any(|a| *a == type_name || *a == "Resource")
    };
    let invalid = |reference: &str| ConstructionError::InvalidReferenceType {
        field,
        reference: reference.to_string(),
        allowed: allowed.to_vec(),
    };

    let literal = reference
        .reference()
        .and_then(|s| s.value())
        .filter(|literal| !literal.starts_with('#') && !has_scheme(literal.as_str()));
    let mut literal_type = None;
    if let Some(literal) = literal {
        let type_name = match literal.split_once('?') {
            Some((type_name, _query)) => Some(type_name),
            None => relative_reference_type(literal),
        };
        match type_name {
            Some(type_name) if admits(type_name) => literal_type = Some(type_name),
            _ => return Err(invalid(literal.as_str())),
        }
    }

    if let Some(type_name) = reference.r#type().and_then(|uri| uri.value()) {
        if !admits(type_name.as_str()) {
            return Err(invalid(type_name.as_str()));
        }
        if let (Some(literal), Some(literal_type)) = (literal, literal_type)
            && literal_type != type_name.as_str()
        {
            return Err(ConstructionError::ReferenceTypeMismatch {
                field,
                reference: literal.to_string(),
                type_name: type_name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn config() -> ModelConfig {
        ModelConfig::default()
    }

    #[test]
    fn required_helpers() {
        assert_eq!(require_non_null(Some(3), "count"), Ok(3));
        let err = require_non_null::<i32>(None, "count").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.field(), Some("count"));

        let err = require_non_empty(Vec::<i32>::new(), "ingredient").unwrap_err();
        assert_eq!(err, ConstructionError::MissingRequiredField { field: "ingredient" });
        assert_eq!(require_non_empty(vec![1], "ingredient"), Ok(vec![1]));
        assert_eq!(prohibited(Some(&1), "x").unwrap_err().kind(), ErrorKind::Prohibited);
    }

    #[test]
    fn strings() {
        assert!(check_string("hello world", "f", &config()).is_ok());
        assert!(check_string("   ", "f", &config()).is_err());
        assert!(check_string("bell\u{7}", "f", &config()).is_err());
        let relaxed = ModelConfig {
            check_control_chars: false,
            ..ModelConfig::default()
        };
        assert!(check_string("bell\u{7}", "f", &relaxed).is_ok());
        assert!(check_string("line\nbreak", "f", &config()).is_ok());
    }

    #[test]
    fn strings_allow_only_ascii_whitespace() {
        let relaxed = ModelConfig {
            check_control_chars: false,
            ..ModelConfig::default()
        };
        for text in ["a\u{2028}b", "a\u{3000}b", "a\u{A0}b", "vertical\u{B}tab", "form\u{C}feed"] {
            for config in [config(), relaxed.clone()] {
                let err = check_string(text, "f", &config).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::InvalidValue, "{text:?}");
                assert!(err.to_string().contains("whitespace character"), "{err}");
            }
        }
        assert!(check_string(" tab\tcr\rlf\n ", "f", &relaxed).is_ok());
    }

    #[test]
    fn reference_literals() {
        assert!(has_scheme("urn:uuid:1"));
        assert!(has_scheme("https://example.org/Patient/1"));
        assert!(has_scheme("mailto:someone@example.org"));
        assert!(!has_scheme("Patient/1"));
        assert!(!has_scheme(":x"));
        assert!(!has_scheme("urn:"));

        assert_eq!(relative_reference_type("Patient/1"), Some("Patient"));
        assert_eq!(relative_reference_type("Patient/1/_history/2"), Some("Patient"));
        assert_eq!(relative_reference_type("Patient"), None);
        assert_eq!(relative_reference_type("Patient/"), None);
        assert_eq!(relative_reference_type("Patient/1/extra"), None);
        assert_eq!(relative_reference_type("Patient/a b"), None);
    }

    #[test]
    fn codes_ids_and_uris() {
        assert!(check_code("entered-in-error", "status", &config()).is_ok());
        assert!(check_code(" free", "status", &config()).is_err());
        assert!(check_code("a  b", "status", &config()).is_err());

        assert!(check_id("abc-123.x", "id", &config()).is_ok());
        assert!(check_id("has space", "id", &config()).is_err());
        assert!(check_id(&"a".repeat(65), "id", &config()).is_err());

        assert!(check_uri("http://example.org/fhir", "url", &config()).is_ok());
        assert!(check_uri("http://exa mple.org", "url", &config()).is_err());

        assert!(check_positive_int(&1, "count", &config()).is_ok());
        assert!(check_positive_int(&0, "count", &config()).is_err());
    }
}
