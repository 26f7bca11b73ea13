//! Installs a process-wide configuration, so it runs as its own test binary.

mod common;

use atrius_fhir_model::r4::FhirString;
use atrius_fhir_model::{ErrorKind, ModelConfig};
use common::{code, reference, slot_with};

fn patient_slot() -> atrius_fhir_model::r4::SlotBuilder {
    slot_with(reference("Patient/1"), code("free"))
}

#[test]
fn installed_config_relaxes_checks() {
    assert!(ModelConfig::current().check_reference_types);
    let err = patient_slot().build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidReferenceType);

    let relaxed = ModelConfig::from_json_str(
        r#"{ "checkReferenceTypes": false, "checkControlChars": false }"#,
    )
    .unwrap();
    let previous = ModelConfig::install(relaxed);

    let slot = patient_slot().build().unwrap();
    assert!(slot.schedule().reference().is_some());
    assert!(FhirString::of("bell\u{7}").is_ok());
    assert!(FhirString::of("a\u{2028}b").is_err());

    // checks that do not depend on the configuration still apply
    assert_eq!(
        slot_with(reference("Schedule/1"), code("maybe")).build().unwrap_err().kind(),
        ErrorKind::InvalidValue
    );

    ModelConfig::install((*previous).clone());
    assert_eq!(*ModelConfig::current(), ModelConfig::default());
    assert!(patient_slot().build().is_err());
}
