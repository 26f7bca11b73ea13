mod common;

use atrius_fhir_model::prelude::*;
use atrius_fhir_model::r4::{
    Annotation, AnnotationAuthor, Boolean, CodeableConcept, DateTime, Extension, Markdown,
    MedicationIngredient, MedicationIngredientItem, Period, ServiceRequest,
    ServiceRequestBuilder, ServiceRequestOccurrence, Timing,
};
use atrius_fhir_model::{ConstructionError, DataType, DataValue, ErrorKind, model_support};
use common::{code, reference, string};

fn request() -> ServiceRequestBuilder {
    ServiceRequest::builder_with(code("active"), code("order"), reference("Patient/example"))
}

fn date_time(value: &str) -> DateTime {
    DateTime::parse(value).unwrap()
}

#[test]
fn occurrence_accepts_each_alternative() {
    let on_date = request().occurrence(date_time("2024-03-01")).build().unwrap();
    let occurrence = on_date.occurrence().unwrap();
    assert!(matches!(occurrence, ServiceRequestOccurrence::DateTime(_)));
    assert!(occurrence.is::<DateTime>());
    assert!(!occurrence.is::<Period>());
    assert_eq!(occurrence.as_type::<DateTime>(), Some(&date_time("2024-03-01")));
    assert_eq!(occurrence.data_type(), DataType::DateTime);

    let period = Period::builder()
        .start(date_time("2024-03-01"))
        .end(date_time("2024-03-08"))
        .build()
        .unwrap();
    let over_period = request().occurrence(period.clone()).build().unwrap();
    assert_eq!(
        over_period.occurrence(),
        Some(&ServiceRequestOccurrence::Period(period))
    );

    let timing = Timing::builder()
        .event([date_time("2024-03-01"), date_time("2024-03-02")])
        .build()
        .unwrap();
    let on_schedule = request().occurrence(timing).build().unwrap();
    assert!(on_schedule.occurrence().is_some_and(|o| o.is::<Timing>()));
}

#[test]
fn occurrence_rejects_other_types() {
    let err = request().occurrence(string("tomorrow")).build().unwrap_err();
    assert_eq!(
        err,
        ConstructionError::InvalidChoiceType {
            field: "occurrence",
            actual: "String",
            allowed: vec!["DateTime", "Period", "Timing"],
        }
    );
    assert_eq!(
        err.to_string(),
        "Invalid type: String for choice element: 'occurrence' must be one of: [DateTime, Period, Timing]"
    );
}

#[test]
fn optional_choice_may_be_absent() {
    let request = request().build().unwrap();
    assert_eq!(request.occurrence(), None);
    assert_eq!(request.as_needed(), None);
}

#[test]
fn choice_survives_to_builder() {
    let original = request()
        .occurrence(date_time("2024-03-01T10:00:00+01:00"))
        .as_needed(Boolean::of(true).unwrap())
        .build()
        .unwrap();
    let copy = original.to_builder().build().unwrap();
    assert_eq!(copy, original);
    assert!(copy.as_needed().is_some_and(|v| v.is::<Boolean>()));

    // the later value wins
    let moved = original
        .to_builder()
        .occurrence(date_time("2024-04-01"))
        .build()
        .unwrap();
    assert_eq!(
        moved.occurrence().and_then(|o| o.as_type::<DateTime>()),
        Some(&date_time("2024-04-01"))
    );
}

#[test]
fn required_choice_must_be_present() {
    let err = MedicationIngredient::builder().build().unwrap_err();
    assert_eq!(err, ConstructionError::MissingRequiredField { field: "item" });

    let err = MedicationIngredient::builder_with(None::<DataValue>).build().unwrap_err();
    assert_eq!(err, ConstructionError::MissingRequiredField { field: "item" });

    let by_reference = MedicationIngredient::builder_with(reference("Substance/example"))
        .build()
        .unwrap();
    assert!(matches!(by_reference.item(), MedicationIngredientItem::Reference(_)));

    let coded = CodeableConcept::builder().text(string("aspirin")).build().unwrap();
    let by_code = MedicationIngredient::builder_with(coded.clone()).build().unwrap();
    assert_eq!(by_code.item(), &MedicationIngredientItem::CodeableConcept(coded));

    let err = MedicationIngredient::builder_with(Boolean::of(true).unwrap())
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidChoiceType);
    assert_eq!(err.field(), Some("item"));
}

#[test]
fn annotation_author_is_reference_or_string() {
    let text = Markdown::of("Patient prefers mornings").unwrap();
    let by_name = Annotation::builder_with(text.clone())
        .author(string("Dr. Adams"))
        .build()
        .unwrap();
    assert!(matches!(by_name.author(), Some(AnnotationAuthor::String(_))));

    let err = Annotation::builder_with(text)
        .author(code("adams"))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidChoiceType);
}

#[test]
fn extension_values() {
    let flag = Extension::builder_with("http://example.org/fhir/StructureDefinition/flag".to_string())
        .value(Boolean::of(true).unwrap())
        .build()
        .unwrap();
    assert_eq!(flag.url(), "http://example.org/fhir/StructureDefinition/flag");
    assert_eq!(flag.value().map(|v| v.data_type()), Some(DataType::Boolean));

    let timing = Timing::builder().event([date_time("2024-01-01")]).build().unwrap();
    let err = Extension::builder_with("http://example.org/fhir/StructureDefinition/when".to_string())
        .value(timing)
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidChoiceType);
}

#[test]
fn data_values_know_their_type() {
    let value = DataValue::from(date_time("2024"));
    assert_eq!(value.data_type(), DataType::DateTime);
    assert_eq!(value.data_type().name(), "DateTime");
    assert_eq!(value.data_type().fhir_type(), "dateTime");
    assert_eq!(value.as_visitable().type_name(), "dateTime");
    assert_eq!(DataType::from_name("Period"), Some(DataType::Period));
    assert_eq!(DataType::from_name("Patient"), None);

    let occurrence = ServiceRequestOccurrence::from(date_time("2024"));
    assert_eq!(DataValue::from(occurrence), value);
}

#[test]
fn choice_declarations_are_discoverable() {
    assert!(model_support::is_choice_field("ServiceRequest", "occurrence"));
    assert_eq!(
        model_support::choice_types("ServiceRequest", "quantity"),
        ["Quantity", "Ratio", "Range"]
    );
    assert_eq!(
        model_support::choice_types("Medication.Ingredient", "item"),
        ["CodeableConcept", "Reference"]
    );
    assert_eq!(
        model_support::choice_field_name("asNeeded", DataType::CodeableConcept.name()),
        "asNeededCodeableConcept"
    );
}
