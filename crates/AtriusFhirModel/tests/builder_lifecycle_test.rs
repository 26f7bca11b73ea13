mod common;

use std::collections::HashSet;

use atrius_fhir_model::prelude::*;
use atrius_fhir_model::r4::{Boolean, Code, Instant, Organization, Reference, Slot, SlotBuilder};
use atrius_fhir_model::{ConstructionError, ErrorKind};
use common::{code, identifier, reference, slot_builder, string, t0, t0_plus_30_minutes};

#[test]
fn slot_end_to_end() {
    // status omitted
    let err = Slot::builder_with(reference("Schedule/example"), None::<Code>, t0(), t0_plus_30_minutes())
        .build()
        .unwrap_err();
    assert_eq!(err, ConstructionError::MissingRequiredField { field: "status" });
    assert_eq!(err.to_string(), "Missing required element: 'status'");

    let slot = slot_builder().build().unwrap();
    assert_eq!(slot.status().value().map(String::as_str), Some("free"));
    assert_eq!(
        slot.start().value().map(|v| v.original_string()),
        Some("2024-01-01T09:00:00Z")
    );
    assert_eq!(
        slot.end().value().map(|v| v.original_string()),
        Some("2024-01-01T09:30:00Z")
    );

    let commented = slot.to_builder().comment(string("test")).build().unwrap();
    assert_eq!(
        commented.comment().and_then(|c| c.value()).map(String::as_str),
        Some("test")
    );
    assert_eq!(commented.schedule(), slot.schedule());
    assert_eq!(commented.status(), slot.status());
    assert_eq!(commented.start(), slot.start());
    assert_eq!(commented.end(), slot.end());
    assert_eq!(slot.comment(), None);
    assert_ne!(slot, commented);

    // two independent builds of the same values
    let again = slot_builder().build().unwrap();
    assert_eq!(slot, again);
    assert_eq!(slot.hash_code(), again.hash_code());
}

#[test]
fn to_builder_round_trips() {
    let slot = slot_builder()
        .id("slot-1")
        .identifier([identifier("urn:ietf:rfc:3986", "a"), identifier("urn:ietf:rfc:3986", "b")])
        .comment(string("walk-in"))
        .build()
        .unwrap();

    let copy = slot.to_builder().build().unwrap();
    assert_eq!(copy, slot);
    assert_eq!(copy.hash_code(), slot.hash_code());
    assert_eq!(copy.id(), Some("slot-1"));

    let from = SlotBuilder::from(&slot).build().unwrap();
    assert_eq!(from, slot);

    let set: HashSet<Slot> = [slot, copy, from].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn build_is_repeatable() {
    let builder = slot_builder().comment(string("x"));
    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_required_field_is_reported() {
    let schedule = || Some(reference("Schedule/example"));
    let cases: [(&str, SlotBuilder); 5] = [
        ("schedule", Slot::builder()),
        (
            "schedule",
            Slot::builder_with(None::<Reference>, code("free"), t0(), t0_plus_30_minutes()),
        ),
        (
            "status",
            Slot::builder_with(schedule(), None::<Code>, t0(), t0_plus_30_minutes()),
        ),
        (
            "start",
            Slot::builder_with(schedule(), code("free"), None::<Instant>, t0_plus_30_minutes()),
        ),
        (
            "end",
            Slot::builder_with(schedule(), code("free"), t0(), None::<Instant>),
        ),
    ];
    for (field, builder) in cases {
        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.field(), Some(field));
    }
}

#[test]
fn required_fields_are_fixed_when_the_builder_is_created() {
    let builder = slot_builder().comment(string("walk-in")).overbooked(Boolean::of(false).unwrap());
    let slot = builder.build().unwrap();
    assert_eq!(slot.status(), &code("free"));
    assert_eq!(slot.schedule(), &reference("Schedule/example"));

    // changing a required field means deriving a new builder
    let busy = slot
        .to_builder_with(slot.schedule().clone(), code("busy"), slot.start().clone(), slot.end().clone())
        .build()
        .unwrap();
    assert_eq!(busy.status(), &code("busy"));
    assert_eq!(busy.comment(), slot.comment());
    assert_eq!(busy.overbooked(), slot.overbooked());
    assert_eq!(slot.status(), &code("free"));

    let err = slot
        .to_builder_with(slot.schedule().clone(), None::<Code>, t0(), t0_plus_30_minutes())
        .build()
        .unwrap_err();
    assert_eq!(err, ConstructionError::MissingRequiredField { field: "status" });
}

#[test]
fn repeated_setters_append_or_replace() {
    let a = identifier("urn:test", "a");
    let b = identifier("urn:test", "b");

    let appended = slot_builder()
        .identifier([a.clone()])
        .identifier([b.clone()])
        .build()
        .unwrap();
    assert_eq!(appended.identifier(), [a.clone(), b.clone()]);

    let replaced = slot_builder()
        .set_identifier([a.clone()])
        .set_identifier([b.clone()])
        .build()
        .unwrap();
    assert_eq!(replaced.identifier(), [b.clone()]);

    // replace keeps the order of the given collection
    let ordered = slot_builder()
        .identifier([a.clone()])
        .set_identifier(vec![b.clone(), a.clone()])
        .build()
        .unwrap();
    assert_eq!(ordered.identifier(), [b, a]);
}

#[test]
fn editing_a_copy_leaves_the_source_alone() {
    let a = identifier("urn:test", "a");
    let b = identifier("urn:test", "b");
    let original = slot_builder().identifier([a.clone()]).build().unwrap();
    let hash_before = original.hash_code();

    let appended = original.to_builder().identifier([b.clone()]).build().unwrap();
    let replaced = original.to_builder().set_identifier([b.clone()]).build().unwrap();

    assert_eq!(original.identifier(), [a.clone()]);
    assert_eq!(appended.identifier(), [a, b.clone()]);
    assert_eq!(replaced.identifier(), [b]);
    assert_eq!(original.hash_code(), hash_before);
}

#[test]
fn inherited_fields_take_part_in_equality() {
    let plain = slot_builder().build().unwrap();
    let with_id = slot_builder().id("slot-1").build().unwrap();
    let with_language = slot_builder().language(code("en")).build().unwrap();
    assert_ne!(plain, with_id);
    assert_ne!(plain, with_language);
    assert_ne!(with_id, with_language);
    assert_eq!(with_language.language(), Some(&code("en")));
}

#[test]
fn resource_ids_are_checked() {
    let err = slot_builder().id("not an id").build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(err.field(), Some("id"));
}

#[test]
fn contained_resources_are_owned_copies() {
    let org = Organization::builder().name(string("Acme")).build().unwrap();
    let slot = slot_builder().contained([org.clone()]).build().unwrap();
    assert_eq!(slot.contained().len(), 1);
    assert_eq!(slot.contained()[0].resource_type(), "Organization");

    let replaced = slot.to_builder().set_contained(Vec::<Organization>::new()).build().unwrap();
    assert!(replaced.contained().is_empty());
    assert_eq!(slot.contained().len(), 1);
}
