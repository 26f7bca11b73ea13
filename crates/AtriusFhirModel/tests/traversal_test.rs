mod common;

use std::convert::Infallible;

use atrius_fhir_model::prelude::*;
use atrius_fhir_model::r4::{
    Coding, CodeableConcept, DateTime, Identifier, Organization, Period, ServiceRequest, Slot, Uri,
};
use atrius_fhir_model::{FieldDescriptor, FieldValue, PrimitiveValue, VisitContext};
use common::{code, identifier, reference, slot_builder, string, uri};

/// Records every callback as a line of text.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    skip_children_of: Option<&'static str>,
    skip: Option<&'static str>,
}

fn label(ctx: &VisitContext) -> String {
    match ctx.index {
        Some(index) => format!("{}[{}]", ctx.name, index),
        None => ctx.name.to_string(),
    }
}

impl Visitor for Recorder {
    type Error = Infallible;

    fn pre_visit(&mut self, node: &dyn Visitable) -> Result<bool, Infallible> {
        if self.skip == Some(node.type_name()) {
            return Ok(false);
        }
        self.events.push(format!("pre {}", node.type_name()));
        Ok(true)
    }

    fn visit_start(&mut self, ctx: &VisitContext, _node: &dyn Visitable) -> Result<(), Infallible> {
        self.events.push(format!("start {}", label(ctx)));
        Ok(())
    }

    fn visit(&mut self, _ctx: &VisitContext, node: &dyn Visitable) -> Result<bool, Infallible> {
        Ok(self.skip_children_of != Some(node.type_name()))
    }

    fn visit_end(&mut self, ctx: &VisitContext, _node: &dyn Visitable) -> Result<(), Infallible> {
        self.events.push(format!("end {}", label(ctx)));
        Ok(())
    }

    fn post_visit(&mut self, node: &dyn Visitable) -> Result<(), Infallible> {
        self.events.push(format!("post {}", node.type_name()));
        Ok(())
    }

    fn visit_list_start(&mut self, field: &FieldDescriptor, len: usize) -> Result<(), Infallible> {
        self.events.push(format!("list {} {}", field.name, len));
        Ok(())
    }

    fn visit_list_end(&mut self, field: &FieldDescriptor) -> Result<(), Infallible> {
        self.events.push(format!("endlist {}", field.name));
        Ok(())
    }

    fn visit_value(&mut self, ctx: &VisitContext, value: PrimitiveValue<'_>) -> Result<(), Infallible> {
        self.events.push(format!("value {}={}", label(ctx), value));
        Ok(())
    }
}

fn record<T: Visitable>(node: &T, recorder: Recorder) -> Vec<String> {
    let mut recorder = recorder;
    node.accept(&mut recorder).unwrap();
    recorder.events
}

#[test]
fn visits_a_node_in_protocol_order() {
    let period = Period::builder()
        .id("p1")
        .start(DateTime::parse("2024-01-01").unwrap())
        .end(DateTime::parse("2024-01-02").unwrap())
        .build()
        .unwrap();

    assert_eq!(
        record(&period, Recorder::default()),
        [
            "pre Period",
            "start Period",
            "value id=p1",
            "pre dateTime",
            "start start",
            "value value=2024-01-01",
            "end start",
            "post dateTime",
            "pre dateTime",
            "start end",
            "value value=2024-01-02",
            "end end",
            "post dateTime",
            "end Period",
            "post Period",
        ]
    );
}

#[test]
fn trait_objects_are_visited_like_concrete_types() {
    let slot = slot_builder().comment(string("walk-in")).build().unwrap();
    let nodes: [&dyn Visitable; 2] = [&slot, &string("loose")];

    let mut through_dyn = Recorder::default();
    nodes[0].accept(&mut through_dyn).unwrap();
    assert_eq!(through_dyn.events, record(&slot, Recorder::default()));

    let mut primitive = Recorder::default();
    nodes[1].accept(&mut primitive).unwrap();
    assert_eq!(primitive.events, ["pre string", "start string", "value value=loose", "end string", "post string"]);
}

#[test]
fn top_level_fields_follow_declaration_order() {
    let slot = slot_builder()
        .id("slot-1")
        .comment(string("walk-in"))
        .identifier([identifier("urn:test", "a"), identifier("urn:test", "b")])
        .build()
        .unwrap();

    #[derive(Default)]
    struct TopLevel(Vec<String>);
    impl Visitor for TopLevel {
        type Error = Infallible;
        fn visit_start(&mut self, ctx: &VisitContext, _node: &dyn Visitable) -> Result<(), Infallible> {
            if ctx.depth == 1 {
                self.0.push(label(ctx));
            }
            Ok(())
        }
        fn visit_value(&mut self, ctx: &VisitContext, _value: PrimitiveValue<'_>) -> Result<(), Infallible> {
            if ctx.depth == 1 {
                self.0.push(label(ctx));
            }
            Ok(())
        }
    }

    let mut first = TopLevel::default();
    slot.accept(&mut first).unwrap();
    assert_eq!(
        first.0,
        [
            "id",
            "identifier[0]",
            "identifier[1]",
            "schedule",
            "status",
            "start",
            "end",
            "comment",
        ]
    );

    // a second, independent traversal sees the same sequence
    assert_eq!(
        record(&slot, Recorder::default()),
        record(&slot, Recorder::default())
    );
}

#[test]
fn field_table_starts_with_inherited_fields() {
    let names: Vec<&str> = Slot::fields().iter().map(|f| f.name).collect();
    assert_eq!(
        &names[..8],
        [
            "id",
            "meta",
            "implicitRules",
            "language",
            "text",
            "contained",
            "extension",
            "modifierExtension",
        ]
    );
    let names: Vec<&str> = Coding::fields().iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        ["id", "extension", "system", "version", "code", "display", "userSelected"]
    );
}

#[test]
fn repeated_fields_are_bracketed() {
    let concept = CodeableConcept::builder()
        .coding([
            Coding::builder().code(code("a")).build().unwrap(),
            Coding::builder().code(code("b")).build().unwrap(),
        ])
        .build()
        .unwrap();

    let events = record(&concept, Recorder::default());
    let list_events: Vec<&str> = events
        .iter()
        .map(String::as_str)
        .filter(|e| e.starts_with("list") || e.starts_with("endlist") || e.starts_with("start coding"))
        .collect();
    assert_eq!(
        list_events,
        ["list coding 2", "start coding[0]", "start coding[1]", "endlist coding"]
    );
}

#[test]
fn visit_false_prunes_children_only() {
    let slot = slot_builder()
        .identifier([identifier("urn:test", "a")])
        .build()
        .unwrap();
    let events = record(
        &slot,
        Recorder {
            skip_children_of: Some("Identifier"),
            ..Recorder::default()
        },
    );

    let start = events.iter().position(|e| e == "start identifier[0]").unwrap();
    assert_eq!(
        events[start..start + 3],
        ["start identifier[0]", "end identifier[0]", "post Identifier"]
    );
    assert!(!events.iter().any(|e| e.contains("system")));
}

#[test]
fn pre_visit_false_skips_the_node() {
    let slot = slot_builder().build().unwrap();
    let events = record(
        &slot,
        Recorder {
            skip: Some("Reference"),
            ..Recorder::default()
        },
    );
    assert!(!events.iter().any(|e| e.contains("schedule")));
    assert!(!events.iter().any(|e| e.contains("Reference")));
    assert!(events.iter().any(|e| e == "start status"));
}

#[test]
fn default_visitor_can_stay_shallow() {
    let slot = slot_builder().build().unwrap();
    slot.accept(&mut DefaultVisitor::new(true)).unwrap();
    slot.accept(&mut DefaultVisitor::new(false)).unwrap();
}

#[test]
fn choice_fields_are_marked_polymorphic() {
    let request = ServiceRequest::builder_with(code("active"), code("order"), reference("Patient/example"))
        .occurrence(DateTime::parse("2024-03-01").unwrap())
        .build()
        .unwrap();

    #[derive(Default)]
    struct Names(Vec<(String, bool)>);
    impl Visitor for Names {
        type Error = Infallible;
        fn visit_start(&mut self, ctx: &VisitContext, node: &dyn Visitable) -> Result<(), Infallible> {
            if ctx.depth == 1 {
                self.0.push((ctx.element_name(node), ctx.polymorphic));
            }
            Ok(())
        }
    }

    let mut names = Names::default();
    request.accept(&mut names).unwrap();
    assert!(names.0.contains(&("occurrenceDateTime".to_string(), true)));
    assert!(names.0.contains(&("subject".to_string(), false)));
}

#[test]
fn visitor_errors_stop_the_traversal() {
    struct StopAt(&'static str, Vec<String>);
    impl Visitor for StopAt {
        type Error = String;
        fn visit_start(&mut self, ctx: &VisitContext, _node: &dyn Visitable) -> Result<(), String> {
            if ctx.name == self.0 {
                return Err(format!("stopped at {}", ctx.name));
            }
            self.1.push(ctx.name.to_string());
            Ok(())
        }
    }

    let slot = slot_builder().comment(string("x")).build().unwrap();
    let mut visitor = StopAt("status", Vec::new());
    let err = slot.accept(&mut visitor).unwrap_err();
    assert_eq!(err, "stopped at status");
    assert!(!visitor.1.iter().any(|name| name == "start" || name == "comment"));
}

#[test]
fn contained_resources_are_traversed() {
    let org = Organization::builder().name(string("Acme")).build().unwrap();
    let slot = slot_builder().contained([org]).build().unwrap();
    let events = record(&slot, Recorder::default());
    let contained = events.iter().position(|e| e == "start contained[0]").unwrap();
    assert_eq!(events[contained - 1], "pre Organization");
    assert!(events.contains(&"value value=Acme".to_string()));
}

#[test]
fn pre_visit_false_drops_one_list_entry() {
    let slot = slot_builder()
        .identifier([
            identifier("urn:test", "a"),
            identifier("urn:test", "b"),
            identifier("urn:test", "c"),
        ])
        .build()
        .unwrap();

    struct SkipIdentifier {
        skip: &'static str,
        seen: Vec<String>,
    }
    impl Visitor for SkipIdentifier {
        type Error = Infallible;
        fn pre_visit(&mut self, node: &dyn Visitable) -> Result<bool, Infallible> {
            let skipped = node
                .downcast_ref::<Identifier>()
                .and_then(|id| id.value())
                .and_then(|value| value.value())
                .is_some_and(|value| value.as_str() == self.skip);
            Ok(!skipped)
        }
        fn visit_start(&mut self, ctx: &VisitContext, node: &dyn Visitable) -> Result<(), Infallible> {
            if node.is::<Identifier>() {
                self.seen.push(label(ctx));
            }
            Ok(())
        }
        fn visit_list_start(&mut self, field: &FieldDescriptor, len: usize) -> Result<(), Infallible> {
            self.seen.push(format!("list {} {}", field.name, len));
            Ok(())
        }
        fn visit_list_end(&mut self, field: &FieldDescriptor) -> Result<(), Infallible> {
            self.seen.push(format!("endlist {}", field.name));
            Ok(())
        }
    }

    let mut visitor = SkipIdentifier {
        skip: "b",
        seen: Vec::new(),
    };
    slot.accept(&mut visitor).unwrap();
    assert_eq!(
        visitor.seen,
        [
            "list identifier 3",
            "identifier[0]",
            "identifier[2]",
            "endlist identifier",
        ]
    );
}

#[test]
fn repeated_fields_are_read_in_place() {
    let slot = slot_builder()
        .identifier([identifier("urn:a", "1"), identifier("urn:b", "2")])
        .build()
        .unwrap();
    let index = slot
        .field_descriptors()
        .iter()
        .position(|field| field.name == "identifier")
        .unwrap();
    let FieldValue::Repeated(list) = slot.field_value(index) else {
        panic!("identifier is a repeated field");
    };
    assert_eq!(list.len(), 2);
    assert!(list.node(2).is_none());
    assert_eq!(
        list.node(1).and_then(|node| node.downcast_ref::<Identifier>()),
        Some(&slot.identifier()[1])
    );
    let first = list.iter().next().unwrap();
    assert!(std::ptr::addr_eq(first, &slot.identifier()[0]));
}

#[test]
fn collecting_visitor_gathers_in_order() {
    let slot = slot_builder()
        .identifier([identifier("urn:a", "1"), identifier("urn:b", "2")])
        .build()
        .unwrap();
    let mut collector = CollectingVisitor::<Uri>::new();
    slot.accept(&mut collector).unwrap();
    assert_eq!(collector.into_result(), [uri("urn:a"), uri("urn:b")]);

    // the visitor also works through a trait object
    let node: &dyn Visitable = &slot;
    let mut collector = CollectingVisitor::<Slot>::new();
    node.accept(&mut collector).unwrap();
    assert_eq!(collector.result(), [slot.clone()]);
    assert!(node.is::<Slot>());
    assert_eq!(node.downcast_ref::<Slot>(), Some(&slot));
}

#[test]
fn path_aware_visitor_reports_paths() {
    #[derive(Default)]
    struct Paths(Vec<String>);
    impl PathVisitor for Paths {
        fn visit_value(&mut self, path: &str, value: PrimitiveValue<'_>) {
            self.0.push(format!("{path}={value}"));
        }
    }

    let slot = slot_builder()
        .id("slot-1")
        .identifier([identifier("urn:test", "a")])
        .build()
        .unwrap();
    let mut visitor = PathAwareVisitor::new(Paths::default());
    slot.accept(&mut visitor).unwrap();
    let paths = visitor.into_inner().0;
    assert_eq!(
        paths,
        [
            "Slot.id=slot-1",
            "Slot.identifier[0].system.value=urn:test",
            "Slot.identifier[0].value.value=a",
            "Slot.schedule.reference.value=Schedule/example",
            "Slot.status.value=free",
            "Slot.start.value=2024-01-01T09:00:00Z",
            "Slot.end.value=2024-01-01T09:30:00Z",
        ]
    );
}

#[test]
fn value_and_children_flags() {
    let with_value = code("free");
    assert!(with_value.has_value());
    assert!(!with_value.has_children());

    let coding = Coding::builder().code(code("a")).build().unwrap();
    assert!(!coding.has_value());
    assert!(coding.has_children());
}
