use crate::element::BackboneElementBase;
use crate::r4::{Code, ContactPoint, FhirString, Instant, Uri};
use crate::resource::DomainResourceBase;
use crate::{FhirModel, HashMemo};

/// A server push subscription criteria: when a resource matching `criteria`
/// changes, a notification is sent over `channel`.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(kind = "resource")]
#[fhir_invariant(
    key = "dom-6",
    severity = "warning",
    human = "A resource should have narrative for robust management",
    location = "(base)",
    rule = "crate::resource::has_narrative"
)]
pub struct Subscription {
    #[fhir(base)]
    base: DomainResourceBase,
    #[fhir(codes = "requested|active|error|off")]
    status: Code,
    contact: Vec<ContactPoint>,
    end: Option<Instant>,
    reason: FhirString,
    /// Rule for server push, as a search query (`Observation?code=http://loinc.org|1975-2`).
    criteria: FhirString,
    error: Option<FhirString>,
    channel: SubscriptionChannel,
    hash: HashMemo,
}

/// The channel on which to report matches to the criteria.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(name = "Subscription.Channel", value_or_children)]
pub struct SubscriptionChannel {
    #[fhir(base)]
    base: BackboneElementBase,
    #[fhir(codes = "rest-hook|websocket|email|sms|message")]
    r#type: Code,
    endpoint: Option<Uri>,
    /// MIME type to send, or omitted for no payload.
    payload: Option<Code>,
    header: Vec<FhirString>,
    hash: HashMemo,
}
