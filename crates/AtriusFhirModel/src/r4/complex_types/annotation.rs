use crate::element::ElementBase;
use crate::r4::{DateTime, FhirString, Markdown, Reference};
use crate::{FhirChoice, FhirModel, HashMemo};

/// A text note with its author and time.
#[derive(Debug, Clone, PartialEq, Eq, FhirModel)]
#[fhir(value_or_children)]
pub struct Annotation {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(choice)]
    author: Option<AnnotationAuthor>,
    time: Option<DateTime>,
    text: Markdown,
    hash: HashMemo,
}

/// `Annotation.author[x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirChoice)]
pub enum AnnotationAuthor {
    Reference(Reference),
    String(FhirString),
}
