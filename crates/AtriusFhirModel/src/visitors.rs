//! Ready-made [`Visitor`] implementations.

use std::convert::Infallible;
use std::marker::PhantomData;

use crate::visitor::{PrimitiveValue, VisitContext, Visitable, Visitor};

/// Visits every node and either always or never descends into children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultVisitor {
    visit_children: bool,
}

impl DefaultVisitor {
    pub fn new(visit_children: bool) -> Self {
        Self { visit_children }
    }
}

impl Visitor for DefaultVisitor {
    type Error = Infallible;

    fn visit(&mut self, _ctx: &VisitContext, _node: &dyn Visitable) -> Result<bool, Infallible> {
        Ok(self.visit_children)
    }
}

/// Collects a clone of every node of type `T`, in traversal order.
///
/// ```rust
/// use atrius_fhir_model::prelude::*;
/// use atrius_fhir_model::r4::{Coding, CodeableConcept, Uri};
///
/// let concept = CodeableConcept::builder()
///     .coding([Coding::builder().system(Uri::of("http://loinc.org").unwrap()).build().unwrap()])
///     .build()
///     .unwrap();
/// let mut collector = CollectingVisitor::<Uri>::new();
/// concept.accept(&mut collector).unwrap();
/// assert_eq!(collector.result().len(), 1);
/// ```
#[derive(Debug)]
pub struct CollectingVisitor<T> {
    result: Vec<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Visitable + Clone> CollectingVisitor<T> {
    pub fn new() -> Self {
        Self {
            result: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn result(&self) -> &[T] {
        &self.result
    }

    pub fn into_result(self) -> Vec<T> {
        self.result
    }
}

impl<T: Visitable + Clone> Default for CollectingVisitor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Visitable + Clone> Visitor for CollectingVisitor<T> {
    type Error = Infallible;

    fn visit(&mut self, _ctx: &VisitContext, node: &dyn Visitable) -> Result<bool, Infallible> {
        if let Some(found) = node.downcast_ref::<T>() {
            self.result.push(found.clone());
        }
        Ok(true)
    }
}

/// Receives nodes and raw values together with their dotted path
/// (`Slot.identifier[0].system`).
#[allow(unused_variables)]
pub trait PathVisitor {
    /// Return `false` to skip the node's children.
    fn visit(&mut self, path: &str, node: &dyn Visitable) -> bool {
        true
    }

    fn visit_value(&mut self, path: &str, value: PrimitiveValue<'_>) {}
}

/// Adapts a [`PathVisitor`] to the traversal protocol by tracking the path of
/// the current node.
#[derive(Debug)]
pub struct PathAwareVisitor<P> {
    inner: P,
    segments: Vec<String>,
}

impl<P: PathVisitor> PathAwareVisitor<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            segments: Vec::new(),
        }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    fn path(&self) -> String {
        self.segments.join(".")
    }
}

fn segment(ctx: &VisitContext) -> String {
    match ctx.index {
        Some(index) => format!("{}[{}]", ctx.name, index),
        None => ctx.name.to_string(),
    }
}

impl<P: PathVisitor> Visitor for PathAwareVisitor<P> {
    type Error = Infallible;

    fn visit_start(&mut self, ctx: &VisitContext, _node: &dyn Visitable) -> Result<(), Infallible> {
        self.segments.push(segment(ctx));
        Ok(())
    }

    fn visit(&mut self, _ctx: &VisitContext, node: &dyn Visitable) -> Result<bool, Infallible> {
        let path = self.path();
        Ok(self.inner.visit(&path, node))
    }

    fn visit_end(&mut self, _ctx: &VisitContext, _node: &dyn Visitable) -> Result<(), Infallible> {
        self.segments.pop();
        Ok(())
    }

    fn visit_value(&mut self, ctx: &VisitContext, value: PrimitiveValue<'_>) -> Result<(), Infallible> {
        let path = format!("{}.{}", self.path(), segment(ctx));
        self.inner.visit_value(&path, value);
        Ok(())
    }
}
