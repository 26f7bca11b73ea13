//! Generic traversal over model instances.
//!
//! Every model type publishes an ordered table of [`FieldDescriptor`]s and
//! hands out its field values by position. One traversal routine walks any
//! instance through that table, so the visiting order is exactly the declared
//! order: `id`, `meta`, `implicitRules`, `language`, `text`, `contained`,
//! `extension`, `modifierExtension` (whichever the type has), then the type's
//! own fields.
//!
//! For each node the traversal runs the following sequence:
//!
//! 1. [`Visitor::pre_visit`]; `false` skips the node entirely.
//! 2. [`Visitor::visit_start`].
//! 3. [`Visitor::visit`]; `true` descends into the node's fields.
//! 4. [`Visitor::visit_end`], always paired with `visit_start`.
//! 5. [`Visitor::post_visit`].
//!
//! Raw primitive values (`id` strings, the `value` of primitive types) are not
//! nodes; they are reported through [`Visitor::visit_value`].

use std::any::Any;
use std::fmt;

use rust_decimal::Decimal;

use crate::date_time::{PrecisionDate, PrecisionDateTime, PrecisionInstant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Resource,
    Element,
    Primitive,
}

/// Shape of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A raw value (`id`, `url`, the `value` of a primitive type).
    Primitive,
    /// At most one child node of a fixed type.
    Single,
    /// At most one child node whose type is one of several alternatives.
    Choice,
    /// An ordered sequence of child nodes.
    Repeated,
}

/// One row of a type's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Required scalar, or list that must hold at least one entry.
    pub required: bool,
    /// Declared type names; the alternatives for a choice field, empty for raw values.
    pub types: &'static [&'static str],
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        kind: FieldKind,
        required: bool,
        types: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind,
            required,
            types,
        }
    }

    pub fn is_choice(&self) -> bool {
        self.kind == FieldKind::Choice
    }

    pub fn is_repeated(&self) -> bool {
        self.kind == FieldKind::Repeated
    }
}

/// Static type information of a concrete model type.
pub trait ModelType {
    const TYPE_NAME: &'static str;

    /// The declared fields, base fields first.
    fn fields() -> &'static [FieldDescriptor];
}

/// A borrowed raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue<'a> {
    Boolean(bool),
    Integer(i32),
    Decimal(&'a Decimal),
    String(&'a str),
    Date(&'a PrecisionDate),
    DateTime(&'a PrecisionDateTime),
    Instant(&'a PrecisionInstant),
}

impl fmt::Display for PrimitiveValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Boolean(v) => write!(f, "{v}"),
            PrimitiveValue::Integer(v) => write!(f, "{v}"),
            PrimitiveValue::Decimal(v) => write!(f, "{v}"),
            PrimitiveValue::String(v) => f.write_str(v),
            PrimitiveValue::Date(v) => write!(f, "{v}"),
            PrimitiveValue::DateTime(v) => write!(f, "{v}"),
            PrimitiveValue::Instant(v) => write!(f, "{v}"),
        }
    }
}

/// Raw value types that can be reported to a visitor.
pub trait AsPrimitiveValue {
    fn as_primitive_value(&self) -> PrimitiveValue<'_>;
}

impl AsPrimitiveValue for bool {
    fn as_primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Boolean(*self)
    }
}

impl AsPrimitiveValue for i32 {
    fn as_primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Integer(*self)
    }
}

impl AsPrimitiveValue for Decimal {
    fn as_primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Decimal(self)
    }
}

impl AsPrimitiveValue for String {
    fn as_primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::String(self)
    }
}

impl AsPrimitiveValue for PrecisionDate {
    fn as_primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Date(self)
    }
}

impl AsPrimitiveValue for PrecisionDateTime {
    fn as_primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::DateTime(self)
    }
}

impl AsPrimitiveValue for PrecisionInstant {
    fn as_primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Instant(self)
    }
}

/// The current value of one declared field.
#[derive(Debug)]
pub enum FieldValue<'a> {
    Primitive(Option<PrimitiveValue<'a>>),
    Single(Option<&'a dyn Visitable>),
    Choice(Option<&'a dyn Visitable>),
    Repeated(&'a dyn NodeList),
}

impl FieldValue<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Primitive(v) => v.is_none(),
            FieldValue::Single(v) | FieldValue::Choice(v) => v.is_none(),
            FieldValue::Repeated(list) => list.is_empty(),
        }
    }
}

/// The entries of a repeated field, read in place.
pub trait NodeList: fmt::Debug {
    fn len(&self) -> usize;

    fn node(&self, index: usize) -> Option<&dyn Visitable>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Visitable> NodeList for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn node(&self, index: usize) -> Option<&dyn Visitable> {
        self.get(index).map(|entry| entry as &dyn Visitable)
    }
}

impl<'a> dyn NodeList + 'a {
    pub fn iter(&self) -> impl Iterator<Item = &dyn Visitable> + '_ {
        (0..self.len()).filter_map(move |index| self.node(index))
    }
}

/// Hands out a node as a trait object, whether or not its type is known.
pub trait AsNode {
    fn as_node(&self) -> &dyn Visitable;
}

impl<T: Visitable> AsNode for T {
    fn as_node(&self) -> &dyn Visitable {
        self
    }
}

/// A node of the model graph: any resource, data type or primitive instance.
pub trait Visitable: AsNode + Any + fmt::Debug + Send + Sync {
    /// Model type name (`Slot`, `Organization.Contact`, `Period`, `dateTime`).
    fn type_name(&self) -> &'static str;

    fn node_kind(&self) -> NodeKind;

    /// The declared fields, base fields first.
    fn field_descriptors(&self) -> &'static [FieldDescriptor];

    /// The value of the field at `index` in [`Visitable::field_descriptors`].
    fn field_value(&self, index: usize) -> FieldValue<'_>;

    fn as_any(&self) -> &dyn Any;

    /// True when the node carries a primitive `value`.
    fn has_value(&self) -> bool {
        self.field_descriptors()
            .iter()
            .enumerate()
            .any(|(index, field)| is_value_field(field) && !self.field_value(index).is_empty())
    }

    /// True when any field other than a primitive `value` is populated.
    fn has_children(&self) -> bool {
        self.field_descriptors()
            .iter()
            .enumerate()
            .any(|(index, field)| !is_value_field(field) && !self.field_value(index).is_empty())
    }
}

fn is_value_field(field: &FieldDescriptor) -> bool {
    field.kind == FieldKind::Primitive && field.name == "value"
}

/// The traversal entry point, available on every model type and on
/// `dyn Visitable` alike.
pub trait Accept: Visitable {
    /// Walks this node and its descendants, reporting each step to `visitor`.
    /// The root is reported under its type name.
    fn accept<V>(&self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: Visitor + ?Sized,
    {
        traverse_root(self.as_node(), visitor)
    }
}

impl<T: Visitable + ?Sized> Accept for T {}

impl dyn Visitable {
    pub fn is<T: Visitable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Visitable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Where a node sits relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitContext {
    /// The field name; the type name for the root.
    pub name: &'static str,
    /// Position within a repeated field.
    pub index: Option<usize>,
    /// Set for the value of a choice field; serializers append the type name.
    pub polymorphic: bool,
    pub depth: usize,
}

impl VisitContext {
    pub fn root(type_name: &'static str) -> Self {
        Self {
            name: type_name,
            index: None,
            polymorphic: false,
            depth: 0,
        }
    }

    fn child(&self, field: &FieldDescriptor, index: Option<usize>) -> Self {
        Self {
            name: field.name,
            index,
            polymorphic: field.is_choice(),
            depth: self.depth + 1,
        }
    }

    /// The name a format that encodes choice types in member names would use
    /// (`occurrenceDateTime` for a `DateTime` in `occurrence`).
    pub fn element_name(&self, node: &dyn Visitable) -> String {
        if self.polymorphic {
            crate::model_support::choice_field_name(self.name, node.type_name())
        } else {
            self.name.to_string()
        }
    }
}

/// Callbacks driven by a traversal. Every method has a default that admits
/// and descends into every node, so implementors override only what they need.
///
/// Returning `Err` from any callback stops the traversal; `accept` returns
/// that error unchanged.
#[allow(unused_variables)]
pub trait Visitor {
    type Error;

    fn pre_visit(&mut self, node: &dyn Visitable) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn visit_start(&mut self, ctx: &VisitContext, node: &dyn Visitable) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Return `false` to skip the node's children.
    fn visit(&mut self, ctx: &VisitContext, node: &dyn Visitable) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn visit_end(&mut self, ctx: &VisitContext, node: &dyn Visitable) -> Result<(), Self::Error> {
        Ok(())
    }

    fn post_visit(&mut self, node: &dyn Visitable) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Brackets the elements of a non-empty repeated field.
    fn visit_list_start(&mut self, field: &FieldDescriptor, len: usize) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_list_end(&mut self, field: &FieldDescriptor) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_value(&mut self, ctx: &VisitContext, value: PrimitiveValue<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn traverse_root<V>(node: &dyn Visitable, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    tracing::trace!(type_name = node.type_name(), "traversal started");
    traverse(node, VisitContext::root(node.type_name()), visitor)
}

fn traverse<V>(node: &dyn Visitable, ctx: VisitContext, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    if !visitor.pre_visit(node)? {
        return Ok(());
    }
    visitor.visit_start(&ctx, node)?;
    if visitor.visit(&ctx, node)? {
        for (index, field) in node.field_descriptors().iter().enumerate() {
            match node.field_value(index) {
                FieldValue::Primitive(Some(value)) => {
                    visitor.visit_value(&ctx.child(field, None), value)?;
                }
                FieldValue::Single(Some(child)) | FieldValue::Choice(Some(child)) => {
                    traverse(child, ctx.child(field, None), visitor)?;
                }
                FieldValue::Repeated(children) if !children.is_empty() => {
                    visitor.visit_list_start(field, children.len())?;
                    for (position, child) in children.iter().enumerate() {
                        traverse(child, ctx.child(field, Some(position)), visitor)?;
                    }
                    visitor.visit_list_end(field)?;
                }
                _ => {}
            }
        }
    }
    visitor.visit_end(&ctx, node)?;
    visitor.post_visit(node)
}
