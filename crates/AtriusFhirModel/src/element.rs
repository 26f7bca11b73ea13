//! Shared fields of every element and backbone element.
//!
//! Concrete types embed [`ElementBase`] or [`BackboneElementBase`] as their
//! first field and expose it through the capability traits below, instead of
//! inheriting from an abstract element class.

use crate::config::ModelConfig;
use crate::error::Result;
use crate::r4::Extension;
use crate::validation::check_string;
use crate::visitor::{AsPrimitiveValue, FieldDescriptor, FieldKind, FieldValue};

pub trait HasId {
    fn id(&self) -> Option<&str>;
}

pub trait HasExtensions {
    fn extension(&self) -> &[Extension];

    /// Extensions with the given url, in declared order.
    fn extensions_by_url<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Extension> + 'a {
        self.extension().iter().filter(move |ext| ext.url() == url)
    }
}

/// Extensions that change the meaning of the element carrying them; consumers
/// must not ignore these.
pub trait HasModifierExtensions {
    fn modifier_extension(&self) -> &[Extension];
}

/// Builder side of [`HasId`].
pub trait IdBuilder: Sized {
    #[doc(hidden)]
    fn id_slot(&mut self) -> &mut Option<String>;

    fn id(mut self, id: impl Into<String>) -> Self {
        *self.id_slot() = Some(id.into());
        self
    }
}

/// Builder side of [`HasExtensions`].
pub trait ExtensionBuilder: Sized {
    #[doc(hidden)]
    fn extension_slot(&mut self) -> &mut Vec<Extension>;

    /// Appends to the extensions staged so far.
    fn extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Extension>,
    {
        self.extension_slot().extend(extensions.into_iter().map(Into::into));
        self
    }

    /// Replaces the extensions staged so far.
    fn set_extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Extension>,
    {
        *self.extension_slot() = extensions.into_iter().map(Into::into).collect();
        self
    }
}

/// Builder side of [`HasModifierExtensions`].
pub trait ModifierExtensionBuilder: Sized {
    #[doc(hidden)]
    fn modifier_extension_slot(&mut self) -> &mut Vec<Extension>;

    fn modifier_extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Extension>,
    {
        self.modifier_extension_slot()
            .extend(extensions.into_iter().map(Into::into));
        self
    }

    fn set_modifier_extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Extension>,
    {
        *self.modifier_extension_slot() = extensions.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementBase {
    id: Option<String>,
    extension: Vec<Extension>,
}

impl ElementBase {
    pub const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::new("id", FieldKind::Primitive, false, &[]),
        FieldDescriptor::new("extension", FieldKind::Repeated, false, &["Extension"]),
    ];

    pub fn field_value(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Primitive(self.id.as_ref().map(AsPrimitiveValue::as_primitive_value)),
            1 => FieldValue::Repeated(&self.extension),
            _ => FieldValue::Single(None),
        }
    }
}

impl HasId for ElementBase {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl HasExtensions for ElementBase {
    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct ElementBaseBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
}

impl ElementBaseBuilder {
    pub fn id_slot(&mut self) -> &mut Option<String> {
        &mut self.id
    }

    pub fn extension_slot(&mut self) -> &mut Vec<Extension> {
        &mut self.extension
    }

    /// Appends the fields of `base` to what is staged.
    pub fn copy_from(mut self, base: &ElementBase) -> Self {
        self.id = base.id.clone();
        self.extension.extend(base.extension.iter().cloned());
        self
    }

    pub fn build(&self, config: &ModelConfig) -> Result<ElementBase> {
        if let Some(id) = &self.id {
            check_string(id, "id", config)?;
        }
        Ok(ElementBase {
            id: self.id.clone(),
            extension: self.extension.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneElementBase {
    element: ElementBase,
    modifier_extension: Vec<Extension>,
}

impl BackboneElementBase {
    pub const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::new("id", FieldKind::Primitive, false, &[]),
        FieldDescriptor::new("extension", FieldKind::Repeated, false, &["Extension"]),
        FieldDescriptor::new("modifierExtension", FieldKind::Repeated, false, &["Extension"]),
    ];

    pub fn field_value(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 | 1 => self.element.field_value(index),
            2 => FieldValue::Repeated(&self.modifier_extension),
            _ => FieldValue::Single(None),
        }
    }
}

impl HasId for BackboneElementBase {
    fn id(&self) -> Option<&str> {
        self.element.id()
    }
}

impl HasExtensions for BackboneElementBase {
    fn extension(&self) -> &[Extension] {
        self.element.extension()
    }
}

impl HasModifierExtensions for BackboneElementBase {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct BackboneElementBaseBuilder {
    element: ElementBaseBuilder,
    modifier_extension: Vec<Extension>,
}

impl BackboneElementBaseBuilder {
    pub fn id_slot(&mut self) -> &mut Option<String> {
        self.element.id_slot()
    }

    pub fn extension_slot(&mut self) -> &mut Vec<Extension> {
        self.element.extension_slot()
    }

    pub fn modifier_extension_slot(&mut self) -> &mut Vec<Extension> {
        &mut self.modifier_extension
    }

    pub fn copy_from(mut self, base: &BackboneElementBase) -> Self {
        self.element = self.element.copy_from(&base.element);
        self.modifier_extension
            .extend(base.modifier_extension.iter().cloned());
        self
    }

    pub fn build(&self, config: &ModelConfig) -> Result<BackboneElementBase> {
        Ok(BackboneElementBase {
            element: self.element.build(config)?,
            modifier_extension: self.modifier_extension.clone(),
        })
    }
}
