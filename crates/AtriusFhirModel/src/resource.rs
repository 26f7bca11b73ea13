//! Shared fields of resources and domain resources.

use crate::config::ModelConfig;
use crate::element::{HasExtensions, HasId, HasModifierExtensions};
use crate::error::Result;
use crate::r4::{Code, Extension, Meta, Narrative, Resource, Uri};
use crate::validation::check_id;
use crate::visitor::{AsPrimitiveValue, FieldDescriptor, FieldKind, FieldValue, Visitable};

/// `meta`, `implicitRules` and `language`: the infrastructure fields of every resource.
pub trait HasMeta {
    fn meta(&self) -> Option<&Meta>;
    fn implicit_rules(&self) -> Option<&Uri>;
    fn language(&self) -> Option<&Code>;
}

pub trait HasNarrative {
    fn text(&self) -> Option<&Narrative>;
}

/// dom-6: whether a resource carries a narrative.
pub fn has_narrative<T: HasNarrative>(resource: &T) -> bool {
    resource.text().is_some()
}

/// Resources owned by their container and without identity outside it.
pub trait HasContained {
    fn contained(&self) -> &[Resource];
}

/// Builder side of [`HasMeta`].
pub trait ResourceBuilder: Sized {
    #[doc(hidden)]
    fn resource_base_mut(&mut self) -> &mut ResourceBaseBuilder;

    fn meta(mut self, meta: impl Into<Meta>) -> Self {
        self.resource_base_mut().meta = Some(meta.into());
        self
    }

    fn implicit_rules(mut self, implicit_rules: impl Into<Uri>) -> Self {
        self.resource_base_mut().implicit_rules = Some(implicit_rules.into());
        self
    }

    fn language(mut self, language: impl Into<Code>) -> Self {
        self.resource_base_mut().language = Some(language.into());
        self
    }
}

/// Builder side of [`HasNarrative`] and [`HasContained`].
pub trait DomainResourceBuilder: Sized {
    #[doc(hidden)]
    fn domain_base_mut(&mut self) -> &mut DomainResourceBaseBuilder;

    fn text(mut self, text: impl Into<Narrative>) -> Self {
        self.domain_base_mut().text = Some(text.into());
        self
    }

    /// Appends to the contained resources staged so far.
    fn contained<I>(mut self, resources: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Resource>,
    {
        self.domain_base_mut()
            .contained
            .extend(resources.into_iter().map(Into::into));
        self
    }

    fn set_contained<I>(mut self, resources: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Resource>,
    {
        self.domain_base_mut().contained = resources.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceBase {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
}

impl ResourceBase {
    pub const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::new("id", FieldKind::Primitive, false, &[]),
        FieldDescriptor::new("meta", FieldKind::Single, false, &["Meta"]),
        FieldDescriptor::new("implicitRules", FieldKind::Single, false, &["uri"]),
        FieldDescriptor::new("language", FieldKind::Single, false, &["code"]),
    ];

    pub fn field_value(&self, index: usize) -> FieldValue<'_> {
        match index {
            0 => FieldValue::Primitive(self.id.as_ref().map(AsPrimitiveValue::as_primitive_value)),
            1 => FieldValue::Single(self.meta.as_ref().map(|v| v as &dyn Visitable)),
            2 => FieldValue::Single(self.implicit_rules.as_ref().map(|v| v as &dyn Visitable)),
            3 => FieldValue::Single(self.language.as_ref().map(|v| v as &dyn Visitable)),
            _ => FieldValue::Single(None),
        }
    }
}

impl HasId for ResourceBase {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl HasMeta for ResourceBase {
    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn implicit_rules(&self) -> Option<&Uri> {
        self.implicit_rules.as_ref()
    }

    fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceBaseBuilder {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
}

impl ResourceBaseBuilder {
    pub fn id_slot(&mut self) -> &mut Option<String> {
        &mut self.id
    }

    pub fn resource_base_mut(&mut self) -> &mut ResourceBaseBuilder {
        self
    }

    pub fn copy_from(mut self, base: &ResourceBase) -> Self {
        self.id = base.id.clone();
        self.meta = base.meta.clone();
        self.implicit_rules = base.implicit_rules.clone();
        self.language = base.language.clone();
        self
    }

    pub fn build(&self, config: &ModelConfig) -> Result<ResourceBase> {
        if let Some(id) = &self.id {
            check_id(id, "id", config)?;
        }
        Ok(ResourceBase {
            id: self.id.clone(),
            meta: self.meta.clone(),
            implicit_rules: self.implicit_rules.clone(),
            language: self.language.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainResourceBase {
    resource: ResourceBase,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
}

impl DomainResourceBase {
    pub const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::new("id", FieldKind::Primitive, false, &[]),
        FieldDescriptor::new("meta", FieldKind::Single, false, &["Meta"]),
        FieldDescriptor::new("implicitRules", FieldKind::Single, false, &["uri"]),
        FieldDescriptor::new("language", FieldKind::Single, false, &["code"]),
        FieldDescriptor::new("text", FieldKind::Single, false, &["Narrative"]),
        FieldDescriptor::new("contained", FieldKind::Repeated, false, &["Resource"]),
        FieldDescriptor::new("extension", FieldKind::Repeated, false, &["Extension"]),
        FieldDescriptor::new("modifierExtension", FieldKind::Repeated, false, &["Extension"]),
    ];

    pub fn field_value(&self, index: usize) -> FieldValue<'_> {
        match index {
            0..=3 => self.resource.field_value(index),
            4 => FieldValue::Single(self.text.as_ref().map(|v| v as &dyn Visitable)),
            5 => FieldValue::Repeated(&self.contained),
            6 => FieldValue::Repeated(&self.extension),
            7 => FieldValue::Repeated(&self.modifier_extension),
            _ => FieldValue::Single(None),
        }
    }
}

impl HasId for DomainResourceBase {
    fn id(&self) -> Option<&str> {
        self.resource.id()
    }
}

impl HasMeta for DomainResourceBase {
    fn meta(&self) -> Option<&Meta> {
        self.resource.meta()
    }

    fn implicit_rules(&self) -> Option<&Uri> {
        self.resource.implicit_rules()
    }

    fn language(&self) -> Option<&Code> {
        self.resource.language()
    }
}

impl HasNarrative for DomainResourceBase {
    fn text(&self) -> Option<&Narrative> {
        self.text.as_ref()
    }
}

impl HasContained for DomainResourceBase {
    fn contained(&self) -> &[Resource] {
        &self.contained
    }
}

impl HasExtensions for DomainResourceBase {
    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl HasModifierExtensions for DomainResourceBase {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct DomainResourceBaseBuilder {
    resource: ResourceBaseBuilder,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
}

impl DomainResourceBaseBuilder {
    pub fn id_slot(&mut self) -> &mut Option<String> {
        self.resource.id_slot()
    }

    pub fn resource_base_mut(&mut self) -> &mut ResourceBaseBuilder {
        &mut self.resource
    }

    pub fn domain_base_mut(&mut self) -> &mut DomainResourceBaseBuilder {
        self
    }

    pub fn extension_slot(&mut self) -> &mut Vec<Extension> {
        &mut self.extension
    }

    pub fn modifier_extension_slot(&mut self) -> &mut Vec<Extension> {
        &mut self.modifier_extension
    }

    pub fn copy_from(mut self, base: &DomainResourceBase) -> Self {
        self.resource = self.resource.copy_from(&base.resource);
        self.text = base.text.clone();
        self.contained.extend(base.contained.iter().cloned());
        self.extension.extend(base.extension.iter().cloned());
        self.modifier_extension
            .extend(base.modifier_extension.iter().cloned());
        self
    }

    pub fn build(&self, config: &ModelConfig) -> Result<DomainResourceBase> {
        Ok(DomainResourceBase {
            resource: self.resource.build(config)?,
            text: self.text.clone(),
            contained: self.contained.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
        })
    }
}
