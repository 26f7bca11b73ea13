pub mod medication;
pub use medication::*;

pub mod organization;
pub use organization::*;

pub mod service_request;
pub use service_request::*;

pub mod slot;
pub use slot::*;

pub mod subscription;
pub use subscription::*;

use std::any::Any;

use crate::visitor::{FieldDescriptor, FieldValue, NodeKind, Visitable};

/// Any resource of the catalogue; the element type of `contained`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Medication(Medication),
    Organization(Organization),
    ServiceRequest(ServiceRequest),
    Slot(Slot),
    Subscription(Subscription),
}

impl Resource {
    pub fn resource_type(&self) -> &'static str {
        self.as_visitable().type_name()
    }

    pub fn as_visitable(&self) -> &dyn Visitable {
        match self {
            Resource::Medication(r) => r,
            Resource::Organization(r) => r,
            Resource::ServiceRequest(r) => r,
            Resource::Slot(r) => r,
            Resource::Subscription(r) => r,
        }
    }
}

// Traversal sees the wrapped resource, never the enum.
impl Visitable for Resource {
    fn type_name(&self) -> &'static str {
        self.as_visitable().type_name()
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::Resource
    }

    fn field_descriptors(&self) -> &'static [FieldDescriptor] {
        self.as_visitable().field_descriptors()
    }

    fn field_value(&self, index: usize) -> FieldValue<'_> {
        self.as_visitable().field_value(index)
    }

    fn as_any(&self) -> &dyn Any {
        self.as_visitable().as_any()
    }
}

macro_rules! resource_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Resource {
                fn from(resource: $variant) -> Self {
                    Resource::$variant(resource)
                }
            }
        )*
    };
}

resource_from!(Medication, Organization, ServiceRequest, Slot, Subscription);
