//! Derived resource and data source model
//!
//! These structures are produced by a single analysis pass and are never
//! mutated afterwards. Downstream consumers (CRUD execution, schema
//! generation) can rely on them without touching the source document again.

use crate::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// HTTP method of a declared operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single property of a resource payload schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Property name as declared in the document
    pub name: String,

    /// Field type
    pub field_type: FieldType,

    /// Listed in the schema's `required` array
    pub required: bool,

    /// Computed by the API
    pub read_only: bool,

    /// Usable as the unique identifier of an instance
    pub identifier: bool,

    /// Value must not be displayed
    pub sensitive: bool,

    /// Changing the value requires a new instance
    pub immutable: bool,

    /// Field description
    pub description: Option<String>,
}

/// Operation metadata carried into a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub method: HttpMethod,

    pub operation_id: Option<String>,

    /// Host the operation must be sent to instead of the document host
    pub host_override: Option<String>,

    /// Maximum time the operation is allowed to take
    pub timeout: Option<Duration>,

    /// Operation-level security scheme names
    pub security_schemes: Vec<String>,
}

/// CRUD operations of a resource
///
/// Create and read are mandatory for a resource to be derived at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOperations {
    pub create: OperationDescriptor,
    pub read: OperationDescriptor,
    pub update: Option<OperationDescriptor>,
    pub delete: Option<OperationDescriptor>,
}

impl ResourceOperations {
    /// Compact CRUD marker, e.g. "CRD"
    pub fn crud_marker(&self) -> String {
        let mut marker = String::from("CR");
        if self.update.is_some() {
            marker.push('U');
        }
        if self.delete.is_some() {
            marker.push('D');
        }
        marker
    }
}

/// Ancestors of a sub-resource, outermost first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentChain {
    /// Ancestor collection paths, e.g. `/v1/cdns`
    pub parent_root_paths: Vec<String>,

    /// Ancestor instance paths, e.g. `/v1/cdns/{cdn_id}`
    pub parent_instance_paths: Vec<String>,

    /// Ancestor resource names, e.g. `cdns_v1`
    pub parent_names: Vec<String>,

    /// Properties linking the sub-resource to each ancestor, e.g. `cdns_v1_id`
    pub parent_property_names: Vec<String>,

    /// All ancestor names joined, used as the sub-resource name prefix
    pub full_parent_name: String,
}

/// A validated, manageable API resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Unique resource name
    pub name: String,

    /// Collection path holding the create operation
    pub root_path: String,

    /// Instance path template holding the read operation
    pub instance_path: String,

    /// Payload schema, sorted by property name
    pub schema: Vec<FieldDefinition>,

    pub operations: ResourceOperations,

    /// Host override for the resource (region substituted when regional)
    pub host: Option<String>,

    /// Region this descriptor was materialized for
    pub region: Option<String>,

    pub parent: Option<ParentChain>,

    /// Marked as excluded by the document
    pub ignored: bool,
}

impl ResourceDescriptor {
    /// Properties usable as the unique identifier
    pub fn identifiers(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.schema.iter().filter(|f| f.identifier)
    }

    /// Whether this resource is nested under another resource
    pub fn is_sub_resource(&self) -> bool {
        self.parent.is_some()
    }

    /// Look up a payload property by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.schema.iter().find(|f| f.name == name)
    }
}

/// A read-only, list-returning endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceDescriptor {
    pub name: String,

    pub path: String,

    /// Item schema, sorted by property name
    pub schema: Vec<FieldDefinition>,

    pub read: OperationDescriptor,
}
