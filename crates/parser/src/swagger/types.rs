//! Swagger 2.0 type definitions
//!
//! Simplified representation focusing on resource extraction. Vendor
//! extensions (`x-*`) are captured through flattened maps.

use openapi_provider_analyzer_common::HttpMethod;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Vendor extensions attached to a document element
pub type Extensions = BTreeMap<String, serde_json::Value>;

/// Swagger document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerSpec {
    /// Swagger version (e.g., "2.0")
    pub swagger: String,

    /// API metadata
    #[serde(default)]
    pub info: Option<Info>,

    /// Default API host
    #[serde(default)]
    pub host: Option<String>,

    /// Base path prepended to every path
    #[serde(rename = "basePath")]
    #[serde(default)]
    pub base_path: Option<String>,

    /// Transfer protocols
    #[serde(default)]
    pub schemes: Vec<String>,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    /// Reusable schemas
    #[serde(default)]
    pub definitions: BTreeMap<String, Schema>,

    /// Reusable parameters, referenced as `#/parameters/<name>`
    #[serde(default)]
    pub parameters: BTreeMap<String, Parameter>,

    /// Reusable responses, referenced as `#/responses/<name>`
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,

    /// Named authentication mechanisms
    #[serde(rename = "securityDefinitions")]
    #[serde(default)]
    pub security_definitions: BTreeMap<String, SecurityScheme>,

    /// Security required by default
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,

    /// Root level extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Security requirement: definition name to scopes
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Path item (operations for a path)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,

    /// Path level parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Declared operations with their method
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, self.get.as_ref()),
            (HttpMethod::Post, self.post.as_ref()),
            (HttpMethod::Put, self.put.as_ref()),
            (HttpMethod::Patch, self.patch.as_ref()),
            (HttpMethod::Delete, self.delete.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }

    pub(crate) fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        [
            self.get.as_mut(),
            self.post.as_mut(),
            self.put.as_mut(),
            self.patch.as_mut(),
            self.delete.as_mut(),
        ]
        .into_iter()
        .flatten()
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Responses keyed by status code ("200", "default", ...)
    #[serde(default, deserialize_with = "deserialize_responses")]
    pub responses: BTreeMap<String, Response>,

    /// Operation level security requirements
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Operation {
    /// First parameter located in the request body
    pub fn body_parameter(&self) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.location == "body")
    }
}

/// Parameter definition
///
/// A parameter written as a reference only carries `ref_path` until it is
/// expanded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
    /// Reference, cleared once expanded
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    #[serde(default)]
    pub name: String,

    /// Location: body, query, header, path, formData
    #[serde(rename = "in")]
    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Body parameter schema
    #[serde(default)]
    pub schema: Option<Schema>,

    /// Non-body parameter type
    #[serde(rename = "type")]
    #[serde(default)]
    pub param_type: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    /// Reference, cleared once expanded
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub schema: Option<Schema>,
}

/// `type` may be a single name or a list of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    pub fn contains(&self, name: &str) -> bool {
        match self {
            SchemaType::Single(t) => t == name,
            SchemaType::Multiple(types) => types.iter().any(|t| t == name),
        }
    }

    /// First declared type name
    pub fn primary(&self) -> Option<&str> {
        match self {
            SchemaType::Single(t) => Some(t),
            SchemaType::Multiple(types) => types.first().map(String::as_str),
        }
    }
}

/// `additionalProperties` may be a flag or a schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// Schema definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Reference, cleared once expanded
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<SchemaType>,

    /// Format (e.g., int32, int64, date-time)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,

    /// Required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Items schema (for array type)
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(rename = "readOnly")]
    #[serde(default)]
    pub read_only: bool,

    /// Extensions (x-terraform-*, etc.)
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    /// Whether `type` includes the given name
    pub fn is_type(&self, name: &str) -> bool {
        self.schema_type
            .as_ref()
            .map(|t| t.contains(name))
            .unwrap_or(false)
    }
}

/// Security definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// apiKey, basic, oauth2
    #[serde(rename = "type")]
    pub scheme_type: String,

    /// Key location for apiKey: header, query
    #[serde(rename = "in")]
    #[serde(default)]
    pub location: Option<String>,

    /// Header or query parameter name for apiKey
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Response maps are keyed by status codes which YAML documents usually
/// write as integers.
fn deserialize_responses<'de, D>(deserializer: D) -> Result<BTreeMap<String, Response>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ResponsesVisitor;

    impl<'de> Visitor<'de> for ResponsesVisitor {
        type Value = BTreeMap<String, Response>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of status codes to responses")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut responses = BTreeMap::new();
            while let Some(StatusKey(code)) = map.next_key()? {
                responses.insert(code, map.next_value()?);
            }
            Ok(responses)
        }
    }

    deserializer.deserialize_map(ResponsesVisitor)
}

struct StatusKey(String);

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StatusKeyVisitor;

        impl Visitor<'_> for StatusKeyVisitor {
            type Value = StatusKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a status code or 'default'")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(StatusKeyVisitor)
    }
}
