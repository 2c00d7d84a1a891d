//! Common types and utilities for the OpenAPI provider analyzer
//!
//! This crate contains the derived resource model, the error types and the
//! analyzer configuration shared by the parser and CLI components.

mod config;
mod diagnostics;
mod report;
mod resource;
mod security;

pub use config::{AnalyzerConfig, RegionPolicy, RegionSettings};
pub use diagnostics::{BodySchemaIssue, ComplianceError, DataSourceError, Discovery, Rejection};
pub use report::{AnalysisReport, BackendConfiguration, HeaderParameter};
pub use resource::{
    DataSourceDescriptor, FieldDefinition, HttpMethod, OperationDescriptor, ParentChain,
    ResourceDescriptor, ResourceOperations,
};
pub use security::{ApiKey, ApiKeyLocation, GlobalSecurityScheme, SecurityDefinition};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a whole analysis pass
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported Swagger version '{0}', only 2.0 documents are supported")]
    UnsupportedVersion(String),

    #[error("Reference '{reference}' could not be resolved: {reason}")]
    UnresolvedReference { reference: String, reason: String },

    #[error("Reference cycle detected while expanding definition '{0}'")]
    ReferenceCycle(String),

    #[error(
        "apiKey security definition '{name}' uses location '{location}' which is not supported, only 'header' and 'query' values are valid"
    )]
    UnsupportedSecurityLocation { name: String, location: String },

    #[error("global security scheme '{0}' not found or not matching supported 'apiKey' type")]
    UnresolvedGlobalSecurityScheme(String),

    #[error(
        "resource '{root_path}' is configured with a multi-region host for '{keyword}' but the document is missing the root level region extension '{extension}'"
    )]
    MissingRegionExtension {
        root_path: String,
        keyword: String,
        extension: String,
    },

    #[error("resource '{root_path}' region extension '{extension}' does not declare any region")]
    EmptyRegionList { root_path: String, extension: String },

    #[error("resource '{root_path}' region extension '{extension}' is not valid: {reason}")]
    InvalidRegionList {
        root_path: String,
        extension: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Represents a field type in the derived payload schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    List(Box<FieldType>),
    Map(Box<FieldType>, Box<FieldType>),
    Object(Vec<FieldDefinition>),
}

impl FieldType {
    /// Short type label used in summaries
    pub fn label(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::DateTime => "date-time".to_string(),
            FieldType::List(inner) => format!("list({})", inner.label()),
            FieldType::Map(key, value) => format!("map({}, {})", key.label(), value.label()),
            FieldType::Object(fields) => format!("object({} fields)", fields.len()),
        }
    }
}
