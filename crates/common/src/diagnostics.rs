//! Per-candidate failures
//!
//! A candidate path that fails a compliance check is excluded from the
//! result set without aborting the pass. The reason is kept so that users
//! can find out why an endpoint was not exposed.

use serde::Serialize;
use thiserror::Error;

/// Why a body (or computed response) schema cannot be a resource payload
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySchemaIssue {
    #[error("body parameter is missing the schema")]
    MissingSchema,

    #[error("schema reference '{0}' was not expanded")]
    UnexpandedReference(String),

    #[error("schema type '{0}' is not an object")]
    NotAnObject(String),

    #[error("schema contains no properties")]
    NoProperties,

    #[error("operation without body parameter is missing a successful (200, 201, 202) response")]
    MissingSuccessfulResponse,

    #[error("successful response '{0}' is missing the schema definition")]
    MissingResponseSchema(String),

    #[error("computed-only schema property '{0}' is not read only")]
    ComputedPropertyNotReadOnly(String),
}

/// Why a candidate path is not a manageable resource
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComplianceError {
    #[error("resource instance path '{instance_path}' missing resource root path")]
    NoMatchingRootPath { instance_path: String },

    #[error(
        "resource instance path '{instance_path}' matched {captures} groups while stripping the instance parameter, expected exactly one"
    )]
    AmbiguousRootPath {
        instance_path: String,
        captures: usize,
    },

    #[error("resource instance path '{instance_path}' missing required GET operation")]
    MissingReadOperation { instance_path: String },

    #[error("resource root path '{root_path}' missing required POST operation")]
    MissingCreateOperation { root_path: String },

    #[error("resource root path '{root_path}' POST operation validation error: {issue}")]
    InvalidBodySchema {
        root_path: String,
        issue: BodySchemaIssue,
    },

    #[error(
        "resource root path '{root_path}' schema is missing a property that uniquely identifies the resource, either a property named 'id' or a property with the extension 'x-terraform-id' set to true"
    )]
    MissingIdentifier { root_path: String },

    #[error("resource root path '{root_path}' does not contain a segment usable as resource name")]
    UnnamedResource { root_path: String },

    #[error("{method} operation on '{path}' declares an invalid timeout '{value}'")]
    InvalidTimeout {
        path: String,
        method: String,
        value: String,
    },

    #[error(
        "subresource with path '{path}' is missing parent path instance definition '{parent_instance_path}'"
    )]
    MissingParentInstancePath {
        path: String,
        parent_instance_path: String,
    },

    #[error(
        "subresource with path '{path}' has a parent root path '{parent_root_path}' that is missing or marked as ignored"
    )]
    MissingOrIgnoredParentRootPath {
        path: String,
        parent_root_path: String,
        ignored: bool,
    },
}

/// Why a path is not a read-only data source
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSourceError {
    #[error("missing get operation")]
    MissingReadOperation,

    #[error("missing get 200 OK response specification")]
    MissingOkResponse,

    #[error("missing response schema")]
    MissingResponseSchema,

    #[error("response does not return an array of items")]
    NotAnArray,

    #[error("the response items schema is missing or not defined as an object")]
    ItemsNotAnObject,

    #[error("the response items schema has no properties")]
    NoItemProperties,

    #[error("path does not contain a segment usable as data source name")]
    Unnamed,

    #[error("get operation declares an invalid timeout '{value}'")]
    InvalidTimeout { value: String },
}

/// A candidate path excluded from a result set, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection<E> {
    pub path: String,
    pub reason: E,
}

/// Accumulator for a pass over independent candidates
///
/// Survivors and rejections are collected side by side; a rejection never
/// stops the fold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery<T, E> {
    pub accepted: Vec<T>,
    pub rejected: Vec<Rejection<E>>,
}

impl<T, E> Default for Discovery<T, E> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T, E> Discovery<T, E> {
    pub fn accept(&mut self, item: T) {
        self.accepted.push(item);
    }

    pub fn reject(&mut self, path: impl Into<String>, reason: E) {
        self.rejected.push(Rejection {
            path: path.into(),
            reason,
        });
    }

    /// Rejection recorded for a path, if any
    pub fn rejection_for(&self, path: &str) -> Option<&E> {
        self.rejected
            .iter()
            .find(|r| r.path == path)
            .map(|r| &r.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_keeps_rejections_apart() {
        let mut discovery: Discovery<&str, DataSourceError> = Discovery::default();
        discovery.accept("/v1/cdns");
        discovery.reject("/v1/lbs", DataSourceError::NotAnArray);

        assert_eq!(discovery.accepted, vec!["/v1/cdns"]);
        assert_eq!(
            discovery.rejection_for("/v1/lbs"),
            Some(&DataSourceError::NotAnArray)
        );
        assert_eq!(discovery.rejection_for("/v1/cdns"), None);
    }

    #[test]
    fn test_compliance_error_serializes_kind() {
        let err = ComplianceError::MissingIdentifier {
            root_path: "/v1/cdns".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "missing_identifier");
        assert_eq!(json["root_path"], "/v1/cdns");
    }

    #[test]
    fn test_data_source_error_serializes_kind() {
        let json = serde_json::to_value(DataSourceError::NotAnArray).unwrap();
        assert_eq!(json["kind"], "not_an_array");

        let err = DataSourceError::InvalidTimeout {
            value: "soon".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "invalid_timeout");
        assert_eq!(json["value"], "soon");
        assert_eq!(err.to_string(), "get operation declares an invalid timeout 'soon'");
    }

    #[test]
    fn test_invalid_body_schema_message_includes_issue() {
        let err = ComplianceError::InvalidBodySchema {
            root_path: "/v1/cdns".to_string(),
            issue: BodySchemaIssue::NoProperties,
        };
        assert_eq!(
            err.to_string(),
            "resource root path '/v1/cdns' POST operation validation error: schema contains no properties"
        );
    }
}
