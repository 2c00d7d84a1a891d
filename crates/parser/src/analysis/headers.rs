//! Header parameters and backend configuration

use super::naming::to_snake_case;
use crate::swagger::{extension_str, DocumentAccessor, Extension};
use openapi_provider_analyzer_common::{BackendConfiguration, HeaderParameter};
use std::collections::BTreeMap;

const HEADER_LOCATION: &str = "header";
const DEFAULT_BASE_PATH: &str = "/";
const PREFERRED_SCHEME: &str = "https";

/// Header parameters declared by any operation, sorted by name
///
/// Only operation level parameters are considered. A header declared by
/// several operations is required if any of them requires it.
pub fn header_parameters<D>(doc: &D) -> Vec<HeaderParameter>
where
    D: DocumentAccessor + ?Sized,
{
    let mut headers: BTreeMap<String, HeaderParameter> = BTreeMap::new();

    let parameters = doc
        .paths()
        .values()
        .flat_map(|item| item.operations())
        .flat_map(|(_, op)| op.parameters.iter())
        .filter(|p| p.location == HEADER_LOCATION);

    for parameter in parameters {
        let header = headers
            .entry(parameter.name.clone())
            .or_insert_with(|| HeaderParameter {
                name: parameter.name.clone(),
                terraform_name: extension_str(&parameter.extensions, Extension::Header)
                    .map(String::from)
                    .unwrap_or_else(|| to_snake_case(&parameter.name)),
                required: false,
            });
        header.required |= parameter.required;
    }

    headers.into_values().collect()
}

/// Where API calls are sent by default
pub fn backend_configuration<D>(doc: &D) -> BackendConfiguration
where
    D: DocumentAccessor + ?Sized,
{
    let schemes = doc.schemes();
    let scheme = if schemes.iter().any(|s| s == PREFERRED_SCHEME) {
        PREFERRED_SCHEME
    } else {
        schemes.first().map(String::as_str).unwrap_or(PREFERRED_SCHEME)
    };

    BackendConfiguration {
        host: doc.host().map(String::from),
        base_path: doc
            .base_path()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_BASE_PATH)
            .to_string(),
        scheme: scheme.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::SwaggerSpec;

    fn spec(json: &str) -> SwaggerSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_header_parameters_are_deduplicated() {
        let doc = spec(
            r#"{
                "swagger": "2.0",
                "paths": {
                    "/v1/cdns": {
                        "post": {"parameters": [
                            {"in": "header", "name": "X-Request-ID", "type": "string"},
                            {"in": "header", "name": "X-Tenant", "type": "string", "x-terraform-header": "tenant"},
                            {"in": "query", "name": "dry_run", "type": "boolean"}
                        ]}
                    },
                    "/v1/cdns/{id}": {
                        "get": {"parameters": [
                            {"in": "header", "name": "X-Request-ID", "type": "string", "required": true}
                        ]}
                    }
                }
            }"#,
        );

        let headers = header_parameters(&doc);
        assert_eq!(
            headers,
            vec![
                HeaderParameter {
                    name: "X-Request-ID".to_string(),
                    terraform_name: "x_request_id".to_string(),
                    required: true,
                },
                HeaderParameter {
                    name: "X-Tenant".to_string(),
                    terraform_name: "tenant".to_string(),
                    required: false,
                },
            ]
        );
    }

    #[test]
    fn test_backend_prefers_https() {
        let doc = spec(
            r#"{"swagger": "2.0", "host": "api.example.com", "basePath": "/api", "schemes": ["http", "https"]}"#,
        );
        assert_eq!(
            backend_configuration(&doc),
            BackendConfiguration {
                host: Some("api.example.com".to_string()),
                base_path: "/api".to_string(),
                scheme: "https".to_string(),
            }
        );
    }

    #[test]
    fn test_backend_defaults() {
        let backend = backend_configuration(&spec(r#"{"swagger": "2.0", "schemes": ["http"]}"#));
        assert_eq!(backend.host, None);
        assert_eq!(backend.base_path, "/");
        assert_eq!(backend.scheme, "http");

        let backend = backend_configuration(&spec(r#"{"swagger": "2.0"}"#));
        assert_eq!(backend.scheme, "https");
    }
}
