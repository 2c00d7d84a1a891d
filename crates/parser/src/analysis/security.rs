//! Security definition extraction
//!
//! Only `apiKey` definitions are supported. They are split by location
//! (header or query) and by the `x-terraform-authentication-scheme-bearer`
//! flag into the four [`SecurityDefinition`] variants.

use crate::swagger::{extension_flag, DocumentAccessor, Extension};
use openapi_provider_analyzer_common::{
    AnalyzerError, ApiKeyLocation, GlobalSecurityScheme, Result, SecurityDefinition,
};
use tracing::debug;

const API_KEY_TYPE: &str = "apiKey";

/// Supported security definitions, in definition name order
pub fn security_definitions<D>(doc: &D) -> Result<Vec<SecurityDefinition>>
where
    D: DocumentAccessor + ?Sized,
{
    let mut definitions = Vec::new();

    for (name, scheme) in doc.security_definitions() {
        if scheme.scheme_type != API_KEY_TYPE {
            debug!(
                "security definition '{}' of type '{}' is not supported, skipping",
                name, scheme.scheme_type
            );
            continue;
        }

        let location = match scheme.location.as_deref() {
            Some("header") => ApiKeyLocation::Header,
            Some("query") => ApiKeyLocation::Query,
            other => {
                return Err(AnalyzerError::UnsupportedSecurityLocation {
                    name: name.clone(),
                    location: other.unwrap_or_default().to_string(),
                })
            },
        };
        let bearer = extension_flag(&scheme.extensions, Extension::AuthenticationSchemeBearer);
        let parameter = scheme.name.as_deref().unwrap_or_default();

        definitions.push(SecurityDefinition::new(name, parameter, location, bearer));
    }

    Ok(definitions)
}

/// Resolve the document's default security requirements
///
/// Every name must match one of `definitions`; names are kept in document
/// order without duplicates.
pub fn global_security_schemes<D>(
    doc: &D,
    definitions: &[SecurityDefinition],
) -> Result<Vec<GlobalSecurityScheme>>
where
    D: DocumentAccessor + ?Sized,
{
    let mut schemes: Vec<GlobalSecurityScheme> = Vec::new();

    for name in doc.global_security().iter().flat_map(|requirement| requirement.keys()) {
        if schemes.iter().any(|s| &s.name == name) {
            continue;
        }
        if !definitions.iter().any(|d| d.name() == name) {
            return Err(AnalyzerError::UnresolvedGlobalSecurityScheme(name.clone()));
        }
        schemes.push(GlobalSecurityScheme { name: name.clone() });
    }

    Ok(schemes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::SwaggerSpec;

    fn spec(json: &str) -> SwaggerSpec {
        serde_json::from_str(json).unwrap()
    }

    const SECURED: &str = r#"{
        "swagger": "2.0",
        "security": [{"apikey_auth": []}, {"bearer_auth": [], "apikey_auth": []}],
        "securityDefinitions": {
            "apikey_auth": {"type": "apiKey", "in": "header", "name": "X-API-Key"},
            "bearer_auth": {
                "type": "apiKey",
                "in": "header",
                "name": "X-Token",
                "x-terraform-authentication-scheme-bearer": true
            },
            "basic_auth": {"type": "basic"},
            "query_auth": {"type": "apiKey", "in": "query", "name": "key"}
        }
    }"#;

    #[test]
    fn test_only_api_key_definitions_are_kept() {
        let definitions = security_definitions(&spec(SECURED)).unwrap();
        let names: Vec<&str> = definitions.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["apikey_auth", "bearer_auth", "query_auth"]);

        assert_eq!(definitions[0].parameter(), "X-API-Key");
        assert!(definitions[1].is_bearer());
        assert_eq!(definitions[1].parameter(), "Authorization");
        assert_eq!(definitions[2].location(), ApiKeyLocation::Query);
    }

    #[test]
    fn test_unsupported_location() {
        let err = security_definitions(&spec(
            r#"{
                "swagger": "2.0",
                "securityDefinitions": {"cookie_auth": {"type": "apiKey", "in": "cookie", "name": "session"}}
            }"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::UnsupportedSecurityLocation { ref name, ref location }
                if name == "cookie_auth" && location == "cookie"
        ));
    }

    #[test]
    fn test_global_security_in_order_without_duplicates() {
        let doc = spec(SECURED);
        let definitions = security_definitions(&doc).unwrap();
        let schemes = global_security_schemes(&doc, &definitions).unwrap();
        let names: Vec<&str> = schemes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["apikey_auth", "bearer_auth"]);
    }

    #[test]
    fn test_unresolved_global_security_scheme() {
        let doc = spec(
            r#"{
                "swagger": "2.0",
                "security": [{"token_auth": []}],
                "securityDefinitions": {"apikey_auth": {"type": "apiKey", "in": "header", "name": "X-API-Key"}}
            }"#,
        );
        let definitions = security_definitions(&doc).unwrap();
        let err = global_security_schemes(&doc, &definitions).unwrap_err();
        assert!(
            matches!(err, AnalyzerError::UnresolvedGlobalSecurityScheme(ref n) if n == "token_auth")
        );
        assert!(err.to_string().contains("token_auth"));
    }

    #[test]
    fn test_global_security_cannot_reference_non_api_key_definition() {
        let doc = spec(
            r#"{
                "swagger": "2.0",
                "security": [{"basic_auth": []}],
                "securityDefinitions": {"basic_auth": {"type": "basic"}}
            }"#,
        );
        let definitions = security_definitions(&doc).unwrap();
        assert!(definitions.is_empty());
        assert!(global_security_schemes(&doc, &definitions).is_err());
    }
}
