//! Path classification
//!
//! Instance paths end with a single `{parameter}` segment, optionally
//! followed by a trailing slash. Their collection (root) path is what is
//! left once that segment is stripped.

use crate::swagger::{DocumentAccessor, PathItem};
use openapi_provider_analyzer_common::ComplianceError;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static INSTANCE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*/)\{[^{}/]+\}/?$").expect("instance path pattern is valid")
});

/// Check if the given path is of the form `/resource/{id}`
pub fn is_instance_path(path: &str) -> bool {
    INSTANCE_PATH.is_match(path)
}

/// Collection path an instance path strips down to, e.g. `/v1/cdns/`
fn stripped_root(instance_path: &str) -> Result<&str, ComplianceError> {
    match INSTANCE_PATH.captures(instance_path) {
        Some(captures) if captures.len() == 2 => match captures.get(1) {
            Some(root) => Ok(root.as_str()),
            None => Err(ComplianceError::NoMatchingRootPath {
                instance_path: instance_path.to_string(),
            }),
        },
        other => Err(ComplianceError::AmbiguousRootPath {
            instance_path: instance_path.to_string(),
            captures: other.map(|c| c.len().saturating_sub(1)).unwrap_or(0),
        }),
    }
}

/// Find the declared collection path matching an instance path
///
/// `/v1/cdns/{id}` resolves to `/v1/cdns/` when declared, otherwise to
/// `/v1/cdns`.
pub fn find_root_path<D>(doc: &D, instance_path: &str) -> Result<String, ComplianceError>
where
    D: DocumentAccessor + ?Sized,
{
    let root = stripped_root(instance_path)?;

    if doc.path_item(root).is_some() {
        debug!("found resource root path with trailing '/' - {}", root);
        return Ok(root.to_string());
    }

    let trimmed = root.trim_end_matches('/');
    if !trimmed.is_empty() && doc.path_item(trimmed).is_some() {
        debug!("found resource root path without trailing '/' - {}", trimmed);
        return Ok(trimmed.to_string());
    }

    Err(ComplianceError::NoMatchingRootPath {
        instance_path: instance_path.to_string(),
    })
}

/// Look a path up, falling back to the same path with a trailing slash
pub fn path_exists<'d, D>(doc: &'d D, path: &str) -> Option<&'d PathItem>
where
    D: DocumentAccessor + ?Sized,
{
    if let Some(item) = doc.path_item(path) {
        return Some(item);
    }
    warn!(
        "path {} not found, falling back to checking if the path with trailing slash {}/ exists",
        path, path
    );
    doc.path_item(&format!("{path}/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::SwaggerSpec;
    use proptest::prelude::*;

    fn doc(paths: &[&str]) -> SwaggerSpec {
        let paths: serde_json::Map<String, serde_json::Value> = paths
            .iter()
            .map(|p| (p.to_string(), serde_json::json!({})))
            .collect();
        serde_json::from_value(serde_json::json!({"swagger": "2.0", "paths": paths})).unwrap()
    }

    #[test]
    fn test_instance_path_shapes() {
        assert!(is_instance_path("/v1/cdns/{id}"));
        assert!(is_instance_path("/v1/cdns/{id}/"));
        assert!(is_instance_path("/v1/cdns/{cdn_id}/v1/firewalls/{id}"));
        assert!(!is_instance_path("/v1/cdns"));
        assert!(!is_instance_path("/v1/cdns/{id}/status"));
        assert!(!is_instance_path("/v1/cdns/{id}//"));
    }

    #[test]
    fn test_root_path_prefers_trailing_slash() {
        let spec = doc(&["/v1/cdns/", "/v1/cdns", "/v1/cdns/{id}"]);
        assert_eq!(find_root_path(&spec, "/v1/cdns/{id}").unwrap(), "/v1/cdns/");
    }

    #[test]
    fn test_root_path_without_trailing_slash() {
        let spec = doc(&["/v1/cdns", "/v1/cdns/{id}/"]);
        assert_eq!(find_root_path(&spec, "/v1/cdns/{id}/").unwrap(), "/v1/cdns");
    }

    #[test]
    fn test_missing_root_path() {
        let spec = doc(&["/v1/cdns/{id}"]);
        assert_eq!(
            find_root_path(&spec, "/v1/cdns/{id}").unwrap_err(),
            ComplianceError::NoMatchingRootPath {
                instance_path: "/v1/cdns/{id}".to_string()
            }
        );
    }

    #[test]
    fn test_non_instance_path_is_ambiguous() {
        let spec = doc(&["/v1/cdns"]);
        assert!(matches!(
            find_root_path(&spec, "/v1/cdns").unwrap_err(),
            ComplianceError::AmbiguousRootPath { captures: 0, .. }
        ));
    }

    #[test]
    fn test_path_exists_trailing_slash_fallback() {
        let spec = doc(&["/v1/cdns/"]);
        assert!(path_exists(&spec, "/v1/cdns").is_some());
        assert!(path_exists(&spec, "/v1/lbs").is_none());
    }

    proptest! {
        #[test]
        fn root_of_instance_path_is_never_that_instance_path(
            segments in prop::collection::vec("[a-z0-9_-]{1,8}", 0..4),
            param in "[a-z_]{1,8}",
            trailing in any::<bool>(),
        ) {
            let mut path = String::new();
            for segment in &segments {
                path.push('/');
                path.push_str(segment);
            }
            path.push_str(&format!("/{{{param}}}"));
            if trailing {
                path.push('/');
            }

            prop_assert!(is_instance_path(&path));
            let root = stripped_root(&path).unwrap();
            prop_assert!(root.len() < path.len());
            prop_assert!(!is_instance_path(root));
        }
    }
}
