//! Multi-region expansion
//!
//! A resource whose create host reads like `accounts.${region}.api.com` is
//! available in several regions. The regions are listed in the document
//! root extension named after the keyword, here
//! `x-terraform-resource-regions-region: "us,eu"`, and the resource is
//! materialized once per region.

use crate::swagger::{lookup_extension, DocumentAccessor, Extension};
use openapi_provider_analyzer_common::{AnalyzerError, RegionPolicy, ResourceDescriptor, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::info;

static MULTI_REGION_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\s$]+)\$\{([^\s${}]+)\}([^\s$]+)$")
        .expect("multi-region host pattern is valid")
});

/// Why a region list was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionListError {
    /// No region left once the value is cleaned up
    Empty,
    Invalid(String),
}

/// Region keyword of a parametrized host, e.g. `region` in
/// `accounts.${region}.api.com`
pub fn region_keyword(host: &str) -> Option<&str> {
    MULTI_REGION_HOST
        .captures(host)
        .and_then(|captures| captures.get(2))
        .map(|keyword| keyword.as_str())
}

/// Split a comma separated region list according to the policy
pub fn parse_region_list(
    value: &str,
    policy: RegionPolicy,
) -> std::result::Result<Vec<String>, RegionListError> {
    let regions: Vec<String> = match policy {
        RegionPolicy::Permissive => value
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .split(',')
            .map(String::from)
            .collect(),
        RegionPolicy::Strict => value.split(',').map(|r| r.trim().to_string()).collect(),
    };

    if regions.iter().all(|r| r.is_empty()) {
        return Err(RegionListError::Empty);
    }

    if policy == RegionPolicy::Strict {
        for (position, region) in regions.iter().enumerate() {
            if region.is_empty() {
                return Err(RegionListError::Invalid(format!(
                    "empty region name at position {}",
                    position + 1
                )));
            }
            if region.chars().any(char::is_whitespace) {
                return Err(RegionListError::Invalid(format!(
                    "region name '{region}' contains whitespace"
                )));
            }
            if regions[..position].contains(region) {
                return Err(RegionListError::Invalid(format!(
                    "duplicate region name '{region}'"
                )));
            }
        }
    }

    Ok(regions)
}

/// Regions a resource must be materialized for, `None` if it is not regional
///
/// A parametrized host without a usable region extension is a hard error.
pub fn resource_regions<D>(
    doc: &D,
    resource: &ResourceDescriptor,
    policy: RegionPolicy,
) -> Result<Option<(String, Vec<String>)>>
where
    D: DocumentAccessor + ?Sized,
{
    let Some(keyword) = resource.host.as_deref().and_then(region_keyword) else {
        return Ok(None);
    };
    let extension = Extension::ResourceRegions(keyword);
    let extension_name = extension.key().into_owned();

    let value = lookup_extension(doc.extensions(), extension).ok_or_else(|| {
        AnalyzerError::MissingRegionExtension {
            root_path: resource.root_path.clone(),
            keyword: keyword.to_string(),
            extension: extension_name.clone(),
        }
    })?;

    let invalid = |reason: String| AnalyzerError::InvalidRegionList {
        root_path: resource.root_path.clone(),
        extension: extension_name.clone(),
        reason,
    };
    let raw = match value {
        Value::String(list) => list.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| invalid(format!("array item {item} is not a string")))
            })
            .collect::<Result<Vec<&str>>>()?
            .join(","),
        other => {
            return Err(invalid(format!(
                "expected a comma separated string, found {other}"
            )))
        },
    };

    let regions = parse_region_list(&raw, policy).map_err(|e| match e {
        RegionListError::Empty => AnalyzerError::EmptyRegionList {
            root_path: resource.root_path.clone(),
            extension: extension_name.clone(),
        },
        RegionListError::Invalid(reason) => invalid(reason),
    })?;

    Ok(Some((keyword.to_string(), regions)))
}

/// One descriptor per region, host substituted and name suffixed
pub fn expand(
    resource: &ResourceDescriptor,
    keyword: &str,
    regions: &[String],
) -> Vec<ResourceDescriptor> {
    let placeholder = format!("${{{keyword}}}");
    regions
        .iter()
        .map(|region| {
            let mut regional = resource.clone();
            regional.name = format!("{}_{}", resource.name, region);
            regional.host = resource
                .host
                .as_ref()
                .map(|host| host.replacen(&placeholder, region, 1));
            regional.region = Some(region.clone());
            info!(
                "multi region resource name = {}, region = '{}'",
                regional.name, region
            );
            regional
        })
        .collect()
}
