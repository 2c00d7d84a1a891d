//! Parent resolution for nested resources
//!
//! Every `{parameter}` segment of a collection path introduces an ancestor:
//! `/v1/cdns/{cdn_id}/v1/firewalls` is a firewall nested under the
//! `/v1/cdns/{cdn_id}` instance of the `/v1/cdns` collection.

use super::naming::{is_param_segment, segment_name};
use super::paths::path_exists;
use crate::swagger::{extension_flag, DocumentAccessor, Extension, PathItem};
use openapi_provider_analyzer_common::{ComplianceError, ParentChain};

/// Ancestors encoded in a collection path, `None` for top level resources
pub fn parent_chain(root_path: &str) -> Result<Option<ParentChain>, ComplianceError> {
    let segments: Vec<&str> = root_path.split('/').collect();

    let mut chain = ParentChain {
        parent_root_paths: Vec::new(),
        parent_instance_paths: Vec::new(),
        parent_names: Vec::new(),
        parent_property_names: Vec::new(),
        full_parent_name: String::new(),
    };
    let mut start = 0;

    for (i, segment) in segments.iter().enumerate() {
        if !is_param_segment(segment) {
            continue;
        }
        let name = segment_name(&segments[start..i], None).ok_or_else(|| {
            ComplianceError::UnnamedResource {
                root_path: root_path.to_string(),
            }
        })?;

        chain.parent_root_paths.push(segments[..i].join("/"));
        chain.parent_instance_paths.push(segments[..=i].join("/"));
        chain.parent_property_names.push(format!("{name}_id"));
        chain.parent_names.push(name);
        start = i + 1;
    }

    if chain.parent_names.is_empty() {
        return Ok(None);
    }
    chain.full_parent_name = chain.parent_names.join("_");
    Ok(Some(chain))
}

/// Whether the collection path item marks its resource as excluded
pub fn is_ignored(root: &PathItem) -> bool {
    root.post
        .as_ref()
        .map(|op| extension_flag(&op.extensions, Extension::ExcludeResource))
        .unwrap_or(false)
}

/// Check every ancestor of a nested resource is declared and not ignored
pub fn validate_parents<D>(
    doc: &D,
    root_path: &str,
    chain: &ParentChain,
) -> Result<(), ComplianceError>
where
    D: DocumentAccessor + ?Sized,
{
    for parent_instance_path in &chain.parent_instance_paths {
        if path_exists(doc, parent_instance_path).is_none() {
            return Err(ComplianceError::MissingParentInstancePath {
                path: root_path.to_string(),
                parent_instance_path: parent_instance_path.clone(),
            });
        }
    }

    for parent_root_path in &chain.parent_root_paths {
        let ignored = match path_exists(doc, parent_root_path) {
            None => false,
            Some(item) if is_ignored(item) => true,
            Some(_) => continue,
        };
        return Err(ComplianceError::MissingOrIgnoredParentRootPath {
            path: root_path.to_string(),
            parent_root_path: parent_root_path.clone(),
            ignored,
        });
    }

    Ok(())
}
