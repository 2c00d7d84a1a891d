//! Descriptor construction for compliant endpoints

use super::compliance::CompliantEndpoint;
use super::naming::resource_name;
use super::subresource::parent_chain;
use crate::swagger::{extension_flag, extension_str, lookup_extension, Extension, Operation};
use crate::{CrudOperation, OperationClassifier, TypeMapper};
use openapi_provider_analyzer_common::{
    ComplianceError, HttpMethod, OperationDescriptor, ResourceDescriptor, ResourceOperations,
};
use serde_json::Value;
use std::time::Duration;

/// Build the descriptor of a compliant endpoint
pub(crate) fn build(
    endpoint: &CompliantEndpoint<'_>,
) -> Result<ResourceDescriptor, ComplianceError> {
    let root_path = &endpoint.root_path;
    let instance_path = &endpoint.instance_path;
    let create = endpoint.create;

    let parent = parent_chain(root_path)?;
    let preferred = extension_str(&create.extensions, Extension::ResourceName);
    let own_name =
        resource_name(root_path, preferred).ok_or_else(|| ComplianceError::UnnamedResource {
            root_path: root_path.clone(),
        })?;
    let name = match &parent {
        Some(chain) => format!("{}_{}", chain.full_parent_name, own_name),
        None => own_name,
    };

    let instance_operation = |crud: CrudOperation| {
        OperationClassifier::find(endpoint.instance, crud)
            .map(|(method, op)| describe(instance_path, method, op))
            .transpose()
    };
    let operations = ResourceOperations {
        create: describe(root_path, HttpMethod::Post, create)?,
        read: describe(instance_path, HttpMethod::Get, endpoint.read)?,
        update: instance_operation(CrudOperation::Update)?,
        delete: instance_operation(CrudOperation::Delete)?,
    };

    Ok(ResourceDescriptor {
        name,
        root_path: root_path.clone(),
        instance_path: instance_path.clone(),
        schema: TypeMapper::map_properties(endpoint.schema),
        host: operations.create.host_override.clone(),
        operations,
        region: None,
        parent,
        ignored: extension_flag(&create.extensions, Extension::ExcludeResource),
    })
}

/// Operation metadata of a declared operation
pub(crate) fn describe(
    path: &str,
    method: HttpMethod,
    op: &Operation,
) -> Result<OperationDescriptor, ComplianceError> {
    let timeout = operation_timeout(op).map_err(|value| ComplianceError::InvalidTimeout {
        path: path.to_string(),
        method: method.to_string(),
        value,
    })?;

    Ok(OperationDescriptor {
        method,
        operation_id: op.operation_id.clone(),
        host_override: extension_str(&op.extensions, Extension::ResourceHost).map(String::from),
        timeout,
        security_schemes: operation_security(op),
    })
}

/// Timeout declared with `x-terraform-resource-timeout`, e.g. "30s" or "2m"
///
/// The raw value is returned when it cannot be parsed.
pub(crate) fn operation_timeout(op: &Operation) -> Result<Option<Duration>, String> {
    match lookup_extension(&op.extensions, Extension::ResourceTimeout) {
        None => Ok(None),
        Some(Value::String(raw)) => humantime::parse_duration(raw.trim())
            .map(Some)
            .map_err(|_| raw.clone()),
        Some(other) => Err(other.to_string()),
    }
}

/// Security scheme names of an operation, first occurrence order
pub(crate) fn operation_security(op: &Operation) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in op.security.iter().flat_map(|requirement| requirement.keys()) {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}
