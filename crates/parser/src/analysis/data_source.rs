//! Data source classification
//!
//! A path is a data source when its GET operation returns, with status
//! 200, an array of objects that have properties.

use super::naming::resource_name;
use super::resource::{operation_security, operation_timeout};
use super::subresource::parent_chain;
use crate::swagger::{extension_str, Extension, Operation, PathItem, Schema};
use crate::{CrudOperation, OperationClassifier, TypeMapper};
use openapi_provider_analyzer_common::{
    DataSourceDescriptor, DataSourceError, HttpMethod, OperationDescriptor,
};

/// Item schema of a list-returning GET operation
pub fn item_schema(item: &PathItem) -> Result<&Schema, DataSourceError> {
    let get = list_operation(item)?;
    let response = get
        .responses
        .get("200")
        .ok_or(DataSourceError::MissingOkResponse)?;
    let schema = response
        .schema
        .as_ref()
        .ok_or(DataSourceError::MissingResponseSchema)?;

    // An undeclared type is read as an array when items are present
    if schema.schema_type.is_some() && !schema.is_type("array") {
        return Err(DataSourceError::NotAnArray);
    }
    let items = schema
        .items
        .as_deref()
        .filter(|items| items.is_type("object"))
        .ok_or(DataSourceError::ItemsNotAnObject)?;
    if items.properties.is_empty() {
        return Err(DataSourceError::NoItemProperties);
    }
    Ok(items)
}

fn list_operation(item: &PathItem) -> Result<&Operation, DataSourceError> {
    OperationClassifier::find(item, CrudOperation::List)
        .map(|(_, op)| op)
        .ok_or(DataSourceError::MissingReadOperation)
}

/// Build the data source exposed by a path
pub fn build(path: &str, item: &PathItem) -> Result<DataSourceDescriptor, DataSourceError> {
    let schema = item_schema(item)?;
    let get = list_operation(item)?;

    let preferred = extension_str(&get.extensions, Extension::ResourceName);
    let own_name = resource_name(path, preferred).ok_or(DataSourceError::Unnamed)?;
    let name = match parent_chain(path).map_err(|_| DataSourceError::Unnamed)? {
        Some(chain) => format!("{}_{}", chain.full_parent_name, own_name),
        None => own_name,
    };

    Ok(DataSourceDescriptor {
        name,
        path: path.to_string(),
        schema: TypeMapper::map_properties(schema),
        read: OperationDescriptor {
            method: HttpMethod::Get,
            operation_id: get.operation_id.clone(),
            host_override: extension_str(&get.extensions, Extension::ResourceHost)
                .map(String::from),
            timeout: operation_timeout(get)
                .map_err(|value| DataSourceError::InvalidTimeout { value })?,
            security_schemes: operation_security(get),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_item(json: &str) -> PathItem {
        serde_json::from_str(json).unwrap()
    }

    const LIST_CDNS: &str = r#"{
        "get": {
            "operationId": "ListCDNs",
            "responses": {
                "200": {
                    "schema": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {"id": {"type": "string"}, "label": {"type": "string"}}
                        }
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_list_endpoint_is_data_source() {
        let data_source = build("/v1/cdns", &path_item(LIST_CDNS)).unwrap();
        assert_eq!(data_source.name, "cdns_v1");
        assert_eq!(data_source.schema.len(), 2);
        assert_eq!(data_source.read.operation_id.as_deref(), Some("ListCDNs"));
    }

    #[test]
    fn test_nested_data_source_is_prefixed() {
        let data_source =
            build("/v1/cdns/{cdn_id}/v1/firewalls", &path_item(LIST_CDNS)).unwrap();
        assert_eq!(data_source.name, "cdns_v1_firewalls_v1");
    }

    #[test]
    fn test_untyped_response_with_object_items_is_accepted() {
        let item = path_item(
            r#"{"get": {"responses": {"200": {"schema": {
                "items": {"type": "object", "properties": {"id": {"type": "string"}}}
            }}}}}"#,
        );
        let items = item_schema(&item).unwrap();
        assert!(items.properties.contains_key("id"));
        assert_eq!(build("/v1/cdns", &item).unwrap().name, "cdns_v1");
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let item = path_item(&LIST_CDNS.replacen(
            r#""operationId": "ListCDNs","#,
            r#""operationId": "ListCDNs", "x-terraform-resource-timeout": "soon","#,
            1,
        ));
        assert_eq!(
            build("/v1/cdns", &item).unwrap_err(),
            DataSourceError::InvalidTimeout {
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(
            item_schema(&path_item(r#"{"post": {}}"#)).unwrap_err(),
            DataSourceError::MissingReadOperation
        );
        assert_eq!(
            item_schema(&path_item(r#"{"get": {"responses": {"201": {}}}}"#)).unwrap_err(),
            DataSourceError::MissingOkResponse
        );
        assert_eq!(
            item_schema(&path_item(r#"{"get": {"responses": {"200": {}}}}"#)).unwrap_err(),
            DataSourceError::MissingResponseSchema
        );
        assert_eq!(
            item_schema(&path_item(
                r#"{"get": {"responses": {"200": {"schema": {"type": "object"}}}}}"#
            ))
            .unwrap_err(),
            DataSourceError::NotAnArray
        );
        assert_eq!(
            item_schema(&path_item(
                r#"{"get": {"responses": {"200": {"schema": {"type": "array", "items": {"type": "string"}}}}}}"#
            ))
            .unwrap_err(),
            DataSourceError::ItemsNotAnObject
        );
        assert_eq!(
            item_schema(&path_item(
                r#"{"get": {"responses": {"200": {"schema": {"type": "array", "items": {"type": "object"}}}}}}"#
            ))
            .unwrap_err(),
            DataSourceError::NoItemProperties
        );
    }
}
