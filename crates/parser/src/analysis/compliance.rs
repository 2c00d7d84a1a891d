//! Resource compliance checks
//!
//! An instance path is a manageable resource only if:
//! - it declares a GET operation (PUT, PATCH and DELETE are optional)
//! - its collection path exists and declares a POST operation
//! - the POST body parameter schema is an object with properties, or the
//!   POST has no body parameter and every property of its successful
//!   response schema is read only
//! - the payload schema has an identifier property (`id` or
//!   `x-terraform-id`)

use super::paths::find_root_path;
use crate::swagger::{DocumentAccessor, Operation, PathItem, Schema};
use crate::{CrudOperation, OperationClassifier, TypeMapper};
use openapi_provider_analyzer_common::{BodySchemaIssue, ComplianceError};

/// Status codes accepted as the successful create response, in lookup order
const SUCCESSFUL_CREATE_STATUSES: [&str; 3] = ["200", "201", "202"];

/// A collection and instance path pair that passed every check
#[derive(Debug)]
pub(crate) struct CompliantEndpoint<'d> {
    pub root_path: String,
    pub instance_path: String,
    pub instance: &'d PathItem,
    pub create: &'d Operation,
    pub read: &'d Operation,
    /// Payload schema, from the body parameter or the computed response
    pub schema: &'d Schema,
}

/// Validate the resource rooted at an instance path
pub(crate) fn validate<'d, D>(
    doc: &'d D,
    instance_path: &str,
) -> Result<CompliantEndpoint<'d>, ComplianceError>
where
    D: DocumentAccessor + ?Sized,
{
    let missing_read = || ComplianceError::MissingReadOperation {
        instance_path: instance_path.to_string(),
    };
    let instance = doc.path_item(instance_path).ok_or_else(missing_read)?;
    let (_, read) =
        OperationClassifier::find(instance, CrudOperation::Read).ok_or_else(missing_read)?;

    let root_path = find_root_path(doc, instance_path)?;
    let create = doc
        .path_item(&root_path)
        .and_then(|root| OperationClassifier::find(root, CrudOperation::Create))
        .map(|(_, op)| op)
        .ok_or_else(|| ComplianceError::MissingCreateOperation {
            root_path: root_path.clone(),
        })?;

    let schema = payload_schema(create).map_err(|issue| ComplianceError::InvalidBodySchema {
        root_path: root_path.clone(),
        issue,
    })?;

    if !has_identifier(schema) {
        return Err(ComplianceError::MissingIdentifier { root_path });
    }

    Ok(CompliantEndpoint {
        root_path,
        instance_path: instance_path.to_string(),
        instance,
        create,
        read,
        schema,
    })
}

/// Payload schema of a create operation
pub(crate) fn payload_schema(create: &Operation) -> Result<&Schema, BodySchemaIssue> {
    let Some(body) = create.body_parameter() else {
        return computed_schema(create);
    };

    let schema = body.schema.as_ref().ok_or(BodySchemaIssue::MissingSchema)?;
    if let Some(reference) = &schema.ref_path {
        return Err(BodySchemaIssue::UnexpandedReference(reference.clone()));
    }
    if let Some(schema_type) = &schema.schema_type {
        if !schema_type.contains("object") {
            return Err(BodySchemaIssue::NotAnObject(
                schema_type.primary().unwrap_or_default().to_string(),
            ));
        }
    }
    if schema.properties.is_empty() {
        return Err(BodySchemaIssue::NoProperties);
    }
    Ok(schema)
}

/// Schema of a create operation without body parameter
///
/// The first successful response found is used and all of its properties
/// must be computed by the API.
fn computed_schema(create: &Operation) -> Result<&Schema, BodySchemaIssue> {
    let (status, response) = SUCCESSFUL_CREATE_STATUSES
        .iter()
        .find_map(|status| create.responses.get(*status).map(|r| (*status, r)))
        .ok_or(BodySchemaIssue::MissingSuccessfulResponse)?;

    let schema = response
        .schema
        .as_ref()
        .ok_or_else(|| BodySchemaIssue::MissingResponseSchema(status.to_string()))?;

    if let Some((name, _)) = schema.properties.iter().find(|(_, p)| !p.read_only) {
        return Err(BodySchemaIssue::ComputedPropertyNotReadOnly(name.clone()));
    }
    Ok(schema)
}

fn has_identifier(schema: &Schema) -> bool {
    schema
        .properties
        .iter()
        .any(|(name, property)| TypeMapper::is_identifier(name, property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::{Response, SwaggerParser};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    const CDNS: &str = r##"
swagger: "2.0"
paths:
  /v1/cdns:
    post:
      parameters:
        - in: body
          name: body
          schema:
            $ref: "#/definitions/CDN"
      responses:
        201:
          schema:
            $ref: "#/definitions/CDN"
  /v1/cdns/{id}:
    get:
      responses:
        200:
          schema:
            $ref: "#/definitions/CDN"
definitions:
  CDN:
    type: object
    required: [label]
    properties:
      id:
        type: string
        readOnly: true
      label:
        type: string
"##;

    fn parse(yaml: &str) -> SwaggerParser {
        SwaggerParser::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_compliant_resource() {
        let parser = parse(CDNS);
        let endpoint = validate(parser.spec(), "/v1/cdns/{id}").unwrap();
        assert_eq!(endpoint.root_path, "/v1/cdns");
        assert_eq!(endpoint.schema.properties.len(), 2);
    }

    #[test]
    fn test_missing_read_operation() {
        let parser = parse(&CDNS.replace("    get:", "    delete:"));
        assert_eq!(
            validate(parser.spec(), "/v1/cdns/{id}").unwrap_err(),
            ComplianceError::MissingReadOperation {
                instance_path: "/v1/cdns/{id}".to_string()
            }
        );
    }

    #[test]
    fn test_missing_create_operation() {
        let parser = parse(&CDNS.replace("    post:", "    put:"));
        assert_eq!(
            validate(parser.spec(), "/v1/cdns/{id}").unwrap_err(),
            ComplianceError::MissingCreateOperation {
                root_path: "/v1/cdns".to_string()
            }
        );
    }

    #[test]
    fn test_missing_identifier() {
        let parser = parse(&CDNS.replace("      id:", "      uuid:"));
        assert!(matches!(
            validate(parser.spec(), "/v1/cdns/{id}").unwrap_err(),
            ComplianceError::MissingIdentifier { .. }
        ));
    }

    #[test]
    fn test_terraform_id_extension_identifies_resource() {
        let yaml = CDNS.replace(
            "      id:\n        type: string\n        readOnly: true",
            "      uuid:\n        type: string\n        x-terraform-id: true",
        );
        let parser = parse(&yaml);
        assert!(validate(parser.spec(), "/v1/cdns/{id}").is_ok());
    }

    #[test]
    fn test_body_schema_without_properties() {
        let op: Operation = serde_json::from_str(
            r#"{"parameters": [{"in": "body", "name": "body", "schema": {"type": "object"}}]}"#,
        )
        .unwrap();
        assert_eq!(payload_schema(&op).unwrap_err(), BodySchemaIssue::NoProperties);
    }

    #[test]
    fn test_body_schema_not_an_object() {
        let op: Operation = serde_json::from_str(
            r#"{"parameters": [{"in": "body", "name": "body", "schema": {"type": "array"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            payload_schema(&op).unwrap_err(),
            BodySchemaIssue::NotAnObject("array".to_string())
        );
    }

    #[test]
    fn test_body_parameter_without_schema() {
        let op: Operation =
            serde_json::from_str(r#"{"parameters": [{"in": "body", "name": "body"}]}"#).unwrap();
        assert_eq!(payload_schema(&op).unwrap_err(), BodySchemaIssue::MissingSchema);
    }

    #[test]
    fn test_computed_only_requires_successful_response() {
        let op: Operation =
            serde_json::from_str(r#"{"responses": {"default": {"description": "error"}}}"#)
                .unwrap();
        assert_eq!(
            payload_schema(&op).unwrap_err(),
            BodySchemaIssue::MissingSuccessfulResponse
        );

        let op: Operation =
            serde_json::from_str(r#"{"responses": {"202": {"description": "accepted"}}}"#)
                .unwrap();
        assert_eq!(
            payload_schema(&op).unwrap_err(),
            BodySchemaIssue::MissingResponseSchema("202".to_string())
        );
    }

    #[test]
    fn test_computed_only_prefers_200_over_201() {
        let op: Operation = serde_json::from_str(
            r#"{"responses": {
                "201": {"schema": {"type": "object", "properties": {"name": {"type": "string"}}}},
                "200": {"schema": {"type": "object", "properties": {"id": {"type": "string", "readOnly": true}}}}
            }}"#,
        )
        .unwrap();
        let schema = payload_schema(&op).unwrap();
        assert!(schema.properties.contains_key("id"));
    }

    fn computed_operation(read_only: &[bool]) -> Operation {
        let properties: BTreeMap<String, Schema> = read_only
            .iter()
            .enumerate()
            .map(|(i, read_only)| {
                let name = if i == 0 {
                    "id".to_string()
                } else {
                    format!("prop{i}")
                };
                let property = Schema {
                    read_only: *read_only,
                    ..Schema::default()
                };
                (name, property)
            })
            .collect();
        let response = Response {
            schema: Some(Schema {
                properties,
                ..Schema::default()
            }),
            ..Response::default()
        };
        Operation {
            responses: BTreeMap::from([("201".to_string(), response)]),
            ..Operation::default()
        }
    }

    proptest! {
        #[test]
        fn computed_only_accepted_iff_all_read_only(
            read_only in prop::collection::vec(any::<bool>(), 1..8),
        ) {
            let op = computed_operation(&read_only);
            let accepted = payload_schema(&op).is_ok();
            prop_assert_eq!(accepted, read_only.iter().all(|r| *r));
        }

        #[test]
        fn flipping_one_property_rejects_computed_only(
            size in 1usize..8,
            flipped in any::<prop::sample::Index>(),
        ) {
            let mut read_only = vec![true; size];
            prop_assert!(payload_schema(&computed_operation(&read_only)).is_ok());

            read_only[flipped.index(size)] = false;
            let op = computed_operation(&read_only);
            prop_assert!(matches!(
                payload_schema(&op),
                Err(BodySchemaIssue::ComputedPropertyNotReadOnly(_))
            ));
        }
    }
}
