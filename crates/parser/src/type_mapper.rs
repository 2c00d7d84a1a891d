//! Type mapping from Swagger schemas to the derived payload model
//!
//! Maps expanded Swagger 2.0 schemas to `FieldType` and `FieldDefinition`.

use crate::swagger::{extension_flag, AdditionalProperties, Extension, Schema};
use openapi_provider_analyzer_common::{FieldDefinition, FieldType};

/// Property name that identifies an instance without any extension
pub const IDENTIFIER_PROPERTY: &str = "id";

/// Maps schema types to FieldType
pub struct TypeMapper;

impl TypeMapper {
    /// Map a schema to FieldType
    ///
    /// # Examples
    /// ```
    /// use openapi_provider_analyzer_parser::TypeMapper;
    /// use openapi_provider_analyzer_parser::swagger::Schema;
    /// use openapi_provider_analyzer_common::FieldType;
    ///
    /// let schema: Schema = serde_json::from_str(r#"{"type": "integer"}"#).unwrap();
    /// assert_eq!(TypeMapper::map_schema(&schema), FieldType::Integer);
    /// ```
    pub fn map_schema(schema: &Schema) -> FieldType {
        let type_name = schema
            .schema_type
            .as_ref()
            .and_then(|t| t.primary())
            .unwrap_or_else(|| {
                if schema.properties.is_empty() {
                    "string"
                } else {
                    "object"
                }
            });

        match type_name {
            "string" => match schema.format.as_deref() {
                Some("date-time") | Some("date") => FieldType::DateTime,
                _ => FieldType::String,
            },
            "integer" => FieldType::Integer,
            "number" => FieldType::Float,
            "boolean" => FieldType::Boolean,
            "array" => {
                let inner = schema
                    .items
                    .as_deref()
                    .map(Self::map_schema)
                    .unwrap_or(FieldType::String);
                FieldType::List(Box::new(inner))
            },
            "object" => {
                if !schema.properties.is_empty() {
                    return FieldType::Object(Self::map_properties(schema));
                }
                match &schema.additional_properties {
                    Some(AdditionalProperties::Schema(value)) => FieldType::Map(
                        Box::new(FieldType::String),
                        Box::new(Self::map_schema(value)),
                    ),
                    _ => FieldType::Map(Box::new(FieldType::String), Box::new(FieldType::String)),
                }
            },
            _ => {
                // Unknown types default to String
                FieldType::String
            },
        }
    }

    /// Map every property of an object schema, sorted by property name
    pub fn map_properties(schema: &Schema) -> Vec<FieldDefinition> {
        // BTreeMap iteration already yields properties in name order
        schema
            .properties
            .iter()
            .map(|(name, property)| FieldDefinition {
                name: name.clone(),
                field_type: Self::map_schema(property),
                required: schema.required.iter().any(|r| r == name),
                read_only: property.read_only,
                identifier: Self::is_identifier(name, property),
                sensitive: extension_flag(&property.extensions, Extension::Sensitive),
                immutable: extension_flag(&property.extensions, Extension::Immutable),
                description: property.description.clone(),
            })
            .collect()
    }

    /// Check if a property can uniquely identify an instance
    pub fn is_identifier(name: &str, property: &Schema) -> bool {
        name == IDENTIFIER_PROPERTY || extension_flag(&property.extensions, Extension::TerraformId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: &str) -> Schema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_map_basic_types() {
        assert_eq!(
            TypeMapper::map_schema(&schema(r#"{"type": "string"}"#)),
            FieldType::String
        );
        assert_eq!(
            TypeMapper::map_schema(&schema(r#"{"type": "integer", "format": "int64"}"#)),
            FieldType::Integer
        );
        assert_eq!(
            TypeMapper::map_schema(&schema(r#"{"type": "number"}"#)),
            FieldType::Float
        );
        assert_eq!(
            TypeMapper::map_schema(&schema(r#"{"type": "boolean"}"#)),
            FieldType::Boolean
        );
        assert_eq!(
            TypeMapper::map_schema(&schema(r#"{"type": "string", "format": "date-time"}"#)),
            FieldType::DateTime
        );
    }

    #[test]
    fn test_map_collections() {
        assert_eq!(
            TypeMapper::map_schema(&schema(r#"{"type": "array", "items": {"type": "string"}}"#)),
            FieldType::List(Box::new(FieldType::String))
        );
        assert_eq!(
            TypeMapper::map_schema(&schema(
                r#"{"type": "object", "additionalProperties": {"type": "integer"}}"#
            )),
            FieldType::Map(Box::new(FieldType::String), Box::new(FieldType::Integer))
        );
    }

    #[test]
    fn test_map_nested_object() {
        let field_type = TypeMapper::map_schema(&schema(
            r#"{"type": "object", "properties": {"host": {"type": "string"}}}"#,
        ));
        match field_type {
            FieldType::Object(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].name, "host");
            },
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_map_properties_flags() {
        let fields = TypeMapper::map_properties(&schema(
            r#"{
                "type": "object",
                "required": ["label"],
                "properties": {
                    "label": {"type": "string", "x-terraform-immutable": true},
                    "id": {"type": "string", "readOnly": true},
                    "token": {"type": "string", "x-terraform-sensitive": true},
                    "uuid": {"type": "string", "x-terraform-id": true}
                }
            }"#,
        ));

        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "label", "token", "uuid"]);

        assert!(fields[0].identifier && fields[0].read_only);
        assert!(fields[1].required && fields[1].immutable && !fields[1].identifier);
        assert!(fields[2].sensitive);
        assert!(fields[3].identifier);
    }
}
