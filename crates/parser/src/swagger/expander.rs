//! In-place expansion of local references
//!
//! Parameters and responses written as `#/parameters/Name` or
//! `#/responses/Name` are replaced by the shared declaration. Every
//! `$ref: "#/definitions/Name"` found in definitions, parameter schemas and
//! response schemas is then replaced by a copy of the (expanded)
//! definition.

use super::types::{AdditionalProperties, Parameter, Response, Schema, SwaggerSpec};
use openapi_provider_analyzer_common::{AnalyzerError, Result};
use std::collections::BTreeMap;

const DEFINITIONS_PREFIX: &str = "#/definitions/";
const PARAMETERS_PREFIX: &str = "#/parameters/";
const RESPONSES_PREFIX: &str = "#/responses/";

/// Expand all local references of a document
pub fn expand_references(spec: &mut SwaggerSpec) -> Result<()> {
    let definitions = spec.definitions.clone();
    let mut expander = RefExpander {
        definitions: &definitions,
        stack: Vec::new(),
    };

    for (name, schema) in spec.definitions.iter_mut() {
        expander.stack.push(name.clone());
        expander.expand(schema)?;
        expander.stack.pop();
    }

    for parameter in spec.parameters.values_mut() {
        if let Some(reference) = &parameter.ref_path {
            return Err(unresolved(reference, "shared parameters cannot be references"));
        }
        expander.expand_parameter(parameter)?;
    }
    for response in spec.responses.values_mut() {
        if let Some(reference) = &response.ref_path {
            return Err(unresolved(reference, "shared responses cannot be references"));
        }
        expander.expand_response(response)?;
    }
    let parameters = spec.parameters.clone();
    let responses = spec.responses.clone();

    for item in spec.paths.values_mut() {
        for param in item.parameters.iter_mut() {
            resolve_parameter(param, &parameters)?;
            expander.expand_parameter(param)?;
        }
        for operation in item.operations_mut() {
            for param in operation.parameters.iter_mut() {
                resolve_parameter(param, &parameters)?;
                expander.expand_parameter(param)?;
            }
            for response in operation.responses.values_mut() {
                if let Some(reference) = response.ref_path.take() {
                    *response = lookup(&reference, RESPONSES_PREFIX, &responses)?;
                }
                expander.expand_response(response)?;
            }
        }
    }

    Ok(())
}

fn resolve_parameter(param: &mut Parameter, shared: &BTreeMap<String, Parameter>) -> Result<()> {
    if let Some(reference) = param.ref_path.take() {
        *param = lookup(&reference, PARAMETERS_PREFIX, shared)?;
    }
    Ok(())
}

/// Shared declaration named by a local reference
fn lookup<T: Clone>(reference: &str, prefix: &str, shared: &BTreeMap<String, T>) -> Result<T> {
    let name = reference.strip_prefix(prefix).ok_or_else(|| {
        unresolved(
            reference,
            &format!("only local '{prefix}' references are supported here"),
        )
    })?;
    shared
        .get(name)
        .cloned()
        .ok_or_else(|| unresolved(reference, &format!("'{name}' is not declared")))
}

fn unresolved(reference: &str, reason: &str) -> AnalyzerError {
    AnalyzerError::UnresolvedReference {
        reference: reference.to_string(),
        reason: reason.to_string(),
    }
}

struct RefExpander<'d> {
    definitions: &'d BTreeMap<String, Schema>,
    /// Definitions currently being expanded, outermost first
    stack: Vec<String>,
}

impl RefExpander<'_> {
    fn expand(&mut self, schema: &mut Schema) -> Result<()> {
        if let Some(ref_path) = schema.ref_path.take() {
            let name = ref_path.strip_prefix(DEFINITIONS_PREFIX).ok_or_else(|| {
                AnalyzerError::UnresolvedReference {
                    reference: ref_path.clone(),
                    reason: format!("only local '{DEFINITIONS_PREFIX}' references are supported"),
                }
            })?;

            if self.stack.iter().any(|n| n == name) {
                return Err(AnalyzerError::ReferenceCycle(name.to_string()));
            }

            let mut resolved = self.definitions.get(name).cloned().ok_or_else(|| {
                AnalyzerError::UnresolvedReference {
                    reference: ref_path.clone(),
                    reason: format!("definition '{name}' does not exist"),
                }
            })?;

            self.stack.push(name.to_string());
            self.expand(&mut resolved)?;
            self.stack.pop();

            *schema = resolved;
            return Ok(());
        }

        for property in schema.properties.values_mut() {
            self.expand(property)?;
        }
        if let Some(items) = schema.items.as_deref_mut() {
            self.expand(items)?;
        }
        if let Some(AdditionalProperties::Schema(additional)) =
            schema.additional_properties.as_mut()
        {
            self.expand(additional)?;
        }

        Ok(())
    }

    fn expand_parameter(&mut self, param: &mut Parameter) -> Result<()> {
        match param.schema.as_mut() {
            Some(schema) => self.expand(schema),
            None => Ok(()),
        }
    }

    fn expand_response(&mut self, response: &mut Response) -> Result<()> {
        match response.schema.as_mut() {
            Some(schema) => self.expand(schema),
            None => Ok(()),
        }
    }
}
