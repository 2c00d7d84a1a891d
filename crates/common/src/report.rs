//! Output of one analysis pass

use crate::{
    ComplianceError, DataSourceDescriptor, DataSourceError, GlobalSecurityScheme, Rejection,
    ResourceDescriptor, SecurityDefinition,
};
use serde::Serialize;

/// A header parameter declared by at least one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderParameter {
    /// Wire header name
    pub name: String,

    /// Name exposed in provider configuration
    pub terraform_name: String,

    pub required: bool,
}

/// Where API calls are sent by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendConfiguration {
    pub host: Option<String>,
    pub base_path: String,
    pub scheme: String,
}

/// Everything derived from one document
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Resources ordered by instance path, regional variants in declaration order
    pub resources: Vec<ResourceDescriptor>,
    pub data_sources: Vec<DataSourceDescriptor>,
    pub security_definitions: Vec<SecurityDefinition>,
    pub global_security: Vec<GlobalSecurityScheme>,
    pub header_parameters: Vec<HeaderParameter>,
    pub backend: BackendConfiguration,
    pub rejected_resources: Vec<Rejection<ComplianceError>>,
    pub rejected_data_sources: Vec<Rejection<DataSourceError>>,
}

impl AnalysisReport {
    pub fn resource(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn data_source(&self, name: &str) -> Option<&DataSourceDescriptor> {
        self.data_sources.iter().find(|d| d.name == name)
    }
}
