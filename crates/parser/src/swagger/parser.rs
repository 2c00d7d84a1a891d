//! Swagger document loader

use super::expander::expand_references;
use super::types::SwaggerSpec;
use crate::analysis::SpecAnalyser;
use openapi_provider_analyzer_common::{AnalysisReport, AnalyzerConfig, AnalyzerError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Swagger 2.0 document parser
///
/// Loads a document from JSON or YAML, checks its version and expands every
/// local reference so the analysis never sees a `$ref`.
#[derive(Debug)]
pub struct SwaggerParser {
    /// Loaded and expanded document
    spec: SwaggerSpec,

    /// Analysis settings
    config: AnalyzerConfig,
}

impl SwaggerParser {
    /// Load a document from file path, choosing YAML or JSON by extension
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = SwaggerParser::from_file("swagger.yaml")?;
    /// let report = parser.analyze()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Parse(format!(
                "Failed to read Swagger file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::parse_str(&content)
        }
    }

    /// Parse a document, auto-detecting JSON or YAML
    pub fn parse_str(content: &str) -> Result<Self> {
        if content.trim_start().starts_with('{') {
            Self::from_json(content)
        } else {
            Self::from_yaml(content)
        }
    }

    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: SwaggerSpec = serde_json::from_str(json)
            .map_err(|e| AnalyzerError::Parse(format!("Failed to parse Swagger JSON: {}", e)))?;
        Self::from_spec(spec)
    }

    /// Parse a document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: SwaggerSpec = serde_yaml::from_str(yaml)
            .map_err(|e| AnalyzerError::Parse(format!("Failed to parse Swagger YAML: {}", e)))?;
        Self::from_spec(spec)
    }

    fn from_spec(mut spec: SwaggerSpec) -> Result<Self> {
        if !spec.swagger.starts_with("2.") {
            return Err(AnalyzerError::UnsupportedVersion(spec.swagger));
        }

        expand_references(&mut spec)?;
        debug!(
            "loaded Swagger {} document with {} paths and {} definitions",
            spec.swagger,
            spec.paths.len(),
            spec.definitions.len()
        );

        Ok(Self {
            spec,
            config: AnalyzerConfig::default(),
        })
    }

    /// Use the given analysis settings
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one analysis pass over the document
    pub fn analyze(&self) -> Result<AnalysisReport> {
        SpecAnalyser::new(&self.spec, &self.config).analyze()
    }

    /// Get reference to the underlying, expanded document
    pub fn spec(&self) -> &SwaggerSpec {
        &self.spec
    }
}
