//! Terraform compliance analysis
//!
//! A single pass over an expanded document derives:
//! - resources: compliant collection/instance path pairs, linked to their
//!   parents and expanded per region
//! - data sources: list-returning GET endpoints
//! - security definitions and the resolved global security schemes
//! - header parameters and the backend configuration
//!
//! Candidates failing a check are recorded as rejections and never stop the
//! pass. Hard errors (security, multi-region configuration) abort it.

mod compliance;
mod data_source;
mod headers;
mod naming;
mod paths;
mod regions;
mod resource;
mod security;
mod subresource;

use crate::swagger::DocumentAccessor;
use openapi_provider_analyzer_common::{
    AnalysisReport, AnalyzerConfig, ComplianceError, DataSourceDescriptor, DataSourceError,
    Discovery, GlobalSecurityScheme, ResourceDescriptor, Result, SecurityDefinition,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Derives the resource model of a document
///
/// # Example
/// ```rust,ignore
/// let analyser = SpecAnalyser::new(parser.spec(), &AnalyzerConfig::default());
/// let resources = analyser.resources()?;
/// ```
pub struct SpecAnalyser<'a, D: DocumentAccessor + ?Sized> {
    doc: &'a D,
    config: &'a AnalyzerConfig,
}

impl<'a, D: DocumentAccessor + ?Sized> SpecAnalyser<'a, D> {
    pub fn new(doc: &'a D, config: &'a AnalyzerConfig) -> Self {
        Self { doc, config }
    }

    /// Run the whole pass
    pub fn analyze(&self) -> Result<AnalysisReport> {
        let start = Instant::now();

        let security_definitions = self.security_definitions()?;
        let global_security = self.global_security_schemes(&security_definitions)?;
        let resources = self.resources()?;
        let data_sources = self.data_sources();

        info!(
            "analysis found {} resources, {} data sources and {} security definitions ({} candidates rejected, time: {:?})",
            resources.accepted.len(),
            data_sources.accepted.len(),
            security_definitions.len(),
            resources.rejected.len(),
            start.elapsed()
        );

        Ok(AnalysisReport {
            resources: resources.accepted,
            data_sources: data_sources.accepted,
            security_definitions,
            global_security,
            header_parameters: headers::header_parameters(self.doc),
            backend: headers::backend_configuration(self.doc),
            rejected_resources: resources.rejected,
            rejected_data_sources: data_sources.rejected,
        })
    }

    /// Terraform compliant resources, ordered by instance path
    ///
    /// Rejections are keyed by instance path. Regional variants of a
    /// resource keep the order of the region extension.
    pub fn resources(&self) -> Result<Discovery<ResourceDescriptor, ComplianceError>> {
        let mut discovery = Discovery::default();
        let mut candidates = Vec::new();

        for path in self.doc.paths().keys() {
            if !paths::is_instance_path(path) {
                debug!("path '{}' is not a resource instance path", path);
                continue;
            }
            debug!("validating end point terraform compatibility {}", path);

            match compliance::validate(self.doc, path).and_then(|e| resource::build(&e)) {
                Ok(descriptor) => candidates.push(descriptor),
                Err(err) => {
                    debug!("resource path '{}' not terraform compliant: {}", path, err);
                    discovery.reject(path.clone(), err);
                },
            }
        }

        for descriptor in candidates {
            if let Some(chain) = &descriptor.parent {
                if let Err(err) =
                    subresource::validate_parents(self.doc, &descriptor.root_path, chain)
                {
                    warn!(
                        "ignoring subresource name='{}' with rootPath='{}' due to not meeting validation requirements: {}",
                        descriptor.name, descriptor.root_path, err
                    );
                    discovery.reject(descriptor.instance_path.clone(), err);
                    continue;
                }
            }

            match regions::resource_regions(self.doc, &descriptor, self.config.regions.policy)? {
                Some((keyword, regions)) => {
                    info!(
                        "resource '{}' is configured with host override and multi region, creating one resource per region",
                        descriptor.root_path
                    );
                    for regional in regions::expand(&descriptor, &keyword, &regions) {
                        discovery.accept(regional);
                    }
                },
                None => {
                    info!(
                        "found terraform compliant resource [name='{}', rootPath='{}', instancePath='{}']",
                        descriptor.name, descriptor.root_path, descriptor.instance_path
                    );
                    discovery.accept(descriptor);
                },
            }
        }

        // Stable sort: regional variants stay in region order
        discovery
            .accepted
            .sort_by(|a, b| a.instance_path.cmp(&b.instance_path));
        discovery.rejected.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(discovery)
    }

    /// Read-only data sources, ordered by path
    pub fn data_sources(&self) -> Discovery<DataSourceDescriptor, DataSourceError> {
        let mut discovery = Discovery::default();

        for (path, item) in self.doc.paths() {
            match data_source::build(path, item) {
                Ok(data_source) => {
                    info!(
                        "found terraform compliant data source [name='{}', rootPath='{}']",
                        data_source.name, path
                    );
                    discovery.accept(data_source);
                },
                Err(err) => {
                    debug!(
                        "resource path '{}' not terraform data source compliant: {}",
                        path, err
                    );
                    discovery.reject(path.clone(), err);
                },
            }
        }

        discovery.accepted.sort_by(|a, b| a.path.cmp(&b.path));
        discovery.rejected.sort_by(|a, b| a.path.cmp(&b.path));
        discovery
    }

    /// Supported security definitions
    pub fn security_definitions(&self) -> Result<Vec<SecurityDefinition>> {
        security::security_definitions(self.doc)
    }

    /// Global security schemes resolved against `definitions`
    pub fn global_security_schemes(
        &self,
        definitions: &[SecurityDefinition],
    ) -> Result<Vec<GlobalSecurityScheme>> {
        security::global_security_schemes(self.doc, definitions)
    }
}
