//! Resource derivation from Swagger 2.0 documents
//!
//! This crate loads an API description and derives the model of manageable
//! resources a provider can expose (`AnalysisReport`).
//!
//! ## Derivation Strategy
//!
//! Paths are paired into collection and instance shapes and each pair is
//! checked for compliance:
//! - `/v1/cdns` POST → Create
//! - `/v1/cdns/{id}` GET → Read
//! - `/v1/cdns/{id}` PUT (or PATCH) → Update
//! - `/v1/cdns/{id}` DELETE → Delete
//!
//! Compliant pairs are linked to their parent resources and expanded per
//! region when their host is region-parametrized. Security definitions,
//! data sources, header parameters and the backend are derived alongside.

mod analysis;
mod operation_mapper;
pub mod swagger;
mod type_mapper;

pub use analysis::SpecAnalyser;
pub use operation_mapper::{CrudOperation, OperationClassifier};
pub use swagger::{DocumentAccessor, SwaggerParser};
pub use type_mapper::TypeMapper;

use openapi_provider_analyzer_common::{AnalysisReport, AnalyzerConfig, Result};
use std::path::Path;

/// Load a document and run one analysis pass over it
///
/// # Arguments
/// * `path` - Swagger 2.0 document (JSON or YAML)
/// * `config` - Analysis settings
///
/// # Returns
/// * `AnalysisReport` - Everything derived from the document
pub fn analyze_file<P: AsRef<Path>>(path: P, config: AnalyzerConfig) -> Result<AnalysisReport> {
    SwaggerParser::from_file(path)?.with_config(config).analyze()
}
