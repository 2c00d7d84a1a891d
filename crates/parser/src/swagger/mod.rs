//! Swagger 2.0 document access
//!
//! Loads Swagger 2.0 (OpenAPI v2) documents, expands local references and
//! exposes the result through [`DocumentAccessor`].
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_provider_analyzer_parser::swagger::SwaggerParser;
//!
//! let parser = SwaggerParser::from_file("swagger.yaml")?;
//! let report = parser.analyze()?;
//! ```

mod document;
mod expander;
mod extensions;
mod parser;
mod types;

pub use document::DocumentAccessor;
pub use extensions::{extension_flag, extension_str, lookup_extension, Extension};
pub use parser::SwaggerParser;
pub use types::*;
