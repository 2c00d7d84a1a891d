//! Read access to a loaded, fully expanded document

use super::types::{Extensions, PathItem, SecurityRequirement, SecurityScheme, SwaggerSpec};
use std::collections::BTreeMap;

/// Everything the analysis core reads from a document
///
/// Implementations must hand out schemas with every reference already
/// expanded.
pub trait DocumentAccessor {
    /// Path templates and their operations
    fn paths(&self) -> &BTreeMap<String, PathItem>;

    /// Root level vendor extensions
    fn extensions(&self) -> &Extensions;

    /// Named security definitions
    fn security_definitions(&self) -> &BTreeMap<String, SecurityScheme>;

    /// Security requirements applied by default
    fn global_security(&self) -> &[SecurityRequirement];

    fn host(&self) -> Option<&str>;

    fn base_path(&self) -> Option<&str>;

    fn schemes(&self) -> &[String];

    fn path_item(&self, path: &str) -> Option<&PathItem> {
        self.paths().get(path)
    }
}

impl DocumentAccessor for SwaggerSpec {
    fn paths(&self) -> &BTreeMap<String, PathItem> {
        &self.paths
    }

    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn security_definitions(&self) -> &BTreeMap<String, SecurityScheme> {
        &self.security_definitions
    }

    fn global_security(&self) -> &[SecurityRequirement] {
        &self.security
    }

    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    fn schemes(&self) -> &[String] {
        &self.schemes
    }
}
