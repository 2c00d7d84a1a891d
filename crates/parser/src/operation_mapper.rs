//! Operation classification and CRUD mapping
//!
//! Maps HTTP methods declared on collection and instance paths to CRUD
//! operations.

use crate::swagger::{Operation, PathItem};
use openapi_provider_analyzer_common::HttpMethod;

/// CRUD operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOperation {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl CrudOperation {
    /// Whether the operation is declared on an instance path
    pub fn on_instance(&self) -> bool {
        matches!(
            self,
            CrudOperation::Read | CrudOperation::Update | CrudOperation::Delete
        )
    }
}

/// Classifies declared operations into CRUD operations
pub struct OperationClassifier;

impl OperationClassifier {
    /// Classify a method declared on a collection or instance path
    ///
    /// # Examples
    /// ```
    /// use openapi_provider_analyzer_parser::{CrudOperation, OperationClassifier};
    /// use openapi_provider_analyzer_common::HttpMethod;
    ///
    /// assert_eq!(
    ///     OperationClassifier::classify(HttpMethod::Post, false),
    ///     Some(CrudOperation::Create)
    /// );
    /// assert_eq!(
    ///     OperationClassifier::classify(HttpMethod::Get, true),
    ///     Some(CrudOperation::Read)
    /// );
    /// ```
    pub fn classify(method: HttpMethod, is_instance: bool) -> Option<CrudOperation> {
        match (method, is_instance) {
            (HttpMethod::Post, false) => Some(CrudOperation::Create),
            (HttpMethod::Get, false) => Some(CrudOperation::List),
            (HttpMethod::Get, true) => Some(CrudOperation::Read),
            (HttpMethod::Put, true) | (HttpMethod::Patch, true) => Some(CrudOperation::Update),
            (HttpMethod::Delete, true) => Some(CrudOperation::Delete),
            _ => None,
        }
    }

    /// First operation of a path item mapping to the given CRUD operation
    ///
    /// Updates prefer PUT over PATCH.
    pub fn find(item: &PathItem, crud: CrudOperation) -> Option<(HttpMethod, &Operation)> {
        item.operations()
            .find(|(method, _)| Self::classify(*method, crud.on_instance()) == Some(crud))
    }
}
