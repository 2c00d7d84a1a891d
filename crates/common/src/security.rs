//! Authentication mechanisms derived from security definitions

use serde::{Deserialize, Serialize};

/// Where an API key travels on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
}

/// Shape shared by every security definition variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Logical name of the definition in the document
    pub name: String,

    /// Header or query parameter carrying the credential
    pub parameter: String,
}

/// A supported authentication mechanism
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecurityDefinition {
    HeaderApiKey(ApiKey),
    HeaderBearer(ApiKey),
    QueryApiKey(ApiKey),
    QueryBearer(ApiKey),
}

impl SecurityDefinition {
    /// Header carrying bearer tokens
    pub const AUTHORIZATION_HEADER: &'static str = "Authorization";

    /// Query parameter carrying bearer tokens
    pub const ACCESS_TOKEN_QUERY_PARAM: &'static str = "access_token";

    /// Build the variant matching a location and bearer flag
    pub fn new(name: &str, parameter: &str, location: ApiKeyLocation, bearer: bool) -> Self {
        let key = |parameter: &str| ApiKey {
            name: name.to_string(),
            parameter: parameter.to_string(),
        };
        match (location, bearer) {
            (ApiKeyLocation::Header, false) => Self::HeaderApiKey(key(parameter)),
            (ApiKeyLocation::Header, true) => Self::HeaderBearer(key(Self::AUTHORIZATION_HEADER)),
            (ApiKeyLocation::Query, false) => Self::QueryApiKey(key(parameter)),
            (ApiKeyLocation::Query, true) => Self::QueryBearer(key(Self::ACCESS_TOKEN_QUERY_PARAM)),
        }
    }

    fn api_key(&self) -> &ApiKey {
        match self {
            Self::HeaderApiKey(key)
            | Self::HeaderBearer(key)
            | Self::QueryApiKey(key)
            | Self::QueryBearer(key) => key,
        }
    }

    /// Logical name of the definition
    pub fn name(&self) -> &str {
        &self.api_key().name
    }

    /// Wire parameter name
    pub fn parameter(&self) -> &str {
        &self.api_key().parameter
    }

    pub fn location(&self) -> ApiKeyLocation {
        match self {
            Self::HeaderApiKey(_) | Self::HeaderBearer(_) => ApiKeyLocation::Header,
            Self::QueryApiKey(_) | Self::QueryBearer(_) => ApiKeyLocation::Query,
        }
    }

    pub fn is_bearer(&self) -> bool {
        matches!(self, Self::HeaderBearer(_) | Self::QueryBearer(_))
    }
}

/// A security definition the document requires by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSecurityScheme {
    pub name: String,
}
