//! Vendor extensions that drive the analysis
//!
//! Every extension the analyzer reacts to is listed in [`Extension`];
//! lookups go through [`lookup_extension`] and its typed helpers instead of
//! raw string keys.

use super::types::Extensions;
use std::borrow::Cow;

/// Recognized vendor extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension<'a> {
    /// Property usable as the unique identifier (schema property, bool)
    TerraformId,
    /// Preferred resource name (create operation, string)
    ResourceName,
    /// Host override (operation, string)
    ResourceHost,
    /// Resource excluded from the provider (create operation, bool)
    ExcludeResource,
    /// Operation timeout, e.g. "30s" (operation, string)
    ResourceTimeout,
    /// Sensitive value (schema property, bool)
    Sensitive,
    /// Immutable value (schema property, bool)
    Immutable,
    /// Provider configuration name of a header parameter (parameter, string)
    Header,
    /// apiKey definition carries bearer tokens (security definition, bool)
    AuthenticationSchemeBearer,
    /// Regions for a host keyword (document root, comma separated string)
    ResourceRegions(&'a str),
}

impl Extension<'_> {
    /// Extension key as written in documents
    pub fn key(&self) -> Cow<'static, str> {
        match self {
            Extension::TerraformId => Cow::Borrowed("x-terraform-id"),
            Extension::ResourceName => Cow::Borrowed("x-terraform-resource-name"),
            Extension::ResourceHost => Cow::Borrowed("x-terraform-resource-host"),
            Extension::ExcludeResource => Cow::Borrowed("x-terraform-exclude-resource"),
            Extension::ResourceTimeout => Cow::Borrowed("x-terraform-resource-timeout"),
            Extension::Sensitive => Cow::Borrowed("x-terraform-sensitive"),
            Extension::Immutable => Cow::Borrowed("x-terraform-immutable"),
            Extension::Header => Cow::Borrowed("x-terraform-header"),
            Extension::AuthenticationSchemeBearer => {
                Cow::Borrowed("x-terraform-authentication-scheme-bearer")
            }
            Extension::ResourceRegions(keyword) => {
                Cow::Owned(format!("x-terraform-resource-regions-{keyword}"))
            }
        }
    }
}

/// Raw extension value, if present
pub fn lookup_extension<'e>(
    extensions: &'e Extensions,
    extension: Extension<'_>,
) -> Option<&'e serde_json::Value> {
    extensions.get(extension.key().as_ref())
}

/// Boolean extension; absent or non-boolean values read as `false`
pub fn extension_flag(extensions: &Extensions, extension: Extension<'_>) -> bool {
    lookup_extension(extensions, extension)
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}

/// String extension; absent or non-string values read as `None`
pub fn extension_str<'e>(extensions: &'e Extensions, extension: Extension<'_>) -> Option<&'e str> {
    lookup_extension(extensions, extension).and_then(serde_json::Value::as_str)
}
