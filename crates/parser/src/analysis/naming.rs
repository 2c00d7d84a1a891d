//! Resource names derived from path templates
//!
//! A name is built from the segments that follow the last path parameter:
//! the last plain segment, snake_cased, plus the version segment if any.
//! `/v1/cdns` becomes `cdns_v1`, `/v1/cdns/{cdn_id}/v1/firewalls` yields
//! `firewalls_v1` (prefixed with the parent names elsewhere).

use regex::Regex;
use std::sync::LazyLock;

static VERSION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+$").expect("version segment pattern is valid"));

/// Check if a segment is a `{parameter}` placeholder
pub fn is_param_segment(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

fn is_version_segment(segment: &str) -> bool {
    VERSION_SEGMENT.is_match(segment)
}

/// Name for a run of segments holding no path parameter
///
/// `preferred` replaces the segment-derived base name; the version is kept.
pub fn segment_name(segments: &[&str], preferred: Option<&str>) -> Option<String> {
    let version = segments.iter().rev().find(|s| is_version_segment(s));

    let base = match preferred {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => segments
            .iter()
            .rev()
            .find(|s| !s.is_empty() && !is_param_segment(s) && !is_version_segment(s))
            .map(|s| to_snake_case(s))?,
    };

    if base.is_empty() {
        return None;
    }

    Some(match version {
        Some(version) => format!("{base}_{version}"),
        None => base,
    })
}

/// Name of the resource whose collection path is `root_path`
pub fn resource_name(root_path: &str, preferred: Option<&str>) -> Option<String> {
    let segments: Vec<&str> = root_path.split('/').filter(|s| !s.is_empty()).collect();
    let start = segments
        .iter()
        .rposition(|s| is_param_segment(s))
        .map(|i| i + 1)
        .unwrap_or(0);
    segment_name(&segments[start..], preferred)
}

/// Convert PascalCase, kebab-case or spaced words to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            // Add underscore before uppercase if:
            // 1. Not at the start
            // 2. Previous char is lowercase or digit
            // 3. OR next char is lowercase (handles HTTPServer -> http_server)
            let should_add_underscore = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));

            if should_add_underscore && !result.ends_with('_') {
                result.push('_');
            }
            result.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch == ' ' || ch == '.' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(ch);
        }
    }

    while result.contains("__") {
        result = result.replace("__", "_");
    }

    result.trim_matches('_').to_string()
}
