//! Qualified-name helpers.
//!
//! Connection-scoped qualified names look like
//! `default/<connector>/<epoch>/<segment>/<segment>...`; the first three
//! segments are the connection's own qualified name.

use std::str::FromStr;

use crate::enums::AtlanConnectorType;
use crate::error::{AtlanError, ErrorCode, Result};

const CONNECTION_SEGMENTS: usize = 3;

pub fn connection_qualified_name(qualified_name: &str) -> Option<String> {
    let segments: Vec<&str> = qualified_name.split('/').collect();
    if segments.len() < CONNECTION_SEGMENTS
        || segments[..CONNECTION_SEGMENTS].iter().any(|s| s.is_empty())
    {
        return None;
    }
    Some(segments[..CONNECTION_SEGMENTS].join("/"))
}

pub fn connector_type(qualified_name: &str) -> Option<AtlanConnectorType> {
    qualified_name
        .split('/')
        .nth(1)
        .and_then(|segment| AtlanConnectorType::from_str(segment).ok())
}

/// Everything before the last `/`.
pub fn parent_qualified_name(qualified_name: &str) -> Option<&str> {
    qualified_name
        .rsplit_once('/')
        .map(|(parent, _)| parent)
        .filter(|parent| !parent.is_empty())
}

pub fn last_segment(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('/')
        .map(|(_, last)| last)
        .unwrap_or(qualified_name)
}

/// Checks that `qualified_name` has at least `min_segments` non-empty
/// segments and a recognised connector, as required of a parent passed to
/// a creator.
pub fn require_segments(type_name: &str, qualified_name: &str, min_segments: usize) -> Result<()> {
    let segments: Vec<&str> = qualified_name.split('/').collect();
    if segments.len() < min_segments || segments.iter().any(|s| s.is_empty()) {
        return Err(AtlanError::invalid_request(
            ErrorCode::InvalidQualifiedName,
            format!(
                "{} needs a parent qualified name with at least {} segments, got '{}'",
                type_name, min_segments, qualified_name
            ),
        ));
    }
    if connector_type(qualified_name).is_none() {
        return Err(AtlanError::invalid_request(
            ErrorCode::InvalidQualifiedName,
            format!("unknown connector in qualified name '{}'", qualified_name),
        ));
    }
    Ok(())
}
