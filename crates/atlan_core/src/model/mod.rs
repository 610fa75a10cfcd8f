//! Asset type definitions, one module per family.

pub mod airflow;
pub mod connection;
pub mod glossary;
pub mod power_bi;
pub mod process;
pub mod sql;

use crate::asset::{AssetHeader, AssetType, AttributeSet};
use crate::error::{AtlanError, Result};
use crate::guid::placeholder_guid;
use crate::qualified_name::{connection_qualified_name, connector_type, require_segments};

/// Fails with a missing-create-parameter error naming every blank value.
pub(crate) fn require_create_params(type_name: &str, params: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = params
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AtlanError::missing_create_params(type_name, &missing))
    }
}

/// A new, unsaved asset with a placeholder GUID.
pub(crate) fn new_asset<T: AssetType>(qualified_name: String, name: &str) -> T {
    let header = AssetHeader {
        guid: Some(placeholder_guid()),
        ..Default::default()
    };
    let mut attributes = T::Attributes::default();
    let asset = attributes.asset_mut();
    asset.qualified_name = Some(qualified_name);
    asset.name = Some(name.to_string());
    T::from_parts(header, attributes)
}

/// A new asset under a connection-scoped parent: `<parent>/<name>`, with the
/// connector and connection qualified name filled in from the parent.
pub(crate) fn new_child_asset<T: AssetType>(
    name: &str,
    parent_field: &str,
    parent_qualified_name: &str,
    min_parent_segments: usize,
) -> Result<T> {
    require_create_params(
        T::TYPE_NAME,
        &[("name", name), (parent_field, parent_qualified_name)],
    )?;
    require_segments(T::TYPE_NAME, parent_qualified_name, min_parent_segments)?;
    let mut asset: T = new_asset(format!("{}/{}", parent_qualified_name, name), name);
    let base = asset.asset_mut();
    base.connector_name = connector_type(parent_qualified_name).map(|c| c.to_string());
    base.connection_qualified_name = connection_qualified_name(parent_qualified_name);
    Ok(asset)
}
