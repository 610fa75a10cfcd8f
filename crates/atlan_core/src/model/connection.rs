//! Connections: the root of every connector-scoped asset hierarchy.

use std::collections::BTreeSet;

use atlan_macros::{AtlanAsset, AttributeSet};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{new_asset, require_create_params};
use crate::asset::{AssetAttributes, AssetHeader, AssetType};
use crate::enums::{AtlanConnectionCategory, AtlanConnectorType};
use crate::error::{AtlanError, ErrorCode, Result};

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AtlanConnectionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_roles: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_query: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_query_preview: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "Connection", super_types("Asset", "Referenceable"))]
pub struct Connection {
    pub header: AssetHeader,
    pub attributes: ConnectionAttributes,
}

impl Connection {
    /// `default/<connector>/<epoch seconds>`. At least one admin user, group
    /// or role is required.
    pub fn creator(
        name: &str,
        connector: AtlanConnectorType,
        admin_users: &[&str],
        admin_groups: &[&str],
        admin_roles: &[&str],
    ) -> Result<Self> {
        require_create_params(Self::TYPE_NAME, &[("name", name)])?;
        if admin_users.is_empty() && admin_groups.is_empty() && admin_roles.is_empty() {
            return Err(AtlanError::invalid_request(
                ErrorCode::NoAdminsProvided,
                format!("connection {} needs at least one admin user, group or role", name),
            ));
        }
        let qualified_name = format!("default/{}/{}", connector, Utc::now().timestamp());
        let mut connection: Self = new_asset(qualified_name, name);
        let attrs = &mut connection.attributes;
        attrs.asset.connector_name = Some(connector.to_string());
        attrs.category = Some(connector.category());
        attrs.asset.admin_users = non_empty(admin_users);
        attrs.asset.admin_groups = non_empty(admin_groups);
        attrs.admin_roles = non_empty(admin_roles);
        Ok(connection)
    }
}

fn non_empty(values: &[&str]) -> Option<BTreeSet<String>> {
    (!values.is_empty()).then(|| values.iter().map(|v| v.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualified_name::connector_type;

    #[test]
    fn creator_builds_connection_qualified_name() {
        let c = Connection::creator("prod", AtlanConnectorType::Powerbi, &["jsmith"], &[], &[])
            .unwrap();
        let qn = c.qualified_name().unwrap();
        assert!(qn.starts_with("default/powerbi/"));
        assert_eq!(connector_type(qn), Some(AtlanConnectorType::Powerbi));
        assert_eq!(c.attributes.category, Some(AtlanConnectionCategory::Bi));
        assert!(c.attributes.admin_roles.is_none());
        assert!(c.asset().admin_users.as_ref().unwrap().contains("jsmith"));
    }

    #[test]
    fn creator_requires_an_admin() {
        let err = Connection::creator("prod", AtlanConnectorType::Snowflake, &[], &[], &[])
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::NoAdminsProvided));
    }

    #[test]
    fn category_serialises_in_kebab_case() {
        let c = Connection::creator("lake", AtlanConnectorType::S3, &[], &["admins"], &[]).unwrap();
        let entity = c.to_entity().unwrap();
        assert_eq!(entity.attributes["category"], "object-store");
        assert_eq!(entity.attributes["connectorName"], "s3");
    }
}
