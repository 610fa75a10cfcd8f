//! Enumerations shared by every asset type.
//!
//! Wire spellings follow the tenant's JSON exactly; `Display`/`FromStr`
//! round-trip the same spelling so the CLI can accept them verbatim.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Certification applied to an asset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CertificateStatus {
    Verified,
    Draft,
    Deprecated,
}

/// Severity of an announcement banner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AtlanAnnouncementType {
    Information,
    Warning,
    Issue,
}

/// Lifecycle status of an asset on the tenant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AtlanStatus {
    #[default]
    Active,
    Deleted,
    Purged,
}

/// How a submitted relationship reference is applied to the existing set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SaveSemantic {
    #[default]
    Replace,
    Append,
    Remove,
}

impl SaveSemantic {
    pub fn is_replace(&self) -> bool {
        matches!(self, Self::Replace)
    }
}

/// Deletion mode for the bulk delete endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AtlanDeleteType {
    /// Archive: status becomes `DELETED`, the asset can be restored.
    #[default]
    Soft,
    Hard,
    Purge,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum AtlanConnectionCategory {
    #[serde(rename = "warehouse")]
    #[strum(serialize = "warehouse")]
    Warehouse,
    #[serde(rename = "bi")]
    #[strum(serialize = "bi")]
    Bi,
    #[serde(rename = "database")]
    #[strum(serialize = "database")]
    Database,
    #[serde(rename = "elt")]
    #[strum(serialize = "elt")]
    Elt,
    #[serde(rename = "object-store")]
    #[strum(serialize = "object-store")]
    ObjectStore,
    #[serde(rename = "queryengine")]
    #[strum(serialize = "queryengine")]
    QueryEngine,
    #[serde(rename = "saas")]
    #[strum(serialize = "saas")]
    Saas,
    #[serde(rename = "api")]
    #[strum(serialize = "api")]
    Api,
    #[serde(rename = "file")]
    #[strum(serialize = "file")]
    File,
}

/// Source system of a connection; the second segment of every
/// connection-scoped qualified name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AtlanConnectorType {
    Snowflake,
    Redshift,
    Bigquery,
    Databricks,
    Postgres,
    Mysql,
    Mssql,
    Oracle,
    Athena,
    Glue,
    S3,
    Powerbi,
    Tableau,
    Looker,
    Airflow,
    Dbt,
    Salesforce,
    Api,
    File,
}

impl AtlanConnectorType {
    pub fn category(&self) -> AtlanConnectionCategory {
        match self {
            Self::Snowflake | Self::Redshift | Self::Bigquery | Self::Databricks => {
                AtlanConnectionCategory::Warehouse
            }
            Self::Postgres | Self::Mysql | Self::Mssql | Self::Oracle => {
                AtlanConnectionCategory::Database
            }
            Self::Athena => AtlanConnectionCategory::QueryEngine,
            Self::Glue => AtlanConnectionCategory::Elt,
            Self::S3 => AtlanConnectionCategory::ObjectStore,
            Self::Powerbi | Self::Tableau | Self::Looker => AtlanConnectionCategory::Bi,
            Self::Airflow | Self::Dbt => AtlanConnectionCategory::Elt,
            Self::Salesforce => AtlanConnectionCategory::Saas,
            Self::Api => AtlanConnectionCategory::Api,
            Self::File => AtlanConnectionCategory::File,
        }
    }
}

/// Endorsement applied to Power BI content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PowerBiEndorsement {
    Promoted,
    Certified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}
