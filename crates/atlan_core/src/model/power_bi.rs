//! Power BI assets.
//!
//! Workspace → (dashboards → tiles), (reports → pages), (datasets → tables →
//! columns, measures), dataflows and datasources. Children carry the
//! qualified name of their workspace and dataset as plain attributes.

use std::collections::{BTreeMap, BTreeSet};

use atlan_macros::{AtlanAsset, AttributeSet};
use serde::{Deserialize, Serialize};

use crate::asset::{AssetAttributes, AssetHeader, CatalogAttributes};
use crate::enums::PowerBiEndorsement;
use crate::reference::Reference;

/// Attributes shared by every Power BI asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerBiAttributes {
    #[serde(
        rename = "powerBIIsHidden",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_hidden: Option<bool>,
    #[serde(
        rename = "powerBITableQualifiedName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub table_qualified_name: Option<String>,
    #[serde(
        rename = "powerBIFormatString",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub format_string: Option<String>,
    #[serde(
        rename = "powerBIEndorsement",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub endorsement: Option<PowerBiEndorsement>,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIWorkspaceAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataflow_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboards: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasets: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataflows: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIWorkspace",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIWorkspace {
    pub header: AssetHeader,
    pub attributes: PowerBIWorkspaceAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIDashboardAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIDashboard",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIDashboard {
    pub header: AssetHeader,
    pub attributes: PowerBIDashboardAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIReportAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIReport",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIReport {
    pub header: AssetHeader,
    pub attributes: PowerBIReportAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIPageAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIPage",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIPage {
    pub header: AssetHeader,
    pub attributes: PowerBIPageAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBITileAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBITile",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBITile {
    pub header: AssetHeader,
    pub attributes: PowerBITileAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIDatasetAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasources: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataflows: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIDataset",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIDataset {
    pub header: AssetHeader,
    pub attributes: PowerBIDatasetAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBITableAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataflow_qualified_names: Option<BTreeSet<String>>,
    #[serde(
        rename = "powerBITableSourceExpressions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_expressions: Option<BTreeSet<String>>,
    #[serde(
        rename = "powerBITableColumnCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub column_count: Option<i64>,
    #[serde(
        rename = "powerBITableMeasureCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub measure_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measures: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBITable",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBITable {
    pub header: AssetHeader,
    pub attributes: PowerBITableAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIColumnAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_qualified_name: Option<String>,
    #[serde(
        rename = "powerBIColumnDataCategory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_category: Option<String>,
    #[serde(
        rename = "powerBIColumnDataType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_type: Option<String>,
    #[serde(
        rename = "powerBISortByColumn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sort_by_column: Option<String>,
    #[serde(
        rename = "powerBIColumnSummarizeBy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub summarize_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIColumn",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIColumn {
    pub header: AssetHeader,
    pub attributes: PowerBIColumnAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIMeasureAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_qualified_name: Option<String>,
    #[serde(
        rename = "powerBIMeasureExpression",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expression: Option<String>,
    #[serde(
        rename = "powerBIIsExternalMeasure",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_external: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIMeasure",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIMeasure {
    pub header: AssetHeader,
    pub attributes: PowerBIMeasureAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIDatasourceAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_details: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasets: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIDatasource",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIDatasource {
    pub header: AssetHeader,
    pub attributes: PowerBIDatasourceAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBIDataflowAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub power_bi: PowerBiAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasets: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(
    type_name = "PowerBIDataflow",
    super_types("PowerBI", "BI", "Catalog", "Asset", "Referenceable")
)]
pub struct PowerBIDataflow {
    pub header: AssetHeader,
    pub attributes: PowerBIDataflowAttributes,
}
