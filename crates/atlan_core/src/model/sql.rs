//! Relational assets: databases, schemas, tables, views and columns.

use std::collections::BTreeSet;

use atlan_macros::{AtlanAsset, AttributeSet};
use serde::{Deserialize, Serialize};

use super::{new_child_asset, require_create_params};
use crate::asset::{AssetAttributes, AssetHeader, AssetType, CatalogAttributes};
use crate::error::{AtlanError, ErrorCode, Result};
use crate::qualified_name::last_segment;
use crate::reference::Reference;

/// Attributes shared by every SQL asset. The parent names are denormalised
/// onto each child so that search can filter without joins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_user_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_profiled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_profiled_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub sql: SqlAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "Database", super_types("SQL", "Catalog", "Asset", "Referenceable"))]
pub struct Database {
    pub header: AssetHeader,
    pub attributes: DatabaseAttributes,
}

impl Database {
    /// `<connection>/<name>`.
    pub fn creator(name: &str, connection_qualified_name: &str) -> Result<Self> {
        new_child_asset(name, "connectionQualifiedName", connection_qualified_name, 3)
    }
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub sql: SqlAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "Schema", super_types("SQL", "Catalog", "Asset", "Referenceable"))]
pub struct Schema {
    pub header: AssetHeader,
    pub attributes: SchemaAttributes,
}

impl Schema {
    /// `<database>/<name>`.
    pub fn creator(name: &str, database_qualified_name: &str) -> Result<Self> {
        let mut schema: Self =
            new_child_asset(name, "databaseQualifiedName", database_qualified_name, 4)?;
        let attrs = &mut schema.attributes;
        attrs.sql.database_name = Some(last_segment(database_qualified_name).to_string());
        attrs.sql.database_qualified_name = Some(database_qualified_name.to_string());
        attrs.database = Some(Database::ref_by_qualified_name(database_qualified_name)?);
        Ok(schema)
    }
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub sql: SqlAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_partitioned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_temporary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atlan_schema: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "Table", super_types("SQL", "Catalog", "Asset", "Referenceable"))]
pub struct Table {
    pub header: AssetHeader,
    pub attributes: TableAttributes,
}

impl Table {
    /// `<schema>/<name>`.
    pub fn creator(name: &str, schema_qualified_name: &str) -> Result<Self> {
        let mut table: Self =
            new_child_asset(name, "schemaQualifiedName", schema_qualified_name, 5)?;
        fill_schema_parent(&mut table.attributes.sql, schema_qualified_name);
        table.attributes.atlan_schema = Some(Schema::ref_by_qualified_name(schema_qualified_name)?);
        Ok(table)
    }
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub sql: SqlAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atlan_schema: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "View", super_types("SQL", "Catalog", "Asset", "Referenceable"))]
pub struct View {
    pub header: AssetHeader,
    pub attributes: ViewAttributes,
}

impl View {
    pub fn creator(name: &str, schema_qualified_name: &str) -> Result<Self> {
        let mut view: Self =
            new_child_asset(name, "schemaQualifiedName", schema_qualified_name, 5)?;
        fill_schema_parent(&mut view.attributes.sql, schema_qualified_name);
        view.attributes.atlan_schema = Some(Schema::ref_by_qualified_name(schema_qualified_name)?);
        Ok(view)
    }
}

fn fill_schema_parent(sql: &mut SqlAttributes, schema_qualified_name: &str) {
    sql.schema_name = Some(last_segment(schema_qualified_name).to_string());
    sql.schema_qualified_name = Some(schema_qualified_name.to_string());
    if let Some((database_qn, _)) = schema_qualified_name.rsplit_once('/') {
        sql.database_name = Some(last_segment(database_qn).to_string());
        sql.database_qualified_name = Some(database_qn.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub sql: SqlAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_foreign: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "Column", super_types("SQL", "Catalog", "Asset", "Referenceable"))]
pub struct Column {
    pub header: AssetHeader,
    pub attributes: ColumnAttributes,
}

impl Column {
    /// `<parent>/<name>`, where the parent is a `Table` or a `View`.
    /// `order` is the column's 1-based position.
    pub fn creator(
        name: &str,
        parent_type: &str,
        parent_qualified_name: &str,
        order: i32,
    ) -> Result<Self> {
        require_create_params(Column::TYPE_NAME, &[("parentType", parent_type)])?;
        let is_table = match parent_type {
            t if t == Table::TYPE_NAME => true,
            t if t == View::TYPE_NAME => false,
            other => {
                return Err(AtlanError::invalid_request(
                    ErrorCode::MissingRequiredCreateParam,
                    format!("a Column's parent must be a Table or a View, not {}", other),
                ))
            }
        };
        let mut column: Self =
            new_child_asset(name, "parentQualifiedName", parent_qualified_name, 6)?;
        let parent_name = last_segment(parent_qualified_name).to_string();
        let attrs = &mut column.attributes;
        attrs.order = Some(order);
        if let Some((schema_qn, _)) = parent_qualified_name.rsplit_once('/') {
            fill_schema_parent(&mut attrs.sql, schema_qn);
        }
        if is_table {
            attrs.sql.table_name = Some(parent_name);
            attrs.sql.table_qualified_name = Some(parent_qualified_name.to_string());
            attrs.table = Some(Table::ref_by_qualified_name(parent_qualified_name)?);
        } else {
            attrs.sql.view_name = Some(parent_name);
            attrs.sql.view_qualified_name = Some(parent_qualified_name.to_string());
            attrs.view = Some(View::ref_by_qualified_name(parent_qualified_name)?);
        }
        Ok(column)
    }
}
