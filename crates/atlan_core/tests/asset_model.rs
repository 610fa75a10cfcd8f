//! Asset types defined outside the core crate, and the wire behaviour shared
//! by every built-in type.

use std::collections::BTreeSet;

use atlan_core::asset::attr;
use atlan_core::model::power_bi::{PowerBIDashboard, PowerBITile, PowerBIWorkspace};
use atlan_core::model::sql::Table;
use atlan_core::{
    registry, AssetAttributes, AssetHeader, AssetType, AtlanAsset, AttributeSet,
    CatalogAttributes, Entity, ErrorCode, Reference, SaveSemantic,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomReportAttributes {
    #[serde(flatten)]
    #[asset(base)]
    asset: AssetAttributes,
    #[serde(flatten)]
    catalog: CatalogAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_cron: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "CustomReport", super_types("BI", "Catalog", "Asset"))]
struct CustomReport {
    header: AssetHeader,
    attributes: CustomReportAttributes,
}

#[test]
fn custom_type_is_registered() {
    assert!(registry::is_registered("CustomReport"));
    assert!(registry::is_a("CustomReport", "BI"));
    assert!(registry::subtypes_of("BI").contains(&"CustomReport"));
}

#[test]
fn custom_type_round_trips_through_entity() {
    let mut report = CustomReport::updater("default/api/1/reports/weekly", "weekly").unwrap();
    report.attributes.refresh_cron = Some("0 6 * * 1".into());
    report.attributes.sources = Some(
        [
            Table::ref_by_guid("t-1").unwrap(),
            Table::ref_by_guid_with("t-2", SaveSemantic::Append).unwrap(),
        ]
        .into_iter()
        .collect(),
    );

    let entity = report.to_entity().unwrap();
    assert_eq!(entity.type_name, "CustomReport");
    assert_eq!(entity.attributes["refreshCron"], "0 6 * * 1");
    assert_eq!(entity.attributes["sources"], json!([{"typeName": "Table", "guid": "t-1"}]));
    assert_eq!(entity.append_relationship_attributes["sources"][0]["guid"], "t-2");

    let back = CustomReport::from_entity(entity).unwrap();
    assert_eq!(back.attributes.refresh_cron.as_deref(), Some("0 6 * * 1"));
    assert_eq!(back.attributes.sources.unwrap().len(), 1);
}

#[test]
fn references_are_deduplicated_by_identity() {
    let mut workspace = PowerBIWorkspace::updater("default/powerbi/1/ws", "ws").unwrap();
    let mut dashboards = BTreeSet::new();
    dashboards.insert(PowerBIDashboard::ref_by_guid("d-1").unwrap());
    dashboards.insert(PowerBIDashboard::ref_by_guid("d-1").unwrap());
    dashboards.insert(PowerBIDashboard::ref_by_guid("d-2").unwrap());
    workspace.attributes.dashboards = Some(dashboards);
    let entity = workspace.to_entity().unwrap();
    assert_eq!(entity.attributes["dashboards"].as_array().unwrap().len(), 2);
}

#[test]
fn empty_relationship_set_clears_on_replace() {
    let mut dashboard = PowerBIDashboard::updater("default/powerbi/1/ws/d", "d").unwrap();
    dashboard.attributes.tiles = Some(BTreeSet::new());
    let entity = dashboard.to_entity().unwrap();
    assert_eq!(entity.attributes["tiles"], json!([]));
    assert!(entity.append_relationship_attributes.is_empty());
}

#[test]
fn null_fields_do_not_override_set_values() {
    let mut tile = PowerBITile::updater("default/powerbi/1/ws/d/t", "t").unwrap();
    tile.asset_mut().description = Some("kept".into());
    tile.null_field(attr::DESCRIPTION);
    tile.null_field(attr::USER_DESCRIPTION);
    let entity = tile.to_entity().unwrap();
    assert_eq!(entity.attributes["description"], "kept");
    assert!(entity.attributes["userDescription"].is_null());
}

#[test]
fn wrong_type_is_reported_as_not_found() {
    let entity: Entity = serde_json::from_value(json!({
        "typeName": "Table",
        "guid": "0f9c0f0e-2f0b-4b9e-9d2c-3c8a1d6e7f01",
        "attributes": {"qualifiedName": "default/snowflake/1/db/s/t", "name": "t"}
    }))
    .unwrap();
    let err = PowerBITile::from_entity(entity.clone()).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.code(), Some(ErrorCode::AssetNotTypeRequested));
    assert!(Table::from_entity(entity).is_ok());
}
