//! Lineage processes.

use std::collections::BTreeSet;

use atlan_macros::{AtlanAsset, AttributeSet};
use serde::{Deserialize, Serialize};

use crate::asset::{AssetAttributes, AssetHeader};
use crate::reference::Reference;

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ast: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "Process", super_types("Asset", "Referenceable"))]
pub struct Process {
    pub header: AssetHeader,
    pub attributes: ProcessAttributes,
}
