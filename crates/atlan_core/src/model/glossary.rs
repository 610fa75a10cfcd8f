//! Business glossaries and their terms.

use std::collections::BTreeSet;

use atlan_macros::{AtlanAsset, AttributeSet};
use serde::{Deserialize, Serialize};

use super::{new_asset, require_create_params};
use crate::asset::{AssetAttributes, AssetHeader, AssetType};
use crate::error::{AtlanError, ErrorCode, Result};
use crate::reference::Reference;

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasGlossaryAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "AtlasGlossary", super_types("Asset", "Referenceable"))]
pub struct AtlasGlossary {
    pub header: AssetHeader,
    pub attributes: AtlasGlossaryAttributes,
}

impl AtlasGlossary {
    /// The tenant generates the real qualified name; the name stands in
    /// until the first save.
    pub fn creator(name: &str) -> Result<Self> {
        require_create_params(Self::TYPE_NAME, &[("name", name)])?;
        Ok(new_asset(name.to_string(), name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasGlossaryTermAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// The glossary the term belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Reference>,
    /// Assets the term is assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_entities: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "AtlasGlossaryTerm", super_types("Asset", "Referenceable"))]
pub struct AtlasGlossaryTerm {
    pub header: AssetHeader,
    pub attributes: AtlasGlossaryTermAttributes,
}

impl AtlasGlossaryTerm {
    /// `anchor` must reference an `AtlasGlossary`.
    pub fn creator(name: &str, anchor: Reference) -> Result<Self> {
        require_create_params(Self::TYPE_NAME, &[("name", name)])?;
        if anchor.type_name != AtlasGlossary::TYPE_NAME {
            return Err(AtlanError::invalid_request(
                ErrorCode::MissingRequiredRelationshipParam,
                format!(
                    "a term's anchor must be an AtlasGlossary, not a {}",
                    anchor.type_name
                ),
            ));
        }
        let mut term: Self = new_asset(name.to_string(), name);
        term.attributes.anchor = Some(anchor);
        Ok(term)
    }
}
