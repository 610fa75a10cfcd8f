//! Atlan tags (classifications) and term-assignment headers.

use serde::{Deserialize, Serialize};

use crate::enums::AtlanStatus;

/// A tag attached to an asset. `type_name` is the tenant's internal tag id,
/// not the human-readable name; the client translates between the two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlanTag {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_status: Option<AtlanStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_propagations_on_entity_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_propagation_through_lineage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_propagation_through_hierarchy: Option<bool>,
}

impl AtlanTag {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn with_propagation(mut self, options: &TagPropagation) -> Self {
        self.propagate = Some(options.propagate);
        self.remove_propagations_on_entity_delete = Some(options.remove_propagations_on_delete);
        self.restrict_propagation_through_lineage = Some(options.restrict_lineage_propagation);
        self.restrict_propagation_through_hierarchy =
            Some(options.restrict_propagation_through_hierarchy);
        self
    }
}

/// Propagation options applied when tags are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPropagation {
    pub propagate: bool,
    pub remove_propagations_on_delete: bool,
    pub restrict_lineage_propagation: bool,
    pub restrict_propagation_through_hierarchy: bool,
}

impl Default for TagPropagation {
    fn default() -> Self {
        Self {
            propagate: true,
            remove_propagations_on_delete: true,
            restrict_lineage_propagation: false,
            restrict_propagation_through_hierarchy: false,
        }
    }
}

impl TagPropagation {
    /// Tags stay on the asset they are attached to.
    pub fn none() -> Self {
        Self {
            propagate: false,
            remove_propagations_on_delete: false,
            restrict_lineage_propagation: false,
            restrict_propagation_through_hierarchy: false,
        }
    }
}

/// Tag type definition, as returned by the typedefs endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlanTagDef {
    /// Internal id, used as `typeName` on attached tags.
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `GET /api/meta/types/typedefs?type=classification`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefResponse {
    #[serde(default)]
    pub classification_defs: Vec<AtlanTagDef>,
}

/// Header describing one glossary term assigned to an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermAssignmentHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_with_default_propagation() {
        let tag = AtlanTag::new("aBcD1234").with_propagation(&TagPropagation::default());
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json["typeName"], "aBcD1234");
        assert_eq!(json["propagate"], true);
        assert_eq!(json["removePropagationsOnEntityDelete"], true);
        assert_eq!(json["restrictPropagationThroughLineage"], false);
    }

    #[test]
    fn bare_tag_omits_options() {
        let json = serde_json::to_value(AtlanTag::new("x")).unwrap();
        assert_eq!(json, serde_json::json!({"typeName": "x"}));
    }

    #[test]
    fn typedef_response_parses_classification_defs() {
        let body = serde_json::json!({
            "classificationDefs": [
                {"name": "s1Z8vEoH7Ta3", "displayName": "PII", "guid": "g", "category": "CLASSIFICATION"}
            ],
            "entityDefs": []
        });
        let parsed: TypeDefResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.classification_defs[0].display_name, "PII");
        assert_eq!(parsed.classification_defs[0].name, "s1Z8vEoH7Ta3");
    }
}
