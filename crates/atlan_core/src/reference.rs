//! Relationship references.
//!
//! A reference is the minimal stub used to point at another asset from a
//! relationship attribute: a type name plus either a GUID or a qualified name.
//! Two references are the same relationship target when their type name,
//! GUID and qualified name agree; the save semantic and the read-only fields
//! returned by the tenant do not take part in identity.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::enums::{AtlanStatus, SaveSemantic};
use crate::error::{AtlanError, Result};

/// JSON key carrying a non-replace save semantic until the entity envelope
/// routes the reference into the append/remove relationship maps.
pub(crate) const SAVE_SEMANTIC_KEY: &str = "saveSemantic";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_attributes: Option<UniqueAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_status: Option<AtlanStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_status: Option<AtlanStatus>,
    #[serde(
        rename = "saveSemantic",
        default,
        skip_serializing_if = "SaveSemantic::is_replace"
    )]
    pub semantic: SaveSemantic,
}

impl Reference {
    pub fn by_guid(
        type_name: impl Into<String>,
        guid: impl Into<String>,
        semantic: SaveSemantic,
    ) -> Result<Self> {
        let type_name = type_name.into();
        let guid = guid.into();
        if guid.trim().is_empty() {
            return Err(AtlanError::missing_relationship_param(&type_name));
        }
        Ok(Self {
            type_name,
            guid: Some(guid),
            semantic,
            ..Default::default()
        })
    }

    pub fn by_qualified_name(
        type_name: impl Into<String>,
        qualified_name: impl Into<String>,
        semantic: SaveSemantic,
    ) -> Result<Self> {
        let type_name = type_name.into();
        let qualified_name = qualified_name.into();
        if qualified_name.trim().is_empty() {
            return Err(AtlanError::missing_relationship_param(&type_name));
        }
        Ok(Self {
            type_name,
            unique_attributes: Some(UniqueAttributes {
                qualified_name: Some(qualified_name),
            }),
            semantic,
            ..Default::default()
        })
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.unique_attributes
            .as_ref()
            .and_then(|u| u.qualified_name.as_deref())
    }

    pub fn with_semantic(mut self, semantic: SaveSemantic) -> Self {
        self.semantic = semantic;
        self
    }

    /// Looser than equality: true when both point at the same asset by GUID,
    /// or by type name and qualified name.
    pub fn targets_same(&self, other: &Reference) -> bool {
        match (self.guid.as_deref(), other.guid.as_deref()) {
            (Some(a), Some(b)) if a == b => return true,
            _ => {}
        }
        match (self.qualified_name(), other.qualified_name()) {
            (Some(a), Some(b)) => a == b && self.type_name == other.type_name,
            _ => false,
        }
    }

    fn identity(&self) -> (&str, Option<&str>, Option<&str>) {
        (
            self.type_name.as_str(),
            self.guid.as_deref(),
            self.qualified_name(),
        )
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Reference {}

impl PartialOrd for Reference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl std::hash::Hash for Reference {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn empty_guid_is_rejected() {
        let err = Reference::by_guid("Table", "  ", SaveSemantic::Replace).unwrap_err();
        assert_eq!(
            err.code(),
            Some(crate::error::ErrorCode::MissingRequiredRelationshipParam)
        );
    }

    #[test]
    fn empty_qualified_name_is_rejected() {
        assert!(Reference::by_qualified_name("Table", "", SaveSemantic::Append).is_err());
    }

    #[test]
    fn replace_semantic_is_not_serialised() {
        let r = Reference::by_guid("Table", "g-1", SaveSemantic::Replace).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json, serde_json::json!({"typeName": "Table", "guid": "g-1"}));
    }

    #[test]
    fn append_semantic_is_serialised() {
        let r = Reference::by_qualified_name("Table", "default/x/1/db/s/t", SaveSemantic::Append)
            .unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json[SAVE_SEMANTIC_KEY], "APPEND");
        assert_eq!(json["uniqueAttributes"]["qualifiedName"], "default/x/1/db/s/t");
    }

    #[test]
    fn identity_ignores_semantic_and_read_only_fields() {
        let a = Reference::by_guid("AtlasGlossaryTerm", "t-1", SaveSemantic::Append).unwrap();
        let mut b = Reference::by_guid("AtlasGlossaryTerm", "t-1", SaveSemantic::Remove).unwrap();
        b.display_text = Some("Revenue".into());
        assert_eq!(a, b);

        let set: BTreeSet<Reference> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn targets_same_by_guid_or_qualified_name() {
        let by_guid = Reference::by_guid("Table", "g-1", SaveSemantic::Replace).unwrap();
        let mut fetched = Reference::by_qualified_name("Table", "qn", SaveSemantic::Replace).unwrap();
        fetched.guid = Some("g-1".into());
        assert!(by_guid.targets_same(&fetched));

        let by_qn = Reference::by_qualified_name("Table", "qn", SaveSemantic::Replace).unwrap();
        assert!(by_qn.targets_same(&fetched));
        let other_type = Reference::by_qualified_name("View", "qn", SaveSemantic::Replace).unwrap();
        assert!(!other_type.targets_same(&fetched));
    }

    #[test]
    fn deserialises_tenant_reference() {
        let json = serde_json::json!({
            "guid": "5c3e",
            "typeName": "PowerBIWorkspace",
            "displayText": "Finance",
            "entityStatus": "ACTIVE",
            "relationshipType": "power_bi_workspace_dashboards",
            "relationshipGuid": "r-1",
            "relationshipStatus": "ACTIVE",
            "relationshipAttributes": {"typeName": "power_bi_workspace_dashboards"}
        });
        let r: Reference = serde_json::from_value(json).unwrap();
        assert_eq!(r.guid.as_deref(), Some("5c3e"));
        assert_eq!(r.display_text.as_deref(), Some("Finance"));
        assert!(r.semantic.is_replace());
    }
}
