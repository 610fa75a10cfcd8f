//! Response of the bulk and partial-update endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::asset::AssetType;
use crate::entity::Entity;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutatedEntities {
    #[serde(rename = "CREATE", default, skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<Entity>,
    #[serde(rename = "UPDATE", default, skip_serializing_if = "Vec::is_empty")]
    pub updated: Vec<Entity>,
    #[serde(
        rename = "PARTIAL_UPDATE",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub partially_updated: Vec<Entity>,
    #[serde(rename = "DELETE", default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<Entity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMutationResponse {
    #[serde(default)]
    pub mutated_entities: MutatedEntities,
    /// Placeholder GUID to assigned GUID.
    #[serde(default)]
    pub guid_assignments: BTreeMap<String, String>,
}

impl AssetMutationResponse {
    pub fn assigned_guid(&self, placeholder: &str) -> Option<&str> {
        self.guid_assignments.get(placeholder).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        let m = &self.mutated_entities;
        m.created.is_empty()
            && m.updated.is_empty()
            && m.partially_updated.is_empty()
            && m.deleted.is_empty()
    }

    /// Every entity the tenant reports as changed, created first.
    pub fn all_mutated(&self) -> impl Iterator<Item = &Entity> {
        let m = &self.mutated_entities;
        m.created
            .iter()
            .chain(m.updated.iter())
            .chain(m.partially_updated.iter())
            .chain(m.deleted.iter())
    }

    /// Typed view of the updated (or partially updated) entities of `T`.
    pub fn updated_assets<T: AssetType>(&self) -> Result<Vec<T>> {
        let m = &self.mutated_entities;
        typed(m.updated.iter().chain(m.partially_updated.iter()))
    }

    pub fn created_assets<T: AssetType>(&self) -> Result<Vec<T>> {
        typed(self.mutated_entities.created.iter())
    }

    pub fn deleted_assets<T: AssetType>(&self) -> Result<Vec<T>> {
        typed(self.mutated_entities.deleted.iter())
    }

    /// First entity of `type_name` reported as updated in any form.
    pub fn first_updated(&self, type_name: &str) -> Option<&Entity> {
        let m = &self.mutated_entities;
        m.updated
            .iter()
            .chain(m.partially_updated.iter())
            .find(|e| e.type_name == type_name)
    }
}

fn typed<'a, T: AssetType>(entities: impl Iterator<Item = &'a Entity>) -> Result<Vec<T>> {
    entities
        .filter(|e| e.type_name == T::TYPE_NAME)
        .cloned()
        .map(T::from_entity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sql::Table;
    use serde_json::json;

    fn response() -> AssetMutationResponse {
        serde_json::from_value(json!({
            "mutatedEntities": {
                "CREATE": [
                    {"typeName": "Table", "guid": "g-new", "attributes": {"qualifiedName": "default/snowflake/1/db/s/t2", "name": "t2"}}
                ],
                "UPDATE": [
                    {"typeName": "Table", "guid": "g-1", "attributes": {"qualifiedName": "default/snowflake/1/db/s/t", "name": "t"}},
                    {"typeName": "Schema", "guid": "g-s", "attributes": {"qualifiedName": "default/snowflake/1/db/s", "name": "s"}}
                ]
            },
            "guidAssignments": {"-42": "g-new"}
        }))
        .unwrap()
    }

    #[test]
    fn parses_mutation_buckets() {
        let r = response();
        assert_eq!(r.assigned_guid("-42"), Some("g-new"));
        assert!(!r.is_empty());
        assert_eq!(r.all_mutated().count(), 3);
        assert_eq!(r.first_updated("Schema").unwrap().guid.as_deref(), Some("g-s"));
    }

    #[test]
    fn typed_views_filter_by_type() {
        let r = response();
        let tables: Vec<Table> = r.updated_assets().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name(), Some("t"));
        let created: Vec<Table> = r.created_assets().unwrap();
        assert_eq!(created[0].guid(), Some("g-new"));
        assert!(r.deleted_assets::<Table>().unwrap().is_empty());
    }

    #[test]
    fn empty_response() {
        let r: AssetMutationResponse = serde_json::from_value(json!({})).unwrap();
        assert!(r.is_empty());
    }
}
