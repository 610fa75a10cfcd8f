//! The REST envelope every asset travels in.
//!
//! `Entity` is deliberately loose: attributes are a JSON object so that the
//! same envelope serves every asset type, the untyped CLI paths, and the
//! in-memory API. Typed assets convert to and from it through
//! [`AssetType::to_entity`](crate::asset::AssetType::to_entity) and
//! [`AssetType::from_entity`](crate::asset::AssetType::from_entity).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::enums::{AtlanStatus, SaveSemantic};
use crate::error::{AtlanError, Result};
use crate::guid::placeholder_guid;
use crate::reference::{Reference, SAVE_SEMANTIC_KEY};
use crate::tag::{AtlanTag, TermAssignmentHeader};

pub type AttributeMap = Map<String, Value>;

pub const QUALIFIED_NAME: &str = "qualifiedName";
pub const NAME: &str = "name";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AtlanStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_incomplete: Option<bool>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub attributes: AttributeMap,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub relationship_attributes: AttributeMap,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub append_relationship_attributes: AttributeMap,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub remove_relationship_attributes: AttributeMap,
    #[serde(
        rename = "classifications",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub atlan_tags: Vec<AtlanTag>,
    #[serde(
        rename = "classificationNames",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub atlan_tag_names: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub meanings: Vec<TermAssignmentHeader>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub meaning_names: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub labels: Vec<String>,
    #[serde(
        rename = "businessAttributes",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub custom_metadata: AttributeMap,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fails with a missing-update-parameter error listing every blank value.
pub fn validate_required(type_name: &str, required: &[(&str, Option<&str>)]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(field, _)| *field)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AtlanError::missing_update_params(type_name, &missing))
    }
}

impl Entity {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Minimal envelope for updating an existing asset: placeholder GUID,
    /// qualified name and name.
    pub fn updater(type_name: &str, qualified_name: &str, name: &str) -> Result<Self> {
        validate_required(
            type_name,
            &[(QUALIFIED_NAME, Some(qualified_name)), (NAME, Some(name))],
        )?;
        let mut entity = Self::new(type_name);
        entity.guid = Some(placeholder_guid());
        entity.set_attribute(QUALIFIED_NAME, Value::String(qualified_name.to_string()));
        entity.set_attribute(NAME, Value::String(name.to_string()));
        Ok(entity)
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.attributes.get(QUALIFIED_NAME).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get(NAME).and_then(Value::as_str)
    }

    pub fn status(&self) -> AtlanStatus {
        self.status.unwrap_or_default()
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    /// Sends `key` as an explicit JSON null, clearing it on the tenant.
    pub fn set_null(&mut self, key: impl Into<String>) {
        self.attributes.insert(key.into(), Value::Null);
    }

    /// Attaches references to a relationship attribute, honouring each
    /// reference's save semantic.
    pub fn set_relationships(&mut self, key: &str, references: &[Reference]) -> Result<()> {
        self.attributes
            .insert(key.to_string(), serde_json::to_value(references)?);
        self.route_relationships();
        Ok(())
    }

    /// Moves references marked `APPEND` or `REMOVE` out of `attributes` into
    /// the matching relationship map. An attribute left holding no replace
    /// references is dropped so it does not clear the existing set.
    pub fn route_relationships(&mut self) {
        let attributes = std::mem::take(&mut self.attributes);
        for (key, value) in attributes {
            match value {
                Value::Object(mut obj) if obj.contains_key(SAVE_SEMANTIC_KEY) => {
                    match take_semantic(&mut obj) {
                        SaveSemantic::Replace => {
                            self.attributes.insert(key, Value::Object(obj));
                        }
                        SaveSemantic::Append => {
                            self.append_relationship_attributes
                                .insert(key, Value::Object(obj));
                        }
                        SaveSemantic::Remove => {
                            self.remove_relationship_attributes
                                .insert(key, Value::Object(obj));
                        }
                    }
                }
                Value::Array(items) if items.iter().any(has_semantic) => {
                    let mut replace = Vec::new();
                    let mut append = Vec::new();
                    let mut remove = Vec::new();
                    for item in items {
                        match item {
                            Value::Object(mut obj) => match take_semantic(&mut obj) {
                                SaveSemantic::Replace => replace.push(Value::Object(obj)),
                                SaveSemantic::Append => append.push(Value::Object(obj)),
                                SaveSemantic::Remove => remove.push(Value::Object(obj)),
                            },
                            other => replace.push(other),
                        }
                    }
                    if !replace.is_empty() {
                        self.attributes.insert(key.clone(), Value::Array(replace));
                    }
                    extend_array(&mut self.append_relationship_attributes, &key, append);
                    extend_array(&mut self.remove_relationship_attributes, &key, remove);
                }
                other => {
                    self.attributes.insert(key, other);
                }
            }
        }
    }

    /// Attributes with `relationshipAttributes` folded in wherever the plain
    /// attribute is absent or null.
    pub fn merged_attributes(&self) -> AttributeMap {
        let mut merged = self.attributes.clone();
        for (key, value) in &self.relationship_attributes {
            let absent = matches!(merged.get(key), None | Some(Value::Null));
            if absent {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

fn has_semantic(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key(SAVE_SEMANTIC_KEY))
}

fn take_semantic(obj: &mut Map<String, Value>) -> SaveSemantic {
    obj.remove(SAVE_SEMANTIC_KEY)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

fn extend_array(target: &mut AttributeMap, key: &str, items: Vec<Value>) {
    if items.is_empty() {
        return;
    }
    match target.get_mut(key) {
        Some(Value::Array(existing)) => existing.extend(items),
        _ => {
            target.insert(key.to_string(), Value::Array(items));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn term(guid: &str, semantic: SaveSemantic) -> Reference {
        Reference::by_guid("AtlasGlossaryTerm", guid, semantic).unwrap()
    }

    #[test]
    fn updater_requires_qualified_name_and_name() {
        let err = Entity::updater("Table", "", " ").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::MissingRequiredUpdateParam));
        assert!(err.to_string().contains("qualifiedName, name"));

        let entity = Entity::updater("Table", "default/postgres/1/db/s/t", "t").unwrap();
        assert!(entity.guid.as_deref().unwrap().starts_with('-'));
        assert_eq!(entity.qualified_name(), Some("default/postgres/1/db/s/t"));
        assert_eq!(entity.name(), Some("t"));
    }

    #[test]
    fn append_and_remove_are_routed() {
        let mut entity = Entity::new("Table");
        entity
            .set_relationships(
                "meanings",
                &[
                    term("t-1", SaveSemantic::Append),
                    term("t-2", SaveSemantic::Remove),
                    term("t-3", SaveSemantic::Append),
                ],
            )
            .unwrap();

        assert!(entity.attribute("meanings").is_none());
        assert_eq!(
            entity.append_relationship_attributes["meanings"],
            json!([
                {"typeName": "AtlasGlossaryTerm", "guid": "t-1"},
                {"typeName": "AtlasGlossaryTerm", "guid": "t-3"}
            ])
        );
        assert_eq!(
            entity.remove_relationship_attributes["meanings"],
            json!([{"typeName": "AtlasGlossaryTerm", "guid": "t-2"}])
        );
    }

    #[test]
    fn replace_references_stay_in_attributes() {
        let mut entity = Entity::new("Table");
        entity
            .set_relationships(
                "meanings",
                &[term("t-1", SaveSemantic::Replace), term("t-2", SaveSemantic::Append)],
            )
            .unwrap();
        assert_eq!(
            entity.attributes["meanings"],
            json!([{"typeName": "AtlasGlossaryTerm", "guid": "t-1"}])
        );
        assert_eq!(entity.append_relationship_attributes["meanings"][0]["guid"], "t-2");
    }

    #[test]
    fn single_reference_routed() {
        let mut entity = Entity::new("PowerBITile");
        let mut dashboard = serde_json::to_value(
            Reference::by_guid("PowerBIDashboard", "d-1", SaveSemantic::Remove).unwrap(),
        )
        .unwrap();
        entity.set_attribute("dashboard", dashboard.take());
        entity.route_relationships();
        assert!(entity.attributes.is_empty());
        assert_eq!(
            entity.remove_relationship_attributes["dashboard"],
            json!({"typeName": "PowerBIDashboard", "guid": "d-1"})
        );
    }

    #[test]
    fn merged_attributes_prefers_plain_values() {
        let entity: Entity = serde_json::from_value(json!({
            "typeName": "PowerBIReport",
            "guid": "r-1",
            "attributes": {"qualifiedName": "qn", "workspace": null, "dataset": {"typeName": "PowerBIDataset", "guid": "plain"}},
            "relationshipAttributes": {
                "workspace": {"typeName": "PowerBIWorkspace", "guid": "w-1"},
                "dataset": {"typeName": "PowerBIDataset", "guid": "rel"}
            }
        }))
        .unwrap();
        let merged = entity.merged_attributes();
        assert_eq!(merged["workspace"]["guid"], "w-1");
        assert_eq!(merged["dataset"]["guid"], "plain");
    }

    #[test]
    fn null_collections_deserialise_as_empty() {
        let entity: Entity = serde_json::from_value(json!({
            "typeName": "Table",
            "classifications": null,
            "meanings": null,
            "attributes": null
        }))
        .unwrap();
        assert!(entity.atlan_tags.is_empty());
        assert!(entity.meanings.is_empty());
        assert!(entity.attributes.is_empty());
        assert_eq!(entity.status(), AtlanStatus::Active);
    }

    #[test]
    fn empty_collections_are_not_serialised() {
        let json = serde_json::to_value(Entity::new("Table")).unwrap();
        assert_eq!(json, json!({"typeName": "Table"}));
    }
}
