//! InMemoryClient: AtlanApi backed by a map in process memory.
//!
//! Applies the tenant's save semantics (explicit nulls clear, append/remove
//! relationship maps edit sets in place, placeholder GUIDs are assigned) and
//! evaluates index-search queries directly, so operation code can be
//! exercised without a tenant. Every call is recorded for inspection.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use atlan_core::entity::{AttributeMap, Entity};
use atlan_core::enums::{AtlanDeleteType, AtlanStatus, SortOrder};
use atlan_core::error::{AtlanError, ErrorCode, Result};
use atlan_core::guid::is_placeholder_guid;
use atlan_core::mutation::AssetMutationResponse;
use atlan_core::reference::Reference;
use atlan_core::registry;
use atlan_core::search::{IndexSearchRequest, IndexSearchResponse, Query, SortItem};
use atlan_core::tag::{AtlanTag, AtlanTagDef};
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{AtlanApi, GetOptions, SaveOptions};

/// One call made against an [`InMemoryClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetByGuid(String),
    GetByUniqueAttribute {
        type_name: String,
        qualified_name: String,
    },
    PartialUpdate {
        type_name: String,
        qualified_name: String,
        entity: Entity,
    },
    Save {
        entities: Vec<Entity>,
        options: SaveOptions,
    },
    Delete {
        guids: Vec<String>,
        delete_type: AtlanDeleteType,
    },
    AddAtlanTags {
        type_name: String,
        qualified_name: String,
        tags: Vec<AtlanTag>,
    },
    RemoveAtlanTag {
        type_name: String,
        qualified_name: String,
        tag_id: String,
    },
    Search(IndexSearchRequest),
    AtlanTagDefs,
}

#[derive(Default)]
struct Store {
    entities: BTreeMap<String, Entity>,
    tag_defs: Vec<AtlanTagDef>,
    calls: Vec<ApiCall>,
}

impl Store {
    fn guid_for(&self, type_name: &str, qualified_name: &str) -> Option<String> {
        self.entities
            .iter()
            .find(|(_, e)| e.type_name == type_name && e.qualified_name() == Some(qualified_name))
            .map(|(guid, _)| guid.clone())
    }

    fn require_guid_for(&self, type_name: &str, qualified_name: &str) -> Result<String> {
        self.guid_for(type_name, qualified_name).ok_or_else(|| {
            AtlanError::not_found(
                ErrorCode::NotFoundOnServer,
                format!("no {} with qualifiedName {}", type_name, qualified_name),
            )
        })
    }
}

#[derive(Default)]
pub struct InMemoryClient {
    store: RwLock<Store>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entity` as-is, assigning a GUID if it has none (or only a
    /// placeholder) and defaulting its status to active. Returns the GUID.
    pub async fn insert(&self, mut entity: Entity) -> String {
        let guid = match entity.guid.as_deref() {
            Some(g) if !g.is_empty() && !is_placeholder_guid(g) => g.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        entity.guid = Some(guid.clone());
        entity.status.get_or_insert(AtlanStatus::Active);
        self.store.write().await.entities.insert(guid.clone(), entity);
        guid
    }

    pub async fn define_atlan_tag(&self, id: &str, display_name: &str) {
        self.store.write().await.tag_defs.push(AtlanTagDef {
            name: id.to_string(),
            display_name: display_name.to_string(),
            ..Default::default()
        });
    }

    pub async fn entity(&self, guid: &str) -> Option<Entity> {
        self.store.read().await.entities.get(guid).cloned()
    }

    pub async fn find(&self, type_name: &str, qualified_name: &str) -> Option<Entity> {
        let store = self.store.read().await;
        store
            .guid_for(type_name, qualified_name)
            .and_then(|guid| store.entities.get(&guid).cloned())
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.store.read().await.calls.clone()
    }

    pub async fn clear_calls(&self) {
        self.store.write().await.calls.clear();
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Applies `incoming` to a stored entity the way the tenant does.
fn merge(stored: &mut Entity, incoming: Entity, options: SaveOptions) {
    for (key, value) in incoming.attributes {
        if value.is_null() {
            stored.attributes.remove(&key);
        } else {
            stored.attributes.insert(key, value);
        }
    }
    for (key, value) in incoming.append_relationship_attributes {
        append_references(&mut stored.attributes, key, value);
    }
    for (key, value) in incoming.remove_relationship_attributes {
        remove_references(&mut stored.attributes, &key, &value);
    }
    if let Some(status) = incoming.status {
        stored.status = Some(status);
    }
    if options.replace_atlan_tags {
        stored.atlan_tags = attach_tags(incoming.atlan_tags, stored.guid.as_deref());
    }
    if options.replace_custom_metadata || options.overwrite_custom_metadata {
        stored.custom_metadata = incoming.custom_metadata;
    } else {
        stored.custom_metadata.extend(incoming.custom_metadata);
    }
    stored.update_time = Some(now_millis());
}

fn attach_tags(tags: Vec<AtlanTag>, guid: Option<&str>) -> Vec<AtlanTag> {
    tags.into_iter()
        .map(|mut tag| {
            tag.entity_guid = guid.map(str::to_string);
            tag.entity_status = Some(AtlanStatus::Active);
            tag
        })
        .collect()
}

fn as_reference(value: &Value) -> Option<Reference> {
    serde_json::from_value(value.clone()).ok()
}

fn same_target(a: &Value, b: &Value) -> bool {
    match (as_reference(a), as_reference(b)) {
        (Some(a), Some(b)) => a.targets_same(&b),
        _ => a == b,
    }
}

fn append_references(attributes: &mut AttributeMap, key: String, value: Value) {
    match value {
        Value::Array(items) => {
            let entry = attributes
                .entry(key)
                .or_insert_with(|| Value::Array(Vec::new()));
            if !entry.is_array() {
                *entry = Value::Array(Vec::new());
            }
            if let Value::Array(existing) = entry {
                for item in items {
                    if !existing.iter().any(|e| same_target(e, &item)) {
                        existing.push(item);
                    }
                }
            }
        }
        single => {
            attributes.insert(key, single);
        }
    }
}

fn remove_references(attributes: &mut AttributeMap, key: &str, value: &Value) {
    let removals: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    let clear = match attributes.get_mut(key) {
        Some(Value::Array(existing)) => {
            existing.retain(|e| !removals.iter().any(|r| same_target(e, r)));
            false
        }
        Some(single) => removals.iter().any(|r| same_target(single, r)),
        None => false,
    };
    if clear {
        attributes.remove(key);
    }
}

fn qualified_name_of(value: &Value, entities: &BTreeMap<String, Entity>) -> Option<String> {
    let reference = as_reference(value)?;
    if let Some(qn) = reference.qualified_name() {
        return Some(qn.to_string());
    }
    let guid = reference.guid?;
    entities
        .get(&guid)
        .and_then(|e| e.qualified_name())
        .map(str::to_string)
}

/// Values of an index field on a stored entity.
fn field_values(entity: &Entity, field: &str, entities: &BTreeMap<String, Entity>) -> Vec<Value> {
    let opt = |v: Option<Value>| v.into_iter().collect::<Vec<_>>();
    match field {
        "__typeName" | "__typeName.keyword" => vec![Value::String(entity.type_name.clone())],
        "__superTypeNames" | "__superTypeNames.keyword" => registry::lookup(&entity.type_name)
            .map(|r| r.super_types.iter().map(|s| Value::from(*s)).collect())
            .unwrap_or_default(),
        "__guid" => opt(entity.guid.clone().map(Value::String)),
        "__state" => vec![Value::String(entity.status().to_string())],
        "__createdBy" => opt(entity.created_by.clone().map(Value::String)),
        "__modifiedBy" => opt(entity.updated_by.clone().map(Value::String)),
        "__timestamp" => opt(entity.create_time.map(Value::from)),
        "__modificationTimestamp" => opt(entity.update_time.map(Value::from)),
        "__traitNames" => entity
            .atlan_tags
            .iter()
            .map(|t| Value::String(t.type_name.clone()))
            .collect(),
        "__propagatedTraitNames" => Vec::new(),
        "__hasLineage" => opt(entity.attributes.get("hasLineage").cloned()),
        "__meanings" => match entity.attributes.get("meanings") {
            Some(Value::Array(refs)) => refs
                .iter()
                .filter_map(|r| qualified_name_of(r, entities))
                .map(Value::String)
                .collect(),
            _ => Vec::new(),
        },
        other => {
            let name = other
                .strip_suffix(".keyword")
                .or_else(|| other.strip_suffix(".text"))
                .unwrap_or(other);
            match entity.attributes.get(name) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items.clone(),
                Some(value) => vec![value.clone()],
            }
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn matches(query: &Query, entity: &Entity, entities: &BTreeMap<String, Entity>) -> bool {
    let values = |field: &str| field_values(entity, field, entities);
    match query {
        Query::MatchAll => true,
        Query::Term { field, value } => values(field).iter().any(|v| values_equal(v, value)),
        Query::Terms { field, values: wanted } => values(field)
            .iter()
            .any(|v| wanted.iter().any(|w| values_equal(v, w))),
        Query::Prefix { field, value } => values(field)
            .iter()
            .filter_map(Value::as_str)
            .any(|v| v.starts_with(value.as_str())),
        Query::Exists { field } => !values(field).is_empty(),
        Query::Range { field, bounds } => values(field).iter().filter_map(Value::as_f64).any(|v| {
            let check = |bound: &Option<Value>, ok: fn(f64, f64) -> bool| {
                bound
                    .as_ref()
                    .and_then(Value::as_f64)
                    .map_or(true, |b| ok(v, b))
            };
            check(&bounds.gt, |v, b| v > b)
                && check(&bounds.gte, |v, b| v >= b)
                && check(&bounds.lt, |v, b| v < b)
                && check(&bounds.lte, |v, b| v <= b)
        }),
        Query::Match { field, query } => {
            let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
            values(field)
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_lowercase)
                .any(|v| tokens.iter().any(|t| v.contains(t.as_str())))
        }
        Query::Bool(b) => {
            let all = |qs: &[Query]| qs.iter().all(|q| matches(q, entity, entities));
            if !all(&b.must) || !all(&b.filter) {
                return false;
            }
            if b.must_not.iter().any(|q| matches(q, entity, entities)) {
                return false;
            }
            let required = b.minimum_should_match.unwrap_or(
                if b.should.is_empty() || !b.must.is_empty() || !b.filter.is_empty() {
                    0
                } else {
                    1
                },
            ) as usize;
            b.should
                .iter()
                .filter(|q| matches(q, entity, entities))
                .count()
                >= required
        }
    }
}

fn sort_entities(hits: &mut [Entity], sort: &[SortItem], entities: &BTreeMap<String, Entity>) {
    hits.sort_by(|a, b| {
        for item in sort {
            let va = field_values(a, &item.field, entities).into_iter().next();
            let vb = field_values(b, &item.field, entities).into_iter().next();
            let ordering = match (va, vb) {
                (Some(x), Some(y)) => {
                    let o = compare_values(&x, &y);
                    if item.order == SortOrder::Desc {
                        o.reverse()
                    } else {
                        o
                    }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

#[async_trait]
impl AtlanApi for InMemoryClient {
    async fn get_by_guid(&self, guid: &str, _options: GetOptions) -> Result<Entity> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::GetByGuid(guid.to_string()));
        store.entities.get(guid).cloned().ok_or_else(|| {
            AtlanError::not_found(
                ErrorCode::NotFoundOnServer,
                format!("no entity with GUID {}", guid),
            )
        })
    }

    async fn get_by_unique_attribute(
        &self,
        type_name: &str,
        qualified_name: &str,
        _options: GetOptions,
    ) -> Result<Entity> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::GetByUniqueAttribute {
            type_name: type_name.to_string(),
            qualified_name: qualified_name.to_string(),
        });
        let guid = store.require_guid_for(type_name, qualified_name)?;
        Ok(store.entities[&guid].clone())
    }

    async fn partial_update(
        &self,
        type_name: &str,
        qualified_name: &str,
        entity: Entity,
    ) -> Result<AssetMutationResponse> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::PartialUpdate {
            type_name: type_name.to_string(),
            qualified_name: qualified_name.to_string(),
            entity: entity.clone(),
        });
        let guid = store.require_guid_for(type_name, qualified_name)?;
        let mut response = AssetMutationResponse::default();
        if let Some(stored) = store.entities.get_mut(&guid) {
            merge(stored, entity, SaveOptions::default());
            response
                .mutated_entities
                .partially_updated
                .push(stored.clone());
        }
        Ok(response)
    }

    async fn save(
        &self,
        entities: Vec<Entity>,
        options: SaveOptions,
    ) -> Result<AssetMutationResponse> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::Save {
            entities: entities.clone(),
            options,
        });
        if let Some(bad) = entities.iter().find(|e| e.qualified_name().is_none()) {
            return Err(AtlanError::invalid_request(
                ErrorCode::RejectedByServer,
                format!("{} submitted without a qualifiedName", bad.type_name),
            ));
        }

        let mut response = AssetMutationResponse::default();
        for mut incoming in entities {
            let by_guid = incoming
                .guid
                .as_ref()
                .filter(|g| store.entities.contains_key(g.as_str()))
                .cloned();
            let existing = by_guid.or_else(|| {
                incoming
                    .qualified_name()
                    .and_then(|qn| store.guid_for(&incoming.type_name, qn))
            });

            match existing {
                Some(guid) => {
                    if let Some(stored) = store.entities.get_mut(&guid) {
                        merge(stored, incoming, options);
                        response.mutated_entities.updated.push(stored.clone());
                    }
                }
                None => {
                    let guid = Uuid::new_v4().to_string();
                    if let Some(placeholder) = incoming.guid.as_deref().filter(|g| is_placeholder_guid(g)) {
                        response
                            .guid_assignments
                            .insert(placeholder.to_string(), guid.clone());
                    }
                    let now = now_millis();
                    let tags = std::mem::take(&mut incoming.atlan_tags);
                    let mut created = Entity {
                        type_name: incoming.type_name.clone(),
                        guid: Some(guid.clone()),
                        status: Some(AtlanStatus::Active),
                        create_time: Some(now),
                        labels: incoming.labels.clone(),
                        ..Default::default()
                    };
                    merge(&mut created, incoming, options);
                    created.atlan_tags = attach_tags(tags, Some(&guid));
                    debug!(type_name = %created.type_name, guid = %guid, "created entity");
                    response.mutated_entities.created.push(created.clone());
                    store.entities.insert(guid, created);
                }
            }
        }
        Ok(response)
    }

    async fn delete(
        &self,
        guids: &[String],
        delete_type: AtlanDeleteType,
    ) -> Result<AssetMutationResponse> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::Delete {
            guids: guids.to_vec(),
            delete_type,
        });
        if let Some(missing) = guids.iter().find(|g| !store.entities.contains_key(g.as_str())) {
            return Err(AtlanError::not_found(
                ErrorCode::NotFoundOnServer,
                format!("no entity with GUID {}", missing),
            ));
        }
        let mut response = AssetMutationResponse::default();
        for guid in guids {
            match delete_type {
                AtlanDeleteType::Soft => {
                    if let Some(stored) = store.entities.get_mut(guid) {
                        stored.status = Some(AtlanStatus::Deleted);
                        stored.update_time = Some(now_millis());
                        response.mutated_entities.deleted.push(stored.clone());
                    }
                }
                AtlanDeleteType::Hard | AtlanDeleteType::Purge => {
                    if let Some(mut removed) = store.entities.remove(guid) {
                        removed.status = Some(AtlanStatus::Purged);
                        response.mutated_entities.deleted.push(removed);
                    }
                }
            }
        }
        Ok(response)
    }

    async fn add_atlan_tags(
        &self,
        type_name: &str,
        qualified_name: &str,
        tags: Vec<AtlanTag>,
    ) -> Result<()> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::AddAtlanTags {
            type_name: type_name.to_string(),
            qualified_name: qualified_name.to_string(),
            tags: tags.clone(),
        });
        if let Some(unknown) = tags
            .iter()
            .find(|t| !store.tag_defs.iter().any(|d| d.name == t.type_name))
        {
            return Err(AtlanError::invalid_request(
                ErrorCode::RejectedByServer,
                format!("classification {} is not defined", unknown.type_name),
            ));
        }
        let guid = store.require_guid_for(type_name, qualified_name)?;
        if let Some(stored) = store.entities.get_mut(&guid) {
            for tag in attach_tags(tags, Some(&guid)) {
                stored.atlan_tags.retain(|t| t.type_name != tag.type_name);
                stored.atlan_tags.push(tag);
            }
        }
        Ok(())
    }

    async fn remove_atlan_tag(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_id: &str,
    ) -> Result<()> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::RemoveAtlanTag {
            type_name: type_name.to_string(),
            qualified_name: qualified_name.to_string(),
            tag_id: tag_id.to_string(),
        });
        let guid = store.require_guid_for(type_name, qualified_name)?;
        let Some(stored) = store.entities.get_mut(&guid) else {
            return Ok(());
        };
        let before = stored.atlan_tags.len();
        stored.atlan_tags.retain(|t| t.type_name != tag_id);
        if stored.atlan_tags.len() == before {
            return Err(AtlanError::invalid_request(
                ErrorCode::RejectedByServer,
                format!("classification {} is not associated with {}", tag_id, guid),
            ));
        }
        Ok(())
    }

    async fn search(&self, request: &IndexSearchRequest) -> Result<IndexSearchResponse> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::Search(request.clone()));
        let entities = &store.entities;
        let mut hits: Vec<Entity> = entities
            .values()
            .filter(|e| matches(&request.dsl.query, e, entities))
            .cloned()
            .collect();
        sort_entities(&mut hits, &request.dsl.sort, entities);
        let approximate_count = hits.len() as u64;
        let page = hits
            .into_iter()
            .skip(request.dsl.from)
            .take(request.dsl.size)
            .collect();
        Ok(IndexSearchResponse {
            approximate_count,
            entities: page,
        })
    }

    async fn atlan_tag_defs(&self) -> Result<Vec<AtlanTagDef>> {
        let mut store = self.store.write().await;
        store.calls.push(ApiCall::AtlanTagDefs);
        Ok(store.tag_defs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlan_core::enums::SaveSemantic;
    use atlan_core::search::fields;
    use atlan_core::search::FluentSearch;
    use serde_json::json;

    fn table(qn: &str, name: &str) -> Entity {
        let mut e = Entity::new("Table");
        e.set_attribute("qualifiedName", json!(qn));
        e.set_attribute("name", json!(name));
        e
    }

    #[tokio::test]
    async fn save_creates_and_assigns_guid() {
        let api = InMemoryClient::new();
        let mut e = table("default/snowflake/1/db/s/t", "t");
        e.guid = Some("-123".into());
        let response = api.save(vec![e], SaveOptions::default()).await.unwrap();
        let guid = response.assigned_guid("-123").unwrap().to_string();
        let stored = api.entity(&guid).await.unwrap();
        assert_eq!(stored.status(), AtlanStatus::Active);
        assert_eq!(response.mutated_entities.created.len(), 1);
    }

    #[tokio::test]
    async fn save_merges_nulls_and_relationship_edits() {
        let api = InMemoryClient::new();
        let mut seed = table("qn/t", "t");
        seed.set_attribute("description", json!("old"));
        seed.set_attribute(
            "meanings",
            json!([{"typeName": "AtlasGlossaryTerm", "guid": "term-1"}]),
        );
        let guid = api.insert(seed).await;

        let mut update = Entity::updater("Table", "qn/t", "t").unwrap();
        update.set_null("description");
        update
            .set_relationships(
                "meanings",
                &[
                    Reference::by_guid("AtlasGlossaryTerm", "term-2", SaveSemantic::Append).unwrap(),
                    Reference::by_guid("AtlasGlossaryTerm", "term-1", SaveSemantic::Remove).unwrap(),
                ],
            )
            .unwrap();
        let response = api.save(vec![update], SaveOptions::default()).await.unwrap();
        assert_eq!(response.mutated_entities.updated.len(), 1);

        let stored = api.entity(&guid).await.unwrap();
        assert!(stored.attribute("description").is_none());
        assert_eq!(
            stored.attributes["meanings"],
            json!([{"typeName": "AtlasGlossaryTerm", "guid": "term-2"}])
        );
    }

    #[tokio::test]
    async fn save_without_qualified_name_is_rejected() {
        let api = InMemoryClient::new();
        let err = api
            .save(vec![Entity::new("Table")], SaveOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::RejectedByServer));
    }

    #[tokio::test]
    async fn soft_delete_then_purge() {
        let api = InMemoryClient::new();
        let guid = api.insert(table("qn/t", "t")).await;
        api.delete(&[guid.clone()], AtlanDeleteType::Soft).await.unwrap();
        assert_eq!(api.entity(&guid).await.unwrap().status(), AtlanStatus::Deleted);
        let r = api.delete(&[guid.clone()], AtlanDeleteType::Purge).await.unwrap();
        assert_eq!(r.mutated_entities.deleted[0].status(), AtlanStatus::Purged);
        assert!(api.entity(&guid).await.is_none());
        assert!(api
            .delete(&[guid], AtlanDeleteType::Soft)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn search_filters_sorts_and_pages() {
        let api = InMemoryClient::new();
        for (i, name) in ["c", "a", "b"].iter().enumerate() {
            let mut e = table(&format!("qn/{}", name), name);
            e.set_attribute("popularityScore", json!(i));
            api.insert(e).await;
        }
        let mut view = Entity::new("View");
        view.set_attribute("qualifiedName", json!("qn/v"));
        api.insert(view).await;

        let request = FluentSearch::for_type_name("Table", false)
            .filter(fields::POPULARITY_SCORE.gte(1))
            .sort("name.keyword", SortOrder::Asc)
            .page_size(1)
            .to_request();
        let page = api.search(&request).await.unwrap();
        assert_eq!(page.approximate_count, 2);
        assert_eq!(page.entities.len(), 1);
        assert_eq!(page.entities[0].name(), Some("a"));

        let next = api.search(&request.at_offset(1)).await.unwrap();
        assert_eq!(next.entities[0].name(), Some("b"));
    }

    #[tokio::test]
    async fn search_by_super_type_and_terms() {
        let api = InMemoryClient::new();
        let mut term = Entity::new("AtlasGlossaryTerm");
        term.set_attribute("qualifiedName", json!("revenue@finance"));
        let term_guid = api.insert(term).await;

        let mut t = table("qn/t", "t");
        t.set_attribute("meanings", json!([{"typeName": "AtlasGlossaryTerm", "guid": term_guid}]));
        api.insert(t).await;

        let by_term = FluentSearch::new()
            .filter(fields::ASSIGNED_TERMS.eq("revenue@finance"))
            .to_request();
        assert_eq!(api.search(&by_term).await.unwrap().entities.len(), 1);

        let by_super = FluentSearch::new()
            .filter(fields::SUPER_TYPE_NAMES.eq("SQL"))
            .to_request();
        assert_eq!(api.search(&by_super).await.unwrap().entities.len(), 1);
    }

    #[tokio::test]
    async fn match_and_should_clauses() {
        let api = InMemoryClient::new();
        let mut a = table("qn/a", "Revenue Report");
        a.set_attribute("certificateStatus", json!("VERIFIED"));
        api.insert(a).await;
        api.insert(table("qn/b", "Cost Report")).await;

        let matched = FluentSearch::new()
            .filter(fields::NAME.matches("revenue"))
            .to_request();
        assert_eq!(api.search(&matched).await.unwrap().entities.len(), 1);

        let either = FluentSearch::new()
            .any_of(fields::CERTIFICATE_STATUS.eq("VERIFIED"))
            .any_of(fields::NAME.eq("Cost Report"))
            .to_request();
        assert_eq!(api.search(&either).await.unwrap().entities.len(), 2);

        let not_verified = FluentSearch::new()
            .filter_not(fields::CERTIFICATE_STATUS.has_any_value())
            .to_request();
        let hits = api.search(&not_verified).await.unwrap().entities;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), Some("Cost Report"));
    }

    #[tokio::test]
    async fn tags_must_be_defined() {
        let api = InMemoryClient::new();
        api.insert(table("qn/t", "t")).await;
        let err = api
            .add_atlan_tags("Table", "qn/t", vec![AtlanTag::new("nope")])
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::RejectedByServer));

        api.define_atlan_tag("id-1", "PII").await;
        api.add_atlan_tags("Table", "qn/t", vec![AtlanTag::new("id-1")])
            .await
            .unwrap();
        let stored = api.find("Table", "qn/t").await.unwrap();
        assert_eq!(stored.atlan_tags[0].entity_guid, stored.guid);

        api.remove_atlan_tag("Table", "qn/t", "id-1").await.unwrap();
        assert!(api
            .remove_atlan_tag("Table", "qn/t", "id-1")
            .await
            .is_err());
    }
}
