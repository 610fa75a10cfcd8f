//! Body and response of `POST /api/meta/search/indexsearch`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::entity::Entity;
use crate::enums::SortOrder;

use super::query::Query;

#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    pub field: String,
    pub order: SortOrder,
}

impl SortItem {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

impl Serialize for SortItem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        json!({ &self.field: { "order": self.order } }).serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSearchDsl {
    pub from: usize,
    pub size: usize,
    pub query: Query,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortItem>,
    pub track_total_hits: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSearchRequest {
    pub dsl: IndexSearchDsl,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relation_attributes: Vec<String>,
    pub suppress_logs: bool,
    pub show_search_score: bool,
    pub exclude_meanings: bool,
    pub exclude_classifications: bool,
}

impl IndexSearchRequest {
    pub fn new(query: Query, size: usize) -> Self {
        Self {
            dsl: IndexSearchDsl {
                from: 0,
                size,
                query,
                sort: Vec::new(),
                track_total_hits: true,
            },
            attributes: Vec::new(),
            relation_attributes: Vec::new(),
            suppress_logs: true,
            show_search_score: false,
            exclude_meanings: false,
            exclude_classifications: false,
        }
    }

    /// The same request starting at offset `from`.
    pub fn at_offset(&self, from: usize) -> Self {
        let mut next = self.clone();
        next.dsl.from = from;
        next
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSearchResponse {
    #[serde(default)]
    pub approximate_count: u64,
    #[serde(default, deserialize_with = "entities_or_empty")]
    pub entities: Vec<Entity>,
}

fn entities_or_empty<'de, D>(deserializer: D) -> Result<Vec<Entity>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Entity>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let mut req = IndexSearchRequest::new(Query::term("__guid", "g-1"), 1);
        req.dsl.sort.push(SortItem::new("__guid", SortOrder::Asc));
        req.attributes.push("certificateStatus".into());
        assert_eq!(
            req.to_json(),
            json!({
                "dsl": {
                    "from": 0,
                    "size": 1,
                    "query": {"term": {"__guid": {"value": "g-1"}}},
                    "sort": [{"__guid": {"order": "asc"}}],
                    "track_total_hits": true
                },
                "attributes": ["certificateStatus"],
                "suppressLogs": true,
                "showSearchScore": false,
                "excludeMeanings": false,
                "excludeClassifications": false
            })
        );
    }

    #[test]
    fn at_offset_keeps_everything_else() {
        let req = IndexSearchRequest::new(Query::MatchAll, 50);
        let next = req.at_offset(50);
        assert_eq!(next.dsl.from, 50);
        assert_eq!(next.dsl.size, 50);
        assert_eq!(next.dsl.query, Query::MatchAll);
    }

    #[test]
    fn response_without_entities() {
        let r: IndexSearchResponse =
            serde_json::from_value(json!({"approximateCount": 0, "entities": null})).unwrap();
        assert!(r.entities.is_empty());
        let r: IndexSearchResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(r.approximate_count, 0);
    }
}
