//! Elasticsearch query clauses understood by the index-search endpoint.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    MatchAll,
    Term { field: String, value: Value },
    Terms { field: String, values: Vec<Value> },
    Prefix { field: String, value: String },
    Exists { field: String },
    Range { field: String, bounds: RangeBounds },
    Match { field: String, query: String },
    Bool(BoolQuery),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBounds {
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    pub filter: Vec<Query>,
    pub should: Vec<Query>,
    pub must_not: Vec<Query>,
    pub minimum_should_match: Option<u32>,
}

impl Query {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Prefix {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists {
            field: field.into(),
        }
    }

    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        Self::Range {
            field: field.into(),
            bounds,
        }
    }

    pub fn matches(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self::Match {
            field: field.into(),
            query: query.into(),
        }
    }

    /// Negation, as a bool query with a single `must_not`.
    pub fn not(query: Query) -> Self {
        Self::Bool(BoolQuery {
            must_not: vec![query],
            ..Default::default()
        })
    }

    /// Any one of `queries`.
    pub fn any_of(queries: Vec<Query>) -> Self {
        Self::Bool(BoolQuery {
            should: queries,
            minimum_should_match: Some(1),
            ..Default::default()
        })
    }

    pub fn all_of(queries: Vec<Query>) -> Self {
        Self::Bool(BoolQuery {
            filter: queries,
            ..Default::default()
        })
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::MatchAll => json!({ "match_all": {} }),
            Self::Term { field, value } => json!({ "term": { field: { "value": value } } }),
            Self::Terms { field, values } => json!({ "terms": { field: values } }),
            Self::Prefix { field, value } => json!({ "prefix": { field: { "value": value } } }),
            Self::Exists { field } => json!({ "exists": { "field": field } }),
            Self::Range { field, bounds } => {
                let mut b = Map::new();
                for (op, v) in [
                    ("gt", &bounds.gt),
                    ("gte", &bounds.gte),
                    ("lt", &bounds.lt),
                    ("lte", &bounds.lte),
                ] {
                    if let Some(v) = v {
                        b.insert(op.to_string(), v.clone());
                    }
                }
                json!({ "range": { field: b } })
            }
            Self::Match { field, query } => json!({ "match": { field: { "query": query } } }),
            Self::Bool(b) => {
                let mut body = Map::new();
                for (clause, queries) in [
                    ("must", &b.must),
                    ("filter", &b.filter),
                    ("should", &b.should),
                    ("must_not", &b.must_not),
                ] {
                    if !queries.is_empty() {
                        body.insert(
                            clause.to_string(),
                            Value::Array(queries.iter().map(Query::to_json).collect()),
                        );
                    }
                }
                if let Some(min) = b.minimum_should_match {
                    body.insert("minimum_should_match".to_string(), json!(min));
                }
                json!({ "bool": body })
            }
        }
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_query_json() {
        let q = Query::term("__typeName.keyword", "Table");
        assert_eq!(
            q.to_json(),
            json!({"term": {"__typeName.keyword": {"value": "Table"}}})
        );
    }

    #[test]
    fn range_only_emits_set_bounds() {
        let q = Query::range(
            "__timestamp",
            RangeBounds {
                gte: Some(json!(10)),
                lt: Some(json!(20)),
                ..Default::default()
            },
        );
        assert_eq!(
            q.to_json(),
            json!({"range": {"__timestamp": {"gte": 10, "lt": 20}}})
        );
    }

    #[test]
    fn bool_query_skips_empty_clauses() {
        let q = Query::Bool(BoolQuery {
            filter: vec![Query::exists("description")],
            must_not: vec![Query::term("__state", "DELETED")],
            ..Default::default()
        });
        assert_eq!(
            q.to_json(),
            json!({"bool": {
                "filter": [{"exists": {"field": "description"}}],
                "must_not": [{"term": {"__state": {"value": "DELETED"}}}]
            }})
        );
    }

    #[test]
    fn any_of_requires_one_match() {
        let q = Query::any_of(vec![Query::prefix("name.keyword", "rev"), Query::MatchAll]);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["bool"]["minimum_should_match"], 1);
        assert_eq!(json["bool"]["should"][1], json!({"match_all": {}}));
    }
}
