//! Typed search fields.
//!
//! Each field knows its index name and only offers the clauses that make
//! sense for its mapping, so a text-only field cannot be used in a `term`.

use serde_json::Value;

use super::query::{Query, RangeBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordField {
    pub name: &'static str,
}

impl KeywordField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn eq(&self, value: impl Into<String>) -> Query {
        Query::term(self.name, value.into())
    }

    pub fn within<I, S>(&self, values: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query::terms(self.name, values.into_iter().map(Into::into))
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Query {
        Query::prefix(self.name, prefix)
    }

    pub fn has_any_value(&self) -> Query {
        Query::exists(self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField {
    pub name: &'static str,
}

impl TextField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn matches(&self, text: impl Into<String>) -> Query {
        Query::matches(self.name, text)
    }

    pub fn has_any_value(&self) -> Query {
        Query::exists(self.name)
    }
}

/// A field indexed both as keyword (exact) and as text (analysed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordTextField {
    pub keyword: &'static str,
    pub text: &'static str,
}

impl KeywordTextField {
    pub const fn new(keyword: &'static str, text: &'static str) -> Self {
        Self { keyword, text }
    }

    pub fn eq(&self, value: impl Into<String>) -> Query {
        KeywordField::new(self.keyword).eq(value)
    }

    pub fn within<I, S>(&self, values: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordField::new(self.keyword).within(values)
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Query {
        KeywordField::new(self.keyword).starts_with(prefix)
    }

    pub fn matches(&self, text: impl Into<String>) -> Query {
        TextField::new(self.text).matches(text)
    }

    pub fn has_any_value(&self) -> Query {
        Query::exists(self.keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanField {
    pub name: &'static str,
}

impl BooleanField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn eq(&self, value: bool) -> Query {
        Query::term(self.name, value)
    }

    pub fn has_any_value(&self) -> Query {
        Query::exists(self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericField {
    pub name: &'static str,
}

impl NumericField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn eq(&self, value: impl Into<Value>) -> Query {
        Query::term(self.name, value)
    }

    pub fn gt(&self, value: impl Into<Value>) -> Query {
        self.range(RangeBounds {
            gt: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn gte(&self, value: impl Into<Value>) -> Query {
        self.range(RangeBounds {
            gte: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn lt(&self, value: impl Into<Value>) -> Query {
        self.range(RangeBounds {
            lt: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn lte(&self, value: impl Into<Value>) -> Query {
        self.range(RangeBounds {
            lte: Some(value.into()),
            ..Default::default()
        })
    }

    /// Inclusive on both ends.
    pub fn between(&self, low: impl Into<Value>, high: impl Into<Value>) -> Query {
        self.range(RangeBounds {
            gte: Some(low.into()),
            lte: Some(high.into()),
            ..Default::default()
        })
    }

    pub fn has_any_value(&self) -> Query {
        Query::exists(self.name)
    }

    fn range(&self, bounds: RangeBounds) -> Query {
        Query::range(self.name, bounds)
    }
}

pub const TYPE_NAME: KeywordTextField = KeywordTextField::new("__typeName.keyword", "__typeName");
pub const SUPER_TYPE_NAMES: KeywordTextField =
    KeywordTextField::new("__superTypeNames.keyword", "__superTypeNames");
pub const GUID: KeywordField = KeywordField::new("__guid");
pub const STATUS: KeywordField = KeywordField::new("__state");
pub const CREATED_BY: KeywordField = KeywordField::new("__createdBy");
pub const UPDATED_BY: KeywordField = KeywordField::new("__modifiedBy");
pub const CREATE_TIME: NumericField = NumericField::new("__timestamp");
pub const UPDATE_TIME: NumericField = NumericField::new("__modificationTimestamp");
/// Internal ids of directly attached tags.
pub const ATLAN_TAGS: KeywordField = KeywordField::new("__traitNames");
pub const PROPAGATED_ATLAN_TAGS: KeywordField = KeywordField::new("__propagatedTraitNames");
/// Qualified names of assigned terms.
pub const ASSIGNED_TERMS: KeywordField = KeywordField::new("__meanings");

pub const QUALIFIED_NAME: KeywordTextField = KeywordTextField::new("qualifiedName", "qualifiedName.text");
pub const NAME: KeywordTextField = KeywordTextField::new("name.keyword", "name");
pub const DISPLAY_NAME: KeywordTextField = KeywordTextField::new("displayName.keyword", "displayName");
pub const DESCRIPTION: KeywordTextField = KeywordTextField::new("description.keyword", "description");
pub const USER_DESCRIPTION: KeywordTextField =
    KeywordTextField::new("userDescription.keyword", "userDescription");
pub const CERTIFICATE_STATUS: KeywordTextField =
    KeywordTextField::new("certificateStatus", "certificateStatus.text");
pub const ANNOUNCEMENT_TYPE: KeywordField = KeywordField::new("announcementType");
pub const OWNER_USERS: KeywordField = KeywordField::new("ownerUsers");
pub const OWNER_GROUPS: KeywordField = KeywordField::new("ownerGroups");
pub const CONNECTOR_NAME: KeywordField = KeywordField::new("connectorName");
pub const CONNECTION_QUALIFIED_NAME: KeywordTextField =
    KeywordTextField::new("connectionQualifiedName", "connectionQualifiedName.text");
pub const HAS_LINEAGE: BooleanField = BooleanField::new("__hasLineage");
pub const POPULARITY_SCORE: NumericField = NumericField::new("popularityScore");
pub const VIEW_SCORE: NumericField = NumericField::new("viewScore");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyword_text_field_uses_keyword_for_exact_match() {
        assert_eq!(
            NAME.eq("Revenue").to_json(),
            json!({"term": {"name.keyword": {"value": "Revenue"}}})
        );
        assert_eq!(
            NAME.matches("revenue report").to_json(),
            json!({"match": {"name": {"query": "revenue report"}}})
        );
    }

    #[test]
    fn numeric_between_is_inclusive() {
        assert_eq!(
            UPDATE_TIME.between(1, 2).to_json(),
            json!({"range": {"__modificationTimestamp": {"gte": 1, "lte": 2}}})
        );
    }

    #[test]
    fn within_builds_terms() {
        assert_eq!(
            TYPE_NAME.within(["Table", "View"]).to_json(),
            json!({"terms": {"__typeName.keyword": ["Table", "View"]}})
        );
    }

    #[test]
    fn boolean_field() {
        assert_eq!(
            HAS_LINEAGE.eq(true).to_json(),
            json!({"term": {"__hasLineage": {"value": true}}})
        );
    }
}
