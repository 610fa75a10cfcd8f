//! Builder for index-search requests.

use crate::asset::AssetType;
use crate::enums::{AtlanStatus, SortOrder};

use super::fields;
use super::query::{BoolQuery, Query};
use super::request::{IndexSearchRequest, SortItem};

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Accumulates filters into a single bool query.
///
/// `filter` clauses must all match, `filter_not` clauses must not, and at
/// least `min_somes` of the `any_of` clauses must match.
#[derive(Debug, Clone)]
pub struct FluentSearch {
    wheres: Vec<Query>,
    where_nots: Vec<Query>,
    where_somes: Vec<Query>,
    min_somes: u32,
    sort: Vec<SortItem>,
    page_size: usize,
    attributes: Vec<String>,
    relation_attributes: Vec<String>,
}

impl Default for FluentSearch {
    fn default() -> Self {
        Self {
            wheres: Vec::new(),
            where_nots: Vec::new(),
            where_somes: Vec::new(),
            min_somes: 1,
            sort: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            attributes: Vec::new(),
            relation_attributes: Vec::new(),
        }
    }
}

impl FluentSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active assets of exactly `T`.
    pub fn for_type<T: AssetType>() -> Self {
        Self::for_type_name(T::TYPE_NAME, false)
    }

    /// Assets of `type_name`, optionally including archived ones.
    pub fn for_type_name(type_name: &str, include_archived: bool) -> Self {
        let search = Self::new().filter(fields::TYPE_NAME.eq(type_name));
        if include_archived {
            search
        } else {
            search.active_only()
        }
    }

    pub fn active_only(self) -> Self {
        self.filter(fields::STATUS.eq(AtlanStatus::Active.to_string()))
    }

    pub fn filter(mut self, query: Query) -> Self {
        self.wheres.push(query);
        self
    }

    pub fn filter_not(mut self, query: Query) -> Self {
        self.where_nots.push(query);
        self
    }

    pub fn any_of(mut self, query: Query) -> Self {
        self.where_somes.push(query);
        self
    }

    pub fn min_somes(mut self, min: u32) -> Self {
        self.min_somes = min;
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push(SortItem::new(field, order));
        self
    }

    /// Extra attributes to return on each result.
    pub fn include_on_results(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Extra attributes to return on each related asset.
    pub fn include_on_relations(mut self, attribute: impl Into<String>) -> Self {
        self.relation_attributes.push(attribute.into());
        self
    }

    pub fn to_query(&self) -> Query {
        if self.wheres.is_empty() && self.where_nots.is_empty() && self.where_somes.is_empty() {
            return Query::MatchAll;
        }
        Query::Bool(BoolQuery {
            must: Vec::new(),
            filter: self.wheres.clone(),
            should: self.where_somes.clone(),
            must_not: self.where_nots.clone(),
            minimum_should_match: (!self.where_somes.is_empty()).then_some(self.min_somes),
        })
    }

    /// Paging is stable because a GUID sort is always appended last.
    pub fn to_request(&self) -> IndexSearchRequest {
        let mut request = IndexSearchRequest::new(self.to_query(), self.page_size);
        request.dsl.sort = self.sort.clone();
        if !request.dsl.sort.iter().any(|s| s.field == fields::GUID.name) {
            request
                .dsl
                .sort
                .push(SortItem::new(fields::GUID.name, SortOrder::Asc));
        }
        request.attributes = self.attributes.clone();
        request.relation_attributes = self.relation_attributes.clone();
        request
    }
}
