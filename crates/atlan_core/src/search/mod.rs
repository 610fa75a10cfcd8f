//! Index-search DSL: typed fields, query clauses and the fluent builder.

pub mod fields;
pub mod fluent;
pub mod query;
pub mod request;

pub use fluent::{FluentSearch, DEFAULT_PAGE_SIZE};
pub use query::{BoolQuery, Query, RangeBounds};
pub use request::{IndexSearchDsl, IndexSearchRequest, IndexSearchResponse, SortItem};
