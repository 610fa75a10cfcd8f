//! AtlanClient: the SDK's entry point.
//!
//! Wraps any [`AtlanApi`] with the typed operations every asset type shares:
//! search, fetch by GUID or qualified name, and save. The tag, term,
//! certificate and lifecycle helpers live in `assets.rs`.

use std::sync::Arc;

use atlan_core::asset::AssetType;
use atlan_core::entity::Entity;
use atlan_core::error::{AtlanError, ErrorCode, Result};
use atlan_core::guid::is_uuid;
use atlan_core::mutation::AssetMutationResponse;
use atlan_core::search::{fields, FluentSearch, IndexSearchRequest, IndexSearchResponse};
use tracing::debug;

use crate::cache::AtlanTagCache;
use crate::config::AtlanConfig;
use crate::http::HttpClient;
use crate::{AtlanApi, GetOptions, SaveOptions};

pub struct AtlanClient {
    api: Arc<dyn AtlanApi>,
    tags: AtlanTagCache,
}

impl AtlanClient {
    pub fn new(api: Arc<dyn AtlanApi>) -> Self {
        Self {
            api,
            tags: AtlanTagCache::new(),
        }
    }

    pub fn from_config(config: AtlanConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpClient::new(config)?)))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(AtlanConfig::from_env()?)
    }

    pub fn api(&self) -> &dyn AtlanApi {
        self.api.as_ref()
    }

    pub fn tags(&self) -> &AtlanTagCache {
        &self.tags
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Search over active assets of `T`; refine with further clauses.
    pub fn select<T: AssetType>(&self) -> FluentSearch {
        FluentSearch::for_type::<T>()
    }

    /// First page of results.
    pub async fn search(&self, search: &FluentSearch) -> Result<IndexSearchResponse> {
        self.api.search(&search.to_request()).await
    }

    /// Every matching asset of `T`, across all pages. Hits of other types are
    /// skipped.
    pub async fn search_assets<T: AssetType>(&self, search: &FluentSearch) -> Result<Vec<T>> {
        self.pager(search)
            .collect_all()
            .await?
            .into_iter()
            .filter(|e| e.type_name == T::TYPE_NAME)
            .map(T::from_entity)
            .collect()
    }

    pub fn pager(&self, search: &FluentSearch) -> SearchPager<'_> {
        SearchPager::new(self, search.to_request())
    }

    // ========================================================================
    // Fetch
    // ========================================================================

    /// Fetches an asset of `type_name` by GUID (when `id` is a UUID) or by
    /// qualified name.
    pub async fn get_entity(
        &self,
        type_name: &str,
        id: &str,
        include_relationships: bool,
    ) -> Result<Entity> {
        let options = GetOptions::with_relationships(include_relationships);
        let entity = if is_uuid(id) {
            self.api
                .get_by_guid(id, options)
                .await
                .map_err(|e| not_found_as(e, ErrorCode::AssetNotFoundByGuid, type_name, id))?
        } else {
            let guid = self.guid_for_qualified_name(type_name, id).await?;
            self.api.get_by_guid(&guid, options).await.map_err(|e| {
                not_found_as(e, ErrorCode::AssetNotFoundByQualifiedName, type_name, id)
            })?
        };

        if entity.type_name != type_name {
            return Err(AtlanError::not_found(
                ErrorCode::AssetNotTypeRequested,
                format!("asset {} is a {}, not a {}", id, entity.type_name, type_name),
            ));
        }
        debug!(type_name, id, "fetched asset");
        Ok(entity)
    }

    pub async fn get<T: AssetType>(&self, id: &str, include_relationships: bool) -> Result<T> {
        T::from_entity(
            self.get_entity(T::TYPE_NAME, id, include_relationships)
                .await?,
        )
    }

    async fn guid_for_qualified_name(&self, type_name: &str, qualified_name: &str) -> Result<String> {
        let search = FluentSearch::for_type_name(type_name, false)
            .filter(fields::QUALIFIED_NAME.eq(qualified_name))
            .page_size(1);
        let response = self.search(&search).await?;
        response
            .entities
            .into_iter()
            .next()
            .and_then(|e| e.guid)
            .ok_or_else(|| {
                AtlanError::not_found(
                    ErrorCode::AssetNotFoundByQualifiedName,
                    format!("no {} with qualifiedName {}", type_name, qualified_name),
                )
            })
    }

    // ========================================================================
    // Save
    // ========================================================================

    /// Creates or updates typed assets. Tags on the assets are left alone
    /// on the tenant.
    pub async fn save<T: AssetType>(&self, assets: &[T]) -> Result<AssetMutationResponse> {
        let entities = assets
            .iter()
            .map(T::to_entity)
            .collect::<Result<Vec<_>>>()?;
        self.save_entities(entities, SaveOptions::default()).await
    }

    /// Creates or updates typed assets, replacing their tags with the ones
    /// they carry.
    pub async fn save_replacing_tags<T: AssetType>(
        &self,
        assets: &[T],
    ) -> Result<AssetMutationResponse> {
        let entities = assets
            .iter()
            .map(T::to_entity)
            .collect::<Result<Vec<_>>>()?;
        let options = SaveOptions {
            replace_atlan_tags: true,
            ..Default::default()
        };
        self.save_entities(entities, options).await
    }

    pub async fn save_entities(
        &self,
        entities: Vec<Entity>,
        options: SaveOptions,
    ) -> Result<AssetMutationResponse> {
        let count = entities.len();
        let response = self.api.save(entities, options).await?;
        debug!(
            submitted = count,
            created = response.mutated_entities.created.len(),
            updated = response.mutated_entities.updated.len(),
            "saved assets"
        );
        Ok(response)
    }
}

fn not_found_as(err: AtlanError, code: ErrorCode, type_name: &str, id: &str) -> AtlanError {
    if err.is_not_found() {
        AtlanError::not_found(code, format!("no {} found for {}", type_name, id))
    } else {
        err
    }
}

// ============================================================================
// Paging
// ============================================================================

/// Walks a search page by page, offsetting by the number of hits seen.
pub struct SearchPager<'a> {
    client: &'a AtlanClient,
    request: IndexSearchRequest,
    offset: usize,
    approximate_count: Option<u64>,
    done: bool,
}

impl<'a> SearchPager<'a> {
    fn new(client: &'a AtlanClient, request: IndexSearchRequest) -> Self {
        Self {
            client,
            offset: request.dsl.from,
            request,
            approximate_count: None,
            done: false,
        }
    }

    /// Total hits reported by the most recent page.
    pub fn approximate_count(&self) -> Option<u64> {
        self.approximate_count
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<Entity>>> {
        if self.done {
            return Ok(None);
        }
        let response = self
            .client
            .api
            .search(&self.request.at_offset(self.offset))
            .await?;
        self.approximate_count = Some(response.approximate_count);
        let hits = response.entities;
        if hits.is_empty() {
            self.done = true;
            return Ok(None);
        }
        self.offset += hits.len();
        if hits.len() < self.request.dsl.size || self.offset as u64 >= response.approximate_count
        {
            self.done = true;
        }
        Ok(Some(hits))
    }

    pub async fn collect_all(mut self) -> Result<Vec<Entity>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}
