//! AtlanApi trait: the boundary between the SDK's operations and a tenant.
//! `HttpClient` talks to a real tenant; `InMemoryClient` keeps everything in
//! process for tests and offline use.

pub mod assets;
pub mod cache;
pub mod client;
pub mod config;
pub mod http;
pub mod inprocess;

use async_trait::async_trait;
use atlan_core::entity::Entity;
use atlan_core::enums::AtlanDeleteType;
use atlan_core::mutation::AssetMutationResponse;
use atlan_core::search::{IndexSearchRequest, IndexSearchResponse};
use atlan_core::tag::{AtlanTag, AtlanTagDef};

pub use atlan_core::error::{AtlanError, Result};
pub use cache::AtlanTagCache;
pub use client::{AtlanClient, SearchPager};
pub use config::AtlanConfig;
pub use http::HttpClient;
pub use inprocess::{ApiCall, InMemoryClient};

/// How much of an asset to return on a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOptions {
    /// Return minimal detail on related entities.
    pub min_ext_info: bool,
    pub ignore_relationships: bool,
}

impl GetOptions {
    pub fn with_relationships(include: bool) -> Self {
        Self {
            min_ext_info: !include,
            ignore_relationships: !include,
        }
    }
}

impl Default for GetOptions {
    fn default() -> Self {
        Self::with_relationships(false)
    }
}

/// Query flags of the bulk save endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Replace the asset's tags with those on the request.
    pub replace_atlan_tags: bool,
    pub replace_custom_metadata: bool,
    pub overwrite_custom_metadata: bool,
}

#[async_trait]
pub trait AtlanApi: Send + Sync {
    async fn get_by_guid(&self, guid: &str, options: GetOptions) -> Result<Entity>;

    async fn get_by_unique_attribute(
        &self,
        type_name: &str,
        qualified_name: &str,
        options: GetOptions,
    ) -> Result<Entity>;

    /// Updates only the attributes present on `entity`, addressing the asset
    /// by type and qualified name.
    async fn partial_update(
        &self,
        type_name: &str,
        qualified_name: &str,
        entity: Entity,
    ) -> Result<AssetMutationResponse>;

    /// Creates or updates assets in bulk.
    async fn save(
        &self,
        entities: Vec<Entity>,
        options: SaveOptions,
    ) -> Result<AssetMutationResponse>;

    async fn delete(
        &self,
        guids: &[String],
        delete_type: AtlanDeleteType,
    ) -> Result<AssetMutationResponse>;

    /// Attaches tags (by internal id) to an asset.
    async fn add_atlan_tags(
        &self,
        type_name: &str,
        qualified_name: &str,
        tags: Vec<AtlanTag>,
    ) -> Result<()>;

    async fn remove_atlan_tag(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_id: &str,
    ) -> Result<()>;

    async fn search(&self, request: &IndexSearchRequest) -> Result<IndexSearchResponse>;

    async fn atlan_tag_defs(&self) -> Result<Vec<AtlanTagDef>>;
}
