//! Translation between human-readable tag names and the tenant's internal
//! tag ids.

use std::collections::HashMap;

use atlan_core::error::{AtlanError, ErrorCode, Result};
use tokio::sync::RwLock;
use tracing::debug;

use crate::AtlanApi;

#[derive(Default)]
struct TagMaps {
    id_by_name: HashMap<String, String>,
    name_by_id: HashMap<String, String>,
}

/// Lazily loaded from the typedefs endpoint; reloaded once when a lookup
/// misses, so tags created after the first load are still found.
#[derive(Default)]
pub struct AtlanTagCache {
    maps: RwLock<TagMaps>,
}

impl AtlanTagCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh(&self, api: &dyn AtlanApi) -> Result<()> {
        let defs = api.atlan_tag_defs().await?;
        let mut maps = TagMaps::default();
        for def in defs {
            maps.name_by_id.insert(def.name.clone(), def.display_name.clone());
            maps.id_by_name.insert(def.display_name, def.name);
        }
        debug!(tags = maps.id_by_name.len(), "refreshed tag cache");
        *self.maps.write().await = maps;
        Ok(())
    }

    pub async fn id_for_name(&self, api: &dyn AtlanApi, name: &str) -> Result<String> {
        if let Some(id) = self.maps.read().await.id_by_name.get(name) {
            return Ok(id.clone());
        }
        self.refresh(api).await?;
        self.maps
            .read()
            .await
            .id_by_name
            .get(name)
            .cloned()
            .ok_or_else(|| {
                AtlanError::not_found(
                    ErrorCode::AtlanTagNotFoundByName,
                    format!("no tag named '{}'", name),
                )
            })
    }

    pub async fn name_for_id(&self, api: &dyn AtlanApi, id: &str) -> Result<String> {
        if let Some(name) = self.maps.read().await.name_by_id.get(id) {
            return Ok(name.clone());
        }
        self.refresh(api).await?;
        self.maps
            .read()
            .await
            .name_by_id
            .get(id)
            .cloned()
            .ok_or_else(|| {
                AtlanError::not_found(
                    ErrorCode::AtlanTagNotFoundById,
                    format!("no tag with id '{}'", id),
                )
            })
    }
}
