//! Mutation helpers shared by every asset type.
//!
//! Each helper comes as a pair: an untyped `*_entity` form addressed by type
//! name (what the CLI uses) and a typed form generic over `T: AssetType` that
//! delegates to it and converts the result.

use atlan_core::asset::{attr, AssetType};
use atlan_core::entity::{Entity, QUALIFIED_NAME};
use atlan_core::enums::{
    AtlanAnnouncementType, AtlanDeleteType, AtlanStatus, CertificateStatus, SaveSemantic,
};
use atlan_core::error::{AtlanError, ErrorCode, Result};
use atlan_core::guid::placeholder_guid;
use atlan_core::mutation::AssetMutationResponse;
use atlan_core::reference::Reference;
use atlan_core::tag::{AtlanTag, TagPropagation};
use serde_json::Value;
use tracing::info;

use crate::client::AtlanClient;
use crate::{GetOptions, SaveOptions};

/// Envelope addressed by qualified name only, for partial updates.
fn partial(type_name: &str, qualified_name: &str) -> Result<Entity> {
    if qualified_name.trim().is_empty() {
        return Err(AtlanError::missing_update_params(type_name, &[QUALIFIED_NAME]));
    }
    let mut entity = Entity::new(type_name);
    entity.guid = Some(placeholder_guid());
    entity.set_attribute(QUALIFIED_NAME, Value::String(qualified_name.to_string()));
    Ok(entity)
}

fn typed<T: AssetType>(entity: Option<Entity>) -> Result<Option<T>> {
    entity.map(T::from_entity).transpose()
}

impl AtlanClient {
    // ========================================================================
    // Certificate and announcement
    // ========================================================================

    /// Sets the certificate of an existing asset; the message is left as is
    /// when `None`.
    pub async fn update_certificate_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        status: CertificateStatus,
        message: Option<&str>,
    ) -> Result<Option<Entity>> {
        let mut entity = partial(type_name, qualified_name)?;
        entity.set_attribute(attr::CERTIFICATE_STATUS, Value::String(status.to_string()));
        if let Some(message) = message {
            entity.set_attribute(
                attr::CERTIFICATE_STATUS_MESSAGE,
                Value::String(message.to_string()),
            );
        }
        info!(type_name, qualified_name, %status, "updating certificate");
        let response = self
            .api()
            .partial_update(type_name, qualified_name, entity)
            .await?;
        Ok(response.first_updated(type_name).cloned())
    }

    pub async fn update_certificate<T: AssetType>(
        &self,
        qualified_name: &str,
        status: CertificateStatus,
        message: Option<&str>,
    ) -> Result<Option<T>> {
        typed(
            self.update_certificate_entity(T::TYPE_NAME, qualified_name, status, message)
                .await?,
        )
    }

    pub async fn update_announcement_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        announcement_type: AtlanAnnouncementType,
        title: &str,
        message: Option<&str>,
    ) -> Result<Option<Entity>> {
        let mut entity = partial(type_name, qualified_name)?;
        entity.set_attribute(
            attr::ANNOUNCEMENT_TYPE,
            Value::String(announcement_type.to_string()),
        );
        entity.set_attribute(attr::ANNOUNCEMENT_TITLE, Value::String(title.to_string()));
        if let Some(message) = message {
            entity.set_attribute(
                attr::ANNOUNCEMENT_MESSAGE,
                Value::String(message.to_string()),
            );
        }
        info!(type_name, qualified_name, %announcement_type, "updating announcement");
        let response = self
            .api()
            .partial_update(type_name, qualified_name, entity)
            .await?;
        Ok(response.first_updated(type_name).cloned())
    }

    pub async fn update_announcement<T: AssetType>(
        &self,
        qualified_name: &str,
        announcement_type: AtlanAnnouncementType,
        title: &str,
        message: Option<&str>,
    ) -> Result<Option<T>> {
        typed(
            self.update_announcement_entity(
                T::TYPE_NAME,
                qualified_name,
                announcement_type,
                title,
                message,
            )
            .await?,
        )
    }

    // ========================================================================
    // Attribute removal
    // ========================================================================

    /// Saves an updater with each of `attributes` sent as explicit null.
    pub async fn remove_attributes_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        name: &str,
        attributes: &[&str],
    ) -> Result<Option<Entity>> {
        let mut entity = Entity::updater(type_name, qualified_name, name)?;
        for attribute in attributes {
            entity.set_null(*attribute);
        }
        info!(type_name, qualified_name, ?attributes, "clearing attributes");
        let response = self
            .save_entities(vec![entity], SaveOptions::default())
            .await?;
        Ok(response.first_updated(type_name).cloned())
    }

    pub async fn remove_certificate_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<Entity>> {
        self.remove_attributes_entity(
            type_name,
            qualified_name,
            name,
            &[attr::CERTIFICATE_STATUS, attr::CERTIFICATE_STATUS_MESSAGE],
        )
        .await
    }

    pub async fn remove_certificate<T: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<T>> {
        typed(
            self.remove_certificate_entity(T::TYPE_NAME, qualified_name, name)
                .await?,
        )
    }

    pub async fn remove_announcement_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<Entity>> {
        self.remove_attributes_entity(
            type_name,
            qualified_name,
            name,
            &[
                attr::ANNOUNCEMENT_TYPE,
                attr::ANNOUNCEMENT_TITLE,
                attr::ANNOUNCEMENT_MESSAGE,
            ],
        )
        .await
    }

    pub async fn remove_announcement<T: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<T>> {
        typed(
            self.remove_announcement_entity(T::TYPE_NAME, qualified_name, name)
                .await?,
        )
    }

    pub async fn remove_description_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<Entity>> {
        self.remove_attributes_entity(type_name, qualified_name, name, &[attr::DESCRIPTION])
            .await
    }

    pub async fn remove_description<T: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<T>> {
        typed(
            self.remove_description_entity(T::TYPE_NAME, qualified_name, name)
                .await?,
        )
    }

    pub async fn remove_user_description_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<Entity>> {
        self.remove_attributes_entity(type_name, qualified_name, name, &[attr::USER_DESCRIPTION])
            .await
    }

    pub async fn remove_user_description<T: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<T>> {
        typed(
            self.remove_user_description_entity(T::TYPE_NAME, qualified_name, name)
                .await?,
        )
    }

    pub async fn remove_owners_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<Entity>> {
        self.remove_attributes_entity(
            type_name,
            qualified_name,
            name,
            &[attr::OWNER_USERS, attr::OWNER_GROUPS],
        )
        .await
    }

    pub async fn remove_owners<T: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<T>> {
        typed(
            self.remove_owners_entity(T::TYPE_NAME, qualified_name, name)
                .await?,
        )
    }

    // ========================================================================
    // Terms
    // ========================================================================

    /// Replaces every assigned term. An empty slice clears them.
    pub async fn replace_terms_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        name: &str,
        terms: &[Reference],
    ) -> Result<Option<Entity>> {
        let mut entity = Entity::updater(type_name, qualified_name, name)?;
        if terms.is_empty() {
            entity.set_null(attr::MEANINGS);
        } else {
            let terms: Vec<Reference> = terms
                .iter()
                .cloned()
                .map(|t| t.with_semantic(SaveSemantic::Replace))
                .collect();
            entity.set_relationships(attr::MEANINGS, &terms)?;
        }
        info!(type_name, qualified_name, terms = terms.len(), "replacing terms");
        let response = self
            .save_entities(vec![entity], SaveOptions::default())
            .await?;
        Ok(response.first_updated(type_name).cloned())
    }

    pub async fn replace_terms<T: AssetType>(
        &self,
        qualified_name: &str,
        name: &str,
        terms: &[Reference],
    ) -> Result<Option<T>> {
        typed(
            self.replace_terms_entity(T::TYPE_NAME, qualified_name, name, terms)
                .await?,
        )
    }

    pub async fn append_terms_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        terms: &[Reference],
    ) -> Result<Option<Entity>> {
        self.edit_terms(type_name, qualified_name, terms, SaveSemantic::Append)
            .await
    }

    pub async fn append_terms<T: AssetType>(
        &self,
        qualified_name: &str,
        terms: &[Reference],
    ) -> Result<Option<T>> {
        typed(
            self.append_terms_entity(T::TYPE_NAME, qualified_name, terms)
                .await?,
        )
    }

    pub async fn remove_terms_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        terms: &[Reference],
    ) -> Result<Option<Entity>> {
        self.edit_terms(type_name, qualified_name, terms, SaveSemantic::Remove)
            .await
    }

    pub async fn remove_terms<T: AssetType>(
        &self,
        qualified_name: &str,
        terms: &[Reference],
    ) -> Result<Option<T>> {
        typed(
            self.remove_terms_entity(T::TYPE_NAME, qualified_name, terms)
                .await?,
        )
    }

    async fn edit_terms(
        &self,
        type_name: &str,
        qualified_name: &str,
        terms: &[Reference],
        semantic: SaveSemantic,
    ) -> Result<Option<Entity>> {
        let existing = self.get_entity(type_name, qualified_name, false).await?;
        // An empty list would go out as a REPLACE of the whole set.
        if terms.is_empty() {
            return Ok(Some(existing));
        }
        let mut entity = Entity::updater(
            type_name,
            existing.qualified_name().unwrap_or_default(),
            existing.name().unwrap_or_default(),
        )?;
        let terms: Vec<Reference> = terms
            .iter()
            .cloned()
            .map(|t| t.with_semantic(semantic))
            .collect();
        entity.set_relationships(attr::MEANINGS, &terms)?;
        info!(type_name, qualified_name, %semantic, terms = terms.len(), "editing terms");
        let response = self
            .save_entities(vec![entity], SaveOptions::default())
            .await?;
        Ok(response.first_updated(type_name).cloned())
    }

    // ========================================================================
    // Atlan tags
    // ========================================================================

    /// Attaches tags by their human-readable names.
    pub async fn append_atlan_tags_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_names: &[&str],
        propagation: &TagPropagation,
    ) -> Result<()> {
        let mut tags = Vec::with_capacity(tag_names.len());
        for name in tag_names {
            let id = self.tags().id_for_name(self.api(), name).await?;
            tags.push(AtlanTag::new(id).with_propagation(propagation));
        }
        info!(type_name, qualified_name, ?tag_names, "appending tags");
        self.api()
            .add_atlan_tags(type_name, qualified_name, tags)
            .await
    }

    pub async fn append_atlan_tags<T: AssetType>(
        &self,
        qualified_name: &str,
        tag_names: &[&str],
        propagation: &TagPropagation,
    ) -> Result<()> {
        self.append_atlan_tags_entity(T::TYPE_NAME, qualified_name, tag_names, propagation)
            .await
    }

    pub async fn remove_atlan_tag_entity(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_name: &str,
    ) -> Result<()> {
        let id = self.tags().id_for_name(self.api(), tag_name).await?;
        info!(type_name, qualified_name, tag_name, "removing tag");
        self.api()
            .remove_atlan_tag(type_name, qualified_name, &id)
            .await
    }

    pub async fn remove_atlan_tag<T: AssetType>(
        &self,
        qualified_name: &str,
        tag_name: &str,
    ) -> Result<()> {
        self.remove_atlan_tag_entity(T::TYPE_NAME, qualified_name, tag_name)
            .await
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Soft delete; archived assets can be restored.
    pub async fn archive(&self, guids: &[String]) -> Result<AssetMutationResponse> {
        info!(count = guids.len(), "archiving assets");
        self.api().delete(guids, AtlanDeleteType::Soft).await
    }

    /// Permanent delete.
    pub async fn purge(&self, guids: &[String]) -> Result<AssetMutationResponse> {
        info!(count = guids.len(), "purging assets");
        self.api().delete(guids, AtlanDeleteType::Purge).await
    }

    /// Reactivates an archived asset. True when the asset is active
    /// afterwards, including when it already was.
    pub async fn restore_entity(&self, type_name: &str, qualified_name: &str) -> Result<bool> {
        let existing = self
            .api()
            .get_by_unique_attribute(type_name, qualified_name, GetOptions::default())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AtlanError::not_found(
                        ErrorCode::AssetNotFoundByQualifiedName,
                        format!("no {} with qualifiedName {}", type_name, qualified_name),
                    )
                } else {
                    e
                }
            })?;
        match existing.status() {
            AtlanStatus::Active => Ok(true),
            AtlanStatus::Purged => Ok(false),
            AtlanStatus::Deleted => {
                // Upserts only resolve active assets by qualified name.
                let mut entity = partial(type_name, qualified_name)?;
                if let Some(guid) = existing.guid.clone() {
                    entity.guid = Some(guid);
                }
                entity.status = Some(AtlanStatus::Active);
                info!(type_name, qualified_name, "restoring asset");
                let response = self
                    .save_entities(vec![entity], SaveOptions::default())
                    .await?;
                Ok(response
                    .first_updated(type_name)
                    .is_some_and(|e| e.status() == AtlanStatus::Active))
            }
        }
    }

    pub async fn restore<T: AssetType>(&self, qualified_name: &str) -> Result<bool> {
        self.restore_entity(T::TYPE_NAME, qualified_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inprocess::{ApiCall, InMemoryClient};
    use atlan_core::model::sql::Table;
    use serde_json::json;
    use std::sync::Arc;

    const QN: &str = "default/snowflake/1700000000/db/sch/orders";

    async fn setup() -> (Arc<InMemoryClient>, AtlanClient, String) {
        let api = Arc::new(InMemoryClient::new());
        let mut e = Entity::new("Table");
        e.set_attribute("qualifiedName", json!(QN));
        e.set_attribute("name", json!("orders"));
        e.set_attribute("certificateStatus", json!("DRAFT"));
        e.set_attribute("description", json!("raw orders"));
        let guid = api.insert(e).await;
        (api.clone(), AtlanClient::new(api), guid)
    }

    #[tokio::test]
    async fn certificate_is_a_partial_update() {
        let (api, client, _) = setup().await;
        let table: Table = client
            .update_certificate(QN, CertificateStatus::Verified, Some("checked"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(table.asset().certificate_status, Some(CertificateStatus::Verified));
        assert_eq!(table.asset().description.as_deref(), Some("raw orders"));
        assert!(matches!(
            api.calls().await.last(),
            Some(ApiCall::PartialUpdate { .. })
        ));
    }

    #[tokio::test]
    async fn remove_certificate_sends_nulls() {
        let (api, client, guid) = setup().await;
        client
            .remove_certificate::<Table>(QN, "orders")
            .await
            .unwrap();
        let stored = api.entity(&guid).await.unwrap();
        assert!(stored.attribute("certificateStatus").is_none());
        assert_eq!(stored.attribute("description"), Some(&json!("raw orders")));

        let calls = api.calls().await;
        let Some(ApiCall::Save { entities, .. }) = calls.last() else {
            panic!("expected a save");
        };
        assert_eq!(entities[0].attributes["certificateStatus"], Value::Null);
        assert_eq!(entities[0].attributes["certificateStatusMessage"], Value::Null);
    }

    #[tokio::test]
    async fn owners_and_description_clear_by_type_name() {
        let (api, client, guid) = setup().await;
        client
            .remove_description_entity("Table", QN, "orders")
            .await
            .unwrap();
        client
            .remove_owners_entity("Table", QN, "orders")
            .await
            .unwrap();
        let stored = api.entity(&guid).await.unwrap();
        assert!(stored.attribute("description").is_none());
        assert_eq!(stored.attribute("certificateStatus"), Some(&json!("DRAFT")));

        let calls = api.calls().await;
        let Some(ApiCall::Save { entities, .. }) = calls.last() else {
            panic!("expected a save");
        };
        assert_eq!(entities[0].attributes["ownerUsers"], Value::Null);
        assert_eq!(entities[0].attributes["ownerGroups"], Value::Null);
    }

    #[tokio::test]
    async fn updater_requires_name() {
        let (_api, client, _) = setup().await;
        let err = client.remove_owners::<Table>(QN, "").await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::MissingRequiredUpdateParam));
    }

    #[tokio::test]
    async fn restore_reactivates_archived_assets() {
        let (api, client, guid) = setup().await;
        client.archive(&[guid.clone()]).await.unwrap();
        assert_eq!(api.entity(&guid).await.unwrap().status(), AtlanStatus::Deleted);
        assert!(client.restore::<Table>(QN).await.unwrap());
        assert_eq!(api.entity(&guid).await.unwrap().status(), AtlanStatus::Active);
        assert!(client.restore::<Table>(QN).await.unwrap());
    }
}
