//! The shared asset base.
//!
//! Every asset type is a pair of an [`AssetHeader`] (envelope fields that
//! live outside the attribute map) and a type-specific attribute struct that
//! embeds [`AssetAttributes`]. `#[derive(AtlanAsset)]` wires a struct into
//! [`AssetType`]; everything below is written once against the trait.

use std::collections::BTreeSet;
use std::fmt::Debug;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::entity::{validate_required, AttributeMap, Entity, NAME, QUALIFIED_NAME};
use crate::enums::{AtlanAnnouncementType, AtlanStatus, CertificateStatus, SaveSemantic};
use crate::error::{AtlanError, ErrorCode, Result};
use crate::guid::placeholder_guid;
use crate::reference::Reference;
use crate::tag::{AtlanTag, TermAssignmentHeader};

/// Wire names of attributes the mutation helpers clear.
pub mod attr {
    pub const CERTIFICATE_STATUS: &str = "certificateStatus";
    pub const CERTIFICATE_STATUS_MESSAGE: &str = "certificateStatusMessage";
    pub const ANNOUNCEMENT_TYPE: &str = "announcementType";
    pub const ANNOUNCEMENT_TITLE: &str = "announcementTitle";
    pub const ANNOUNCEMENT_MESSAGE: &str = "announcementMessage";
    pub const DESCRIPTION: &str = "description";
    pub const USER_DESCRIPTION: &str = "userDescription";
    pub const OWNER_USERS: &str = "ownerUsers";
    pub const OWNER_GROUPS: &str = "ownerGroups";
    pub const MEANINGS: &str = "meanings";
}

/// Envelope fields of an asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetHeader {
    pub guid: Option<String>,
    pub status: Option<AtlanStatus>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    /// Epoch millis.
    pub create_time: Option<i64>,
    /// Epoch millis.
    pub update_time: Option<i64>,
    pub is_incomplete: Option<bool>,
    pub atlan_tags: Vec<AtlanTag>,
    pub atlan_tag_names: Vec<String>,
    pub meanings: Vec<TermAssignmentHeader>,
    pub meaning_names: Vec<String>,
    pub labels: Vec<String>,
    pub custom_metadata: AttributeMap,
    /// Attribute names sent as explicit JSON null on save.
    pub null_fields: BTreeSet<String>,
}

impl AssetHeader {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_time.and_then(millis_to_datetime)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.update_time.and_then(millis_to_datetime)
    }

    fn from_entity(entity: &Entity) -> Self {
        Self {
            guid: entity.guid.clone(),
            status: entity.status,
            created_by: entity.created_by.clone(),
            updated_by: entity.updated_by.clone(),
            create_time: entity.create_time,
            update_time: entity.update_time,
            is_incomplete: entity.is_incomplete,
            atlan_tags: entity.atlan_tags.clone(),
            atlan_tag_names: entity.atlan_tag_names.clone(),
            meanings: entity.meanings.clone(),
            meaning_names: entity.meaning_names.clone(),
            labels: entity.labels.clone(),
            custom_metadata: entity.custom_metadata.clone(),
            null_fields: BTreeSet::new(),
        }
    }
}

pub(crate) fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Attributes common to every asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_status: Option<CertificateStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_status_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_updated_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_type: Option<AtlanAnnouncementType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_updated_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_users: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_groups: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_users: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_groups: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_users: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_groups: Option<BTreeSet<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_qualified_name: Option<String>,

    #[serde(
        rename = "sourceURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_owners: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_updated_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_run: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_run_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_workflow_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_lineage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_discoverable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity_score: Option<f64>,

    /// Glossary terms assigned to the asset.
    #[serde(
        rename = "meanings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_terms: Option<BTreeSet<Reference>>,
}

impl AssetAttributes {
    pub fn certificate_updated(&self) -> Option<DateTime<Utc>> {
        self.certificate_updated_at.and_then(millis_to_datetime)
    }

    pub fn announcement_updated(&self) -> Option<DateTime<Utc>> {
        self.announcement_updated_at.and_then(millis_to_datetime)
    }
}

/// Attributes of assets that take part in lineage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_to_processes: Option<BTreeSet<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_from_processes: Option<BTreeSet<Reference>>,
}

/// The attribute struct of one asset type. Derived with
/// `#[derive(AttributeSet)]` on a struct that flattens [`AssetAttributes`]
/// into a field marked `#[asset(base)]`.
pub trait AttributeSet:
    Serialize + DeserializeOwned + Default + Clone + Debug + Send + Sync + 'static
{
    fn asset(&self) -> &AssetAttributes;
    fn asset_mut(&mut self) -> &mut AssetAttributes;
}

/// One asset type in the metadata graph.
///
/// Implemented by `#[derive(AtlanAsset)]`; the provided methods supply the
/// reference factories, updater, trims and wire conversion every asset type
/// shares.
pub trait AssetType: Sized + Clone + Debug + Send + Sync + 'static {
    type Attributes: AttributeSet;

    const TYPE_NAME: &'static str;
    const SUPER_TYPES: &'static [&'static str];

    fn from_parts(header: AssetHeader, attributes: Self::Attributes) -> Self;
    fn header(&self) -> &AssetHeader;
    fn header_mut(&mut self) -> &mut AssetHeader;
    fn attributes(&self) -> &Self::Attributes;
    fn attributes_mut(&mut self) -> &mut Self::Attributes;

    fn asset(&self) -> &AssetAttributes {
        self.attributes().asset()
    }

    fn asset_mut(&mut self) -> &mut AssetAttributes {
        self.attributes_mut().asset_mut()
    }

    fn guid(&self) -> Option<&str> {
        self.header().guid.as_deref()
    }

    fn qualified_name(&self) -> Option<&str> {
        self.asset().qualified_name.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.asset().name.as_deref()
    }

    fn status(&self) -> AtlanStatus {
        self.header().status.unwrap_or_default()
    }

    /// True for this type's own name and any of its super types.
    fn is_a(type_name: &str) -> bool {
        type_name == Self::TYPE_NAME || Self::SUPER_TYPES.contains(&type_name)
    }

    fn ref_by_guid(guid: impl Into<String>) -> Result<Reference> {
        Self::ref_by_guid_with(guid, SaveSemantic::Replace)
    }

    fn ref_by_guid_with(guid: impl Into<String>, semantic: SaveSemantic) -> Result<Reference> {
        Reference::by_guid(Self::TYPE_NAME, guid, semantic)
    }

    fn ref_by_qualified_name(qualified_name: impl Into<String>) -> Result<Reference> {
        Self::ref_by_qualified_name_with(qualified_name, SaveSemantic::Replace)
    }

    fn ref_by_qualified_name_with(
        qualified_name: impl Into<String>,
        semantic: SaveSemantic,
    ) -> Result<Reference> {
        Reference::by_qualified_name(Self::TYPE_NAME, qualified_name, semantic)
    }

    /// Minimal instance for modifying an existing asset.
    fn updater(qualified_name: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let qualified_name = qualified_name.into();
        let name = name.into();
        validate_required(
            Self::TYPE_NAME,
            &[
                (QUALIFIED_NAME, Some(qualified_name.as_str())),
                (NAME, Some(name.as_str())),
            ],
        )?;
        let header = AssetHeader {
            guid: Some(placeholder_guid()),
            ..Default::default()
        };
        let mut attributes = Self::Attributes::default();
        attributes.asset_mut().qualified_name = Some(qualified_name);
        attributes.asset_mut().name = Some(name);
        Ok(Self::from_parts(header, attributes))
    }

    /// A fresh updater carrying only this asset's qualified name and name.
    fn trim_to_required(&self) -> Result<Self> {
        Self::updater(
            self.qualified_name().unwrap_or_default(),
            self.name().unwrap_or_default(),
        )
    }

    /// A reference to this asset, by GUID when it has one.
    fn trim_to_reference(&self) -> Result<Reference> {
        if let Some(guid) = self.guid().filter(|g| !g.trim().is_empty()) {
            return Self::ref_by_guid(guid);
        }
        if let Some(qn) = self.qualified_name().filter(|q| !q.trim().is_empty()) {
            return Self::ref_by_qualified_name(qn);
        }
        Err(AtlanError::missing_relationship_param(Self::TYPE_NAME))
    }

    /// Marks `attribute` (wire name) to be sent as explicit null.
    fn null_field(&mut self, attribute: &str) {
        self.header_mut().null_fields.insert(attribute.to_string());
    }

    fn with_certificate(mut self, status: CertificateStatus, message: Option<String>) -> Self {
        let asset = self.asset_mut();
        asset.certificate_status = Some(status);
        asset.certificate_status_message = message;
        self
    }

    fn with_announcement(
        mut self,
        announcement_type: AtlanAnnouncementType,
        title: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        let asset = self.asset_mut();
        asset.announcement_type = Some(announcement_type);
        asset.announcement_title = Some(title.into());
        asset.announcement_message = message;
        self
    }

    fn with_description(mut self, description: impl Into<String>) -> Self {
        self.asset_mut().description = Some(description.into());
        self
    }

    fn with_owner_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset_mut().owner_users = Some(users.into_iter().map(Into::into).collect());
        self
    }

    fn with_assigned_terms<I>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = Reference>,
    {
        self.asset_mut().assigned_terms = Some(terms.into_iter().collect());
        self
    }

    fn with_atlan_tag(mut self, tag: AtlanTag) -> Self {
        self.header_mut().atlan_tags.push(tag);
        self
    }

    /// Wire envelope for this asset, with save semantics routed and explicit
    /// nulls applied.
    fn to_entity(&self) -> Result<Entity> {
        let attributes = match serde_json::to_value(self.attributes())? {
            Value::Object(map) => map,
            other => {
                return Err(AtlanError::Serialization(serde::ser::Error::custom(
                    format!(
                        "attributes of {} serialised to {} instead of an object",
                        Self::TYPE_NAME,
                        other
                    ),
                )))
            }
        };
        let header = self.header().clone();
        let mut entity = Entity {
            type_name: Self::TYPE_NAME.to_string(),
            guid: header.guid,
            status: header.status,
            created_by: header.created_by,
            updated_by: header.updated_by,
            create_time: header.create_time,
            update_time: header.update_time,
            is_incomplete: header.is_incomplete,
            attributes,
            atlan_tags: header.atlan_tags,
            atlan_tag_names: header.atlan_tag_names,
            meanings: header.meanings,
            meaning_names: header.meaning_names,
            labels: header.labels,
            custom_metadata: header.custom_metadata,
            ..Default::default()
        };
        entity.route_relationships();
        for field in header.null_fields {
            entity.attributes.entry(field).or_insert(Value::Null);
        }
        Ok(entity)
    }

    fn from_entity(entity: Entity) -> Result<Self> {
        if entity.type_name != Self::TYPE_NAME {
            debug!(
                expected = Self::TYPE_NAME,
                found = %entity.type_name,
                guid = ?entity.guid,
                "entity type mismatch"
            );
            return Err(AtlanError::not_found(
                ErrorCode::AssetNotTypeRequested,
                format!(
                    "asset {} is a {}, not a {}",
                    entity
                        .guid
                        .as_deref()
                        .or(entity.qualified_name())
                        .unwrap_or("<unidentified>"),
                    entity.type_name,
                    Self::TYPE_NAME
                ),
            ));
        }
        let header = AssetHeader::from_entity(&entity);
        let attributes: Self::Attributes =
            serde_json::from_value(Value::Object(entity.merged_attributes()))?;
        Ok(Self::from_parts(header, attributes))
    }
}
