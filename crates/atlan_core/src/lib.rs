//! Atlan SDK core: asset models, references, the REST envelope and the
//! index-search DSL.
//!
//! Pure types, no I/O. The remote operations live in `atlan_client`.

// Lets the derive output name `::atlan_core::...` from inside this crate.
extern crate self as atlan_core;

pub mod asset;
pub mod entity;
pub mod enums;
pub mod error;
pub mod guid;
pub mod model;
pub mod mutation;
pub mod qualified_name;
pub mod reference;
pub mod registry;
pub mod search;
pub mod tag;

pub use atlan_macros::{AtlanAsset, AttributeSet};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
    pub use serde;
}

pub use asset::{AssetAttributes, AssetHeader, AssetType, CatalogAttributes};
pub use entity::Entity;
pub use enums::{
    AtlanAnnouncementType, AtlanConnectionCategory, AtlanConnectorType, AtlanDeleteType,
    AtlanStatus, CertificateStatus, PowerBiEndorsement, SaveSemantic, SortOrder,
};
pub use error::{AtlanError, ErrorCode, Result};
pub use mutation::AssetMutationResponse;
pub use reference::Reference;
pub use search::FluentSearch;
pub use tag::{AtlanTag, AtlanTagDef, TagPropagation};
