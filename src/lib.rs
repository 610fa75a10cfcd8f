//! Atlan SDK
//!
//! One import for applications: the asset model from `atlan_core`, the
//! client from `atlan_client`, and the tracing bootstrap used by the CLI.
//!
//! ```no_run
//! use atlan_sdk::prelude::*;
//! use atlan_sdk::model::sql::Table;
//!
//! # async fn run() -> atlan_sdk::Result<()> {
//! let client = AtlanClient::from_env()?;
//! let table: Table = client.get("default/snowflake/1700000000/db/sch/orders", false).await?;
//! client
//!     .update_certificate::<Table>(table.qualified_name().unwrap_or_default(), CertificateStatus::Verified, None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod telemetry;

pub use atlan_client::{
    assets, cache, client, config, http, inprocess, ApiCall, AtlanApi, AtlanClient, AtlanConfig,
    AtlanTagCache, GetOptions, HttpClient, InMemoryClient, SaveOptions, SearchPager,
};
pub use atlan_core::{
    asset, entity, enums, error, guid, model, mutation, qualified_name, reference, registry,
    search, tag,
};
pub use atlan_core::{AtlanError, ErrorCode, Result};

pub mod prelude {
    pub use atlan_client::{AtlanApi, AtlanClient, AtlanConfig, InMemoryClient};
    pub use atlan_core::search::fields;
    pub use atlan_core::{
        AssetAttributes, AssetHeader, AssetType, AtlanAnnouncementType, AtlanAsset,
        AtlanConnectorType, AtlanDeleteType, AtlanError, AtlanStatus, AtlanTag, AttributeSet,
        CertificateStatus, Entity, ErrorCode, FluentSearch, Reference, SaveSemantic, SortOrder,
        TagPropagation,
    };
}
