//! Procedural macros for Atlan asset models
//!
//! This crate provides two derives:
//! - `#[derive(AtlanAsset)]` - Implement `AssetType` for a header + attributes struct
//!   and register the type name with the asset type registry
//! - `#[derive(AttributeSet)]` - Expose the shared `AssetAttributes` embedded in a
//!   type-specific attribute struct

use proc_macro::TokenStream;

mod atlan_asset;
mod attribute_set;

/// Derive `AssetType` for an asset model.
///
/// The struct must have exactly two named fields, `header: AssetHeader` and
/// `attributes: <SomeAttributeSet>`.
///
/// # Attributes
///
/// - `#[asset(type_name = "...")]` - Required. The type name used on the wire.
/// - `#[asset(super_types("A", "B"))]` - Optional. Super types, nearest first.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
/// #[asset(type_name = "Table", super_types("SQL", "Catalog", "Asset"))]
/// pub struct Table {
///     pub header: AssetHeader,
///     pub attributes: TableAttributes,
/// }
/// ```
#[proc_macro_derive(AtlanAsset, attributes(asset))]
pub fn derive_atlan_asset(input: TokenStream) -> TokenStream {
    atlan_asset::derive_atlan_asset_impl(input)
}

/// Derive `AttributeSet` for a type-specific attribute struct.
///
/// Exactly one field must be marked `#[asset(base)]`; it must be of type
/// `AssetAttributes` and is normally also `#[serde(flatten)]`.
#[proc_macro_derive(AttributeSet, attributes(asset))]
pub fn derive_attribute_set(input: TokenStream) -> TokenStream {
    attribute_set::derive_attribute_set_impl(input)
}
