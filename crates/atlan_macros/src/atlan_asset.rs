//! Implementation of #[derive(AtlanAsset)]

use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Token};

pub fn derive_atlan_asset_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let (type_name, super_types) = match parse_asset_attrs(&input.attrs) {
        Ok(parsed) => parsed,
        Err(err) => return err.to_compile_error().into(),
    };

    let Some(type_name) = type_name else {
        return syn::Error::new_spanned(
            &input,
            "AtlanAsset requires #[asset(type_name = \"...\")] on the struct",
        )
        .to_compile_error()
        .into();
    };

    // Validate: named struct with `header` and `attributes` fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "AtlanAsset requires a struct with named fields `header` and `attributes`",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "AtlanAsset only works on structs")
                .to_compile_error()
                .into();
        }
    };

    let has_header = fields
        .iter()
        .any(|f| f.ident.as_ref().is_some_and(|i| i == "header"));
    let attributes_ty = fields
        .iter()
        .find(|f| f.ident.as_ref().is_some_and(|i| i == "attributes"))
        .map(|f| &f.ty);

    let attributes_ty = match (has_header, attributes_ty, fields.len()) {
        (true, Some(ty), 2) => ty,
        _ => {
            return syn::Error::new_spanned(
                &input,
                "AtlanAsset requires exactly two fields: `header: AssetHeader` and `attributes: <AttributeSet>`",
            )
            .to_compile_error()
            .into();
        }
    };

    let expanded = quote! {
        impl ::atlan_core::asset::AssetType for #name {
            type Attributes = #attributes_ty;

            const TYPE_NAME: &'static str = #type_name;
            const SUPER_TYPES: &'static [&'static str] = &[#(#super_types),*];

            fn from_parts(
                header: ::atlan_core::asset::AssetHeader,
                attributes: Self::Attributes,
            ) -> Self {
                Self { header, attributes }
            }

            fn header(&self) -> &::atlan_core::asset::AssetHeader { &self.header }

            fn header_mut(&mut self) -> &mut ::atlan_core::asset::AssetHeader { &mut self.header }

            fn attributes(&self) -> &Self::Attributes { &self.attributes }

            fn attributes_mut(&mut self) -> &mut Self::Attributes { &mut self.attributes }
        }

        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let base = ::atlan_core::asset::AttributeSet::asset(&self.attributes);
                write!(
                    f,
                    "{}({})",
                    #type_name,
                    base.qualified_name.as_deref().unwrap_or("<unqualified>")
                )
            }
        }

        impl ::atlan_core::__private::serde::Serialize for #name {
            fn serialize<S: ::atlan_core::__private::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                let entity = ::atlan_core::asset::AssetType::to_entity(self)
                    .map_err(::atlan_core::__private::serde::ser::Error::custom)?;
                ::atlan_core::__private::serde::Serialize::serialize(&entity, serializer)
            }
        }

        impl<'de> ::atlan_core::__private::serde::Deserialize<'de> for #name {
            fn deserialize<D: ::atlan_core::__private::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                // Fully-qualified call to avoid trait-not-in-scope error
                let entity = <::atlan_core::entity::Entity as ::atlan_core::__private::serde::Deserialize>::deserialize(deserializer)?;
                <Self as ::atlan_core::asset::AssetType>::from_entity(entity)
                    .map_err(::atlan_core::__private::serde::de::Error::custom)
            }
        }

        impl ::std::convert::TryFrom<::atlan_core::entity::Entity> for #name {
            type Error = ::atlan_core::error::AtlanError;

            fn try_from(entity: ::atlan_core::entity::Entity) -> ::std::result::Result<Self, Self::Error> {
                <Self as ::atlan_core::asset::AssetType>::from_entity(entity)
            }
        }

        ::atlan_core::__private::inventory::submit! {
            ::atlan_core::registry::AssetTypeRegistration {
                type_name: #type_name,
                super_types: &[#(#super_types),*],
            }
        }
    };

    TokenStream::from(expanded)
}

fn parse_asset_attrs(attrs: &[syn::Attribute]) -> syn::Result<(Option<LitStr>, Vec<LitStr>)> {
    let mut type_name = None;
    let mut super_types = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("asset") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_name") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(meta.error("type_name must not be empty"));
                    }
                    type_name = Some(value);
                } else if meta.path.is_ident("super_types") {
                    // super_types("A", "B") holds literals, not nested metas
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let list = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                    super_types.extend(list);
                } else {
                    return Err(meta.error("unsupported asset attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok((type_name, super_types))
}
