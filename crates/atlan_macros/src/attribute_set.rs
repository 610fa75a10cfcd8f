//! Implementation of #[derive(AttributeSet)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

pub fn derive_attribute_set_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "AttributeSet requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "AttributeSet only works on structs")
                .to_compile_error()
                .into();
        }
    };

    let mut base_fields = Vec::new();
    for field in fields {
        let mut is_base = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("asset")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("base") {
                    is_base = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported field attribute, expected #[asset(base)]"))
                }
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }
        if is_base {
            base_fields.push(field);
        }
    }

    let base = match base_fields.as_slice() {
        [field] => field.ident.as_ref(),
        _ => {
            return syn::Error::new_spanned(
                &input,
                "AttributeSet requires exactly one field marked #[asset(base)]",
            )
            .to_compile_error()
            .into();
        }
    };

    let expanded = quote! {
        impl ::atlan_core::asset::AttributeSet for #name {
            fn asset(&self) -> &::atlan_core::asset::AssetAttributes { &self.#base }

            fn asset_mut(&mut self) -> &mut ::atlan_core::asset::AssetAttributes { &mut self.#base }
        }
    };

    TokenStream::from(expanded)
}
