// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Unit enums map to a scalar holding the variant name.

use crate::object::field_meta::parse_variant_name;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, Fields, Ident, Variant};

/// Variant the enum is created with: the `#[default]` one, else the first.
fn default_variant(data_enum: &DataEnum) -> Option<&Variant> {
    data_enum
        .variants
        .iter()
        .find(|v| v.attrs.iter().any(|attr| attr.path().is_ident("default")))
        .or_else(|| data_enum.variants.first())
}

pub fn derive_enum(name: &Ident, data_enum: &DataEnum, ast: &syn::DeriveInput) -> syn::Result<TokenStream> {
    if let Some(variant) = data_enum
        .variants
        .iter()
        .find(|v| !matches!(v.fields, Fields::Unit))
    {
        return Err(syn::Error::new_spanned(
            variant,
            "YamlObject supports unit variants only",
        ));
    }
    let Some(default) = default_variant(data_enum) else {
        return Err(syn::Error::new_spanned(
            name,
            "YamlObject cannot map an enum without variants",
        ));
    };
    let default = &default.ident;
    let idents: Vec<&Ident> = data_enum.variants.iter().map(|v| &v.ident).collect();
    let names = data_enum
        .variants
        .iter()
        .map(parse_variant_name)
        .collect::<syn::Result<Vec<String>>>()?;
    let indices: Vec<usize> = (0..idents.len()).collect();
    let (last, leading) = match idents.split_last() {
        Some((last, leading)) => (last, leading),
        None => return Err(syn::Error::new_spanned(name, "enum without variants")),
    };
    let leading_indices = &indices[..leading.len()];
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics yamlgraph_core::Serializer for #name #ty_generics #where_clause {
            fn yaml_write_data(
                &self,
                context: &mut yamlgraph_core::WriteContext,
                props: yamlgraph_core::NodeProps,
            ) -> Result<(), yamlgraph_core::Error> {
                let name = match self {
                    #(Self::#idents => #names,)*
                };
                yamlgraph_core::serializer::enum_::write_variant(context, props, name)
            }

            fn yaml_read_data(
                &mut self,
                context: &mut yamlgraph_core::ReadContext,
                head: yamlgraph_core::Event,
            ) -> Result<(), yamlgraph_core::Error> {
                const VARIANTS: &[&str] = &[#(#names),*];
                let index = yamlgraph_core::serializer::enum_::read_variant_index(
                    context, head, VARIANTS, #type_name,
                )?;
                *self = match index {
                    #(#leading_indices => Self::#leading,)*
                    _ => Self::#last,
                };
                Ok(())
            }

            fn yaml_create() -> Result<Self, yamlgraph_core::Error> {
                Ok(Self::#default)
            }

            fn yaml_is_default(&self) -> bool {
                matches!(self, Self::#default)
            }

            fn yaml_is_primitive() -> bool {
                true
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    })
}
