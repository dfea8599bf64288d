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

use crate::object::field_meta::parse_type_meta;
use crate::object::{derive_enum, misc, read, write};
use crate::util::source_fields;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput};

pub fn derive_serializer(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let type_meta = parse_type_meta(&ast.attrs)?;
    let data_struct = match &ast.data {
        Data::Struct(s) => s,
        Data::Enum(e) => return derive_enum::derive_enum(name, e, ast),
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "YamlObject cannot be derived for unions",
            ))
        }
    };
    let fields = source_fields(&data_struct.fields)?;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let write_data_ts = write::gen_write_data();
    let read_data_ts = read::gen_read_data();
    let create_ts = read::gen_create(name, &fields, type_meta.no_factory);
    let is_default_ts = misc::gen_is_default(&fields);
    let members_ts = misc::gen_members(&fields);
    let has_factory = !type_meta.no_factory;

    Ok(quote! {
        impl #impl_generics yamlgraph_core::Serializer for #name #ty_generics #where_clause {
            fn yaml_write_data(
                &self,
                context: &mut yamlgraph_core::WriteContext,
                props: yamlgraph_core::NodeProps,
            ) -> Result<(), yamlgraph_core::Error> {
                #write_data_ts
            }

            fn yaml_read_data(
                &mut self,
                context: &mut yamlgraph_core::ReadContext,
                head: yamlgraph_core::Event,
            ) -> Result<(), yamlgraph_core::Error> {
                #read_data_ts
            }

            fn yaml_create() -> Result<Self, yamlgraph_core::Error> {
                #create_ts
            }

            fn yaml_is_default(&self) -> bool {
                #is_default_ts
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl #impl_generics yamlgraph_core::StructSerializer for #name #ty_generics #where_clause {
            fn yaml_members() -> Vec<yamlgraph_core::MemberDescriptor<Self>> {
                #members_ts
            }

            fn yaml_has_factory() -> bool {
                #has_factory
            }
        }
    })
}
