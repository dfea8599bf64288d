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

use crate::object::misc::gen_field_init;
use crate::util::SourceField;
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

pub fn gen_read_data() -> TokenStream {
    quote! {
        yamlgraph_core::serializer::struct_::read_data(self, context, head)
    }
}

/// Body of `yaml_create`. A struct marked `no_factory` cannot be created
/// from a document unless a converter claims it.
pub fn gen_create(name: &Ident, fields: &[SourceField], no_factory: bool) -> TokenStream {
    if no_factory {
        let message = format!("{name} has no factory and no converter");
        return quote! {
            Err(yamlgraph_core::Error::type_resolution(#message))
        };
    }
    let inits = fields.iter().map(gen_field_init);
    quote! {
        Ok(Self { #(#inits),* })
    }
}
