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

use crate::util::SourceField;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Expr, ExprLit, Lit};

/// Body of `StructSerializer::yaml_members`: base members first, then the
/// struct's own members in declaration order.
pub fn gen_members(fields: &[SourceField]) -> TokenStream {
    let bases = fields.iter().filter(|f| f.meta.base).map(|f| {
        let ident = f.ident;
        let ty = &f.field.ty;
        quote! {
            members.extend(
                <#ty as yamlgraph_core::StructSerializer>::yaml_members()
                    .into_iter()
                    .map(|member| {
                        yamlgraph_core::MemberDescriptor::<Self>::project::<#ty>(
                            member,
                            |owner| &owner.#ident,
                            |owner| &mut owner.#ident,
                        )
                    }),
            );
        }
    });
    let own = fields.iter().filter(|f| !f.meta.base).map(|f| {
        let name = &f.name;
        if f.meta.ignore {
            return quote! {
                members.push(yamlgraph_core::MemberDescriptor::<Self>::ignored(#name));
            };
        }
        let ident = f.ident;
        let ty = &f.field.ty;
        let mut member = match &f.meta.default {
            Some(default) => quote! {
                yamlgraph_core::MemberDescriptor::<Self>::field_with_default::<#ty>(
                    #name,
                    |owner| &owner.#ident,
                    |owner| &mut owner.#ident,
                    |value| *value == #default,
                )
            },
            None => quote! {
                yamlgraph_core::MemberDescriptor::<Self>::field::<#ty>(
                    #name,
                    |owner| &owner.#ident,
                    |owner| &mut owner.#ident,
                )
            },
        };
        if let Some(alias) = &f.meta.alias {
            member = quote! { #member.alias(#alias) };
        }
        if f.meta.private {
            member = quote! { #member.private() };
        }
        if let Some(order) = f.meta.order {
            member = quote! { #member.order(#order) };
        }
        quote! { members.push(#member); }
    });
    quote! {
        let mut members = Vec::new();
        #(#bases)*
        #(#own)*
        members
    }
}

/// Initial value of a field in a created instance.
pub fn gen_field_init(field: &SourceField) -> TokenStream {
    let ident = field.ident;
    let ty = &field.field.ty;
    if field.meta.ignore {
        return quote! { #ident: ::core::default::Default::default() };
    }
    match &field.meta.default {
        Some(Expr::Lit(ExprLit {
            lit: Lit::Str(text), ..
        })) => quote! { #ident: ::core::convert::Into::into(#text) },
        Some(default) => quote! { #ident: #default },
        None => quote! { #ident: <#ty as yamlgraph_core::Serializer>::yaml_create()? },
    }
}

/// A struct equals its default when every mapped member does.
pub fn gen_is_default(fields: &[SourceField]) -> TokenStream {
    let checks: Vec<TokenStream> = fields
        .iter()
        .filter(|f| !f.meta.ignore)
        .map(|f| {
            let ident = f.ident;
            match &f.meta.default {
                Some(default) => quote! { self.#ident == #default },
                None => quote! { yamlgraph_core::Serializer::yaml_is_default(&self.#ident) },
            }
        })
        .collect();
    if checks.is_empty() {
        quote! { true }
    } else {
        quote! { #(#checks)&&* }
    }
}
