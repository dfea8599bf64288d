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

use crate::object::field_meta::{parse_field_meta, YamlFieldMeta};
use syn::{Field, Fields, Ident};

/// A named field with its parsed metadata.
pub struct SourceField<'a> {
    pub field: &'a Field,
    pub ident: &'a Ident,
    /// Logical member name: the field identifier without a raw prefix.
    pub name: String,
    pub meta: YamlFieldMeta,
}

/// Collects the fields of a struct in declaration order.
///
/// Tuple structs have no member names to map and are rejected.
pub fn source_fields(fields: &Fields) -> syn::Result<Vec<SourceField<'_>>> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let ident = field
                    .ident
                    .as_ref()
                    .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
                let name = ident.to_string();
                let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
                Ok(SourceField {
                    field,
                    ident,
                    name,
                    meta: parse_field_meta(field)?,
                })
            })
            .collect(),
        Fields::Unit => Ok(Vec::new()),
        Fields::Unnamed(unnamed) => Err(syn::Error::new_spanned(
            unnamed,
            "YamlObject requires named fields; tuple structs cannot be mapped",
        )),
    }
}
