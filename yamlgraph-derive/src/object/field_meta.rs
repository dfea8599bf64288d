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

//! Parsing of `#[yaml(...)]` attributes.
//!
//! Field level:
//! - `ignore`: excluded from mapping, created with `Default::default()`
//! - `alias = "..."`: key used in documents instead of the field name
//! - `default = expr`: declared default, left out of output when equal
//! - `private`: populated from documents only with `respect_private_setters`
//! - `order = N`: members with an order key come first, sorted by it
//! - `base`: embedded base struct whose members are flattened in first
//!
//! Type level: `no_factory`. Variant level: `alias = "..."`.

use syn::{Attribute, Expr, Field, LitInt, LitStr, Variant};

#[derive(Default)]
pub struct YamlFieldMeta {
    pub ignore: bool,
    pub alias: Option<LitStr>,
    pub default: Option<Expr>,
    pub private: bool,
    pub order: Option<i32>,
    pub base: bool,
}

#[derive(Default)]
pub struct YamlTypeMeta {
    pub no_factory: bool,
}

fn yaml_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("yaml"))
}

pub fn parse_field_meta(field: &Field) -> syn::Result<YamlFieldMeta> {
    let mut meta = YamlFieldMeta::default();
    for attr in yaml_attrs(&field.attrs) {
        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("ignore") {
                meta.ignore = true;
            } else if nested.path.is_ident("alias") {
                let alias: LitStr = nested.value()?.parse()?;
                if alias.value().is_empty() {
                    return Err(syn::Error::new(alias.span(), "alias must not be empty"));
                }
                meta.alias = Some(alias);
            } else if nested.path.is_ident("default") {
                meta.default = Some(nested.value()?.parse()?);
            } else if nested.path.is_ident("private") {
                meta.private = true;
            } else if nested.path.is_ident("order") {
                let lit: LitInt = nested.value()?.parse()?;
                meta.order = Some(lit.base10_parse()?);
            } else if nested.path.is_ident("base") {
                meta.base = true;
            } else {
                return Err(nested.error("unsupported yaml field attribute"));
            }
            Ok(())
        })?;
    }
    if meta.base && (meta.ignore || meta.alias.is_some() || meta.default.is_some()) {
        return Err(syn::Error::new_spanned(
            field,
            "`base` cannot be combined with `ignore`, `alias` or `default`",
        ));
    }
    Ok(meta)
}

pub fn parse_type_meta(attrs: &[Attribute]) -> syn::Result<YamlTypeMeta> {
    let mut meta = YamlTypeMeta::default();
    for attr in yaml_attrs(attrs) {
        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("no_factory") {
                meta.no_factory = true;
                Ok(())
            } else {
                Err(nested.error("unsupported yaml type attribute"))
            }
        })?;
    }
    Ok(meta)
}

/// Document name of a unit variant.
pub fn parse_variant_name(variant: &Variant) -> syn::Result<String> {
    let mut name = variant.ident.to_string();
    for attr in yaml_attrs(&variant.attrs) {
        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("alias") {
                let alias: LitStr = nested.value()?.parse()?;
                name = alias.value();
                Ok(())
            } else {
                Err(nested.error("unsupported yaml variant attribute"))
            }
        })?;
    }
    Ok(name)
}
