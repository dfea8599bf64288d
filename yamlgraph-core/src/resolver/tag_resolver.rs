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

use super::type_resolver::{TypeInfo, TypeResolver};
use crate::error::Error;
use crate::types::{normalize_tag, BuiltinTag};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// What a document tag stands for.
#[derive(Clone, Debug)]
pub enum ResolvedTag<'a> {
    /// The bare `!` tag: no type information.
    NonSpecific,
    /// One of the core schema tags, implicit for its natural type.
    Builtin(BuiltinTag),
    /// A registered type.
    Type(&'a Arc<TypeInfo>),
}

/// Bidirectional binding between document tags and host types.
#[derive(Default, Debug)]
pub struct TagResolver {
    tag_to_type: HashMap<String, TypeId>,
    type_to_tag: HashMap<TypeId, String>,
}

impl TagResolver {
    /// Binds `tag` to `type_id`. A later mapping for the same tag or type wins.
    pub fn register(&mut self, tag: &str, type_id: TypeId) -> Result<(), Error> {
        if tag.is_empty() || tag == "!" {
            return Err(Error::type_resolution(format!(
                "'{tag}' cannot be used as a type tag"
            )));
        }
        if BuiltinTag::from_tag(tag).is_some() {
            return Err(Error::type_resolution(format!(
                "{tag} is reserved by the core schema"
            )));
        }
        if let Some(previous) = self.type_to_tag.insert(type_id, tag.to_string()) {
            self.tag_to_type.remove(&normalize_tag(&previous));
        }
        if let Some(previous) = self.tag_to_type.insert(normalize_tag(tag), type_id) {
            if previous != type_id {
                self.type_to_tag.remove(&previous);
            }
        }
        tracing::debug!(tag = %tag, "registered tag mapping");
        Ok(())
    }

    /// Explicit tag of `type_id`, if one is registered.
    #[inline(always)]
    pub fn tag_for(&self, type_id: &TypeId) -> Option<&str> {
        self.type_to_tag.get(type_id).map(String::as_str)
    }

    /// Tag written for a registered object held by a dynamic slot: the
    /// registered tag, else `!` followed by the catalog name.
    pub fn dynamic_tag_for(&self, info: &TypeInfo) -> String {
        match self.tag_for(&info.get_type_id()) {
            Some(tag) => tag.to_string(),
            None => format!("!{}", info.get_name()),
        }
    }

    /// Resolves a document tag.
    ///
    /// Core schema tags are always accepted. Other tags must be registered,
    /// unless `unsafe_type_names` is set: the tag text without its leading `!`
    /// is then looked up in the type catalog by short or full type name.
    pub fn type_for<'a>(
        &self,
        tag: &str,
        types: &'a TypeResolver,
        unsafe_type_names: bool,
    ) -> Result<ResolvedTag<'a>, Error> {
        if tag == "!" {
            return Ok(ResolvedTag::NonSpecific);
        }
        if let Some(builtin) = BuiltinTag::from_tag(tag) {
            return Ok(ResolvedTag::Builtin(builtin));
        }
        let registered = self
            .tag_to_type
            .get(&normalize_tag(tag))
            .and_then(|type_id| types.get_type_info(type_id));
        if let Some(info) = registered {
            return Ok(ResolvedTag::Type(info));
        }
        if unsafe_type_names {
            if let Some(info) = types.get_type_info_by_name(tag.trim_start_matches('!')) {
                return Ok(ResolvedTag::Type(info));
            }
        }
        Err(Error::unregistered_tag(format!(
            "{tag} is not mapped to any registered type"
        )))
    }
}
