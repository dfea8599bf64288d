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

use crate::error::Error;
use crate::event::{Event, NodeProps};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::Serializer;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

pub fn write_map_data<'a, K, V, I>(iter: I, context: &mut WriteContext, props: NodeProps) -> Result<(), Error>
where
    K: Serializer + 'a,
    V: Serializer + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let style = context.mapping_style();
    context.inc_depth()?;
    context.emit(Event::MappingStart(props, style))?;
    for (key, value) in iter {
        context.begin_key();
        let written = key.yaml_write(context);
        context.end_key();
        written?;
        value.yaml_write(context)?;
    }
    context.emit(Event::MappingEnd)?;
    context.dec_depth();
    Ok(())
}

/// Reads the entries of the mapping starting at `head`.
///
/// `entry` receives each decoded key together with the head of its value, so
/// that the caller can merge into an existing entry. A null scalar reads as an
/// empty mapping.
pub fn read_map_data<K, F>(context: &mut ReadContext, head: Event, mut entry: F) -> Result<(), Error>
where
    K: Serializer,
    F: FnMut(&mut ReadContext, K, Event) -> Result<(), Error>,
{
    match head {
        Event::MappingStart(..) => {}
        head if head.is_null_scalar() => return Ok(()),
        other => {
            return Err(context.schema_error(format!("expected a mapping, found {other}")));
        }
    }
    context.inc_depth()?;
    while !context.allow_mapping_end()? {
        let key_head = context.read_head()?;
        let label = match &key_head {
            Event::Scalar(_, scalar) => scalar.value.clone(),
            other => other.kind_name().to_string(),
        };
        let key = K::yaml_read_node(context, key_head)?;
        let value_head = context.read_head()?;
        context.push_member(&label);
        entry(context, key, value_head)?;
        context.pop_path();
    }
    context.dec_depth();
    Ok(())
}

impl<K: Serializer + Eq + Hash, V: Serializer> Serializer for HashMap<K, V> {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        write_map_data(self.iter(), context, props)
    }

    /// Merges: entries present in the document are populated in place or
    /// inserted, other entries are kept.
    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        read_map_data(context, head, |context, key: K, value_head| {
            match self.get_mut(&key) {
                Some(existing) => existing.yaml_read_node_into(context, value_head)?,
                None => {
                    let value = V::yaml_read_node(context, value_head)?;
                    self.insert(key, value);
                }
            }
            Ok(())
        })
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(HashMap::new())
    }

    fn yaml_is_default(&self) -> bool {
        self.is_empty()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl<K: Serializer + Ord, V: Serializer> Serializer for BTreeMap<K, V> {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        write_map_data(self.iter(), context, props)
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        read_map_data(context, head, |context, key: K, value_head| {
            match self.get_mut(&key) {
                Some(existing) => existing.yaml_read_node_into(context, value_head)?,
                None => {
                    let value = V::yaml_read_node(context, value_head)?;
                    self.insert(key, value);
                }
            }
            Ok(())
        })
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(BTreeMap::new())
    }

    fn yaml_is_default(&self) -> bool {
        self.is_empty()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
