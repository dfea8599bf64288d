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

//! Member-by-member mapping of derived structs.
//!
//! `#[derive(YamlObject)]` forwards `yaml_write_data` and `yaml_read_data` of a
//! struct here; the member list comes from the cached
//! [`TypeDescriptor`](crate::meta::TypeDescriptor).

use crate::error::Error;
use crate::event::{Event, NodeProps};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::StructSerializer;

/// Writes `this` as a mapping, one key per emitted member.
///
/// A member equal to its default is left out unless default values are
/// emitted. In JSON mode a null member is always written as `null`.
pub fn write_data<T: StructSerializer>(
    this: &T,
    context: &mut WriteContext,
    props: NodeProps,
) -> Result<(), Error> {
    let descriptor = context.descriptor::<T>()?;
    if !descriptor.has_factory() {
        return Err(context.type_resolution_error(format!(
            "{} has no factory and no converter",
            descriptor.type_name()
        )));
    }
    let emit_defaults = context.config().is_emit_default_values();
    let json = context.config().is_json();

    context.inc_depth()?;
    let style = context.mapping_style();
    context.emit(Event::MappingStart(props, style))?;
    for member in descriptor.members() {
        let Some(access) = member.access() else {
            continue;
        };
        let emitted = emit_defaults || (json && access.is_null(this)) || !access.is_default(this);
        if !emitted {
            continue;
        }
        context.write_key(member.document_name())?;
        context.push_member(member.name());
        access.write(this, context)?;
        context.pop_path();
    }
    context.emit(Event::MappingEnd)?;
    context.dec_depth();
    Ok(())
}

/// Populates `this` from the mapping starting at `head`.
///
/// Members absent from the mapping keep their value. A key seen twice is
/// merged into the same member again.
pub fn read_data<T: StructSerializer>(
    this: &mut T,
    context: &mut ReadContext,
    head: Event,
) -> Result<(), Error> {
    let descriptor = context.descriptor::<T>()?;
    if !matches!(head, Event::MappingStart(..)) {
        return Err(context.schema_error(format!(
            "expected a mapping for {}, found {head}",
            descriptor.type_name()
        )));
    }
    let config = context.config();

    context.inc_depth()?;
    while !context.allow_mapping_end()? {
        let key = context.read_key()?;
        let head = context.read_head()?;
        let matched = descriptor
            .member(&key)
            .and_then(|member| member.access().map(|access| (member, access)));
        let Some((member, access)) = matched else {
            if !config.is_ignore_unmatched_properties() {
                return Err(context.schema_error(format!(
                    "unknown member '{key}' in {}",
                    descriptor.type_name()
                )));
            }
            tracing::debug!(key = %key, type_name = %descriptor.type_name(), "skipping unmatched key");
            context.skip_node(&head)?;
            continue;
        };
        if member.is_private() && !config.is_respect_private_setters() {
            tracing::debug!(member = %member.name(), type_name = %descriptor.type_name(), "skipping private member");
            context.skip_node(&head)?;
            continue;
        }
        context.push_member(member.name());
        access.read(this, context, head)?;
        context.pop_path();
    }
    context.dec_depth();
    Ok(())
}
