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
use crate::meta::MemberDescriptor;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::converter::ScalarConverter;
use crate::util::type_name_of;
use std::any::Any;
use std::sync::Arc;

/// Maps a host type to document nodes and back.
///
/// Implementations exist for primitives, strings, chrono types, collections,
/// smart pointers and [`Value`](crate::Value). Structs and unit enums get one
/// from `#[derive(YamlObject)]`.
///
/// # Write path
///
/// `yaml_write_node` picks the tag registered for the type and hands the value
/// to a claiming scalar converter, if any. Only when no converter claims the
/// type does it call `yaml_write_data`, which emits the node itself.
///
/// # Read path
///
/// `yaml_read_node` receives the first event of a node. It resolves aliases by
/// replaying the anchored node, checks the tag, then either converts the
/// scalar or creates the value with `yaml_create` and populates it with
/// `yaml_read_data`.
///
/// # Notes
///
/// Serializers for `Option`, `Box`, `Rc`, `Arc` and their weak counterparts
/// override the node-level methods so that tags and converters apply to the
/// inner type.
pub trait Serializer: Sized + 'static {
    /// Entry point of the serialization.
    #[inline(always)]
    fn yaml_write(&self, context: &mut WriteContext) -> Result<(), Error> {
        self.yaml_write_node(context, NodeProps::none())
    }

    /// Writes the node with the given anchor and tag, consulting converters.
    fn yaml_write_node(&self, context: &mut WriteContext, mut props: NodeProps) -> Result<(), Error> {
        if props.tag.is_none() {
            props.tag = context.tag_for::<Self>();
        }
        if let Some(converter) = context.converter_for::<Self>() {
            let object = context.object_context::<Self>(props.tag.clone());
            let scalar = converter.convert_to(&object, self.as_any())?;
            return context.emit_scalar(props, scalar);
        }
        self.yaml_write_data(context, props)
    }

    /// Emits the node. Need to be implemented.
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error>;

    /// Entry point of deserialization.
    #[inline(always)]
    fn yaml_read(context: &mut ReadContext) -> Result<Self, Error> {
        let head = context.read_head()?;
        Self::yaml_read_node(context, head)
    }

    /// Reads a fresh value from the node starting at `head`.
    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        let head = context.resolve_alias(head)?;
        context.check_tag::<Self>(&head)?;
        if let Some(converter) = context.converter_for::<Self>() {
            return read_converted(context, converter, head);
        }
        let mut value = Self::yaml_create()?;
        value.yaml_read_data(context, head)?;
        Ok(value)
    }

    /// Populates `self` in place from the node starting at `head`.
    ///
    /// Structs keep members the node does not mention, maps keep entries the
    /// node does not mention. Everything else is replaced.
    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let head = context.resolve_alias(head)?;
        context.check_tag::<Self>(&head)?;
        if let Some(converter) = context.converter_for::<Self>() {
            *self = read_converted(context, converter, head)?;
            return Ok(());
        }
        self.yaml_read_data(context, head)
    }

    /// Populates a value that is already shared through an anchor.
    ///
    /// Only interior-mutable containers support this; it is how a cycle back
    /// to a node still being read gets the final identity.
    #[allow(unused_variables)]
    fn yaml_read_node_shared(&self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        Err(Error::type_resolution(format!(
            "{} cannot be populated through a shared reference",
            type_name_of::<Self>()
        )))
    }

    /// Populates `self` from a resolved node head. Need to be implemented.
    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error>;

    /// The factory: a value to populate from a document.
    fn yaml_create() -> Result<Self, Error>;

    #[inline(always)]
    fn yaml_is_null(&self) -> bool {
        false
    }

    /// True when the value equals the natural default of its type.
    #[inline(always)]
    fn yaml_is_default(&self) -> bool {
        false
    }

    /// Scalars and enums. Sequences of primitives may be written in flow style.
    #[inline(always)]
    fn yaml_is_primitive() -> bool {
        false
    }

    #[inline(always)]
    fn yaml_is_interior_mutable() -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

/// Struct types with a member list, implemented by `#[derive(YamlObject)]`.
pub trait StructSerializer: Serializer {
    fn yaml_members() -> Vec<MemberDescriptor<Self>>;

    /// False when the struct opted out of construction from documents.
    fn yaml_has_factory() -> bool {
        true
    }
}

fn read_converted<T: Serializer>(
    context: &mut ReadContext,
    converter: Arc<dyn ScalarConverter>,
    head: Event,
) -> Result<T, Error> {
    let tag = head.tag().map(str::to_string);
    let scalar = context.expect_scalar(head, &format!("a scalar for {}", type_name_of::<T>()))?;
    let object = context.object_context::<T>(tag);
    let value = converter.convert_from(&object, &scalar)?;
    value.downcast::<T>().map(|value| *value).map_err(|_| {
        context.conversion_error(format!(
            "converter for {} produced a value of another type",
            type_name_of::<T>()
        ))
    })
}
