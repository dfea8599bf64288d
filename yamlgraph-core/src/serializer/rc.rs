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
use crate::resolver::ref_resolver::AnchorRef;
use crate::serializer::Serializer;
use crate::util::type_name_of;
use std::rc::Rc;

impl<T: Serializer> Serializer for Rc<T> {
    /// First encounter writes the content with an anchor, later ones an alias.
    fn yaml_write_node(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        let address = Rc::as_ptr(self) as *const () as usize;
        match context.anchor_writer.track(address) {
            AnchorRef::Seen(anchor) => context.emit(Event::Alias(anchor)),
            AnchorRef::New(anchor) => T::yaml_write_node(self.as_ref(), context, props.with_anchor(anchor)),
        }
    }

    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        self.yaml_write_node(context, props)
    }

    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        if let Event::Alias(anchor) = &head {
            if let Some(shared) = context.anchor_reader.get::<Rc<T>>(anchor) {
                return Ok(shared);
            }
            if context.anchor_reader.contains(anchor) {
                return Err(context.schema_error(format!(
                    "alias *{anchor} refers to a node that is not a {}",
                    type_name_of::<Self>()
                )));
            }
            // anchored in a value slot: materialize a copy
            let head = context.resolve_alias(head)?;
            return Ok(Rc::new(T::yaml_read_node(context, head)?));
        }

        let anchor = head.anchor().map(str::to_string);
        if let Some(anchor) = anchor {
            if T::yaml_is_interior_mutable() && !matches!(head, Event::Scalar(..)) {
                // stub first, so aliases inside the content resolve to it
                let shared = Rc::new(T::yaml_create()?);
                context.anchor_reader.store(anchor, shared.clone());
                T::yaml_read_node_shared(shared.as_ref(), context, head)?;
                return Ok(shared);
            }
            let shared = Rc::new(T::yaml_read_node(context, head)?);
            context.anchor_reader.store(anchor, shared.clone());
            return Ok(shared);
        }
        Ok(Rc::new(T::yaml_read_node(context, head)?))
    }

    /// Collection content populates the existing cell in place, keeping its
    /// identity; aliases and scalars replace the pointer.
    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        if T::yaml_is_interior_mutable()
            && matches!(head, Event::MappingStart(..) | Event::SequenceStart(..))
        {
            if let Some(anchor) = head.anchor().map(str::to_string) {
                context.anchor_reader.store(anchor, self.clone());
            }
            return T::yaml_read_node_shared(self.as_ref(), context, head);
        }
        *self = Self::yaml_read_node(context, head)?;
        Ok(())
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        *self = Self::yaml_read_node(context, head)?;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(Rc::new(T::yaml_create()?))
    }

    fn yaml_is_null(&self) -> bool {
        T::yaml_is_null(self.as_ref())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
