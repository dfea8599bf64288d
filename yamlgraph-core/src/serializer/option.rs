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
use crate::event::{Event, NodeProps, Scalar};
use crate::resolver::context::ReadContext;
use crate::resolver::context::WriteContext;
use crate::serializer::Serializer;

impl<T: Serializer> Serializer for Option<T> {
    #[inline(always)]
    fn yaml_write_node(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        match self {
            Some(v) => v.yaml_write_node(context, props),
            // JSON mode keeps `null` bare, so this bypasses `emit_scalar`
            None => context.emit(Event::Scalar(props, Scalar::null())),
        }
    }

    #[inline(always)]
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        self.yaml_write_node(context, props)
    }

    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        if head.is_null_scalar() {
            return Ok(None);
        }
        Ok(Some(T::yaml_read_node(context, head)?))
    }

    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        if head.is_null_scalar() {
            *self = None;
            return Ok(());
        }
        match self {
            Some(v) => v.yaml_read_node_into(context, head),
            None => {
                *self = Some(T::yaml_read_node(context, head)?);
                Ok(())
            }
        }
    }

    #[inline(always)]
    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.yaml_read_node_into(context, head)
    }

    #[inline(always)]
    fn yaml_create() -> Result<Self, Error> {
        Ok(None)
    }

    #[inline(always)]
    fn yaml_is_null(&self) -> bool {
        self.is_none()
    }

    #[inline(always)]
    fn yaml_is_default(&self) -> bool {
        self.is_none()
    }

    #[inline(always)]
    fn yaml_is_primitive() -> bool {
        T::yaml_is_primitive()
    }

    #[inline(always)]
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
