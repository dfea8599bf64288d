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
use crate::resolver::context::ReadContext;
use crate::resolver::context::WriteContext;
use crate::serializer::Serializer;

impl<T: Serializer> Serializer for Box<T> {
    fn yaml_write_node(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        T::yaml_write_node(self.as_ref(), context, props)
    }

    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        T::yaml_write_data(self.as_ref(), context, props)
    }

    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        Ok(Box::new(T::yaml_read_node(context, head)?))
    }

    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        T::yaml_read_node_into(self.as_mut(), context, head)
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        T::yaml_read_data(self.as_mut(), context, head)
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(Box::new(T::yaml_create()?))
    }

    fn yaml_is_null(&self) -> bool {
        T::yaml_is_null(self.as_ref())
    }

    fn yaml_is_default(&self) -> bool {
        T::yaml_is_default(self.as_ref())
    }

    fn yaml_is_primitive() -> bool {
        T::yaml_is_primitive()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
