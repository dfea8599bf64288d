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
use std::collections::VecDeque;

use super::collection::{read_sequence, write_sequence};

impl<T: Serializer> Serializer for Vec<T> {
    #[inline(always)]
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        write_sequence(self.iter(), context, props)
    }

    /// Sequences are replaced, never merged.
    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.clear();
        read_sequence(context, head, |item| self.push(item))
    }

    #[inline(always)]
    fn yaml_create() -> Result<Self, Error> {
        Ok(Vec::new())
    }

    #[inline(always)]
    fn yaml_is_default(&self) -> bool {
        self.is_empty()
    }

    #[inline(always)]
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl<T: Serializer> Serializer for VecDeque<T> {
    #[inline(always)]
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        write_sequence(self.iter(), context, props)
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.clear();
        read_sequence(context, head, |item| self.push_back(item))
    }

    #[inline(always)]
    fn yaml_create() -> Result<Self, Error> {
        Ok(VecDeque::new())
    }

    #[inline(always)]
    fn yaml_is_default(&self) -> bool {
        self.is_empty()
    }

    #[inline(always)]
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
