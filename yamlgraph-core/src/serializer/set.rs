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
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use super::collection::{read_sequence, write_sequence};

impl<T: Serializer + Eq + Hash> Serializer for HashSet<T> {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        write_sequence(self.iter(), context, props)
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.clear();
        read_sequence(context, head, |item| {
            self.insert(item);
        })
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(HashSet::new())
    }

    fn yaml_is_default(&self) -> bool {
        self.is_empty()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl<T: Serializer + Ord> Serializer for BTreeSet<T> {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        write_sequence(self.iter(), context, props)
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.clear();
        read_sequence(context, head, |item| {
            self.insert(item);
        })
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(BTreeSet::new())
    }

    fn yaml_is_default(&self) -> bool {
        self.is_empty()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
