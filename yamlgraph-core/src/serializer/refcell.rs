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

//! Serialization support for `RefCell<T>`.
//!
//! A `RefCell` is transparent in documents: it is written and read as its
//! contents. Its role is on the read path of `Rc<RefCell<T>>`: the shared
//! slot registers an empty stub under the node anchor and then populates it
//! through the cell, so aliases met inside the content, including
//! self-references, resolve to the final instance.
//!
//! # Example
//! ```rust, ignore
//! #[derive(YamlObject)]
//! struct Node {
//!     name: String,
//!     next: Option<Rc<RefCell<Node>>>,
//! }
//! ```
use crate::error::Error;
use crate::event::{Event, NodeProps};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::Serializer;
use crate::util::type_name_of;
use anyhow::anyhow;
use std::cell::RefCell;

impl<T: Serializer> Serializer for RefCell<T> {
    fn yaml_write_node(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        let inner = self.try_borrow().map_err(|e| {
            Error::from(anyhow!("cannot write {}: {e}", type_name_of::<T>()))
        })?;
        T::yaml_write_node(&inner, context, props)
    }

    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        self.yaml_write_node(context, props)
    }

    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        Ok(RefCell::new(T::yaml_read_node(context, head)?))
    }

    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.get_mut().yaml_read_node_into(context, head)
    }

    fn yaml_read_node_shared(&self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let mut inner = self.try_borrow_mut().map_err(|e| {
            Error::from(anyhow!("cannot populate {}: {e}", type_name_of::<T>()))
        })?;
        inner.yaml_read_node_into(context, head)
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.get_mut().yaml_read_data(context, head)
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(RefCell::new(T::yaml_create()?))
    }

    fn yaml_is_null(&self) -> bool {
        self.try_borrow().map(|v| v.yaml_is_null()).unwrap_or(false)
    }

    fn yaml_is_default(&self) -> bool {
        self.try_borrow().map(|v| v.yaml_is_default()).unwrap_or(false)
    }

    fn yaml_is_interior_mutable() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
