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

//! Serialization support for `Mutex<T>` and `RwLock<T>`.
//!
//! Both are transparent in documents, like `RefCell`, and make `Arc<Mutex<T>>`
//! and `Arc<RwLock<T>>` shared slots that can hold cycles.
//!
//! # Caveats
//!
//! - Writing locks each container while its contents are emitted. Serialize in a
//!   quiescent state with no concurrent mutation.
//! - A poisoned lock fails the call instead of panicking.
use crate::error::Error;
use crate::event::{Event, NodeProps};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::Serializer;
use crate::util::type_name_of;
use anyhow::anyhow;
use std::sync::{Mutex, RwLock};

fn poisoned<T>(action: &str) -> Error {
    Error::from(anyhow!(
        "cannot {action} {}: the lock is poisoned",
        type_name_of::<T>()
    ))
}

impl<T: Serializer> Serializer for Mutex<T> {
    fn yaml_write_node(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        let guard = self.lock().map_err(|_| poisoned::<T>("write"))?;
        T::yaml_write_node(&guard, context, props)
    }

    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        self.yaml_write_node(context, props)
    }

    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        Ok(Mutex::new(T::yaml_read_node(context, head)?))
    }

    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.get_mut()
            .map_err(|_| poisoned::<T>("populate"))?
            .yaml_read_node_into(context, head)
    }

    fn yaml_read_node_shared(&self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let mut guard = self.lock().map_err(|_| poisoned::<T>("populate"))?;
        guard.yaml_read_node_into(context, head)
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.get_mut()
            .map_err(|_| poisoned::<T>("populate"))?
            .yaml_read_data(context, head)
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(Mutex::new(T::yaml_create()?))
    }

    fn yaml_is_default(&self) -> bool {
        self.lock().map(|v| v.yaml_is_default()).unwrap_or(false)
    }

    fn yaml_is_interior_mutable() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl<T: Serializer> Serializer for RwLock<T> {
    fn yaml_write_node(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        let guard = self.read().map_err(|_| poisoned::<T>("write"))?;
        T::yaml_write_node(&guard, context, props)
    }

    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        self.yaml_write_node(context, props)
    }

    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        Ok(RwLock::new(T::yaml_read_node(context, head)?))
    }

    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.get_mut()
            .map_err(|_| poisoned::<T>("populate"))?
            .yaml_read_node_into(context, head)
    }

    fn yaml_read_node_shared(&self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let mut guard = self.write().map_err(|_| poisoned::<T>("populate"))?;
        guard.yaml_read_node_into(context, head)
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        self.get_mut()
            .map_err(|_| poisoned::<T>("populate"))?
            .yaml_read_data(context, head)
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(RwLock::new(T::yaml_create()?))
    }

    fn yaml_is_default(&self) -> bool {
        self.read().map(|v| v.yaml_is_default()).unwrap_or(false)
    }

    fn yaml_is_interior_mutable() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
