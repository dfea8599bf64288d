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

use super::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::event::{Event, NodeProps};
use crate::meta::TypeDescriptor;
use crate::serializer::{Serializer, StructSerializer};
use crate::util::type_name_of;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, RwLock};

type WriteFn = fn(&dyn Any, &mut WriteContext, NodeProps) -> Result<(), Error>;
type ReadFn = fn(&mut ReadContext, Event) -> Result<Rc<dyn Any>, Error>;

/// Monomorphized entry points of a registered type, used by dynamic slots.
#[derive(Clone, Debug)]
pub struct Harness {
    write_fn: WriteFn,
    read_fn: ReadFn,
}

impl Harness {
    pub fn new(write_fn: WriteFn, read_fn: ReadFn) -> Harness {
        Harness { write_fn, read_fn }
    }

    #[inline(always)]
    pub fn get_write_fn(&self) -> WriteFn {
        self.write_fn
    }

    #[inline(always)]
    pub fn get_read_fn(&self) -> ReadFn {
        self.read_fn
    }
}

fn write_any<T: Serializer>(
    value: &dyn Any,
    context: &mut WriteContext,
    props: NodeProps,
) -> Result<(), Error> {
    let value = value.downcast_ref::<T>().ok_or_else(|| {
        Error::type_resolution(format!("value is not a {}", type_name_of::<T>()))
    })?;
    value.yaml_write_node(context, props)
}

fn read_shared<T: Serializer>(context: &mut ReadContext, head: Event) -> Result<Rc<dyn Any>, Error> {
    let value = T::yaml_read_node(context, head)?;
    Ok(Rc::new(value))
}

/// Catalog entry of a registered type.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    type_id: TypeId,
    name: String,
    full_name: &'static str,
    harness: Harness,
}

impl TypeInfo {
    pub fn new<T: Serializer>(name: String) -> TypeInfo {
        TypeInfo {
            type_id: TypeId::of::<T>(),
            name,
            full_name: std::any::type_name::<T>(),
            harness: Harness::new(write_any::<T>, read_shared::<T>),
        }
    }

    #[inline(always)]
    pub fn get_type_id(&self) -> TypeId {
        self.type_id
    }

    /// Catalog name: the registered name or the short type name.
    #[inline(always)]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn get_full_name(&self) -> &'static str {
        self.full_name
    }

    #[inline(always)]
    pub fn get_harness(&self) -> &Harness {
        &self.harness
    }
}

/// Registered type catalog plus the lazily built struct descriptors.
///
/// The catalog is filled through `&mut` registration before any call. The
/// descriptor cache is filled on first encounter of a struct type and sits behind
/// a lock, so a resolver can be shared across threads.
#[derive(Default)]
pub struct TypeResolver {
    infos: HashMap<TypeId, Arc<TypeInfo>>,
    names: HashMap<String, TypeId>,
    descriptors: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl TypeResolver {
    /// Adds `T` to the catalog under `name`, or under its short type name.
    ///
    /// The full type path always resolves as well.
    pub fn register<T: Serializer>(&mut self, name: Option<&str>) -> Arc<TypeInfo> {
        let name = name.map(str::to_string).unwrap_or_else(type_name_of::<T>);
        let info = Arc::new(TypeInfo::new::<T>(name.clone()));
        if let Some(previous) = self.infos.insert(TypeId::of::<T>(), info.clone()) {
            self.names.remove(previous.get_name());
        }
        self.names.insert(name.clone(), TypeId::of::<T>());
        self.names
            .insert(std::any::type_name::<T>().to_string(), TypeId::of::<T>());
        tracing::debug!(type_name = %info.get_full_name(), name = %name, "registered type");
        info
    }

    /// Registers `T` under its short name unless it is already in the catalog.
    pub fn ensure_registered<T: Serializer>(&mut self) -> Arc<TypeInfo> {
        match self.infos.get(&TypeId::of::<T>()) {
            Some(info) => info.clone(),
            None => self.register::<T>(None),
        }
    }

    #[inline(always)]
    pub fn get_type_info(&self, type_id: &TypeId) -> Option<&Arc<TypeInfo>> {
        self.infos.get(type_id)
    }

    /// Looks a type up by catalog name or full type path.
    pub fn get_type_info_by_name(&self, name: &str) -> Option<&Arc<TypeInfo>> {
        self.names
            .get(name)
            .and_then(|type_id| self.infos.get(type_id))
    }

    /// Descriptor of the struct type `T`, built on first use.
    pub fn descriptor<T: StructSerializer>(&self) -> Result<Arc<TypeDescriptor<T>>, Error> {
        let type_id = TypeId::of::<T>();
        let cached = self
            .descriptors
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&type_id)
            .cloned();
        if let Some(cached) = cached {
            return cached.downcast::<TypeDescriptor<T>>().map_err(|_| {
                Error::type_resolution(format!(
                    "cached descriptor of {} has a different type",
                    type_name_of::<T>()
                ))
            });
        }

        let descriptor = Arc::new(TypeDescriptor::new(
            type_name_of::<T>(),
            T::yaml_members(),
            T::yaml_has_factory(),
        )?);
        tracing::debug!(
            type_name = %descriptor.type_name(),
            members = descriptor.members().len(),
            "built type descriptor"
        );
        self.descriptors
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(type_id)
            .or_insert_with(|| descriptor.clone() as Arc<dyn Any + Send + Sync>);
        Ok(descriptor)
    }
}
