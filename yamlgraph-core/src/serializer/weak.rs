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

//! Weak pointer serialization support for `Rc` and `Arc`.
//!
//! This module provides [`RcWeak<T>`] and [`ArcWeak<T>`] wrapper types that integrate
//! `std::rc::Weak` / `std::sync::Weak` into object graphs, with support for:
//!
//! - **Reference identity**: a live weak pointer is written like its strong pointer,
//!   content with an anchor on first encounter and an alias afterwards.
//! - **Null weak pointers**: a dangling weak is written as `null`.
//! - **Forward references**: an alias to an anchor that has not been materialized
//!   yet registers a patch on the [`AnchorReader`](crate::resolver::ref_resolver::AnchorReader);
//!   patches run at document end and a patch whose anchor never appeared fails the
//!   call with `AnchorNotFound`.
//!
//! ## Example: parent/child graph
//!
//! ```rust,ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use yamlgraph::{RcWeak, YamlGraph, YamlObject};
//!
//! #[derive(YamlObject)]
//! struct Node {
//!     value: i32,
//!     parent: RcWeak<RefCell<Node>>,
//!     children: Vec<Rc<RefCell<Node>>>,
//! }
//!
//! let parent = Rc::new(RefCell::new(Node {
//!     value: 1,
//!     parent: RcWeak::new(),
//!     children: vec![],
//! }));
//! let child = Rc::new(RefCell::new(Node {
//!     value: 2,
//!     parent: RcWeak::from(&parent),
//!     children: vec![],
//! }));
//! parent.borrow_mut().children.push(child);
//!
//! let graph = YamlGraph::default();
//! let events = graph.serialize(&parent).unwrap();
//! let back: Rc<RefCell<Node>> = graph.deserialize(&events).unwrap().unwrap();
//! let upgraded = back.borrow().children[0].borrow().parent.upgrade().unwrap();
//! assert!(Rc::ptr_eq(&back, &upgraded));
//! ```
//!
//! ## Notes
//!
//! - Clones share one `UnsafeCell`, so patching a weak in one clone patches all of them.
//! - A weak slot keeps nothing alive: a node whose only holder in the document is a
//!   weak slot is dropped once the call returns.

use crate::error::Error;
use crate::event::{Event, NodeProps, Scalar};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::Serializer;
use crate::util::type_name_of;
use std::cell::UnsafeCell;
use std::rc::Rc;
use std::sync::Arc;

/// Non-owning member slot for `Rc` graphs, e.g. a parent pointer.
///
/// The slot is written as its target: content with an anchor the first time
/// the target is met, an alias afterwards. A slot whose target is gone is
/// written as `null`.
///
/// Clones share one cell. An alias read before its anchor leaves the slot
/// empty until the document ends, when the anchor reader fills it in.
pub struct RcWeak<T: ?Sized> {
    // shared by all clones
    inner: Rc<UnsafeCell<std::rc::Weak<T>>>,
}

impl<T: ?Sized> std::fmt::Debug for RcWeak<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RcWeak")
            .field("strong_count", &self.strong_count())
            .field("weak_count", &self.weak_count())
            .finish()
    }
}

impl<T> RcWeak<T> {
    pub fn new() -> Self {
        RcWeak {
            inner: Rc::new(UnsafeCell::new(std::rc::Weak::new())),
        }
    }
}

impl<T: ?Sized> RcWeak<T> {
    pub fn upgrade(&self) -> Option<Rc<T>> {
        unsafe { (*self.inner.get()).upgrade() }
    }

    pub fn strong_count(&self) -> usize {
        unsafe { (*self.inner.get()).strong_count() }
    }

    pub fn weak_count(&self) -> usize {
        unsafe { (*self.inner.get()).weak_count() }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        unsafe { std::rc::Weak::ptr_eq(&*self.inner.get(), &*other.inner.get()) }
    }

    pub fn update(&self, weak: std::rc::Weak<T>) {
        unsafe {
            *self.inner.get() = weak;
        }
    }

    pub fn from_std(weak: std::rc::Weak<T>) -> Self {
        RcWeak {
            inner: Rc::new(UnsafeCell::new(weak)),
        }
    }
}

impl<T> Default for RcWeak<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for RcWeak<T> {
    fn clone(&self) -> Self {
        RcWeak {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> From<&Rc<T>> for RcWeak<T> {
    fn from(rc: &Rc<T>) -> Self {
        RcWeak::from_std(Rc::downgrade(rc))
    }
}

/// The [`RcWeak`] counterpart for `Arc` graphs.
pub struct ArcWeak<T: ?Sized> {
    inner: Arc<UnsafeCell<std::sync::Weak<T>>>,
}

impl<T: ?Sized> std::fmt::Debug for ArcWeak<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcWeak")
            .field("strong_count", &self.strong_count())
            .field("weak_count", &self.weak_count())
            .finish()
    }
}

impl<T> ArcWeak<T> {
    pub fn new() -> Self {
        ArcWeak {
            inner: Arc::new(UnsafeCell::new(std::sync::Weak::new())),
        }
    }
}

impl<T: ?Sized> ArcWeak<T> {
    pub fn upgrade(&self) -> Option<Arc<T>> {
        unsafe { (*self.inner.get()).upgrade() }
    }

    pub fn strong_count(&self) -> usize {
        unsafe { (*self.inner.get()).strong_count() }
    }

    pub fn weak_count(&self) -> usize {
        unsafe { (*self.inner.get()).weak_count() }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        unsafe { std::sync::Weak::ptr_eq(&*self.inner.get(), &*other.inner.get()) }
    }

    pub fn update(&self, weak: std::sync::Weak<T>) {
        unsafe {
            *self.inner.get() = weak;
        }
    }

    pub fn from_std(weak: std::sync::Weak<T>) -> Self {
        ArcWeak {
            inner: Arc::new(UnsafeCell::new(weak)),
        }
    }
}

impl<T> Default for ArcWeak<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for ArcWeak<T> {
    fn clone(&self) -> Self {
        ArcWeak {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> From<&Arc<T>> for ArcWeak<T> {
    fn from(arc: &Arc<T>) -> Self {
        ArcWeak::from_std(Arc::downgrade(arc))
    }
}

unsafe impl<T: ?Sized + Send + Sync> Send for ArcWeak<T> {}
unsafe impl<T: ?Sized + Send + Sync> Sync for ArcWeak<T> {}

impl<T: Serializer> Serializer for RcWeak<T> {
    fn yaml_write_node(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        match self.upgrade() {
            Some(shared) => shared.yaml_write_node(context, props),
            None => context.emit(Event::Scalar(props, Scalar::null())),
        }
    }

    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        self.yaml_write_node(context, props)
    }

    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        if head.is_null_scalar() {
            return Ok(RcWeak::new());
        }
        let Event::Alias(anchor) = &head else {
            let shared = Rc::<T>::yaml_read_node(context, head)?;
            return Ok(RcWeak::from(&shared));
        };
        if let Some(shared) = context.anchor_reader.get::<Rc<T>>(anchor) {
            return Ok(RcWeak::from(&shared));
        }
        if context.anchor_reader.contains(anchor) {
            return Err(context.schema_error(format!(
                "alias *{anchor} refers to a node that is not a {}",
                type_name_of::<Rc<T>>()
            )));
        }
        let weak = RcWeak::new();
        let patch = weak.clone();
        let target = anchor.clone();
        context.anchor_reader.add_callback(
            anchor.clone(),
            Box::new(move |anchors| match anchors.get::<Rc<T>>(&target) {
                Some(shared) => {
                    patch.update(Rc::downgrade(&shared));
                    true
                }
                None => false,
            }),
        );
        Ok(weak)
    }

    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        *self = Self::yaml_read_node(context, head)?;
        Ok(())
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        *self = Self::yaml_read_node(context, head)?;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(RcWeak::new())
    }

    fn yaml_is_null(&self) -> bool {
        self.upgrade().is_none()
    }

    fn yaml_is_default(&self) -> bool {
        self.upgrade().is_none()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl<T: Serializer> Serializer for ArcWeak<T> {
    fn yaml_write_node(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        match self.upgrade() {
            Some(shared) => shared.yaml_write_node(context, props),
            None => context.emit(Event::Scalar(props, Scalar::null())),
        }
    }

    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        self.yaml_write_node(context, props)
    }

    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        if head.is_null_scalar() {
            return Ok(ArcWeak::new());
        }
        let Event::Alias(anchor) = &head else {
            let shared = Arc::<T>::yaml_read_node(context, head)?;
            return Ok(ArcWeak::from(&shared));
        };
        if let Some(shared) = context.anchor_reader.get::<Arc<T>>(anchor) {
            return Ok(ArcWeak::from(&shared));
        }
        if context.anchor_reader.contains(anchor) {
            return Err(context.schema_error(format!(
                "alias *{anchor} refers to a node that is not a {}",
                type_name_of::<Arc<T>>()
            )));
        }
        let weak = ArcWeak::new();
        let patch = weak.clone();
        let target = anchor.clone();
        context.anchor_reader.add_callback(
            anchor.clone(),
            Box::new(move |anchors| match anchors.get::<Arc<T>>(&target) {
                Some(shared) => {
                    patch.update(Arc::downgrade(&shared));
                    true
                }
                None => false,
            }),
        );
        Ok(weak)
    }

    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        *self = Self::yaml_read_node(context, head)?;
        Ok(())
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        *self = Self::yaml_read_node(context, head)?;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(ArcWeak::new())
    }

    fn yaml_is_null(&self) -> bool {
        self.upgrade().is_none()
    }

    fn yaml_is_default(&self) -> bool {
        self.upgrade().is_none()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
