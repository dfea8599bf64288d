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
use crate::event::Event;
use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};

/// Outcome of [`AnchorWriter::track`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorRef {
    /// First encounter: write the content, carrying this anchor.
    New(String),
    /// Seen before: write an alias to this anchor and do not recurse.
    Seen(String),
}

/// Anchor writer for tracking shared references during serialization.
///
/// AnchorWriter maps object addresses to provisional anchor names, so the
/// serializer can detect when the same object is encountered again and emit
/// an alias instead of its content. This also terminates cycles.
///
/// Provisional anchors are rewritten by [`AnchorWriter::finish`] once the
/// document is complete: anchors nobody aliases are dropped and survivors are
/// renamed `id001`, `id002`, ... in document order.
///
/// # Examples
///
/// ```rust
/// use yamlgraph_core::resolver::ref_resolver::{AnchorRef, AnchorWriter};
/// use std::rc::Rc;
///
/// let mut anchors = AnchorWriter::new();
/// let rc = Rc::new(42);
/// let address = Rc::as_ptr(&rc) as usize;
///
/// assert!(matches!(anchors.track(address), AnchorRef::New(_)));
/// assert!(matches!(anchors.track(address), AnchorRef::Seen(_)));
/// ```
#[derive(Default)]
pub struct AnchorWriter {
    /// Maps object addresses to provisional anchors
    anchors: HashMap<usize, String>,
    next_anchor: u32,
}

impl AnchorWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `address` on first encounter and reports whether it was seen.
    pub fn track(&mut self, address: usize) -> AnchorRef {
        if let Some(anchor) = self.anchors.get(&address) {
            return AnchorRef::Seen(anchor.clone());
        }
        self.next_anchor += 1;
        let anchor = format!("a{}", self.next_anchor);
        self.anchors.insert(address, anchor.clone());
        AnchorRef::New(anchor)
    }

    /// Rewrites provisional anchors of a finished document.
    pub fn finish(&self, mut events: Vec<Event>) -> Vec<Event> {
        let aliased: HashSet<String> = events
            .iter()
            .filter_map(|event| match event {
                Event::Alias(anchor) => Some(anchor.clone()),
                _ => None,
            })
            .collect();
        let mut renames: HashMap<String, String> = HashMap::with_capacity(aliased.len());
        for event in events.iter_mut() {
            match event {
                Event::Alias(anchor) => {
                    if let Some(renamed) = renames.get(anchor.as_str()) {
                        *anchor = renamed.clone();
                    }
                }
                other => {
                    if let Some(props) = other.props_mut() {
                        if let Some(anchor) = props.anchor.take() {
                            if aliased.contains(&anchor) {
                                let renamed = format!("id{:03}", renames.len() + 1);
                                renames.insert(anchor, renamed.clone());
                                props.anchor = Some(renamed);
                            }
                        }
                    }
                }
            }
        }
        events
    }

    /// Clear all tracked objects.
    pub fn clear(&mut self) {
        self.anchors.clear();
        self.next_anchor = 0;
    }
}

type Callback = Box<dyn Fn(&AnchorReader) -> bool>;

struct Recorder {
    anchor: String,
    events: Vec<Event>,
    depth: i32,
}

/// Anchor reader for resolving aliases during deserialization.
///
/// It keeps, per anchor:
/// - the materialized shared instance (`Rc<T>`, `Arc<T>`, dynamic values),
///   so that shared slots resolve aliases to the same identity;
/// - the recorded events of the anchored node, so that value slots resolve
///   aliases by replaying them into a fresh copy.
///
/// Weak slots whose target is not materialized yet register a callback that is
/// run by [`AnchorReader::resolve_callbacks`] when the document ends.
///
/// # Examples
///
/// ```rust
/// use yamlgraph_core::resolver::ref_resolver::AnchorReader;
/// use std::rc::Rc;
///
/// let mut anchors = AnchorReader::new();
/// let rc = Rc::new(42);
/// anchors.store("id001", rc.clone());
///
/// let found = anchors.get::<Rc<i32>>("id001").unwrap();
/// assert!(Rc::ptr_eq(&rc, &found));
/// assert!(anchors.get::<Rc<String>>("id001").is_none());
/// ```
#[derive(Default)]
pub struct AnchorReader {
    instances: HashMap<String, Box<dyn Any>>,
    recorded: HashMap<String, Vec<Event>>,
    recorders: Vec<Recorder>,
    replay: VecDeque<Event>,
    callbacks: Vec<(String, Callback)>,
}

impl AnchorReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the materialized instance of an anchored node.
    pub fn store<T: 'static, S: Into<String>>(&mut self, anchor: S, value: T) {
        self.instances.insert(anchor.into(), Box::new(value));
    }

    /// Instance stored under `anchor`, if any and if it is a `T`.
    pub fn get<T: Clone + 'static>(&self, anchor: &str) -> Option<T> {
        self.instances.get(anchor)?.downcast_ref::<T>().cloned()
    }

    /// True when an instance of any type is stored under `anchor`.
    pub fn contains(&self, anchor: &str) -> bool {
        self.instances.contains_key(anchor)
    }

    /// Feeds an event pulled from the source to the active recorders.
    ///
    /// Replayed events must not be recorded again.
    pub fn record(&mut self, event: &Event) {
        if let Some(anchor) = event.anchor() {
            self.recorders.push(Recorder {
                anchor: anchor.to_string(),
                events: Vec::new(),
                depth: 0,
            });
        }
        let mut index = 0;
        while index < self.recorders.len() {
            let recorder = &mut self.recorders[index];
            recorder.events.push(event.clone());
            recorder.depth += event.depth_delta();
            if recorder.depth <= 0 {
                let Recorder { anchor, events, .. } = self.recorders.remove(index);
                self.recorded.insert(anchor, events);
            } else {
                index += 1;
            }
        }
    }

    /// Queues the recorded node of `anchor` in front of the pending events.
    pub fn replay(&mut self, anchor: &str) -> Result<(), Error> {
        let events = self.recorded.get(anchor).ok_or_else(|| {
            Error::anchor_not_found(format!("alias *{anchor} refers to an unknown anchor"))
        })?;
        for event in events.iter().rev() {
            let mut event = event.clone();
            if let Some(props) = event.props_mut() {
                props.anchor = None;
            }
            self.replay.push_front(event);
        }
        Ok(())
    }

    #[inline(always)]
    pub fn is_replaying(&self) -> bool {
        !self.replay.is_empty()
    }

    #[inline(always)]
    pub fn peek_replayed(&self) -> Option<&Event> {
        self.replay.front()
    }

    #[inline(always)]
    pub fn next_replayed(&mut self) -> Option<Event> {
        self.replay.pop_front()
    }

    /// Registers a patch for an anchor that is not materialized yet.
    ///
    /// The callback returns `false` while its target is still missing.
    pub fn add_callback<S: Into<String>>(&mut self, anchor: S, callback: Callback) {
        self.callbacks.push((anchor.into(), callback));
    }

    /// Runs pending patches; any patch whose anchor never resolved is fatal.
    pub fn resolve_callbacks(&mut self) -> Result<(), Error> {
        let callbacks = std::mem::take(&mut self.callbacks);
        for (anchor, callback) in callbacks {
            if !callback(self) {
                return Err(Error::anchor_not_found(format!(
                    "alias *{anchor} is never resolved in this document"
                )));
            }
            tracing::trace!(anchor = %anchor, "resolved pending alias");
        }
        Ok(())
    }

    /// Clear all stored anchors, recordings and callbacks.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.recorded.clear();
        self.recorders.clear();
        self.replay.clear();
        self.callbacks.clear();
    }
}
