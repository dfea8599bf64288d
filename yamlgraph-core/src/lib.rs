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

//! # YamlGraph Core
//!
//! This is the core implementation of the yamlgraph object-graph mapping engine.
//! It converts in-memory object graphs, cyclic ones included, into YAML/JSON
//! document event streams and back.
//!
//! ## Architecture
//!
//! - **`yamlgraph`**: the [`YamlGraph`] entry object and its public API
//! - **`event`**: the document event model
//! - **`buffer`**: event sinks and sources, with the in-memory `Writer`/`Reader`
//! - **`emitter`**: renders event streams as YAML or JSON text
//! - **`serializer`**: the [`Serializer`] trait and its std implementations
//! - **`resolver`**: type catalog, tag binding, anchors and scalar converters
//! - **`meta`**: member and type descriptors
//! - **`types`**: core schema tags and scalar resolution
//! - **`config`**, **`error`**, **`util`**
//!
//! ## Key Concepts
//!
//! ### Shared references
//!
//! Every `Rc`/`Arc` is tracked by address while writing. The first encounter
//! writes the content with an anchor, later encounters write an alias. Reading
//! an alias into a shared slot yields the same instance again; cycles close
//! through `Rc<RefCell<T>>`, `Arc<Mutex<T>>` and the weak pointers.
//!
//! ### Tags
//!
//! A type bound with `register_tag_mapping` is written with its tag. Dynamic
//! [`Value`] slots let the tag choose the type on read.
//!
//! ## Usage
//!
//! This crate is typically used through the higher-level `yamlgraph` crate,
//! which provides the `YamlObject` derive macro.
//!
//! ```rust
//! use yamlgraph_core::{Emitter, YamlGraph};
//! use std::collections::BTreeMap;
//!
//! let graph = YamlGraph::default();
//! let mut ages = BTreeMap::new();
//! ages.insert("Betty".to_string(), 22);
//! ages.insert("Joe".to_string(), 54);
//!
//! let events = graph.serialize(&ages).unwrap();
//! assert_eq!(Emitter::render(&events).unwrap(), "Betty: 22\nJoe: 54\n");
//! let back: BTreeMap<String, i32> = graph.deserialize(&events).unwrap().unwrap();
//! assert_eq!(back, ages);
//! ```

pub mod buffer;
pub mod config;
pub mod emitter;
pub mod error;
pub mod event;
pub mod meta;
pub mod resolver;
pub mod serializer;
pub mod types;
pub mod util;
pub mod yamlgraph;

pub use buffer::{EventSink, EventSource, Reader, Writer};
pub use config::Config;
pub use emitter::Emitter;
pub use error::Error;
pub use event::{CollectionStyle, Event, NodeProps, Scalar, ScalarStyle};
pub use meta::{MemberDescriptor, TypeDescriptor};
pub use resolver::context::{ObjectContext, ReadContext, WriteContext};
pub use resolver::converter::{ConverterFactory, FnConverter, ScalarConverter};
pub use serializer::{ArcWeak, ObjectValue, RcWeak, Serializer, StructSerializer, Value};
pub use yamlgraph::YamlGraph;
