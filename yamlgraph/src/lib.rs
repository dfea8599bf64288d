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

//! # YamlGraph
//!
//! YamlGraph maps Rust object graphs to YAML/JSON document event streams and
//! back, preserving shared references and cycles through anchors and aliases.
//!
//! ## Key Features
//!
//! - **Declarative members**: `#[derive(YamlObject)]` describes a type, no
//!   hand-written mapping code
//! - **Identity preservation**: every `Rc`/`Arc` is written once, later
//!   occurrences become aliases and read back as the same instance
//! - **Default elision**: members equal to their default are left out
//! - **Tags**: registered types carry explicit tags; dynamic [`Value`] slots
//!   let the tag pick the type
//! - **Scalar converters**: any type can be written as a single custom scalar
//! - **JSON mode**: output restricted to what JSON readers accept
//!
//! ## Object Mapping
//!
//! ```rust
//! use yamlgraph::{Error, YamlGraph, YamlObject};
//!
//! #[derive(YamlObject, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     #[yaml(default = "unknown")]
//!     city: String,
//! }
//!
//! # fn main() -> Result<(), Error> {
//! let graph = YamlGraph::default();
//! let betty = Person {
//!     name: "Betty".to_string(),
//!     age: 22,
//!     city: "unknown".to_string(),
//! };
//!
//! assert_eq!(graph.to_yaml(&betty)?, "name: Betty\nage: 22\n");
//!
//! let events = graph.serialize(&betty)?;
//! let back: Option<Person> = graph.deserialize(&events)?;
//! assert_eq!(back, Some(betty));
//! # Ok(())
//! # }
//! ```
//!
//! ## Shared References
//!
//! ```rust
//! use std::rc::Rc;
//! use yamlgraph::{Error, YamlGraph};
//!
//! # fn main() -> Result<(), Error> {
//! let shared = Rc::new("same".to_string());
//! let list = vec![shared.clone(), shared.clone(), shared];
//!
//! let graph = YamlGraph::default();
//! assert_eq!(graph.to_yaml(&list)?, "- &id001 same\n- *id001\n- *id001\n");
//!
//! let events = graph.serialize(&list)?;
//! let back: Vec<Rc<String>> = graph.deserialize(&events)?.unwrap_or_default();
//! assert!(Rc::ptr_eq(&back[0], &back[2]));
//! # Ok(())
//! # }
//! ```
//!
//! ## JSON Output
//!
//! ```rust
//! use std::collections::HashMap;
//! use yamlgraph::{Error, YamlGraph};
//!
//! # fn main() -> Result<(), Error> {
//! let graph = YamlGraph::default().emit_json_compatible(true);
//! let map = HashMap::from([(5, 10)]);
//! assert_eq!(graph.to_yaml(&map)?, "{\"5\": 10}\n");
//! # Ok(())
//! # }
//! ```

pub use yamlgraph_core::{
    buffer::{EventSink, EventSource, Reader, Writer},
    config::Config,
    emitter::Emitter,
    error::Error,
    event::{CollectionStyle, Event, NodeProps, Scalar, ScalarStyle},
    resolver::converter::{ConverterFactory, FnConverter, ScalarConverter},
    yamlgraph::YamlGraph,
    ArcWeak, ObjectContext, RcWeak, Serializer, StructSerializer, Value,
};
pub use yamlgraph_derive::YamlObject;
