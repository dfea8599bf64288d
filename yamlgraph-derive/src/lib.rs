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

//! # YamlGraph Derive Macros
//!
//! `#[derive(YamlObject)]` describes a type to the yamlgraph mapping engine.
//!
//! For structs with named fields it implements `Serializer` and
//! `StructSerializer`: the generated member list drives member-by-member
//! mapping, the generated factory creates instances from member defaults.
//! For enums with unit variants it implements `Serializer`, mapping each
//! variant to a scalar holding its name.
//!
//! ```rust, ignore
//! use yamlgraph::YamlObject;
//!
//! #[derive(YamlObject, Debug, PartialEq)]
//! struct Person {
//!     #[yaml(alias = "Name")]
//!     name: String,
//!     #[yaml(default = 18)]
//!     age: u32,
//!     #[yaml(ignore)]
//!     cache: Vec<u8>,
//! }
//!
//! #[derive(YamlObject, Debug, PartialEq)]
//! enum Status {
//!     Active,
//!     #[yaml(alias = "on-hold")]
//!     OnHold,
//! }
//! ```
//!
//! Generated code refers to `yamlgraph_core`, which must be a dependency of
//! the deriving crate.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;
mod util;

/// Derive macro for object-graph mapping.
///
/// Supported attributes, all under `#[yaml(...)]`:
///
/// | Level   | Attribute        | Effect                                         |
/// |---------|------------------|------------------------------------------------|
/// | type    | `no_factory`     | instances are never created from documents     |
/// | field   | `ignore`         | not mapped; created with `Default::default()`  |
/// | field   | `alias = "..."`  | document key                                   |
/// | field   | `default = expr` | declared default, elided when equal            |
/// | field   | `private`        | populated only with `respect_private_setters`  |
/// | field   | `order = N`      | sorts the member before unordered ones         |
/// | field   | `base`           | flattens the members of an embedded struct     |
/// | variant | `alias = "..."`  | document name of the variant                   |
#[proc_macro_derive(YamlObject, attributes(yaml))]
pub fn proc_macro_derive_yaml_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_serializer(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
