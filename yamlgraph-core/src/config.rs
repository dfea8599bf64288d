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

/// Serialization settings.
///
/// This struct holds all the options that control how object graphs are
/// emitted and parsed. It is owned by the `YamlGraph` instance and shared
/// with every `WriteContext`/`ReadContext` so all components see the same policy.
#[derive(Clone, Debug)]
pub struct Config {
    /// Emit members whose value equals their declared default.
    pub emit_default_values: bool,
    /// Constrain output to JSON: quoted keys, no tags, explicit nulls, flow collections.
    pub emit_json_compatible: bool,
    /// Emit explicit tags when the tag resolver asks for one.
    pub emit_tags: bool,
    /// Skip unknown mapping keys instead of failing.
    pub ignore_unmatched_properties: bool,
    /// Let document content populate privately-writable members.
    pub respect_private_setters: bool,
    /// Sequences of primitives up to this length are written in flow style. 0 disables it.
    pub limit_primitive_flow_sequence: usize,
    /// Resolve unregistered tags as type names from the registered type catalog.
    pub unsafe_allow_deserialize_from_tag_type_name: bool,
    /// Maximum nesting depth of mappings and sequences.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            emit_default_values: false,
            emit_json_compatible: false,
            emit_tags: true,
            ignore_unmatched_properties: false,
            respect_private_setters: false,
            limit_primitive_flow_sequence: 0,
            unsafe_allow_deserialize_from_tag_type_name: false,
            max_depth: 256,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_emit_default_values(&self) -> bool {
        self.emit_default_values
    }

    #[inline(always)]
    pub fn is_json(&self) -> bool {
        self.emit_json_compatible
    }

    /// Tags are written only outside JSON mode.
    #[inline(always)]
    pub fn is_emit_tags(&self) -> bool {
        self.emit_tags && !self.emit_json_compatible
    }

    #[inline(always)]
    pub fn is_ignore_unmatched_properties(&self) -> bool {
        self.ignore_unmatched_properties
    }

    #[inline(always)]
    pub fn is_respect_private_setters(&self) -> bool {
        self.respect_private_setters
    }

    #[inline(always)]
    pub fn limit_primitive_flow_sequence(&self) -> usize {
        self.limit_primitive_flow_sequence
    }

    #[inline(always)]
    pub fn is_unsafe_tag_type_names(&self) -> bool {
        self.unsafe_allow_deserialize_from_tag_type_name
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
