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

use crate::buffer::EventSource;
use crate::config::Config;
use crate::error::Error;
use crate::event::{CollectionStyle, Event, NodeProps, Scalar, ScalarStyle};
use crate::meta::TypeDescriptor;
use crate::resolver::converter::ScalarConverter;
use crate::resolver::ref_resolver::{AnchorReader, AnchorWriter};
use crate::resolver::tag_resolver::ResolvedTag;
use crate::resolver::type_resolver::TypeInfo;
use crate::serializer::StructSerializer;
use crate::types::is_json_literal;
use crate::util::type_name_of;
use crate::yamlgraph::YamlGraph;
use std::any::TypeId;
use std::sync::Arc;

/// Per-node state handed to scalar converters.
#[derive(Clone, Debug)]
pub struct ObjectContext<'a> {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub config: &'a Config,
    pub tag: Option<String>,
    /// Location of the node, e.g. `Mother.Name` or `[2]`.
    pub path: String,
}

#[derive(Default)]
struct PathStack {
    segments: Vec<String>,
}

impl PathStack {
    fn push_member(&mut self, name: &str) {
        self.segments.push(name.to_string());
    }

    fn push_index(&mut self, index: usize) {
        self.segments.push(format!("[{index}]"));
    }

    fn pop(&mut self) {
        self.segments.pop();
    }

    fn render(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            if !path.is_empty() && !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        path
    }

    fn annotate(&self, msg: String) -> String {
        if self.segments.is_empty() {
            msg
        } else {
            format!("{msg} (at {})", self.render())
        }
    }
}

pub struct WriteContext<'a> {
    graph: &'a YamlGraph,
    events: Vec<Event>,
    pub anchor_writer: AnchorWriter,
    path: PathStack,
    depth: u32,
    key_mode: bool,
}

impl<'a> WriteContext<'a> {
    pub fn new(graph: &'a YamlGraph) -> WriteContext<'a> {
        WriteContext {
            graph,
            events: Vec::new(),
            anchor_writer: AnchorWriter::new(),
            path: PathStack::default(),
            depth: 0,
            key_mode: false,
        }
    }

    #[inline(always)]
    pub fn get_graph(&self) -> &'a YamlGraph {
        self.graph
    }

    #[inline(always)]
    pub fn config(&self) -> &'a Config {
        self.graph.get_config()
    }

    /// Appends an event. JSON has no aliases, so a repeated identity fails in
    /// JSON mode.
    #[inline(always)]
    pub fn emit(&mut self, event: Event) -> Result<(), Error> {
        if let Event::Alias(anchor) = &event {
            if self.config().is_json() {
                return Err(Error::schema_error(self.path.annotate(format!(
                    "shared reference *{anchor} cannot be written as JSON"
                ))));
            }
        }
        self.events.push(event);
        Ok(())
    }

    /// Emits a scalar. In JSON mode keys and non-literal text are double-quoted.
    pub fn emit_scalar(&mut self, props: NodeProps, mut scalar: Scalar) -> Result<(), Error> {
        if self.config().is_json()
            && !scalar.style.is_quoted()
            && (self.key_mode || !is_json_literal(&scalar.value))
        {
            scalar.style = ScalarStyle::DoubleQuoted;
        }
        self.emit(Event::Scalar(props, scalar))
    }

    /// Emits a member name as a mapping key.
    pub fn write_key(&mut self, name: &str) -> Result<(), Error> {
        let style = if self.config().is_json() {
            ScalarStyle::DoubleQuoted
        } else {
            ScalarStyle::Any
        };
        self.emit(Event::Scalar(NodeProps::none(), Scalar::new(name, style)))
    }

    /// Scalars emitted until [`WriteContext::end_key`] are mapping keys.
    #[inline(always)]
    pub fn begin_key(&mut self) {
        self.key_mode = true;
    }

    #[inline(always)]
    pub fn end_key(&mut self) {
        self.key_mode = false;
    }

    /// Explicit tag to write for `T`, when tags are enabled and one is registered.
    pub fn tag_for<T: 'static>(&self) -> Option<String> {
        if !self.config().is_emit_tags() {
            return None;
        }
        self.graph
            .get_tag_resolver()
            .tag_for(&TypeId::of::<T>())
            .map(str::to_string)
    }

    /// Catalog entry and tag of an object held by a dynamic slot.
    pub fn dynamic_type(&self, type_id: TypeId) -> Result<(Arc<TypeInfo>, Option<String>), Error> {
        let info = self
            .graph
            .get_type_resolver()
            .get_type_info(&type_id)
            .cloned()
            .ok_or_else(|| {
                Error::type_resolution(self.path.annotate(
                    "object in a dynamic value is of an unregistered type".to_string(),
                ))
            })?;
        let tag = if self.config().is_emit_tags() {
            Some(self.graph.get_tag_resolver().dynamic_tag_for(&info))
        } else {
            None
        };
        Ok((info, tag))
    }

    #[inline(always)]
    pub fn converter_for<T: 'static>(&self) -> Option<Arc<dyn ScalarConverter>> {
        self.graph
            .get_converters()
            .converter_for(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    pub fn object_context<T: 'static>(&self, tag: Option<String>) -> ObjectContext<'a> {
        ObjectContext {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            config: self.config(),
            tag,
            path: self.path.render(),
        }
    }

    pub fn descriptor<T: StructSerializer>(&self) -> Result<Arc<TypeDescriptor<T>>, Error> {
        self.graph.get_type_resolver().descriptor::<T>()
    }

    /// Style of a sequence of `len` elements.
    pub fn sequence_style(&self, primitive_elements: bool, len: usize) -> CollectionStyle {
        let limit = self.config().limit_primitive_flow_sequence();
        if self.config().is_json() || (primitive_elements && limit > 0 && len <= limit) {
            CollectionStyle::Flow
        } else {
            CollectionStyle::Any
        }
    }

    pub fn mapping_style(&self) -> CollectionStyle {
        if self.config().is_json() {
            CollectionStyle::Flow
        } else {
            CollectionStyle::Any
        }
    }

    #[inline(always)]
    pub fn push_member(&mut self, name: &str) {
        self.path.push_member(name);
    }

    #[inline(always)]
    pub fn push_index(&mut self, index: usize) {
        self.path.push_index(index);
    }

    #[inline(always)]
    pub fn pop_path(&mut self) {
        self.path.pop();
    }

    pub fn path(&self) -> String {
        self.path.render()
    }

    pub fn type_resolution_error(&self, msg: String) -> Error {
        Error::type_resolution(self.path.annotate(msg))
    }

    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.config().max_depth() {
            return Err(Error::depth_exceed(self.path.annotate(format!(
                "Maximum nesting depth ({}) exceeded. Current depth: {}. \
                Consider increasing max_depth if this is expected.",
                self.config().max_depth(),
                self.depth
            ))));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn dec_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Completes the document: anchors are finalized and the events handed out.
    pub fn finish(self) -> Vec<Event> {
        self.anchor_writer.finish(self.events)
    }
}

pub struct ReadContext<'a> {
    graph: &'a YamlGraph,
    source: &'a mut dyn EventSource,
    pub anchor_reader: AnchorReader,
    path: PathStack,
    depth: u32,
}

impl<'a> ReadContext<'a> {
    pub fn new(graph: &'a YamlGraph, source: &'a mut dyn EventSource) -> ReadContext<'a> {
        ReadContext {
            graph,
            source,
            anchor_reader: AnchorReader::new(),
            path: PathStack::default(),
            depth: 0,
        }
    }

    #[inline(always)]
    pub fn get_graph(&self) -> &'a YamlGraph {
        self.graph
    }

    #[inline(always)]
    pub fn config(&self) -> &'a Config {
        self.graph.get_config()
    }

    /// Next event: replayed events first, then the source. Source events are
    /// recorded for anchors.
    pub fn next_event(&mut self) -> Result<Option<Event>, Error> {
        if let Some(event) = self.anchor_reader.next_replayed() {
            return Ok(Some(event));
        }
        let event = self.source.next_event()?;
        if let Some(event) = &event {
            self.anchor_reader.record(event);
        }
        Ok(event)
    }

    pub fn peek_event(&mut self) -> Result<Option<&Event>, Error> {
        if self.anchor_reader.is_replaying() {
            return Ok(self.anchor_reader.peek_replayed());
        }
        self.source.peek_event()
    }

    /// Reads the first event of a node.
    pub fn read_head(&mut self) -> Result<Event, Error> {
        match self.next_event()? {
            Some(event) if event.is_node_start() => Ok(event),
            Some(event) => Err(Error::parse_error(
                self.path.annotate(format!("expected a node, found {event}")),
            )),
            None => Err(Error::parse_error(
                self.path
                    .annotate("unexpected end of event stream".to_string()),
            )),
        }
    }

    /// Consumes the closing event of the current mapping, if it is next.
    pub fn allow_mapping_end(&mut self) -> Result<bool, Error> {
        if matches!(self.peek_event()?, Some(Event::MappingEnd)) {
            self.next_event()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consumes the closing event of the current sequence, if it is next.
    pub fn allow_sequence_end(&mut self) -> Result<bool, Error> {
        if matches!(self.peek_event()?, Some(Event::SequenceEnd)) {
            self.next_event()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Skips the rest of the node starting at `head`.
    pub fn skip_node(&mut self, head: &Event) -> Result<(), Error> {
        let mut depth = head.depth_delta();
        while depth > 0 {
            match self.next_event()? {
                Some(event) => depth += event.depth_delta(),
                None => {
                    return Err(Error::parse_error(
                        self.path
                            .annotate("unexpected end of event stream".to_string()),
                    ))
                }
            }
        }
        Ok(())
    }

    /// Replaces an alias head by the first event of its replayed node.
    pub fn resolve_alias(&mut self, head: Event) -> Result<Event, Error> {
        match head {
            Event::Alias(anchor) => {
                self.anchor_reader
                    .replay(&anchor)
                    .map_err(|_| self.anchor_not_found(&anchor))?;
                self.read_head()
            }
            other => Ok(other),
        }
    }

    /// Resolves a document tag against the registered mappings.
    pub fn resolve_tag(&self, tag: &str) -> Result<ResolvedTag<'a>, Error> {
        self.graph.get_tag_resolver().type_for(
            tag,
            self.graph.get_type_resolver(),
            self.config().is_unsafe_tag_type_names(),
        )
    }

    /// Verifies that the tag of `head`, if any, fits the static type `T`.
    pub fn check_tag<T: 'static>(&self, head: &Event) -> Result<(), Error> {
        let Some(tag) = head.tag() else {
            return Ok(());
        };
        match self.resolve_tag(tag)? {
            ResolvedTag::NonSpecific | ResolvedTag::Builtin(_) => Ok(()),
            ResolvedTag::Type(info) if info.get_type_id() == TypeId::of::<T>() => Ok(()),
            ResolvedTag::Type(info) => Err(self.schema_error(format!(
                "tag {tag} maps to {} which cannot be stored in a {}",
                info.get_name(),
                type_name_of::<T>()
            ))),
        }
    }

    /// Takes the scalar out of a node head, failing on collections.
    pub fn expect_scalar(&self, head: Event, expected: &str) -> Result<Scalar, Error> {
        match head {
            Event::Scalar(_, scalar) => Ok(scalar),
            other => Err(self.schema_error(format!("expected {expected}, found {other}"))),
        }
    }

    /// Reads a mapping key as text.
    pub fn read_key(&mut self) -> Result<String, Error> {
        let head = self.read_head()?;
        let head = self.resolve_alias(head)?;
        match head {
            Event::Scalar(_, scalar) => Ok(scalar.value),
            other => Err(self.schema_error(format!("expected a scalar key, found {other}"))),
        }
    }

    #[inline(always)]
    pub fn converter_for<T: 'static>(&self) -> Option<Arc<dyn ScalarConverter>> {
        self.graph
            .get_converters()
            .converter_for(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    pub fn object_context<T: 'static>(&self, tag: Option<String>) -> ObjectContext<'a> {
        ObjectContext {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            config: self.config(),
            tag,
            path: self.path.render(),
        }
    }

    pub fn descriptor<T: StructSerializer>(&self) -> Result<Arc<TypeDescriptor<T>>, Error> {
        self.graph.get_type_resolver().descriptor::<T>()
    }

    #[inline(always)]
    pub fn push_member(&mut self, name: &str) {
        self.path.push_member(name);
    }

    #[inline(always)]
    pub fn push_index(&mut self, index: usize) {
        self.path.push_index(index);
    }

    #[inline(always)]
    pub fn pop_path(&mut self) {
        self.path.pop();
    }

    pub fn path(&self) -> String {
        self.path.render()
    }

    pub fn schema_error(&self, msg: String) -> Error {
        Error::schema_error(self.path.annotate(msg))
    }

    pub fn conversion_error(&self, msg: String) -> Error {
        Error::conversion_error(self.path.annotate(msg))
    }

    pub fn anchor_not_found(&self, anchor: &str) -> Error {
        Error::anchor_not_found(
            self.path
                .annotate(format!("alias *{anchor} refers to an unknown anchor")),
        )
    }

    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.config().max_depth() {
            return Err(Error::depth_exceed(self.path.annotate(format!(
                "Maximum nesting depth ({}) exceeded. Current depth: {}. \
                Consider increasing max_depth if this is expected.",
                self.config().max_depth(),
                self.depth
            ))));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn dec_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
