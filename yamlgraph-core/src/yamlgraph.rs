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

use crate::buffer::{EventSink, EventSource, Reader};
use crate::config::Config;
use crate::emitter::Emitter;
use crate::error::Error;
use crate::event::Event;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::converter::{ConverterChain, ConverterFactory};
use crate::resolver::tag_resolver::TagResolver;
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::Serializer;
use std::any::TypeId;
use std::sync::Arc;

/// The object-graph mapping engine.
///
/// `YamlGraph` converts object graphs, cyclic ones included, into document
/// event streams and back.
///
/// # Features
///
/// - **Default elision**: members equal to their default are left out
/// - **Shared references**: `Rc`/`Arc` identities become anchors and aliases
/// - **Tags**: explicit type tags for registered types and dynamic values
/// - **Scalar converters**: custom text representations for any type
/// - **JSON mode**: output constrained to what a JSON reader accepts
///
/// # Examples
///
/// ```rust, ignore
/// use yamlgraph::{YamlGraph, YamlObject};
///
/// #[derive(YamlObject, Debug, PartialEq)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let graph = YamlGraph::default();
/// let betty = Person { name: "Betty".to_string(), age: 22 };
/// let events = graph.serialize(&betty).unwrap();
/// let back: Option<Person> = graph.deserialize(&events).unwrap();
/// assert_eq!(back, Some(betty));
/// ```
///
/// Custom configuration:
///
/// ```rust
/// use yamlgraph_core::YamlGraph;
///
/// let graph = YamlGraph::default()
///     .emit_default_values(true)
///     .limit_primitive_flow_sequence(8)
///     .max_depth(64);
/// ```
#[derive(Default)]
pub struct YamlGraph {
    config: Config,
    type_resolver: TypeResolver,
    tag_resolver: TagResolver,
    converters: ConverterChain,
}

impl YamlGraph {
    pub fn new(config: Config) -> Self {
        YamlGraph {
            config,
            ..Default::default()
        }
    }

    /// Emits members even when they equal their default. Default: `false`.
    pub fn emit_default_values(mut self, emit_default_values: bool) -> Self {
        self.config.emit_default_values = emit_default_values;
        self
    }

    /// Constrains output to JSON: quoted keys and strings, no tags, explicit
    /// nulls, flow collections. Default: `false`.
    ///
    /// JSON cannot express aliases: writing an `Rc`/`Arc` identity a second
    /// time fails with a schema error in this mode.
    pub fn emit_json_compatible(mut self, emit_json_compatible: bool) -> Self {
        self.config.emit_json_compatible = emit_json_compatible;
        self
    }

    /// Writes explicit tags for types with a tag mapping. Default: `true`.
    pub fn emit_tags(mut self, emit_tags: bool) -> Self {
        self.config.emit_tags = emit_tags;
        self
    }

    /// Skips unknown mapping keys instead of failing. Default: `false`.
    pub fn ignore_unmatched_properties(mut self, ignore_unmatched_properties: bool) -> Self {
        self.config.ignore_unmatched_properties = ignore_unmatched_properties;
        self
    }

    /// Populates `#[yaml(private)]` members from documents. Default: `false`.
    pub fn respect_private_setters(mut self, respect_private_setters: bool) -> Self {
        self.config.respect_private_setters = respect_private_setters;
        self
    }

    /// Writes sequences of primitives with at most `limit` elements in flow
    /// style. `0` disables it, which is the default.
    pub fn limit_primitive_flow_sequence(mut self, limit: usize) -> Self {
        self.config.limit_primitive_flow_sequence = limit;
        self
    }

    /// Resolves unregistered tags as catalog type names. Default: `false`.
    ///
    /// Only enable this for trusted documents: the document then chooses which
    /// registered type gets instantiated in dynamic slots.
    pub fn unsafe_allow_deserialize_from_tag_type_name(mut self, allow: bool) -> Self {
        self.config.unsafe_allow_deserialize_from_tag_type_name = allow;
        self
    }

    /// Maximum nesting depth of collections. Default: `256`.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    #[inline(always)]
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    #[inline(always)]
    pub fn get_type_resolver(&self) -> &TypeResolver {
        &self.type_resolver
    }

    #[inline(always)]
    pub fn get_tag_resolver(&self) -> &TagResolver {
        &self.tag_resolver
    }

    #[inline(always)]
    pub fn get_converters(&self) -> &ConverterChain {
        &self.converters
    }

    /// Binds `tag` to `T`, in both directions. `T` joins the type catalog.
    ///
    /// ```rust, ignore
    /// graph.register_tag_mapping::<Point>("!point")?;
    /// ```
    pub fn register_tag_mapping<T: Serializer>(&mut self, tag: &str) -> Result<(), Error> {
        self.type_resolver.ensure_registered::<T>();
        self.tag_resolver.register(tag, TypeId::of::<T>())
    }

    /// Adds `T` to the type catalog under its short type name, so dynamic
    /// values can hold it.
    pub fn register<T: Serializer>(&mut self) -> Result<(), Error> {
        self.type_resolver.register::<T>(None);
        Ok(())
    }

    /// Adds `T` to the type catalog under `name`.
    pub fn register_by_name<T: Serializer>(&mut self, name: &str) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::type_resolution("catalog name must not be empty"));
        }
        self.type_resolver.register::<T>(Some(name));
        Ok(())
    }

    /// Appends a converter factory; earlier factories take precedence.
    pub fn register_converter_factory(&mut self, factory: Arc<dyn ConverterFactory>) {
        self.converters.register(factory);
    }

    /// Serializes `value` into a complete stream holding one document.
    pub fn serialize<T: Serializer>(&self, value: &T) -> Result<Vec<Event>, Error> {
        let mut events = vec![Event::StreamStart];
        self.serialize_to(&mut events, value)?;
        events.push(Event::StreamEnd);
        Ok(events)
    }

    /// Writes `value` as one document into `sink`.
    ///
    /// Stream start and end are left to the caller, so several documents can
    /// share one stream. Nothing reaches the sink when serialization fails.
    pub fn serialize_to<T: Serializer>(
        &self,
        sink: &mut dyn EventSink,
        value: &T,
    ) -> Result<(), Error> {
        let mut context = WriteContext::new(self);
        context.emit(Event::DocumentStart { implicit: true })?;
        value.yaml_write(&mut context)?;
        context.emit(Event::DocumentEnd { implicit: true })?;
        let events = context.finish();
        tracing::trace!(events = events.len(), "serialized document");
        for event in events {
            sink.emit(event)?;
        }
        Ok(())
    }

    /// Serializes `value` and renders it as YAML text, or JSON text in JSON mode.
    pub fn to_yaml<T: Serializer>(&self, value: &T) -> Result<String, Error> {
        let mut emitter = Emitter::new();
        emitter.emit(Event::StreamStart)?;
        self.serialize_to(&mut emitter, value)?;
        emitter.emit(Event::StreamEnd)?;
        Ok(emitter.into_string())
    }

    /// Deserializes the first document of `events`.
    ///
    /// Returns `None` for an empty stream, an empty document or a root `null`.
    pub fn deserialize<T: Serializer>(&self, events: &[Event]) -> Result<Option<T>, Error> {
        let mut reader = Reader::from_slice(events);
        self.deserialize_from(&mut reader)
    }

    /// Deserializes the next document of `source`.
    ///
    /// On success the source is left at the next document boundary, so calling
    /// this repeatedly walks a multi-document stream. Once the stream is
    /// exhausted every call returns `None`.
    pub fn deserialize_from<T: Serializer>(
        &self,
        source: &mut dyn EventSource,
    ) -> Result<Option<T>, Error> {
        let mut context = ReadContext::new(self, source);
        let Some(explicit) = begin_document(&mut context)? else {
            return Ok(None);
        };
        let Some(head) = document_root(&mut context)? else {
            return Ok(None);
        };
        let value = if head.is_null_scalar() {
            None
        } else {
            Some(T::yaml_read_node(&mut context, head)?)
        };
        end_document(&mut context, explicit)?;
        Ok(value)
    }

    /// Merges the first document of `events` into `target`.
    pub fn deserialize_into<T: Serializer>(&self, events: &[Event], target: &mut T) -> Result<(), Error> {
        let mut reader = Reader::from_slice(events);
        self.deserialize_into_from(&mut reader, target)
    }

    /// Merges the next document of `source` into `target`.
    ///
    /// Members present in the document are populated in place, members absent
    /// from it keep their value. An empty document leaves `target` untouched.
    pub fn deserialize_into_from<T: Serializer>(
        &self,
        source: &mut dyn EventSource,
        target: &mut T,
    ) -> Result<(), Error> {
        let mut context = ReadContext::new(self, source);
        let Some(explicit) = begin_document(&mut context)? else {
            return Ok(());
        };
        let Some(head) = document_root(&mut context)? else {
            return Ok(());
        };
        if !head.is_null_scalar() {
            target.yaml_read_node_into(&mut context, head)?;
        }
        end_document(&mut context, explicit)
    }
}

/// Moves to the next document. Returns `None` at the end of the stream, else
/// whether the document start was explicit in the source.
fn begin_document(context: &mut ReadContext) -> Result<Option<bool>, Error> {
    if matches!(context.peek_event()?, Some(Event::StreamStart)) {
        context.next_event()?;
    }
    match context.peek_event()? {
        None | Some(Event::StreamEnd) => Ok(None),
        Some(Event::DocumentStart { .. }) => {
            context.next_event()?;
            tracing::trace!("document start");
            Ok(Some(true))
        }
        Some(event) if event.is_node_start() => Ok(Some(false)),
        Some(event) => Err(Error::parse_error(format!(
            "expected a document, found {event}"
        ))),
    }
}

/// Reads the root node head, consuming the document end of an empty document.
fn document_root(context: &mut ReadContext) -> Result<Option<Event>, Error> {
    if matches!(context.peek_event()?, Some(Event::DocumentEnd { .. })) {
        context.next_event()?;
        return Ok(None);
    }
    context.read_head().map(Some)
}

fn end_document(context: &mut ReadContext, explicit: bool) -> Result<(), Error> {
    if explicit {
        match context.next_event()? {
            Some(Event::DocumentEnd { .. }) => {}
            Some(event) => {
                return Err(Error::parse_error(format!(
                    "expected document end, found {event}"
                )))
            }
            None => {
                return Err(Error::parse_error(
                    "expected document end, found end of event stream",
                ))
            }
        }
    }
    context.anchor_reader.resolve_callbacks()?;
    tracing::trace!("document end");
    Ok(())
}
