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

//! Dynamic values for untyped reads.
//!
//! A [`Value`] slot takes whatever the document holds: plain scalars resolve
//! under the core schema, quoted scalars stay strings, built-in tags force a
//! kind, and other tags select a registered type whose instance is kept as a
//! shared [`Value::Object`].
//!
//! ```rust
//! use yamlgraph_core::buffer::Writer;
//! use yamlgraph_core::{Value, YamlGraph};
//!
//! let mut writer = Writer::new();
//! writer.mapping_start().scalar("a").scalar("12").scalar("b").quoted("12").mapping_end();
//! let value: Value = YamlGraph::default().deserialize(writer.events()).unwrap().unwrap();
//! assert_eq!(value.get("a"), Some(&Value::Int(12)));
//! assert_eq!(value.get("b"), Some(&Value::from("12")));
//! ```

use crate::error::Error;
use crate::event::{Event, NodeProps, Scalar};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::ref_resolver::AnchorRef;
use crate::resolver::tag_resolver::ResolvedTag;
use crate::serializer::collection::write_sequence;
use crate::serializer::map::write_map_data;
use crate::serializer::string::text_style;
use crate::serializer::Serializer;
use crate::types::{
    format_float, parse_bool, parse_float, parse_int, parse_timestamp, resolve_plain, BuiltinTag,
    ImplicitScalar,
};
use crate::util::type_name_of;
use chrono::NaiveDateTime;
use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

/// An instance of a registered type held by a dynamic slot.
#[derive(Clone)]
pub struct ObjectValue {
    type_id: TypeId,
    type_name: String,
    value: Rc<dyn Any>,
}

impl ObjectValue {
    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Catalog name of the instance type.
    #[inline(always)]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// The instance as a typed shared pointer, keeping its identity.
    pub fn downcast_rc<T: 'static>(&self) -> Option<Rc<T>> {
        self.value.clone().downcast::<T>().ok()
    }

    #[inline(always)]
    pub fn ptr_eq(&self, other: &ObjectValue) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Untyped document content.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Timestamp(NaiveDateTime),
    Sequence(Vec<Value>),
    /// Mapping entries in document order.
    Mapping(Vec<(Value, Value)>),
    Object(ObjectValue),
}

/// Structural equality; objects compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Value {
    /// Wraps an instance of a registered type.
    pub fn object<T: Serializer>(value: T) -> Value {
        Value::Object(ObjectValue {
            type_id: TypeId::of::<T>(),
            type_name: type_name_of::<T>(),
            value: Rc::new(value),
        })
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, and integers widened to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Value of the last mapping entry whose key is the string `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping()?
            .iter()
            .rev()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref::<T>()
    }

    pub fn downcast_rc<T: 'static>(&self) -> Option<Rc<T>> {
        self.as_object()?.downcast_rc::<T>()
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Sequence(v)
    }
}

fn write_object(
    object: &ObjectValue,
    context: &mut WriteContext,
    props: NodeProps,
) -> Result<(), Error> {
    let address = Rc::as_ptr(&object.value) as *const () as usize;
    match context.anchor_writer.track(address) {
        AnchorRef::Seen(anchor) => context.emit(Event::Alias(anchor)),
        AnchorRef::New(anchor) => {
            let (info, tag) = context.dynamic_type(object.type_id)?;
            let mut props = props.with_anchor(anchor);
            if props.tag.is_none() {
                props.tag = tag;
            }
            (info.get_harness().get_write_fn())(object.value.as_ref(), context, props)
        }
    }
}

fn tagged_scalar(context: &ReadContext, scalar: Scalar, tag: BuiltinTag) -> Result<Value, Error> {
    let text = scalar.as_str();
    let invalid =
        || context.conversion_error(format!("'{text}' is not a valid !!{}", tag.suffix()));
    match tag {
        BuiltinTag::Null => Ok(Value::Null),
        BuiltinTag::Str => Ok(Value::String(text.to_string())),
        BuiltinTag::Bool => parse_bool(text).map(Value::Bool).ok_or_else(invalid),
        BuiltinTag::Int => parse_int(text)
            .and_then(|i| i64::try_from(i).ok())
            .map(Value::Int)
            .ok_or_else(invalid),
        BuiltinTag::Float => parse_float(text).map(Value::Float).ok_or_else(invalid),
        BuiltinTag::Timestamp => parse_timestamp(text)
            .map(Value::Timestamp)
            .ok_or_else(invalid),
        BuiltinTag::Seq | BuiltinTag::Map => Err(context.schema_error(format!(
            "scalar '{text}' cannot be tagged !!{}",
            tag.suffix()
        ))),
    }
}

fn implicit_scalar(scalar: Scalar) -> Value {
    if scalar.style.is_quoted() {
        return Value::String(scalar.value);
    }
    match resolve_plain(&scalar.value) {
        ImplicitScalar::Null => Value::Null,
        ImplicitScalar::Bool(b) => Value::Bool(b),
        ImplicitScalar::Int(i) => Value::Int(i),
        ImplicitScalar::Float(f) => Value::Float(f),
        ImplicitScalar::Timestamp(ts) => Value::Timestamp(ts),
        ImplicitScalar::Str => Value::String(scalar.value),
    }
}

fn read_content(context: &mut ReadContext, head: Event) -> Result<Value, Error> {
    let resolved = match head.tag() {
        Some(tag) => Some(context.resolve_tag(tag)?),
        None => None,
    };
    let builtin = match resolved {
        Some(ResolvedTag::Type(info)) => {
            let instance = (info.get_harness().get_read_fn())(context, head)?;
            return Ok(Value::Object(ObjectValue {
                type_id: info.get_type_id(),
                type_name: info.get_name().to_string(),
                value: instance,
            }));
        }
        Some(ResolvedTag::Builtin(builtin)) => Some(builtin),
        // `!` marks a scalar as a string
        Some(ResolvedTag::NonSpecific) if matches!(head, Event::Scalar(..)) => {
            Some(BuiltinTag::Str)
        }
        Some(ResolvedTag::NonSpecific) | None => None,
    };
    match head {
        Event::Scalar(_, scalar) => match builtin {
            Some(tag) => tagged_scalar(context, scalar, tag),
            None => Ok(implicit_scalar(scalar)),
        },
        Event::SequenceStart(..) => {
            if let Some(tag) = builtin.filter(|tag| *tag != BuiltinTag::Seq) {
                return Err(context.schema_error(format!(
                    "a sequence cannot be tagged !!{}",
                    tag.suffix()
                )));
            }
            context.inc_depth()?;
            let mut items = Vec::new();
            while !context.allow_sequence_end()? {
                let head = context.read_head()?;
                context.push_index(items.len());
                items.push(Value::yaml_read_node(context, head)?);
                context.pop_path();
            }
            context.dec_depth();
            Ok(Value::Sequence(items))
        }
        Event::MappingStart(..) => {
            if let Some(tag) = builtin.filter(|tag| *tag != BuiltinTag::Map) {
                return Err(context.schema_error(format!(
                    "a mapping cannot be tagged !!{}",
                    tag.suffix()
                )));
            }
            context.inc_depth()?;
            let mut entries = Vec::new();
            while !context.allow_mapping_end()? {
                let key_head = context.read_head()?;
                let key = Value::yaml_read_node(context, key_head)?;
                let value_head = context.read_head()?;
                let value = Value::yaml_read_node(context, value_head)?;
                entries.push((key, value));
            }
            context.dec_depth();
            Ok(Value::Mapping(entries))
        }
        other => Err(context.schema_error(format!("expected a node, found {other}"))),
    }
}

impl Serializer for Value {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        match self {
            Value::Null => context.emit(Event::Scalar(props, Scalar::null())),
            Value::Bool(b) => {
                context.emit_scalar(props, Scalar::plain(if *b { "true" } else { "false" }))
            }
            Value::Int(i) => context.emit_scalar(props, Scalar::plain(i.to_string())),
            Value::Float(f) => context.emit_scalar(props, Scalar::plain(format_float(*f))),
            Value::String(s) => {
                let style = text_style(context, s);
                context.emit_scalar(props, Scalar::new(s.as_str(), style))
            }
            Value::Timestamp(ts) => context.emit_scalar(
                props,
                Scalar::plain(ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            ),
            Value::Sequence(items) => write_sequence(items.iter(), context, props),
            Value::Mapping(entries) => {
                write_map_data(entries.iter().map(|(k, v)| (k, v)), context, props)
            }
            Value::Object(object) => write_object(object, context, props),
        }
    }

    /// Aliases resolve to the value stored under their anchor, so objects keep
    /// their identity. Anchors that were not read through a dynamic slot are
    /// replayed.
    fn yaml_read_node(context: &mut ReadContext, head: Event) -> Result<Self, Error> {
        if let Event::Alias(anchor) = &head {
            if let Some(value) = context.anchor_reader.get::<Value>(anchor) {
                return Ok(value);
            }
            let head = context.resolve_alias(head)?;
            return read_content(context, head);
        }
        let anchor = head.anchor().map(str::to_string);
        let value = read_content(context, head)?;
        if let Some(anchor) = anchor {
            context.anchor_reader.store(anchor, value.clone());
        }
        Ok(value)
    }

    fn yaml_read_node_into(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        *self = Value::yaml_read_node(context, head)?;
        Ok(())
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        *self = Value::yaml_read_node(context, head)?;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(Value::Null)
    }

    fn yaml_is_null(&self) -> bool {
        self.is_null()
    }

    fn yaml_is_default(&self) -> bool {
        self.is_null()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
