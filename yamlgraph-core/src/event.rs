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

//! The document event model exchanged with tokenizers and emitters.
//!
//! A stream is `StreamStart`, any number of documents, then `StreamEnd`. A
//! document is `DocumentStart`, exactly one root node, then `DocumentEnd`. A node
//! is a scalar, an alias, or a sequence/mapping delimited by start/end events.

use std::fmt;

/// Presentation hint of a scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalarStyle {
    /// Let the emitter pick the simplest style that preserves the text.
    #[default]
    Any,
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl ScalarStyle {
    #[inline(always)]
    pub fn is_quoted(self) -> bool {
        !matches!(self, ScalarStyle::Any | ScalarStyle::Plain)
    }
}

/// Presentation hint of a sequence or mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollectionStyle {
    #[default]
    Any,
    Block,
    Flow,
}

/// A primitive leaf value: raw text plus a style hint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scalar {
    pub value: String,
    pub style: ScalarStyle,
}

impl Scalar {
    pub fn new<S: Into<String>>(value: S, style: ScalarStyle) -> Scalar {
        Scalar {
            value: value.into(),
            style,
        }
    }

    pub fn plain<S: Into<String>>(value: S) -> Scalar {
        Scalar::new(value, ScalarStyle::Plain)
    }

    pub fn any<S: Into<String>>(value: S) -> Scalar {
        Scalar::new(value, ScalarStyle::Any)
    }

    pub fn double_quoted<S: Into<String>>(value: S) -> Scalar {
        Scalar::new(value, ScalarStyle::DoubleQuoted)
    }

    pub fn null() -> Scalar {
        Scalar::plain("null")
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Node properties: optional anchor and optional tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeProps {
    pub anchor: Option<String>,
    pub tag: Option<String>,
}

impl NodeProps {
    pub fn none() -> NodeProps {
        NodeProps::default()
    }

    pub fn anchored<S: Into<String>>(anchor: S) -> NodeProps {
        NodeProps {
            anchor: Some(anchor.into()),
            tag: None,
        }
    }

    pub fn tagged<S: Into<String>>(tag: S) -> NodeProps {
        NodeProps {
            anchor: None,
            tag: Some(tag.into()),
        }
    }

    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> NodeProps {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_anchor<S: Into<String>>(mut self, anchor: S) -> NodeProps {
        self.anchor = Some(anchor.into());
        self
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.anchor.is_none() && self.tag.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    StreamStart,
    StreamEnd,
    DocumentStart { implicit: bool },
    DocumentEnd { implicit: bool },
    Alias(String),
    Scalar(NodeProps, Scalar),
    SequenceStart(NodeProps, CollectionStyle),
    SequenceEnd,
    MappingStart(NodeProps, CollectionStyle),
    MappingEnd,
}

impl Event {
    /// Properties of a node-opening event.
    pub fn props(&self) -> Option<&NodeProps> {
        match self {
            Event::Scalar(props, _)
            | Event::SequenceStart(props, _)
            | Event::MappingStart(props, _) => Some(props),
            _ => None,
        }
    }

    pub fn props_mut(&mut self) -> Option<&mut NodeProps> {
        match self {
            Event::Scalar(props, _)
            | Event::SequenceStart(props, _)
            | Event::MappingStart(props, _) => Some(props),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn anchor(&self) -> Option<&str> {
        self.props().and_then(|p| p.anchor.as_deref())
    }

    #[inline(always)]
    pub fn tag(&self) -> Option<&str> {
        self.props().and_then(|p| p.tag.as_deref())
    }

    /// True for events that begin a node.
    pub fn is_node_start(&self) -> bool {
        matches!(
            self,
            Event::Alias(_)
                | Event::Scalar(..)
                | Event::SequenceStart(..)
                | Event::MappingStart(..)
        )
    }

    /// Nesting delta of the event inside a node: +1 opens, -1 closes.
    #[inline(always)]
    pub fn depth_delta(&self) -> i32 {
        match self {
            Event::SequenceStart(..) | Event::MappingStart(..) => 1,
            Event::SequenceEnd | Event::MappingEnd => -1,
            _ => 0,
        }
    }

    /// A plain, untagged or `!!null` tagged scalar spelling null.
    pub fn is_null_scalar(&self) -> bool {
        match self {
            Event::Scalar(props, scalar) => {
                let null_tag = match props.tag.as_deref() {
                    None => !scalar.style.is_quoted(),
                    Some(tag) => crate::types::BuiltinTag::from_tag(tag)
                        == Some(crate::types::BuiltinTag::Null),
                };
                null_tag && crate::types::is_null_text(&scalar.value)
            }
            _ => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Event::StreamStart => "stream start",
            Event::StreamEnd => "stream end",
            Event::DocumentStart { .. } => "document start",
            Event::DocumentEnd { .. } => "document end",
            Event::Alias(_) => "alias",
            Event::Scalar(..) => "scalar",
            Event::SequenceStart(..) => "sequence",
            Event::SequenceEnd => "sequence end",
            Event::MappingStart(..) => "mapping",
            Event::MappingEnd => "mapping end",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Alias(anchor) => write!(f, "alias *{anchor}"),
            Event::Scalar(_, scalar) => write!(f, "scalar '{}'", scalar.value),
            other => f.write_str(other.kind_name()),
        }
    }
}
