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

//! Renders event streams as YAML text.
//!
//! The emitter buffers the nodes of one document and writes the document when
//! its end event arrives. Collections marked [`CollectionStyle::Flow`] and empty
//! collections are written inline, everything else in block style. Scalar
//! styles are honored where YAML can express them; a plain or unspecified
//! scalar that would not read back as written is double-quoted.
//!
//! Events produced in JSON mode render as JSON text:
//!
//! ```rust
//! use yamlgraph_core::emitter::Emitter;
//! use yamlgraph_core::event::{CollectionStyle, Event, NodeProps, Scalar};
//!
//! let events = vec![
//!     Event::StreamStart,
//!     Event::DocumentStart { implicit: true },
//!     Event::MappingStart(NodeProps::none(), CollectionStyle::Flow),
//!     Event::Scalar(NodeProps::none(), Scalar::double_quoted("5")),
//!     Event::Scalar(NodeProps::none(), Scalar::plain("10")),
//!     Event::MappingEnd,
//!     Event::DocumentEnd { implicit: true },
//!     Event::StreamEnd,
//! ];
//! assert_eq!(Emitter::render(&events).unwrap(), "{\"5\": 10}\n");
//! ```

use crate::buffer::EventSink;
use crate::error::Error;
use crate::event::{CollectionStyle, Event, NodeProps, Scalar, ScalarStyle};
use crate::types::{needs_quotes, SECONDARY_TAG_HANDLE, YAML_TAG_PREFIX};

const INDENT: usize = 2;

enum Node {
    Alias(String),
    Scalar(NodeProps, Scalar),
    Sequence(NodeProps, CollectionStyle, Vec<Node>),
    Mapping(NodeProps, CollectionStyle, Vec<(Node, Node)>),
}

impl Node {
    fn is_inline(&self) -> bool {
        match self {
            Node::Sequence(_, style, items) => *style == CollectionStyle::Flow || items.is_empty(),
            Node::Mapping(_, style, entries) => {
                *style == CollectionStyle::Flow || entries.is_empty()
            }
            _ => true,
        }
    }
}

enum Frame {
    Sequence(NodeProps, CollectionStyle, Vec<Node>),
    Mapping(NodeProps, CollectionStyle, Vec<(Node, Node)>, Option<Node>),
}

/// Where a block node starts.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Start of the document.
    Root,
    /// After `key:`; nested blocks indent below the key.
    Value,
    /// After `- `; the node starts at the given column.
    Item,
}

/// YAML text emitter, usable as an [`EventSink`].
#[derive(Default)]
pub struct Emitter {
    out: String,
    stack: Vec<Frame>,
    root: Option<Node>,
    documents: usize,
    in_document: bool,
}

impl Emitter {
    pub fn new() -> Emitter {
        Emitter::default()
    }

    /// Renders a complete event stream.
    pub fn render(events: &[Event]) -> Result<String, Error> {
        let mut emitter = Emitter::new();
        for event in events {
            emitter.emit(event.clone())?;
        }
        Ok(emitter.into_string())
    }

    /// Text of all completed documents.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn push_node(&mut self, node: Node) -> Result<(), Error> {
        match self.stack.last_mut() {
            Some(Frame::Sequence(_, _, items)) => items.push(node),
            Some(Frame::Mapping(_, _, entries, pending)) => match pending.take() {
                Some(key) => entries.push((key, node)),
                None => *pending = Some(node),
            },
            None => {
                if !self.in_document || self.root.is_some() {
                    return Err(Error::parse_error("node outside of a document root"));
                }
                self.root = Some(node);
            }
        }
        Ok(())
    }

    fn start_document(&mut self, implicit: bool) -> Result<(), Error> {
        if self.in_document {
            return Err(Error::parse_error("document start inside a document"));
        }
        if self.documents > 0 || !implicit {
            self.out.push_str("---\n");
        }
        self.in_document = true;
        Ok(())
    }

    fn end_document(&mut self, implicit: bool) -> Result<(), Error> {
        if !self.in_document || !self.stack.is_empty() {
            return Err(Error::parse_error("unbalanced document end"));
        }
        if let Some(root) = self.root.take() {
            self.write_node(&root, 0, Position::Root);
        }
        if !implicit {
            self.out.push_str("...\n");
        }
        self.in_document = false;
        self.documents += 1;
        Ok(())
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat(' ').take(indent));
    }

    fn write_node(&mut self, node: &Node, indent: usize, position: Position) {
        match node {
            Node::Scalar(props, scalar)
                if scalar.style == ScalarStyle::Literal && literal_fits(&scalar.value) =>
            {
                let content_indent = match position {
                    Position::Value => indent + INDENT,
                    Position::Root | Position::Item => indent.max(INDENT),
                };
                if position == Position::Value {
                    self.out.push(' ');
                }
                let props = render_props(props);
                if !props.is_empty() {
                    self.out.push_str(&props);
                    self.out.push(' ');
                }
                self.write_literal(&scalar.value, content_indent);
            }
            node if node.is_inline() => {
                if position == Position::Value {
                    self.out.push(' ');
                }
                let text = render_inline(node, false);
                self.out.push_str(&text);
                self.out.push('\n');
            }
            Node::Sequence(props, _, items) => {
                let compact = self.open_block(props, position);
                let indent = match position {
                    Position::Value => indent + INDENT,
                    _ => indent,
                };
                for (i, item) in items.iter().enumerate() {
                    if i > 0 || !compact {
                        self.pad(indent);
                    }
                    self.out.push_str("- ");
                    self.write_node(item, indent + INDENT, Position::Item);
                }
            }
            Node::Mapping(props, _, entries) => {
                let compact = self.open_block(props, position);
                let indent = match position {
                    Position::Value => indent + INDENT,
                    _ => indent,
                };
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 || !compact {
                        self.pad(indent);
                    }
                    self.out.push_str(&render_key(key, false));
                    self.out.push(':');
                    self.write_node(value, indent, Position::Value);
                }
            }
            // inline nodes are handled above
            _ => {}
        }
    }

    /// Writes the properties of a block collection. Returns whether the first
    /// entry continues on the current line.
    fn open_block(&mut self, props: &NodeProps, position: Position) -> bool {
        let props = render_props(props);
        if props.is_empty() {
            if position == Position::Value {
                self.out.push('\n');
            }
            return position == Position::Item;
        }
        if position == Position::Value {
            self.out.push(' ');
        }
        self.out.push_str(&props);
        self.out.push('\n');
        false
    }

    fn write_literal(&mut self, text: &str, indent: usize) {
        let trailing = text.len() - text.trim_end_matches('\n').len();
        self.out.push_str(match trailing {
            0 => "|-",
            1 => "|",
            _ => "|+",
        });
        self.out.push('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        for line in body.split('\n') {
            if !line.is_empty() {
                self.pad(indent);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }
}

impl EventSink for Emitter {
    fn emit(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::StreamStart => {
                self.documents = 0;
                Ok(())
            }
            Event::StreamEnd => {
                if self.in_document {
                    return Err(Error::parse_error("stream end inside a document"));
                }
                Ok(())
            }
            Event::DocumentStart { implicit } => self.start_document(implicit),
            Event::DocumentEnd { implicit } => self.end_document(implicit),
            Event::Alias(anchor) => self.push_node(Node::Alias(anchor)),
            Event::Scalar(props, scalar) => self.push_node(Node::Scalar(props, scalar)),
            Event::SequenceStart(props, style) => {
                self.stack.push(Frame::Sequence(props, style, Vec::new()));
                Ok(())
            }
            Event::MappingStart(props, style) => {
                self.stack.push(Frame::Mapping(props, style, Vec::new(), None));
                Ok(())
            }
            Event::SequenceEnd => match self.stack.pop() {
                Some(Frame::Sequence(props, style, items)) => {
                    self.push_node(Node::Sequence(props, style, items))
                }
                _ => Err(Error::parse_error("sequence end without a matching start")),
            },
            Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Mapping(props, style, entries, None)) => {
                    self.push_node(Node::Mapping(props, style, entries))
                }
                Some(Frame::Mapping(..)) => {
                    Err(Error::parse_error("mapping end after a key without value"))
                }
                _ => Err(Error::parse_error("mapping end without a matching start")),
            },
        }
    }
}

fn render_tag(tag: &str) -> String {
    if let Some(suffix) = tag.strip_prefix(YAML_TAG_PREFIX) {
        format!("{SECONDARY_TAG_HANDLE}{suffix}")
    } else if tag.starts_with('!') {
        tag.to_string()
    } else {
        format!("!<{tag}>")
    }
}

fn render_props(props: &NodeProps) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(anchor) = &props.anchor {
        parts.push(format!("&{anchor}"));
    }
    if let Some(tag) = &props.tag {
        parts.push(render_tag(tag));
    }
    parts.join(" ")
}

fn with_props(props: &NodeProps, text: String) -> String {
    let props = render_props(props);
    if props.is_empty() {
        text
    } else {
        format!("{props} {text}")
    }
}

fn render_key(key: &Node, flow: bool) -> String {
    match key {
        // `*a:` would read as an anchor named `a:`
        Node::Alias(anchor) => format!("*{anchor} "),
        key => render_inline(key, flow),
    }
}

fn render_inline(node: &Node, flow: bool) -> String {
    match node {
        Node::Alias(anchor) => format!("*{anchor}"),
        Node::Scalar(props, scalar) => with_props(props, render_scalar(scalar, flow)),
        Node::Sequence(props, _, items) => {
            let items: Vec<String> = items.iter().map(|item| render_inline(item, true)).collect();
            with_props(props, format!("[{}]", items.join(", ")))
        }
        Node::Mapping(props, _, entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(key, value)| {
                    format!("{}: {}", render_key(key, true), render_inline(value, true))
                })
                .collect();
            with_props(props, format!("{{{}}}", entries.join(", ")))
        }
    }
}

fn render_scalar(scalar: &Scalar, flow: bool) -> String {
    let text = scalar.as_str();
    match scalar.style {
        ScalarStyle::Plain if is_plain_safe(text, flow) => text.to_string(),
        ScalarStyle::Any if is_plain_safe(text, flow) && !needs_quotes(text) => text.to_string(),
        ScalarStyle::SingleQuoted if !text.chars().any(needs_escape) => {
            format!("'{}'", text.replace('\'', "''"))
        }
        _ => double_quote(text),
    }
}

/// Literal block scalars keep their text verbatim, so they cannot carry
/// escapes or leading indentation.
fn literal_fits(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with(' ')
        && !text.starts_with('\n')
        && !text.chars().any(|c| c != '\n' && needs_escape(c))
}

fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn is_plain_safe(text: &str, flow: bool) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if first.is_whitespace() || text.ends_with(char::is_whitespace) {
        return false;
    }
    let second = text.chars().nth(1);
    match first {
        '-' | '?' | ':' => {
            if second.map_or(true, |c| c.is_whitespace() || (flow && ",[]{}".contains(c))) {
                return false;
            }
        }
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%'
        | '@' | '`' => return false,
        _ => {}
    }
    if text.starts_with("---") || text.starts_with("...") {
        return false;
    }
    if text.contains(": ") || text.contains(" #") || text.ends_with(':') {
        return false;
    }
    if flow && text.contains(|c: char| ",[]{}".contains(c)) {
        return false;
    }
    !text.chars().any(needs_escape)
}

fn double_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{1b}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if (c as u32) < 0x100 && needs_escape(c) => {
                out.push_str(&format!("\\x{:02x}", c as u32))
            }
            c if needs_escape(c) => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
