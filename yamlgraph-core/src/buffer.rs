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

//! Event sinks and sources, plus the in-memory [`Writer`] and [`Reader`].

use crate::error::Error;
use crate::event::{CollectionStyle, Event, NodeProps, Scalar, ScalarStyle};

/// Consumer of document events, e.g. a text emitter.
pub trait EventSink {
    fn emit(&mut self, event: Event) -> Result<(), Error>;
}

/// Producer of document events, e.g. a tokenizer.
///
/// Sources are read strictly in order. `peek_event` must not consume.
pub trait EventSource {
    fn peek_event(&mut self) -> Result<Option<&Event>, Error>;

    fn next_event(&mut self) -> Result<Option<Event>, Error>;
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) -> Result<(), Error> {
        self.push(event);
        Ok(())
    }
}

/// In-memory event sink.
///
/// Besides receiving serializer output, the chaining helpers make it a
/// compact way to build documents by hand:
///
/// ```rust
/// use yamlgraph_core::buffer::Writer;
///
/// let mut writer = Writer::default();
/// writer
///     .stream_start()
///     .document_start()
///     .mapping_start()
///     .scalar("Name")
///     .scalar("Betty")
///     .mapping_end()
///     .document_end()
///     .stream_end();
/// assert_eq!(writer.len(), 8);
/// ```
#[derive(Default, Debug, Clone)]
pub struct Writer {
    events: Vec<Event>,
}

impl Writer {
    pub fn new() -> Writer {
        Writer::default()
    }

    #[inline(always)]
    pub fn push(&mut self, event: Event) -> &mut Self {
        self.events.push(event);
        self
    }

    pub fn stream_start(&mut self) -> &mut Self {
        self.push(Event::StreamStart)
    }

    pub fn stream_end(&mut self) -> &mut Self {
        self.push(Event::StreamEnd)
    }

    pub fn document_start(&mut self) -> &mut Self {
        self.push(Event::DocumentStart { implicit: false })
    }

    pub fn document_end(&mut self) -> &mut Self {
        self.push(Event::DocumentEnd { implicit: false })
    }

    /// A plain scalar.
    pub fn scalar(&mut self, value: &str) -> &mut Self {
        self.push(Event::Scalar(NodeProps::none(), Scalar::plain(value)))
    }

    pub fn quoted(&mut self, value: &str) -> &mut Self {
        self.push(Event::Scalar(
            NodeProps::none(),
            Scalar::new(value, ScalarStyle::DoubleQuoted),
        ))
    }

    pub fn scalar_with(&mut self, props: NodeProps, value: &str) -> &mut Self {
        self.push(Event::Scalar(props, Scalar::plain(value)))
    }

    pub fn alias(&mut self, anchor: &str) -> &mut Self {
        self.push(Event::Alias(anchor.to_string()))
    }

    pub fn sequence_start(&mut self) -> &mut Self {
        self.push(Event::SequenceStart(NodeProps::none(), CollectionStyle::Any))
    }

    pub fn sequence_start_with(&mut self, props: NodeProps) -> &mut Self {
        self.push(Event::SequenceStart(props, CollectionStyle::Any))
    }

    pub fn sequence_end(&mut self) -> &mut Self {
        self.push(Event::SequenceEnd)
    }

    pub fn mapping_start(&mut self) -> &mut Self {
        self.push(Event::MappingStart(NodeProps::none(), CollectionStyle::Any))
    }

    pub fn mapping_start_with(&mut self, props: NodeProps) -> &mut Self {
        self.push(Event::MappingStart(props, CollectionStyle::Any))
    }

    pub fn mapping_end(&mut self) -> &mut Self {
        self.push(Event::MappingEnd)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn dump(&self) -> Vec<Event> {
        self.events.clone()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    pub fn reset(&mut self) {
        self.events.clear();
    }
}

impl EventSink for Writer {
    fn emit(&mut self, event: Event) -> Result<(), Error> {
        self.events.push(event);
        Ok(())
    }
}

/// In-memory event source over an owned event list.
#[derive(Default, Debug, Clone)]
pub struct Reader {
    events: Vec<Event>,
    cursor: usize,
}

impl Reader {
    pub fn new(events: Vec<Event>) -> Reader {
        Reader { events, cursor: 0 }
    }

    pub fn from_slice(events: &[Event]) -> Reader {
        Reader::new(events.to_vec())
    }

    #[inline(always)]
    pub fn peek(&self) -> Option<&Event> {
        self.events.get(self.cursor)
    }

    /// Returns true when the next event satisfies `f`.
    pub fn accept(&self, f: impl Fn(&Event) -> bool) -> bool {
        self.peek().is_some_and(f)
    }

    /// Consumes the next event when it satisfies `f`.
    pub fn allow(&mut self, f: impl Fn(&Event) -> bool) -> Option<Event> {
        if self.accept(f) {
            self.cursor += 1;
            Some(self.events[self.cursor - 1].clone())
        } else {
            None
        }
    }

    /// Consumes the next event, failing when it does not satisfy `f`.
    pub fn expect(&mut self, what: &str, f: impl Fn(&Event) -> bool) -> Result<Event, Error> {
        match self.peek() {
            Some(event) if f(event) => {
                self.cursor += 1;
                Ok(self.events[self.cursor - 1].clone())
            }
            Some(event) => Err(Error::parse_error(format!(
                "expected {what}, found {event}"
            ))),
            None => Err(Error::parse_error(format!(
                "expected {what}, found end of events"
            ))),
        }
    }

    #[inline(always)]
    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> &[Event] {
        &self.events[self.cursor..]
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.events.len()
    }
}

impl From<Writer> for Reader {
    fn from(writer: Writer) -> Reader {
        Reader::new(writer.into_events())
    }
}

impl EventSource for Reader {
    fn peek_event(&mut self) -> Result<Option<&Event>, Error> {
        Ok(self.events.get(self.cursor))
    }

    fn next_event(&mut self) -> Result<Option<Event>, Error> {
        let event = self.events.get(self.cursor).cloned();
        if event.is_some() {
            self.cursor += 1;
        }
        Ok(event)
    }
}
