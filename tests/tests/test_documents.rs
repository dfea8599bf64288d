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

use std::rc::Rc;
use tests::{Person, Point};
use yamlgraph::{Emitter, Error, Event, EventSink, NodeProps, Reader, Writer, YamlGraph};

#[test]
fn test_multi_document_stream() {
    let graph = YamlGraph::default();
    let mut events = vec![Event::StreamStart];
    graph.serialize_to(&mut events, &1).unwrap();
    graph.serialize_to(&mut events, &Person::new("Joe", 54)).unwrap();
    events.push(Event::StreamEnd);

    let mut reader = Reader::new(events.clone());
    assert_eq!(graph.deserialize_from::<i32>(&mut reader).unwrap(), Some(1));
    assert_eq!(
        graph.deserialize_from::<Person>(&mut reader).unwrap(),
        Some(Person::new("Joe", 54))
    );
    assert_eq!(graph.deserialize_from::<i32>(&mut reader).unwrap(), None);
    assert_eq!(graph.deserialize_from::<i32>(&mut reader).unwrap(), None);

    let text = Emitter::render(&events).unwrap();
    assert_eq!(text, "1\n---\nName: Joe\nAge: 54\n");
}

#[test]
fn test_explicit_documents() {
    let mut writer = Writer::new();
    writer
        .stream_start()
        .document_start()
        .scalar("a")
        .document_end()
        .document_start()
        .scalar("b")
        .document_end()
        .stream_end();
    assert_eq!(
        Emitter::render(writer.events()).unwrap(),
        "---\na\n...\n---\nb\n...\n"
    );

    let graph = YamlGraph::default();
    let mut reader = Reader::from(writer);
    assert_eq!(
        graph.deserialize_from::<String>(&mut reader).unwrap(),
        Some("a".to_string())
    );
    assert_eq!(
        graph.deserialize_from::<String>(&mut reader).unwrap(),
        Some("b".to_string())
    );
}

#[test]
fn test_empty_input() {
    let graph = YamlGraph::default();
    assert_eq!(graph.deserialize::<Person>(&[]).unwrap(), None);
    assert_eq!(
        graph
            .deserialize::<Person>(&[Event::StreamStart, Event::StreamEnd])
            .unwrap(),
        None
    );

    let mut writer = Writer::new();
    writer.stream_start().document_start().document_end().stream_end();
    assert_eq!(graph.deserialize::<Person>(writer.events()).unwrap(), None);
}

#[test]
fn test_null_root() {
    let graph = YamlGraph::default();
    let events = graph.serialize(&Option::<Person>::None).unwrap();
    assert_eq!(graph.deserialize::<Person>(&events).unwrap(), None);
    assert_eq!(graph.to_yaml(&Option::<Person>::None).unwrap(), "null\n");
}

#[test]
fn test_anchors_are_scoped_to_document() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .stream_start()
        .document_start()
        .mapping_start_with(NodeProps::anchored("p"))
        .scalar("x")
        .scalar("1")
        .mapping_end()
        .document_end()
        .document_start()
        .alias("p")
        .document_end()
        .stream_end();
    let mut reader = Reader::from(writer);
    let first: Option<Rc<Point>> = graph.deserialize_from(&mut reader).unwrap();
    assert_eq!(first.as_deref(), Some(&Point { x: 1, y: 0 }));
    let err = graph.deserialize_from::<Rc<Point>>(&mut reader).unwrap_err();
    assert!(matches!(err, Error::AnchorNotFound(_)));
}

#[test]
fn test_truncated_stream() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer.document_start().mapping_start().scalar("x");
    let err = graph.deserialize::<Point>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
}

#[test]
fn test_missing_document_end() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer.document_start().scalar("1").scalar("2");
    let err = graph.deserialize::<i32>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
}

#[test]
fn test_events_reach_any_sink() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer.emit(Event::StreamStart).unwrap();
    graph.serialize_to(&mut writer, &vec![1, 2]).unwrap();
    writer.emit(Event::StreamEnd).unwrap();
    assert_eq!(writer.len(), 8);
    assert_eq!(
        graph.deserialize::<Vec<i32>>(writer.events()).unwrap(),
        Some(vec![1, 2])
    );
}
