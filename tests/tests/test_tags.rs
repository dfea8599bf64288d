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
use yamlgraph::{Error, NodeProps, Value, Writer, YamlGraph};

fn point_document(tag: &str) -> Writer {
    let mut writer = Writer::new();
    writer
        .mapping_start_with(NodeProps::tagged(tag))
        .scalar("x")
        .scalar("1")
        .mapping_end();
    writer
}

#[test]
fn test_tag_roundtrip() {
    let mut graph = YamlGraph::default();
    graph.register_tag_mapping::<Point>("!point").unwrap();
    let points = vec![Point { x: 1, y: 2 }];
    assert_eq!(
        graph.to_yaml(&points).unwrap(),
        "- !point\n  x: 1\n  y: 2\n"
    );
    let events = graph.serialize(&points).unwrap();
    let result: Vec<Point> = graph.deserialize(&events).unwrap().unwrap();
    assert_eq!(result, points);
}

#[test]
fn test_emit_tags_disabled() {
    let mut graph = YamlGraph::default().emit_tags(false);
    graph.register_tag_mapping::<Point>("!point").unwrap();
    assert_eq!(
        graph.to_yaml(&Point { x: 1, y: 2 }).unwrap(),
        "x: 1\ny: 2\n"
    );
}

#[test]
fn test_secondary_handle_is_expanded() {
    let mut graph = YamlGraph::default();
    graph
        .register_tag_mapping::<Point>("tag:yaml.org,2002:point")
        .unwrap();
    let writer = point_document("!!point");
    let point: Point = graph.deserialize(writer.events()).unwrap().unwrap();
    assert_eq!(point, Point { x: 1, y: 0 });
    assert_eq!(
        graph.to_yaml(&Point { x: 1, y: 0 }).unwrap(),
        "!!point\nx: 1\n"
    );
}

#[test]
fn test_wrong_tag_for_static_type() {
    let mut graph = YamlGraph::default();
    graph.register_tag_mapping::<Point>("!point").unwrap();
    graph.register_tag_mapping::<Person>("!person").unwrap();
    let writer = point_document("!person");
    let err = graph.deserialize::<Point>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::SchemaError(_)));
}

#[test]
fn test_unregistered_tag() {
    let graph = YamlGraph::default();
    let writer = point_document("!unknown");
    let err = graph.deserialize::<Point>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::UnregisteredTag(_)));
}

#[test]
fn test_core_schema_tags_are_reserved() {
    let mut graph = YamlGraph::default();
    let err = graph
        .register_tag_mapping::<Point>("tag:yaml.org,2002:str")
        .unwrap_err();
    assert!(matches!(err, Error::TypeResolution(_)));
    let err = graph.register_tag_mapping::<Point>("!").unwrap_err();
    assert!(matches!(err, Error::TypeResolution(_)));
}

#[test]
fn test_builtin_tag_on_member() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("Name")
        .scalar_with(NodeProps::tagged("tag:yaml.org,2002:str"), "12")
        .mapping_end();
    let person: Person = graph.deserialize(writer.events()).unwrap().unwrap();
    assert_eq!(person.name, "12");
}

#[test]
fn test_tagged_objects_in_dynamic_slots() {
    let mut graph = YamlGraph::default();
    graph.register_tag_mapping::<Point>("!point").unwrap();
    let mut writer = Writer::new();
    writer
        .sequence_start()
        .mapping_start_with(NodeProps::tagged("!point"))
        .scalar("x")
        .scalar("1")
        .scalar("y")
        .scalar("2")
        .mapping_end()
        .scalar("3")
        .sequence_end();
    let values: Vec<Value> = graph.deserialize(writer.events()).unwrap().unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
    assert_eq!(values[1], Value::Int(3));
}

#[test]
fn test_type_names_as_tags() {
    let mut graph = YamlGraph::default();
    graph.register::<Point>().unwrap();
    let writer = point_document("!Point");

    let err = graph.deserialize::<Value>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::UnregisteredTag(_)));

    let graph = {
        let mut graph = YamlGraph::default().unsafe_allow_deserialize_from_tag_type_name(true);
        graph.register::<Point>().unwrap();
        graph
    };
    let value: Value = graph.deserialize(writer.events()).unwrap().unwrap();
    assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 1, y: 0 }));
}

#[test]
fn test_dynamic_object_tag() {
    let mut graph = YamlGraph::default().unsafe_allow_deserialize_from_tag_type_name(true);
    graph.register_by_name::<Point>("geo.Point").unwrap();
    let value = Value::object(Point { x: 1, y: 2 });
    assert_eq!(graph.to_yaml(&value).unwrap(), "!geo.Point\nx: 1\ny: 2\n");

    let events = graph.serialize(&value).unwrap();
    let result: Value = graph.deserialize(&events).unwrap().unwrap();
    assert_eq!(result.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
}

#[test]
fn test_unregistered_object_cannot_be_written() {
    let graph = YamlGraph::default();
    let err = graph.serialize(&Value::object(Point { x: 1, y: 2 })).unwrap_err();
    assert!(matches!(err, Error::TypeResolution(_)));
}

#[test]
fn test_shared_dynamic_objects() {
    let mut graph = YamlGraph::default();
    graph.register_tag_mapping::<Point>("!point").unwrap();
    let shared = Value::object(Point { x: 1, y: 2 });
    let values = vec![shared.clone(), shared];
    assert_eq!(
        graph.to_yaml(&values).unwrap(),
        "- &id001 !point\n  x: 1\n  y: 2\n- *id001\n"
    );

    let events = graph.serialize(&values).unwrap();
    let result: Vec<Value> = graph.deserialize(&events).unwrap().unwrap();
    assert_eq!(result[0], result[1]);
    let first: Rc<Point> = result[0].downcast_rc().unwrap();
    let second: Rc<Point> = result[1].downcast_rc().unwrap();
    assert!(Rc::ptr_eq(&first, &second));
}
