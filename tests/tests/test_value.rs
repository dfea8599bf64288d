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

use chrono::NaiveDate;
use tests::roundtrip;
use yamlgraph::{Error, NodeProps, Value, Writer, YamlGraph};

#[test]
fn test_implicit_resolution() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .sequence_start()
        .scalar("12")
        .quoted("12")
        .scalar("true")
        .scalar("~")
        .scalar("1.5")
        .scalar("2001-12-14")
        .scalar("text")
        .sequence_end();
    let value: Value = graph.deserialize(writer.events()).unwrap().unwrap();
    let midnight = NaiveDate::from_ymd_opt(2001, 12, 14)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(
        value,
        Value::Sequence(vec![
            Value::Int(12),
            Value::String("12".to_string()),
            Value::Bool(true),
            Value::Null,
            Value::Float(1.5),
            Value::Timestamp(midnight),
            Value::String("text".to_string()),
        ])
    );
}

#[test]
fn test_builtin_tags_force_kind() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .sequence_start()
        .scalar_with(NodeProps::tagged("tag:yaml.org,2002:str"), "12")
        .scalar_with(NodeProps::tagged("tag:yaml.org,2002:float"), "3")
        .scalar_with(NodeProps::tagged("!"), "12")
        .sequence_end();
    let value: Value = graph.deserialize(writer.events()).unwrap().unwrap();
    assert_eq!(
        value,
        Value::Sequence(vec![
            Value::String("12".to_string()),
            Value::Float(3.0),
            Value::String("12".to_string()),
        ])
    );

    let mut writer = Writer::new();
    writer.scalar_with(NodeProps::tagged("tag:yaml.org,2002:int"), "abc");
    let err = graph.deserialize::<Value>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ConversionError(_)));
}

#[test]
fn test_mapping_lookup() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("name")
        .scalar("Betty")
        .scalar("age")
        .scalar("22")
        .scalar("name")
        .scalar("Ann")
        .mapping_end();
    let value: Value = graph.deserialize(writer.events()).unwrap().unwrap();
    assert_eq!(value.as_mapping().map(|m| m.len()), Some(3));
    assert_eq!(value.get("name").and_then(Value::as_str), Some("Ann"));
    assert_eq!(value.get("age").and_then(Value::as_i64), Some(22));
    assert!(value.get("missing").is_none());
}

#[test]
fn test_value_text() {
    let graph = YamlGraph::default();
    let value = Value::Mapping(vec![
        (Value::from("name"), Value::from("Betty")),
        (
            Value::from("tags"),
            Value::from(vec![Value::from(1), Value::from(2)]),
        ),
        (Value::from("code"), Value::from("12")),
        (Value::from("ratio"), Value::from(0.5)),
    ]);
    assert_eq!(
        graph.to_yaml(&value).unwrap(),
        "name: Betty\ntags:\n  - 1\n  - 2\ncode: \"12\"\nratio: 0.5\n"
    );
    assert_eq!(roundtrip(&graph, &value).unwrap(), Some(value));
}

#[test]
fn test_alias_in_dynamic_content() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .sequence_start()
        .mapping_start_with(NodeProps::anchored("a"))
        .scalar("k")
        .scalar("v")
        .mapping_end()
        .alias("a")
        .sequence_end();
    let value: Value = graph.deserialize(writer.events()).unwrap().unwrap();
    let items = value.as_sequence().unwrap();
    assert_eq!(items[0], items[1]);
    assert_eq!(items[1].get("k").and_then(Value::as_str), Some("v"));
}

#[test]
fn test_null_root() {
    let graph = YamlGraph::default();
    assert_eq!(graph.to_yaml(&Value::Null).unwrap(), "null\n");
    let events = graph.serialize(&Value::Null).unwrap();
    assert_eq!(graph.deserialize::<Value>(&events).unwrap(), None);
}
