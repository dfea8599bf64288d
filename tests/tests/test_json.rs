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

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use tests::{roundtrip, Person, Point};
use yamlgraph::{Error, Event, ScalarStyle, YamlGraph};

fn json() -> YamlGraph {
    YamlGraph::default().emit_json_compatible(true)
}

#[test]
fn test_map_keys_are_quoted() {
    let graph = json();
    let map = HashMap::from([(5, 10)]);
    assert_eq!(graph.to_yaml(&map).unwrap(), "{\"5\": 10}\n");
    assert_eq!(roundtrip(&graph, &map).unwrap(), Some(map));
}

#[test]
fn test_struct_as_json_object() {
    let graph = json();
    let betty = Person::new("Betty", 22);
    assert_eq!(
        graph.to_yaml(&betty).unwrap(),
        "{\"Name\": \"Betty\", \"Age\": 22, \"Mother\": null}\n"
    );
    assert_eq!(roundtrip(&graph, &betty).unwrap(), Some(betty));
}

#[test]
fn test_nested_objects() {
    let graph = json();
    let mut betty = Person::new("Betty", 22);
    betty.mother = Some(Box::new(Person::new("Ann", 50)));
    assert_eq!(
        graph.to_yaml(&betty).unwrap(),
        "{\"Name\": \"Betty\", \"Age\": 22, \"Mother\": {\"Name\": \"Ann\", \"Age\": 50, \"Mother\": null}}\n"
    );
}

#[test]
fn test_sequences_are_flow() {
    let graph = json();
    assert_eq!(graph.to_yaml(&vec![1, 2, 3]).unwrap(), "[1, 2, 3]\n");
    assert_eq!(
        graph.to_yaml(&vec!["a".to_string(), "true".to_string()]).unwrap(),
        "[\"a\", \"true\"]\n"
    );
    let empty: Vec<i32> = Vec::new();
    assert_eq!(graph.to_yaml(&empty).unwrap(), "[]\n");
}

#[test]
fn test_strings_and_keys_are_double_quoted() {
    let graph = json();
    let map = BTreeMap::from([("k".to_string(), vec![true, false])]);
    let events = graph.serialize(&map).unwrap();
    for event in &events {
        if let Event::Scalar(_, scalar) = event {
            match scalar.value.as_str() {
                "k" => assert_eq!(scalar.style, ScalarStyle::DoubleQuoted),
                _ => assert!(!scalar.style.is_quoted()),
            }
        }
    }
    assert_eq!(graph.to_yaml(&map).unwrap(), "{\"k\": [true, false]}\n");
}

#[test]
fn test_tags_are_suppressed() {
    let mut graph = json();
    graph.register_tag_mapping::<Point>("!point").unwrap();
    let point = Point { x: 1, y: 2 };
    assert_eq!(graph.to_yaml(&point).unwrap(), "{\"x\": 1, \"y\": 2}\n");
    let events = graph.serialize(&point).unwrap();
    assert!(events.iter().all(|e| e.tag().is_none()));

    let mut graph = YamlGraph::default();
    graph.register_tag_mapping::<Point>("!point").unwrap();
    assert_eq!(graph.to_yaml(&point).unwrap(), "!point\nx: 1\ny: 2\n");
}

#[test]
fn test_shared_reference_rejected() {
    let graph = json();
    let betty = Rc::new(Person::new("Betty", 22));
    let people = vec![betty.clone(), betty];
    let err = graph.to_yaml(&people).unwrap_err();
    assert!(matches!(err, Error::SchemaError(_)));

    let unshared = vec![Rc::new(Person::new("Betty", 22))];
    assert_eq!(
        graph.to_yaml(&unshared).unwrap(),
        "[{\"Name\": \"Betty\", \"Age\": 22, \"Mother\": null}]\n"
    );
}
