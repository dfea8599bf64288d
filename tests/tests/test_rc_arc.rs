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
use std::sync::Arc;
use tests::Point;
use yamlgraph::{Error, Event, NodeProps, Writer, YamlGraph};

fn count(events: &[Event], f: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|e| f(e)).count()
}

#[test]
fn test_shared_rc_is_written_once() {
    let graph = YamlGraph::default();
    let shared = Rc::new(Point { x: 1, y: 2 });
    let list = vec![shared.clone(), shared.clone(), shared];

    let events = graph.serialize(&list).unwrap();
    assert_eq!(count(&events, |e| matches!(e, Event::MappingStart(..))), 1);
    assert_eq!(count(&events, |e| matches!(e, Event::Alias(_))), 2);
    assert_eq!(
        graph.to_yaml(&list).unwrap(),
        "- &id001\n  x: 1\n  y: 2\n- *id001\n- *id001\n"
    );

    let result: Vec<Rc<Point>> = graph.deserialize(&events).unwrap().unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(*result[0], Point { x: 1, y: 2 });
    assert!(Rc::ptr_eq(&result[0], &result[1]));
    assert!(Rc::ptr_eq(&result[0], &result[2]));
}

#[test]
fn test_unshared_rc_has_no_anchor() {
    let graph = YamlGraph::default();
    let list = vec![Rc::new(Point { x: 1, y: 2 }), Rc::new(Point { x: 1, y: 2 })];
    let events = graph.serialize(&list).unwrap();
    assert!(events.iter().all(|e| e.anchor().is_none()));

    let result: Vec<Rc<Point>> = graph.deserialize(&events).unwrap().unwrap();
    assert!(!Rc::ptr_eq(&result[0], &result[1]));
}

#[test]
fn test_shared_arc() {
    let graph = YamlGraph::default();
    let shared = Arc::new("shared".to_string());
    let list = vec![shared.clone(), Arc::new("other".to_string()), shared];
    assert_eq!(
        graph.to_yaml(&list).unwrap(),
        "- &id001 shared\n- other\n- *id001\n"
    );

    let events = graph.serialize(&list).unwrap();
    let result: Vec<Arc<String>> = graph.deserialize(&events).unwrap().unwrap();
    assert!(Arc::ptr_eq(&result[0], &result[2]));
    assert!(!Arc::ptr_eq(&result[0], &result[1]));
}

#[test]
fn test_anchor_names_follow_first_use() {
    let graph = YamlGraph::default();
    let a = Rc::new(1);
    let b = Rc::new(2);
    let list = vec![b.clone(), a.clone(), a, b];
    assert_eq!(
        graph.to_yaml(&list).unwrap(),
        "- &id001 2\n- &id002 1\n- *id002\n- *id001\n"
    );
}

#[test]
fn test_alias_into_value_slot_copies() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .sequence_start()
        .mapping_start_with(NodeProps::anchored("p"))
        .scalar("x")
        .scalar("1")
        .mapping_end()
        .alias("p")
        .sequence_end();
    let result: Vec<Point> = graph.deserialize(writer.events()).unwrap().unwrap();
    assert_eq!(result, vec![Point { x: 1, y: 0 }, Point { x: 1, y: 0 }]);
}

#[test]
fn test_forward_alias_fails() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .sequence_start()
        .alias("p")
        .mapping_start_with(NodeProps::anchored("p"))
        .scalar("x")
        .scalar("1")
        .mapping_end()
        .sequence_end();
    let err = graph
        .deserialize::<Vec<Rc<Point>>>(writer.events())
        .unwrap_err();
    assert!(matches!(err, Error::AnchorNotFound(_)));
}

#[test]
fn test_alias_to_other_type_fails() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("first")
        .scalar_with(NodeProps::anchored("a"), "text")
        .scalar("second")
        .alias("a")
        .mapping_end();

    #[derive(yamlgraph::YamlObject, Debug)]
    struct Pair {
        first: Rc<String>,
        second: Rc<i32>,
    }
    let err = graph.deserialize::<Pair>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::SchemaError(_)));
}
