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
use tests::{Point, TreeNode};
use yamlgraph::{ArcWeak, Error, NodeProps, RcWeak, Writer, YamlGraph, YamlObject};

#[derive(YamlObject, Debug)]
struct Holder {
    first: RcWeak<Point>,
    second: Rc<Point>,
}

#[test]
fn test_parent_pointers() {
    let graph = YamlGraph::default();
    let root = TreeNode::new(1);
    TreeNode::adopt(&root, TreeNode::new(2));
    TreeNode::adopt(&root, TreeNode::new(3));

    assert_eq!(
        graph.to_yaml(&root).unwrap(),
        "&id001\nvalue: 1\nchildren:\n  - value: 2\n    parent: *id001\n  - value: 3\n    parent: *id001\n"
    );

    let events = graph.serialize(&root).unwrap();
    let result: Rc<std::cell::RefCell<TreeNode>> = graph.deserialize(&events).unwrap().unwrap();
    let node = result.borrow();
    assert_eq!(node.value, 1);
    assert!(node.parent.upgrade().is_none());
    assert_eq!(node.children.len(), 2);
    for (child, value) in node.children.iter().zip([2, 3]) {
        let child = child.borrow();
        assert_eq!(child.value, value);
        assert!(Rc::ptr_eq(&child.parent.upgrade().unwrap(), &result));
    }
}

#[test]
fn test_weak_written_before_strong() {
    let graph = YamlGraph::default();
    let point = Rc::new(Point { x: 1, y: 2 });
    let holder = Holder {
        first: RcWeak::from(&point),
        second: point,
    };
    assert_eq!(
        graph.to_yaml(&holder).unwrap(),
        "first: &id001\n  x: 1\n  y: 2\nsecond: *id001\n"
    );

    let events = graph.serialize(&holder).unwrap();
    let result: Holder = graph.deserialize(&events).unwrap().unwrap();
    assert!(Rc::ptr_eq(&result.first.upgrade().unwrap(), &result.second));
}

#[test]
fn test_forward_alias_is_patched() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("first")
        .alias("p")
        .scalar("second")
        .mapping_start_with(NodeProps::anchored("p"))
        .scalar("x")
        .scalar("4")
        .mapping_end()
        .mapping_end();
    let result: Holder = graph.deserialize(writer.events()).unwrap().unwrap();
    assert_eq!(*result.second, Point { x: 4, y: 0 });
    assert!(Rc::ptr_eq(&result.first.upgrade().unwrap(), &result.second));
}

#[test]
fn test_unresolved_alias() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("first")
        .alias("missing")
        .scalar("second")
        .mapping_start()
        .scalar("x")
        .scalar("4")
        .mapping_end()
        .mapping_end();
    let err = graph.deserialize::<Holder>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::AnchorNotFound(_)));
}

#[test]
fn test_dangling_weak() {
    let point = Rc::new(Point { x: 1, y: 2 });
    let holder = Holder {
        first: RcWeak::new(),
        second: point,
    };
    let graph = YamlGraph::default();
    assert_eq!(graph.to_yaml(&holder).unwrap(), "second:\n  x: 1\n  y: 2\n");

    let graph = YamlGraph::default().emit_default_values(true);
    assert_eq!(
        graph.to_yaml(&holder).unwrap(),
        "first: null\nsecond:\n  x: 1\n  y: 2\n"
    );
    let events = graph.serialize(&holder).unwrap();
    let result: Holder = graph.deserialize(&events).unwrap().unwrap();
    assert!(result.first.upgrade().is_none());
}

#[test]
fn test_weak_clones_share_updates() {
    let weak: RcWeak<i32> = RcWeak::new();
    let clone = weak.clone();
    let value = Rc::new(5);
    weak.update(Rc::downgrade(&value));
    assert_eq!(clone.upgrade().map(|v| *v), Some(5));
}

#[derive(YamlObject, Debug)]
struct SyncHolder {
    primary: Arc<String>,
    backup: ArcWeak<String>,
}

#[test]
fn test_arc_weak() {
    let graph = YamlGraph::default();
    let primary = Arc::new("main".to_string());
    let holder = SyncHolder {
        backup: ArcWeak::from(&primary),
        primary,
    };
    assert_eq!(
        graph.to_yaml(&holder).unwrap(),
        "primary: &id001 main\nbackup: *id001\n"
    );
    let events = graph.serialize(&holder).unwrap();
    let result: SyncHolder = graph.deserialize(&events).unwrap().unwrap();
    assert!(Arc::ptr_eq(&result.backup.upgrade().unwrap(), &result.primary));
}
