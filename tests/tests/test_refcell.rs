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

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock};
use yamlgraph::{YamlGraph, YamlObject};

#[derive(YamlObject, Debug)]
struct Link {
    name: String,
    next: Option<Rc<RefCell<Link>>>,
}

#[test]
fn test_self_cycle() {
    let graph = YamlGraph::default();
    let node = Rc::new(RefCell::new(Link {
        name: "a".to_string(),
        next: None,
    }));
    node.borrow_mut().next = Some(node.clone());

    let events = graph.serialize(&node).unwrap();
    let result: Rc<RefCell<Link>> = graph.deserialize(&events).unwrap().unwrap();
    assert_eq!(result.borrow().name, "a");
    let next = result.borrow().next.clone().unwrap();
    assert!(Rc::ptr_eq(&next, &result));

    node.borrow_mut().next = None;
    result.borrow_mut().next = None;
}

#[test]
fn test_two_node_cycle() {
    let graph = YamlGraph::default();
    let a = Rc::new(RefCell::new(Link {
        name: "a".to_string(),
        next: None,
    }));
    let b = Rc::new(RefCell::new(Link {
        name: "b".to_string(),
        next: Some(a.clone()),
    }));
    a.borrow_mut().next = Some(b.clone());

    assert_eq!(
        graph.to_yaml(&a).unwrap(),
        "&id001\nname: a\nnext:\n  name: b\n  next: *id001\n"
    );

    let events = graph.serialize(&a).unwrap();
    let result: Rc<RefCell<Link>> = graph.deserialize(&events).unwrap().unwrap();
    let second = result.borrow().next.clone().unwrap();
    assert_eq!(second.borrow().name, "b");
    let back = second.borrow().next.clone().unwrap();
    assert!(Rc::ptr_eq(&back, &result));

    a.borrow_mut().next = None;
    second.borrow_mut().next = None;
}

#[test]
fn test_refcell_value() {
    let graph = YamlGraph::default();
    let cell = RefCell::new(vec![1, 2, 3]);
    let events = graph.serialize(&cell).unwrap();
    let result: RefCell<Vec<i32>> = graph.deserialize(&events).unwrap().unwrap();
    assert_eq!(*result.borrow(), vec![1, 2, 3]);
}

#[derive(YamlObject, Debug)]
struct SyncLink {
    name: String,
    next: Option<Arc<Mutex<SyncLink>>>,
}

#[test]
fn test_mutex_cycle() {
    let graph = YamlGraph::default();
    let node = Arc::new(Mutex::new(SyncLink {
        name: "m".to_string(),
        next: None,
    }));
    node.lock().unwrap().next = Some(node.clone());

    let events = graph.serialize(&node).unwrap();
    let result: Arc<Mutex<SyncLink>> = graph.deserialize(&events).unwrap().unwrap();
    let next = result.lock().unwrap().next.clone().unwrap();
    assert!(Arc::ptr_eq(&next, &result));
    assert_eq!(result.lock().unwrap().name, "m");

    node.lock().unwrap().next = None;
    result.lock().unwrap().next = None;
}

#[derive(YamlObject, Debug)]
struct Shared {
    counters: Vec<Arc<RwLock<i64>>>,
}

#[test]
fn test_rwlock_shared_between_members() {
    let graph = YamlGraph::default();
    let counter = Arc::new(RwLock::new(5));
    let shared = Shared {
        counters: vec![counter.clone(), counter],
    };
    let events = graph.serialize(&shared).unwrap();
    let result: Shared = graph.deserialize(&events).unwrap().unwrap();
    assert!(Arc::ptr_eq(&result.counters[0], &result.counters[1]));
    *result.counters[0].write().unwrap() = 9;
    assert_eq!(*result.counters[1].read().unwrap(), 9);
}
