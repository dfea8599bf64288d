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

//! Shared fixtures for the integration tests.

use std::cell::RefCell;
use std::rc::Rc;
use yamlgraph::{Error, Event, RcWeak, Serializer, YamlGraph, YamlObject};

#[derive(YamlObject, Debug, PartialEq, Clone)]
pub struct Person {
    #[yaml(alias = "Name")]
    pub name: String,
    #[yaml(alias = "Age")]
    pub age: u32,
    #[yaml(alias = "Mother")]
    pub mother: Option<Box<Person>>,
}

impl Person {
    pub fn new(name: &str, age: u32) -> Person {
        Person {
            name: name.to_string(),
            age,
            mother: None,
        }
    }
}

#[derive(YamlObject, Debug, PartialEq, Clone)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Tree node linked to its parent through a weak pointer.
#[derive(YamlObject, Debug)]
pub struct TreeNode {
    pub value: i32,
    pub parent: RcWeak<RefCell<TreeNode>>,
    pub children: Vec<Rc<RefCell<TreeNode>>>,
}

impl TreeNode {
    pub fn new(value: i32) -> Rc<RefCell<TreeNode>> {
        Rc::new(RefCell::new(TreeNode {
            value,
            parent: RcWeak::new(),
            children: Vec::new(),
        }))
    }

    pub fn adopt(parent: &Rc<RefCell<TreeNode>>, child: Rc<RefCell<TreeNode>>) {
        child.borrow_mut().parent = RcWeak::from(parent);
        parent.borrow_mut().children.push(child);
    }
}

/// Serializes `value`, reads it back and returns the result.
pub fn roundtrip<T: Serializer>(graph: &YamlGraph, value: &T) -> Result<Option<T>, Error> {
    let events: Vec<Event> = graph.serialize(value)?;
    graph.deserialize(&events)
}
