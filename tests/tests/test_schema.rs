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

use tests::Person;
use yamlgraph::{Error, Writer, YamlGraph, YamlObject};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(YamlObject, Debug, PartialEq)]
struct Family {
    people: Vec<Person>,
}

fn unknown_key_document() -> Writer {
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("people")
        .sequence_start()
        .mapping_start()
        .scalar("Name")
        .scalar("Joe")
        .mapping_end()
        .mapping_start()
        .scalar("Name")
        .scalar("Betty")
        .scalar("Mother")
        .mapping_start()
        .scalar("Dog")
        .mapping_start()
        .scalar("name")
        .scalar("Rex")
        .scalar("toys")
        .sequence_start()
        .scalar("ball")
        .sequence_end()
        .mapping_end()
        .mapping_end()
        .mapping_end()
        .sequence_end()
        .mapping_end();
    writer
}

#[test]
fn test_unknown_key_reports_path() {
    init_tracing();
    let graph = YamlGraph::default();
    let err = graph
        .deserialize::<Family>(unknown_key_document().events())
        .unwrap_err();
    assert!(matches!(err, Error::SchemaError(_)));
    let message = err.to_string();
    assert!(message.contains("unknown member 'Dog' in Person"), "{message}");
    assert!(message.contains("(at people[1].mother)"), "{message}");
}

#[test]
fn test_unknown_key_skipped() {
    init_tracing();
    let graph = YamlGraph::default().ignore_unmatched_properties(true);
    let family: Family = graph
        .deserialize(unknown_key_document().events())
        .unwrap()
        .unwrap();
    assert_eq!(family.people.len(), 2);
    assert_eq!(family.people[0], Person::new("Joe", 0));
    assert_eq!(family.people[1].name, "Betty");
    assert_eq!(
        family.people[1].mother.as_deref(),
        Some(&Person::new("", 0))
    );
}

#[test]
fn test_mapping_expected() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer.sequence_start().scalar("1").sequence_end();
    let err = graph.deserialize::<Person>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::SchemaError(_)));
}

#[test]
fn test_invalid_number() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("Age")
        .scalar("old")
        .mapping_end();
    let err = graph.deserialize::<Person>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ConversionError(_)));
    assert!(err.to_string().contains("(at age)"));

    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("Age")
        .scalar("-1")
        .mapping_end();
    let err = graph.deserialize::<Person>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ConversionError(_)));
}

fn ancestry(depth: u32) -> Person {
    let mut person = Person::new("root", 1);
    for i in 0..depth {
        let mut child = Person::new(&format!("child{i}"), 1);
        child.mother = Some(Box::new(person));
        person = child;
    }
    person
}

#[test]
fn test_depth_limit_on_write() {
    let graph = YamlGraph::default().max_depth(3);
    assert!(graph.serialize(&ancestry(2)).is_ok());
    let err = graph.serialize(&ancestry(3)).unwrap_err();
    assert!(matches!(err, Error::DepthExceed(_)));
}

#[test]
fn test_depth_limit_on_read() {
    let events = YamlGraph::default().serialize(&ancestry(5)).unwrap();
    let graph = YamlGraph::default().max_depth(4);
    let err = graph.deserialize::<Person>(&events).unwrap_err();
    assert!(matches!(err, Error::DepthExceed(_)));

    let graph = YamlGraph::default().max_depth(6);
    assert_eq!(graph.deserialize::<Person>(&events).unwrap(), Some(ancestry(5)));
}

#[test]
fn test_non_scalar_key() {
    let graph = YamlGraph::default();
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .sequence_start()
        .sequence_end()
        .scalar("x")
        .mapping_end();
    let err = graph.deserialize::<Person>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::SchemaError(_)));
}
