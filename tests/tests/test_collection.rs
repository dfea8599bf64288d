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

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::time::Duration;
use tests::roundtrip;
use yamlgraph::{Error, Writer, YamlGraph, YamlObject};

#[test]
fn test_flow_limit() {
    let graph = YamlGraph::default().limit_primitive_flow_sequence(3);
    assert_eq!(graph.to_yaml(&vec![1, 2, 3]).unwrap(), "[1, 2, 3]\n");
    assert_eq!(
        graph.to_yaml(&vec![1, 2, 3, 4]).unwrap(),
        "- 1\n- 2\n- 3\n- 4\n"
    );
    let nested = vec![vec![1], vec![2, 3]];
    assert_eq!(graph.to_yaml(&nested).unwrap(), "- [1]\n- [2, 3]\n");

    let graph = YamlGraph::default();
    assert_eq!(graph.to_yaml(&vec![1, 2]).unwrap(), "- 1\n- 2\n");
}

#[test]
fn test_ambiguous_strings_are_quoted() {
    let graph = YamlGraph::default();
    let words: Vec<String> = ["true", "12", "x", "null", ""]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        graph.to_yaml(&words).unwrap(),
        "- \"true\"\n- \"12\"\n- x\n- \"null\"\n- \"\"\n"
    );
    assert_eq!(roundtrip(&graph, &words).unwrap(), Some(words));
}

#[test]
fn test_special_characters() {
    let graph = YamlGraph::default();
    let texts = vec![
        "key: value".to_string(),
        "- item".to_string(),
        "tab\there".to_string(),
        "#comment".to_string(),
    ];
    assert_eq!(roundtrip(&graph, &texts).unwrap(), Some(texts));
}

#[test]
fn test_sets_and_deques() {
    let graph = YamlGraph::default();
    let hash_set: HashSet<i32> = HashSet::from([1, 2, 3]);
    assert_eq!(roundtrip(&graph, &hash_set).unwrap(), Some(hash_set));

    let tree_set: BTreeSet<String> = BTreeSet::from(["b".to_string(), "a".to_string()]);
    assert_eq!(graph.to_yaml(&tree_set).unwrap(), "- a\n- b\n");
    assert_eq!(roundtrip(&graph, &tree_set).unwrap(), Some(tree_set));

    let deque: VecDeque<u8> = VecDeque::from([3, 1, 2]);
    assert_eq!(roundtrip(&graph, &deque).unwrap(), Some(deque));
}

#[test]
fn test_maps() {
    let graph = YamlGraph::default();
    let map = BTreeMap::from([
        ("Joe".to_string(), vec![54, 55]),
        ("Betty".to_string(), vec![22]),
    ]);
    assert_eq!(
        graph.to_yaml(&map).unwrap(),
        "Betty:\n  - 22\nJoe:\n  - 54\n  - 55\n"
    );
    assert_eq!(roundtrip(&graph, &map).unwrap(), Some(map));

    let by_id: HashMap<u64, String> = HashMap::from([(1, "one".to_string()), (2, "two".to_string())]);
    assert_eq!(roundtrip(&graph, &by_id).unwrap(), Some(by_id));
}

#[test]
fn test_null_reads_as_empty() {
    let graph = YamlGraph::default();
    #[derive(YamlObject, Debug, PartialEq)]
    struct Lists {
        items: Vec<i32>,
        names: BTreeMap<String, String>,
        label: String,
    }

    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("items")
        .scalar("~")
        .scalar("names")
        .scalar("null")
        .scalar("label")
        .scalar("")
        .mapping_end();
    let lists: Lists = graph.deserialize(writer.events()).unwrap().unwrap();
    assert!(lists.items.is_empty());
    assert!(lists.names.is_empty());
    assert!(lists.label.is_empty());
}

#[test]
fn test_floats() {
    let graph = YamlGraph::default();
    let floats = vec![f64::INFINITY, f64::NEG_INFINITY, 1.0, -0.5];
    assert_eq!(
        graph.to_yaml(&floats).unwrap(),
        "- .inf\n- -.inf\n- 1.0\n- -0.5\n"
    );
    assert_eq!(roundtrip(&graph, &floats).unwrap(), Some(floats));

    let nan = roundtrip(&graph, &f64::NAN).unwrap().unwrap();
    assert!(nan.is_nan());
    let single = roundtrip(&graph, &2.5f32).unwrap();
    assert_eq!(single, Some(2.5f32));

    let mut writer = Writer::new();
    writer.scalar("1e300");
    let err = graph.deserialize::<f32>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ConversionError(_)));
    assert_eq!(graph.deserialize::<f64>(writer.events()).unwrap(), Some(1e300));

    let mut writer = Writer::new();
    writer.scalar(".inf");
    assert_eq!(graph.deserialize::<f32>(writer.events()).unwrap(), Some(f32::INFINITY));
}

#[test]
fn test_integer_bounds() {
    let graph = YamlGraph::default();
    assert_eq!(roundtrip(&graph, &u64::MAX).unwrap(), Some(u64::MAX));
    assert_eq!(roundtrip(&graph, &i128::MIN).unwrap(), Some(i128::MIN));
    assert_eq!(roundtrip(&graph, &i8::MIN).unwrap(), Some(i8::MIN));

    let mut writer = Writer::new();
    writer.scalar("300");
    let err = graph.deserialize::<u8>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ConversionError(_)));

    let mut writer = Writer::new();
    writer.scalar("0x1F");
    assert_eq!(graph.deserialize::<i32>(writer.events()).unwrap(), Some(31));
}

#[test]
fn test_dates_and_durations() {
    let graph = YamlGraph::default();
    let date = NaiveDate::from_ymd_opt(2001, 12, 14).unwrap();
    assert_eq!(graph.to_yaml(&date).unwrap(), "2001-12-14\n");
    assert_eq!(roundtrip(&graph, &date).unwrap(), Some(date));

    let moment: NaiveDateTime = date.and_hms_milli_opt(21, 59, 43, 100).unwrap();
    assert_eq!(graph.to_yaml(&moment).unwrap(), "2001-12-14T21:59:43.100\n");
    assert_eq!(roundtrip(&graph, &moment).unwrap(), Some(moment));

    let mut writer = Writer::new();
    writer.scalar("2001-12-14 21:59:43.10");
    assert_eq!(
        graph.deserialize::<NaiveDateTime>(writer.events()).unwrap(),
        Some(moment)
    );

    let spans = vec![Duration::from_secs(3725), Duration::from_millis(1500)];
    assert_eq!(graph.to_yaml(&spans).unwrap(), "- 1:02:05\n- 0:00:01.5\n");
    assert_eq!(roundtrip(&graph, &spans).unwrap(), Some(spans));

    let mut writer = Writer::new();
    writer.scalar("1:5:00");
    let err = graph.deserialize::<Duration>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ConversionError(_)));
}

#[test]
fn test_chars_and_options() {
    let graph = YamlGraph::default();
    let chars = vec!['a', '#', '7'];
    assert_eq!(roundtrip(&graph, &chars).unwrap(), Some(chars));

    let options = vec![Some(1), None, Some(3)];
    assert_eq!(graph.to_yaml(&options).unwrap(), "- 1\n- null\n- 3\n");
    assert_eq!(roundtrip(&graph, &options).unwrap(), Some(options));
}

#[test]
fn test_multiline_text() {
    let graph = YamlGraph::default();
    let text = "first line\nsecond line\n".to_string();
    let result = roundtrip(&graph, &text).unwrap();
    assert_eq!(result, Some(text));
}
