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

use std::any::TypeId;
use std::rc::Rc;
use std::sync::Arc;
use tests::{roundtrip, Point};
use yamlgraph::{
    ConverterFactory, Error, FnConverter, ObjectContext, Scalar, ScalarConverter, Writer,
    YamlGraph, YamlObject,
};

fn parse_point(context: &ObjectContext, scalar: &Scalar) -> Result<Point, Error> {
    let invalid = || {
        Error::conversion_error(format!(
            "'{}' is not a point (at {})",
            scalar.as_str(),
            context.path
        ))
    };
    let (x, y) = scalar.as_str().split_once(',').ok_or_else(invalid)?;
    Ok(Point {
        x: x.trim().parse().map_err(|_| invalid())?,
        y: y.trim().parse().map_err(|_| invalid())?,
    })
}

fn format_point(_: &ObjectContext, point: &Point) -> Result<Scalar, Error> {
    Ok(Scalar::any(format!("{},{}", point.x, point.y)))
}

fn point_graph() -> YamlGraph {
    let mut graph = YamlGraph::default();
    graph.register_converter_factory(FnConverter::<Point>::new(parse_point, format_point));
    graph
}

#[derive(YamlObject, Debug, PartialEq)]
struct Segment {
    from: Point,
    to: Point,
}

#[test]
fn test_points_as_scalars() {
    let graph = point_graph();
    let segment = Segment {
        from: Point { x: 1, y: 2 },
        to: Point { x: 3, y: 4 },
    };
    assert_eq!(graph.to_yaml(&segment).unwrap(), "from: 1,2\nto: 3,4\n");
    assert_eq!(roundtrip(&graph, &segment).unwrap(), Some(segment));
}

#[test]
fn test_conversion_failure_carries_path() {
    let graph = point_graph();
    let mut writer = Writer::new();
    writer
        .mapping_start()
        .scalar("from")
        .scalar("bad")
        .mapping_end();
    let err = graph.deserialize::<Segment>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ConversionError(_)));
    assert!(err.to_string().contains("(at from)"));
}

#[test]
fn test_converted_values_keep_identity() {
    let graph = point_graph();
    let shared = Rc::new(Point { x: 5, y: 6 });
    let list = vec![shared.clone(), shared];
    assert_eq!(graph.to_yaml(&list).unwrap(), "- &id001 5,6\n- *id001\n");

    let events = graph.serialize(&list).unwrap();
    let result: Vec<Rc<Point>> = graph.deserialize(&events).unwrap().unwrap();
    assert!(Rc::ptr_eq(&result[0], &result[1]));
}

#[test]
fn test_converter_supplies_factory() {
    #[derive(YamlObject, Debug, PartialEq)]
    #[yaml(no_factory)]
    struct Handle {
        id: u32,
    }

    fn parse_handle(_: &ObjectContext, scalar: &Scalar) -> Result<Handle, Error> {
        let id = scalar
            .as_str()
            .strip_prefix('#')
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| Error::conversion_error("expected #<id>"))?;
        Ok(Handle { id })
    }

    fn format_handle(_: &ObjectContext, handle: &Handle) -> Result<Scalar, Error> {
        Ok(Scalar::double_quoted(format!("#{}", handle.id)))
    }

    let mut graph = YamlGraph::default();
    graph.register_converter_factory(FnConverter::<Handle>::new(parse_handle, format_handle));
    let handles = vec![Handle { id: 1 }, Handle { id: 2 }];
    assert_eq!(graph.to_yaml(&handles).unwrap(), "- \"#1\"\n- \"#2\"\n");
    assert_eq!(roundtrip(&graph, &handles).unwrap(), Some(handles));
}

/// Claims every type whose name ends with `Id`.
struct IdFactory;

struct IdConverter;

impl ScalarConverter for IdConverter {
    fn convert_from(
        &self,
        _: &ObjectContext,
        scalar: &Scalar,
    ) -> Result<Box<dyn std::any::Any>, Error> {
        let id = scalar
            .as_str()
            .strip_prefix("id-")
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| Error::conversion_error("expected id-<n>"))?;
        Ok(Box::new(UserId { value: id }))
    }

    fn convert_to(&self, _: &ObjectContext, value: &dyn std::any::Any) -> Result<Scalar, Error> {
        let id = value
            .downcast_ref::<UserId>()
            .ok_or_else(|| Error::conversion_error("not a UserId"))?;
        Ok(Scalar::any(format!("id-{}", id.value)))
    }
}

impl ConverterFactory for IdFactory {
    fn try_claim(&self, type_id: TypeId, type_name: &'static str) -> Option<Arc<dyn ScalarConverter>> {
        (type_name.ends_with("Id") && type_id == TypeId::of::<UserId>())
            .then(|| Arc::new(IdConverter) as Arc<dyn ScalarConverter>)
    }
}

#[derive(YamlObject, Debug, PartialEq)]
struct UserId {
    value: u64,
}

#[derive(YamlObject, Debug, PartialEq)]
struct User {
    id: UserId,
    name: String,
}

#[test]
fn test_custom_factory() {
    let mut graph = YamlGraph::default();
    graph.register_converter_factory(Arc::new(IdFactory));
    let user = User {
        id: UserId { value: 42 },
        name: "joe".to_string(),
    };
    assert_eq!(graph.to_yaml(&user).unwrap(), "id: id-42
name: joe
");
    assert_eq!(roundtrip(&graph, &user).unwrap(), Some(user));

    let mut writer = Writer::new();
    writer.mapping_start().scalar("id").scalar("42").mapping_end();
    let err = graph.deserialize::<User>(writer.events()).unwrap_err();
    assert!(matches!(err, Error::ConversionError(_)));
}

#[test]
fn test_first_claim_wins() {
    fn parse_reversed(_: &ObjectContext, scalar: &Scalar) -> Result<Point, Error> {
        let (y, x) = scalar
            .as_str()
            .split_once(';')
            .ok_or_else(|| Error::conversion_error("expected y;x"))?;
        Ok(Point {
            x: x.parse().map_err(|_| Error::conversion_error("bad x"))?,
            y: y.parse().map_err(|_| Error::conversion_error("bad y"))?,
        })
    }

    fn format_reversed(_: &ObjectContext, point: &Point) -> Result<Scalar, Error> {
        Ok(Scalar::any(format!("{};{}", point.y, point.x)))
    }

    let mut graph = point_graph();
    graph.register_converter_factory(FnConverter::<Point>::new(parse_reversed, format_reversed));
    assert_eq!(graph.to_yaml(&Point { x: 1, y: 2 }).unwrap(), "1,2
");
}
