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

use crate::error::Error;
use crate::event::{Event, NodeProps, Scalar};
use crate::resolver::context::ReadContext;
use crate::resolver::context::WriteContext;
use crate::serializer::Serializer;
use crate::types::parse_bool;

impl Serializer for bool {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        let text = if *self { "true" } else { "false" };
        context.emit_scalar(props, Scalar::plain(text))
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let scalar = context.expect_scalar(head, "a bool")?;
        *self = parse_bool(scalar.as_str()).ok_or_else(|| {
            context.conversion_error(format!("'{}' is not a valid bool", scalar.as_str()))
        })?;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(false)
    }

    fn yaml_is_default(&self) -> bool {
        !*self
    }

    fn yaml_is_primitive() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
