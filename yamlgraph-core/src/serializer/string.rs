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
use crate::event::{Event, NodeProps, Scalar, ScalarStyle};
use crate::resolver::context::ReadContext;
use crate::resolver::context::WriteContext;
use crate::serializer::Serializer;
use crate::types::needs_quotes;

/// Style of a text scalar: quoted whenever a plain rendering would resolve
/// to another type, e.g. `"true"`, `"12"` or `"null"`.
#[inline]
pub(crate) fn text_style(context: &WriteContext, text: &str) -> ScalarStyle {
    if context.config().is_json() || needs_quotes(text) {
        ScalarStyle::DoubleQuoted
    } else {
        ScalarStyle::Any
    }
}

impl Serializer for String {
    #[inline]
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        let style = text_style(context, self);
        context.emit_scalar(props, Scalar::new(self.as_str(), style))
    }

    #[inline]
    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        if head.is_null_scalar() {
            self.clear();
            return Ok(());
        }
        let scalar = context.expect_scalar(head, "a string")?;
        *self = scalar.value;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(String::new())
    }

    fn yaml_is_default(&self) -> bool {
        self.is_empty()
    }

    fn yaml_is_primitive() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Serializer for char {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        let text = self.to_string();
        let style = text_style(context, &text);
        context.emit_scalar(props, Scalar::new(text, style))
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let scalar = context.expect_scalar(head, "a char")?;
        let mut chars = scalar.as_str().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(context.conversion_error(format!(
                "'{}' is not a single character",
                scalar.as_str()
            ))),
        }
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok('\0')
    }

    fn yaml_is_default(&self) -> bool {
        *self == '\0'
    }

    fn yaml_is_primitive() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
