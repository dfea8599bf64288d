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
use crate::resolver::context::{ReadContext, WriteContext};

use super::string::text_style;

/// Writes a unit variant by its document name.
#[inline(always)]
pub fn write_variant(context: &mut WriteContext, props: NodeProps, name: &str) -> Result<(), Error> {
    let style = text_style(context, name);
    context.emit_scalar(props, Scalar::new(name, style))
}

/// Index of the variant named by the scalar at `head`.
pub fn read_variant_index(
    context: &mut ReadContext,
    head: Event,
    variants: &[&str],
    type_name: &str,
) -> Result<usize, Error> {
    let scalar = context.expect_scalar(head, type_name)?;
    variants
        .iter()
        .position(|variant| *variant == scalar.as_str())
        .ok_or_else(|| {
            context.conversion_error(format!(
                "'{}' is not a variant of {type_name}",
                scalar.as_str()
            ))
        })
}
