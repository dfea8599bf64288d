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
use crate::event::{Event, NodeProps};
use crate::resolver::context::ReadContext;
use crate::resolver::context::WriteContext;
use crate::serializer::Serializer;

/// Writes `iter` as a sequence node. Short runs of primitives may go flow style.
pub fn write_sequence<'a, T, I>(iter: I, context: &mut WriteContext, props: NodeProps) -> Result<(), Error>
where
    T: Serializer + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    let style = context.sequence_style(T::yaml_is_primitive(), iter.len());
    context.inc_depth()?;
    context.emit(Event::SequenceStart(props, style))?;
    for (index, item) in iter.enumerate() {
        context.push_index(index);
        item.yaml_write(context)?;
        context.pop_path();
    }
    context.emit(Event::SequenceEnd)?;
    context.dec_depth();
    Ok(())
}

/// Reads the elements of the sequence starting at `head`, handing each to `push`.
///
/// A null scalar reads as an empty sequence.
pub fn read_sequence<T, F>(context: &mut ReadContext, head: Event, mut push: F) -> Result<(), Error>
where
    T: Serializer,
    F: FnMut(T),
{
    match head {
        Event::SequenceStart(..) => {}
        head if head.is_null_scalar() => return Ok(()),
        other => {
            return Err(context.schema_error(format!("expected a sequence, found {other}")));
        }
    }
    context.inc_depth()?;
    let mut index = 0;
    while !context.allow_sequence_end()? {
        let head = context.read_head()?;
        context.push_index(index);
        let item = T::yaml_read_node(context, head)?;
        context.pop_path();
        push(item);
        index += 1;
    }
    context.dec_depth();
    Ok(())
}
