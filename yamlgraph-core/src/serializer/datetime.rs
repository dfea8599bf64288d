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
use crate::types::parse_timestamp;
use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

impl Serializer for NaiveDateTime {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        context.emit_scalar(props, Scalar::plain(self.format(DATETIME_FORMAT).to_string()))
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let scalar = context.expect_scalar(head, "a timestamp")?;
        *self = parse_timestamp(scalar.as_str()).ok_or_else(|| {
            context.conversion_error(format!("'{}' is not a valid timestamp", scalar.as_str()))
        })?;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(NaiveDateTime::default())
    }

    fn yaml_is_default(&self) -> bool {
        *self == NaiveDateTime::default()
    }

    fn yaml_is_primitive() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Serializer for NaiveDate {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        context.emit_scalar(props, Scalar::plain(self.format(DATE_FORMAT).to_string()))
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let scalar = context.expect_scalar(head, "a date")?;
        let text = scalar.as_str();
        *self = NaiveDate::parse_from_str(text, DATE_FORMAT)
            .ok()
            .or_else(|| parse_timestamp(text).map(|dt| dt.date()))
            .ok_or_else(|| context.conversion_error(format!("'{text}' is not a valid date")))?;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(NaiveDate::default())
    }

    fn yaml_is_default(&self) -> bool {
        *self == NaiveDate::default()
    }

    fn yaml_is_primitive() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `H:MM:SS`, followed by `.fraction` when the duration has sub-second precision.
fn format_duration(duration: &Duration) -> String {
    let secs = duration.as_secs();
    let mut text = format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60);
    let nanos = duration.subsec_nanos();
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text
}

fn parse_duration(text: &str) -> Option<Duration> {
    let mut parts = text.split(':');
    let (hours, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || minutes.len() != 2 {
        return None;
    }
    let hours: u64 = hours.parse().ok()?;
    let minutes: u64 = minutes.parse().ok()?;
    let (whole, fraction) = match seconds.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (seconds, ""),
    };
    if whole.len() != 2 || fraction.len() > 9 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole: u64 = whole.parse().ok()?;
    if minutes > 59 || whole > 59 {
        return None;
    }
    let nanos = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<9}").parse::<u32>().ok()?
    };
    let secs = hours.checked_mul(3600)?.checked_add(minutes * 60 + whole)?;
    Some(Duration::new(secs, nanos))
}

impl Serializer for Duration {
    fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
        context.emit_scalar(props, Scalar::plain(format_duration(self)))
    }

    fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
        let scalar = context.expect_scalar(head, "a duration")?;
        *self = parse_duration(scalar.as_str()).ok_or_else(|| {
            context.conversion_error(format!("'{}' is not a valid duration", scalar.as_str()))
        })?;
        Ok(())
    }

    fn yaml_create() -> Result<Self, Error> {
        Ok(Duration::ZERO)
    }

    fn yaml_is_default(&self) -> bool {
        self.is_zero()
    }

    fn yaml_is_primitive() -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
