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

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const YAML_TAG_PREFIX: &str = "tag:yaml.org,2002:";
pub const SECONDARY_TAG_HANDLE: &str = "!!";

/// Tags of the core schema, implicit for their natural host type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinTag {
    Str,
    Int,
    Float,
    Bool,
    Seq,
    Map,
    Null,
    Timestamp,
}

impl BuiltinTag {
    pub const ALL: [BuiltinTag; 8] = [
        BuiltinTag::Str,
        BuiltinTag::Int,
        BuiltinTag::Float,
        BuiltinTag::Bool,
        BuiltinTag::Seq,
        BuiltinTag::Map,
        BuiltinTag::Null,
        BuiltinTag::Timestamp,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            BuiltinTag::Str => "str",
            BuiltinTag::Int => "int",
            BuiltinTag::Float => "float",
            BuiltinTag::Bool => "bool",
            BuiltinTag::Seq => "seq",
            BuiltinTag::Map => "map",
            BuiltinTag::Null => "null",
            BuiltinTag::Timestamp => "timestamp",
        }
    }

    /// Full tag, e.g. `tag:yaml.org,2002:str`.
    pub fn as_tag(self) -> String {
        format!("{YAML_TAG_PREFIX}{}", self.suffix())
    }

    pub fn from_tag(tag: &str) -> Option<BuiltinTag> {
        let suffix = tag
            .strip_prefix(YAML_TAG_PREFIX)
            .or_else(|| tag.strip_prefix(SECONDARY_TAG_HANDLE))?;
        BuiltinTag::ALL.into_iter().find(|t| t.suffix() == suffix)
    }
}

/// Expands the `!!` shorthand so that `!!point` and `tag:yaml.org,2002:point`
/// compare equal.
pub fn normalize_tag(tag: &str) -> String {
    match tag.strip_prefix(SECONDARY_TAG_HANDLE) {
        Some(suffix) => format!("{YAML_TAG_PREFIX}{suffix}"),
        None => tag.to_string(),
    }
}

/// Kind of value a plain scalar resolves to under the core schema.
#[derive(Clone, Debug, PartialEq)]
pub enum ImplicitScalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    Str,
}

pub fn is_null_text(text: &str) -> bool {
    matches!(text, "" | "~" | "null" | "Null" | "NULL")
}

pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn is_digits(text: &str, radix: u32) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_digit(radix))
}

/// Parses a core-schema integer: decimal with optional sign, `0x` hex, `0o` octal.
pub fn parse_int(text: &str) -> Option<i128> {
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = if let Some(hex) = body.strip_prefix("0x") {
        if !is_digits(hex, 16) {
            return None;
        }
        u128::from_str_radix(hex, 16).ok()?
    } else if let Some(oct) = body.strip_prefix("0o") {
        if !is_digits(oct, 8) {
            return None;
        }
        u128::from_str_radix(oct, 8).ok()?
    } else {
        if !is_digits(body, 10) {
            return None;
        }
        body.parse::<u128>().ok()?
    };
    if negative {
        0i128.checked_sub_unsigned(magnitude)
    } else {
        i128::try_from(magnitude).ok()
    }
}

/// Parses a core-schema float, including `.inf`, `-.inf` and `.nan`.
pub fn parse_float(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => return Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => return Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return Some(f64::NAN),
        _ => {}
    }
    let body = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);
    let mut chars = body.chars().peekable();
    let mut mantissa_digits = 0;
    while chars.next_if(|c| c.is_ascii_digit()).is_some() {
        mantissa_digits += 1;
    }
    if chars.next_if_eq(&'.').is_some() {
        while chars.next_if(|c| c.is_ascii_digit()).is_some() {
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if chars.next_if(|c| *c == 'e' || *c == 'E').is_some() {
        chars.next_if(|c| *c == '-' || *c == '+');
        let mut exp_digits = 0;
        while chars.next_if(|c| c.is_ascii_digit()).is_some() {
            exp_digits += 1;
        }
        if exp_digits == 0 {
            return None;
        }
    }
    if chars.next().is_some() {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Formats a float so that it reads back as a float, not an integer.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        ".nan".to_string()
    } else if value == f64::INFINITY {
        ".inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        format!("{value:?}")
    }
}

pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if !text.as_bytes().first()?.is_ascii_digit() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dt%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Resolves a plain scalar under the core schema.
pub fn resolve_plain(text: &str) -> ImplicitScalar {
    if is_null_text(text) {
        return ImplicitScalar::Null;
    }
    if let Some(b) = parse_bool(text) {
        return ImplicitScalar::Bool(b);
    }
    if let Some(i) = parse_int(text) {
        if let Ok(i) = i64::try_from(i) {
            return ImplicitScalar::Int(i);
        }
    }
    if let Some(f) = parse_float(text) {
        return ImplicitScalar::Float(f);
    }
    if let Some(ts) = parse_timestamp(text) {
        return ImplicitScalar::Timestamp(ts);
    }
    ImplicitScalar::Str
}

/// True when `text` is a JSON literal: a number, `true`, `false` or `null`.
pub fn is_json_literal(text: &str) -> bool {
    matches!(text, "true" | "false" | "null")
        || (parse_float(text).is_some_and(f64::is_finite) && !text.starts_with('+'))
}

/// True when a string written plain would read back as something other than a string.
#[inline(always)]
pub fn needs_quotes(text: &str) -> bool {
    resolve_plain(text) != ImplicitScalar::Str
}
