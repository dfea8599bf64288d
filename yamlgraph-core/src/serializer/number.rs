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
use crate::types::{format_float, parse_float, parse_int};

macro_rules! impl_int_serializer {
    ($ty:ty) => {
        impl Serializer for $ty {
            #[inline(always)]
            fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
                context.emit_scalar(props, Scalar::plain(self.to_string()))
            }

            fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
                let scalar = context.expect_scalar(head, concat!("an ", stringify!($ty)))?;
                let text = scalar.as_str();
                let wide = parse_int(text).ok_or_else(|| {
                    context.conversion_error(format!(
                        "'{}' is not a valid {}",
                        text,
                        stringify!($ty)
                    ))
                })?;
                *self = <$ty>::try_from(wide).map_err(|_| {
                    context.conversion_error(format!(
                        "{} is out of range for {}",
                        text,
                        stringify!($ty)
                    ))
                })?;
                Ok(())
            }

            #[inline(always)]
            fn yaml_create() -> Result<Self, Error> {
                Ok(0)
            }

            #[inline(always)]
            fn yaml_is_default(&self) -> bool {
                *self == 0
            }

            #[inline(always)]
            fn yaml_is_primitive() -> bool {
                true
            }

            #[inline(always)]
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

macro_rules! impl_float_serializer {
    ($ty:ty) => {
        impl Serializer for $ty {
            #[inline(always)]
            fn yaml_write_data(&self, context: &mut WriteContext, props: NodeProps) -> Result<(), Error> {
                let text = if self.is_finite() {
                    format!("{:?}", self)
                } else {
                    format_float(*self as f64)
                };
                context.emit_scalar(props, Scalar::plain(text))
            }

            fn yaml_read_data(&mut self, context: &mut ReadContext, head: Event) -> Result<(), Error> {
                let scalar = context.expect_scalar(head, concat!("a ", stringify!($ty)))?;
                let value = parse_float(scalar.as_str()).ok_or_else(|| {
                    context.conversion_error(format!(
                        "'{}' is not a valid {}",
                        scalar.as_str(),
                        stringify!($ty)
                    ))
                })?;
                let narrowed = value as $ty;
                if value.is_finite() && !narrowed.is_finite() {
                    return Err(context.conversion_error(format!(
                        "{} is out of range for {}",
                        scalar.as_str(),
                        stringify!($ty)
                    )));
                }
                *self = narrowed;
                Ok(())
            }

            #[inline(always)]
            fn yaml_create() -> Result<Self, Error> {
                Ok(0.0)
            }

            #[inline(always)]
            fn yaml_is_default(&self) -> bool {
                *self == 0.0
            }

            #[inline(always)]
            fn yaml_is_primitive() -> bool {
                true
            }

            #[inline(always)]
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

impl_int_serializer!(i8);
impl_int_serializer!(i16);
impl_int_serializer!(i32);
impl_int_serializer!(i64);
impl_int_serializer!(i128);
impl_int_serializer!(isize);
impl_int_serializer!(u8);
impl_int_serializer!(u16);
impl_int_serializer!(u32);
impl_int_serializer!(u64);
impl_int_serializer!(usize);
impl_float_serializer!(f32);
impl_float_serializer!(f64);
