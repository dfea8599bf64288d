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

//! Pluggable scalar conversion.
//!
//! A [`ConverterFactory`] may claim a type; the claimed type is then written
//! and read as one scalar through the returned [`ScalarConverter`], bypassing
//! member-by-member mapping. Factories are consulted in registration order and
//! the first claim wins.
//!
//! ```rust
//! use yamlgraph_core::error::Error;
//! use yamlgraph_core::event::Scalar;
//! use yamlgraph_core::resolver::converter::FnConverter;
//!
//! struct Celsius(f64);
//!
//! let converter = FnConverter::<Celsius>::new(
//!     |_ctx, scalar| {
//!         let text = scalar.as_str().trim_end_matches("°C");
//!         text.parse::<f64>()
//!             .map(Celsius)
//!             .map_err(|e| Error::conversion_error(e.to_string()))
//!     },
//!     |_ctx, value| Ok(Scalar::any(format!("{}°C", value.0))),
//! );
//! ```

use super::context::ObjectContext;
use crate::error::Error;
use crate::event::Scalar;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Converts one host type from and to a scalar.
pub trait ScalarConverter: Send + Sync {
    fn convert_from(&self, context: &ObjectContext, scalar: &Scalar) -> Result<Box<dyn Any>, Error>;

    fn convert_to(&self, context: &ObjectContext, value: &dyn Any) -> Result<Scalar, Error>;
}

/// Decides whether it handles a type.
pub trait ConverterFactory: Send + Sync {
    fn try_claim(&self, type_id: TypeId, type_name: &'static str)
        -> Option<Arc<dyn ScalarConverter>>;
}

type ConvertFromFn<T> = fn(&ObjectContext, &Scalar) -> Result<T, Error>;
type ConvertToFn<T> = fn(&ObjectContext, &T) -> Result<Scalar, Error>;

/// Converter for exactly one type `T`, built from two functions.
///
/// It is its own factory: it claims `T` and nothing else.
pub struct FnConverter<T> {
    from: ConvertFromFn<T>,
    to: ConvertToFn<T>,
}

impl<T: 'static> FnConverter<T> {
    pub fn new(from: ConvertFromFn<T>, to: ConvertToFn<T>) -> Arc<Self> {
        Arc::new(FnConverter { from, to })
    }
}

impl<T: 'static> ScalarConverter for FnConverter<T> {
    fn convert_from(&self, context: &ObjectContext, scalar: &Scalar) -> Result<Box<dyn Any>, Error> {
        Ok(Box::new((self.from)(context, scalar)?))
    }

    fn convert_to(&self, context: &ObjectContext, value: &dyn Any) -> Result<Scalar, Error> {
        let value = value.downcast_ref::<T>().ok_or_else(|| {
            Error::conversion_error(format!(
                "converter for {} received a {}",
                std::any::type_name::<T>(),
                context.type_name
            ))
        })?;
        (self.to)(context, value)
    }
}

impl<T: 'static> ConverterFactory for FnConverter<T> {
    fn try_claim(&self, type_id: TypeId, _: &'static str) -> Option<Arc<dyn ScalarConverter>> {
        if type_id == TypeId::of::<T>() {
            Some(Arc::new(FnConverter {
                from: self.from,
                to: self.to,
            }))
        } else {
            None
        }
    }
}

/// Ordered factory chain with a per-type claim cache.
#[derive(Default)]
pub struct ConverterChain {
    factories: Vec<Arc<dyn ConverterFactory>>,
    cache: RwLock<HashMap<TypeId, Option<Arc<dyn ScalarConverter>>>>,
}

impl ConverterChain {
    pub fn register(&mut self, factory: Arc<dyn ConverterFactory>) {
        self.factories.push(factory);
        self.cache
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        tracing::debug!(factories = self.factories.len(), "registered converter factory");
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Converter of the first factory claiming the type, if any.
    pub fn converter_for(
        &self,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Option<Arc<dyn ScalarConverter>> {
        if self.factories.is_empty() {
            return None;
        }
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&type_id)
        {
            return cached.clone();
        }
        let claimed = self
            .factories
            .iter()
            .find_map(|factory| factory.try_claim(type_id, type_name));
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(type_id, claimed.clone());
        claimed
    }
}
