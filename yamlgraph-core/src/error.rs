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

//! Error taxonomy of the mapping engine.
//!
//! Every error is fatal for the document being processed: a failed call never
//! returns a partially built value. Errors are created through the static
//! constructor functions so that the `YAMLGRAPH_PANIC_ON_ERROR` debugging switch
//! can intercept them at the exact creation site.

use std::borrow::Cow;

use thiserror::Error;

/// Global flag to check if YAMLGRAPH_PANIC_ON_ERROR environment variable is set at compile time.
/// Set YAMLGRAPH_PANIC_ON_ERROR=1 at compile time to enable panic on error.
pub const PANIC_ON_ERROR: bool = option_env!("YAMLGRAPH_PANIC_ON_ERROR").is_some();

/// Check if YAMLGRAPH_PANIC_ON_ERROR environment variable is set.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for serialization and deserialization of object graphs.
///
/// # Always Use Static Constructor Functions
///
/// Do not construct variants directly, use the constructor functions instead:
///
/// ```rust
/// use yamlgraph_core::error::Error;
///
/// let err = Error::schema_error("unknown member 'Dog'");
/// let err = Error::anchor_not_found(format!("alias *{} has no anchor", "forward"));
/// ```
///
/// ## Available Constructor Functions
///
/// - [`Error::parse_error`] - malformed event stream
/// - [`Error::anchor_not_found`] - alias without a resolvable anchor
/// - [`Error::unregistered_tag`] - explicit tag without a mapping
/// - [`Error::schema_error`] - document shape does not fit the target type
/// - [`Error::type_resolution`] - no factory and no converter for an encountered type
/// - [`Error::conversion_error`] - scalar text rejected by a converter
/// - [`Error::depth_exceed`] - nesting deeper than the configured limit
///
/// ## Debug Mode: YAMLGRAPH_PANIC_ON_ERROR
///
/// ```bash
/// RUST_BACKTRACE=1 YAMLGRAPH_PANIC_ON_ERROR=1 cargo test
/// ```
///
/// When enabled, any error created via the static constructor functions panics immediately
/// with the error message, so the backtrace points at the creation site.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The event stream is malformed (unexpected event, premature end).
    ///
    /// Do not construct this variant directly; use [`Error::parse_error`] instead.
    #[error("parse error: {0}")]
    ParseError(Cow<'static, str>),

    /// An alias references an anchor that never resolves within the document.
    ///
    /// Do not construct this variant directly; use [`Error::anchor_not_found`] instead.
    #[error("anchor not found: {0}")]
    AnchorNotFound(Cow<'static, str>),

    /// An explicit tag has no registered mapping.
    ///
    /// Do not construct this variant directly; use [`Error::unregistered_tag`] instead.
    #[error("unregistered tag: {0}")]
    UnregisteredTag(Cow<'static, str>),

    /// The document does not fit the target type (unknown key, wrong node kind).
    ///
    /// Do not construct this variant directly; use [`Error::schema_error`] instead.
    #[error("schema error: {0}")]
    SchemaError(Cow<'static, str>),

    /// A type cannot be materialized: no factory and no converter.
    ///
    /// Do not construct this variant directly; use [`Error::type_resolution`] instead.
    #[error("type resolution error: {0}")]
    TypeResolution(Cow<'static, str>),

    /// A scalar could not be converted from or to its host value.
    ///
    /// Do not construct this variant directly; use [`Error::conversion_error`] instead.
    #[error("conversion error: {0}")]
    ConversionError(Cow<'static, str>),

    /// Maximum nesting depth exceeded.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// Errors raised by user code, typically custom converters.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a new [`Error::ParseError`].
    ///
    /// If `YAMLGRAPH_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use yamlgraph_core::error::Error;
    ///
    /// let err = Error::parse_error("unexpected end of event stream");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn parse_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::ParseError(s.into());
        if PANIC_ON_ERROR {
            panic!("YAMLGRAPH_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::AnchorNotFound`].
    ///
    /// If `YAMLGRAPH_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use yamlgraph_core::error::Error;
    ///
    /// let err = Error::anchor_not_found(format!("*{}", "forward"));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn anchor_not_found<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::AnchorNotFound(s.into());
        if PANIC_ON_ERROR {
            panic!("YAMLGRAPH_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnregisteredTag`].
    ///
    /// If `YAMLGRAPH_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use yamlgraph_core::error::Error;
    ///
    /// let err = Error::unregistered_tag("!Point");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unregistered_tag<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnregisteredTag(s.into());
        if PANIC_ON_ERROR {
            panic!("YAMLGRAPH_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::SchemaError`].
    ///
    /// If `YAMLGRAPH_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use yamlgraph_core::error::Error;
    ///
    /// let err = Error::schema_error(format!("unknown member '{}'", "Dog"));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn schema_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::SchemaError(s.into());
        if PANIC_ON_ERROR {
            panic!("YAMLGRAPH_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TypeResolution`].
    ///
    /// If `YAMLGRAPH_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use yamlgraph_core::error::Error;
    ///
    /// let err = Error::type_resolution("no factory for SomeCustomType");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_resolution<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::TypeResolution(s.into());
        if PANIC_ON_ERROR {
            panic!("YAMLGRAPH_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::ConversionError`].
    ///
    /// If `YAMLGRAPH_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use yamlgraph_core::error::Error;
    ///
    /// let err = Error::conversion_error(format!("'{}' is not a valid i32", "abc"));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn conversion_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::ConversionError(s.into());
        if PANIC_ON_ERROR {
            panic!("YAMLGRAPH_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DepthExceed`].
    ///
    /// If `YAMLGRAPH_PANIC_ON_ERROR` is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use yamlgraph_core::error::Error;
    ///
    /// let err = Error::depth_exceed(format!("Depth {} exceeds max {}", 300, 256));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn depth_exceed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DepthExceed(s.into());
        if PANIC_ON_ERROR {
            panic!("YAMLGRAPH_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use yamlgraph_core::ensure;
/// use yamlgraph_core::error::Error;
///
/// fn check_len(n: usize) -> Result<(), Error> {
///     ensure!(n > 0, "sequence must not be empty");
///     ensure!(n < 10, Error::schema_error(format!("{} items is too many", n)));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::parse_error($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::parse_error(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with a [`Error::ParseError`].
///
/// # Examples
/// ```
/// use yamlgraph_core::bail;
/// use yamlgraph_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("unexpected {}", "mapping end");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::parse_error($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::parse_error(format!($fmt, $($arg)*)))
    };
}
