// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the enhancement passes.

use core::fmt;

/// A failed operation reported by a [`Document`](crate::dom::Document)
/// implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomError {
    message: String,
}

impl DomError {
    /// Creates an error carrying the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DOM operation failed: {}", self.message)
    }
}

impl core::error::Error for DomError {}

/// Why a marker could not be enhanced or activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnhanceError {
    /// The facade marker has no `data-width` attribute.
    MissingWidth,
    /// A dimension attribute is not a non-negative integer.
    InvalidDimension {
        /// Attribute name, e.g. `data-height`.
        attribute: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The facade marker has no `data-src` attribute.
    MissingSource,
    /// The target URL does not parse.
    InvalidSource(url::ParseError),
    /// The target URL uses a scheme other than `http` or `https`.
    UnsupportedScheme(String),
    /// The facade marker was already built by an earlier pass.
    AlreadyPrepared,
    /// The document rejected a mutation.
    Dom(DomError),
}

impl fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWidth => write!(f, "facade marker has no data-width"),
            Self::InvalidDimension { attribute, value } => {
                write!(f, "{attribute} is not a pixel count: {value:?}")
            }
            Self::MissingSource => write!(f, "facade marker has no data-src"),
            Self::InvalidSource(err) => write!(f, "data-src is not a valid URL ({err})"),
            Self::UnsupportedScheme(scheme) => {
                write!(f, "refusing to embed a {scheme:?} URL")
            }
            Self::AlreadyPrepared => write!(f, "facade is already built"),
            Self::Dom(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for EnhanceError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidSource(err) => Some(err),
            Self::Dom(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomError> for EnhanceError {
    fn from(err: DomError) -> Self {
        Self::Dom(err)
    }
}

impl From<url::ParseError> for EnhanceError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidSource(err)
    }
}
