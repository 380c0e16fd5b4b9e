// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the enhancement passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! passes call as they process markers. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Activations happen after the passes have returned, so
//! [`FacadeActivated`] records travel back through the
//! [`ActivationHandler`](crate::dom::ActivationHandler) result and the
//! backend hands them to [`TraceSink::report_activation`].
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::error::EnhanceError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which kind of marker an event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// A `<time>` element.
    Time,
    /// A `div.facade` element.
    Facade,
}

impl MarkerKind {
    /// Short lowercase name, for log lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Facade => "facade",
        }
    }
}

/// Why a marker was left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason<'a> {
    /// The time marker has an empty or missing `datetime`.
    EmptyDatetime,
    /// The facade was built by an earlier pass.
    AlreadyPrepared,
    /// The marker was rejected or a mutation failed.
    Rejected(&'a EnhanceError),
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a time marker's text is replaced.
#[derive(Clone, Copy, Debug)]
pub struct TimestampRendered<'a> {
    /// Position among the matched time markers.
    pub index: usize,
    /// The `datetime` attribute.
    pub datetime: &'a str,
    /// The text written.
    pub text: &'a str,
    /// `false` when the attribute did not parse and the placeholder was used.
    pub parsed: bool,
}

/// Emitted when a marker is skipped.
#[derive(Clone, Copy, Debug)]
pub struct MarkerSkipped<'a> {
    /// Marker kind.
    pub kind: MarkerKind,
    /// Position among the matched markers of that kind.
    pub index: usize,
    /// Why it was skipped.
    pub reason: SkipReason<'a>,
}

/// Emitted when an optional attribute is ignored because it does not parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeIgnored<'a> {
    /// Marker kind.
    pub kind: MarkerKind,
    /// Position among the matched markers of that kind.
    pub index: usize,
    /// Attribute name.
    pub attribute: &'static str,
    /// The value that was ignored.
    pub value: &'a str,
}

/// Emitted when a facade has been built and armed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacadePrepared {
    /// Position among the matched facade markers.
    pub index: usize,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels, if configured.
    pub height: Option<u32>,
    /// Whether a thumbnail image was added.
    pub has_thumbnail: bool,
    /// Whether the thumbnail host letterboxes (height suppressed).
    pub letterboxed: bool,
}

/// Produced when a facade is replaced by its player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacadeActivated {
    /// Final player URL.
    pub src: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels, if configured.
    pub height: Option<u32>,
}

/// Counts for one pass over one marker kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Markers matched by the selector.
    pub found: usize,
    /// Markers enhanced.
    pub enhanced: usize,
    /// Markers left untouched.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the enhancement passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a time marker's text is replaced.
    fn on_timestamp_rendered(&mut self, e: &TimestampRendered<'_>) {
        _ = e;
    }

    /// Called when a marker is left untouched.
    fn on_marker_skipped(&mut self, e: &MarkerSkipped<'_>) {
        _ = e;
    }

    /// Called when an optional attribute is ignored.
    fn on_attribute_ignored(&mut self, e: &AttributeIgnored<'_>) {
        _ = e;
    }

    /// Called after a facade has been built and armed.
    fn on_facade_prepared(&mut self, e: &FacadePrepared) {
        _ = e;
    }

    /// Called after a facade has been replaced by its player.
    fn on_facade_activated(&mut self, e: &FacadeActivated) {
        _ = e;
    }

    /// Called when an activation fails; the facade stays in place.
    fn on_activation_failed(&mut self, error: &EnhanceError) {
        _ = error;
    }

    /// Called at the end of each pass.
    fn on_pass_summary(&mut self, kind: MarkerKind, summary: &PassSummary) {
        _ = (kind, summary);
    }

    /// Dispatches the result of an
    /// [`ActivationHandler`](crate::dom::ActivationHandler).
    fn report_activation(&mut self, result: &Result<FacadeActivated, EnhanceError>) {
        match result {
            Ok(activated) => self.on_facade_activated(activated),
            Err(error) => self.on_activation_failed(error),
        }
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TimestampRendered`].
    #[inline]
    pub fn timestamp_rendered(&mut self, e: &TimestampRendered<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timestamp_rendered(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MarkerSkipped`].
    #[inline]
    pub fn marker_skipped(&mut self, e: &MarkerSkipped<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_marker_skipped(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AttributeIgnored`].
    #[inline]
    pub fn attribute_ignored(&mut self, e: &AttributeIgnored<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_attribute_ignored(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FacadePrepared`].
    #[inline]
    pub fn facade_prepared(&mut self, e: &FacadePrepared) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_facade_prepared(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassSummary`].
    #[inline]
    pub fn pass_summary(&mut self, kind: MarkerKind, summary: &PassSummary) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_summary(kind, summary);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (kind, summary);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
