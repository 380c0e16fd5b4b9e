// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use shoji_core::error::EnhanceError;
use shoji_core::trace::{
    AttributeIgnored, FacadeActivated, FacadePrepared, MarkerKind, MarkerSkipped, PassSummary,
    SkipReason, TimestampRendered, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_timestamp_rendered(&mut self, e: &TimestampRendered<'_>) {
        let parsed = if e.parsed { "" } else { " (unparsed)" };
        let _ = writeln!(
            self.writer,
            "[time] #{} {:?} -> {:?}{parsed}",
            e.index, e.datetime, e.text,
        );
    }

    fn on_marker_skipped(&mut self, e: &MarkerSkipped<'_>) {
        let _ = match e.reason {
            SkipReason::EmptyDatetime => writeln!(
                self.writer,
                "[skip] {} #{} empty datetime",
                e.kind.name(),
                e.index,
            ),
            SkipReason::AlreadyPrepared => writeln!(
                self.writer,
                "[skip] {} #{} already built",
                e.kind.name(),
                e.index,
            ),
            SkipReason::Rejected(err) => writeln!(
                self.writer,
                "[skip] {} #{} {err}",
                e.kind.name(),
                e.index,
            ),
        };
    }

    fn on_attribute_ignored(&mut self, e: &AttributeIgnored<'_>) {
        let _ = writeln!(
            self.writer,
            "[ignore] {} #{} {}={:?}",
            e.kind.name(),
            e.index,
            e.attribute,
            e.value,
        );
    }

    fn on_facade_prepared(&mut self, e: &FacadePrepared) {
        let height = e.height.map_or_else(|| "-".to_owned(), |h| h.to_string());
        let _ = writeln!(
            self.writer,
            "[facade] #{} size={}x{height} thumbnail={} letterboxed={}",
            e.index, e.width, e.has_thumbnail, e.letterboxed,
        );
    }

    fn on_facade_activated(&mut self, e: &FacadeActivated) {
        let _ = writeln!(self.writer, "[activate] {} width={}", e.src, e.width);
    }

    fn on_activation_failed(&mut self, error: &EnhanceError) {
        let _ = writeln!(self.writer, "[activate] FAILED {error}");
    }

    fn on_pass_summary(&mut self, kind: MarkerKind, s: &PassSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] {} found={} enhanced={} skipped={}",
            kind.name(),
            s.found,
            s.enhanced,
            s.skipped,
        );
    }
}
