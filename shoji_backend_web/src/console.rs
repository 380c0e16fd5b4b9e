// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace output to the browser console.
//!
//! Progress goes to `console.debug`, skipped markers and failed activations
//! to `console.warn`. Pass events only arrive when the `console-trace`
//! feature is enabled; activation results are always reported.

use shoji_core::error::EnhanceError;
use shoji_core::trace::{
    AttributeIgnored, FacadeActivated, FacadePrepared, MarkerKind, MarkerSkipped, PassSummary,
    SkipReason, TimestampRendered, TraceSink,
};
use wasm_bindgen::JsValue;

const PREFIX: &str = "[shoji]";

/// A [`TraceSink`] that logs to the browser console.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

fn debug(line: &str) {
    web_sys::console::debug_1(&JsValue::from_str(line));
}

fn warn(line: &str) {
    web_sys::console::warn_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_timestamp_rendered(&mut self, e: &TimestampRendered<'_>) {
        if e.parsed {
            debug(&timestamp_line(e));
        } else {
            warn(&timestamp_line(e));
        }
    }

    fn on_marker_skipped(&mut self, e: &MarkerSkipped<'_>) {
        match e.reason {
            // Empty `datetime` is ordinary markup, not a problem.
            SkipReason::EmptyDatetime | SkipReason::AlreadyPrepared => debug(&skipped_line(e)),
            SkipReason::Rejected(_) => warn(&skipped_line(e)),
        }
    }

    fn on_attribute_ignored(&mut self, e: &AttributeIgnored<'_>) {
        warn(&ignored_line(e));
    }

    fn on_facade_prepared(&mut self, e: &FacadePrepared) {
        debug(&prepared_line(e));
    }

    fn on_facade_activated(&mut self, e: &FacadeActivated) {
        debug(&format!("{PREFIX} facade activated: {}", e.src));
    }

    fn on_activation_failed(&mut self, error: &EnhanceError) {
        warn(&format!("{PREFIX} facade not activated: {error}"));
    }

    fn on_pass_summary(&mut self, kind: MarkerKind, summary: &PassSummary) {
        debug(&summary_line(kind, summary));
    }
}

/// Logs a pass that could not enumerate its markers.
pub(crate) fn pass_failed(kind: MarkerKind, error: &shoji_core::DomError) {
    warn(&format!("{PREFIX} {} pass failed: {error}", kind.name()));
}

fn timestamp_line(e: &TimestampRendered<'_>) -> String {
    if e.parsed {
        format!("{PREFIX} time #{}: {:?} -> {:?}", e.index, e.datetime, e.text)
    } else {
        format!(
            "{PREFIX} time #{}: unparseable datetime {:?}",
            e.index, e.datetime
        )
    }
}

fn skipped_line(e: &MarkerSkipped<'_>) -> String {
    let kind = e.kind.name();
    match e.reason {
        SkipReason::EmptyDatetime => format!("{PREFIX} {kind} #{}: empty datetime", e.index),
        SkipReason::AlreadyPrepared => format!("{PREFIX} {kind} #{}: already built", e.index),
        SkipReason::Rejected(err) => format!("{PREFIX} {kind} #{} skipped: {err}", e.index),
    }
}

fn ignored_line(e: &AttributeIgnored<'_>) -> String {
    format!(
        "{PREFIX} {} #{}: ignoring {}={:?}",
        e.kind.name(),
        e.index,
        e.attribute,
        e.value
    )
}

fn prepared_line(e: &FacadePrepared) -> String {
    let height = e
        .height
        .map_or_else(|| "auto".to_owned(), |h| h.to_string());
    let thumb = match (e.has_thumbnail, e.letterboxed) {
        (false, _) => "none",
        (true, false) => "sized",
        (true, true) => "letterboxed",
    };
    format!(
        "{PREFIX} facade #{}: {}x{height} thumbnail={thumb}",
        e.index, e.width
    )
}

fn summary_line(kind: MarkerKind, s: &PassSummary) -> String {
    format!(
        "{PREFIX} {} pass: found={} enhanced={} skipped={}",
        kind.name(),
        s.found,
        s.enhanced,
        s.skipped
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_lines_name_the_reason() {
        let err = EnhanceError::MissingWidth;
        let line = skipped_line(&MarkerSkipped {
            kind: MarkerKind::Facade,
            index: 2,
            reason: SkipReason::Rejected(&err),
        });
        assert!(line.starts_with("[shoji] facade #2 skipped: "), "got: {line}");
        assert!(line.contains("data-width"), "got: {line}");

        let line = skipped_line(&MarkerSkipped {
            kind: MarkerKind::Time,
            index: 0,
            reason: SkipReason::EmptyDatetime,
        });
        assert_eq!(line, "[shoji] time #0: empty datetime");

        let line = skipped_line(&MarkerSkipped {
            kind: MarkerKind::Facade,
            index: 1,
            reason: SkipReason::AlreadyPrepared,
        });
        assert_eq!(line, "[shoji] facade #1: already built");
    }

    #[test]
    fn ignored_line_quotes_the_value() {
        let line = ignored_line(&AttributeIgnored {
            kind: MarkerKind::Facade,
            index: 3,
            attribute: "data-height",
            value: "",
        });
        assert_eq!(line, "[shoji] facade #3: ignoring data-height=\"\"");
    }

    #[test]
    fn prepared_line_shows_size_and_thumbnail() {
        let line = prepared_line(&FacadePrepared {
            index: 0,
            width: 560,
            height: None,
            has_thumbnail: true,
            letterboxed: true,
        });
        assert_eq!(line, "[shoji] facade #0: 560xauto thumbnail=letterboxed");
    }

    #[test]
    fn timestamp_lines() {
        let rendered = TimestampRendered {
            index: 1,
            datetime: "2026-10-19T09:00:00Z",
            text: "3 hours ago",
            parsed: true,
        };
        assert_eq!(
            timestamp_line(&rendered),
            "[shoji] time #1: \"2026-10-19T09:00:00Z\" -> \"3 hours ago\""
        );
        let invalid = TimestampRendered {
            parsed: false,
            text: "Invalid DateTime",
            datetime: "soon",
            ..rendered
        };
        assert_eq!(
            timestamp_line(&invalid),
            "[shoji] time #1: unparseable datetime \"soon\""
        );
    }

    #[test]
    fn summary_counts() {
        let line = summary_line(
            MarkerKind::Time,
            &PassSummary {
                found: 3,
                enhanced: 2,
                skipped: 1,
            },
        );
        assert_eq!(line, "[shoji] time pass: found=3 enhanced=2 skipped=1");
    }
}
