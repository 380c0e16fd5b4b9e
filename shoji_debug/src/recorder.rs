// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps an owned
//! [`RecordedEvent`] for every event it receives, in arrival order.

use shoji_core::error::EnhanceError;
use shoji_core::trace::{
    AttributeIgnored, FacadeActivated, FacadePrepared, MarkerKind, MarkerSkipped, PassSummary,
    SkipReason, TimestampRendered, TraceSink,
};

/// An owned copy of one trace event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A time marker's text was replaced.
    TimestampRendered {
        /// Marker position.
        index: usize,
        /// The text written.
        text: String,
        /// Whether the `datetime` parsed.
        parsed: bool,
    },
    /// A marker was left untouched.
    MarkerSkipped {
        /// Marker kind.
        kind: MarkerKind,
        /// Marker position.
        index: usize,
        /// The rejection message; `None` for an empty `datetime` or an
        /// already built facade.
        error: Option<String>,
    },
    /// A malformed optional attribute was ignored.
    AttributeIgnored {
        /// Marker kind.
        kind: MarkerKind,
        /// Marker position.
        index: usize,
        /// Attribute name.
        attribute: &'static str,
        /// The ignored value.
        value: String,
    },
    /// A facade was built.
    FacadePrepared(FacadePrepared),
    /// A facade was replaced by its player.
    FacadeActivated(FacadeActivated),
    /// An activation failed.
    ActivationFailed(String),
    /// A pass finished.
    PassSummary(MarkerKind, PassSummary),
}

/// A [`TraceSink`] that records every event.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Returns the summary of the last pass over `kind`, if any.
    #[must_use]
    pub fn summary(&self, kind: MarkerKind) -> Option<PassSummary> {
        self.events.iter().rev().find_map(|event| match event {
            RecordedEvent::PassSummary(k, s) if *k == kind => Some(*s),
            _ => None,
        })
    }
}

impl TraceSink for RecorderSink {
    fn on_timestamp_rendered(&mut self, e: &TimestampRendered<'_>) {
        self.events.push(RecordedEvent::TimestampRendered {
            index: e.index,
            text: e.text.to_owned(),
            parsed: e.parsed,
        });
    }

    fn on_marker_skipped(&mut self, e: &MarkerSkipped<'_>) {
        let error = match e.reason {
            SkipReason::EmptyDatetime | SkipReason::AlreadyPrepared => None,
            SkipReason::Rejected(err) => Some(err.to_string()),
        };
        self.events.push(RecordedEvent::MarkerSkipped {
            kind: e.kind,
            index: e.index,
            error,
        });
    }

    fn on_attribute_ignored(&mut self, e: &AttributeIgnored<'_>) {
        self.events.push(RecordedEvent::AttributeIgnored {
            kind: e.kind,
            index: e.index,
            attribute: e.attribute,
            value: e.value.to_owned(),
        });
    }

    fn on_facade_prepared(&mut self, e: &FacadePrepared) {
        self.events.push(RecordedEvent::FacadePrepared(*e));
    }

    fn on_facade_activated(&mut self, e: &FacadeActivated) {
        self.events.push(RecordedEvent::FacadeActivated(e.clone()));
    }

    fn on_activation_failed(&mut self, error: &EnhanceError) {
        self.events.push(RecordedEvent::ActivationFailed(error.to_string()));
    }

    fn on_pass_summary(&mut self, kind: MarkerKind, summary: &PassSummary) {
        self.events.push(RecordedEvent::PassSummary(kind, *summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone as _, Utc};
    use shoji_core::enhance::{Clock, humanize_timestamps, install_facades};
    use shoji_core::humanize::LocalZone;
    use shoji_core::memory::MemoryDocument;
    use shoji_core::trace::Tracer;
    use shoji_core::{FacadeConfig, TimeConfig};

    #[test]
    fn records_skips_with_their_reason() {
        let doc = MemoryDocument::new();
        doc.append_new(doc.body(), "div", &[("class", "facade"), ("data-width", "x")])
            .unwrap();
        doc.append_new(doc.body(), "div", &[("class", "facade"), ("data-width", "8")])
            .unwrap();

        let mut sink = RecorderSink::new();
        install_facades(&doc, &FacadeConfig::web(), &mut Tracer::new(&mut sink)).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            RecordedEvent::MarkerSkipped {
                kind: MarkerKind::Facade,
                index: 0,
                error: Some("data-width is not a pixel count: \"x\"".to_owned()),
            }
        );
        assert!(matches!(
            events[1],
            RecordedEvent::FacadePrepared(FacadePrepared { index: 1, width: 8, .. })
        ));
        assert_eq!(
            sink.summary(MarkerKind::Facade),
            Some(PassSummary {
                found: 2,
                enhanced: 1,
                skipped: 1
            })
        );
        assert_eq!(sink.summary(MarkerKind::Time), None);
    }

    #[test]
    fn records_placeholder_renders() {
        let doc = MemoryDocument::new();
        doc.append_new(doc.body(), "time", &[("datetime", "yesterday")])
            .unwrap();
        doc.append_new(doc.body(), "time", &[]).unwrap();
        let clock = Clock {
            now: Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
            zone: LocalZone::Fixed(FixedOffset::east_opt(0).unwrap()),
        };

        let mut sink = RecorderSink::new();
        humanize_timestamps(&doc, &TimeConfig::web(), &clock, &mut Tracer::new(&mut sink))
            .unwrap();

        assert_eq!(
            sink.into_events(),
            [
                RecordedEvent::TimestampRendered {
                    index: 0,
                    text: "Invalid DateTime".to_owned(),
                    parsed: false,
                },
                RecordedEvent::MarkerSkipped {
                    kind: MarkerKind::Time,
                    index: 1,
                    error: None,
                },
                RecordedEvent::PassSummary(
                    MarkerKind::Time,
                    PassSummary {
                        found: 2,
                        enhanced: 1,
                        skipped: 1
                    }
                ),
            ]
        );
    }

    #[test]
    fn records_ignored_height_and_second_pass_skips() {
        let doc = MemoryDocument::new();
        let attrs = [
            ("class", "facade"),
            ("data-width", "8"),
            ("data-height", "tall"),
        ];
        doc.append_new(doc.body(), "div", &attrs).unwrap();
        let config = FacadeConfig::web();

        let mut sink = RecorderSink::new();
        install_facades(&doc, &config, &mut Tracer::new(&mut sink)).unwrap();
        install_facades(&doc, &config, &mut Tracer::new(&mut sink)).unwrap();

        let events = sink.into_events();
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[0],
            RecordedEvent::AttributeIgnored {
                kind: MarkerKind::Facade,
                index: 0,
                attribute: "data-height",
                value: "tall".to_owned(),
            }
        );
        assert!(matches!(
            events[1],
            RecordedEvent::FacadePrepared(FacadePrepared { height: None, .. })
        ));
        assert_eq!(
            events[3],
            RecordedEvent::MarkerSkipped {
                kind: MarkerKind::Facade,
                index: 0,
                error: None,
            }
        );
    }

    #[test]
    fn records_activation_results() {
        let doc = MemoryDocument::new();
        let good = [
            ("class", "facade"),
            ("data-width", "560"),
            ("data-src", "https://example.com/v"),
        ];
        let good = doc.append_new(doc.body(), "div", &good).unwrap();
        let bad = [("class", "facade"), ("data-width", "560")];
        let bad = doc.append_new(doc.body(), "div", &bad).unwrap();
        install_facades(&doc, &FacadeConfig::web(), &mut Tracer::none()).unwrap();

        let mut sink = RecorderSink::new();
        sink.report_activation(&doc.click(good).unwrap());
        sink.report_activation(&doc.click(bad).unwrap());

        assert_eq!(
            sink.into_events(),
            [
                RecordedEvent::FacadeActivated(FacadeActivated {
                    src: "https://example.com/v?autoplay=1".to_owned(),
                    width: 560,
                    height: None,
                }),
                RecordedEvent::ActivationFailed("facade marker has no data-src".to_owned()),
            ]
        );
    }
}
