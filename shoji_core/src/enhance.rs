// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page enhancement passes.
//!
//! Both passes enumerate their markers once, when the page is ready, and
//! process each one independently: a marker that fails is traced and left
//! as it is, and the pass moves on to the next. Only a failed enumeration
//! ends a pass early.
//!
//! ```rust,ignore
//! let clock = Clock { now: Utc::now(), zone: LocalZone::System };
//! let report = enhance_page(&document, &EnhanceConfig::web(), &clock, &mut tracer);
//! ```

use chrono::{DateTime, Utc};

use crate::config::{EnhanceConfig, FacadeConfig, TimeConfig};
use crate::dom::Document;
use crate::embed::EmbedFrame;
use crate::error::{DomError, EnhanceError};
use crate::facade::{ATTR_HEIGHT, FacadeLayout, FacadeMarker};
use crate::humanize::{LocalZone, parse_instant, relative_to};
use crate::trace::{
    AttributeIgnored, FacadeActivated, FacadePrepared, MarkerKind, MarkerSkipped, PassSummary,
    SkipReason, TimestampRendered, Tracer,
};

/// Tag of the play affordance appended to each facade.
const PLAY_TAG: &str = "span";
/// Tag of the thumbnail image appended to each facade.
const THUMB_TAG: &str = "img";

/// The reference point for relative times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clock {
    /// The current instant.
    pub now: DateTime<Utc>,
    /// Zone for date-times written without an offset.
    pub zone: LocalZone,
}

/// Results of both passes of [`enhance_page`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnhanceReport {
    /// Outcome of [`humanize_timestamps`].
    pub time: Result<PassSummary, DomError>,
    /// Outcome of [`install_facades`].
    pub facade: Result<PassSummary, DomError>,
}

/// Runs both passes over `doc`.
///
/// The passes are independent; a failure in one does not stop the other.
pub fn enhance_page<D: Document>(
    doc: &D,
    config: &EnhanceConfig,
    clock: &Clock,
    tracer: &mut Tracer<'_>,
) -> EnhanceReport {
    EnhanceReport {
        time: humanize_timestamps(doc, &config.time, clock, tracer),
        facade: install_facades(doc, &config.facade, tracer),
    }
}

/// Rewrites the text of every time marker as a relative time.
///
/// Markers with an empty or missing `datetime` keep their text. Attributes
/// are never modified, so running the pass again with the same clock gives
/// the same text.
///
/// # Errors
///
/// Fails only when the markers cannot be enumerated.
pub fn humanize_timestamps<D: Document>(
    doc: &D,
    config: &TimeConfig,
    clock: &Clock,
    tracer: &mut Tracer<'_>,
) -> Result<PassSummary, DomError> {
    let markers = doc.query_selector_all(config.selector)?;
    let mut summary = PassSummary {
        found: markers.len(),
        ..PassSummary::default()
    };

    for (index, marker) in markers.iter().enumerate() {
        let datetime = doc
            .get_attribute(marker, config.datetime_attribute)
            .unwrap_or_default();
        if datetime.is_empty() {
            summary.skipped += 1;
            tracer.marker_skipped(&MarkerSkipped {
                kind: MarkerKind::Time,
                index,
                reason: SkipReason::EmptyDatetime,
            });
            continue;
        }

        let instant = parse_instant(&datetime, clock.zone);
        let text = match instant {
            Some(instant) => relative_to(instant, clock.now).to_string(),
            None => config.invalid_placeholder.to_owned(),
        };
        doc.set_text_content(marker, &text);
        summary.enhanced += 1;
        tracer.timestamp_rendered(&TimestampRendered {
            index,
            datetime: &datetime,
            text: &text,
            parsed: instant.is_some(),
        });
    }

    tracer.pass_summary(MarkerKind::Time, &summary);
    Ok(summary)
}

/// Builds and arms a facade for every facade marker.
///
/// Markers already carrying [`FacadeConfig::prepared_attribute`] are skipped,
/// so a second pass over the same page adds nothing.
///
/// # Errors
///
/// Fails only when the markers cannot be enumerated.
pub fn install_facades<D: Document>(
    doc: &D,
    config: &FacadeConfig,
    tracer: &mut Tracer<'_>,
) -> Result<PassSummary, DomError> {
    let markers = doc.query_selector_all(config.selector)?;
    let mut summary = PassSummary {
        found: markers.len(),
        ..PassSummary::default()
    };

    for (index, marker) in markers.iter().enumerate() {
        match prepare_facade(doc, marker, config) {
            Ok((facade, layout)) => {
                summary.enhanced += 1;
                if let Some(value) = &facade.ignored_height {
                    tracer.attribute_ignored(&AttributeIgnored {
                        kind: MarkerKind::Facade,
                        index,
                        attribute: ATTR_HEIGHT,
                        value,
                    });
                }
                tracer.facade_prepared(&FacadePrepared {
                    index,
                    width: facade.width,
                    height: facade.height,
                    has_thumbnail: layout.thumbnail.is_some(),
                    letterboxed: layout.thumbnail.as_ref().is_some_and(|t| t.letterboxed),
                });
            }
            Err(err) => {
                summary.skipped += 1;
                let reason = match &err {
                    EnhanceError::AlreadyPrepared => SkipReason::AlreadyPrepared,
                    err => SkipReason::Rejected(err),
                };
                tracer.marker_skipped(&MarkerSkipped {
                    kind: MarkerKind::Facade,
                    index,
                    reason,
                });
            }
        }
    }

    tracer.pass_summary(MarkerKind::Facade, &summary);
    Ok(summary)
}

/// Builds the facade inside `element` and registers its activation.
///
/// In order: the prepared marker attribute, the thumbnail image (when the
/// marker has a `data-thumb`), the play glyph, the inline size, and the
/// once-only activation listener.
///
/// # Errors
///
/// [`EnhanceError::AlreadyPrepared`] when `element` already carries the
/// prepared attribute. That and marker validation errors leave `element`
/// untouched. A DOM error may leave it partially built.
pub fn prepare_facade<D: Document>(
    doc: &D,
    element: &D::Element,
    config: &FacadeConfig,
) -> Result<(FacadeMarker, FacadeLayout), EnhanceError> {
    if doc.get_attribute(element, config.prepared_attribute).is_some() {
        return Err(EnhanceError::AlreadyPrepared);
    }
    let marker = FacadeMarker::read(|name| doc.get_attribute(element, name))?;
    let layout = marker.layout(config);

    doc.set_attribute(element, config.prepared_attribute, "")?;

    if let Some(thumb) = &layout.thumbnail {
        let img = doc.create_element(THUMB_TAG)?;
        for (name, value) in thumb.attributes() {
            doc.set_attribute(&img, name, &value)?;
        }
        doc.append_child(element, &img)?;
    }

    let play = doc.create_element(PLAY_TAG)?;
    doc.set_text_content(&play, layout.play_glyph);
    doc.append_child(element, &play)?;

    doc.set_style_property(element, "width", &layout.inline_width)?;
    if let Some(height) = &layout.inline_height {
        doc.set_style_property(element, "height", height)?;
    }

    let handle = doc.clone();
    let target = element.clone();
    let config = *config;
    doc.add_activation_listener(
        element,
        Box::new(move || activate_facade(&handle, &target, &config)),
    )?;

    Ok((marker, layout))
}

/// Replaces a facade with its player.
///
/// The marker attributes are read again at this point, so changes made
/// after the ready pass are honored.
///
/// # Errors
///
/// Fails without touching the document when the marker has no usable
/// `data-src`; fails with [`EnhanceError::Dom`] when the swap is rejected.
pub fn activate_facade<D: Document>(
    doc: &D,
    element: &D::Element,
    config: &FacadeConfig,
) -> Result<FacadeActivated, EnhanceError> {
    let marker = FacadeMarker::read(|name| doc.get_attribute(element, name))?;
    let frame = marker.embed_frame(config)?;

    let player = doc.create_element(EmbedFrame::TAG)?;
    for (name, value) in frame.attributes() {
        doc.set_attribute(&player, name, &value)?;
    }
    doc.replace_with(element, &player)?;

    Ok(FacadeActivated {
        src: frame.src,
        width: frame.width,
        height: frame.height,
    })
}
