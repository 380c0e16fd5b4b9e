// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-page behavior on an in-memory document.

use chrono::{FixedOffset, TimeZone as _, Utc};
use shoji_core::dom::Document as _;
use shoji_core::enhance::{Clock, enhance_page, humanize_timestamps};
use shoji_core::humanize::LocalZone;
use shoji_core::memory::{MemoryDocument, NodeId};
use shoji_core::trace::{PassSummary, Tracer};
use shoji_core::{EnhanceConfig, EnhanceError, TimeConfig};

fn clock() -> Clock {
    Clock {
        now: Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
        zone: LocalZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap()),
    }
}

fn facade(doc: &MemoryDocument, parent: NodeId, attrs: &[(&str, &str)]) -> NodeId {
    let mut all = vec![("class", "facade")];
    all.extend_from_slice(attrs);
    doc.append_new(parent, "div", &all).unwrap()
}

fn enhance(doc: &MemoryDocument) -> (PassSummary, PassSummary) {
    let report = enhance_page(doc, &EnhanceConfig::web(), &clock(), &mut Tracer::none());
    (report.time.unwrap(), report.facade.unwrap())
}

#[test]
fn youtube_facade_end_to_end() {
    let doc = MemoryDocument::new();
    let article = doc.append_new(doc.body(), "article", &[]).unwrap();
    let before = doc.append_new(article, "p", &[]).unwrap();
    let marker = facade(
        &doc,
        article,
        &[
            ("title", "Demo"),
            ("data-src", "https://youtube.com/embed/X"),
            ("data-thumb", "https://i.ytimg.com/vi/X/hqdefault.jpg"),
            ("data-width", "560"),
            ("data-height", "315"),
        ],
    );
    let after = doc.append_new(article, "p", &[]).unwrap();

    let (_, facades) = enhance(&doc);
    assert_eq!(facades.enhanced, 1);

    let children = doc.children(marker);
    assert_eq!(children.len(), 2);
    let (img, play) = (children[0], children[1]);
    assert_eq!(doc.tag(img).as_deref(), Some("img"));
    assert_eq!(
        doc.attribute_names(img),
        ["loading", "referrerpolicy", "alt", "width", "src"]
    );
    assert_eq!(doc.get_attribute(&img, "alt").as_deref(), Some("Video: Demo"));
    assert_eq!(doc.get_attribute(&img, "width").as_deref(), Some("560"));
    assert_eq!(doc.get_attribute(&img, "height"), None);
    assert_eq!(doc.tag(play).as_deref(), Some("span"));
    assert_eq!(doc.text(play).as_deref(), Some("\u{25b6}"));
    assert_eq!(doc.style(marker, "width").as_deref(), Some("560px"));
    assert_eq!(doc.style(marker, "height").as_deref(), Some("315px"));

    let activated = doc.click(marker).unwrap().unwrap();
    assert_eq!(activated.src, "https://youtube.com/embed/X?autoplay=1");

    let frames = doc.query_selector_all("iframe.player").unwrap();
    assert_eq!(frames.len(), 1);
    let frame = frames[0];
    assert_eq!(doc.children(article), [before, frame, after]);
    assert_eq!(
        doc.outer_html(frame),
        "<iframe class=\"player\" src=\"https://youtube.com/embed/X?autoplay=1\" \
         width=\"560\" height=\"315\" sandbox=\"allow-same-origin allow-scripts\" \
         allow=\"autoplay; clipboard-write; encrypted-media; picture-in-picture\"></iframe>"
    );
    assert!(!doc.is_connected(marker));
    assert!(doc.query_selector_all("div.facade").unwrap().is_empty());

    // Later clicks find no listener and change nothing.
    assert!(doc.click(marker).is_none());
    assert_eq!(doc.query_selector_all("iframe").unwrap(), [frame]);
}

#[test]
fn bad_marker_does_not_stop_the_others() {
    let doc = MemoryDocument::new();
    let good = facade(
        &doc,
        doc.body(),
        &[("data-width", "320"), ("data-src", "https://a.example/v")],
    );
    let bad = facade(&doc, doc.body(), &[("data-src", "https://b.example/v")]);
    let junk = facade(&doc, doc.body(), &[("data-width", "wide")]);
    let last = facade(
        &doc,
        doc.body(),
        &[
            ("data-width", "640"),
            ("data-thumb", "https://i.vimeocdn.com/video/1_640x360"),
            ("data-height", "360"),
        ],
    );

    let (_, facades) = enhance(&doc);
    assert_eq!(
        facades,
        PassSummary {
            found: 4,
            enhanced: 2,
            skipped: 2
        }
    );

    // No thumb: only the play glyph.
    assert_eq!(doc.children(good).len(), 1);
    assert_eq!(doc.style(good, "height"), None);

    for untouched in [bad, junk] {
        assert!(doc.children(untouched).is_empty());
        assert_eq!(doc.style(untouched, "width"), None);
        assert!(!doc.has_listener(untouched));
    }

    // Not a letterboxing host, so the thumbnail keeps its height.
    let img = doc.children(last)[0];
    assert_eq!(doc.get_attribute(&img, "height").as_deref(), Some("360"));
}

#[test]
fn activation_without_source_keeps_the_facade() {
    let doc = MemoryDocument::new();
    let marker = facade(&doc, doc.body(), &[("data-width", "100")]);
    enhance(&doc);

    assert!(matches!(doc.click(marker), Some(Err(EnhanceError::MissingSource))));
    assert!(doc.is_connected(marker));
    assert!(doc.query_selector_all("iframe").unwrap().is_empty());
}

#[test]
fn activation_reads_the_marker_at_click_time() {
    let doc = MemoryDocument::new();
    let first = "https://example.com/a?autoplay=0&t=5";
    let second = "https://example.com/b?t=5&autoplay=0";
    let marker = facade(&doc, doc.body(), &[("data-width", "100"), ("data-src", first)]);
    enhance(&doc);
    doc.set_attribute(&marker, "data-src", second).unwrap();

    let activated = doc.click(marker).unwrap().unwrap();
    assert_eq!(activated.src, "https://example.com/b?t=5&autoplay=1");
    assert_eq!(activated.height, None);
}

#[test]
fn timestamps_and_facades_on_one_page() {
    let doc = MemoryDocument::new();
    let posted = doc
        .append_new(doc.body(), "time", &[("datetime", "2026-10-19T11:00:00Z")])
        .unwrap();
    let naive = doc
        .append_new(doc.body(), "time", &[("datetime", "2026-10-17T14:00:00")])
        .unwrap();
    let upcoming = doc
        .append_new(doc.body(), "time", &[("datetime", "2027-01-01")])
        .unwrap();
    let blank = doc.append_new(doc.body(), "time", &[("datetime", "")]).unwrap();
    doc.set_text_content(&blank, "19 October");
    facade(&doc, doc.body(), &[("data-width", "560")]);

    let (times, facades) = enhance(&doc);
    assert_eq!(
        times,
        PassSummary {
            found: 4,
            enhanced: 3,
            skipped: 1
        }
    );
    assert_eq!(facades.enhanced, 1);

    assert_eq!(doc.text(posted).as_deref(), Some("1 hour ago"));
    // 14:00 at +02:00 is 12:00 UTC, exactly two days earlier.
    assert_eq!(doc.text(naive).as_deref(), Some("2 days ago"));
    assert_eq!(doc.text(upcoming).as_deref(), Some("in 2 months"));
    assert_eq!(doc.text(blank).as_deref(), Some("19 October"));

    // A second time pass with the same clock writes the same text.
    humanize_timestamps(&doc, &TimeConfig::web(), &clock(), &mut Tracer::none()).unwrap();
    assert_eq!(doc.text(posted).as_deref(), Some("1 hour ago"));
    assert_eq!(doc.text(naive).as_deref(), Some("2 days ago"));
}

#[test]
fn running_the_page_twice_builds_each_facade_once() {
    let doc = MemoryDocument::new();
    let marker = facade(
        &doc,
        doc.body(),
        &[
            ("data-width", "560"),
            ("data-thumb", "https://i.ytimg.com/vi/X/hqdefault.jpg"),
            ("data-src", "https://youtube.com/embed/X"),
        ],
    );

    enhance(&doc);
    let (_, again) = enhance(&doc);
    assert_eq!(
        again,
        PassSummary {
            found: 1,
            enhanced: 0,
            skipped: 1
        }
    );
    assert_eq!(doc.children(marker).len(), 2);
    assert_eq!(doc.query_selector_all("img").unwrap().len(), 1);

    // The listener from the first pass still activates the player.
    assert!(doc.click(marker).unwrap().is_ok());
    assert_eq!(doc.query_selector_all("iframe").unwrap().len(), 1);
}

#[test]
fn empty_height_is_treated_as_absent() {
    let doc = MemoryDocument::new();
    let marker = facade(
        &doc,
        doc.body(),
        &[
            ("data-width", "400"),
            ("data-height", ""),
            ("data-thumb", "https://example.com/t.jpg"),
            ("data-src", "https://example.com/v"),
        ],
    );

    let (_, facades) = enhance(&doc);
    assert_eq!(facades.enhanced, 1);
    let img = doc.children(marker)[0];
    assert_eq!(doc.get_attribute(&img, "height"), None);
    assert_eq!(doc.style(marker, "height"), None);

    let activated = doc.click(marker).unwrap().unwrap();
    assert_eq!(activated.height, None);
    let frame = doc.query_selector_all("iframe").unwrap()[0];
    assert_eq!(doc.get_attribute(&frame, "height"), None);
}
