// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for shoji.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`WebDocument`]: [`Document`](shoji_core::dom::Document) over `web-sys`
//! - [`ConsoleSink`]: trace output to the browser console
//! - [`install`]: runs both enhancement passes once the page is ready
//!
//! # Crate features
//!
//! - `console-trace` (disabled by default): Logs pass progress and skipped
//!   markers through [`ConsoleSink`].

mod console;
mod document;

pub use console::ConsoleSink;
pub use document::WebDocument;

use chrono::{DateTime, Utc};
use shoji_core::EnhanceConfig;
use shoji_core::enhance::{Clock, enhance_page};
use shoji_core::humanize::LocalZone;
use shoji_core::trace::{MarkerKind, Tracer};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::Event;

/// Returns the current time from the browser clock.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Returns the browser clock as a [`Clock`].
///
/// Date-times written without an offset resolve in the browser's time zone,
/// each with the offset in force on its own date.
#[must_use]
pub fn clock() -> Clock {
    Clock {
        now: now(),
        zone: LocalZone::System,
    }
}

/// Enhances the page once its DOM is ready.
///
/// Registers a `DOMContentLoaded` listener, or runs immediately when the
/// document has already finished parsing, which is the usual case for a
/// WebAssembly module.
///
/// # Errors
///
/// Fails when there is no `document` or the listener cannot be registered.
pub fn install(config: EnhanceConfig) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let page = WebDocument::new(document.clone());

    if document.ready_state() != "loading" {
        run(&page, &config);
        return Ok(());
    }

    let callback = Closure::once_into_js(move |_event: Event| run(&page, &config));
    document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
}

/// Runs both passes over `page` with the browser clock.
pub fn run(page: &WebDocument, config: &EnhanceConfig) {
    let mut sink = ConsoleSink;
    let mut tracer = Tracer::new(&mut sink);
    let report = enhance_page(page, config, &clock(), &mut tracer);
    if let Err(err) = &report.time {
        console::pass_failed(MarkerKind::Time, err);
    }
    if let Err(err) = &report.facade {
        console::pass_failed(MarkerKind::Facade, err);
    }
}
