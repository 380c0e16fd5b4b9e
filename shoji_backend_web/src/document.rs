// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Document`] over the browser DOM.

use shoji_core::dom::{ActivationHandler, Document};
use shoji_core::error::DomError;
use shoji_core::trace::TraceSink as _;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Element, Event, HtmlElement};

use crate::console::ConsoleSink;

/// A handle to the page's `document`.
///
/// Cloning is cheap: it clones the underlying JS reference.
#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl core::fmt::Debug for WebDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebDocument")
            .field("document", &"Document")
            .finish()
    }
}

impl WebDocument {
    /// Wraps a DOM document.
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Returns the wrapped DOM document.
    #[must_use]
    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }
}

/// Converts a thrown JS value into a [`DomError`].
pub(crate) fn dom_error(value: JsValue) -> DomError {
    match value.as_string() {
        Some(message) => DomError::new(message),
        None => DomError::new(format!("{value:?}")),
    }
}

impl Document for WebDocument {
    type Element = Element;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, DomError> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(dom_error)?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn get_attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), DomError> {
        element.set_attribute(name, value).map_err(dom_error)
    }

    fn set_text_content(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_style_property(
        &self,
        element: &Element,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let element = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| DomError::new("element has no inline style"))?;
        element
            .style()
            .set_property(property, value)
            .map_err(dom_error)
    }

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document.create_element(tag).map_err(dom_error)
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.append_child(child).map(drop).map_err(dom_error)
    }

    fn replace_with(&self, old: &Element, replacement: &Element) -> Result<(), DomError> {
        let parent = old
            .parent_node()
            .ok_or_else(|| DomError::new("node to replace has no parent"))?;
        parent
            .replace_child(replacement, old)
            .map(drop)
            .map_err(dom_error)
    }

    fn add_activation_listener(
        &self,
        element: &Element,
        handler: ActivationHandler,
    ) -> Result<(), DomError> {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        options.set_capture(true);

        // `once` drops the listener after the first click; the closure frees
        // itself when it runs.
        let callback = Closure::once_into_js(move |_event: Event| {
            ConsoleSink.report_activation(&handler());
        });
        element
            .add_event_listener_with_callback_and_add_event_listener_options(
                "click",
                callback.unchecked_ref(),
                &options,
            )
            .map_err(dom_error)
    }
}
