// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document contract for platform integrations.
//!
//! The enhancement passes never touch a concrete DOM. They operate on a
//! [`Document`], which the web backend implements over `web-sys` and
//! [`MemoryDocument`](crate::memory::MemoryDocument) implements over an
//! in-memory node arena.
//!
//! A `Document` is a cheap, cloneable handle: the facade pass moves a clone
//! into every activation listener, and the listener mutates the document
//! long after the ready pass has returned.

use crate::error::{DomError, EnhanceError};
use crate::trace::FacadeActivated;

/// Listener run when a facade is activated.
///
/// Returns the activation record on success. Errors are reported by the
/// document implementation, since nothing else is on the stack when a click
/// arrives.
pub type ActivationHandler = Box<dyn FnOnce() -> Result<FacadeActivated, EnhanceError>>;

/// The subset of the DOM the enhancement passes use.
pub trait Document: Clone + 'static {
    /// Handle to an element of this document.
    type Element: Clone + 'static;

    /// Returns every element matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Fails when the selector is not supported.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, DomError>;

    /// Returns the value of attribute `name`, if present.
    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Sets attribute `name` to `value`.
    ///
    /// # Errors
    ///
    /// Fails when `name` is not a valid attribute name.
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str)
    -> Result<(), DomError>;

    /// Replaces all children of `element` with a single text node.
    fn set_text_content(&self, element: &Self::Element, text: &str);

    /// Sets an inline style property, e.g. `width: 560px`.
    ///
    /// # Errors
    ///
    /// Fails when the element has no inline style.
    fn set_style_property(
        &self,
        element: &Self::Element,
        property: &str,
        value: &str,
    ) -> Result<(), DomError>;

    /// Creates a detached element.
    ///
    /// # Errors
    ///
    /// Fails when `tag` is not a valid element name.
    fn create_element(&self, tag: &str) -> Result<Self::Element, DomError>;

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails when the insertion is not allowed.
    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), DomError>;

    /// Puts `replacement` where `old` is in its parent's children, detaching
    /// `old` together with its subtree.
    ///
    /// # Errors
    ///
    /// Fails when `old` has no parent.
    fn replace_with(&self, old: &Self::Element, replacement: &Self::Element)
    -> Result<(), DomError>;

    /// Registers `handler` for the first click on `element`.
    ///
    /// The handler runs at most once, in the capture phase, so it sees the
    /// click before any child of `element` does.
    ///
    /// # Errors
    ///
    /// Fails when the listener cannot be registered.
    fn add_activation_listener(
        &self,
        element: &Self::Element,
        handler: ActivationHandler,
    ) -> Result<(), DomError>;
}
