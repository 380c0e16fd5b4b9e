// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Facade markers and the layout planned for them.
//!
//! A facade marker is a placeholder element configured through attributes:
//!
//! | attribute     | meaning                                  |
//! |---------------|------------------------------------------|
//! | `data-src`    | player URL, needed only on activation    |
//! | `data-width`  | width in pixels, required                |
//! | `data-height` | height in pixels, optional               |
//! | `data-thumb`  | thumbnail URL, optional                  |
//! | `title`       | video title, used for the thumbnail alt  |
//!
//! A `data-height` that is not a pixel count is ignored rather than
//! rejected; the facade keeps the thumbnail's intrinsic aspect ratio.
//!
//! [`FacadeMarker::layout`] turns a marker into a [`FacadeLayout`]: what to
//! append to the marker and how to size it.

use crate::config::FacadeConfig;
use crate::error::EnhanceError;

/// Attribute holding the player URL.
pub const ATTR_SRC: &str = "data-src";
/// Attribute holding the width in pixels.
pub const ATTR_WIDTH: &str = "data-width";
/// Attribute holding the height in pixels.
pub const ATTR_HEIGHT: &str = "data-height";
/// Attribute holding the thumbnail URL.
pub const ATTR_THUMB: &str = "data-thumb";
/// Attribute holding the video title.
pub const ATTR_TITLE: &str = "title";

/// The configuration carried by one facade marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacadeMarker {
    /// Player URL, if present.
    pub src: Option<String>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels, if present and well-formed.
    pub height: Option<u32>,
    /// A `data-height` value that was present but not a pixel count.
    pub ignored_height: Option<String>,
    /// Thumbnail URL, if present.
    pub thumb: Option<String>,
    /// Video title; empty when the marker has none.
    pub title: String,
}

impl FacadeMarker {
    /// Reads a marker through an attribute lookup.
    ///
    /// # Errors
    ///
    /// [`EnhanceError::MissingWidth`] when `data-width` is absent, and
    /// [`EnhanceError::InvalidDimension`] when it is not a non-negative
    /// integer. A malformed `data-height` is treated as absent and kept in
    /// [`ignored_height`](Self::ignored_height).
    pub fn read(mut attribute: impl FnMut(&str) -> Option<String>) -> Result<Self, EnhanceError> {
        let width = attribute(ATTR_WIDTH).ok_or(EnhanceError::MissingWidth)?;
        let width = parse_dimension(ATTR_WIDTH, &width)?;
        let raw_height = attribute(ATTR_HEIGHT);
        let height = raw_height
            .as_deref()
            .and_then(|value| parse_dimension(ATTR_HEIGHT, value).ok());
        Ok(Self {
            src: attribute(ATTR_SRC),
            width,
            height,
            ignored_height: raw_height.filter(|_| height.is_none()),
            thumb: attribute(ATTR_THUMB),
            title: attribute(ATTR_TITLE).unwrap_or_default(),
        })
    }

    /// Plans the facade for this marker.
    #[must_use]
    pub fn layout(&self, config: &FacadeConfig) -> FacadeLayout {
        let thumbnail = self.thumb.as_ref().map(|src| {
            let letterboxed = is_letterboxed(src, config);
            ThumbnailSpec {
                alt: format!("{}{}", config.alt_prefix, self.title),
                width: self.width,
                height: if letterboxed { None } else { self.height },
                src: src.clone(),
                letterboxed,
            }
        });
        FacadeLayout {
            thumbnail,
            play_glyph: config.play_glyph,
            inline_width: px(self.width),
            inline_height: self.height.map(px),
        }
    }
}

fn parse_dimension(attribute: &'static str, value: &str) -> Result<u32, EnhanceError> {
    value
        .trim()
        .parse()
        .map_err(|_| EnhanceError::InvalidDimension {
            attribute,
            value: value.to_owned(),
        })
}

fn px(value: u32) -> String {
    format!("{value}px")
}

/// Returns `true` if `thumb_url` comes from a host that letterboxes its
/// thumbnails.
#[must_use]
pub fn is_letterboxed(thumb_url: &str, config: &FacadeConfig) -> bool {
    config
        .letterbox_patterns
        .iter()
        .any(|pattern| thumb_url.contains(pattern))
}

/// The thumbnail image of a facade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailSpec {
    /// Alt text, the configured prefix followed by the marker title.
    pub alt: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels; `None` for letterboxed hosts or markers without a
    /// height, so the image keeps its intrinsic aspect ratio.
    pub height: Option<u32>,
    /// Image URL.
    pub src: String,
    /// Whether the URL matched a letterbox pattern.
    pub letterboxed: bool,
}

impl ThumbnailSpec {
    /// Returns the image attributes in the order they must be applied.
    ///
    /// `loading` and `referrerpolicy` come first and `src` comes last: the
    /// browser starts fetching as soon as `src` is assigned, and a fetch that
    /// starts before the element is fully configured gets aborted and
    /// retried.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("loading", "lazy".to_owned()),
            ("referrerpolicy", "no-referrer".to_owned()),
            ("alt", self.alt.clone()),
            ("width", self.width.to_string()),
        ];
        if let Some(height) = self.height {
            attrs.push(("height", height.to_string()));
        }
        attrs.push(("src", self.src.clone()));
        attrs
    }
}

/// Everything the enhancement pass does to one marker before activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacadeLayout {
    /// Thumbnail image, when the marker has a `data-thumb`.
    pub thumbnail: Option<ThumbnailSpec>,
    /// Text of the play affordance.
    pub play_glyph: &'static str,
    /// Inline CSS width, e.g. `560px`.
    pub inline_width: String,
    /// Inline CSS height, when the marker has a `data-height`.
    pub inline_height: Option<String>,
}
