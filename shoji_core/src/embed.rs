// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The embedded player that replaces an activated facade.

use url::Url;

use crate::config::FacadeConfig;
use crate::error::EnhanceError;
use crate::facade::FacadeMarker;
use crate::markup;

/// The `<iframe>` built when a facade is activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedFrame {
    /// Player URL with the autoplay parameter applied.
    pub src: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels, when the marker has one.
    pub height: Option<u32>,
    /// Class identifying the element as a player.
    pub class: &'static str,
    /// `sandbox` policy.
    pub sandbox: &'static str,
    /// `allow` (permissions) policy.
    pub allow: &'static str,
}

impl EmbedFrame {
    /// Tag name of the player element.
    pub const TAG: &'static str = "iframe";

    /// Returns the frame attributes in application order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("class", self.class.to_owned()),
            ("src", self.src.clone()),
            ("width", self.width.to_string()),
        ];
        if let Some(height) = self.height {
            attrs.push(("height", height.to_string()));
        }
        attrs.push(("sandbox", self.sandbox.to_owned()));
        attrs.push(("allow", self.allow.to_owned()));
        attrs
    }

    /// Serializes the frame as HTML, e.g. for a `<noscript>` fallback.
    #[must_use]
    pub fn to_html(&self) -> String {
        let attrs = self.attributes();
        markup::render_element(
            Self::TAG,
            attrs.iter().map(|(name, value)| (*name, value.as_str())),
        )
    }
}

impl FacadeMarker {
    /// Builds the player frame for this marker.
    ///
    /// # Errors
    ///
    /// [`EnhanceError::MissingSource`] without a `data-src`,
    /// [`EnhanceError::InvalidSource`] when it does not parse, and
    /// [`EnhanceError::UnsupportedScheme`] for anything but `http`/`https`.
    pub fn embed_frame(&self, config: &FacadeConfig) -> Result<EmbedFrame, EnhanceError> {
        let src = self.src.as_deref().ok_or(EnhanceError::MissingSource)?;
        let mut url = Url::parse(src)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EnhanceError::UnsupportedScheme(url.scheme().to_owned()));
        }
        set_query_param(&mut url, config.autoplay_param, config.autoplay_value);
        Ok(EmbedFrame {
            src: url.into(),
            width: self.width,
            height: self.height,
            class: config.player_class,
            sandbox: config.sandbox,
            allow: config.allow,
        })
    }
}

/// Sets `key` to `value` in the query of `url`.
///
/// The first existing `key` pair is overwritten in place and any later ones
/// are removed; without one, the pair is appended. Other pairs keep their
/// order. This matches `URLSearchParams.set`.
pub fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let mut placed = false;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter_map(|(k, v)| {
            if k != key {
                Some((k, v))
            } else if placed {
                None
            } else {
                placed = true;
                Some((k, value.to_owned()))
            }
        })
        .collect();

    let mut query = url.query_pairs_mut();
    query.clear().extend_pairs(pairs);
    if !placed {
        query.append_pair(key, value);
    }
}
