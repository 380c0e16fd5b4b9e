// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Server-side markup for the elements the enhancement passes consume.
//!
//! Pages are expected to contain `<time datetime>` and `div.facade` markers
//! before the passes run. This module renders them, including the provider
//! adjustments applied to oEmbed data before a facade is written out.

use chrono::{DateTime, FixedOffset};

use crate::facade::{ATTR_HEIGHT, ATTR_SRC, ATTR_THUMB, ATTR_TITLE, ATTR_WIDTH};

/// Narrowest facade written for YouTube embeds.
pub const YOUTUBE_MIN_WIDTH: u32 = 560;

/// Elements that have no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Escapes text for use inside a double-quoted attribute or element body.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders an empty element with the given attributes.
pub fn render_element<'a>(
    tag: &str,
    attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut out = format!("<{tag}");
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
    out.push('>');
    if !VOID_ELEMENTS.contains(&tag) {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    out
}

/// Renders a `<time>` element whose text the time pass will replace.
#[must_use]
pub fn time_element(instant: DateTime<FixedOffset>, text: &str) -> String {
    format!(
        "<time datetime=\"{}\">{}</time>",
        escape(&instant.to_rfc3339()),
        escape(text)
    )
}

/// The attributes of a facade marker, any of which may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacadeMarkup {
    /// Player URL.
    pub src: Option<String>,
    /// Video title.
    pub title: Option<String>,
    /// Thumbnail URL.
    pub thumb: Option<String>,
    /// Width in pixels.
    pub width: Option<u32>,
    /// Height in pixels.
    pub height: Option<u32>,
}

impl FacadeMarkup {
    /// Facade for a YouTube embed.
    ///
    /// Embeds narrower than [`YOUTUBE_MIN_WIDTH`] are scaled up to it,
    /// keeping their aspect ratio.
    #[must_use]
    pub fn youtube(
        src: String,
        title: Option<String>,
        thumb: Option<String>,
        width: u32,
        height: u32,
    ) -> Self {
        let (width, height) = if width > 0 && width < YOUTUBE_MIN_WIDTH {
            let scaled = u64::from(height) * u64::from(YOUTUBE_MIN_WIDTH) / u64::from(width);
            (YOUTUBE_MIN_WIDTH, u32::try_from(scaled).unwrap_or(u32::MAX))
        } else {
            (width, height)
        };
        Self {
            src: Some(src),
            title,
            thumb,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Facade for a Vimeo embed.
    ///
    /// Vimeo thumbnail URLs end in `<id>_<w>x<h>`; the size is rewritten to
    /// the embed's own so the image matches the player.
    #[must_use]
    pub fn vimeo(
        src: String,
        title: Option<String>,
        thumb: Option<String>,
        width: u32,
        height: u32,
    ) -> Self {
        let thumb = thumb.map(|t| resize_vimeo_thumb(&t, width, height).unwrap_or(t));
        Self {
            src: Some(src),
            title,
            thumb,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Renders the marker as a `div.facade` element.
    #[must_use]
    pub fn render(&self) -> String {
        let width = self.width.map(|w| w.to_string());
        let height = self.height.map(|h| h.to_string());
        let attrs = [
            ("class", Some("facade")),
            (ATTR_TITLE, self.title.as_deref()),
            (ATTR_SRC, self.src.as_deref()),
            (ATTR_THUMB, self.thumb.as_deref()),
            (ATTR_WIDTH, width.as_deref()),
            (ATTR_HEIGHT, height.as_deref()),
        ];
        render_element(
            "div",
            attrs
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        )
    }
}

fn resize_vimeo_thumb(thumb: &str, width: u32, height: u32) -> Option<String> {
    let (prefix, size) = thumb.rsplit_once('_')?;
    let (w, h) = size.split_once('x')?;
    let (_, id) = prefix.rsplit_once('/')?;
    if !(is_digits(w) && is_digits(h) && is_digits(id)) {
        return None;
    }
    Some(format!("{prefix}_{width}x{height}"))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_facade() {
        let markup = FacadeMarkup {
            src: Some("http://example.com/".to_owned()),
            ..FacadeMarkup::default()
        };
        assert_eq!(
            markup.render(),
            r#"<div class="facade" data-src="http://example.com/"></div>"#
        );
    }

    #[test]
    fn full_facade() {
        let markup = FacadeMarkup {
            src: Some("http://example.com/".to_owned()),
            title: Some("Foo".to_owned()),
            thumb: Some("http://example.com/thumb.jpg".to_owned()),
            width: Some(8),
            height: Some(8),
        };
        assert_eq!(
            markup.render(),
            r#"<div class="facade" title="Foo" data-src="http://example.com/" data-thumb="http://example.com/thumb.jpg" data-width="8" data-height="8"></div>"#
        );
    }

    #[test]
    fn attribute_values_are_escaped() {
        let markup = FacadeMarkup {
            title: Some(r#"Tom & "Jerry's" <3"#.to_owned()),
            ..FacadeMarkup::default()
        };
        assert_eq!(
            markup.render(),
            r#"<div class="facade" title="Tom &amp; &quot;Jerry&#x27;s&quot; &lt;3"></div>"#
        );
    }

    #[test]
    fn small_youtube_embeds_scale_up() {
        let src = "https://example.com/video.mpg".to_owned();
        let square = FacadeMarkup::youtube(src.clone(), None, None, 20, 20);
        assert_eq!((square.width, square.height), (Some(560), Some(560)));
        let wide = FacadeMarkup::youtube(src.clone(), None, None, 20, 10);
        assert_eq!((wide.width, wide.height), (Some(560), Some(280)));
        let large = FacadeMarkup::youtube(src, None, None, 600, 300);
        assert_eq!((large.width, large.height), (Some(600), Some(300)));
    }

    #[test]
    fn vimeo_thumbnails_match_the_embed() {
        let markup = FacadeMarkup::vimeo(
            "https://player.vimeo.com/video/76979871".to_owned(),
            Some("Clip".to_owned()),
            Some("https://i.vimeocdn.com/video/452001751_295x166".to_owned()),
            640,
            360,
        );
        assert_eq!(
            markup.thumb.as_deref(),
            Some("https://i.vimeocdn.com/video/452001751_640x360")
        );

        let odd = FacadeMarkup::vimeo(
            "https://player.vimeo.com/video/1".to_owned(),
            None,
            Some("https://i.vimeocdn.com/video/latest.jpg".to_owned()),
            640,
            360,
        );
        assert_eq!(
            odd.thumb.as_deref(),
            Some("https://i.vimeocdn.com/video/latest.jpg")
        );
    }

    #[test]
    fn void_elements_are_not_closed() {
        assert_eq!(render_element("img", [("src", "a.png")]), r#"<img src="a.png">"#);
    }

    #[test]
    fn time_markup() {
        let instant = DateTime::parse_from_rfc3339("2024-05-01T10:30:00+00:00").unwrap();
        assert_eq!(
            time_element(instant, "1 May 2024"),
            r#"<time datetime="2024-05-01T10:30:00+00:00">1 May 2024</time>"#
        );
    }
}
