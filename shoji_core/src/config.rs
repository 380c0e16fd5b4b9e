// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for the enhancement passes.
//!
//! Every field is a `'static` string or slice so configurations are `Copy`
//! and can be moved into click listeners that outlive the ready pass.

/// Configuration for [`humanize_timestamps`](crate::enhance::humanize_timestamps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeConfig {
    /// Selector for time markers.
    pub selector: &'static str,
    /// Attribute holding the machine-readable instant.
    pub datetime_attribute: &'static str,
    /// Text written when the attribute does not parse as an ISO-8601 instant.
    pub invalid_placeholder: &'static str,
}

impl TimeConfig {
    /// Default configuration for `<time datetime="…">` elements.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            selector: "time",
            datetime_attribute: "datetime",
            invalid_placeholder: "Invalid DateTime",
        }
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// Configuration for [`install_facades`](crate::enhance::install_facades).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacadeConfig {
    /// Selector for facade markers.
    pub selector: &'static str,
    /// Substrings identifying thumbnail hosts that pad 16:9 images with black
    /// bars. Thumbnails from these hosts never get an explicit height.
    pub letterbox_patterns: &'static [&'static str],
    /// Text of the play affordance.
    pub play_glyph: &'static str,
    /// Prefix of the thumbnail alt text; the marker title follows it.
    pub alt_prefix: &'static str,
    /// Class given to the player frame so page styles can target it.
    pub player_class: &'static str,
    /// Query parameter telling the embedded player to start playing.
    pub autoplay_param: &'static str,
    /// Value written for [`autoplay_param`](Self::autoplay_param).
    pub autoplay_value: &'static str,
    /// `sandbox` policy of the player frame.
    pub sandbox: &'static str,
    /// `allow` (permissions) policy of the player frame.
    pub allow: &'static str,
    /// Attribute set on a marker once its facade is built; markers carrying
    /// it are skipped by later passes.
    pub prepared_attribute: &'static str,
}

impl FacadeConfig {
    /// Default configuration for `div.facade` markers.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            selector: "div.facade",
            letterbox_patterns: &["/i.ytimg.com/"],
            play_glyph: "\u{25b6}",
            alt_prefix: "Video: ",
            player_class: "player",
            autoplay_param: "autoplay",
            autoplay_value: "1",
            sandbox: "allow-same-origin allow-scripts",
            allow: "autoplay; clipboard-write; encrypted-media; picture-in-picture",
            prepared_attribute: "data-facade-ready",
        }
    }
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// Configuration for a whole [`enhance_page`](crate::enhance::enhance_page) run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnhanceConfig {
    /// Time marker settings.
    pub time: TimeConfig,
    /// Facade marker settings.
    pub facade: FacadeConfig,
}

impl EnhanceConfig {
    /// Default configuration for pages using the standard markup.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            time: TimeConfig::web(),
            facade: FacadeConfig::web(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_web_preset() {
        assert_eq!(EnhanceConfig::default(), EnhanceConfig::web());
    }

    #[test]
    fn web_preset_policies() {
        let config = FacadeConfig::web();
        assert_eq!(config.sandbox, "allow-same-origin allow-scripts");
        assert!(!config.sandbox.contains("allow-forms"));
        assert!(!config.sandbox.contains("allow-popups"));
        assert!(!config.sandbox.contains("allow-top-navigation"));
        assert_eq!(config.play_glyph, "▶");
        assert_eq!(config.letterbox_patterns, &["/i.ytimg.com/"]);
    }
}
