// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A blog page with relative time stamps and click-to-load video facades.
//!
//! Build with: `wasm-pack build --target web demos/blog_page`
//! Then serve `demos/blog_page/` and open `index.html`.

use shoji_core::EnhanceConfig;
use wasm_bindgen::prelude::*;

/// Entry point for the blog page demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    shoji_backend_web::install(EnhanceConfig::web())
}
