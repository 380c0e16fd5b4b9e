// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core model and enhancement passes for page time stamps and video facades.
//!
//! `shoji_core` holds everything about the two page behaviors that does not
//! need a browser: parsing and rendering relative times, planning the facade
//! that stands in for an embedded player, building the player itself, and
//! the passes that apply those plans to a document through the
//! [`Document`](dom::Document) trait.
//!
//! # Architecture
//!
//! ```text
//!   page ready (backend)
//!       │
//!       ▼
//!   enhance_page() ──► humanize_timestamps() ──► <time> text rewritten
//!       │
//!       └──────────► install_facades() ──► thumbnail + ▶ + inline size
//!                                               │
//!                         first click ◄─────────┘
//!                              │
//!                              ▼
//!                 FacadeMarker::embed_frame() ──► <iframe class="player">
//! ```
//!
//! **[`humanize`]**: ISO-8601 parsing and English relative-time phrasing.
//!
//! **[`facade`]**: Marker attributes, thumbnail and layout planning.
//!
//! **[`embed`]**: The player frame and the autoplay query parameter.
//!
//! **[`enhance`]**: The page passes, generic over [`Document`](dom::Document).
//!
//! **[`dom`]**: The document trait that backends implement.
//!
//! **[`memory`]**: An in-memory [`Document`](dom::Document) for tests and
//! pre-rendering.
//!
//! **[`markup`]**: Server-side generation of facade markers.
//!
//! **[`config`]**: Selectors, policies and texts used by the passes.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

pub mod config;
pub mod dom;
pub mod embed;
pub mod enhance;
pub mod error;
pub mod facade;
pub mod humanize;
pub mod markup;
pub mod memory;
pub mod trace;

pub use config::{EnhanceConfig, FacadeConfig, TimeConfig};
pub use enhance::{Clock, EnhanceReport, enhance_page};
pub use error::{DomError, EnhanceError};
