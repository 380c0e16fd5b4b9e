// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and recording of shoji diagnostics.
//!
//! This crate provides [`TraceSink`](shoji_core::trace::TraceSink)
//! implementations for development and pre-rendering:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: owned copies of every event, for assertions
//!   and post-run inspection.

pub mod pretty;
pub mod recorder;
