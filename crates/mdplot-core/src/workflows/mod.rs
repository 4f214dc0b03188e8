//! # Workflows Module
//!
//! This module provides the high-level pipelines that turn analysis files on
//! disk into finished figures.
//!
//! ## Overview
//!
//! Workflows are the top-level entry points for users of the library. Each
//! run takes a validated [`config::FigureConfig`], loads and transforms the
//! panel inputs it names, assembles the figure, and writes one file per
//! requested output format. Failures are contained at panel granularity:
//! a missing or unparseable input degrades its own panel instead of
//! aborting the figure.
//!
//! ## Architecture
//!
//! The module is organized around three pieces:
//!
//! - **Configuration** ([`config`]) - Figure descriptions with builder-based
//!   validation of panels, formats, and transform parameters.
//! - **Execution** ([`figure`]) - The rendering pipeline itself, from input
//!   loading through file output, with progress reporting.
//! - **Reporting** ([`report`]) - Per-panel outcome summaries recording what
//!   was drawn, what was skipped, and which files were written.

pub mod config;
pub mod figure;
pub mod report;
