//! # mdplot Core Library
//!
//! A library for turning the text files produced by molecular dynamics
//! analysis tools (GROMACS XVG time series and XPM matrices) into finished,
//! publication-ready comparison figures.
//!
//! ## Architectural Philosophy
//!
//! The library is designed as a pipeline of thin layers, each of which can be
//! used on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`TimeSeries`,
//!   `XpmMatrix`) and the parsers that build them from analysis output files.
//!
//! - **[`analysis`]: The Transforms.** Pure numerical operations applied
//!   between parsing and drawing, such as the Boltzmann inversion that turns
//!   a probability matrix into a free-energy landscape and the percentile
//!   clipping that picks shared color scales.
//!
//! - **[`render`]: The Canvas.** Figure assembly and drawing on `plotters`
//!   backends, together with the themes and colormaps that control
//!   appearance.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties parsing, transforms, and rendering together to produce complete
//!   figures from a validated configuration, reporting per-panel outcomes.

pub mod analysis;
pub mod core;
pub mod progress;
pub mod render;
pub mod workflows;
