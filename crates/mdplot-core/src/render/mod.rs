//! # Figure Rendering
//!
//! Turns prepared panel data into image files. The module is split between
//! figure assembly, which lays panels out on a grid and dispatches each one
//! to the drawing routine for its kind, and the visual vocabulary shared by
//! every panel: themes and colormaps.
//!
//! ## Structure
//!
//! - `figure`: Figure and panel types, output formats, and the entry points
//!   that render to files or raw pixel buffers.
//! - `series_panel`: line charts for time series data with optional legends.
//! - `heatmap_panel`: color-mapped matrix cells with a labelled colorbar.
//! - `placeholder`: panels whose input failed to load.
//! - `theme`: fonts, colors, and the default trace palette, loadable from
//!   TOML.
//! - `colormap`: built-in value-to-color gradients.

pub mod colormap;
pub mod figure;
mod heatmap_panel;
mod placeholder;
mod series_panel;
pub mod theme;
