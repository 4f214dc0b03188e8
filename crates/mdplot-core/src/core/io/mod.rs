//! Provides input functionality for GROMACS analysis file formats.
//!
//! This module contains readers for the text formats produced by the GROMACS
//! analysis tools: XPM color-indexed matrices (`gmx sham`, `gmx covar`) and
//! XVG time series (`gmx rms`, `gmx rmsf`, `gmx gyrate`, `gmx anaeig`). It
//! provides a unified trait-based interface for file reading; the parsers
//! recover numeric data from what are nominally image and plotting files.

pub mod traits;
pub mod xpm;
pub mod xvg;
