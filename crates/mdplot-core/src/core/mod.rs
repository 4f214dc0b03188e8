//! # Core Module
//!
//! This module provides the data models and file readers that everything
//! else in the library builds on.
//!
//! ## Overview
//!
//! GROMACS analysis tools emit their results as annotated text files: XVG
//! time series and XPM color-indexed matrices. The core module turns those
//! files into plain numeric structures while recording what had to be
//! dropped or guessed along the way, so downstream layers can report on
//! incomplete inputs instead of silently plotting them.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Matrices, legends and time series as
//!   produced by the parsers
//! - **File I/O** ([`io`]) - Trait-based readers for the XPM and XVG formats

pub mod io;
pub mod models;
