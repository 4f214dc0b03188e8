//! Numeric transforms applied between parsing and plotting.
//!
//! Two small pieces live here: the Boltzmann inversion that turns sampled
//! probabilities into free energies ([`fel`]), and the range pooling that
//! puts a family of correlation matrices on one shared color scale
//! ([`range`]). Both operate on plain matrices and know nothing about
//! files or figures.

pub mod fel;
pub mod range;
