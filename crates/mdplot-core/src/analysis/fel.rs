use nalgebra::DMatrix;
use thiserror::Error;

/// Thermal energy kT in kJ/mol at 300 K.
pub const KT_300K: f64 = 2.494;

/// Fraction of the smallest positive probability substituted for empty bins
/// before taking the logarithm.
const ZERO_PROBABILITY_FLOOR: f64 = 0.1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FelError {
    #[error("Probability matrix has no positive entries")]
    DegenerateMatrix,
}

/// Converts a probability matrix into a free-energy landscape.
///
/// Each probability `p` maps to `-kT * ln(p)`. Non-positive entries are
/// replaced by a tenth of the smallest positive probability beforehand, any
/// non-finite energies are clamped to the largest finite one, and the whole
/// surface is shifted so its minimum sits at zero. The result has the same
/// shape as the input and every entry is finite and non-negative.
///
/// `kt` is the thermal energy in the same units the energies should come
/// out in; [`KT_300K`] is the usual choice.
///
/// # Errors
///
/// Returns [`FelError::DegenerateMatrix`] when no entry is positive, which
/// also covers the empty matrix.
pub fn free_energy_landscape(
    probabilities: &DMatrix<f64>,
    kt: f64,
) -> Result<DMatrix<f64>, FelError> {
    let min_positive = probabilities
        .iter()
        .copied()
        .filter(|p| *p > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !min_positive.is_finite() {
        return Err(FelError::DegenerateMatrix);
    }

    let floor = min_positive * ZERO_PROBABILITY_FLOOR;
    let mut energies =
        probabilities.map(|p| -kt * (if p > 0.0 { p } else { floor }).ln());

    let max_finite = energies
        .iter()
        .copied()
        .filter(|e| e.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    for energy in energies.iter_mut() {
        if !energy.is_finite() {
            *energy = max_finite;
        }
    }

    let min = energies.iter().copied().fold(f64::INFINITY, f64::min);
    for energy in energies.iter_mut() {
        *energy -= min;
    }

    Ok(energies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_probabilities_get_a_floor_below_the_minimum() {
        let probabilities = DMatrix::from_row_slice(1, 2, &[1.0, 0.0]);
        let energies = free_energy_landscape(&probabilities, KT_300K).unwrap();

        assert_eq!(energies[(0, 0)], 0.0);
        assert!(energies[(0, 1)].is_finite());
        assert!(energies[(0, 1)] > energies[(0, 0)]);
    }

    #[test]
    fn minimum_energy_is_zero() {
        let probabilities = DMatrix::from_row_slice(2, 2, &[0.1, 0.2, 0.3, 0.4]);
        let energies = free_energy_landscape(&probabilities, KT_300K).unwrap();

        let min = energies.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(min, 0.0);
        assert!(energies.iter().all(|e| *e >= 0.0 && e.is_finite()));
    }

    #[test]
    fn most_probable_bin_has_lowest_energy() {
        let probabilities = DMatrix::from_row_slice(1, 3, &[0.7, 0.2, 0.1]);
        let energies = free_energy_landscape(&probabilities, KT_300K).unwrap();

        assert_eq!(energies[(0, 0)], 0.0);
        assert!(energies[(0, 1)] < energies[(0, 2)]);
    }

    #[test]
    fn uniform_probabilities_give_a_flat_surface() {
        let probabilities = DMatrix::from_element(3, 3, 0.25);
        let energies = free_energy_landscape(&probabilities, KT_300K).unwrap();
        assert!(energies.iter().all(|e| *e == 0.0));
    }

    #[test]
    fn shape_is_preserved() {
        let probabilities = DMatrix::from_row_slice(2, 3, &[0.1, 0.0, 0.2, 0.0, 0.3, 0.4]);
        let energies = free_energy_landscape(&probabilities, KT_300K).unwrap();
        assert_eq!(energies.nrows(), 2);
        assert_eq!(energies.ncols(), 3);
    }

    #[test]
    fn scaling_kt_scales_energies_linearly() {
        let probabilities = DMatrix::from_row_slice(1, 2, &[1.0, 0.5]);
        let reference = free_energy_landscape(&probabilities, 1.0).unwrap();
        let doubled = free_energy_landscape(&probabilities, 2.0).unwrap();
        assert!((doubled[(0, 1)] - 2.0 * reference[(0, 1)]).abs() < 1e-12);
    }

    #[test]
    fn all_zero_matrix_is_degenerate() {
        let probabilities = DMatrix::from_element(2, 2, 0.0);
        let result = free_energy_landscape(&probabilities, KT_300K);
        assert!(matches!(result, Err(FelError::DegenerateMatrix)));
    }

    #[test]
    fn negative_only_matrix_is_degenerate() {
        let probabilities = DMatrix::from_element(2, 2, -1.0);
        let result = free_energy_landscape(&probabilities, KT_300K);
        assert!(matches!(result, Err(FelError::DegenerateMatrix)));
    }

    #[test]
    fn empty_matrix_is_degenerate() {
        let probabilities = DMatrix::from_row_slice(0, 0, &[]);
        let result = free_energy_landscape(&probabilities, KT_300K);
        assert!(matches!(result, Err(FelError::DegenerateMatrix)));
    }
}
