use crate::kcrpmd::electronic::ElectronicState;
use ndarray::prelude::*;

/// Mixing matrix of a single trajectory at the (possibly bead scaled) inverse
/// temperature `beta`:
///
///   | exp(-beta V0)            -beta K exp(-beta V0) |
///   | -beta K exp(-beta V1)    exp(-beta V1)         |
pub fn mixing_matrix(state: &ElectronicState, beta: f64) -> Array2<f64> {
    let p0: f64 = (-beta * state.v0).exp();
    let p1: f64 = (-beta * state.v1).exp();
    array![[p0, -beta * state.k * p0], [-beta * state.k * p1, p1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populations_and_rates() {
        let state: ElectronicState = ElectronicState::new(0.1, 0.3, 0.05);
        let m: Array2<f64> = mixing_matrix(&state, 2.0);
        assert!((m[[0, 0]] - (-0.2_f64).exp()).abs() < 1e-15);
        assert!((m[[1, 1]] - (-0.6_f64).exp()).abs() < 1e-15);
        assert!((m[[0, 1]] + 0.1 * (-0.2_f64).exp()).abs() < 1e-15);
        assert!((m[[1, 0]] + 0.1 * (-0.6_f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn off_diagonal_is_bounded_by_the_diagonal_for_weak_coupling() {
        let state: ElectronicState = ElectronicState::new(-0.4, 0.8, 1e-3);
        let m: Array2<f64> = mixing_matrix(&state, 5.0);
        assert!(m[[0, 1]] < 0.0 && m[[1, 0]] < 0.0);
        assert!(m[[0, 1]].abs() <= m[[0, 0]]);
        assert!(m[[1, 0]].abs() <= m[[1, 1]]);
    }
}
