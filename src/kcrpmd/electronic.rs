use crate::hamiltonian::DiabaticHamiltonian;
use ndarray::prelude::*;
use num_complex::Complex64;

/// Two-state electronic quantities of a single trajectory: the diabatic energies,
/// the magnitude of the diabatic coupling and the adiabatic energies
///   Vg/Ve = 1/2 (V0 + V1) -/+ 1/2 sqrt((V0 - V1)^2 + (2K)^2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronicState {
    pub v0: f64,
    pub v1: f64,
    pub k: f64,
    pub vg: f64,
    pub ve: f64,
}

impl ElectronicState {
    pub fn new(v0: f64, v1: f64, k: f64) -> Self {
        let mean: f64 = 0.5 * (v0 + v1);
        let half_splitting: f64 = 0.5 * splitting(v0 - v1, k);
        ElectronicState {
            v0,
            v1,
            k,
            vg: mean - half_splitting,
            ve: mean + half_splitting,
        }
    }

    /// Reads V0, V1 and |H01| from the diabatic matrix of a (child) Hamiltonian.
    pub fn from_diabatic(ham_dia: ArrayView2<Complex64>) -> Self {
        ElectronicState::new(ham_dia[[0, 0]].re, ham_dia[[1, 1]].re, ham_dia[[0, 1]].norm())
    }

    pub fn from_hamiltonian<H: DiabaticHamiltonian>(ham: &H) -> Option<Self> {
        ham.ham_dia().map(ElectronicState::from_diabatic)
    }

    /// Diabatic energy gap V0 - V1.
    pub fn gap(&self) -> f64 {
        self.v0 - self.v1
    }

    /// Energies of both diabatic states relative to the adiabatic ground state,
    /// (V0 - Vg, V1 - Vg). The smaller of both is evaluated as 2K^2/(R + |V0 - V1|)
    /// to avoid the cancellation in 1/2 (R - |V0 - V1|).
    pub fn ground_state_gaps(&self) -> (f64, f64) {
        let gap: f64 = self.gap();
        let r: f64 = splitting(gap, self.k);
        let small: f64 = if r > 0.0 {
            2.0 * self.k.powi(2) / (r + gap.abs())
        } else {
            0.0
        };
        let large: f64 = 0.5 * (r + gap.abs());
        if gap >= 0.0 {
            (large, small)
        } else {
            (small, large)
        }
    }
}

/// Adiabatic splitting Ve - Vg = sqrt((V0 - V1)^2 + (2K)^2).
fn splitting(gap: f64, k: f64) -> f64 {
    gap.hypot(2.0 * k)
}

/// Forces (negative gradients along every DOF) of the quantities in [ElectronicState].
#[derive(Debug, Clone)]
pub struct ElectronicForces {
    pub f0: Array1<f64>,
    pub f1: Array1<f64>,
    pub fk: Array1<f64>,
    pub fg: Array1<f64>,
    pub fe: Array1<f64>,
}

impl ElectronicForces {
    /// The derivative of K = |H01| is Re(conj(H01) dH01) / |H01|. For a vanishing
    /// coupling the magnitude is not differentiable and the real part of dH01 is used.
    pub fn new(state: &ElectronicState, ham_dia: ArrayView2<Complex64>, d1_ham_dia: &[Array2<Complex64>]) -> Self {
        let n_dof: usize = d1_ham_dia.len();
        let h01: Complex64 = ham_dia[[0, 1]];
        let mut f0: Array1<f64> = Array1::zeros(n_dof);
        let mut f1: Array1<f64> = Array1::zeros(n_dof);
        let mut fk: Array1<f64> = Array1::zeros(n_dof);
        for (dof, dh) in d1_ham_dia.iter().enumerate() {
            f0[dof] = -dh[[0, 0]].re;
            f1[dof] = -dh[[1, 1]].re;
            fk[dof] = if state.k > 0.0 {
                -(h01.conj() * dh[[0, 1]]).re / state.k
            } else {
                -dh[[0, 1]].re
            };
        }

        // chain rule through the closed form of the adiabatic energies
        let gap: f64 = state.gap();
        let r: f64 = splitting(gap, state.k);
        let mean: Array1<f64> = 0.5 * (&f0 + &f1);
        let half_splitting: Array1<f64> = if r > 0.0 {
            (gap * (&f0 - &f1) + 4.0 * state.k * &fk) / (2.0 * r)
        } else {
            Array1::zeros(n_dof)
        };
        let fg: Array1<f64> = &mean - &half_splitting;
        let fe: Array1<f64> = &mean + &half_splitting;

        ElectronicForces { f0, f1, fk, fg, fe }
    }

    pub fn n_dof(&self) -> usize {
        self.f0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::TwoStateModel;
    use crate::utils::numerical::assert_deriv;

    #[test]
    fn adiabatic_energies_bracket_diabatic_energies() {
        for (v0, v1, k) in [(0.0, 0.1, 0.05), (0.3, -0.2, 1e-4), (1.0, 1.0, 0.2)].iter() {
            let state: ElectronicState = ElectronicState::new(*v0, *v1, *k);
            assert!(state.vg <= v0.min(*v1));
            assert!(state.ve >= v0.max(*v1));
            assert!((state.vg + state.ve - v0 - v1).abs() < 1e-14);
        }
    }

    #[test]
    fn ground_state_gaps_without_cancellation() {
        let state: ElectronicState = ElectronicState::new(1.0, 0.0, 1e-9);
        let (g0, g1): (f64, f64) = state.ground_state_gaps();
        // V1 - Vg = R/2 - 1/2 ~ K^2
        assert!((g1 - 1e-18).abs() < 1e-30);
        assert!((g0 - 1.0).abs() < 1e-15);
        let state: ElectronicState = ElectronicState::new(0.2, 0.5, 0.1);
        let (g0, g1): (f64, f64) = state.ground_state_gaps();
        assert!((g0 - (state.v0 - state.vg)).abs() < 1e-14);
        assert!((g1 - (state.v1 - state.vg)).abs() < 1e-14);
    }

    #[test]
    fn adiabatic_forces_match_numerical_gradient() {
        let model: TwoStateModel = TwoStateModel {
            force_constants: array![1.0, 0.4],
            reactant_center: array![-0.5, 0.1],
            product_center: array![0.5, -0.2],
            driving_force: 0.1,
            coupling: 0.05,
            coupling_slope: array![0.02, 0.01],
            phase: 0.3,
        };
        let energies = |q: Array1<f64>| -> ElectronicState {
            let (h, _) = model.diabatic(q.view());
            ElectronicState::from_diabatic(h.view())
        };
        let forces = |q: Array1<f64>| -> ElectronicForces {
            let (h, d1) = model.diabatic(q.view());
            let state: ElectronicState = ElectronicState::from_diabatic(h.view());
            ElectronicForces::new(&state, h.view(), &d1)
        };
        let origin: Array1<f64> = array![0.2, -0.1];
        assert_deriv(|q| energies(q).vg, |q| -forces(q).fg, origin.clone(), 0.01, 1e-7);
        assert_deriv(|q| energies(q).ve, |q| -forces(q).fe, origin.clone(), 0.01, 1e-7);
        assert_deriv(|q| energies(q).k, |q| -forces(q).fk, origin, 0.01, 1e-7);
    }
}
