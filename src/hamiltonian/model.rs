use crate::hamiltonian::NHamiltonian;
use ndarray::prelude::*;
use num_complex::Complex64;

/// Two-state (spin-boson like) model Hamiltonian. Both diabatic states are harmonic
/// wells with the same force constants, displaced to `reactant_center` and
/// `product_center`; the product state is lowered by the driving force. The diabatic
/// coupling depends linearly on the nuclear coordinates and carries a constant phase:
///
///   V0 = sum_i 1/2 k_i (q_i - r_i)^2
///   V1 = sum_i 1/2 k_i (q_i - p_i)^2 - driving_force
///   H01 = (coupling + sum_i coupling_slope_i q_i) exp(i phase)
#[derive(Debug, Clone)]
pub struct TwoStateModel {
    pub force_constants: Array1<f64>,
    pub reactant_center: Array1<f64>,
    pub product_center: Array1<f64>,
    pub driving_force: f64,
    pub coupling: f64,
    pub coupling_slope: Array1<f64>,
    pub phase: f64,
}

impl TwoStateModel {
    /// One dimensional model with wells at -displacement and +displacement and a
    /// constant real coupling.
    pub fn spin_boson(force_constant: f64, displacement: f64, driving_force: f64, coupling: f64) -> Self {
        TwoStateModel {
            force_constants: array![force_constant],
            reactant_center: array![-displacement],
            product_center: array![displacement],
            driving_force,
            coupling,
            coupling_slope: array![0.0],
            phase: 0.0,
        }
    }

    pub fn with_coupling_slope(mut self, coupling_slope: Array1<f64>) -> Self {
        assert_eq!(coupling_slope.len(), self.n_dof());
        self.coupling_slope = coupling_slope;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn n_dof(&self) -> usize {
        self.force_constants.len()
    }

    /// Diabatic matrix and its derivatives for a single geometry.
    pub fn diabatic(&self, q: ArrayView1<f64>) -> (Array2<Complex64>, Vec<Array2<Complex64>>) {
        let dq0: Array1<f64> = &q - &self.reactant_center;
        let dq1: Array1<f64> = &q - &self.product_center;
        let v0: f64 = 0.5 * (&self.force_constants * &dq0 * &dq0).sum();
        let v1: f64 = 0.5 * (&self.force_constants * &dq1 * &dq1).sum() - self.driving_force;
        let phase: Complex64 = Complex64::from_polar(1.0, self.phase);
        let h01: Complex64 = phase * (self.coupling + self.coupling_slope.dot(&q));

        let mut h: Array2<Complex64> = Array2::zeros([2, 2]);
        h[[0, 0]] = Complex64::new(v0, 0.0);
        h[[1, 1]] = Complex64::new(v1, 0.0);
        h[[0, 1]] = h01;
        h[[1, 0]] = h01.conj();

        let d1: Vec<Array2<Complex64>> = (0..self.n_dof())
            .map(|dof| {
                let mut dh: Array2<Complex64> = Array2::zeros([2, 2]);
                dh[[0, 0]] = Complex64::new(self.force_constants[dof] * dq0[dof], 0.0);
                dh[[1, 1]] = Complex64::new(self.force_constants[dof] * dq1[dof], 0.0);
                dh[[0, 1]] = phase * self.coupling_slope[dof];
                dh[[1, 0]] = dh[[0, 1]].conj();
                dh
            })
            .collect();
        (h, d1)
    }

    /// Builds the Hamiltonian container for the ndof x ntraj coordinates `q`. Every
    /// trajectory (column) becomes one child, the parent holds the centroid.
    pub fn hamiltonian(&self, q: ArrayView2<f64>) -> NHamiltonian {
        assert_eq!(q.nrows(), self.n_dof(), "wrong number of degrees of freedom");
        let centroid: Array1<f64> = q.mean_axis(Axis(1)).unwrap_or_else(|| Array1::zeros(q.nrows()));
        let (h, d1) = self.diabatic(centroid.view());
        let children: Vec<NHamiltonian> = q
            .axis_iter(Axis(1))
            .map(|q_traj| {
                let (h_traj, d1_traj) = self.diabatic(q_traj);
                NHamiltonian::from_diabatic(h_traj, d1_traj)
            })
            .collect();
        NHamiltonian::from_diabatic(h, d1).with_children(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::DiabaticHamiltonian;
    use approx::AbsDiffEq;

    #[test]
    fn diabatic_energies_of_spin_boson() {
        let model: TwoStateModel = TwoStateModel::spin_boson(2.0, 1.0, 0.5, 0.1);
        let (h, d1) = model.diabatic(array![0.5].view());
        // V0 = 1/2 * 2 * 1.5^2, V1 = 1/2 * 2 * 0.5^2 - 0.5
        assert!((h[[0, 0]].re - 2.25).abs() < 1e-14);
        assert!((h[[1, 1]].re + 0.25).abs() < 1e-14);
        assert!((h[[0, 1]].norm() - 0.1).abs() < 1e-14);
        assert_eq!(d1.len(), 1);
        assert!((d1[0][[0, 0]].re - 3.0).abs() < 1e-14);
        assert!((d1[0][[1, 1]].re + 1.0).abs() < 1e-14);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let model: TwoStateModel = TwoStateModel {
            force_constants: array![1.0, 0.5],
            reactant_center: array![-0.3, 0.2],
            product_center: array![0.4, -0.1],
            driving_force: 0.05,
            coupling: 0.02,
            coupling_slope: array![0.01, -0.03],
            phase: 0.7,
        };
        let q: Array1<f64> = array![0.1, -0.2];
        let (_, d1) = model.diabatic(q.view());
        let delta: f64 = 1e-6;
        for dof in 0..2 {
            let mut qp: Array1<f64> = q.clone();
            let mut qm: Array1<f64> = q.clone();
            qp[dof] += delta;
            qm[dof] -= delta;
            let numerical: Array2<Complex64> =
                (model.diabatic(qp.view()).0 - model.diabatic(qm.view()).0) / Complex64::new(2.0 * delta, 0.0);
            let numerical_re: Array2<f64> = numerical.mapv(|x| x.re);
            let numerical_im: Array2<f64> = numerical.mapv(|x| x.im);
            assert!(numerical_re.abs_diff_eq(&d1[dof].mapv(|x| x.re), 1e-8));
            assert!(numerical_im.abs_diff_eq(&d1[dof].mapv(|x| x.im), 1e-8));
        }
    }

    #[test]
    fn one_child_per_trajectory() {
        let model: TwoStateModel = TwoStateModel::spin_boson(1.0, 1.0, 0.0, 0.1);
        let q: Array2<f64> = array![[0.1, 0.2, 0.3]];
        let ham: NHamiltonian = model.hamiltonian(q.view());
        assert_eq!(ham.children().len(), 3);
        assert!(ham.is_diabatic_allocated());
        assert_eq!(ham.d1_ham_dia().len(), 1);
    }
}
