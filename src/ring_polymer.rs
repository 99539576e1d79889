use ndarray::prelude::*;

/// Harmonic frequency of the springs between neighbouring beads, omega_P = P / beta
/// (atomic units, hbar = 1).
fn spring_frequency(n_beads: usize, beta: f64) -> f64 {
    n_beads as f64 / beta
}

/// Internal potential of the ring polymer
///   V = sum_i sum_j 1/2 m_i omega_P^2 (q_ij - q_i(j+1))^2
/// with cyclic bead index j.
///
/// q: ndof x nbeads matrix of coordinates
/// inv_m: ndof x 1 matrix of inverse masses
pub fn internal_potential(q: ArrayView2<f64>, inv_m: ArrayView2<f64>, beta: f64) -> f64 {
    let n_beads: usize = q.ncols();
    if n_beads < 2 {
        return 0.0;
    }
    let omega2: f64 = spring_frequency(n_beads, beta).powi(2);
    let mut energy: f64 = 0.0;
    for (q_dof, inv_m_dof) in q.outer_iter().zip(inv_m.column(0).iter()) {
        let stretch: f64 = (0..n_beads)
            .map(|j| (q_dof[j] - q_dof[(j + 1) % n_beads]).powi(2))
            .sum();
        energy += 0.5 * omega2 * stretch / inv_m_dof;
    }
    energy
}

/// Internal force of the ring polymer, the negative gradient of [internal_potential].
pub fn internal_force(q: ArrayView2<f64>, inv_m: ArrayView2<f64>, beta: f64) -> Array2<f64> {
    let (n_dof, n_beads): (usize, usize) = q.dim();
    let mut force: Array2<f64> = Array2::zeros([n_dof, n_beads]);
    if n_beads < 2 {
        return force;
    }
    let omega2: f64 = spring_frequency(n_beads, beta).powi(2);
    for ((mut f_dof, q_dof), inv_m_dof) in force
        .outer_iter_mut()
        .zip(q.outer_iter())
        .zip(inv_m.column(0).iter())
    {
        for j in 0..n_beads {
            let prev: usize = (j + n_beads - 1) % n_beads;
            let next: usize = (j + 1) % n_beads;
            f_dof[j] = -omega2 / inv_m_dof * (2.0 * q_dof[j] - q_dof[prev] - q_dof[next]);
        }
    }
    force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numerical::assert_deriv;

    #[test]
    fn single_bead_has_no_springs() {
        let q: Array2<f64> = array![[0.3], [-1.2]];
        let inv_m: Array2<f64> = array![[1.0], [0.5]];
        assert_eq!(internal_potential(q.view(), inv_m.view(), 2.0), 0.0);
        assert!(internal_force(q.view(), inv_m.view(), 2.0).iter().all(|f| *f == 0.0));
    }

    #[test]
    fn two_beads_spring_energy() {
        // omega_P = 2 / beta = 1, both bonds of the ring contribute 1/2 * m * 1^2
        let q: Array2<f64> = array![[0.0, 1.0]];
        let inv_m: Array2<f64> = array![[0.5]];
        let energy: f64 = internal_potential(q.view(), inv_m.view(), 2.0);
        assert!((energy - 2.0).abs() < 1e-14);
    }

    #[test]
    fn force_is_negative_gradient() {
        let inv_m: Array2<f64> = array![[1.0 / 1836.0], [0.25]];
        let beta: f64 = 8.0;
        let shape: (usize, usize) = (2, 4);
        let origin: Array1<f64> = array![0.1, -0.4, 0.3, 0.25, -0.2, 0.05, 0.6, -0.1];
        let potential = |x: Array1<f64>| -> f64 {
            let q: Array2<f64> = x.into_shape(shape).unwrap();
            internal_potential(q.view(), inv_m.view(), beta)
        };
        let gradient = |x: Array1<f64>| -> Array1<f64> {
            let q: Array2<f64> = x.into_shape(shape).unwrap();
            -internal_force(q.view(), inv_m.view(), beta).into_shape(8).unwrap()
        };
        assert_deriv(potential, gradient, origin, 0.01, 1e-6);
    }
}
