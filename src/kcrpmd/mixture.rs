use ndarray::prelude::*;

/// Boltzmann mixture of the three effective surfaces [V0, VKP, V1]. The energies are
/// shifted by their minimum before exponentiation, so that the weights neither
/// overflow nor underflow all together.
#[derive(Debug, Clone, Copy)]
pub struct BoltzmannMixture {
    beta: f64,
    shift: f64,
    weights: [f64; 3],
}

impl BoltzmannMixture {
    pub fn new(energies: [f64; 3], beta: f64) -> Self {
        let shift: f64 = energies.iter().cloned().fold(f64::INFINITY, f64::min);
        let mut weights: [f64; 3] = [0.0; 3];
        for (weight, energy) in weights.iter_mut().zip(energies.iter()) {
            *weight = (-beta * (energy - shift)).exp();
        }
        BoltzmannMixture {
            beta,
            shift,
            weights,
        }
    }

    /// The minimum of the three energies.
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// -1/beta ln(sum_i exp(-beta V_i))
    pub fn free_energy(&self) -> f64 {
        self.shift - self.weights.iter().sum::<f64>().ln() / self.beta
    }

    /// Normalized weights, every weight lies in [0, 1] and they sum to one.
    pub fn weights(&self) -> [f64; 3] {
        let norm: f64 = self.weights.iter().sum();
        let mut normalized: [f64; 3] = self.weights;
        normalized.iter_mut().for_each(|w| *w /= norm);
        normalized
    }

    /// Weighted average of the forces of the three surfaces. Surfaces with a weight of
    /// exactly zero are skipped, their force may not be finite. A NaN weight is kept so
    /// that an invalid energy shows up in the force.
    pub fn average_force(&self, forces: [ArrayView1<f64>; 3]) -> Array1<f64> {
        let mut average: Array1<f64> = Array1::zeros(forces[0].len());
        for (weight, force) in self.weights().iter().zip(forces.iter()) {
            if *weight != 0.0 {
                average.scaled_add(*weight, force);
            }
        }
        average
    }

    /// Weighted average of scalar forces, see [average_force](Self::average_force).
    pub fn average(&self, values: [f64; 3]) -> f64 {
        self.weights()
            .iter()
            .zip(values.iter())
            .filter(|(weight, _)| **weight != 0.0)
            .map(|(weight, value)| weight * value)
            .sum()
    }
}
