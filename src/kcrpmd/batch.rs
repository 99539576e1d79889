use crate::hamiltonian::DiabaticHamiltonian;
use crate::kcrpmd::{Kcrpmd, KcrpmdError, KcrpmdParameters};
use ndarray::prelude::*;
use rayon::prelude::*;

/// One independent configuration: a Hamiltonian container together with the auxiliary
/// coordinate and the nuclear coordinates it was computed for.
#[derive(Debug, Clone, Copy)]
pub struct KcrpmdSample<'a, H> {
    pub hamiltonian: &'a H,
    pub y_aux: &'a [f64],
    pub q: ArrayView2<'a, f64>,
}

impl<'a, H> KcrpmdSample<'a, H> {
    pub fn new(hamiltonian: &'a H, y_aux: &'a [f64], q: ArrayView2<'a, f64>) -> Self {
        KcrpmdSample { hamiltonian, y_aux, q }
    }
}

/// Effective potentials of many independent samples, evaluated in parallel. The first
/// error that is encountered is returned.
pub fn par_effective_potentials<H>(
    samples: &[KcrpmdSample<H>],
    inv_m: ArrayView2<f64>,
    beta: f64,
    params: &KcrpmdParameters,
) -> Result<Vec<f64>, KcrpmdError>
where
    H: DiabaticHamiltonian + Sync,
{
    samples
        .par_iter()
        .map(|sample| {
            sample
                .hamiltonian
                .effective_potential(sample.y_aux, sample.q, inv_m, beta, params)
        })
        .collect()
}

/// Effective nuclear forces of many independent samples, evaluated in parallel.
pub fn par_effective_forces<H>(
    samples: &[KcrpmdSample<H>],
    inv_m: ArrayView2<f64>,
    beta: f64,
    params: &KcrpmdParameters,
) -> Result<Vec<Array2<f64>>, KcrpmdError>
where
    H: DiabaticHamiltonian + Sync,
{
    samples
        .par_iter()
        .map(|sample| {
            sample
                .hamiltonian
                .effective_force(sample.y_aux, sample.q, inv_m, beta, params)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::{NHamiltonian, TwoStateModel};
    use approx::AbsDiffEq;

    #[test]
    fn parallel_and_serial_evaluation_agree() {
        let model: TwoStateModel = TwoStateModel::spin_boson(1.0, 0.5, 0.05, 0.02).with_coupling_slope(array![0.01]);
        let params: KcrpmdParameters = KcrpmdParameters::new(2.0 * std::f64::consts::PI, 0.1, 20.0, 5.0, 2.0);
        let inv_m: Array2<f64> = array![[1.0 / 1836.0]];
        let beta: f64 = 10.0;
        let positions: Vec<Array2<f64>> = (0..16).map(|i| array![[-0.8 + 0.1 * i as f64]]).collect();
        let hamiltonians: Vec<NHamiltonian> = positions.iter().map(|q| model.hamiltonian(q.view())).collect();
        let y_aux: Vec<[f64; 1]> = (0..16).map(|i| [-1.0 + 0.125 * i as f64]).collect();
        let samples: Vec<KcrpmdSample<NHamiltonian>> = hamiltonians
            .iter()
            .zip(positions.iter())
            .zip(y_aux.iter())
            .map(|((ham, q), y)| KcrpmdSample::new(ham, &y[..], q.view()))
            .collect();

        let potentials: Vec<f64> = par_effective_potentials(&samples, inv_m.view(), beta, &params).unwrap();
        let forces: Vec<Array2<f64>> = par_effective_forces(&samples, inv_m.view(), beta, &params).unwrap();
        for (i, sample) in samples.iter().enumerate() {
            let potential: f64 = sample
                .hamiltonian
                .effective_potential(sample.y_aux, sample.q, inv_m.view(), beta, &params)
                .unwrap();
            let force: Array2<f64> = sample
                .hamiltonian
                .effective_force(sample.y_aux, sample.q, inv_m.view(), beta, &params)
                .unwrap();
            assert_eq!(potential, potentials[i]);
            assert!(force.abs_diff_eq(&forces[i], 0.0));
        }
    }

    #[test]
    fn parallel_evaluation_reports_errors() {
        let unallocated: NHamiltonian = NHamiltonian::new(2);
        let q: Array2<f64> = array![[0.0]];
        let inv_m: Array2<f64> = array![[1.0]];
        let samples: Vec<KcrpmdSample<NHamiltonian>> = vec![KcrpmdSample::new(&unallocated, &[0.0], q.view())];
        let result = par_effective_potentials(&samples, inv_m.view(), 1.0, &KcrpmdParameters::default());
        assert!(matches!(result, Err(KcrpmdError::DiabaticNotAllocated { .. })));
    }
}
