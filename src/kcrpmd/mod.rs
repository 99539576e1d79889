//! Effective potential and forces of kinetically constrained ring polymer molecular
//! dynamics (KC-RPMD) for two-state electron/proton transfer. The electronic degrees of
//! freedom are represented by a classical auxiliary coordinate y that is localized by
//! heaviside penalties on three effective surfaces: the reactant diabat V0 (y = -1), the
//! kinked pair free energy VKP (y = 0) and the product diabat V1 (y = +1). The surfaces
//! are combined into a single free energy by a shifted log-sum-exp.
mod auxiliary;
mod batch;
mod constraint;
mod electronic;
mod error;
mod kinked_pair;
mod mixing;
mod mixture;
mod switching;

pub use auxiliary::{heaviside_force, heaviside_penalty, Well};
pub use batch::{par_effective_forces, par_effective_potentials, KcrpmdSample};
pub use constraint::KineticConstraint;
pub use electronic::{ElectronicForces, ElectronicState};
pub use error::KcrpmdError;
pub use kinked_pair::Regime;
pub use mixture::BoltzmannMixture;

use crate::defaults::{CONSTRAINT_A, ETA, HEAVISIDE_B, SWITCHING_C, SWITCHING_D};
use crate::hamiltonian::DiabaticHamiltonian;
use crate::ring_polymer;
use log::{debug, trace};
use ndarray::prelude::*;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

fn default_eta() -> f64 {
    ETA
}
fn default_a() -> f64 {
    CONSTRAINT_A
}
fn default_b() -> f64 {
    HEAVISIDE_B
}
fn default_c() -> f64 {
    SWITCHING_C
}
fn default_d() -> f64 {
    SWITCHING_D
}

/// Method parameters of KC-RPMD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KcrpmdParameters {
    /// geometric parameter conserving the free energy of kinked pair formation
    #[serde(default = "default_eta")]
    pub eta: f64,
    /// kinetic constraint ad-hoc parameter
    #[serde(default = "default_a")]
    pub a: f64,
    /// heaviside functional limit parameter
    #[serde(default = "default_b")]
    pub b: f64,
    /// constraint switching parameter
    #[serde(default = "default_c")]
    pub c: f64,
    /// free energy conservation switching parameter
    #[serde(default = "default_d")]
    pub d: f64,
}

impl Default for KcrpmdParameters {
    fn default() -> Self {
        KcrpmdParameters {
            eta: ETA,
            a: CONSTRAINT_A,
            b: HEAVISIDE_B,
            c: SWITCHING_C,
            d: SWITCHING_D,
        }
    }
}

impl KcrpmdParameters {
    pub fn new(eta: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        KcrpmdParameters { eta, a, b, c, d }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [("eta", self.eta), ("a", self.a), ("b", self.b), ("c", self.c), ("d", self.d)].iter() {
            anyhow::ensure!(value.is_finite(), "KC-RPMD parameter {} is not finite: {}", name, value);
        }
        anyhow::ensure!(self.a >= 0.0, "the kinetic constraint parameter a must not be negative: {}", self.a);
        anyhow::ensure!(self.b >= 0.0, "the heaviside parameter b must not be negative: {}", self.b);
        Ok(())
    }
}

/// The three effective surfaces of a classical (single bead) trajectory, including the
/// kinetic constraint and the heaviside penalties of the auxiliary coordinate.
#[derive(Debug, Clone, Copy)]
struct EffectiveSurfaces {
    state: ElectronicState,
    regime: Regime,
    constraint: Option<KineticConstraint>,
    /// [V0, VKP, V1]
    energies: [f64; 3],
}

impl EffectiveSurfaces {
    fn new(state: ElectronicState, y: f64, beta: f64, params: &KcrpmdParameters) -> Self {
        let regime: Regime = Regime::select(&state, beta);
        let mut vkp: f64 = kinked_pair::free_energy(&state, beta, regime);
        // the constraint is undefined without coupling, the channel is closed anyway
        let constraint: Option<KineticConstraint> = match regime {
            Regime::Uncoupled => None,
            _ => Some(KineticConstraint::new(&state, beta, params)),
        };
        if let Some(constraint) = constraint.as_ref() {
            vkp += constraint.correction(beta);
        }
        let mut energies: [f64; 3] = [state.v0, vkp, state.v1];
        for (energy, well) in energies.iter_mut().zip(Well::ALL.iter()) {
            *energy += heaviside_penalty(y, *well, params.b, beta);
        }
        trace!(
            "V0: {:>18.12} VKP: {:>18.12} V1: {:>18.12} K: {:>18.12e}",
            energies[0],
            energies[1],
            energies[2],
            state.k
        );
        EffectiveSurfaces {
            state,
            regime,
            constraint,
            energies,
        }
    }

    fn mixture(&self, beta: f64) -> BoltzmannMixture {
        BoltzmannMixture::new(self.energies, beta)
    }
}

fn check_diabatic<H: DiabaticHamiltonian>(ham: &H, operation: &'static str) -> Result<(), KcrpmdError> {
    if !ham.is_diabatic_allocated() {
        return Err(KcrpmdError::DiabaticNotAllocated { operation });
    }
    if ham.n_diabatic() != 2 {
        return Err(KcrpmdError::StateCount {
            operation,
            n_diabatic: ham.n_diabatic(),
        });
    }
    Ok(())
}

fn child_diabatic<'a, H: DiabaticHamiltonian>(
    child: &'a H,
    operation: &'static str,
) -> Result<ArrayView2<'a, Complex64>, KcrpmdError> {
    match child.ham_dia() {
        Some(ham_dia) if ham_dia.dim() == (2, 2) => Ok(ham_dia),
        Some(ham_dia) => Err(KcrpmdError::StateCount {
            operation,
            n_diabatic: ham_dia.nrows(),
        }),
        None => Err(KcrpmdError::DiabaticNotAllocated { operation }),
    }
}

/// The child Hamiltonian of a classical trajectory. Several trajectories (quantum
/// nuclei) are not supported.
fn classical_child<'a, H: DiabaticHamiltonian>(
    ham: &'a H,
    n_traj: usize,
    operation: &'static str,
) -> Result<&'a H, KcrpmdError> {
    let children: &[H] = ham.children();
    if children.len() == 1 && n_traj == 1 {
        Ok(&children[0])
    } else if children.len() == n_traj && n_traj > 1 {
        Err(KcrpmdError::QuantumNuclei { operation })
    } else {
        Err(KcrpmdError::ChildCountMismatch {
            operation,
            n_children: children.len(),
            n_traj,
        })
    }
}

fn auxiliary_coordinate(y_aux: &[f64], operation: &'static str) -> Result<f64, KcrpmdError> {
    match y_aux {
        [y] => Ok(*y),
        _ => Err(KcrpmdError::AuxiliaryDimension {
            operation,
            len: y_aux.len(),
        }),
    }
}

/// KC-RPMD routines of a two-state Hamiltonian container.
///
/// y_aux - is the classical electronic coordinate as defined in KC-RPMD
/// q - is a ndof x ntraj matrix of coordinates
/// inv_m - is a ndof x 1 matrix of inverse masses of all DOFs
/// beta - the inverse temperature Boltzmann factor in atomic units
pub trait Kcrpmd {
    /// One 2x2 mixing matrix per trajectory. Without children the matrix of the parent
    /// Hamiltonian at `beta` is returned, otherwise every child uses beta / n_children.
    fn generate_mixing_matrices(&self, beta: f64) -> Result<Vec<Array2<f64>>, KcrpmdError>;

    /// The KC-RPMD effective potential energy.
    fn effective_potential(
        &self,
        y_aux: &[f64],
        q: ArrayView2<f64>,
        inv_m: ArrayView2<f64>,
        beta: f64,
        params: &KcrpmdParameters,
    ) -> Result<f64, KcrpmdError>;

    /// The KC-RPMD effective nuclear force (ndof x ntraj), the negative gradient of
    /// [effective_potential](Kcrpmd::effective_potential).
    fn effective_force(
        &self,
        y_aux: &[f64],
        q: ArrayView2<f64>,
        inv_m: ArrayView2<f64>,
        beta: f64,
        params: &KcrpmdParameters,
    ) -> Result<Array2<f64>, KcrpmdError>;

    /// The force on the auxiliary electronic coordinate.
    fn effective_auxiliary_force(
        &self,
        y_aux: &[f64],
        beta: f64,
        params: &KcrpmdParameters,
    ) -> Result<Vec<f64>, KcrpmdError>;
}

impl<H: DiabaticHamiltonian> Kcrpmd for H {
    fn generate_mixing_matrices(&self, beta: f64) -> Result<Vec<Array2<f64>>, KcrpmdError> {
        let operation: &'static str = "generate_mixing_matrices";
        check_diabatic(self, operation)?;

        let children: &[H] = self.children();
        if children.is_empty() {
            let state: ElectronicState = ElectronicState::from_diabatic(child_diabatic(self, operation)?);
            return Ok(vec![mixing::mixing_matrix(&state, beta)]);
        }
        let beta_traj: f64 = beta / children.len() as f64;
        children
            .iter()
            .map(|child| -> Result<Array2<f64>, KcrpmdError> {
                let state: ElectronicState = ElectronicState::from_diabatic(child_diabatic(child, operation)?);
                Ok(mixing::mixing_matrix(&state, beta_traj))
            })
            .collect()
    }

    fn effective_potential(
        &self,
        y_aux: &[f64],
        q: ArrayView2<f64>,
        inv_m: ArrayView2<f64>,
        beta: f64,
        params: &KcrpmdParameters,
    ) -> Result<f64, KcrpmdError> {
        let operation: &'static str = "kcrpmd_effective_potential";
        check_diabatic(self, operation)?;
        let child: &H = classical_child(self, q.ncols(), operation)?;
        let y: f64 = auxiliary_coordinate(y_aux, operation)?;

        let state: ElectronicState = ElectronicState::from_diabatic(child_diabatic(child, operation)?);
        let surfaces: EffectiveSurfaces = EffectiveSurfaces::new(state, y, beta, params);
        let mixture: BoltzmannMixture = surfaces.mixture(beta);
        debug!(
            "{}: regime {:?}, shift {:.10}, weights {:?}",
            operation,
            surfaces.regime,
            mixture.shift(),
            mixture.weights()
        );

        Ok(ring_polymer::internal_potential(q, inv_m, beta) + mixture.free_energy())
    }

    fn effective_force(
        &self,
        y_aux: &[f64],
        q: ArrayView2<f64>,
        inv_m: ArrayView2<f64>,
        beta: f64,
        params: &KcrpmdParameters,
    ) -> Result<Array2<f64>, KcrpmdError> {
        let operation: &'static str = "kcrpmd_effective_force";
        check_diabatic(self, operation)?;
        let child: &H = classical_child(self, q.ncols(), operation)?;
        let y: f64 = auxiliary_coordinate(y_aux, operation)?;
        let n_dof: usize = q.nrows();
        if child.d1_ham_dia().len() != n_dof {
            return Err(KcrpmdError::DerivativeCount {
                operation,
                n_derivatives: child.d1_ham_dia().len(),
                n_dof,
            });
        }

        let ham_dia: ArrayView2<Complex64> = child_diabatic(child, operation)?;
        let state: ElectronicState = ElectronicState::from_diabatic(ham_dia);
        let forces: ElectronicForces = ElectronicForces::new(&state, ham_dia, child.d1_ham_dia());
        let surfaces: EffectiveSurfaces = EffectiveSurfaces::new(state, y, beta, params);

        let mut fkp: Array1<f64> = kinked_pair::force(&surfaces.state, &forces, beta, surfaces.regime);
        if let Some(constraint) = surfaces.constraint.as_ref() {
            fkp += &constraint.force(&surfaces.state, &forces, beta, params);
        }
        // the heaviside penalties depend on y only, they enter through the weights

        let mixture: BoltzmannMixture = surfaces.mixture(beta);
        debug!(
            "{}: regime {:?}, shift {:.10}, weights {:?}",
            operation,
            surfaces.regime,
            mixture.shift(),
            mixture.weights()
        );
        let electronic: Array1<f64> = mixture.average_force([forces.f0.view(), fkp.view(), forces.f1.view()]);

        let mut force: Array2<f64> = ring_polymer::internal_force(q, inv_m, beta);
        force.column_mut(0).scaled_add(1.0, &electronic);
        Ok(force)
    }

    fn effective_auxiliary_force(
        &self,
        y_aux: &[f64],
        beta: f64,
        params: &KcrpmdParameters,
    ) -> Result<Vec<f64>, KcrpmdError> {
        let operation: &'static str = "kcrpmd_effective_auxiliary_force";
        check_diabatic(self, operation)?;
        let children: &[H] = self.children();
        let child: &H = match children.len() {
            1 => &children[0],
            0 => {
                return Err(KcrpmdError::ChildCountMismatch {
                    operation,
                    n_children: 0,
                    n_traj: 1,
                })
            }
            _ => return Err(KcrpmdError::QuantumNuclei { operation }),
        };
        let y: f64 = auxiliary_coordinate(y_aux, operation)?;

        let state: ElectronicState = ElectronicState::from_diabatic(child_diabatic(child, operation)?);
        let surfaces: EffectiveSurfaces = EffectiveSurfaces::new(state, y, beta, params);
        let mixture: BoltzmannMixture = surfaces.mixture(beta);

        let mut forces: [f64; 3] = [0.0; 3];
        for (force, well) in forces.iter_mut().zip(Well::ALL.iter()) {
            *force = heaviside_force(y, *well, params.b, beta);
        }
        Ok(vec![mixture.average(forces)])
    }
}
