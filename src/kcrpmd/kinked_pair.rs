//! Free energy of the kinked pair configurations of the ring polymer,
//!   VKP = -1/beta ln(exp(-beta Vg) + exp(-beta Ve) - exp(-beta V0) - exp(-beta V1)),
//! and its nuclear force. The logarithm becomes ill conditioned for small couplings,
//! where the expression is replaced by its expansion in beta*K.
use crate::defaults::{ADIABATIC_THRESHOLD, DEGENERACY_THRESHOLD};
use crate::kcrpmd::electronic::{ElectronicForces, ElectronicState};
use ndarray::prelude::*;

/// Closed form that is used for the kinked pair free energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// beta*K > 1e-3: full expression referenced to the adiabatic ground state.
    Adiabatic,
    /// small coupling, beta*|V0 - V1| > 1e-7: leading order in beta*K with the
    /// sinh(x)/x factor of the diabatic gap.
    WeakCoupling,
    /// small coupling and (nearly) degenerate diabatic states.
    Degenerate,
    /// K = 0, no kinked pair can be formed.
    Uncoupled,
}

impl Regime {
    pub fn select(state: &ElectronicState, beta: f64) -> Self {
        if state.k <= 0.0 {
            Regime::Uncoupled
        } else if beta * state.k > ADIABATIC_THRESHOLD {
            Regime::Adiabatic
        } else if beta * state.gap().abs() > DEGENERACY_THRESHOLD {
            Regime::WeakCoupling
        } else {
            Regime::Degenerate
        }
    }
}

/// ln(sinh(x) / x) for x != 0, written without overflow for large |x|.
fn ln_sinhc(x: f64) -> f64 {
    let ax: f64 = x.abs();
    ax + (-(-2.0 * ax).exp_m1()).ln() - std::f64::consts::LN_2 - ax.ln()
}

/// Langevin function coth(x) - 1/x, expanded around x = 0 where both terms cancel.
fn langevin(x: f64) -> f64 {
    if x.abs() < 1e-2 {
        let x2: f64 = x * x;
        x / 3.0 * (1.0 - x2 / 15.0 + 2.0 * x2 * x2 / 315.0)
    } else {
        1.0 / x.tanh() - 1.0 / x
    }
}

/// Kinked pair free energy VKP in the given regime.
pub fn free_energy(state: &ElectronicState, beta: f64, regime: Regime) -> f64 {
    match regime {
        Regime::Adiabatic => {
            // 1 + e^{-b(Ve-Vg)} - e^{-b(V0-Vg)} - e^{-b(V1-Vg)} factorizes since
            // Ve - Vg = (V0 - Vg) + (V1 - Vg)
            let (g0, g1): (f64, f64) = state.ground_state_gaps();
            let ln_weight: f64 = (-(-beta * g0).exp_m1()).ln() + (-(-beta * g1).exp_m1()).ln();
            state.vg - ln_weight / beta
        }
        Regime::WeakCoupling => {
            let x: f64 = 0.5 * beta * state.gap();
            0.5 * (state.v0 + state.v1) - (2.0 * (beta * state.k).ln() + ln_sinhc(x)) / beta
        }
        Regime::Degenerate => 0.5 * (state.v0 + state.v1) - 2.0 * (beta * state.k).ln() / beta,
        Regime::Uncoupled => f64::INFINITY,
    }
}

/// Nuclear force -dVKP/dq of [free_energy] in the same regime.
pub fn force(state: &ElectronicState, forces: &ElectronicForces, beta: f64, regime: Regime) -> Array1<f64> {
    match regime {
        Regime::Adiabatic => {
            let (g0, g1): (f64, f64) = state.ground_state_gaps();
            // d ln(1 - e^{-x}) / dx = 1 / (e^x - 1)
            let c0: f64 = 1.0 / (beta * g0).exp_m1();
            let c1: f64 = 1.0 / (beta * g1).exp_m1();
            &forces.fg - &(c0 * (&forces.f0 - &forces.fg)) - &(c1 * (&forces.f1 - &forces.fg))
        }
        Regime::WeakCoupling => {
            let x: f64 = 0.5 * beta * state.gap();
            let mean: Array1<f64> = 0.5 * (&forces.f0 + &forces.f1);
            &mean - &(0.5 * langevin(x) * (&forces.f0 - &forces.f1)) - 2.0 / (beta * state.k) * &forces.fk
        }
        Regime::Degenerate => {
            0.5 * (&forces.f0 + &forces.f1) - 2.0 / (beta * state.k) * &forces.fk
        }
        Regime::Uncoupled => Array1::zeros(forces.n_dof()),
    }
}
