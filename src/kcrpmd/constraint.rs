use crate::constants::CONSTRAINT_PI;
use crate::kcrpmd::electronic::{ElectronicForces, ElectronicState};
use crate::kcrpmd::switching::{is_saturated, switch, switch_slope};
use crate::kcrpmd::KcrpmdParameters;
use ndarray::prelude::*;

/// Kinetic constraint on the kinked pair free energy,
///   (A w^2 - ln C) / beta,   w = (V0 - V1) / K,
///   A = 1/2 a (1 + tanh(-c (beta K - 1))),
///   C = 1 + 1/2 (sqrt(A/pi) eta - 1) (1 + tanh(-d (beta K - 1))).
/// A gates the constraint to the nonadiabatic limit and C conserves the free energy of
/// kinked pair formation. Only defined for K > 0.
#[derive(Debug, Clone, Copy)]
pub struct KineticConstraint {
    pub w: f64,
    pub a: f64,
    pub c: f64,
    u_c: f64,
    u_d: f64,
    s_c: f64,
    s_d: f64,
}

impl KineticConstraint {
    pub fn new(state: &ElectronicState, beta: f64, params: &KcrpmdParameters) -> Self {
        let w: f64 = state.gap() / state.k;
        let u_c: f64 = params.c * (beta * state.k - 1.0);
        let u_d: f64 = params.d * (beta * state.k - 1.0);
        let s_c: f64 = switch(u_c);
        let s_d: f64 = switch(u_d);
        let a: f64 = 0.5 * params.a * s_c;
        let c: f64 = 1.0 + 0.5 * ((a / CONSTRAINT_PI).sqrt() * params.eta - 1.0) * s_d;
        KineticConstraint {
            w,
            a,
            c,
            u_c,
            u_d,
            s_c,
            s_d,
        }
    }

    /// Contribution (A w^2 - ln C) / beta to the kinked pair free energy.
    pub fn correction(&self, beta: f64) -> f64 {
        (self.barrier() - self.c.ln()) / beta
    }

    /// A w^2, zero whenever A vanishes, also for an unbounded w.
    fn barrier(&self) -> f64 {
        if self.a == 0.0 {
            0.0
        } else {
            self.a * self.w.powi(2)
        }
    }

    /// Nuclear force of [correction](Self::correction).
    pub fn force(
        &self,
        state: &ElectronicState,
        forces: &ElectronicForces,
        beta: f64,
        params: &KcrpmdParameters,
    ) -> Array1<f64> {
        // derivatives of A, sqrt(A) and C with respect to K
        let da_dk: f64 = -0.5 * params.a * params.c * beta * switch_slope(self.u_c);
        let dsqrt_a_dk: f64 = if is_saturated(self.u_c) {
            0.0
        } else {
            // dA/dK / (2 sqrt(A)) without dividing by a vanishing A
            -params.c * beta * (2.0 - self.s_c) * self.s_c.sqrt() * (2.0 * params.a).sqrt() / 4.0
        };
        let dc_dk: f64 = 0.5 * params.eta / CONSTRAINT_PI.sqrt() * dsqrt_a_dk * self.s_d
            - 0.5 * ((self.a / CONSTRAINT_PI).sqrt() * params.eta - 1.0) * params.d * beta * switch_slope(self.u_d);

        let fc: Array1<f64> = dc_dk * &forces.fk;
        let mut force: Array1<f64> = -fc / self.c;
        if self.a != 0.0 {
            let fw: Array1<f64> = (&forces.f0 - &forces.f1 - self.w * &forces.fk) / state.k;
            let fa: Array1<f64> = da_dk * &forces.fk;
            force = force + self.w.powi(2) * fa + 2.0 * self.a * self.w * fw;
        }
        force / beta
    }
}
