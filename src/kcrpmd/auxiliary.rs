use crate::constants::{KINKED_PAIR_WELL, PRODUCT_WELL, REACTANT_WELL};
use crate::kcrpmd::switching::switch;

/// Wells of the auxiliary electronic coordinate y. Every well localizes y on one of the
/// three effective surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Well {
    /// y = -1, diabatic state 0
    Reactant,
    /// y = 0, kinked pair configurations
    KinkedPair,
    /// y = +1, diabatic state 1
    Product,
}

impl Well {
    /// Order in which the surfaces enter the Boltzmann mixture.
    pub const ALL: [Well; 3] = [Well::Reactant, Well::KinkedPair, Well::Product];

    pub fn center(self) -> f64 {
        match self {
            Well::Reactant => REACTANT_WELL,
            Well::KinkedPair => KINKED_PAIR_WELL,
            Well::Product => PRODUCT_WELL,
        }
    }
}

/// Smoothed heaviside penalty of a well,
///   h(y) = ln(1 + exp(b (2|y - y_w| - 1))) / beta,
/// which is ~0 inside |y - y_w| < 1/2 and rises linearly with slope 2b/beta outside.
/// Both branches avoid the overflow of the exponential.
pub fn heaviside_penalty(y: f64, well: Well, b: f64, beta: f64) -> f64 {
    let offset: f64 = (y - well.center()).abs();
    let x: f64 = b * (2.0 * offset - 1.0);
    if offset < 0.5 {
        x.exp().ln_1p() / beta
    } else {
        (x + (-x).exp().ln_1p()) / beta
    }
}

/// Force -dh/dy of [heaviside_penalty],
///   -sign(y - y_w) b (1 + tanh(b (|y - y_w| - 1/2))) / beta.
pub fn heaviside_force(y: f64, well: Well, b: f64, beta: f64) -> f64 {
    let offset: f64 = y - well.center();
    // 1 + tanh(v) = switch(-v)
    let magnitude: f64 = b * switch(-b * (offset.abs() - 0.5)) / beta;
    if offset > 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numerical::assert_deriv;
    use ndarray::prelude::*;

    #[test]
    fn branches_agree_at_the_edge_of_the_well() {
        let (b, beta): (f64, f64) = (50.0, 2.0);
        let inside: f64 = heaviside_penalty(0.5 - 1e-12, Well::KinkedPair, b, beta);
        let outside: f64 = heaviside_penalty(0.5, Well::KinkedPair, b, beta);
        assert!((inside - outside).abs() < 1e-9);
        assert!((outside - 2.0_f64.ln() / beta).abs() < 1e-14);
    }

    #[test]
    fn no_overflow_far_from_the_well() {
        let penalty: f64 = heaviside_penalty(1.0, Well::Reactant, 1e4, 1.0);
        assert!((penalty - 1e4 * 3.0).abs() < 1e-9);
        let force: f64 = heaviside_force(1.0, Well::Reactant, 1e4, 1.0);
        assert!((force + 2e4).abs() < 1e-9);
    }

    #[test]
    fn reactant_and_product_penalties_are_symmetric() {
        let (b, beta): (f64, f64) = (50.0, 1.0);
        for y in [0.0, 0.2, 0.7].iter() {
            let reactant: f64 = heaviside_penalty(-y, Well::Reactant, b, beta);
            let product: f64 = heaviside_penalty(*y, Well::Product, b, beta);
            assert!((reactant - product).abs() < 1e-12);
            assert!((heaviside_force(-y, Well::Reactant, b, beta) + heaviside_force(*y, Well::Product, b, beta)).abs() < 1e-12);
        }
    }

    #[test]
    fn force_is_negative_derivative() {
        let (b, beta): (f64, f64) = (5.0, 1.5);
        for well in Well::ALL.iter() {
            for y in [-1.3, -0.8, -0.25, 0.3, 0.55, 1.2].iter() {
                assert_deriv(
                    |x: Array1<f64>| heaviside_penalty(x[0], *well, b, beta),
                    |x: Array1<f64>| array![-heaviside_force(x[0], *well, b, beta)],
                    array![*y],
                    1e-3,
                    1e-6,
                );
            }
        }
    }
}
