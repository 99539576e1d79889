// Boltzmann constant in Hartree / Kelvin
pub const K_BOLTZMANN: f64 = 3.166811563e-6;

// pi as it enters the free energy conservation factor of the kinetic constraint.
// The truncated literal is kept so that results stay comparable with published
// KC-RPMD rate calculations.
pub const CONSTRAINT_PI: f64 = 3.1415;

/// Largest |u| for which sech^2(u) is still representable. Beyond this point the
/// derivative of a tanh switch is treated as saturated (exactly zero).
pub const SWITCH_SATURATION: f64 = 0.5 * f64::MAX_EXP as f64 * std::f64::consts::LN_2;

// equilibrium positions of the auxiliary electronic coordinate
pub const REACTANT_WELL: f64 = -1.0;
pub const KINKED_PAIR_WELL: f64 = 0.0;
pub const PRODUCT_WELL: f64 = 1.0;
