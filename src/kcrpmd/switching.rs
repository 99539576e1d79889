use crate::constants::SWITCH_SATURATION;

/// Smooth step s(u) = 1 + tanh(-u) = 2 / (1 + e^{2u}), going from 2 (u -> -inf) to 0.
pub fn switch(u: f64) -> f64 {
    2.0 / (1.0 + (2.0 * u).exp())
}

/// True if the derivative of the switch is below the smallest representable value.
pub fn is_saturated(u: f64) -> bool {
    u.abs() > SWITCH_SATURATION
}

/// sech^2(u) = -ds/du, evaluated as s(2 - s). Zero in the saturated tails.
pub fn switch_slope(u: f64) -> f64 {
    if is_saturated(u) {
        return 0.0;
    }
    let s: f64 = switch(u);
    s * (2.0 - s)
}
