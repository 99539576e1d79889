use log::debug;
use ndarray::prelude::*;

/// Returns the derivative of a function `function` at an Array of points `origin` by Ridder's method.
/// The value `stepsize` is an initial stepsize, it need to be small, but should be an increment
/// over which the `function` changes substantially. An estimate of the error in the derivative is
/// returned. The method was developed by C.J.F Ridders in 1982 (see the original article
/// ["Accurate computation of F′(x) and F′(x) F″(x)"](https://doi.org/10.1016/S0141-1195(82)80057-0))
/// The implementation is based on the one described in the Book Numerical Recipes by
/// W. H. Press and S. A. Teukolsky.
pub fn ridders_method<F>(
    function: F,
    origin: ArrayView1<f64>,
    index: usize,
    stepsize: f64,
    con: f64,
    safe: f64,
    maxiter: usize,
) -> (f64, f64)
where
    F: Fn(Array1<f64>) -> f64,
{
    let mut stepsize: f64 = stepsize;
    let mut step: Array1<f64> = Array1::zeros([origin.len()]);
    step[index] = 1.0;
    let con2: f64 = con.powi(2);
    let central_difference = |h: f64| -> f64 {
        (function(&origin + &(&step * h)) - function(&origin - &(&step * h))) / (2.0 * h)
    };

    let mut table: Vec<Vec<f64>> = vec![vec![central_difference(stepsize)]];
    let mut error: f64 = f64::MAX;
    let mut estimate: f64 = table[0][0];

    for i in 1..maxiter {
        // successive rows of the Neville tableau go to smaller step sizes
        stepsize /= con;
        table.push(vec![central_difference(stepsize)]);

        let mut fac: f64 = con2;
        for j in 1..(i + 1) {
            let tmp: f64 = (table[i][j - 1] * fac - table[i - 1][j - 1]) / (fac - 1.0);
            table[i].push(tmp);
            fac *= con2;

            // compare each new extrapolation to one order lower, both at the present
            // step size and the previous one
            let current: f64 = (table[i][j] - table[i][j - 1]).abs();
            let last: f64 = (table[i][j] - table[i - 1][j - 1]).abs();
            let current_error: f64 = current.max(last);
            if current_error <= error {
                error = current_error;
                estimate = table[i][j];
            }
        }
        // higher order is worse by a significant factor `safe`
        if (table[i][i] - table[i - 1][i - 1]).abs() >= safe * error {
            break;
        }
    }
    (estimate, error)
}

/// Test the gradient of a function.
/// * function: The function whose derivatives must be tested, takes one argument
/// * gradient: Computes the gradient of the function, to be tested.
/// * origin: The point at which the derivatives are computed.
/// * stepsize: The initial (maximal) step size for the finite difference method.
/// * tol: The allowed relative error on the derivative. Derivatives smaller than one
///   are compared with an absolute error of `tol`. The error estimate of Ridders' method
///   has to stay below the same bound.
/// The idea of this function comes from the [derivcheck](https://github.com/theochem/derivcheck)
/// Python package by T. Verstraelen.
pub fn assert_deriv<F, G>(function: F, gradient: G, origin: Array1<f64>, stepsize: f64, tol: f64)
where
    F: Fn(Array1<f64>) -> f64,
    G: Fn(Array1<f64>) -> Array1<f64>,
{
    let con: f64 = 1.4;
    let safe: f64 = 2.0;
    let maxiter: usize = 15;

    assert!(stepsize > 0.0, "The stepsize has to be > 0.0, but it is {}", stepsize);

    let analytic_grad: Array1<f64> = gradient(origin.clone());
    let mut correct: Vec<bool> = Vec::with_capacity(origin.len());

    debug!(
        "{: <5} {: >18} {: >18} {: >18} {: <8}",
        "Index", "Analytic", "Numerical", "Error", "Correct?"
    );
    for i in 0..origin.len() {
        let (numerical_deriv, deriv_error): (f64, f64) =
            ridders_method(&function, origin.view(), i, stepsize, con, safe, maxiter);
        let analytic_deriv: f64 = analytic_grad[i];
        let scale: f64 = numerical_deriv.abs().max(1.0);
        // an unreliable numerical derivative fails the check on its own
        let ok: bool = deriv_error <= tol * scale && (analytic_deriv - numerical_deriv).abs() <= tol * scale;
        debug!(
            "{: >5} {:>18.12e} {:>18.12e} {:>18.12e} {: >5}",
            i, analytic_deriv, numerical_deriv, deriv_error, ok
        );
        correct.push(ok);
    }
    assert!(
        !correct.contains(&false),
        "Gradient test failed: analytic {} differs from the numerical derivative",
        analytic_grad
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    // returns the sum of the square of all elements: y = x * x
    fn simple_function(values: Array1<f64>) -> f64 {
        values.iter().fold(0.0, |n, i| n + (i.powi(2)))
    }
    // returns the gradient of the function above: y' = 2 * x
    fn simple_gradient(values: Array1<f64>) -> Array1<f64> {
        2.0 * values
    }

    #[test]
    fn assert_deriv_simple_function() {
        let data: Array1<f64> = array![1.0, 2.0, 3.0, 4.0];
        assert_deriv(simple_function, simple_gradient, data, 0.01, 1e-10);
    }

    #[test]
    #[should_panic]
    fn assert_deriv_detects_wrong_gradient() {
        let data: Array1<f64> = array![1.0, 2.0];
        assert_deriv(simple_function, |x: Array1<f64>| 3.0 * x, data, 0.01, 1e-6);
    }

    #[test]
    #[should_panic]
    fn assert_deriv_rejects_an_unresolved_numerical_derivative() {
        // the initial step is far larger than the period, the extrapolation does not
        // converge although the analytic gradient is exact
        let frequency: f64 = 1000.0;
        assert_deriv(
            |x: Array1<f64>| (frequency * x[0]).sin(),
            |x: Array1<f64>| array![frequency * (frequency * x[0]).cos()],
            array![0.3],
            1.0,
            1e-6,
        );
    }

    #[test]
    fn ridders_derivative_of_exp() {
        let origin: Array1<f64> = array![0.5];
        let (deriv, error): (f64, f64) =
            ridders_method(|x: Array1<f64>| x[0].exp(), origin.view(), 0, 0.1, 1.4, 2.0, 15);
        assert!((deriv - 0.5_f64.exp()).abs() < 1e-10);
        assert!(error < 1e-8);
    }
}
