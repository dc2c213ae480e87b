//! Minimal linear time-invariant simulation support for the assembled
//! per-mode transfer functions: controllable-canonical state-space
//! realization, unconditionally stable trapezoidal time stepping, and
//! frequency-response evaluation.

use crate::physics::rational::RationalApproximant;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LtiError {
    #[error("improper transfer function: numerator degree {num} exceeds denominator degree {den}")]
    Improper { num: usize, den: usize },
    #[error("trapezoidal step matrix is singular for dt = {dt:.3e}")]
    SingularStepMatrix { dt: f64 },
}

/// Controllable-canonical realization `x' = A x + B u`, `y = C x + D u`.
///
/// Equal numerator/denominator degrees are handled by deflating the
/// feed-through term `D` out of the numerator.
pub struct StateSpace {
    a: DMatrix<f64>,
    b: DVector<f64>,
    c: DVector<f64>,
    d: f64,
}

impl StateSpace {
    pub fn from_transfer_function(tf: &RationalApproximant) -> Result<Self, LtiError> {
        let n = tf.denominator.degree();
        if tf.numerator.degree() > n {
            return Err(LtiError::Improper {
                num: tf.numerator.degree(),
                den: n,
            });
        }

        let den = tf.denominator.monic();
        let num = tf.numerator.scale(1.0 / tf.denominator.leading());

        let (d, rem) = if num.degree() == n && n > 0 {
            let d0 = num.leading();
            (d0, num.sub(&den.scale(d0)))
        } else if n == 0 {
            (num.leading() / den.leading(), num)
        } else {
            (0.0, num)
        };

        let mut a = DMatrix::zeros(n, n);
        for i in 0..n.saturating_sub(1) {
            a[(i, i + 1)] = 1.0;
        }
        // den = s^n + a_{n-1} s^{n-1} + ... + a_0; companion bottom row.
        for (i, &coeff) in den.coeffs()[1..].iter().rev().enumerate() {
            a[(n - 1, i)] = -coeff;
        }

        let mut b = DVector::zeros(n);
        if n > 0 {
            b[n - 1] = 1.0;
        }

        let mut c = DVector::zeros(n);
        for (i, &coeff) in rem.coeffs().iter().rev().enumerate() {
            if i < n {
                c[i] = coeff;
            }
        }

        Ok(Self { a, b, c, d })
    }

    pub fn order(&self) -> usize {
        self.a.nrows()
    }

    /// Time response to an input sampled on a uniform grid of step `dt`,
    /// from a zero initial state.
    ///
    /// Trapezoidal stepping: the step matrix is factorized once and the
    /// input is taken piecewise linear between samples. A-stable, so the
    /// fast poles of high-order approximants cannot blow up the march.
    pub fn simulate(&self, input: &[f64], dt: f64) -> Result<Vec<f64>, LtiError> {
        let n = self.order();
        if n == 0 {
            return Ok(input.iter().map(|&u| self.d * u).collect());
        }

        let identity = DMatrix::<f64>::identity(n, n);
        let plus = &identity + &self.a * (0.5 * dt);
        let minus = (&identity - &self.a * (0.5 * dt)).lu();

        let mut x = DVector::<f64>::zeros(n);
        let mut output = Vec::with_capacity(input.len());
        for k in 0..input.len() {
            output.push(self.c.dot(&x) + self.d * input[k]);
            if k + 1 < input.len() {
                let rhs = &plus * &x + &self.b * (0.5 * dt * (input[k] + input[k + 1]));
                x = minus
                    .solve(&rhs)
                    .ok_or(LtiError::SingularStepMatrix { dt })?;
            }
        }
        Ok(output)
    }
}

/// Frequency response H(j omega) of a rational transfer function.
pub fn frequency_response(tf: &RationalApproximant, omega: f64) -> Complex64 {
    let jw = Complex64::new(0.0, omega);
    tf.numerator.eval_complex(jw) / tf.denominator.eval_complex(jw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::polynomial::Polynomial;
    use approx::assert_relative_eq;

    fn first_order_lag() -> RationalApproximant {
        RationalApproximant {
            numerator: Polynomial::new(vec![1.0]),
            denominator: Polynomial::new(vec![1.0, 1.0]),
        }
    }

    #[test]
    fn step_response_of_first_order_lag() {
        let ss = StateSpace::from_transfer_function(&first_order_lag()).unwrap();
        let dt = 0.01;
        let steps = 301;
        let input = vec![1.0; steps];
        let y = ss.simulate(&input, dt).unwrap();
        for (k, &yk) in y.iter().enumerate().step_by(50) {
            let t = k as f64 * dt;
            let exact = 1.0 - (-t).exp();
            assert_relative_eq!(yk, exact, epsilon = 1e-4);
        }
    }

    #[test]
    fn feedthrough_deflation_for_equal_degrees() {
        // (s + 2)/(s + 1) = 1 + 1/(s + 1)
        let tf = RationalApproximant {
            numerator: Polynomial::new(vec![1.0, 2.0]),
            denominator: Polynomial::new(vec![1.0, 1.0]),
        };
        let ss = StateSpace::from_transfer_function(&tf).unwrap();
        let y = ss.simulate(&[1.0, 1.0], 1e-6).unwrap();
        // At t = 0 the response jumps straight to the feed-through value.
        assert_relative_eq!(y[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn frequency_response_of_first_order_lag() {
        let tf = first_order_lag();
        let h = frequency_response(&tf, 1.0);
        assert_relative_eq!(h.norm(), 1.0 / 2.0_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(h.arg(), -std::f64::consts::FRAC_PI_4, max_relative = 1e-12);
    }

    #[test]
    fn improper_transfer_function_is_rejected() {
        let tf = RationalApproximant {
            numerator: Polynomial::new(vec![1.0, 0.0, 0.0]),
            denominator: Polynomial::new(vec![1.0, 1.0]),
        };
        assert!(matches!(
            StateSpace::from_transfer_function(&tf),
            Err(LtiError::Improper { .. })
        ));
    }
}
