use thiserror::Error;

/// Bracket did not satisfy the bisection precondition: no sign change on
/// either half and the midpoint is not an exact zero.
#[derive(Debug, Error)]
#[error(
    "invalid bisection bracket [{a:.6e}, {b:.6e}]: f(a) = {fa:.6e}, f(b) = {fb:.6e} (no sign change)"
)]
pub struct BracketingError {
    pub a: f64,
    pub b: f64,
    pub fa: f64,
    pub fb: f64,
}

pub struct BisectionConfig {
    /// Relative change of the midpoint below which iteration stops.
    pub rel_tol: f64,
    /// Iteration budget. Exhausting it is not an error: the last midpoint
    /// is returned as the best available estimate.
    pub max_iter: u32,
    pub logging: bool,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            rel_tol: 1e-12,
            max_iter: 200,
            logging: false,
        }
    }
}

/// Classic bisection on a bracketed root of a continuous scalar function.
///
/// At each iteration the half with a sign change keeps the midpoint; an exact
/// zero at the midpoint returns immediately. A bracket where neither holds
/// fails with [`BracketingError`] before any halving takes place.
pub fn bisect<F>(f: F, a: f64, b: f64, config: &BisectionConfig) -> Result<f64, BracketingError>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let (mut fa, mut fb) = (f(a), f(b));
    let mut mid = 0.5 * (a + b);

    for iter in 0..config.max_iter {
        let fm = f(mid);

        if fa * fm < 0.0 {
            b = mid;
            fb = fm;
        } else if fb * fm < 0.0 {
            a = mid;
            fa = fm;
        } else if fm == 0.0 {
            return Ok(mid);
        } else {
            return Err(BracketingError { a, b, fa, fb });
        }

        let next = 0.5 * (a + b);
        let delta = (next - mid).abs();
        if config.logging {
            println!(
                "bisect {:>3} | x = {:.12e} | f = {:+.3e} | step = {:.3e}",
                iter, next, fm, delta
            );
        }
        let scale = next.abs().max(1.0);
        mid = next;
        if delta <= config.rel_tol * scale {
            break;
        }
    }

    Ok(mid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn converges_to_positive_root() {
        let cfg = BisectionConfig::default();
        let root = bisect(|x| x * x - 4.0, 0.0, 3.0, &cfg).expect("valid bracket");
        assert_relative_eq!(root, 2.0, max_relative = 1e-10);
    }

    #[test]
    fn converges_to_negative_root() {
        let cfg = BisectionConfig::default();
        let root = bisect(|x| x * x - 4.0, -3.0, 0.0, &cfg).expect("valid bracket");
        assert_relative_eq!(root, -2.0, max_relative = 1e-10);
    }

    #[test]
    fn same_sign_bracket_is_a_typed_error() {
        let cfg = BisectionConfig::default();
        let err = bisect(|x| x * x + 1.0, -1.0, 1.0, &cfg).unwrap_err();
        assert!(err.fa > 0.0 && err.fb > 0.0);
    }

    #[test]
    fn iteration_cap_returns_best_estimate() {
        let cfg = BisectionConfig {
            rel_tol: 0.0,
            max_iter: 8,
            logging: false,
        };
        let root = bisect(|x| x * x - 4.0, 0.0, 3.0, &cfg).expect("valid bracket");
        // 8 halvings of a width-3 bracket: within ~0.012 of the root.
        assert!((root - 2.0).abs() < 3.0 / 2.0_f64.powi(8));
    }
}
