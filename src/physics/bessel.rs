//! Bessel functions of the first kind, orders 0 and 1, plus the zero tables
//! used to bracket radial eigenvalues.
//!
//! Evaluation uses the classic rational fits for |x| < 8 and the asymptotic
//! amplitude/phase forms beyond (Abramowitz & Stegun 9.4.1-9.4.6), accurate
//! to about 1e-8 absolute, which is far below every tolerance in this crate.

/// First 21 positive zeros of J0.
pub const J0_ZEROS: [f64; 21] = [
    2.404825557695773,
    5.520078110286311,
    8.653727912911012,
    11.791534439014281,
    14.930917708487785,
    18.071063967910922,
    21.211636629879258,
    24.352471530749302,
    27.493479132040254,
    30.634606468431975,
    33.775820213573568,
    36.917098353664044,
    40.058425764628239,
    43.199791713176730,
    46.341188371661814,
    49.482609897397817,
    52.624051841114996,
    55.765510755019979,
    58.906983926080942,
    62.048469190227170,
    65.189964800206860,
];

/// First 20 positive zeros of J1.
pub const J1_ZEROS: [f64; 20] = [
    3.831705970207512,
    7.015586669815619,
    10.173468135062722,
    13.323691936314223,
    16.470630050877633,
    19.615858510468242,
    22.760084380592772,
    25.903672087618383,
    29.046828534916855,
    32.189679910974404,
    35.332307550083865,
    38.474766234771615,
    41.617094212814450,
    44.759318997652822,
    47.901460887185447,
    51.043535183571508,
    54.185553641061319,
    57.327525437901009,
    60.469457845347495,
    63.611356698481245,
];

/// J0(x).
pub fn j0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = 57568490574.0
            + y * (-13362590354.0
                + y * (651619640.7
                    + y * (-11214424.18 + y * (77392.33017 + y * (-184.9052456)))));
        let den = 57568490411.0
            + y * (1029532985.0 + y * (9494680.718 + y * (59272.64853 + y * (267.8532712 + y))));
        num / den
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 0.785398164;
        let p = 1.0
            + y * (-0.1098628627e-2
                + y * (0.2734510407e-4 + y * (-0.2073370639e-5 + y * 0.2093887211e-6)));
        let q = -0.1562499995e-1
            + y * (0.1430488765e-3
                + y * (-0.6911147651e-5 + y * (0.7621095161e-6 + y * (-0.934935152e-7))));
        (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q)
    }
}

/// J1(x).
pub fn j1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        let num = x
            * (72362614232.0
                + y * (-7895059235.0
                    + y * (242396853.1
                        + y * (-2972611.439 + y * (15704.48260 + y * (-30.16036606))))));
        let den = 144725228442.0
            + y * (2300535178.0 + y * (18583304.74 + y * (99447.43394 + y * (376.9991397 + y))));
        num / den
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 2.356194491;
        let p = 1.0
            + y * (0.183105e-2
                + y * (-0.3516396496e-4 + y * (0.2457520174e-5 + y * (-0.240337019e-6))));
        let q = 0.04687499995
            + y * (-0.2002690873e-3
                + y * (0.8449199096e-5 + y * (-0.88228987e-6 + y * 0.105787412e-6)));
        let val = (0.636619772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q);
        if x < 0.0 {
            -val
        } else {
            val
        }
    }
}

/// Coupling integral of a uniform flux disk of radius `r0` against the radial
/// eigenfunction J0(alpha r):  integral_0^r0 J0(alpha r) r dr.
///
/// Closed form (r0/alpha) J1(alpha r0); the alpha -> 0 limit is r0^2/2.
pub fn disk_coupling(alpha: f64, r0: f64) -> f64 {
    if alpha * r0 == 0.0 {
        0.5 * r0 * r0
    } else {
        r0 / alpha * j1(alpha * r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_values() {
        assert_relative_eq!(j0(0.0), 1.0, epsilon = 1e-9);
        assert_relative_eq!(j0(1.0), 0.7651976865579666, epsilon = 1e-7);
        assert_relative_eq!(j0(5.0), -0.17759677131433830, epsilon = 1e-7);
        assert_relative_eq!(j1(0.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(j1(1.0), 0.4400505857449335, epsilon = 1e-7);
        assert_relative_eq!(j1(5.0), -0.3275791375914652, epsilon = 1e-7);
        // Asymptotic branch.
        assert_relative_eq!(j0(10.0), -0.2459357644513483, epsilon = 1e-7);
        assert_relative_eq!(j1(10.0), 0.04347274616886144, epsilon = 1e-7);
    }

    #[test]
    fn tabulated_zeros_are_zeros() {
        for &z in &J0_ZEROS {
            assert!(j0(z).abs() < 1e-6, "J0({z}) = {}", j0(z));
        }
        for &z in &J1_ZEROS {
            assert!(j1(z).abs() < 1e-6, "J1({z}) = {}", j1(z));
        }
    }

    #[test]
    fn zero_tables_interlace() {
        // j0_1 < j1_1 < j0_2 < j1_2 < ... -- the property the eigenvalue
        // brackets rely on.
        for k in 0..J1_ZEROS.len() {
            assert!(J0_ZEROS[k] < J1_ZEROS[k]);
            assert!(J1_ZEROS[k] < J0_ZEROS[k + 1]);
        }
    }

    #[test]
    fn disk_coupling_limit() {
        let r0 = 0.01;
        assert_relative_eq!(disk_coupling(0.0, r0), 0.5 * r0 * r0);
        // Small-argument continuity against the limit.
        assert_relative_eq!(
            disk_coupling(1e-6, r0),
            0.5 * r0 * r0,
            max_relative = 1e-9
        );
    }
}
