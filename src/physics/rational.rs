//! Rational approximation of the transcendental slab-conduction transfer
//! function.
//!
//! The Laplace-domain solution of the 1D slab is built from exp(+-u) with
//! `u = sqrt((ell^2/a) s)`. Both faces are expressed through a pair of
//! half-exponential polynomials `P(u) ~ exp(u/2)` and `Q(u) = P(-u)`:
//!
//!   cosh u ~ (P^2 + Q^2) / (2PQ),   sinh u ~ (P^2 - Q^2) / (2PQ)
//!
//! After combining with the boundary terms, the rear-face expression is even
//! in `u` and the front-face expression odd, so the parity split turns each
//! into a genuine rational function of `xi = u^2 = (ell^2/a) s`. The discarded
//! coefficients are analytically zero; the split is exact, not a truncation.

use crate::numerics::polynomial::Polynomial;
use crate::physics::material::ThermalMaterial;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApproxKind {
    /// Two-sided truncated series of exp(+-u/2).
    Taylor,
    /// Diagonal [n/n] Pade approximant of the exponential.
    Pade,
}

#[derive(Clone, Copy, Debug)]
pub struct ApproxConfig {
    pub order: usize,
    pub kind: ApproxKind,
}

impl Default for ApproxConfig {
    fn default() -> Self {
        Self {
            order: 10,
            kind: ApproxKind::Taylor,
        }
    }
}

/// Numerator/denominator pair of one low-order transfer function, with the
/// denominator normalized monic after variable substitution.
#[derive(Clone, Debug)]
pub struct RationalApproximant {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlabFace {
    /// Heated face, x = 0.
    Front,
    /// Instrumented face, x = ell.
    Rear,
}

/// Half-exponential pair: `P(u) ~ exp(u/2)` and its reflection `Q(u) = P(-u)`.
/// Coefficients are returned highest degree first.
pub fn half_exponential_pair(order: usize, kind: ApproxKind) -> (Polynomial, Polynomial) {
    let n = order;
    let mut ascending = Vec::with_capacity(n + 1);
    let mut c = 1.0;
    ascending.push(c);
    for k in 0..n {
        c *= match kind {
            ApproxKind::Taylor => 0.5 / (k + 1) as f64,
            ApproxKind::Pade => (n - k) as f64 / (((2 * n - k) * (k + 1)) as f64),
        };
        ascending.push(c);
    }

    let p: Vec<f64> = ascending.iter().rev().copied().collect();
    let q: Vec<f64> = ascending
        .iter()
        .enumerate()
        .map(|(k, &c)| if k % 2 == 0 { c } else { -c })
        .rev()
        .collect();
    (Polynomial::new(p), Polynomial::new(q))
}

/// Transfer function of one face in the dimensionless variable
/// `xi = (ell^2/a) s`, before any per-mode shift.
///
/// The boundary products `A = E + h` and `B = h - E` carry the physics of the
/// rear Robin exchange, with `E = (lambda/ell) u` the effusivity term
/// (`lambda u / ell = b sqrt(s)`).
pub fn face_kernel(
    material: &ThermalMaterial,
    h_rear: f64,
    face: SlabFace,
    config: &ApproxConfig,
) -> (Polynomial, Polynomial) {
    let (p, q) = half_exponential_pair(config.order, config.kind);
    let e = material.conductivity() / material.thickness;
    let a_prod = Polynomial::new(vec![e, h_rear]);
    let b_prod = Polynomial::new(vec![-e, h_rear]);

    let p2 = p.mul(&p);
    let q2 = q.mul(&q);
    let d_full = p2.mul(&a_prod).add(&q2.mul(&b_prod));

    match face {
        SlabFace::Rear => {
            let num = p.mul(&q).scale(2.0).even_part();
            let den = d_full.even_part();
            (num, den)
        }
        SlabFace::Front => {
            let a_minus = Polynomial::new(vec![e, -h_rear]);
            let num = p2.mul(&a_prod).add(&q2.mul(&a_minus)).odd_part();
            let den = Polynomial::new(vec![1.0, 0.0]).mul(&d_full).scale(e).odd_part();
            (num, den)
        }
    }
}

/// One mode's transfer function in the Laplace variable: substitutes
/// `xi = (ell^2/a) s + (alpha ell)^2` into the face kernel and renormalizes
/// the denominator monic.
pub fn modal_transfer_function(
    material: &ThermalMaterial,
    h_rear: f64,
    face: SlabFace,
    config: &ApproxConfig,
    alpha: f64,
) -> RationalApproximant {
    let (num, den) = face_kernel(material, h_rear, face, config);
    let ell = material.thickness;
    let c1 = ell * ell / material.diffusivity();
    let c0 = (alpha * ell).powi(2);

    let num_s = num.compose_affine(c1, c0);
    let den_s = den.compose_affine(c1, c0);
    let lead = den_s.leading();
    RationalApproximant {
        numerator: num_s.scale(1.0 / lead),
        denominator: den_s.scale(1.0 / lead),
    }
}
