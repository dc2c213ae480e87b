use num_complex::Complex64;

/// Immutable polynomial with real coefficients, stored highest degree first.
///
/// This is the working currency of the rational-approximant construction:
/// products are coefficient convolutions, the even/odd parity splits map a
/// polynomial in `u` onto a polynomial in `u^2`, and the affine substitution
/// rewrites the dimensionless variable in terms of the Laplace variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Build from coefficients ordered highest degree first.
    /// Exact leading zeros are trimmed; the zero polynomial keeps one entry.
    pub fn new(coeffs: Vec<f64>) -> Self {
        let first = coeffs
            .iter()
            .position(|&c| c != 0.0)
            .unwrap_or(coeffs.len().saturating_sub(1));
        let coeffs = if coeffs.is_empty() {
            vec![0.0]
        } else {
            coeffs[first..].to_vec()
        };
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self { coeffs: vec![0.0] }
    }

    pub fn constant(c: f64) -> Self {
        Self { coeffs: vec![c] }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Coefficients, highest degree first.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn leading(&self) -> f64 {
        self.coeffs[0]
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0.0)
    }

    /// Polynomial product by coefficient convolution.
    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        let mut out = vec![0.0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Polynomial::new(out)
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let n = self.coeffs.len().max(other.coeffs.len());
        let mut out = vec![0.0; n];
        let off_a = n - self.coeffs.len();
        let off_b = n - other.coeffs.len();
        for (i, &a) in self.coeffs.iter().enumerate() {
            out[off_a + i] += a;
        }
        for (i, &b) in other.coeffs.iter().enumerate() {
            out[off_b + i] += b;
        }
        Polynomial::new(out)
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.scale(-1.0))
    }

    pub fn scale(&self, factor: f64) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|&c| c * factor).collect())
    }

    /// Keep the even-power coefficients, reinterpreted in the squared
    /// variable: `sum c_{2m} u^{2m}  ->  sum c_{2m} v^m` with `v = u^2`.
    pub fn even_part(&self) -> Polynomial {
        let d = self.degree();
        let m = d / 2;
        let mut out = vec![0.0; m + 1];
        for (i, &c) in self.coeffs.iter().enumerate() {
            let p = d - i;
            if p % 2 == 0 {
                out[m - p / 2] = c;
            }
        }
        Polynomial::new(out)
    }

    /// Keep the odd-power coefficients, with one factor of the variable
    /// removed: `sum c_{2m+1} u^{2m+1}  ->  sum c_{2m+1} v^m` with `v = u^2`.
    pub fn odd_part(&self) -> Polynomial {
        let d = self.degree();
        if d == 0 {
            return Polynomial::zero();
        }
        let m = (d - 1) / 2;
        let mut out = vec![0.0; m + 1];
        for (i, &c) in self.coeffs.iter().enumerate() {
            let p = d - i;
            if p % 2 == 1 {
                out[m - (p - 1) / 2] = c;
            }
        }
        Polynomial::new(out)
    }

    /// Substitute the variable affinely: returns `q` with `q(x) = p(c1*x + c0)`.
    pub fn compose_affine(&self, c1: f64, c0: f64) -> Polynomial {
        let lin = Polynomial::new(vec![c1, c0]);
        let mut acc = Polynomial::constant(self.coeffs[0]);
        for &c in &self.coeffs[1..] {
            acc = acc.mul(&lin).add(&Polynomial::constant(c));
        }
        acc
    }

    /// Divide through by the leading coefficient.
    pub fn monic(&self) -> Polynomial {
        self.scale(1.0 / self.coeffs[0])
    }

    /// Horner evaluation at a real argument.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Horner evaluation at a complex argument.
    pub fn eval_complex(&self, z: Complex64) -> Complex64 {
        self.coeffs
            .iter()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
    }
}
