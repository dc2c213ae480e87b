use crate::numerics::bisection::{bisect, BisectionConfig, BracketingError};
use crate::physics::bessel::{j0, j1, J0_ZEROS, J1_ZEROS};
use crate::physics::material::ThermalMaterial;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModeSolverError {
    #[error("eigenvalue bracket failed for mode {mode}: {source}")]
    Bracketing {
        mode: usize,
        #[source]
        source: BracketingError,
    },
    #[error("series order {order} exceeds the zero-table budget of {max}")]
    OrderTooLarge { order: usize, max: usize },
}

/// One radial eigenmode: eigenvalue `alpha` (1/m) and the Sturm-Liouville
/// norm of its eigenfunction J0(alpha r) over the plate cross-section.
#[derive(Clone, Copy, Debug)]
pub struct RadialMode {
    pub alpha: f64,
    pub norm: f64,
}

/// Ordered eigenmodes of the radial Robin problem, one per bracket.
#[derive(Clone, Debug)]
pub struct ModeSet {
    modes: Vec<RadialMode>,
}

impl ModeSet {
    pub fn modes(&self) -> &[RadialMode] {
        &self.modes
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// The single uniform mode of the 1D geometry: alpha = 0, with the norm
    /// of the constant eigenfunction over the plate.
    pub fn uniform(material: &ThermalMaterial) -> Self {
        let r = material.radius;
        Self {
            modes: vec![RadialMode {
                alpha: 0.0,
                norm: 0.5 * r * r,
            }],
        }
    }
}

/// Finds the radial eigenvalues of the lateral Robin boundary condition.
///
/// The eigenvalues solve `h J0(alpha R) = lambda alpha J1(alpha R)`.
/// Interlacing of the J0/J1 zeros guarantees exactly one root per bracket:
/// mode 0 lies in (0, j0_1/R) and mode i+1 in (j1_{i+1}/R, j0_{i+2}/R),
/// so every bracket hands bisection a sign change as long as `h > 0`.
pub struct RadialModeSolver {
    /// Robin heat-transfer coefficient on the lateral face, W/(m^2 K).
    pub h_side: f64,
    /// Series order; the mode count is `series_order + 1`.
    pub series_order: usize,
    pub bisection: BisectionConfig,
}

impl RadialModeSolver {
    pub fn new(h_side: f64, series_order: usize) -> Self {
        Self {
            h_side,
            series_order,
            bisection: BisectionConfig::default(),
        }
    }

    pub fn solve(&self, material: &ThermalMaterial) -> Result<ModeSet, ModeSolverError> {
        let max_order = J1_ZEROS.len();
        if self.series_order > max_order {
            return Err(ModeSolverError::OrderTooLarge {
                order: self.series_order,
                max: max_order,
            });
        }

        let r = material.radius;
        let lambda = material.conductivity();
        let h = self.h_side;
        let characteristic = |alpha: f64| h * j0(alpha * r) - lambda * alpha * j1(alpha * r);

        let mut modes = Vec::with_capacity(self.series_order + 1);
        for i in 0..=self.series_order {
            let (lo, hi) = if i == 0 {
                (0.0, J0_ZEROS[0] / r)
            } else {
                (J1_ZEROS[i - 1] / r, J0_ZEROS[i] / r)
            };
            let alpha = bisect(&characteristic, lo, hi, &self.bisection)
                .map_err(|source| ModeSolverError::Bracketing { mode: i, source })?;
            modes.push(RadialMode {
                alpha,
                norm: mode_norm(alpha, r),
            });
        }

        Ok(ModeSet { modes })
    }
}

/// Closed-form norm integral_0^R J0(alpha r)^2 r dr of a Robin eigenfunction.
fn mode_norm(alpha: f64, r: f64) -> f64 {
    let ar = alpha * r;
    0.5 * r * r * (j0(ar).powi(2) + j1(ar).powi(2))
}
