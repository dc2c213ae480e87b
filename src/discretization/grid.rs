use crate::physics::material::ThermalMaterial;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid grid dimension: {name} = {value} (minimum {min})")]
    InvalidDimension {
        name: &'static str,
        value: usize,
        min: usize,
    },
    #[error("time span [{t0:.6e}, {t1:.6e}] is empty")]
    EmptyTimeSpan { t0: f64, t1: f64 },
    #[error("grid node ({i}, {j}) does not match any stencil case")]
    UnhandledCase { i: usize, j: usize },
}

/// Position of a node along the slab thickness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxialPos {
    /// Heated face, x = 0.
    Front,
    Interior,
    /// Instrumented face, x = ell.
    Rear,
}

/// Position of a node along the plate radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadialPos {
    /// Symmetry axis, r = 0.
    Axis,
    Interior,
    /// Lateral face, r = R.
    Rim,
}

/// Stencil classification of one grid node. The axial and radial tags
/// combine into the nine interior/edge/corner cases of the (x, r)
/// rectangle; both the matrix-assembly pass and the forcing-vector pass
/// select their coefficients from this, computed once at construction.
#[derive(Clone, Copy, Debug)]
pub struct NodeClass {
    pub axial: AxialPos,
    pub radial: RadialPos,
}

/// Uniform mesh over the slab cross-section and the experiment time span.
/// `mr = 1` selects the 1D geometry: no radial operator, `dr = 0`.
/// Owned by a single solve invocation.
pub struct SlabGrid {
    pub mx: usize,
    pub mr: usize,
    pub n_steps: usize,
    pub dx: f64,
    pub dr: f64,
    pub dt: f64,
    pub t_start: f64,
    classes: Vec<NodeClass>,
}

impl SlabGrid {
    pub fn new(
        material: &ThermalMaterial,
        mx: usize,
        mr: usize,
        n_steps: usize,
        t_start: f64,
        t_end: f64,
    ) -> Result<Self, GridError> {
        if mx < 2 {
            return Err(GridError::InvalidDimension {
                name: "mx",
                value: mx,
                min: 2,
            });
        }
        if mr < 1 {
            return Err(GridError::InvalidDimension {
                name: "mr",
                value: mr,
                min: 1,
            });
        }
        if n_steps < 2 {
            return Err(GridError::InvalidDimension {
                name: "n_steps",
                value: n_steps,
                min: 2,
            });
        }
        if !(t_end > t_start) {
            return Err(GridError::EmptyTimeSpan {
                t0: t_start,
                t1: t_end,
            });
        }

        let dx = material.thickness / (mx - 1) as f64;
        let dr = if mr > 1 {
            material.radius / (mr - 1) as f64
        } else {
            0.0
        };
        let dt = (t_end - t_start) / (n_steps - 1) as f64;

        let mut classes = Vec::with_capacity(mx * mr);
        for i in 0..mx {
            for j in 0..mr {
                let axial = if i == 0 {
                    AxialPos::Front
                } else if i == mx - 1 {
                    AxialPos::Rear
                } else {
                    AxialPos::Interior
                };
                let radial = if j == 0 {
                    RadialPos::Axis
                } else if j == mr - 1 {
                    RadialPos::Rim
                } else {
                    RadialPos::Interior
                };
                classes.push(NodeClass { axial, radial });
            }
        }

        Ok(Self {
            mx,
            mr,
            n_steps,
            dx,
            dr,
            dt,
            t_start,
            classes,
        })
    }

    pub fn node_count(&self) -> usize {
        self.mx * self.mr
    }

    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.mr + j
    }

    /// Classification lookup. An out-of-range pair is the unclassified-node
    /// defect: fatal for the caller, never recovered.
    pub fn class(&self, i: usize, j: usize) -> Result<NodeClass, GridError> {
        if i >= self.mx || j >= self.mr {
            return Err(GridError::UnhandledCase { i, j });
        }
        Ok(self.classes[self.index(i, j)])
    }

    pub fn radius(&self, j: usize) -> f64 {
        j as f64 * self.dr
    }

    pub fn is_one_dimensional(&self) -> bool {
        self.mr == 1
    }

    pub fn time_grid(&self) -> Vec<f64> {
        (0..self.n_steps)
            .map(|k| self.t_start + k as f64 * self.dt)
            .collect()
    }
}

/// Linear interpolation of a sampled signal onto an arbitrary grid, clamped
/// to the record's endpoint values outside its span. The sample times must
/// be ascending.
pub fn resample_linear(times: &[f64], values: &[f64], grid: &[f64]) -> Vec<f64> {
    grid.iter()
        .map(|&t| {
            if t <= times[0] {
                values[0]
            } else if t >= times[times.len() - 1] {
                values[values.len() - 1]
            } else {
                let k = times.partition_point(|&ts| ts <= t) - 1;
                let w = (t - times[k]) / (times[k + 1] - times[k]);
                values[k] + w * (values[k + 1] - values[k])
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate() -> ThermalMaterial {
        ThermalMaterial::new(0.2, 1200.0, 1400.0, 5e-3, 30e-3, 10e-3, 1.0, 1.0).unwrap()
    }

    #[test]
    fn classification_covers_the_nine_cases() {
        let g = SlabGrid::new(&plate(), 4, 3, 10, 0.0, 1.0).unwrap();
        let mut corners = 0;
        let mut edges = 0;
        let mut interior = 0;
        for i in 0..4 {
            for j in 0..3 {
                let c = g.class(i, j).unwrap();
                let ax_edge = c.axial != AxialPos::Interior;
                let rad_edge = c.radial != RadialPos::Interior;
                match (ax_edge, rad_edge) {
                    (true, true) => corners += 1,
                    (false, false) => interior += 1,
                    _ => edges += 1,
                }
            }
        }
        assert_eq!(corners, 4);
        assert_eq!(edges, 2 * 2 + 2 * 1); // two x-edges of 2 nodes, two r-edges of 1
        assert_eq!(interior, 2);
    }

    #[test]
    fn out_of_range_lookup_is_the_unhandled_case() {
        let g = SlabGrid::new(&plate(), 4, 3, 10, 0.0, 1.0).unwrap();
        assert!(matches!(
            g.class(4, 0),
            Err(GridError::UnhandledCase { i: 4, j: 0 })
        ));
        assert!(matches!(
            g.class(0, 3),
            Err(GridError::UnhandledCase { i: 0, j: 3 })
        ));
    }

    #[test]
    fn one_dimensional_grid_has_no_radial_step() {
        let g = SlabGrid::new(&plate(), 5, 1, 10, 0.0, 1.0).unwrap();
        assert!(g.is_one_dimensional());
        assert_eq!(g.dr, 0.0);
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        let m = plate();
        assert!(SlabGrid::new(&m, 1, 3, 10, 0.0, 1.0).is_err());
        assert!(SlabGrid::new(&m, 4, 0, 10, 0.0, 1.0).is_err());
        assert!(SlabGrid::new(&m, 4, 3, 1, 0.0, 1.0).is_err());
        assert!(SlabGrid::new(&m, 4, 3, 10, 1.0, 1.0).is_err());
    }

    #[test]
    fn resampling_interpolates_and_clamps() {
        let times = [0.0, 1.0, 3.0];
        let values = [0.0, 2.0, 2.0];
        let out = resample_linear(&times, &values, &[-1.0, 0.5, 2.0, 5.0]);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 2.0]);
    }
}
