use crate::discretization::grid::{resample_linear, AxialPos, GridError, RadialPos, SlabGrid};
#[allow(unused)]
use crate::numerics::timing::{
    finalize_and_print, record_assembly, record_linear_solve, reset_timing,
};
use crate::physics::material::ThermalMaterial;
use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[cfg(feature = "timing")]
use std::time::Instant;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("linear solve failed")]
    LinearSolveFailed,
    #[error("flux record is empty or inconsistent ({times} times, {values} values)")]
    InvalidFluxRecord { times: usize, values: usize },
}

/// Implicit finite-difference solver for the slab conduction problem,
/// 1D (`mr = 1`) or axisymmetric 2D.
///
/// Semi-discrete form `dT/dt = L T + f(t)` with the conduction operator `L`
/// assembled from the grid's node classification, then theta-weighted in
/// time: `(I - theta dt L) T_new = (I + (1-theta) dt L) T_old + c`.
/// The implicit matrix is constant, so it is LU-factorized once and reused
/// for every step. Step-size accuracy is the caller's responsibility; the
/// scheme itself is unconditionally stable.
pub struct FdSolver {
    pub mx: usize,
    pub mr: usize,
    pub n_steps: usize,
    /// Time weighting: 1.0 = backward Euler, 0.5 = Crank-Nicolson.
    pub theta: f64,
    /// Robin heat-transfer coefficient on the rear face x = ell, W/(m^2 K).
    pub h_rear: f64,
    /// Robin heat-transfer coefficient on the lateral face r = R, W/(m^2 K).
    pub h_side: f64,
    pub logging: bool,
}

impl Default for FdSolver {
    fn default() -> Self {
        Self {
            mx: 31,
            mr: 16,
            n_steps: 200,
            theta: 0.5,
            h_rear: 10.0,
            h_side: 10.0,
            logging: false,
        }
    }
}

/// Face temperature histories on the uniform output grid.
pub struct FdSolution {
    pub time: Vec<f64>,
    pub rear: Vec<f64>,
    pub front: Vec<f64>,
}

impl FdSolver {
    /// March the slab from a zero initial field under the given flux record
    /// (arbitrary, ascending sample times) applied at the heated face.
    pub fn solve(
        &self,
        material: &ThermalMaterial,
        flux_times: &[f64],
        flux_values: &[f64],
    ) -> Result<FdSolution, SolverError> {
        if flux_times.is_empty() || flux_times.len() != flux_values.len() {
            return Err(SolverError::InvalidFluxRecord {
                times: flux_times.len(),
                values: flux_values.len(),
            });
        }

        reset_timing();
        #[cfg(feature = "timing")]
        let solve_start = Instant::now();

        let grid = SlabGrid::new(
            material,
            self.mx,
            self.mr,
            self.n_steps,
            flux_times[0],
            flux_times[flux_times.len() - 1],
        )?;
        let time = grid.time_grid();
        let flux = resample_linear(flux_times, flux_values, &time);

        let (a_mat, b_mat, heated) = record_assembly(|| self.assemble(material, &grid))?;
        let factorized = b_mat.lu();

        if self.logging {
            println!(
                "Implicit march: {} nodes, {} steps, dt = {:.3e}",
                grid.node_count(),
                grid.n_steps - 1,
                grid.dt
            );
        }

        let rear_idx = grid.index(grid.mx - 1, 0);
        let front_idx = grid.index(0, 0);

        let mut temp: DVector<f64> = DVector::zeros(grid.node_count());
        let mut rear = Vec::with_capacity(grid.n_steps);
        let mut front = Vec::with_capacity(grid.n_steps);
        rear.push(material.gain_rear * temp[rear_idx]);
        front.push(material.gain_front * temp[front_idx]);

        for k in 0..grid.n_steps - 1 {
            let mut rhs = &a_mat * &temp;
            let drive = grid.dt * (self.theta * flux[k + 1] + (1.0 - self.theta) * flux[k]);
            for &(idx, coef) in &heated {
                rhs[idx] += drive * coef;
            }

            temp = record_linear_solve(|| {
                factorized.solve(&rhs).ok_or(SolverError::LinearSolveFailed)
            })?;

            rear.push(material.gain_rear * temp[rear_idx]);
            front.push(material.gain_front * temp[front_idx]);

            if self.logging {
                println!(
                    "Step {:>4} | t = {:.4e} | rear = {:.4e} | front = {:.4e}",
                    k + 1,
                    time[k + 1],
                    rear[k + 1],
                    front[k + 1]
                );
            }
        }

        #[cfg(feature = "timing")]
        finalize_and_print(solve_start.elapsed());

        Ok(FdSolution { time, rear, front })
    }

    /// Assemble the explicit/implicit step matrices and the forcing pattern.
    ///
    /// Each row sums an axial and (in 2D) a radial contribution selected by
    /// the node's classification; the Robin ghost eliminations put their
    /// `2 step h / lambda` corrections on the diagonal. The forcing pattern
    /// holds the heated front nodes (flux zeroed outside the heater radius)
    /// with the coefficient their ghost elimination moves into the
    /// right-hand side.
    #[allow(clippy::type_complexity)]
    fn assemble(
        &self,
        material: &ThermalMaterial,
        grid: &SlabGrid,
    ) -> Result<(DMatrix<f64>, DMatrix<f64>, Vec<(usize, f64)>), SolverError> {
        let n = grid.node_count();
        let diffusivity = material.diffusivity();
        let lambda = material.conductivity();
        let cx = diffusivity / (grid.dx * grid.dx);

        let mut lap = DMatrix::<f64>::zeros(n, n);
        for i in 0..grid.mx {
            for j in 0..grid.mr {
                let class = grid.class(i, j)?;
                let row = grid.index(i, j);

                match class.axial {
                    AxialPos::Front => {
                        lap[(row, row)] -= 2.0 * cx;
                        lap[(row, grid.index(i + 1, j))] += 2.0 * cx;
                    }
                    AxialPos::Interior => {
                        lap[(row, grid.index(i - 1, j))] += cx;
                        lap[(row, row)] -= 2.0 * cx;
                        lap[(row, grid.index(i + 1, j))] += cx;
                    }
                    AxialPos::Rear => {
                        lap[(row, grid.index(i - 1, j))] += 2.0 * cx;
                        lap[(row, row)] -= cx * (2.0 + 2.0 * grid.dx * self.h_rear / lambda);
                    }
                }

                if grid.is_one_dimensional() {
                    continue;
                }
                let cr = diffusivity / (grid.dr * grid.dr);
                match class.radial {
                    RadialPos::Axis => {
                        // Symmetry limit of the radial operator at r = 0.
                        lap[(row, row)] -= 4.0 * cr;
                        lap[(row, grid.index(i, j + 1))] += 4.0 * cr;
                    }
                    RadialPos::Interior => {
                        let half = grid.dr / (2.0 * grid.radius(j));
                        lap[(row, grid.index(i, j - 1))] += cr * (1.0 - half);
                        lap[(row, row)] -= 2.0 * cr;
                        lap[(row, grid.index(i, j + 1))] += cr * (1.0 + half);
                    }
                    RadialPos::Rim => {
                        let half = grid.dr / (2.0 * grid.radius(j));
                        lap[(row, grid.index(i, j - 1))] += 2.0 * cr;
                        lap[(row, row)] -=
                            cr * (2.0 + (1.0 + half) * 2.0 * grid.dr * self.h_side / lambda);
                    }
                }
            }
        }

        // Forcing pattern: the flux ghost elimination at the heated face.
        let coef = 2.0 * diffusivity / (lambda * grid.dx);
        let mut heated = Vec::new();
        for j in 0..grid.mr {
            let class = grid.class(0, j)?;
            debug_assert_eq!(class.axial, AxialPos::Front);
            if grid.is_one_dimensional() || grid.radius(j) <= material.heater_radius {
                heated.push((grid.index(0, j), coef));
            }
        }

        let identity = DMatrix::<f64>::identity(n, n);
        let a_mat = &identity + &lap * ((1.0 - self.theta) * grid.dt);
        let b_mat = &identity - &lap * (self.theta * grid.dt);
        Ok((a_mat, b_mat, heated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate() -> ThermalMaterial {
        ThermalMaterial::new(0.2, 1200.0, 1400.0, 5e-3, 30e-3, 10e-3, 1.0, 1.0).unwrap()
    }

    #[test]
    fn empty_flux_record_is_rejected() {
        let solver = FdSolver::default();
        assert!(matches!(
            solver.solve(&plate(), &[], &[]),
            Err(SolverError::InvalidFluxRecord { .. })
        ));
        assert!(matches!(
            solver.solve(&plate(), &[0.0, 1.0], &[1.0]),
            Err(SolverError::InvalidFluxRecord { .. })
        ));
    }

    #[test]
    fn theta_split_is_consistent() {
        let m = plate();
        let solver = FdSolver {
            mx: 4,
            mr: 3,
            n_steps: 5,
            ..FdSolver::default()
        };
        let grid = SlabGrid::new(&m, 4, 3, 5, 0.0, 1.0).unwrap();
        let (a_mat, b_mat, heated) = solver.assemble(&m, &grid).unwrap();
        assert_eq!(a_mat.nrows(), 12);
        // A + B = 2 I + (1 - 2 theta) dt L; for theta = 0.5 the operator
        // cancels entirely.
        let sum = &a_mat + &b_mat;
        for i in 0..12 {
            for j in 0..12 {
                let expected = if i == j { 2.0 } else { 0.0 };
                assert!((sum[(i, j)] - expected).abs() < 1e-12);
            }
        }
        // Heater covers r <= 10 mm of the 30 mm plate: on this coarse
        // radial grid (dr = 15 mm) only the axis node is driven.
        assert_eq!(heated.len(), 1);
        assert_eq!(heated[0].0, grid.index(0, 0));
    }
}
