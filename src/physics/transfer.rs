//! Assembly of the reduced-order conduction model: one low-order transfer
//! function per radial mode, weighted by the mode's coupling to the heated
//! disk, summed into frequency and time responses for both faces.

use crate::numerics::lti::{frequency_response, LtiError, StateSpace};
use crate::physics::bessel::disk_coupling;
use crate::physics::material::ThermalMaterial;
use crate::physics::modes::ModeSet;
use crate::physics::rational::{
    modal_transfer_function, ApproxConfig, RationalApproximant, SlabFace,
};
use num_complex::Complex64;

/// Logarithmically spaced angular-frequency grid for Bode evaluation.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyBand {
    pub omega_min: f64,
    pub omega_max: f64,
    pub points: usize,
}

impl Default for FrequencyBand {
    fn default() -> Self {
        Self {
            omega_min: 1e-3,
            omega_max: 1e2,
            points: 200,
        }
    }
}

impl FrequencyBand {
    pub fn omegas(&self) -> Vec<f64> {
        let ratio = self.omega_max / self.omega_min;
        (0..self.points)
            .map(|i| {
                let t = i as f64 / (self.points - 1).max(1) as f64;
                self.omega_min * ratio.powf(t)
            })
            .collect()
    }
}

/// One radial mode's contribution: its low-order transfer function and the
/// weight `gain * coupling_integral / norm` it enters the mode sum with.
#[derive(Clone, Debug)]
pub struct ModalTransferFunction {
    pub alpha: f64,
    pub weight: f64,
    pub tf: RationalApproximant,
}

pub struct FaceResponse {
    pub magnitude: Vec<f64>,
    pub phase: Vec<f64>,
}

pub struct FrequencyResponse {
    pub omega: Vec<f64>,
    pub rear: FaceResponse,
    pub front: FaceResponse,
}

/// Builds [`ConductionModel`]s from a mode set and an approximation choice.
pub struct TransferFunctionAssembler {
    /// Robin heat-transfer coefficient on the rear face, W/(m^2 K).
    pub h_rear: f64,
    pub config: ApproxConfig,
}

impl TransferFunctionAssembler {
    pub fn new(h_rear: f64, config: ApproxConfig) -> Self {
        Self { h_rear, config }
    }

    /// Axisymmetric model: one weighted transfer function per radial mode
    /// and face. The weight couples the uniform heater-disk flux into the
    /// mode and evaluates the response on the axis, where J0(0) = 1.
    pub fn assemble(&self, material: &ThermalMaterial, modes: &ModeSet) -> ConductionModel {
        let build = |face: SlabFace| {
            let gain = match face {
                SlabFace::Front => material.gain_front,
                SlabFace::Rear => material.gain_rear,
            };
            modes
                .modes()
                .iter()
                .map(|mode| ModalTransferFunction {
                    alpha: mode.alpha,
                    weight: gain * disk_coupling(mode.alpha, material.heater_radius) / mode.norm,
                    tf: modal_transfer_function(
                        material,
                        self.h_rear,
                        face,
                        &self.config,
                        mode.alpha,
                    ),
                })
                .collect()
        };
        ConductionModel {
            rear: build(SlabFace::Rear),
            front: build(SlabFace::Front),
        }
    }

    /// Purely one-dimensional model: the single uniform mode with unit
    /// coupling (the flux covers the whole cross-section, lateral losses
    /// do not exist). Matches the finite-difference solver's `mr = 1` path.
    pub fn assemble_one_dimensional(&self, material: &ThermalMaterial) -> ConductionModel {
        let build = |face: SlabFace| {
            let gain = match face {
                SlabFace::Front => material.gain_front,
                SlabFace::Rear => material.gain_rear,
            };
            vec![ModalTransferFunction {
                alpha: 0.0,
                weight: gain,
                tf: modal_transfer_function(material, self.h_rear, face, &self.config, 0.0),
            }]
        };
        ConductionModel {
            rear: build(SlabFace::Rear),
            front: build(SlabFace::Front),
        }
    }
}

/// The assembled reduced-order model of the slab: per-mode transfer
/// functions for both faces, ready for frequency evaluation or hand-off to
/// time-domain simulation.
pub struct ConductionModel {
    pub rear: Vec<ModalTransferFunction>,
    pub front: Vec<ModalTransferFunction>,
}

impl ConductionModel {
    pub fn face(&self, face: SlabFace) -> &[ModalTransferFunction] {
        match face {
            SlabFace::Front => &self.front,
            SlabFace::Rear => &self.rear,
        }
    }

    /// Complex mode-sum response of one face at a single angular frequency.
    pub fn response_at(&self, face: SlabFace, omega: f64) -> Complex64 {
        self.face(face)
            .iter()
            .map(|m| frequency_response(&m.tf, omega) * m.weight)
            .sum()
    }

    pub fn frequency_response(&self, band: &FrequencyBand) -> FrequencyResponse {
        let omega = band.omegas();
        let evaluate = |face: SlabFace| {
            let values: Vec<Complex64> = omega.iter().map(|&w| self.response_at(face, w)).collect();
            FaceResponse {
                magnitude: values.iter().map(|h| h.norm()).collect(),
                phase: values.iter().map(|h| h.arg()).collect(),
            }
        };
        FrequencyResponse {
            omega: omega.clone(),
            rear: evaluate(SlabFace::Rear),
            front: evaluate(SlabFace::Front),
        }
    }

    /// Time response of one face to a flux sampled on a uniform grid of
    /// step `dt`: each mode is simulated independently and the weighted
    /// outputs are summed.
    pub fn simulate(&self, face: SlabFace, input: &[f64], dt: f64) -> Result<Vec<f64>, LtiError> {
        let mut total = vec![0.0; input.len()];
        for mode in self.face(face) {
            let ss = StateSpace::from_transfer_function(&mode.tf)?;
            let y = ss.simulate(input, dt)?;
            for (acc, value) in total.iter_mut().zip(y) {
                *acc += mode.weight * value;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::modes::RadialModeSolver;
    use approx::assert_relative_eq;

    fn plate() -> ThermalMaterial {
        ThermalMaterial::new(0.2, 1200.0, 1400.0, 5e-3, 30e-3, 10e-3, 1.0, 1.0).unwrap()
    }

    #[test]
    fn one_dimensional_static_rear_gain() {
        let m = plate();
        let h = 10.0;
        let assembler = TransferFunctionAssembler::new(h, ApproxConfig::default());
        let model = assembler.assemble_one_dimensional(&m);
        let gain = model.response_at(SlabFace::Rear, 0.0).re;
        assert_relative_eq!(gain, 1.0 / h, max_relative = 1e-9);
    }

    #[test]
    fn mode_weights_dilute_with_heater_area() {
        let m = plate();
        let modes = RadialModeSolver::new(1e-3, 4).solve(&m).unwrap();
        let assembler = TransferFunctionAssembler::new(10.0, ApproxConfig::default());
        let model = assembler.assemble(&m, &modes);
        // With a nearly insulated rim the fundamental mode tends to the
        // uniform one and its weight to the heater/plate area ratio.
        let area_ratio = (m.heater_radius / m.radius).powi(2);
        assert_relative_eq!(model.rear[0].weight, area_ratio, max_relative = 1e-3);
    }
}
