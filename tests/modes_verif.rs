use slabtf_rs::physics::bessel::{j0, j1, J0_ZEROS, J1_ZEROS};
use slabtf_rs::physics::material::ThermalMaterial;
use slabtf_rs::physics::modes::RadialModeSolver;
use slabtf_rs::physics::rational::{ApproxConfig, ApproxKind, SlabFace};
use slabtf_rs::physics::transfer::{ConductionModel, TransferFunctionAssembler};

fn plate() -> ThermalMaterial {
    ThermalMaterial::new(0.2, 1200.0, 1400.0, 5e-3, 30e-3, 10e-3, 1.0, 1.0).unwrap()
}

#[test]
fn eigenvalues_are_ordered_and_bracketed() {
    let material = plate();
    let series_order = 9;
    let h_side = 25.0;
    let modes = RadialModeSolver::new(h_side, series_order)
        .solve(&material)
        .unwrap();

    assert_eq!(modes.len(), series_order + 1);

    let r = material.radius;
    let lambda = material.conductivity();
    for (i, mode) in modes.modes().iter().enumerate() {
        // Strictly increasing.
        if i > 0 {
            assert!(
                mode.alpha > modes.modes()[i - 1].alpha,
                "mode {i} not increasing"
            );
        }
        // Inside its documented bracket.
        let (lo, hi) = if i == 0 {
            (0.0, J0_ZEROS[0] / r)
        } else {
            (J1_ZEROS[i - 1] / r, J0_ZEROS[i] / r)
        };
        assert!(
            mode.alpha > lo && mode.alpha < hi,
            "mode {i}: alpha {} outside ({lo}, {hi})",
            mode.alpha
        );
        // Actually solves the characteristic equation.
        let residual = h_side * j0(mode.alpha * r) - lambda * mode.alpha * j1(mode.alpha * r);
        println!(
            "mode {i}: alpha = {:.6e}, residual = {:+.3e}",
            mode.alpha, residual
        );
        assert!(residual.abs() < 1e-6 * h_side);

        assert!(mode.norm > 0.0);
    }
}

#[test]
fn frequency_response_is_invariant_to_mode_order() {
    let material = plate();
    let modes = RadialModeSolver::new(25.0, 7).solve(&material).unwrap();
    let assembler = TransferFunctionAssembler::new(
        15.0,
        ApproxConfig {
            order: 8,
            kind: ApproxKind::Taylor,
        },
    );
    let model = assembler.assemble(&material, &modes);
    let shuffled = ConductionModel {
        rear: model.rear.iter().rev().cloned().collect(),
        front: model.front.iter().rev().cloned().collect(),
    };

    for &omega in &[1e-3, 1e-2, 0.1, 1.0] {
        for face in [SlabFace::Rear, SlabFace::Front] {
            let a = model.response_at(face, omega);
            let b = shuffled.response_at(face, omega);
            assert!(
                (a - b).norm() <= 1e-12 * a.norm().max(1e-300),
                "face {face:?} at omega {omega}: {a} vs {b}"
            );
        }
    }
}

#[test]
fn mode_count_follows_series_order() {
    let material = plate();
    for order in [0usize, 1, 4, 12] {
        let modes = RadialModeSolver::new(10.0, order).solve(&material).unwrap();
        assert_eq!(modes.len(), order + 1);
    }
}
