use slabtf_rs::numerics::transient::FdSolver;
use slabtf_rs::physics::material::ThermalMaterial;
use slabtf_rs::physics::modes::RadialModeSolver;
use slabtf_rs::physics::rational::{ApproxConfig, ApproxKind, SlabFace};
use slabtf_rs::physics::transfer::{FrequencyBand, TransferFunctionAssembler};
use slabtf_rs::processing::csv_writer;
use slabtf_rs::processing::summary::ValidationSummary;
use std::fs;

fn main() {
    fs::create_dir_all("output/validation").expect("Failed to create output directory");

    // PMMA-like instrumented slab.
    let material = ThermalMaterial::new(
        0.193,  // conductivity, W/(m K)
        1190.0, // density, kg/m^3
        1420.0, // specific heat, J/(kg K)
        5e-3,   // thickness, m
        30e-3,  // plate radius, m
        10e-3,  // heater radius, m
        1.0,    // front transducer gain
        1.0,    // rear transducer gain
    )
    .expect("valid material");

    let h_rear = 10.0;
    let h_side = 10.0;
    let heat_flux = 1000.0; // W/m^2
    let duration = 2000.0; // s

    println!("Slab conduction cross-validation");
    println!("================================");
    println!(
        "diffusivity = {:.3e} m^2/s, diffusion time = {:.1} s",
        material.diffusivity(),
        material.thickness * material.thickness / material.diffusivity()
    );
    println!();

    // Step flux held over the whole record.
    let flux_times = [0.0, duration];
    let flux_values = [heat_flux, heat_flux];

    // dr = 1 mm puts a grid node exactly on the heater edge.
    let solver = FdSolver {
        mx: 41,
        mr: 31,
        n_steps: 400,
        h_rear,
        h_side,
        ..FdSolver::default()
    };

    println!(
        "Finite-difference reference: {} x {} nodes, {} time points",
        solver.mx, solver.mr, solver.n_steps
    );
    let fd = solver
        .solve(&material, &flux_times, &flux_values)
        .expect("finite-difference solve");
    csv_writer::write_columns(
        "output/validation/fd_timeseries.csv",
        &["t", "rear", "front"],
        &[&fd.time, &fd.rear, &fd.front],
    )
    .expect("Failed to write FD time series");

    let approx = ApproxConfig {
        order: 10,
        kind: ApproxKind::Pade,
    };
    let modes = RadialModeSolver::new(h_side, 8)
        .solve(&material)
        .expect("radial modes");
    println!(
        "Reduced-order model: {} modes, {:?} order {}",
        modes.len(),
        approx.kind,
        approx.order
    );
    let model = TransferFunctionAssembler::new(h_rear, approx).assemble(&material, &modes);

    let dt = fd.time[1] - fd.time[0];
    let flux_uniform = vec![heat_flux; fd.time.len()];
    let tf_rear = model
        .simulate(SlabFace::Rear, &flux_uniform, dt)
        .expect("rear mode simulation");
    let tf_front = model
        .simulate(SlabFace::Front, &flux_uniform, dt)
        .expect("front mode simulation");
    csv_writer::write_columns(
        "output/validation/tf_timeseries.csv",
        &["t", "rear", "front"],
        &[&fd.time, &tf_rear, &tf_front],
    )
    .expect("Failed to write TF time series");

    let band = FrequencyBand {
        omega_min: 1e-4,
        omega_max: 1.0,
        points: 200,
    };
    let bode = model.frequency_response(&band);
    csv_writer::write_columns(
        "output/validation/bode.csv",
        &[
            "omega",
            "rear_magnitude",
            "rear_phase",
            "front_magnitude",
            "front_phase",
        ],
        &[
            &bode.omega,
            &bode.rear.magnitude,
            &bode.rear.phase,
            &bode.front.magnitude,
            &bode.front.phase,
        ],
    )
    .expect("Failed to write Bode data");

    let mut summary = ValidationSummary::from_setup(
        &material,
        solver.mx,
        solver.mr,
        solver.n_steps,
        &approx,
        &modes,
    );
    summary.add_comparison(SlabFace::Rear, &fd.rear, &tf_rear);
    summary.add_comparison(SlabFace::Front, &fd.front, &tf_front);
    summary
        .write_to_file("output/validation/summary.txt")
        .expect("Failed to write summary");
    summary.print_to_console();

    println!("Results saved under output/validation/");
}
