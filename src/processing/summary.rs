use crate::physics::material::ThermalMaterial;
use crate::physics::modes::ModeSet;
use crate::physics::rational::{ApproxConfig, ApproxKind, SlabFace};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Human-readable record of one validation run: the physical setup, both
/// solver configurations and the deviation between the finite-difference
/// reference and the transfer-function model.
pub struct ValidationSummary {
    // Material
    pub conductivity: f64,
    pub density: f64,
    pub specific_heat: f64,
    pub diffusivity: f64,
    pub thickness: f64,
    pub radius: f64,
    pub heater_radius: f64,

    // Finite-difference grid
    pub mx: usize,
    pub mr: usize,
    pub n_steps: usize,

    // Reduced-order model
    pub approx_order: usize,
    pub approx_kind: ApproxKind,
    pub mode_table: Vec<(f64, f64)>,

    // Cross-validation
    pub rear_max_dev: Option<f64>,
    pub rear_mean_dev: Option<f64>,
    pub front_max_dev: Option<f64>,
    pub front_mean_dev: Option<f64>,
}

impl ValidationSummary {
    pub fn from_setup(
        material: &ThermalMaterial,
        mx: usize,
        mr: usize,
        n_steps: usize,
        approx: &ApproxConfig,
        modes: &ModeSet,
    ) -> Self {
        Self {
            conductivity: material.conductivity(),
            density: material.density(),
            specific_heat: material.specific_heat(),
            diffusivity: material.diffusivity(),
            thickness: material.thickness,
            radius: material.radius,
            heater_radius: material.heater_radius,
            mx,
            mr,
            n_steps,
            approx_order: approx.order,
            approx_kind: approx.kind,
            mode_table: modes.modes().iter().map(|m| (m.alpha, m.norm)).collect(),
            rear_max_dev: None,
            rear_mean_dev: None,
            front_max_dev: None,
            front_mean_dev: None,
        }
    }

    pub fn add_comparison(&mut self, face: SlabFace, reference: &[f64], model: &[f64]) {
        let diffs: Vec<f64> = reference
            .iter()
            .zip(model.iter())
            .map(|(a, b)| (a - b).abs())
            .collect();
        let max = diffs.iter().cloned().fold(0.0, f64::max);
        let mean = diffs.iter().sum::<f64>() / diffs.len().max(1) as f64;
        match face {
            SlabFace::Rear => {
                self.rear_max_dev = Some(max);
                self.rear_mean_dev = Some(mean);
            }
            SlabFace::Front => {
                self.front_max_dev = Some(max);
                self.front_mean_dev = Some(mean);
            }
        }
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file, "SLAB CONDUCTION VALIDATION SUMMARY")?;
        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file)?;

        writeln!(file, "MATERIAL")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Conductivity:        {:.6e} W/(m K)", self.conductivity)?;
        writeln!(file, "Density:             {:.6e} kg/m^3", self.density)?;
        writeln!(
            file,
            "Specific heat:       {:.6e} J/(kg K)",
            self.specific_heat
        )?;
        writeln!(file, "Diffusivity:         {:.6e} m^2/s", self.diffusivity)?;
        writeln!(file, "Thickness:           {:.6e} m", self.thickness)?;
        writeln!(file, "Plate radius:        {:.6e} m", self.radius)?;
        writeln!(file, "Heater radius:       {:.6e} m", self.heater_radius)?;
        writeln!(file)?;

        writeln!(file, "FINITE-DIFFERENCE GRID")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Axial nodes:         {}", self.mx)?;
        writeln!(file, "Radial nodes:        {}", self.mr)?;
        writeln!(file, "Time points:         {}", self.n_steps)?;
        writeln!(file)?;

        writeln!(file, "REDUCED-ORDER MODEL")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(
            file,
            "Approximation:       {:?}, order {}",
            self.approx_kind, self.approx_order
        )?;
        writeln!(file, "Radial modes:        {}", self.mode_table.len())?;
        for (i, (alpha, norm)) in self.mode_table.iter().enumerate() {
            writeln!(
                file,
                "  mode {:>2}: alpha = {:>12.6e} 1/m, norm = {:.6e} m^2",
                i, alpha, norm
            )?;
        }
        writeln!(file)?;

        if self.rear_max_dev.is_some() || self.front_max_dev.is_some() {
            writeln!(file, "FD vs TRANSFER-FUNCTION DEVIATION")?;
            writeln!(file, "{}", "-".repeat(60))?;
            if let (Some(max), Some(mean)) = (self.rear_max_dev, self.rear_mean_dev) {
                writeln!(file, "Rear face:  max = {:.6e} K, mean = {:.6e} K", max, mean)?;
            }
            if let (Some(max), Some(mean)) = (self.front_max_dev, self.front_mean_dev) {
                writeln!(file, "Front face: max = {:.6e} K, mean = {:.6e} K", max, mean)?;
            }
            writeln!(file)?;
        }

        writeln!(file, "{}", "=".repeat(60))?;
        Ok(())
    }

    pub fn print_to_console(&self) {
        println!("\n{}", "=".repeat(60));
        println!("VALIDATION SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "Grid:          {} x {} nodes, {} time points",
            self.mx, self.mr, self.n_steps
        );
        println!(
            "Model:         {:?} order {}, {} modes",
            self.approx_kind,
            self.approx_order,
            self.mode_table.len()
        );
        if let Some(max) = self.rear_max_dev {
            println!("Rear max dev:  {:.3e} K", max);
        }
        if let Some(max) = self.front_max_dev {
            println!("Front max dev: {:.3e} K", max);
        }
        println!("{}\n", "=".repeat(60));
    }
}
