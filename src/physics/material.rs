use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("material parameter `{name}` must be strictly positive, got {value:.6e}")]
    NonPositiveParameter { name: &'static str, value: f64 },
    #[error("heater radius {heater:.6e} exceeds plate radius {plate:.6e}")]
    HeaterLargerThanPlate { heater: f64, plate: f64 },
}

/// Physical constants of the instrumented sample.
///
/// All parameters are validated at construction and on every assignment;
/// the thermal diffusivity is derived and kept consistent with the three
/// constants it depends on. Solver components only ever read this struct.
#[derive(Clone, Debug)]
pub struct ThermalMaterial {
    /// Thermal conductivity, W/(m K).
    conductivity: f64,
    /// Density, kg/m^3.
    density: f64,
    /// Specific heat capacity, J/(kg K).
    specific_heat: f64,
    /// Derived diffusivity conductivity/(density * specific_heat), m^2/s.
    diffusivity: f64,
    /// Slab thickness, m.
    pub thickness: f64,
    /// Lateral plate radius, m.
    pub radius: f64,
    /// Heated resistor radius, m.
    pub heater_radius: f64,
    /// Front-face transducer gain, K/K.
    pub gain_front: f64,
    /// Rear-face transducer gain, K/K.
    pub gain_rear: f64,
}

fn positive(name: &'static str, value: f64) -> Result<f64, MaterialError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(MaterialError::NonPositiveParameter { name, value })
    }
}

impl ThermalMaterial {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        conductivity: f64,
        density: f64,
        specific_heat: f64,
        thickness: f64,
        radius: f64,
        heater_radius: f64,
        gain_front: f64,
        gain_rear: f64,
    ) -> Result<Self, MaterialError> {
        let conductivity = positive("conductivity", conductivity)?;
        let density = positive("density", density)?;
        let specific_heat = positive("specific_heat", specific_heat)?;
        let thickness = positive("thickness", thickness)?;
        let radius = positive("radius", radius)?;
        let heater_radius = positive("heater_radius", heater_radius)?;
        let gain_front = positive("gain_front", gain_front)?;
        let gain_rear = positive("gain_rear", gain_rear)?;
        if heater_radius > radius {
            return Err(MaterialError::HeaterLargerThanPlate {
                heater: heater_radius,
                plate: radius,
            });
        }
        Ok(Self {
            conductivity,
            density,
            specific_heat,
            diffusivity: conductivity / (density * specific_heat),
            thickness,
            radius,
            heater_radius,
            gain_front,
            gain_rear,
        })
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn specific_heat(&self) -> f64 {
        self.specific_heat
    }

    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    pub fn set_conductivity(&mut self, value: f64) -> Result<(), MaterialError> {
        self.conductivity = positive("conductivity", value)?;
        self.update_diffusivity();
        Ok(())
    }

    pub fn set_density(&mut self, value: f64) -> Result<(), MaterialError> {
        self.density = positive("density", value)?;
        self.update_diffusivity();
        Ok(())
    }

    pub fn set_specific_heat(&mut self, value: f64) -> Result<(), MaterialError> {
        self.specific_heat = positive("specific_heat", value)?;
        self.update_diffusivity();
        Ok(())
    }

    fn update_diffusivity(&mut self) {
        self.diffusivity = self.conductivity / (self.density * self.specific_heat);
    }

    /// Thermal effusivity conductivity/sqrt(diffusivity), W s^(1/2)/(m^2 K).
    pub fn effusivity(&self) -> f64 {
        self.conductivity / self.diffusivity.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> ThermalMaterial {
        ThermalMaterial::new(0.2, 1200.0, 1400.0, 5e-3, 30e-3, 10e-3, 1.0, 1.0).unwrap()
    }

    #[test]
    fn diffusivity_tracks_every_mutation() {
        let mut m = sample();
        assert_relative_eq!(m.diffusivity(), 0.2 / (1200.0 * 1400.0));
        m.set_conductivity(0.5).unwrap();
        assert_relative_eq!(m.diffusivity(), 0.5 / (1200.0 * 1400.0));
        m.set_density(900.0).unwrap();
        assert_relative_eq!(m.diffusivity(), 0.5 / (900.0 * 1400.0));
        m.set_specific_heat(1000.0).unwrap();
        assert_relative_eq!(m.diffusivity(), 0.5 / (900.0 * 1000.0));
    }

    #[test]
    fn non_positive_constants_are_rejected() {
        for (lam, rho, cp, ell) in [
            (0.0, 1.0, 1.0, 1.0),
            (-0.2, 1.0, 1.0, 1.0),
            (1.0, 0.0, 1.0, 1.0),
            (1.0, 1.0, -3.0, 1.0),
            (1.0, 1.0, 1.0, 0.0),
        ] {
            assert!(ThermalMaterial::new(lam, rho, cp, ell, 1.0, 0.5, 1.0, 1.0).is_err());
        }
        assert!(ThermalMaterial::new(1.0, 1.0, 1.0, 1.0, 0.0, 0.5, 1.0, 1.0).is_err());
        assert!(ThermalMaterial::new(1.0, 1.0, 1.0, 1.0, 1.0, -0.5, 1.0, 1.0).is_err());
    }

    #[test]
    fn mutation_keeps_old_value_on_error() {
        let mut m = sample();
        assert!(m.set_conductivity(-1.0).is_err());
        assert_relative_eq!(m.conductivity(), 0.2);
        assert_relative_eq!(m.diffusivity(), 0.2 / (1200.0 * 1400.0));
    }

    #[test]
    fn heater_must_fit_on_plate() {
        let err = ThermalMaterial::new(0.2, 1200.0, 1400.0, 5e-3, 10e-3, 20e-3, 1.0, 1.0);
        assert!(matches!(
            err,
            Err(MaterialError::HeaterLargerThanPlate { .. })
        ));
    }
}
