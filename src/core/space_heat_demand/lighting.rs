/// Artificial lighting of a zone, switched on when daylight falls short of the control level
/// while the zone is occupied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Installed lighting power density, in W / m2
    pub load: f64,
    /// Illuminance below which the lights are switched on, in lux
    pub control: f64,
    pub utilisation_factor: f64,
    pub maintenance_factor: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            load: 11.7,
            control: 300.,
            utilisation_factor: 0.45,
            maintenance_factor: 0.9,
        }
    }
}

impl Lighting {
    /// Lighting energy demand for one timestep, in Wh
    ///
    /// Arguments:
    /// * `floor_area` - floor area of the zone, in m2
    /// * `illuminance` - illuminance falling on the glazing, in lux
    /// * `occupancy` - occupancy of the zone, in people / m2
    pub fn demand(&self, floor_area: f64, illuminance: f64, occupancy: f64) -> f64 {
        let lux = illuminance * self.utilisation_factor * self.maintenance_factor / floor_area;

        if lux < self.control && occupancy > 0. {
            self.load * floor_area
        } else {
            0.
        }
    }
}
