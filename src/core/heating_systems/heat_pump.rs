use crate::core::energy_supply::supply_system::{ServiceType, SupplyResult};

/// Temperature of the water reservoir serving a water-source heat pump, in deg C
const WATER_SOURCE_TEMP_HEATING: f64 = 7.;
const WATER_SOURCE_TEMP_COOLING: f64 = 12.;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeatPumpSource {
    OutsideAir,
    Water,
}

impl HeatPumpSource {
    /// Coefficients (a, b, c) of the quadratic fit COP = a + b.dT + c.dT^2
    fn cop_coefficients(&self) -> (f64, f64, f64) {
        match self {
            Self::OutsideAir => (6.81, -0.121, 0.000630),
            Self::Water => (8.77, -0.150, 0.000734),
        }
    }

    /// Temperature lift the compressor has to provide, in K. Never negative.
    ///
    /// Arguments:
    /// * `service_type` - whether the heat pump is heating or cooling
    /// * `temp_outdoor` - outdoor air temperature, in deg C
    /// * `temp_supply` - supply temperature of the emission system, in deg C
    pub fn temperature_lift(
        &self,
        service_type: ServiceType,
        temp_outdoor: f64,
        temp_supply: f64,
    ) -> f64 {
        let temp_diff = match (self, service_type) {
            (Self::OutsideAir, ServiceType::Heating) => temp_supply - temp_outdoor,
            (Self::OutsideAir, ServiceType::Cooling) => temp_outdoor - temp_supply,
            (Self::Water, ServiceType::Heating) => temp_supply - WATER_SOURCE_TEMP_HEATING,
            (Self::Water, ServiceType::Cooling) => WATER_SOURCE_TEMP_COOLING - temp_supply,
        };
        temp_diff.max(0.)
    }

    pub fn cop(&self, temperature_lift: f64) -> f64 {
        let (a, b, c) = self.cop_coefficients();
        a + b * temperature_lift + c * temperature_lift.powi(2)
    }

    /// Electricity drawn to deliver the given (non-negative) load.
    pub fn demand_energy(
        &self,
        service_type: ServiceType,
        load: f64,
        temp_outdoor: f64,
        temp_supply: f64,
    ) -> SupplyResult {
        let cop = self.cop(self.temperature_lift(service_type, temp_outdoor, temp_supply));

        SupplyResult {
            electricity_in: load / cop,
            cop: Some(cop),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(HeatPumpSource::OutsideAir, ServiceType::Heating, 5., 50., 45.)]
    #[case(HeatPumpSource::OutsideAir, ServiceType::Heating, 55., 50., 0.)]
    #[case(HeatPumpSource::OutsideAir, ServiceType::Cooling, 30., 12., 18.)]
    #[case(HeatPumpSource::OutsideAir, ServiceType::Cooling, 5., 12., 0.)]
    #[case(HeatPumpSource::Water, ServiceType::Heating, -10., 50., 43.)]
    #[case(HeatPumpSource::Water, ServiceType::Heating, -10., 5., 0.)]
    #[case(HeatPumpSource::Water, ServiceType::Cooling, 30., 12., 0.)]
    #[case(HeatPumpSource::Water, ServiceType::Cooling, 30., 6., 6.)]
    fn test_temperature_lift(
        #[case] source: HeatPumpSource,
        #[case] service_type: ServiceType,
        #[case] temp_outdoor: f64,
        #[case] temp_supply: f64,
        #[case] expected: f64,
    ) {
        assert_relative_eq!(
            source.temperature_lift(service_type, temp_outdoor, temp_supply),
            expected
        );
    }

    #[rstest]
    #[case(HeatPumpSource::OutsideAir, 0., 6.81)]
    #[case(HeatPumpSource::OutsideAir, 45., 2.64075)]
    #[case(HeatPumpSource::Water, 0., 8.77)]
    #[case(HeatPumpSource::Water, 43., 3.677166)]
    fn test_cop(#[case] source: HeatPumpSource, #[case] temperature_lift: f64, #[case] expected: f64) {
        assert_relative_eq!(source.cop(temperature_lift), expected, max_relative = 1e-9);
    }

    #[test]
    fn test_demand_energy() {
        let result =
            HeatPumpSource::OutsideAir.demand_energy(ServiceType::Heating, 1000., 5., 50.);

        assert_relative_eq!(result.electricity_in, 1000. / 2.64075, max_relative = 1e-9);
        assert_relative_eq!(result.cop.unwrap(), 2.64075, max_relative = 1e-9);
        assert_eq!(result.fossils_in, 0.);
        assert_eq!(result.electricity_out, 0.);
    }
}
