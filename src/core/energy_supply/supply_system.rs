use crate::core::heating_systems::boiler::{cogeneration_demand_energy, OilBoilerClass};
use crate::core::heating_systems::heat_pump::HeatPumpSource;
use crate::errors::{SimulationError, VariantKind};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum ServiceType {
    Heating,
    Cooling,
}

/// Energy drawn by a supply system over one timestep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SupplyResult {
    /// Electricity consumed, in Wh
    pub electricity_in: f64,
    /// Fossil fuel consumed, in Wh
    pub fossils_in: f64,
    /// Electricity generated as a by-product, in Wh
    pub electricity_out: f64,
    /// Coefficient of performance, for systems with a compressor cycle
    pub cop: Option<f64>,
}

/// Plant converting heating or cooling demand into final energy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum SupplySystem {
    OilBoilerOld,
    OilBoilerMed,
    OilBoilerNew,
    HeatPumpAir,
    HeatPumpWater,
    ElectricHeating,
    #[strum(to_string = "CHP", serialize = "Cogeneration")]
    Cogeneration,
    DirectHeater,
    DirectCooler,
}

impl SupplySystem {
    /// Parse a supply system from its input tag.
    pub fn from_tag(tag: &str) -> Result<Self, SimulationError> {
        Self::from_str(tag).map_err(|_| SimulationError::UnsupportedVariant {
            kind: VariantKind::SupplySystem,
            tag: tag.to_owned(),
        })
    }

    /// Whether the system is able to provide the given service.
    pub fn can_serve(&self, service_type: ServiceType) -> bool {
        match service_type {
            ServiceType::Heating => !matches!(self, Self::DirectCooler),
            ServiceType::Cooling => matches!(
                self,
                Self::HeatPumpAir | Self::HeatPumpWater | Self::DirectCooler
            ),
        }
    }

    /// Final energy needed to meet a load.
    ///
    /// Arguments:
    /// * `service_type` - whether the load is a heating or a cooling load
    /// * `load` - energy to be delivered in the timestep, in Wh. Cooling loads are passed as
    ///            positive values.
    /// * `temp_outdoor` - outdoor air temperature, in deg C
    /// * `temp_supply` - supply temperature of the emission system, in deg C
    pub fn dispatch(
        &self,
        service_type: ServiceType,
        load: f64,
        temp_outdoor: f64,
        temp_supply: f64,
    ) -> SupplyResult {
        match self {
            Self::DirectHeater | Self::DirectCooler | Self::ElectricHeating => SupplyResult {
                electricity_in: load.abs(),
                ..Default::default()
            },
            Self::OilBoilerOld => OilBoilerClass::Old.demand_energy(load),
            Self::OilBoilerMed => OilBoilerClass::Medium.demand_energy(load),
            Self::OilBoilerNew => OilBoilerClass::New.demand_energy(load),
            Self::Cogeneration => cogeneration_demand_energy(load),
            Self::HeatPumpAir => HeatPumpSource::OutsideAir.demand_energy(
                service_type,
                load,
                temp_outdoor,
                temp_supply,
            ),
            Self::HeatPumpWater => {
                HeatPumpSource::Water.demand_energy(service_type, load, temp_outdoor, temp_supply)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(SupplySystem::DirectHeater, ServiceType::Heating, 400., 400.)]
    #[case(SupplySystem::ElectricHeating, ServiceType::Heating, 400., 400.)]
    #[case(SupplySystem::DirectCooler, ServiceType::Cooling, 264.75, 264.75)]
    #[case(SupplySystem::DirectCooler, ServiceType::Cooling, -264.75, 264.75)]
    fn test_dispatch_resistive(
        #[case] supply_system: SupplySystem,
        #[case] service_type: ServiceType,
        #[case] load: f64,
        #[case] expected_electricity: f64,
    ) {
        assert_eq!(
            supply_system.dispatch(service_type, load, 10., 40.),
            SupplyResult {
                electricity_in: expected_electricity,
                ..Default::default()
            }
        );
    }

    #[rstest]
    #[case(SupplySystem::OilBoilerOld, 0.63)]
    #[case(SupplySystem::OilBoilerMed, 0.82)]
    #[case(SupplySystem::OilBoilerNew, 0.98)]
    fn test_dispatch_oil_boiler(#[case] supply_system: SupplySystem, #[case] efficiency: f64) {
        let result = supply_system.dispatch(ServiceType::Heating, 820., 0., 50.);

        assert_relative_eq!(result.fossils_in, 820. / efficiency);
        assert_eq!(result.electricity_in, 0.);
        assert!(result.cop.is_none());
    }

    #[test]
    fn test_dispatch_cogeneration() {
        let result = SupplySystem::Cogeneration.dispatch(ServiceType::Heating, 300., 0., 50.);

        assert_relative_eq!(result.fossils_in, 500.);
        assert_relative_eq!(result.electricity_out, 165.);
    }

    #[test]
    fn test_dispatch_heat_pump_air_cooling() {
        // temperature lift of 18K from 12 deg C supply to 30 deg C outdoors
        let result = SupplySystem::HeatPumpAir.dispatch(ServiceType::Cooling, 500., 30., 12.);
        let expected_cop = 6.81 - 0.121 * 18. + 0.000630 * 18f64.powi(2);

        assert_relative_eq!(result.cop.unwrap(), expected_cop, max_relative = 1e-12);
        assert_relative_eq!(result.electricity_in, 500. / expected_cop, max_relative = 1e-12);
    }

    #[test]
    fn test_dispatch_heat_pump_water_heating() {
        let result = SupplySystem::HeatPumpWater.dispatch(ServiceType::Heating, 500., -5., 35.);
        let expected_cop = 8.77 - 0.150 * 28. + 0.000734 * 28f64.powi(2);

        assert_relative_eq!(result.cop.unwrap(), expected_cop, max_relative = 1e-12);
        assert_relative_eq!(result.electricity_in, 500. / expected_cop, max_relative = 1e-12);
    }

    #[rstest]
    #[case(SupplySystem::OilBoilerOld, true, false)]
    #[case(SupplySystem::OilBoilerMed, true, false)]
    #[case(SupplySystem::OilBoilerNew, true, false)]
    #[case(SupplySystem::HeatPumpAir, true, true)]
    #[case(SupplySystem::HeatPumpWater, true, true)]
    #[case(SupplySystem::ElectricHeating, true, false)]
    #[case(SupplySystem::Cogeneration, true, false)]
    #[case(SupplySystem::DirectHeater, true, false)]
    #[case(SupplySystem::DirectCooler, false, true)]
    fn test_can_serve(
        #[case] supply_system: SupplySystem,
        #[case] heating: bool,
        #[case] cooling: bool,
    ) {
        assert_eq!(supply_system.can_serve(ServiceType::Heating), heating);
        assert_eq!(supply_system.can_serve(ServiceType::Cooling), cooling);
    }

    #[rstest]
    #[case("CHP", SupplySystem::Cogeneration)]
    #[case("HeatPumpWater", SupplySystem::HeatPumpWater)]
    #[case("DirectCooler", SupplySystem::DirectCooler)]
    fn test_from_tag(#[case] tag: &str, #[case] expected: SupplySystem) {
        assert_eq!(SupplySystem::from_tag(tag).unwrap(), expected);
    }

    #[test]
    fn test_from_unknown_tag() {
        assert!(matches!(
            SupplySystem::from_tag("GasBoiler"),
            Err(SimulationError::UnsupportedVariant {
                kind: VariantKind::SupplySystem,
                ..
            })
        ));
    }
}
