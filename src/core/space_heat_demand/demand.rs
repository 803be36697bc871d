use crate::core::energy_supply::supply_system::ServiceType;
use crate::core::heating_systems::emitters::EmissionFlows;
use crate::core::space_heat_demand::thermal_network::{solve, NodeTemperatures};
use crate::core::space_heat_demand::zone::ZoneConfiguration;
use crate::core::space_heat_demand::zone_step::{SimulationState, TimestepInputs};
use crate::errors::SimulationError;
use tracing::{trace, warn};

/// Reference heating power per unit floor area used to probe the network's response, in W / m2
const REFERENCE_HEATING_PER_FLOOR_AREA: f64 = 10.;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum DemandState {
    NoDemand,
    Heating,
    Cooling,
}

impl DemandState {
    pub fn service_type(&self) -> Option<ServiceType> {
        match self {
            Self::NoDemand => None,
            Self::Heating => Some(ServiceType::Heating),
            Self::Cooling => Some(ServiceType::Cooling),
        }
    }
}

/// Demand state of a timestep together with the free-floating network solution it was
/// derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemandClassification {
    pub demand_state: DemandState,
    pub temps_free: NodeTemperatures,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestrictedDemand {
    /// demand clamped to the zone's capacity (cooling negative), in W
    pub energy_demand: f64,
    /// demand needed to just reach the setpoint, in W
    pub energy_demand_unrestricted: f64,
}

/// Decide whether the zone needs heating or cooling this timestep by solving the network with
/// no heating or cooling and comparing the free-floating air temperature with the setpoints.
pub fn classify(
    zone: &ZoneConfiguration,
    state: &SimulationState,
    inputs: &TimestepInputs,
) -> DemandClassification {
    let temps_free = solve(
        zone,
        state.temp_mass_prev,
        inputs.temp_ext_air,
        inputs.gains_internal,
        inputs.gains_solar,
        &EmissionFlows::default(),
    );

    let demand_state = if temps_free.temp_air < zone.t_set_heating {
        DemandState::Heating
    } else if temps_free.temp_air > zone.t_set_cooling {
        DemandState::Cooling
    } else {
        DemandState::NoDemand
    };
    trace!(
        temp_air_free = temps_free.temp_air,
        %demand_state,
        "Classified timestep demand"
    );

    DemandClassification {
        demand_state,
        temps_free,
    }
}

/// Energy needed to bring the air temperature to its setpoint, restricted to the zone's
/// heating or cooling capacity.
///
/// The network is linear in injected heat, so a second solve with a reference heating power
/// is enough to interpolate the demand that reaches the setpoint exactly.
pub fn restrict(
    zone: &ZoneConfiguration,
    state: &SimulationState,
    inputs: &TimestepInputs,
    classification: &DemandClassification,
) -> Result<RestrictedDemand, SimulationError> {
    let service_type = classification
        .demand_state
        .service_type()
        .ok_or(SimulationError::InvalidState)?;
    let (emission_system, _) = zone.systems_for(service_type);
    let temp_setpnt = match service_type {
        ServiceType::Heating => zone.t_set_heating,
        ServiceType::Cooling => zone.t_set_cooling,
    };

    let energy_reference = REFERENCE_HEATING_PER_FLOOR_AREA * zone.floor_area;
    let temps_reference = solve(
        zone,
        state.temp_mass_prev,
        inputs.temp_ext_air,
        inputs.gains_internal,
        inputs.gains_solar,
        &emission_system.heat_flows(energy_reference),
    );

    let energy_demand_unrestricted = unrestricted_energy_demand(
        energy_reference,
        temp_setpnt,
        classification.temps_free.temp_air,
        temps_reference.temp_air,
    )?;
    let energy_demand = clamp_to_capacity(zone, energy_demand_unrestricted);
    if energy_demand != energy_demand_unrestricted {
        warn!(
            energy_demand_unrestricted,
            energy_demand, "Demand exceeds zone capacity and has been restricted"
        );
    }

    Ok(RestrictedDemand {
        energy_demand,
        energy_demand_unrestricted,
    })
}

/// Linear extrapolation from the free-floating air temperature and the air temperature reached
/// with a reference energy input to the energy that reaches the setpoint.
pub fn unrestricted_energy_demand(
    energy_reference: f64,
    temp_setpnt: f64,
    temp_air_free: f64,
    temp_air_reference: f64,
) -> Result<f64, SimulationError> {
    let energy_demand =
        energy_reference * (temp_setpnt - temp_air_free) / (temp_air_reference - temp_air_free);

    if temp_air_reference == temp_air_free || !energy_demand.is_finite() {
        return Err(SimulationError::DegenerateNetwork {
            temp_air_free,
            temp_air_reference,
        });
    }

    Ok(energy_demand)
}

pub fn clamp_to_capacity(zone: &ZoneConfiguration, energy_demand: f64) -> f64 {
    energy_demand
        .max(zone.max_cooling_energy)
        .min(zone.max_heating_energy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy_supply::supply_system::SupplySystem;
    use crate::core::heating_systems::emitters::EmissionSystem;
    use crate::core::space_heat_demand::zone::{ZoneGeometry, ZoneParameters};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn zone() -> ZoneConfiguration {
        ZoneConfiguration::new(ZoneParameters {
            geometry: ZoneGeometry::from_dimensions(7., 4.9, 3.1, 13.5, 15.19),
            ventilation_efficiency: 0.,
            max_heating_energy_per_floor_area: 12.,
            max_cooling_energy_per_floor_area: -12.,
            heating_supply_system: SupplySystem::DirectHeater,
            cooling_supply_system: SupplySystem::DirectCooler,
            heating_emission_system: EmissionSystem::AirConditioning,
            cooling_emission_system: EmissionSystem::AirConditioning,
            ..Default::default()
        })
        .unwrap()
    }

    fn inputs(temp_ext_air: f64, gains_solar: f64) -> TimestepInputs {
        TimestepInputs {
            gains_internal: 10.,
            gains_solar,
            temp_ext_air,
            illuminance: 44_000.,
            occupancy: 0.1,
        }
    }

    #[rstest]
    #[case(22., 10., 2000., DemandState::NoDemand)]
    #[case(24., 25., 4000., DemandState::Cooling)]
    #[case(20., 10., 2000., DemandState::Heating)]
    fn test_classify(
        zone: ZoneConfiguration,
        #[case] temp_mass_prev: f64,
        #[case] temp_ext_air: f64,
        #[case] gains_solar: f64,
        #[case] expected: DemandState,
    ) {
        let classification = classify(
            &zone,
            &SimulationState::new(temp_mass_prev),
            &inputs(temp_ext_air, gains_solar),
        );

        assert_eq!(classification.demand_state, expected);
    }

    #[rstest]
    fn test_restrict_heating(zone: ZoneConfiguration) {
        let state = SimulationState::new(20.);
        let inputs = inputs(10., 2000.);
        let classification = classify(&zone, &state, &inputs);

        let demand = restrict(&zone, &state, &inputs, &classification).unwrap();

        assert_relative_eq!(demand.energy_demand, 328.094091, max_relative = 1e-6);
        assert_eq!(demand.energy_demand, demand.energy_demand_unrestricted);
    }

    #[rstest]
    fn test_restrict_heating_to_capacity(zone: ZoneConfiguration) {
        let state = SimulationState::new(19.);
        let inputs = inputs(5., 2000.);
        let classification = classify(&zone, &state, &inputs);

        let demand = restrict(&zone, &state, &inputs, &classification).unwrap();

        assert_relative_eq!(demand.energy_demand_unrestricted, 986.353270, max_relative = 1e-6);
        assert_relative_eq!(demand.energy_demand, 411.6, max_relative = 1e-12);
    }

    #[rstest]
    fn test_restrict_cooling(zone: ZoneConfiguration) {
        let state = SimulationState::new(24.);
        let inputs = inputs(25., 4000.);
        let classification = classify(&zone, &state, &inputs);

        let demand = restrict(&zone, &state, &inputs, &classification).unwrap();

        assert_relative_eq!(demand.energy_demand, -264.752131, max_relative = 1e-6);
    }

    #[rstest]
    fn test_restrict_without_demand(zone: ZoneConfiguration) {
        let state = SimulationState::new(22.);
        let inputs = inputs(10., 2000.);
        let classification = classify(&zone, &state, &inputs);

        assert_eq!(
            restrict(&zone, &state, &inputs, &classification),
            Err(SimulationError::InvalidState)
        );
    }

    #[test]
    fn test_unrestricted_energy_demand() {
        assert_relative_eq!(
            unrestricted_energy_demand(343., 20., 18., 19.).unwrap(),
            686.
        );
    }

    #[test]
    fn test_unrestricted_energy_demand_degenerate() {
        assert_eq!(
            unrestricted_energy_demand(343., 20., 18., 18.),
            Err(SimulationError::DegenerateNetwork {
                temp_air_free: 18.,
                temp_air_reference: 18.,
            })
        );
    }

    #[rstest]
    #[case(1e6, 411.6)]
    #[case(-1e6, -411.6)]
    #[case(100., 100.)]
    #[case(-100., -100.)]
    fn test_clamp_to_capacity(
        zone: ZoneConfiguration,
        #[case] energy_demand: f64,
        #[case] expected: f64,
    ) {
        assert_relative_eq!(clamp_to_capacity(&zone, energy_demand), expected, max_relative = 1e-12);
    }
}
