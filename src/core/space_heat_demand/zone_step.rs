use crate::core::energy_supply::supply_system::{ServiceType, SupplyResult};
use crate::core::space_heat_demand::demand::{classify, restrict, DemandState};
use crate::core::space_heat_demand::thermal_network::solve;
use crate::core::space_heat_demand::zone::ZoneConfiguration;
use crate::errors::SimulationError;

/// Boundary conditions for one hourly timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimestepInputs {
    /// in W
    pub gains_internal: f64,
    /// in W
    pub gains_solar: f64,
    /// in deg C
    pub temp_ext_air: f64,
    /// illuminance on the glazing, in lux
    pub illuminance: f64,
    /// in people / m2
    pub occupancy: f64,
}

/// State carried from one timestep to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationState {
    /// mass temperature at the end of the previous timestep, in deg C
    pub temp_mass_prev: f64,
}

impl SimulationState {
    pub fn new(temp_mass_init: f64) -> Self {
        Self {
            temp_mass_prev: temp_mass_init,
        }
    }
}

/// Everything observable about a zone after one timestep. Energies are in Wh over the
/// (hourly) timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    pub demand_state: DemandState,
    pub temp_air: f64,
    pub temp_surface: f64,
    /// mass temperature averaged over the timestep
    pub temp_mass: f64,
    pub temp_operative: f64,
    /// signed energy demand after restriction (cooling negative)
    pub energy_demand: f64,
    pub energy_demand_unrestricted: f64,
    pub heating_demand: f64,
    /// negative when cooling
    pub cooling_demand: f64,
    pub lighting_demand: f64,
    pub heating_sys_electricity: f64,
    pub heating_sys_fossils: f64,
    pub cooling_sys_electricity: f64,
    pub cooling_sys_fossils: f64,
    /// by-product electricity, e.g. from cogeneration
    pub electricity_out: f64,
    pub cop: Option<f64>,
    /// nominal temperatures of the heating and cooling emission systems, in deg C
    pub heating_supply_temperature: f64,
    pub heating_return_temperature: f64,
    pub cooling_supply_temperature: f64,
    pub cooling_return_temperature: f64,
}

impl StepResult {
    /// Final energy used for heating
    pub fn heating_energy(&self) -> f64 {
        self.heating_sys_electricity + self.heating_sys_fossils
    }

    /// Final energy used for cooling
    pub fn cooling_energy(&self) -> f64 {
        self.cooling_sys_electricity + self.cooling_sys_fossils
    }

    pub fn sys_total_energy(&self) -> f64 {
        self.heating_energy() + self.cooling_energy()
    }
}

/// Advance a zone by one timestep.
///
/// Returns the results of the timestep and the state to carry into the next one. The inputs
/// are never mutated, so calling this twice with the same arguments gives identical results.
pub fn step(
    zone: &ZoneConfiguration,
    state: &SimulationState,
    inputs: &TimestepInputs,
) -> Result<(StepResult, SimulationState), SimulationError> {
    let classification = classify(zone, state, inputs);
    let lighting_demand = zone
        .lighting
        .demand(zone.floor_area, inputs.illuminance, inputs.occupancy);

    let (temps, energy_demand, energy_demand_unrestricted, service) =
        match classification.demand_state.service_type() {
            None => (classification.temps_free, 0., 0., None),
            Some(service_type) => {
                let demand = restrict(zone, state, inputs, &classification)?;
                let (emission_system, supply_system) = zone.systems_for(service_type);
                let emission_flows = emission_system.heat_flows(demand.energy_demand);
                let temps = solve(
                    zone,
                    state.temp_mass_prev,
                    inputs.temp_ext_air,
                    inputs.gains_internal,
                    inputs.gains_solar,
                    &emission_flows,
                );
                let (load, temp_supply) = match service_type {
                    ServiceType::Heating => (
                        demand.energy_demand,
                        emission_flows.heating_supply_temperature,
                    ),
                    ServiceType::Cooling => (
                        -demand.energy_demand,
                        emission_flows.cooling_supply_temperature,
                    ),
                };
                let supply = supply_system.dispatch(
                    service_type,
                    load,
                    inputs.temp_ext_air,
                    temp_supply,
                );
                (
                    temps,
                    demand.energy_demand,
                    demand.energy_demand_unrestricted,
                    Some((service_type, supply)),
                )
            }
        };

    let (heating, cooling) = match service {
        Some((ServiceType::Heating, supply)) => (supply, SupplyResult::default()),
        Some((ServiceType::Cooling, supply)) => (SupplyResult::default(), supply),
        None => Default::default(),
    };

    let (heating_supply_temperature, heating_return_temperature) =
        zone.heating_emission_system.heating_temperatures();
    let (cooling_supply_temperature, cooling_return_temperature) =
        zone.cooling_emission_system.cooling_temperatures();

    let result = StepResult {
        demand_state: classification.demand_state,
        temp_air: temps.temp_air,
        temp_surface: temps.temp_surface,
        temp_mass: temps.temp_mass,
        temp_operative: temps.temp_operative,
        energy_demand,
        energy_demand_unrestricted,
        heating_demand: energy_demand.max(0.),
        cooling_demand: energy_demand.min(0.),
        lighting_demand,
        heating_sys_electricity: heating.electricity_in,
        heating_sys_fossils: heating.fossils_in,
        cooling_sys_electricity: cooling.electricity_in,
        cooling_sys_fossils: cooling.fossils_in,
        electricity_out: heating.electricity_out + cooling.electricity_out,
        cop: heating.cop.or(cooling.cop),
        heating_supply_temperature,
        heating_return_temperature,
        cooling_supply_temperature,
        cooling_return_temperature,
    };

    Ok((result, SimulationState::new(temps.temp_mass_next)))
}
