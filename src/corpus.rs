use crate::core::space_heat_demand::zone::ZoneConfiguration;
use crate::core::space_heat_demand::zone_step::{
    step, SimulationState, StepResult, TimestepInputs,
};
use crate::core::units::watt_hours_to_kwh_per_m2;
use crate::errors::SimulationError;
use crate::input::Input;
use crate::simulation_time::SimulationTime;
use anyhow::Context;
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// A zone ready to be simulated, with the time series that drive it.
#[derive(Debug)]
struct ZoneRun {
    configuration: ZoneConfiguration,
    temp_mass_init: f64,
    gains_internal: Vec<f64>,
    gains_solar: Vec<f64>,
    illuminance: Vec<f64>,
    occupancy: Vec<f64>,
}

#[derive(Debug)]
pub struct Corpus {
    simulation_time: SimulationTime,
    temp_ext_air: Vec<f64>,
    zones: IndexMap<String, ZoneRun>,
}

impl Corpus {
    pub fn from_inputs(input: Input) -> anyhow::Result<Self> {
        input.validate()?;

        let zones = input
            .zone
            .into_iter()
            .map(|(name, zone)| {
                let configuration = zone
                    .zone_parameters()
                    .and_then(ZoneConfiguration::new)
                    .with_context(|| format!("Could not configure zone '{name}'"))?;

                Ok((
                    name,
                    ZoneRun {
                        configuration,
                        temp_mass_init: zone.temp_mass_init,
                        gains_internal: zone.internal_gains,
                        gains_solar: zone.solar_gains,
                        illuminance: zone.illuminance,
                        occupancy: zone.occupancy,
                    },
                ))
            })
            .collect::<anyhow::Result<IndexMap<_, _>>>()?;

        Ok(Self {
            simulation_time: input.simulation_time,
            temp_ext_air: input.external_conditions.air_temperatures,
            zones,
        })
    }

    /// Run every zone over the whole simulation time. Zones are independent of each other and
    /// are run in parallel; results are returned in input order.
    pub fn run(&self) -> anyhow::Result<RunResults> {
        debug!(
            zones = self.zones.len(),
            timesteps = self.simulation_time.total_steps(),
            "Starting run"
        );

        let zones = self
            .zones
            .iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(name, zone)| {
                let results = self
                    .run_zone(name, zone)
                    .with_context(|| format!("Calculation failed for zone '{name}'"))?;
                Ok((name.clone(), results))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .collect();

        Ok(RunResults {
            timesteps: self.simulation_time.iter().map(|t_it| t_it.time).collect(),
            zones,
        })
    }

    #[instrument(skip(self, zone))]
    fn run_zone(
        &self,
        name: &str,
        zone: &ZoneRun,
    ) -> Result<ZoneResults, SimulationError> {
        let mut state = SimulationState::new(zone.temp_mass_init);
        let mut results = ZoneResults::new(zone.configuration.floor_area);

        for t_it in self.simulation_time.iter() {
            let inputs = TimestepInputs {
                gains_internal: zone.gains_internal[t_it.index],
                gains_solar: zone.gains_solar[t_it.index],
                temp_ext_air: self.temp_ext_air[t_it.index],
                illuminance: zone.illuminance[t_it.index],
                occupancy: zone.occupancy[t_it.index],
            };
            let (step_result, next_state) = step(&zone.configuration, &state, &inputs)?;
            results.record(t_it.current_month(), step_result);
            state = next_state;
        }

        debug!(
            heating_demand = results.annual.heating_demand,
            cooling_demand = results.annual.cooling_demand,
            "Zone finished"
        );

        Ok(results)
    }
}

#[derive(Debug)]
pub struct RunResults {
    /// start of each timestep, in hours from the start of the year
    pub timesteps: Vec<f64>,
    pub zones: IndexMap<String, ZoneResults>,
}

#[derive(Debug)]
pub struct ZoneResults {
    pub floor_area: f64,
    pub steps: Vec<StepResult>,
    /// totals over the run, in Wh
    pub annual: EnergyTotals,
    /// totals per calendar month, in Wh
    pub monthly: [EnergyTotals; 12],
}

impl ZoneResults {
    fn new(floor_area: f64) -> Self {
        Self {
            floor_area,
            steps: vec![],
            annual: Default::default(),
            monthly: Default::default(),
        }
    }

    fn record(&mut self, month: usize, step_result: StepResult) {
        self.annual.add_step(&step_result);
        self.monthly[month].add_step(&step_result);
        self.steps.push(step_result);
    }
}

/// Energy totals accumulated over a period. Cooling demand is negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnergyTotals {
    pub heating_demand: f64,
    pub cooling_demand: f64,
    pub lighting_demand: f64,
    pub heating_sys_electricity: f64,
    pub heating_sys_fossils: f64,
    pub cooling_sys_electricity: f64,
    pub cooling_sys_fossils: f64,
    pub electricity_out: f64,
}

impl EnergyTotals {
    fn add_step(&mut self, step_result: &StepResult) {
        self.heating_demand += step_result.heating_demand;
        self.cooling_demand += step_result.cooling_demand;
        self.lighting_demand += step_result.lighting_demand;
        self.heating_sys_electricity += step_result.heating_sys_electricity;
        self.heating_sys_fossils += step_result.heating_sys_fossils;
        self.cooling_sys_electricity += step_result.cooling_sys_electricity;
        self.cooling_sys_fossils += step_result.cooling_sys_fossils;
        self.electricity_out += step_result.electricity_out;
    }

    /// The same totals converted from Wh to kWh / m2 of floor area
    pub fn per_floor_area(&self, floor_area: f64) -> Self {
        let convert = |energy| watt_hours_to_kwh_per_m2(energy, floor_area);

        Self {
            heating_demand: convert(self.heating_demand),
            cooling_demand: convert(self.cooling_demand),
            lighting_demand: convert(self.lighting_demand),
            heating_sys_electricity: convert(self.heating_sys_electricity),
            heating_sys_fossils: convert(self.heating_sys_fossils),
            cooling_sys_electricity: convert(self.cooling_sys_electricity),
            cooling_sys_fossils: convert(self.cooling_sys_fossils),
            electricity_out: convert(self.electricity_out),
        }
    }

    /// (heading, value) pairs in output order
    pub fn fields(&self) -> [(&'static str, f64); 8] {
        [
            ("Heating demand", self.heating_demand),
            ("Cooling demand", self.cooling_demand),
            ("Lighting demand", self.lighting_demand),
            ("Heating system electricity", self.heating_sys_electricity),
            ("Heating system fossils", self.heating_sys_fossils),
            ("Cooling system electricity", self.cooling_sys_electricity),
            ("Cooling system fossils", self.cooling_sys_fossils),
            ("Electricity out", self.electricity_out),
        ]
    }
}
