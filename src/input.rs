use crate::core::energy_supply::supply_system::SupplySystem;
use crate::core::heating_systems::emitters::EmissionSystem;
use crate::core::space_heat_demand::lighting::Lighting;
use crate::core::space_heat_demand::zone::{ZoneGeometry, ZoneParameters};
use crate::errors::SimulationError;
use crate::simulation_time::SimulationTime;
use anyhow::bail;
use indexmap::IndexMap;
use serde::Deserialize;
use std::io::{BufReader, Read};

pub fn ingest_for_processing(json: impl Read) -> anyhow::Result<Input> {
    let input: Input = serde_json::from_reader(BufReader::new(json))?;
    input.validate()?;

    Ok(input)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Input {
    pub simulation_time: SimulationTime,
    pub external_conditions: ExternalConditionsInput,
    pub zone: ZoneDictionary,
}

impl Input {
    /// Check the input is complete enough to be run.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.simulation_time.step() != 1. {
            bail!(
                "Only hourly timesteps are supported, but a step of {} hours was given",
                self.simulation_time.step()
            );
        }
        if self.zone.is_empty() {
            bail!("At least one zone must be provided");
        }

        let total_steps = self.simulation_time.total_steps();
        let air_temperatures = self.external_conditions.air_temperatures.len();
        if air_temperatures < total_steps {
            bail!("External air temperatures cover {air_temperatures} timesteps but the simulation has {total_steps}");
        }
        for (name, zone) in &self.zone {
            for (series_name, series) in [
                ("internal_gains", &zone.internal_gains),
                ("solar_gains", &zone.solar_gains),
                ("illuminance", &zone.illuminance),
                ("occupancy", &zone.occupancy),
            ] {
                if series.len() < total_steps {
                    bail!(
                        "Series {series_name} for zone '{name}' covers {} timesteps but the simulation has {total_steps}",
                        series.len()
                    );
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalConditionsInput {
    pub air_temperatures: Vec<f64>,
}

pub type ZoneDictionary = IndexMap<String, ZoneInput>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneInput {
    #[serde(rename = "Geometry", default)]
    pub geometry: ZoneGeometryInput,
    #[serde(default = "default_u_walls")]
    pub u_walls: f64,
    #[serde(default = "default_u_windows")]
    pub u_windows: f64,
    #[serde(default = "default_ach_vent")]
    pub ach_vent: f64,
    #[serde(default = "default_ach_infl")]
    pub ach_infl: f64,
    #[serde(default = "default_ventilation_efficiency")]
    pub ventilation_efficiency: f64,
    /// in J / (m2.K)
    #[serde(default = "default_thermal_capacitance")]
    pub thermal_capacitance_per_floor_area: f64,
    #[serde(default = "default_temp_setpnt_heat")]
    pub temp_setpnt_heat: f64,
    #[serde(default = "default_temp_setpnt_cool")]
    pub temp_setpnt_cool: f64,
    /// in W / m2; no limit when absent
    pub max_heating_energy_per_floor_area: Option<f64>,
    /// in W / m2, negative; no limit when absent
    pub max_cooling_energy_per_floor_area: Option<f64>,
    #[serde(rename = "SpaceHeatSupply", default = "default_heating_supply_system")]
    pub heating_supply_system: String,
    #[serde(rename = "SpaceCoolSupply", default = "default_cooling_supply_system")]
    pub cooling_supply_system: String,
    #[serde(rename = "SpaceHeatEmission", default = "default_heating_emission_system")]
    pub heating_emission_system: String,
    #[serde(rename = "SpaceCoolEmission", default = "default_cooling_emission_system")]
    pub cooling_emission_system: String,
    #[serde(rename = "Lighting")]
    pub lighting: Option<LightingInput>,
    #[serde(default = "default_temp_mass_init")]
    pub temp_mass_init: f64,
    /// in W
    pub internal_gains: Vec<f64>,
    /// in W
    pub solar_gains: Vec<f64>,
    /// in lux
    pub illuminance: Vec<f64>,
    /// in people / m2
    pub occupancy: Vec<f64>,
}

impl ZoneInput {
    /// Parameters for constructing the zone, resolving system tags into their variants.
    pub fn zone_parameters(&self) -> Result<ZoneParameters, SimulationError> {
        Ok(ZoneParameters {
            geometry: self.geometry.into(),
            u_walls: self.u_walls,
            u_windows: self.u_windows,
            ach_vent: self.ach_vent,
            ach_infl: self.ach_infl,
            ventilation_efficiency: self.ventilation_efficiency,
            thermal_capacitance_per_floor_area: self.thermal_capacitance_per_floor_area,
            t_set_heating: self.temp_setpnt_heat,
            t_set_cooling: self.temp_setpnt_cool,
            max_heating_energy_per_floor_area: self
                .max_heating_energy_per_floor_area
                .unwrap_or(f64::INFINITY),
            max_cooling_energy_per_floor_area: self
                .max_cooling_energy_per_floor_area
                .unwrap_or(f64::NEG_INFINITY),
            heating_supply_system: SupplySystem::from_tag(&self.heating_supply_system)?,
            cooling_supply_system: SupplySystem::from_tag(&self.cooling_supply_system)?,
            heating_emission_system: EmissionSystem::from_tag(&self.heating_emission_system)?,
            cooling_emission_system: EmissionSystem::from_tag(&self.cooling_emission_system)?,
            lighting: self.lighting.map(Lighting::from).unwrap_or_default(),
        })
    }
}

fn default_u_walls() -> f64 {
    0.2
}

fn default_u_windows() -> f64 {
    1.1
}

fn default_ach_vent() -> f64 {
    1.5
}

fn default_ach_infl() -> f64 {
    0.5
}

fn default_ventilation_efficiency() -> f64 {
    0.6
}

fn default_thermal_capacitance() -> f64 {
    165_000.
}

fn default_temp_setpnt_heat() -> f64 {
    20.
}

fn default_temp_setpnt_cool() -> f64 {
    26.
}

fn default_heating_supply_system() -> String {
    SupplySystem::OilBoilerMed.to_string()
}

fn default_cooling_supply_system() -> String {
    SupplySystem::HeatPumpAir.to_string()
}

fn default_heating_emission_system() -> String {
    EmissionSystem::NewRadiators.to_string()
}

fn default_cooling_emission_system() -> String {
    EmissionSystem::AirConditioning.to_string()
}

fn default_temp_mass_init() -> f64 {
    20.
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum ZoneGeometryInput {
    #[serde(rename = "RoomDimensions")]
    Dimensions {
        room_depth: f64,
        room_width: f64,
        room_height: f64,
        window_area: f64,
        external_envelope_area: f64,
    },
    #[serde(rename = "Areas")]
    Areas {
        floor_area: f64,
        room_volume: f64,
        total_internal_area: f64,
        walls_area: f64,
        window_area: f64,
    },
}

impl Default for ZoneGeometryInput {
    fn default() -> Self {
        Self::Dimensions {
            room_depth: 7.,
            room_width: 5.,
            room_height: 3.,
            window_area: 4.,
            external_envelope_area: 15.,
        }
    }
}

impl From<ZoneGeometryInput> for ZoneGeometry {
    fn from(value: ZoneGeometryInput) -> Self {
        match value {
            ZoneGeometryInput::Dimensions {
                room_depth,
                room_width,
                room_height,
                window_area,
                external_envelope_area,
            } => ZoneGeometry::from_dimensions(
                room_depth,
                room_width,
                room_height,
                window_area,
                external_envelope_area,
            ),
            ZoneGeometryInput::Areas {
                floor_area,
                room_volume,
                total_internal_area,
                walls_area,
                window_area,
            } => ZoneGeometry {
                floor_area,
                room_volume,
                total_internal_area,
                walls_area,
                window_area,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LightingInput {
    /// in W / m2
    pub load: f64,
    /// in lux
    pub control: f64,
    pub utilisation_factor: f64,
    pub maintenance_factor: f64,
}

impl From<LightingInput> for Lighting {
    fn from(value: LightingInput) -> Self {
        Self {
            load: value.load,
            control: value.control,
            utilisation_factor: value.utilisation_factor,
            maintenance_factor: value.maintenance_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VariantKind;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[fixture]
    fn input_json() -> serde_json::Value {
        json!({
            "SimulationTime": {"start": 0, "end": 2, "step": 1},
            "ExternalConditions": {"air_temperatures": [10.0, 11.0]},
            "Zone": {
                "office": {
                    "Geometry": {
                        "type": "RoomDimensions",
                        "room_depth": 7.0,
                        "room_width": 4.9,
                        "room_height": 3.1,
                        "window_area": 13.5,
                        "external_envelope_area": 15.19
                    },
                    "SpaceHeatSupply": "DirectHeater",
                    "SpaceCoolSupply": "DirectCooler",
                    "internal_gains": [10.0, 10.0],
                    "solar_gains": [2000.0, 2000.0],
                    "illuminance": [44000.0, 44000.0],
                    "occupancy": [0.1, 0.1]
                }
            }
        })
    }

    fn ingest(json: serde_json::Value) -> anyhow::Result<Input> {
        ingest_for_processing(json.to_string().as_bytes())
    }

    #[rstest]
    fn test_ingest_applies_defaults(input_json: serde_json::Value) {
        let input = ingest(input_json).unwrap();
        let zone = &input.zone["office"];
        let parameters = zone.zone_parameters().unwrap();

        assert_eq!(input.simulation_time.total_steps(), 2);
        assert_eq!(parameters.u_walls, 0.2);
        assert_eq!(parameters.ventilation_efficiency, 0.6);
        assert_eq!(parameters.heating_supply_system, SupplySystem::DirectHeater);
        assert_eq!(parameters.cooling_supply_system, SupplySystem::DirectCooler);
        assert_eq!(
            parameters.heating_emission_system,
            EmissionSystem::NewRadiators
        );
        assert_eq!(
            parameters.cooling_emission_system,
            EmissionSystem::AirConditioning
        );
        assert_eq!(parameters.max_heating_energy_per_floor_area, f64::INFINITY);
        assert_eq!(parameters.lighting, Lighting::default());
        assert_eq!(zone.temp_mass_init, 20.);
    }

    #[rstest]
    fn test_ingest_explicit_areas(mut input_json: serde_json::Value) {
        input_json["Zone"]["office"]["Geometry"] = json!({
            "type": "Areas",
            "floor_area": 30.0,
            "room_volume": 90.0,
            "total_internal_area": 120.0,
            "walls_area": 10.0,
            "window_area": 5.0
        });
        let input = ingest(input_json).unwrap();

        assert_eq!(
            ZoneGeometry::from(input.zone["office"].geometry),
            ZoneGeometry {
                floor_area: 30.,
                room_volume: 90.,
                total_internal_area: 120.,
                walls_area: 10.,
                window_area: 5.,
            }
        );
    }

    #[rstest]
    fn test_ingest_rejects_unknown_field(mut input_json: serde_json::Value) {
        input_json["Zone"]["office"]["colour"] = json!("blue");

        assert!(ingest(input_json).is_err());
    }

    #[rstest]
    fn test_ingest_rejects_short_series(mut input_json: serde_json::Value) {
        input_json["Zone"]["office"]["solar_gains"] = json!([2000.0]);

        let error = ingest(input_json).unwrap_err();
        assert!(error.to_string().contains("solar_gains"));
    }

    #[rstest]
    fn test_ingest_rejects_sub_hourly_step(mut input_json: serde_json::Value) {
        input_json["SimulationTime"]["step"] = json!(0.5);

        assert!(ingest(input_json).is_err());
    }

    #[rstest]
    fn test_unknown_system_tag(mut input_json: serde_json::Value) {
        input_json["Zone"]["office"]["SpaceHeatEmission"] = json!("Fireplace");
        let input = ingest(input_json).unwrap();

        assert_eq!(
            input.zone["office"].zone_parameters(),
            Err(SimulationError::UnsupportedVariant {
                kind: VariantKind::EmissionSystem,
                tag: "Fireplace".into(),
            })
        );
    }
}
