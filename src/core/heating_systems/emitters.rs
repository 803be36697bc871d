use crate::errors::{SimulationError, VariantKind};
use std::str::FromStr;

/// Node of the 5R1C network that an emission system delivers its heat flow to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeatNode {
    Air,
    Surface,
    Mass,
}

/// Distribution system that emits heating or cooling into the zone.
///
/// Each variant delivers the whole of the demanded energy to exactly one node of the network and
/// declares the nominal supply and return temperatures of its distribution medium.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter,
)]
pub enum EmissionSystem {
    /// High temperature radiators
    OldRadiators,
    /// Medium temperature radiators
    NewRadiators,
    /// Ducted air heating and cooling
    AirConditioning,
    ChilledBeams,
    FloorHeating,
    /// Thermally activated building structure
    #[strum(to_string = "TABS", serialize = "Tabs")]
    Tabs,
}

/// Heat flow injected into each node for one timestep, with the nominal flow and return
/// temperatures of the emission system that produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EmissionFlows {
    /// Heat flow into the air node, in W
    pub phi_ia_plus: f64,
    /// Heat flow into the surface node, in W
    pub phi_st_plus: f64,
    /// Heat flow into the mass node, in W
    pub phi_m_plus: f64,
    pub heating_supply_temperature: f64,
    pub heating_return_temperature: f64,
    pub cooling_supply_temperature: f64,
    pub cooling_return_temperature: f64,
}

impl EmissionSystem {
    /// Parse an emission system from its input tag.
    pub fn from_tag(tag: &str) -> Result<Self, SimulationError> {
        Self::from_str(tag).map_err(|_| SimulationError::UnsupportedVariant {
            kind: VariantKind::EmissionSystem,
            tag: tag.to_owned(),
        })
    }

    pub fn receiving_node(&self) -> HeatNode {
        match self {
            Self::OldRadiators | Self::NewRadiators | Self::AirConditioning | Self::ChilledBeams => {
                HeatNode::Air
            }
            Self::FloorHeating => HeatNode::Surface,
            Self::Tabs => HeatNode::Mass,
        }
    }

    /// Nominal (supply, return) temperatures when heating, in deg C
    pub fn heating_temperatures(&self) -> (f64, f64) {
        match self {
            Self::OldRadiators => (65., 45.),
            Self::NewRadiators | Self::ChilledBeams | Self::Tabs => (50., 35.),
            Self::AirConditioning => (40., 20.),
            Self::FloorHeating => (40., 5.),
        }
    }

    /// Nominal (supply, return) temperatures when cooling, in deg C
    pub fn cooling_temperatures(&self) -> (f64, f64) {
        match self {
            Self::ChilledBeams => (18., 21.),
            _ => (12., 21.),
        }
    }

    /// Heat flows into the network for the given energy demand.
    ///
    /// Arguments:
    /// * `energy_demand` - signed energy demand for the timestep (cooling negative), in W
    pub fn heat_flows(&self, energy_demand: f64) -> EmissionFlows {
        let (heating_supply_temperature, heating_return_temperature) =
            self.heating_temperatures();
        let (cooling_supply_temperature, cooling_return_temperature) =
            self.cooling_temperatures();

        let (phi_ia_plus, phi_st_plus, phi_m_plus) = match self.receiving_node() {
            HeatNode::Air => (energy_demand, 0., 0.),
            HeatNode::Surface => (0., energy_demand, 0.),
            HeatNode::Mass => (0., 0., energy_demand),
        };

        EmissionFlows {
            phi_ia_plus,
            phi_st_plus,
            phi_m_plus,
            heating_supply_temperature,
            heating_return_temperature,
            cooling_supply_temperature,
            cooling_return_temperature,
        }
    }
}
