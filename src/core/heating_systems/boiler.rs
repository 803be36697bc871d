use crate::core::energy_supply::supply_system::SupplyResult;

/// Thermal efficiency of a combined heat and power unit
const CHP_THERMAL_EFFICIENCY: f64 = 0.6;
/// Electricity generated by a combined heat and power unit per unit of fuel burnt
const CHP_ELECTRICAL_YIELD: f64 = 0.33;

/// Age class of an oil-fired boiler, which determines its seasonal efficiency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OilBoilerClass {
    Old,
    Medium,
    New,
}

impl OilBoilerClass {
    pub fn efficiency(&self) -> f64 {
        match self {
            Self::Old => 0.63,
            Self::Medium => 0.82,
            Self::New => 0.98,
        }
    }

    /// Fuel burnt to deliver the given heating load, in Wh
    pub fn demand_energy(&self, load: f64) -> SupplyResult {
        SupplyResult {
            fossils_in: load / self.efficiency(),
            ..Default::default()
        }
    }
}

/// Fuel burnt by a combined heat and power unit to deliver the given heating load, and the
/// electricity it generates as a by-product. The generated electricity is reported separately
/// and never netted against consumption.
pub fn cogeneration_demand_energy(load: f64) -> SupplyResult {
    let fossils_in = load / CHP_THERMAL_EFFICIENCY;

    SupplyResult {
        fossils_in,
        electricity_out: fossils_in * CHP_ELECTRICAL_YIELD,
        ..Default::default()
    }
}
