use crate::core::energy_supply::supply_system::{ServiceType, SupplySystem};
use crate::core::heating_systems::emitters::EmissionSystem;
use crate::core::space_heat_demand::lighting::Lighting;
use crate::core::units::{AIR_VOLUMETRIC_HEAT_CAPACITY, SECONDS_PER_HOUR};
use crate::errors::SimulationError;

// Heat transfer coefficient between air and surface nodes per unit of internal surface area
// (BS EN ISO 13790:2008, 7.2.2.2)
const H_IS: f64 = 3.45; // W / (m2.K)

// Heat transfer coefficient between mass and surface nodes per unit of effective mass area
// (BS EN ISO 13790:2008, 12.2.2)
pub(crate) const H_MS: f64 = 9.1; // W / (m2.K)

// Effective mass area per unit of floor area for a medium weight construction
// (BS EN ISO 13790:2008, Table 12)
const MASS_AREA_FACTOR: f64 = 2.5;

/// Areas and volume of a zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneGeometry {
    /// in m2
    pub floor_area: f64,
    /// in m3
    pub room_volume: f64,
    /// area of all surfaces facing the zone, in m2
    pub total_internal_area: f64,
    /// area of opaque external envelope, in m2
    pub walls_area: f64,
    /// in m2
    pub window_area: f64,
}

impl ZoneGeometry {
    /// Derive zone areas from the dimensions of a rectangular room
    ///
    /// Arguments:
    /// * `room_depth` - in m
    /// * `room_width` - in m
    /// * `room_height` - in m
    /// * `window_area` - glazed area of the external envelope, in m2
    /// * `external_envelope_area` - total (opaque and glazed) area of the external envelope, in m2
    pub fn from_dimensions(
        room_depth: f64,
        room_width: f64,
        room_height: f64,
        window_area: f64,
        external_envelope_area: f64,
    ) -> Self {
        let floor_area = room_depth * room_width;

        Self {
            floor_area,
            room_volume: floor_area * room_height,
            total_internal_area: 2. * floor_area
                + 2. * room_width * room_height
                + 2. * room_depth * room_height,
            walls_area: external_envelope_area - window_area,
            window_area,
        }
    }
}

impl Default for ZoneGeometry {
    fn default() -> Self {
        Self::from_dimensions(7., 5., 3., 4., 15.)
    }
}

/// Everything needed to construct a [`ZoneConfiguration`].
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneParameters {
    pub geometry: ZoneGeometry,
    /// U-value of opaque envelope, in W / (m2.K)
    pub u_walls: f64,
    /// U-value of glazing, in W / (m2.K)
    pub u_windows: f64,
    /// mechanical ventilation rate, in air changes per hour
    pub ach_vent: f64,
    /// infiltration rate, in air changes per hour
    pub ach_infl: f64,
    /// efficiency of heat recovery on the mechanical ventilation
    pub ventilation_efficiency: f64,
    /// thermal capacitance per unit floor area, in J / (m2.K)
    pub thermal_capacitance_per_floor_area: f64,
    /// in deg C
    pub t_set_heating: f64,
    /// in deg C
    pub t_set_cooling: f64,
    /// in W / m2
    pub max_heating_energy_per_floor_area: f64,
    /// in W / m2, negative
    pub max_cooling_energy_per_floor_area: f64,
    pub heating_supply_system: SupplySystem,
    pub cooling_supply_system: SupplySystem,
    pub heating_emission_system: EmissionSystem,
    pub cooling_emission_system: EmissionSystem,
    pub lighting: Lighting,
}

impl Default for ZoneParameters {
    fn default() -> Self {
        Self {
            geometry: Default::default(),
            u_walls: 0.2,
            u_windows: 1.1,
            ach_vent: 1.5,
            ach_infl: 0.5,
            ventilation_efficiency: 0.6,
            thermal_capacitance_per_floor_area: 165_000.,
            t_set_heating: 20.,
            t_set_cooling: 26.,
            max_heating_energy_per_floor_area: f64::INFINITY,
            max_cooling_energy_per_floor_area: f64::NEG_INFINITY,
            heating_supply_system: SupplySystem::OilBoilerMed,
            cooling_supply_system: SupplySystem::HeatPumpAir,
            heating_emission_system: EmissionSystem::NewRadiators,
            cooling_emission_system: EmissionSystem::AirConditioning,
            lighting: Default::default(),
        }
    }
}

/// Conductances of the 5R1C network, in W / K
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conductances {
    /// ventilation, adjusted for heat recovery
    pub h_ve_adj: f64,
    /// air to surface
    pub h_tr_is: f64,
    /// surface to mass
    pub h_tr_ms: f64,
    /// ventilation and air-to-surface in series
    pub h_tr_1: f64,
    /// h_tr_1 in parallel with glazing
    pub h_tr_2: f64,
    /// h_tr_2 in series with surface-to-mass
    pub h_tr_3: f64,
    /// h_tr_1 / h_ve_adj, which stays finite when there is no ventilation
    pub h_tr_1_per_h_ve_adj: f64,
    /// h_tr_3 / h_tr_2
    pub h_tr_3_per_h_tr_2: f64,
}

impl Conductances {
    fn new(
        room_volume: f64,
        total_internal_area: f64,
        mass_area: f64,
        h_tr_w: f64,
        ach_vent: f64,
        ach_infl: f64,
        ventilation_efficiency: f64,
    ) -> Self {
        let ach_tot = ach_vent + ach_infl;
        let b_ek = if ach_tot == 0. {
            1.
        } else {
            1. - (ach_vent / ach_tot) * ventilation_efficiency
        };
        let h_ve_adj = AIR_VOLUMETRIC_HEAT_CAPACITY * b_ek * room_volume * ach_tot
            / SECONDS_PER_HOUR as f64;

        let h_tr_is = H_IS * total_internal_area;
        let h_tr_ms = H_MS * mass_area;

        let h_tr_1_per_h_ve_adj = h_tr_is / (h_ve_adj + h_tr_is);
        let h_tr_1 = h_ve_adj * h_tr_1_per_h_ve_adj;
        let h_tr_2 = h_tr_1 + h_tr_w;
        let h_tr_3_per_h_tr_2 = h_tr_ms / (h_tr_2 + h_tr_ms);
        let h_tr_3 = h_tr_2 * h_tr_3_per_h_tr_2;

        Self {
            h_ve_adj,
            h_tr_is,
            h_tr_ms,
            h_tr_1,
            h_tr_2,
            h_tr_3,
            h_tr_1_per_h_ve_adj,
            h_tr_3_per_h_tr_2,
        }
    }
}

/// Immutable description of a thermal zone, validated at construction, with the network
/// conductances derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneConfiguration {
    pub floor_area: f64,
    pub total_internal_area: f64,
    /// effective mass area, in m2
    pub mass_area: f64,
    pub room_volume: f64,
    /// conductance of opaque envelope, in W / K
    pub h_tr_em: f64,
    /// conductance of glazing, in W / K
    pub h_tr_w: f64,
    /// thermal capacitance of the mass node, in J / K
    pub c_m: f64,
    pub ach_vent: f64,
    pub ach_infl: f64,
    pub ventilation_efficiency: f64,
    pub t_set_heating: f64,
    pub t_set_cooling: f64,
    /// in W
    pub max_heating_energy: f64,
    /// in W, negative
    pub max_cooling_energy: f64,
    pub heating_supply_system: SupplySystem,
    pub cooling_supply_system: SupplySystem,
    pub heating_emission_system: EmissionSystem,
    pub cooling_emission_system: EmissionSystem,
    pub lighting: Lighting,
    pub conductances: Conductances,
}

impl ZoneConfiguration {
    pub fn new(parameters: ZoneParameters) -> Result<Self, SimulationError> {
        let ZoneParameters {
            geometry,
            u_walls,
            u_windows,
            ach_vent,
            ach_infl,
            ventilation_efficiency,
            thermal_capacitance_per_floor_area,
            t_set_heating,
            t_set_cooling,
            max_heating_energy_per_floor_area,
            max_cooling_energy_per_floor_area,
            heating_supply_system,
            cooling_supply_system,
            heating_emission_system,
            cooling_emission_system,
            lighting,
        } = parameters;

        require_positive("floor_area", geometry.floor_area)?;
        require_positive("room_volume", geometry.room_volume)?;
        require_positive("total_internal_area", geometry.total_internal_area)?;
        require_non_negative("walls_area", geometry.walls_area)?;
        require_non_negative("window_area", geometry.window_area)?;
        require_non_negative("u_walls", u_walls)?;
        require_non_negative("u_windows", u_windows)?;
        require_non_negative("ach_vent", ach_vent)?;
        require_non_negative("ach_infl", ach_infl)?;
        require_positive(
            "thermal_capacitance_per_floor_area",
            thermal_capacitance_per_floor_area,
        )?;
        if !(0. ..=1.).contains(&ventilation_efficiency) {
            return Err(SimulationError::invalid_configuration(
                "ventilation_efficiency",
                format!("{ventilation_efficiency} is not between 0 and 1"),
            ));
        }
        if !t_set_heating.is_finite() || !t_set_cooling.is_finite() {
            return Err(SimulationError::invalid_configuration(
                "t_set_heating",
                "setpoints must be finite",
            ));
        }
        if t_set_cooling < t_set_heating {
            return Err(SimulationError::invalid_configuration(
                "t_set_cooling",
                format!(
                    "cooling setpoint {t_set_cooling} is below heating setpoint {t_set_heating}"
                ),
            ));
        }
        if max_heating_energy_per_floor_area.is_nan() || max_heating_energy_per_floor_area < 0. {
            return Err(SimulationError::invalid_configuration(
                "max_heating_energy",
                format!("{max_heating_energy_per_floor_area} must not be negative"),
            ));
        }
        if max_cooling_energy_per_floor_area.is_nan() || max_cooling_energy_per_floor_area > 0. {
            return Err(SimulationError::invalid_configuration(
                "max_cooling_energy",
                format!("{max_cooling_energy_per_floor_area} must not be positive"),
            ));
        }
        if !heating_supply_system.can_serve(ServiceType::Heating) {
            return Err(SimulationError::invalid_configuration(
                "heating_supply_system",
                format!("{heating_supply_system} cannot provide heating"),
            ));
        }
        if !cooling_supply_system.can_serve(ServiceType::Cooling) {
            return Err(SimulationError::invalid_configuration(
                "cooling_supply_system",
                format!("{cooling_supply_system} cannot provide cooling"),
            ));
        }

        let floor_area = geometry.floor_area;
        let mass_area = MASS_AREA_FACTOR * floor_area;
        let h_tr_em = u_walls * geometry.walls_area;
        let h_tr_w = u_windows * geometry.window_area;

        // share of radiant gains left to the surface node once the mass node and the glazing
        // have taken theirs
        let frac_surface = 1.
            - mass_area / geometry.total_internal_area
            - h_tr_w / (H_MS * geometry.total_internal_area);
        if frac_surface < 0. {
            return Err(SimulationError::invalid_configuration(
                "total_internal_area",
                format!(
                    "{} m2 is too small for an effective mass area of {mass_area} m2 and glazing conductance of {h_tr_w} W/K",
                    geometry.total_internal_area
                ),
            ));
        }

        let conductances = Conductances::new(
            geometry.room_volume,
            geometry.total_internal_area,
            mass_area,
            h_tr_w,
            ach_vent,
            ach_infl,
            ventilation_efficiency,
        );

        Ok(Self {
            floor_area,
            total_internal_area: geometry.total_internal_area,
            mass_area,
            room_volume: geometry.room_volume,
            h_tr_em,
            h_tr_w,
            c_m: thermal_capacitance_per_floor_area * floor_area,
            ach_vent,
            ach_infl,
            ventilation_efficiency,
            t_set_heating,
            t_set_cooling,
            max_heating_energy: max_heating_energy_per_floor_area * floor_area,
            max_cooling_energy: max_cooling_energy_per_floor_area * floor_area,
            heating_supply_system,
            cooling_supply_system,
            heating_emission_system,
            cooling_emission_system,
            lighting,
            conductances,
        })
    }

    /// Emission and supply systems that serve the given service.
    pub fn systems_for(&self, service_type: ServiceType) -> (EmissionSystem, SupplySystem) {
        match service_type {
            ServiceType::Heating => (self.heating_emission_system, self.heating_supply_system),
            ServiceType::Cooling => (self.cooling_emission_system, self.cooling_supply_system),
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), SimulationError> {
    if value > 0. && value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid_configuration(
            field,
            format!("{value} must be greater than zero"),
        ))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), SimulationError> {
    if value >= 0. && value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid_configuration(
            field,
            format!("{value} must not be negative"),
        ))
    }
}
