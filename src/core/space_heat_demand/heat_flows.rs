use crate::core::heating_systems::emitters::EmissionFlows;
use crate::core::space_heat_demand::zone::{ZoneConfiguration, H_MS};

/// Total heat flow into each node of the network, in W
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeHeatFlows {
    pub phi_ia: f64,
    pub phi_st: f64,
    pub phi_m: f64,
}

/// Split internal and solar gains between the air, surface and mass nodes and add the flows
/// injected by the active emission system.
///
/// Half of the internal gains are convective and go straight to the air node. The radiant half
/// and the solar gains are shared between the surface and mass nodes in proportion to area,
/// less the share that is radiated back out through the glazing.
pub fn distribute_heat_flows(
    zone: &ZoneConfiguration,
    gains_internal: f64,
    gains_solar: f64,
    injected: &EmissionFlows,
) -> NodeHeatFlows {
    let gains_radiant = 0.5 * gains_internal + gains_solar;
    let frac_mass = zone.mass_area / zone.total_internal_area;
    let frac_surface =
        1. - frac_mass - zone.h_tr_w / (H_MS * zone.total_internal_area);

    NodeHeatFlows {
        phi_ia: 0.5 * gains_internal + injected.phi_ia_plus,
        phi_st: frac_surface * gains_radiant + injected.phi_st_plus,
        phi_m: frac_mass * gains_radiant + injected.phi_m_plus,
    }
}
