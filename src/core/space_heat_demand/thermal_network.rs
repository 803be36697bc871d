use crate::core::heating_systems::emitters::EmissionFlows;
use crate::core::space_heat_demand::heat_flows::distribute_heat_flows;
use crate::core::space_heat_demand::zone::ZoneConfiguration;
use crate::core::units::SECONDS_PER_HOUR;

/// Node temperatures of the network at the end of a timestep, in deg C
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTemperatures {
    /// mass temperature at the end of the timestep, carried into the next one
    pub temp_mass_next: f64,
    /// mass temperature averaged over the timestep
    pub temp_mass: f64,
    pub temp_surface: f64,
    pub temp_air: f64,
    pub temp_operative: f64,
}

/// Solve the 5R1C network for one hourly timestep.
///
/// The mass node is integrated with a Crank-Nicolson step from its previous temperature; the
/// surface and air temperatures then follow from steady-state balances around the averaged mass
/// temperature. Supply air is assumed to be at outdoor temperature.
///
/// Arguments:
/// * `zone` - zone configuration with its derived conductances
/// * `temp_mass_prev` - mass temperature at the end of the previous timestep, in deg C
/// * `temp_ext_air` - outdoor air temperature, in deg C
/// * `gains_internal` - internal gains, in W
/// * `gains_solar` - solar gains, in W
/// * `injected` - heat flows from the emission system, in W
pub fn solve(
    zone: &ZoneConfiguration,
    temp_mass_prev: f64,
    temp_ext_air: f64,
    gains_internal: f64,
    gains_solar: f64,
    injected: &EmissionFlows,
) -> NodeTemperatures {
    let c = &zone.conductances;
    let flows = distribute_heat_flows(zone, gains_internal, gains_solar, injected);
    let temp_supply = temp_ext_air;

    // h_tr_1 * (phi_ia / h_ve_adj + T_sup), rearranged to stay finite without ventilation
    let flow_through_h_tr_1 =
        c.h_tr_1_per_h_ve_adj * (flows.phi_ia + c.h_ve_adj * temp_supply);

    let phi_m_tot = flows.phi_m
        + zone.h_tr_em * temp_ext_air
        + c.h_tr_3_per_h_tr_2 * (flows.phi_st + zone.h_tr_w * temp_ext_air + flow_through_h_tr_1);

    let capacitance_per_step = zone.c_m / SECONDS_PER_HOUR as f64;
    let h_mass_loss = 0.5 * (c.h_tr_3 + zone.h_tr_em);
    let temp_mass_next = (temp_mass_prev * (capacitance_per_step - h_mass_loss) + phi_m_tot)
        / (capacitance_per_step + h_mass_loss);
    let temp_mass = 0.5 * (temp_mass_next + temp_mass_prev);

    let temp_surface = (c.h_tr_ms * temp_mass
        + flows.phi_st
        + zone.h_tr_w * temp_ext_air
        + flow_through_h_tr_1)
        / (c.h_tr_ms + zone.h_tr_w + c.h_tr_1);

    let temp_air = (c.h_tr_is * temp_surface + c.h_ve_adj * temp_supply + flows.phi_ia)
        / (c.h_tr_is + c.h_ve_adj);

    NodeTemperatures {
        temp_mass_next,
        temp_mass,
        temp_surface,
        temp_air,
        temp_operative: 0.3 * temp_air + 0.7 * temp_surface,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::heating_systems::emitters::EmissionSystem;
    use crate::core::space_heat_demand::zone::{ZoneGeometry, ZoneParameters};
    use approx::assert_relative_eq;
    use rstest::*;

    #[fixture]
    fn zone() -> ZoneConfiguration {
        ZoneConfiguration::new(ZoneParameters {
            geometry: ZoneGeometry::from_dimensions(7., 4.9, 3.1, 13.5, 15.19),
            ventilation_efficiency: 0.,
            ..Default::default()
        })
        .unwrap()
    }

    #[rstest]
    fn test_free_floating(zone: ZoneConfiguration) {
        let temps = solve(&zone, 22., 10., 10., 2000., &EmissionFlows::default());

        assert_relative_eq!(temps.temp_mass_next, 22.667962, max_relative = 1e-6);
        assert_relative_eq!(temps.temp_mass, 22.333981, max_relative = 1e-6);
        assert_relative_eq!(temps.temp_surface, 22.137558, max_relative = 1e-6);
        assert_relative_eq!(temps.temp_air, 20.615774, max_relative = 1e-6);
        assert_relative_eq!(temps.temp_operative, 21.681023, max_relative = 1e-6);
    }

    #[rstest]
    fn test_equilibrium_without_gains(zone: ZoneConfiguration) {
        let temps = solve(&zone, 15., 15., 0., 0., &EmissionFlows::default());

        for temp in [
            temps.temp_mass_next,
            temps.temp_mass,
            temps.temp_surface,
            temps.temp_air,
            temps.temp_operative,
        ] {
            assert_relative_eq!(temp, 15., max_relative = 1e-12);
        }
    }

    #[rstest]
    fn test_heat_to_air_warms_air_most(zone: ZoneConfiguration) {
        let free = solve(&zone, 20., 10., 0., 0., &EmissionFlows::default());
        let heated = solve(
            &zone,
            20.,
            10.,
            0.,
            0.,
            &EmissionSystem::AirConditioning.heat_flows(500.),
        );

        assert!(heated.temp_air - free.temp_air > heated.temp_surface - free.temp_surface);
        assert!(heated.temp_surface - free.temp_surface > heated.temp_mass - free.temp_mass);
        assert!(heated.temp_mass > free.temp_mass);
    }

    #[rstest]
    fn test_heat_to_mass_warms_mass_most(zone: ZoneConfiguration) {
        let free = solve(&zone, 20., 10., 0., 0., &EmissionFlows::default());
        let heated = solve(&zone, 20., 10., 0., 0., &EmissionSystem::Tabs.heat_flows(500.));

        assert!(heated.temp_mass - free.temp_mass > heated.temp_air - free.temp_air);
    }

    #[test]
    fn test_no_ventilation_stays_finite() {
        let zone = ZoneConfiguration::new(ZoneParameters {
            geometry: ZoneGeometry::from_dimensions(7., 4.9, 3.1, 13.5, 15.19),
            ach_vent: 0.,
            ach_infl: 0.,
            ..Default::default()
        })
        .unwrap();
        let temps = solve(&zone, 20., 0., 100., 500., &EmissionFlows::default());

        assert!(temps.temp_air.is_finite());
        assert!(temps.temp_surface.is_finite());
        assert!(temps.temp_mass.is_finite());
        // with no ventilation, air and surface are only coupled to each other, so the air
        // node sits above the surface by the convective gains over h_tr_is
        assert_relative_eq!(
            temps.temp_air - temps.temp_surface,
            50. / zone.conductances.h_tr_is,
            max_relative = 1e-9
        );
    }
}
