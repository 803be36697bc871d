pub mod demand;
pub mod heat_flows;
pub mod lighting;
pub mod thermal_network;
pub mod zone;
pub mod zone_step;
