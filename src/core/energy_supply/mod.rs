pub mod supply_system;
