pub mod boiler;
pub mod emitters;
pub mod heat_pump;
