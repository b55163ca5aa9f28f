pub mod thermal;

pub use thermal::{load_thermal_image, ThermalImageConfig};
