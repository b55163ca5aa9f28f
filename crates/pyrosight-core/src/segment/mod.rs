pub mod components;
pub mod config;
pub mod contour;
pub mod hotspot;
pub mod morphology;
pub mod threshold;

pub use config::DetectionConfig;
pub use hotspot::{segment, segment_with, HotSpot};
