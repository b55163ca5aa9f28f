/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Default detection threshold in degrees Celsius.
pub const DEFAULT_TEMPERATURE_THRESHOLD: f32 = 250.0;

/// Default minimum hotspot area in pixels. Regions with exactly this area are kept.
pub const DEFAULT_MIN_AREA_PIXELS: usize = 30;

/// Default maximum seed-to-member distance (metres) for merging hotspots.
pub const DEFAULT_MAX_GROUPING_DISTANCE: f64 = 1.0;

/// Default distance (metres) to the plane the fire is assumed to lie on.
/// Monocular depth is not observable; every centroid is projected onto this plane.
pub const DEFAULT_PLANE_DISTANCE: f64 = 8.0;

/// Default pinhole focal lengths (pixels).
pub const DEFAULT_FOCAL_LENGTH: f64 = 500.0;

/// Default principal point x (pixels).
pub const DEFAULT_PRINCIPAL_X: f64 = 320.0;

/// Default principal point y (pixels).
pub const DEFAULT_PRINCIPAL_Y: f64 = 240.0;

/// Default horizontal field of view in degrees.
pub const DEFAULT_HFOV_DEGREES: f64 = 60.0;

/// Default vertical field of view in degrees.
pub const DEFAULT_VFOV_DEGREES: f64 = 45.0;

/// Side length of the elliptical structuring element used for opening/closing.
pub const MORPHOLOGY_KERNEL_SIZE: usize = 5;

/// Temperature mapped to a black pixel when loading grayscale thermal images.
pub const DEFAULT_THERMAL_MIN_TEMPERATURE: f32 = 20.0;

/// Temperature mapped to a white pixel when loading grayscale thermal images.
pub const DEFAULT_THERMAL_MAX_TEMPERATURE: f32 = 500.0;

/// Sensor width of the reference thermal camera.
pub const DEFAULT_THERMAL_WIDTH: u32 = 384;

/// Sensor height of the reference thermal camera.
pub const DEFAULT_THERMAL_HEIGHT: u32 = 288;
