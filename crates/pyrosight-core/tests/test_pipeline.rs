mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use pyrosight_core::aim::{GimbalAngles, GimbalCommand};
use pyrosight_core::config::PyroConfig;
use pyrosight_core::error::PyroError;
use pyrosight_core::field::TemperatureField;
use pyrosight_core::pipeline::{process_frame, process_frames};

use common::{blank_field, paint_disc};

fn two_fire_field() -> TemperatureField {
    let mut field = blank_field(384, 288);
    paint_disc(&mut field, 100.0, 100.0, 10.0, 300.0);
    paint_disc(&mut field, 280.0, 200.0, 10.0, 260.0);
    field
}

#[test]
fn test_two_fires_rank_hotter_first() {
    let config = PyroConfig::default();
    let report = process_frame(0, &two_fire_field(), &config, GimbalAngles::default()).unwrap();

    assert_eq!(report.hotspots.len(), 2);
    assert_eq!(report.targets.len(), 2);
    let primary = report.primary_target().unwrap();
    assert_abs_diff_eq!(primary.aim_pixel_point.x, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(primary.aim_pixel_point.y, 100.0, epsilon = 1e-9);
    assert!(report.targets[0].severity > report.targets[1].severity);
}

#[test]
fn test_command_aims_at_primary_target() {
    let mut config = PyroConfig::default();
    config.camera.hfov_degrees = 40.0;
    config.camera.vfov_degrees = 30.0;
    let current = GimbalAngles::new(5.0, -1.0);

    let report = process_frame(3, &two_fire_field(), &config, current).unwrap();
    assert_eq!(report.frame_index, 3);
    assert_eq!((report.width, report.height), (384, 288));

    let Some(GimbalCommand::Actuate(angles)) = report.command else {
        panic!("expected an actuation command, got {:?}", report.command);
    };
    // (100 - 192) / 192 * 20 and (100 - 144) / 144 * 15
    assert_abs_diff_eq!(angles.azimuth_degrees, 5.0 - 92.0 / 192.0 * 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(angles.pitch_degrees, -1.0 - 44.0 / 144.0 * 15.0, epsilon = 1e-9);
}

#[test]
fn test_no_targets_no_command() {
    let config = PyroConfig::default();
    let report = process_frame(0, &blank_field(384, 288), &config, GimbalAngles::default()).unwrap();
    assert!(report.hotspots.is_empty());
    assert!(report.targets.is_empty());
    assert!(report.command.is_none());
}

#[test]
fn test_invalid_fov_holds_attitude() {
    let mut config = PyroConfig::default();
    config.camera.vfov_degrees = 0.0;
    let current = GimbalAngles::new(12.0, 3.0);
    let report = process_frame(0, &two_fire_field(), &config, current).unwrap();
    assert_eq!(report.targets.len(), 2);
    assert_eq!(report.command, Some(GimbalCommand::Hold(current)));
}

#[test]
fn test_empty_frame_is_abandoned() {
    let config = PyroConfig::default();
    let field = TemperatureField::new(Array2::zeros((0, 0)));
    let result = process_frame(0, &field, &config, GimbalAngles::default());
    assert!(matches!(result, Err(PyroError::DataFormat(_))));
}

#[test]
fn test_batch_preserves_order_and_isolates_failures() {
    let config = PyroConfig::default();
    let fields = vec![
        two_fire_field(),
        blank_field(384, 288),
        TemperatureField::new(Array2::zeros((0, 0))),
        two_fire_field(),
        blank_field(64, 64),
    ];

    let results = process_frames(&fields, &config, GimbalAngles::default());
    assert_eq!(results.len(), 5);

    assert_eq!(results[0].as_ref().unwrap().targets.len(), 2);
    assert!(results[1].as_ref().unwrap().targets.is_empty());
    assert!(results[2].is_err());
    let fourth = results[3].as_ref().unwrap();
    assert_eq!(fourth.frame_index, 3);
    assert_eq!(fourth.targets.len(), 2);
    assert_eq!(results[4].as_ref().unwrap().width, 64);
}

#[test]
fn test_frames_are_independent() {
    let config = PyroConfig::default();
    let field = two_fire_field();
    let a = process_frame(0, &field, &config, GimbalAngles::default()).unwrap();
    let b = process_frame(1, &field, &config, GimbalAngles::default()).unwrap();
    assert_eq!(a.command, b.command);
    assert_eq!(a.targets.len(), b.targets.len());
}
