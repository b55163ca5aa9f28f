use rayon::prelude::*;
use tracing::{debug, info};

use crate::aim::{resolve_or_hold, GimbalAngles, GimbalCommand};
use crate::cluster::cluster;
use crate::config::PyroConfig;
use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::Result;
use crate::field::TemperatureField;
use crate::segment::segment_with;

use super::types::FrameReport;

/// Run segmentation, clustering and aim resolution on one frame.
///
/// A malformed field abandons the frame with an error and nothing else is
/// produced. An invalid field of view does not fail the frame; the command is
/// [`GimbalCommand::Hold`] instead.
pub fn process_frame(
    frame_index: usize,
    field: &TemperatureField,
    config: &PyroConfig,
    current: GimbalAngles,
) -> Result<FrameReport> {
    let hotspots = segment_with(field, &config.detection, &config.projection)?;
    let targets = cluster(&hotspots, config.grouping.max_grouping_distance);

    let command = targets.first().map(|primary| {
        let geometry = config.aim_geometry(field.width(), field.height());
        resolve_or_hold(
            primary.aim_pixel_point,
            &geometry,
            current,
            config.gimbal.nozzle_offset,
        )
    });

    match (&command, targets.first()) {
        (Some(GimbalCommand::Actuate(angles)), Some(primary)) => info!(
            frame = frame_index,
            targets = targets.len(),
            x = primary.aim_pixel_point.x,
            y = primary.aim_pixel_point.y,
            azimuth = angles.azimuth_degrees,
            pitch = angles.pitch_degrees,
            "Primary target resolved"
        ),
        (Some(GimbalCommand::Hold(_)), _) => info!(frame = frame_index, "Holding attitude"),
        _ => debug!(frame = frame_index, "No spray targets"),
    }

    Ok(FrameReport {
        frame_index,
        width: field.width(),
        height: field.height(),
        hotspots,
        targets,
        command,
    })
}

/// Process independent frames against the same attitude.
///
/// Frames are spread over the Rayon pool when there are at least
/// [`PARALLEL_FRAME_THRESHOLD`] of them. Output order matches input order and
/// a failed frame does not affect the others.
pub fn process_frames(
    fields: &[TemperatureField],
    config: &PyroConfig,
    current: GimbalAngles,
) -> Vec<Result<FrameReport>> {
    if fields.len() >= PARALLEL_FRAME_THRESHOLD {
        fields
            .par_iter()
            .enumerate()
            .map(|(i, field)| process_frame(i, field, config, current))
            .collect()
    } else {
        fields
            .iter()
            .enumerate()
            .map(|(i, field)| process_frame(i, field, config, current))
            .collect()
    }
}
