use serde::Serialize;

use crate::aim::GimbalCommand;
use crate::cluster::SprayTarget;
use crate::segment::HotSpot;

/// Everything produced for one frame.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    /// Position of the frame in the processed sequence.
    pub frame_index: usize,
    pub width: usize,
    pub height: usize,
    pub hotspots: Vec<HotSpot>,
    /// Ranked, most severe first.
    pub targets: Vec<SprayTarget>,
    /// `None` when the frame contains no target.
    pub command: Option<GimbalCommand>,
}

impl FrameReport {
    pub fn primary_target(&self) -> Option<&SprayTarget> {
        self.targets.first()
    }
}
