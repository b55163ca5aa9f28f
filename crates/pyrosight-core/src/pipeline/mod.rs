mod orchestrator;
mod types;

pub use orchestrator::{process_frame, process_frames};
pub use types::FrameReport;
