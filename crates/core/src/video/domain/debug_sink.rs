use crate::shared::frame::Frame;
use crate::shared::frame_report::FrameReport;
use crate::shared::mask::Mask;

/// Optional consumer of per-frame visualisation data.
///
/// The mask is only lent for the duration of the call.
pub trait DebugSink: Send {
    fn consume(
        &mut self,
        frame: &Frame,
        mask: &Mask,
        report: &FrameReport,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
