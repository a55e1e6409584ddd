use crate::shared::mask::Mask;

use super::hand_candidate::HandCandidate;

/// Domain interface for picking the hand out of a segmented mask.
pub trait HandExtractor: Send {
    /// Returns `None` when no region reaches the minimum area.
    fn extract(&self, mask: &Mask) -> Option<HandCandidate>;
}
