use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::landmarks::LandmarkFrame;

// Single-slot, latest-wins hand-off between a detector thread and the
// animation loop. Publishing over an unconsumed frame replaces it; taking
// from an empty slot means "skip this tick". Nothing ever queues or blocks.
#[derive(Default)]
pub struct FrameSlot
{
    slot: ArcSwapOption<LandmarkFrame>,
}
impl FrameSlot
{
    #[must_use]
    pub fn new() -> Self
    {
        Self { slot: ArcSwapOption::empty() }
    }

    pub fn publish(&self, frame: LandmarkFrame)
    {
        self.slot.store(Some(Arc::new(frame)));
    }

    // The most recent unconsumed frame, leaving the slot empty
    #[must_use]
    pub fn take(&self) -> Option<Arc<LandmarkFrame>>
    {
        self.slot.swap(None)
    }
}
