//! Landing-zone overlay for the airship
//!
//! Speaks only when landability flips. The region is an overlay: it is never
//! swept by exclusive activation and never silences the generic narrator.

use std::cell::Cell;

use super::{MenuTracker, TrackerCore};
use crate::domain::value_objects::{Announcement, Region};

pub struct VehicleLandingTracker {
    core: TrackerCore,
    last: Cell<Option<bool>>,
}

impl VehicleLandingTracker {
    pub fn new(core: TrackerCore) -> Self {
        Self {
            core,
            last: Cell::new(None),
        }
    }

    /// Feed the current landability. Returns an announcement on edges only.
    pub fn observe(&self, can_land: bool) -> Option<Announcement> {
        if self.last.replace(Some(can_land)) == Some(can_land) {
            return None;
        }
        self.core.activate();
        let text = if can_land { "Can land" } else { "Cannot land" };
        Some(Announcement::interrupting(text))
    }
}

impl MenuTracker for VehicleLandingTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        false
    }

    fn should_announce(&self, text: &str) -> bool {
        self.core.should_announce(text)
    }

    fn reset(&self) {
        self.core.release();
        self.last.set(None);
    }

    fn on_region_lost(&self) {
        self.last.set(None);
    }
}
