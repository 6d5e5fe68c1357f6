//! Event item select tracker - "Use which item?" prompts raised by story events

use std::cell::Cell;
use std::rc::Rc;

use tracing::warn;

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::value_objects::Region;

pub struct EventItemSelectTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    open: Cell<bool>,
}

impl EventItemSelectTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self {
            core,
            probe,
            open: Cell::new(false),
        }
    }

    /// The prompt is up; ownership waits for the first real selection
    pub fn mark_open(&self) {
        self.open.set(true);
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn claim_selection(&self) {
        self.open.set(true);
        self.core.claim();
    }
}

impl MenuTracker for EventItemSelectTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.is_event_item_select_open() {
            Ok(true) => true,
            Ok(false) => {
                self.reset();
                false
            }
            Err(e) => {
                warn!("Event item probe failed, releasing: {}", e);
                self.reset();
                false
            }
        }
    }

    fn should_announce(&self, text: &str) -> bool {
        self.core.should_announce(text)
    }

    fn reset(&self) {
        self.core.release();
        self.open.set(false);
    }

    fn on_region_lost(&self) {
        self.core.clear_gate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestRig;

    #[test]
    fn test_suppresses_while_prompt_is_open() {
        let rig = TestRig::new();
        rig.probe.event_item_open.set(true);
        rig.trackers.event_item.claim_selection();

        assert!(rig.trackers.event_item.should_suppress());
        assert!(rig.registry.is_active(Region::EventItemSelect));
    }

    #[test]
    fn test_missed_close_is_released_on_revalidation() {
        let rig = TestRig::new();
        let tracker = &rig.trackers.event_item;
        rig.probe.event_item_open.set(true);
        tracker.claim_selection();

        rig.probe.event_item_open.set(false);
        assert!(!tracker.should_suppress());
        assert!(!rig.registry.is_active(Region::EventItemSelect));
        assert!(!tracker.is_open());
    }

    #[test]
    fn test_state_read_failure_releases_region() {
        let rig = TestRig::new();
        rig.probe.event_item_open.set(true);
        rig.trackers.event_item.claim_selection();

        rig.probe.fail.set(true);
        assert!(!rig.trackers.event_item.should_suppress());
        assert!(!rig.registry.is_active(Region::EventItemSelect));
    }
}
