//! Popup tracker - Confirmation and message popups
//!
//! A popup takes the speech channel from whatever menu is underneath it. When it
//! closes the region is simply released; the menu below re-claims on its next
//! selection.

use std::rc::Rc;

use tracing::warn;

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::value_objects::Region;

pub struct PopupTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
}

impl PopupTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self { core, probe }
    }

    pub fn is_open(&self) -> bool {
        self.core.is_active()
    }

    pub fn claim_open(&self) {
        self.core.claim();
    }
}

impl MenuTracker for PopupTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.is_popup_open() {
            Ok(true) => true,
            Ok(false) => {
                self.reset();
                false
            }
            Err(e) => {
                warn!("Popup probe failed, releasing: {}", e);
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
    fn test_suppresses_while_popup_is_open() {
        let rig = TestRig::new();
        rig.probe.popup_open.set(true);
        rig.trackers.popup.claim_open();

        assert!(rig.trackers.popup.should_suppress());
        assert!(rig.trackers.popup.is_open());
    }

    #[test]
    fn test_missed_close_is_released_on_revalidation() {
        let rig = TestRig::new();
        rig.probe.popup_open.set(true);
        rig.trackers.popup.claim_open();

        rig.probe.popup_open.set(false);
        assert!(!rig.trackers.popup.should_suppress());
        assert!(!rig.registry.is_active(Region::Popup));
    }

    #[test]
    fn test_state_read_failure_releases_region() {
        let rig = TestRig::new();
        rig.probe.popup_open.set(true);
        rig.trackers.popup.claim_open();

        rig.probe.fail.set(true);
        assert!(!rig.trackers.popup.should_suppress());
        assert!(!rig.registry.is_active(Region::Popup));
    }
}
